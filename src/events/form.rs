use chrono::NaiveDateTime;
use utoipa::ToSchema;
use crate::error::{APIError, APIResult};
use crate::event_type::TypeId;
use crate::events::Event;

pub const NAME_MIN_LENGTH: usize = 5;
pub const NAME_MAX_LENGTH: usize = 20;
pub const DESCRIPTION_MIN_LENGTH: usize = 15;
pub const DESCRIPTION_MAX_LENGTH: usize = 150;

/// Untrusted event data as submitted by a client.
#[derive(serde::Serialize, serde::Deserialize, ToSchema, Debug, Clone, PartialEq)]
pub struct EventForm {
    pub name: String,
    pub description: String,
    #[schema(value_type = i32)]
    pub type_id: TypeId,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

/// Checked event fields, the only shape the event service accepts.
#[derive(Debug, Clone, PartialEq)]
pub struct EventInput {
    pub name: String,
    pub description: String,
    pub type_id: TypeId,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

fn check_length(field: &str, value: &str, min: usize, max: usize) -> APIResult<()> {
    let length = value.chars().count();
    if length < min || length > max {
        return Err(APIError::validation(format!(
            "{field} must be between {min} and {max} characters long"
        )));
    }
    Ok(())
}

impl EventForm {
    /// Field level checks only. Category and schedule rules live in the service.
    pub fn validate(&self) -> APIResult<()> {
        check_length("name", self.name.trim(), NAME_MIN_LENGTH, NAME_MAX_LENGTH)?;
        check_length("description", self.description.trim(), DESCRIPTION_MIN_LENGTH, DESCRIPTION_MAX_LENGTH)?;
        Ok(())
    }

    pub fn into_input(self) -> APIResult<EventInput> {
        self.validate()?;

        Ok(EventInput {
            name: self.name.trim().to_owned(),
            description: self.description.trim().to_owned(),
            type_id: self.type_id,
            start: self.start,
            end: self.end,
        })
    }
}

impl From<Event> for EventForm {
    fn from(event: Event) -> Self {
        EventForm {
            name: event.name,
            description: event.description,
            type_id: event.type_id,
            start: event.start,
            end: event.end,
        }
    }
}
