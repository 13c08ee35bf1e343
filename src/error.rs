use std::error::Error;
use std::fmt;
use std::fmt::Display;

pub type APIResult<T> = std::result::Result<T, APIError>;

#[derive(Debug, Clone, PartialEq)]
#[derive(axum_enum_response::EnumIntoResponse)]
pub enum APIError {
    #[status_code(INTERNAL_SERVER_ERROR)]
    Storage(#[key("error")] String),

    #[status_code(BAD_REQUEST)]
    Validation(#[key("error")] String),

    #[status_code(UNAUTHORIZED)]
    #[message("Missing caller identity")]
    Unauthorized,

    #[status_code(FORBIDDEN)]
    #[message("Only the organiser may change this event")]
    Forbidden,

    #[status_code(NOT_FOUND)]
    #[message("Event not found")]
    NotFound,
}

impl APIError {
    pub fn storage<E: Display>(error: E) -> Self {
        APIError::Storage(format!("{:}", error))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        APIError::Validation(message.into())
    }
}

impl Display for APIError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            APIError::Storage(error) => write!(f, "storage error: {error}"),
            APIError::Validation(error) => write!(f, "validation error: {error}"),
            _ => write!(f, "{:?}", self),
        }
    }
}

impl Error for APIError {

}
