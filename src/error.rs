use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid base URL {url}: {source}")]
    InvalidBaseUrl {
        url: String,
        source: url::ParseError,
    },

    #[error("Base URL cannot carry a path: {0}")]
    CannotBeABase(String),

    #[error("Invalid timeout: {0}")]
    InvalidTimeout(String),
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Server returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Not authenticated, a bearer token is required")]
    MissingToken,

    #[error("Request rejected: {0}")]
    Rejected(String),

    #[error("Unexpected response: {0}")]
    Decode(String),

    #[error("Invalid endpoint: {0}")]
    Endpoint(String),
}

#[derive(Debug, Error, PartialEq)]
pub enum SelectionError {
    #[error("Duration must be a whole number of days written as digits only, got {0:?}")]
    InvalidDuration(String),

    #[error("Move-in date {date} is outside {earliest}..={latest}")]
    DateOutOfRange {
        date: NaiveDate,
        earliest: NaiveDate,
        latest: NaiveDate,
    },
}

#[derive(Debug, Error)]
pub enum BookingError {
    #[error("Booking is incomplete: {0}")]
    Incomplete(&'static str),

    #[error("A booking is already being submitted")]
    SubmissionInProgress,

    #[error(transparent)]
    Api(#[from] ApiError),
}

#[derive(Debug, Error, PartialEq)]
pub enum DraftError {
    #[error("PG name is required")]
    MissingName,

    #[error("Invalid pincode: {0}")]
    InvalidPincode(String),

    #[error("Invalid price: {0}")]
    InvalidPrice(String),

    #[error("No sharing row at index {0}")]
    NoSuchRow(usize),

    #[error("The first sharing row cannot be removed")]
    FirstRowRequired,

    #[error("No image at index {0}")]
    NoSuchImage(usize),

    #[error("Unknown state: {0}")]
    UnknownState(String),

    #[error("Unknown city {city} in {state}")]
    UnknownCity { state: String, city: String },

    #[error("Unknown area {area} in {city}")]
    UnknownArea { city: String, area: String },
}

#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("PG {0} not found")]
    NotFound(String),

    #[error(transparent)]
    Invalid(#[from] DraftError),

    #[error(transparent)]
    Api(ApiError),
}

impl From<ApiError> for ProfileError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::NotFound(id) => ProfileError::NotFound(id),
            other => ProfileError::Api(other),
        }
    }
}

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("Unsupported image type: {0}")]
    UnsupportedFormat(String),
}
