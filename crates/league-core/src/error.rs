//! Error types for the league client.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Top-level client error.
#[derive(Error, Debug)]
pub enum LeagueError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl LeagueError {
    /// Whether the error means the session is gone and the user has to log in again.
    pub fn requires_login(&self) -> bool {
        matches!(
            self,
            LeagueError::Api(ApiError::Unauthorized { .. })
                | LeagueError::Domain(DomainError::NotLoggedIn)
        )
    }

    /// Message suitable for showing next to the action that failed.
    pub fn user_message(&self) -> String {
        match self {
            LeagueError::Api(e) => e.user_message(),
            other => other.to_string(),
        }
    }
}

/// Field-by-field validation messages returned by the server.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    /// Messages for one field.
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    /// First message for one field.
    pub fn first(&self, field: &str) -> Option<&str> {
        self.get(field).and_then(|m| m.first()).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            if !first {
                write!(f, "; ")?;
            }
            first = false;
            write!(f, "{}: {}", field, messages.join(", "))?;
        }
        Ok(())
    }
}

/// Errors from talking to the league API.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    #[error("Request rejected ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Unexpected response: {0}")]
    Decode(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl ApiError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized { .. })
    }

    /// Message shown to the user for this failure.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Unauthorized { .. } => {
                "Your session has expired. Please log in again.".to_string()
            }
            ApiError::Validation(fields) => fields.to_string(),
            ApiError::Rejected { message, .. } => message.clone(),
            ApiError::Network(_) => "Network error. Please try again.".to_string(),
            ApiError::Decode(_) => "Unexpected response from server.".to_string(),
            ApiError::Configuration(msg) => msg.clone(),
        }
    }
}

/// Rule violations detected on the client before any request is sent.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    #[error("Please log in")]
    NotLoggedIn,

    #[error("Please select a league first")]
    NoLeagueSelected,

    #[error("Please enter a valid number of shares")]
    InvalidShares,

    #[error("You only own {owned} shares")]
    InsufficientShares { owned: Decimal, requested: Decimal },

    #[error("This league needs 8 participants before it can be selected (currently {count})")]
    LeagueNotFull { count: u32 },

    #[error("You are not a participant in this league")]
    NotParticipant,

    #[error("League not found: {0}")]
    UnknownLeague(String),

    #[error("Start date must be a Monday ({0} is a {1})")]
    NotMonday(NaiveDate, chrono::Weekday),

    #[error("Start date must be the next Monday ({earliest}) or later")]
    StartDateTooEarly { earliest: NaiveDate },

    #[error("Invalid date format. Use YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Invalid league id: {0}")]
    InvalidLeagueId(String),

    #[error("{0} is required")]
    Required(&'static str),

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Password must be at least {min} characters long")]
    PasswordTooShort { min: usize },

    #[error("Please enter a different username")]
    SameUsername,
}

/// Key/value store failures.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Storage quota exceeded: {needed} bytes needed, {limit} allowed")]
    QuotaExceeded { needed: usize, limit: usize },

    #[error("Storage IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage serialization error: {0}")]
    Serialization(String),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Result type alias for client operations.
pub type LeagueResult<T> = Result<T, LeagueError>;
