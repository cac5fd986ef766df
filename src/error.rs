//! Error types and handling for the Weatherscope toolkit

use thiserror::Error;

use crate::sports::CatalogError;

/// Main error type for the Weatherscope library
#[derive(Error, Debug)]
pub enum WeatherscopeError {
    /// Configuration-related errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// Sport catalog inconsistencies, detected when the catalog is built
    #[error("Catalog error: {source}")]
    Catalog {
        #[from]
        source: CatalogError,
    },

    /// Input validation errors
    #[error("Invalid input: {message}")]
    Validation { message: String },

    /// Malformed upstream documents (forecast files, catalog files)
    #[error("Parse error: {message}")]
    Parse { message: String },

    /// I/O operation errors
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },

    /// CSV export errors
    #[error("CSV error: {source}")]
    Csv {
        #[from]
        source: csv::Error,
    },
}

impl WeatherscopeError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new validation error
    pub fn validation<S: Into<String>>(message: S) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a new parse error
    pub fn parse<S: Into<String>>(message: S) -> Self {
        Self::Parse {
            message: message.into(),
        }
    }

    /// Get a user-friendly error message
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            WeatherscopeError::Config { .. } => {
                "Configuration error. Please check your config file.".to_string()
            }
            WeatherscopeError::Catalog { source } => {
                format!("The sport catalog is inconsistent: {source}")
            }
            WeatherscopeError::Validation { message } => message.clone(),
            WeatherscopeError::Parse { message } => {
                format!("Could not read the weather data: {message}")
            }
            WeatherscopeError::Io { .. } => {
                "File operation failed. Please check the file path and permissions.".to_string()
            }
            WeatherscopeError::Csv { source } => {
                format!("Could not write the CSV export: {source}")
            }
        }
    }
}

impl From<serde_json::Error> for WeatherscopeError {
    fn from(err: serde_json::Error) -> Self {
        WeatherscopeError::parse(err.to_string())
    }
}
