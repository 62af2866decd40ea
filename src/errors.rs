use crate::core::validation::FieldErrors;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Missing required environment variable {name}")]
    MissingCredential { name: String },

    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    #[error("Invalid amount: {amount}")]
    InvalidAmount { amount: f64 },

    #[error("Unknown status value '{value}'")]
    InvalidStatus { value: String },

    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("Store returned HTTP {status}: {message}")]
    Http { status: u16, message: String },

    #[error("Store unreachable: {0}")]
    Transport(String),

    #[error("Failed to decode store response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Store returned no row for insert into {table}")]
    EmptyInsert { table: String },

    #[error("Nothing to export")]
    EmptyExport,

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("Failed to write TOML: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("Background task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl From<ureq::Error> for Error {
    fn from(value: ureq::Error) -> Self {
        match value {
            ureq::Error::Status(status, response) => {
                let message = response
                    .into_string()
                    .unwrap_or_else(|e| format!("unreadable body: {e}"));
                Self::Http { status, message }
            }
            ureq::Error::Transport(transport) => Self::Transport(transport.to_string()),
        }
    }
}

// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
