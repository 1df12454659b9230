//! Defines [`Error`] for representing failures while extracting a column.
use std::fmt::{Display, Formatter};

/// All operations in this crate return this error type.
#[derive(Debug)]
pub enum Error {
    /// Error from the underlying reader
    Io(std::io::Error),
    /// The file does not follow the Avro object container specification
    OutOfSpec(String),
    /// The writer schema is unusable, or a requested column is absent from it
    Schema(String),
    /// A decoded value that cannot be rendered as text
    Render(String),
    /// Triggered by an external error, such as avro-rs or serde
    External(Box<dyn std::error::Error + Send + Sync>),
    /// Any other error, carrying a ready-made message
    Other(String),
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Error::Io(error)
    }
}

impl From<avro_rs::Error> for Error {
    fn from(error: avro_rs::Error) -> Self {
        Error::External(Box::new(error))
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Io(error) => write!(f, "Io error: {}", error),
            Error::OutOfSpec(message) => write!(f, "File out of specification: {}", message),
            Error::Schema(message) => write!(f, "Schema error: {}", message),
            Error::Render(message) => write!(f, "Render error: {}", message),
            Error::External(error) => write!(f, "External error: {}", error),
            Error::Other(message) => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for Error {}

/// Typed result used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
