//! Error types for MargaNav

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// MargaNav error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Drive actuator fault
    #[error("Drive fault: {0}")]
    Drive(String),

    /// Sensor acquisition fault
    #[error("Sensor fault: {0}")]
    Sensor(String),

    /// Claw actuator fault
    #[error("Claw fault: {0}")]
    Claw(String),
}

impl From<toml::de::Error> for Error {
    fn from(e: toml::de::Error) -> Self {
        Error::Config(e.to_string())
    }
}
