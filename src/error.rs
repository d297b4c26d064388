use thiserror::Error;

/// Errors that can occur while searching for recipes
#[derive(Error, Debug)]
pub enum DishDiveError {
    /// Transport failure or non-JSON response from the upstream service
    #[error("Network request failed: {0}")]
    Network(#[from] reqwest::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Failed to read or write the preference store
    #[error("Preference store error: {0}")]
    Store(#[from] std::io::Error),

    /// Invalid user-supplied argument (e.g. an unknown sort order)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}
