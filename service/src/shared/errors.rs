use thiserror::Error;

use crate::modules::config::ConfigError;
use crate::modules::support::application::ApplicationError;
use crate::modules::support::domain::CatalogError;
use crate::modules::support::ports::{ProviderError, RepositoryError, TranslationError};

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    ConfigError(#[from] ConfigError),

    #[error("Catalog error: {0}")]
    CatalogError(#[from] CatalogError),

    #[error("Storage error: {0}")]
    RepositoryError(#[from] RepositoryError),

    #[error("Provider error: {0}")]
    ProviderError(#[from] ProviderError),

    #[error("Translation error: {0}")]
    TranslationError(#[from] TranslationError),

    #[error("{0}")]
    ApplicationError(#[from] ApplicationError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl serde::Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_as_message() {
        let err = AppError::from(ApplicationError::EmptyInput);
        let json = serde_json::to_string(&err).unwrap();

        assert_eq!(json, "\"Please type something!\"");
    }
}
