// Gestion des erreurs personnalisées

use std::fmt;
use std::error::Error as StdError;
use crate::types::RouterId;

#[derive(Debug)]
pub enum AppError {
    /// Identifiant hors de la plage courante ou routeur supprimé
    InvalidId(RouterId),
    /// Tentative de relier un routeur à lui-même
    SelfLink(RouterId),
    IOError(std::io::Error),
    ParseError(String),
    ConfigError(String),
    SerializationError(serde_json::Error),
    /// Chaîne de prédécesseurs cassée après Dijkstra : erreur de programmation, jamais récupérable
    InvariantViolation(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::InvalidId(id) => write!(f, "Invalid router id: {}", id),
            AppError::SelfLink(id) => write!(f, "Cannot link router R{} to itself", id),
            AppError::IOError(err) => write!(f, "IO error: {}", err),
            AppError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            AppError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            AppError::SerializationError(err) => write!(f, "Serialization error: {}", err),
            AppError::InvariantViolation(msg) => write!(f, "Internal invariant violated: {}", msg),
        }
    }
}

impl StdError for AppError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            AppError::IOError(err) => Some(err),
            AppError::SerializationError(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::IOError(err)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::SerializationError(err)
    }
}

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        AppError::ConfigError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
