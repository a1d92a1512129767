//! Top-level diagnostic error type.
//!
//! Each subsystem defines its own error enum with miette `#[diagnostic]`
//! derives (codes and help text). [`ScribeError`] wraps them transparently so
//! the full diagnostic survives to the CLI.

use miette::Diagnostic;
use thiserror::Error;

pub use crate::alias::AliasError;
pub use crate::config::ConfigError;
pub use crate::lingua::LinguisticError;

#[derive(Debug, Error, Diagnostic)]
pub enum ScribeError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Linguistic(#[from] LinguisticError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Alias(#[from] AliasError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),
}

impl ScribeError {
    /// Collapse alias errors that only wrap a provider failure, so callers
    /// can match on [`ScribeError::Linguistic`] regardless of which stage
    /// hit it.
    pub fn flatten(self) -> Self {
        match self {
            Self::Alias(AliasError::Provider(inner)) => Self::Linguistic(inner),
            other => other,
        }
    }
}

/// Convenience alias used throughout the crate.
pub type ScribeResult<T> = std::result::Result<T, ScribeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_failure_inside_alias_flattens() {
        let inner = LinguisticError::Unavailable {
            provider: "stub".into(),
            message: "offline".into(),
        };
        let err = ScribeError::from(AliasError::from(inner)).flatten();
        assert!(matches!(err, ScribeError::Linguistic(_)));
    }

    #[test]
    fn config_errors_keep_their_message() {
        let err: ScribeError = ConfigError::Parse {
            path: "carbonscribe.toml".into(),
            message: "expected a boolean".into(),
        }
        .into();
        assert!(err.to_string().contains("expected a boolean"));
    }
}
