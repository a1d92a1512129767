//! Alias table errors.

use miette::Diagnostic;
use thiserror::Error;

use crate::lingua::LinguisticError;

#[derive(Debug, Error, Diagnostic)]
pub enum AliasError {
    #[error("failed to read alias table: {path}")]
    #[diagnostic(
        code(carbonscribe::alias::io),
        help("Ensure the alias file exists and is readable.")
    )]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse alias table {path}: {message}")]
    #[diagnostic(
        code(carbonscribe::alias::parse),
        help(
            "An alias table maps category -> canonical label -> list of variant phrases, \
             e.g. `[transport]\\ncab = [\"taxi\", \"uber\"]`. Files ending in .json are \
             read as JSON, everything else as TOML."
        )
    )]
    Parse { path: String, message: String },

    #[error("alias \"{label}\" in category \"{category}\" has an empty variant")]
    #[diagnostic(
        code(carbonscribe::alias::empty_variant),
        help("Remove the empty string, or replace it with a phrase containing at least one word.")
    )]
    EmptyVariant { category: String, label: String },

    #[error("label \"{label}\" in category \"{category}\" is also listed as a variant of \"{owner}\"")]
    #[diagnostic(
        code(carbonscribe::alias::label_is_variant),
        help(
            "A canonical label must never be rewritten. Drop it from the variant list of \"{owner}\"."
        )
    )]
    LabelIsVariant {
        category: String,
        label: String,
        owner: String,
    },

    #[error("label \"{label}\" in category \"{category}\" contains the variant \"{variant}\"")]
    #[diagnostic(
        code(carbonscribe::alias::label_contains_variant),
        help(
            "Normalizing would rewrite part of the label again on the next pass. \
             Rename the label or remove the variant."
        )
    )]
    LabelContainsVariant {
        category: String,
        label: String,
        variant: String,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Provider(#[from] LinguisticError),
}

pub type AliasResult<T> = std::result::Result<T, AliasError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_display_names_path() {
        let err = AliasError::Io {
            path: "/tmp/missing.toml".into(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "nope"),
        };
        assert!(err.to_string().contains("/tmp/missing.toml"));
    }

    #[test]
    fn provider_error_is_transparent() {
        let err: AliasError = LinguisticError::Unavailable {
            provider: "x".into(),
            message: "down".into(),
        }
        .into();
        assert!(err.to_string().contains("down"));
    }
}
