//! Errors raised by linguistic providers.

use miette::Diagnostic;
use thiserror::Error;

/// Failure of the tokenizer / lemmatizer / phrase matcher dependency.
#[derive(Debug, Error, Diagnostic)]
pub enum LinguisticError {
    #[error("linguistic provider \"{provider}\" is unavailable: {message}")]
    #[diagnostic(
        code(carbonscribe::lingua::unavailable),
        help(
            "The tokenizer backing the extraction engine could not process the input. \
             Check that its model or resources are installed, or fall back to the \
             bundled rule-based provider."
        )
    )]
    Unavailable { provider: String, message: String },
}

/// Convenience alias for provider operations.
pub type LinguisticResult<T> = std::result::Result<T, LinguisticError>;
