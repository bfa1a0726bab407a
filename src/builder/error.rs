//! Build errors for the declaration surface.

use crate::core::DeclarationError;
use thiserror::Error;

/// Errors that can occur while declaring a machine type.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Rule source not specified. Call .from(state) or .from_any()")]
    MissingSource,

    #[error("Rule destination not specified. Call .to(state)")]
    MissingDestination,

    #[error("No rules declared. Add at least one rule")]
    NoRules,

    #[error(transparent)]
    Declaration(#[from] DeclarationError),
}
