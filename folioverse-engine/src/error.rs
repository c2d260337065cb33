//! Error types for the fallible edges of the engine
//!
//! The render loop itself never fails. Errors only arise when parsing
//! tokens and configuration handed over by a host.

use thiserror::Error;

/// Errors that can occur while interpreting host input
#[derive(Error, Debug)]
pub enum EngineError {
    /// The style token is not one of the six known styles
    #[error("unknown background style: {0}")]
    UnknownStyle(String),

    /// The theme token is not light, dark or system
    #[error("unknown theme mode: {0}")]
    UnknownTheme(String),

    /// A color literal could not be parsed
    #[error("invalid color literal: {0}")]
    InvalidColor(String),

    /// The configuration JSON was malformed
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

/// Result type for engine input parsing
pub type EngineResult<T> = Result<T, EngineError>;
