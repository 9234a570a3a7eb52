//! Configuration error types.

use thiserror::Error;

/// Errors raised while reading embed configuration.
///
/// Any of these aborts initialization of the embed instance; no partial
/// state is built.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A required attribute is missing from the host page.
    #[error("Missing required attribute: {0}")]
    MissingAttribute(&'static str),

    /// An attribute is present but unusable.
    #[error("Invalid value for {attribute}: {value}")]
    InvalidAttribute {
        attribute: &'static str,
        value: String,
    },
}
