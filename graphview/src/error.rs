//! Errors which can happen when configuring a captor.

use thiserror::Error;

/// Captor settings which can not be used.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SettingsError {
    /// A camera ratio bound must be a finite, positive number
    #[error("invalid {name}: {value}")]
    InvalidRatioBound { name: &'static str, value: f64 },
    /// The lower camera ratio bound is above the upper one
    #[error("min camera ratio {min} is greater than max camera ratio {max}")]
    InvertedRatioBounds { min: f64, max: f64 },
}
