//! Validation of extracted inputs.

use crate::error::ValidationError;

/// Trait for validating inputs extracted with
/// [`InputStore::extract_validated`](crate::core::InputStore::extract_validated).
///
/// # Examples
///
/// ```rust
/// use directed_inputs::core::Validate;
/// use directed_inputs::error::ValidationError;
/// use serde::Deserialize;
///
/// #[derive(Debug, Deserialize)]
/// struct WorkerInputs {
///     workers: i64,
///     queue: String,
/// }
///
/// impl Validate for WorkerInputs {
///     fn validate(&self) -> Result<(), ValidationError> {
///         if self.workers <= 0 {
///             return Err(ValidationError::invalid_field("workers", "must be greater than 0"));
///         }
///
///         if self.queue.is_empty() {
///             return Err(ValidationError::invalid_field("queue", "must not be empty"));
///         }
///
///         Ok(())
///     }
/// }
/// ```
pub trait Validate {
    /// Validate the inputs.
    ///
    /// # Errors
    ///
    /// Should return a `ValidationError` describing what validation failed.
    fn validate(&self) -> Result<(), ValidationError>;
}
