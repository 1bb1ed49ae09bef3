//! Result type alias for the ETL pipeline

use super::errors::EtlError;

/// Result type alias for pipeline operations
///
/// # Examples
///
/// ```
/// use surname_etl::domain::result::Result;
/// use surname_etl::domain::errors::EtlError;
///
/// fn example_function() -> Result<String> {
///     Ok("success".to_string())
/// }
///
/// fn failing_function() -> Result<()> {
///     Err(EtlError::Configuration("Invalid input".to_string()))
/// }
/// ```
pub type Result<T> = std::result::Result<T, EtlError>;
