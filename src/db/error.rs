use oracle::Error as OracleError;
use thiserror::Error;

/// Errors surfaced by the browsing core.
///
/// Sentinel definition texts (`No DDL available` and friends) are ordinary
/// values, not errors; this type covers driver failures and caller mistakes
/// only.
#[derive(Debug, Error)]
pub enum BrowseError {
    /// The driver failed while connecting, preparing, executing or fetching.
    #[error("data source error: {0}")]
    DataSource(#[from] OracleError),

    /// An identifier failed the allow-list check before SQL assembly.
    #[error("invalid identifier `{0}`: expected a letter followed by letters, digits, `_`, `$` or `#`")]
    InvalidIdentifier(String),

    /// A configured object entry had the wrong number of dotted segments.
    #[error("malformed object entry `{entry}`: expected `{expected}`")]
    BadObjectEntry { entry: String, expected: &'static str },
}
