use thiserror::Error;

/// The Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;

/// Enum encapsulating all the possible errors from this library.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// Indicates that a value has no multiplicative inverse in the field.
    #[error("{0} has no multiplicative inverse modulo 251")]
    NotInvertible(i64),

    /// Indicates that the interpolation points do not define a solvable system.
    #[error("Invalid linear system: {0}")]
    InvalidSystem(String),
}
