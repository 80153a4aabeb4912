#![warn(missing_docs, unused_imports)]

//! Traits shared by the on-disk types of the sis library.

/// Serialization of a value into its exact on-disk byte layout.
pub trait Serialize {
    /// Serialize `Self` into a vector of bytes.
    fn to_bytes(&self) -> Vec<u8>;
}

/// Deserialization of a value from its exact on-disk byte layout.
pub trait Deserialize
where
    Self: Sized,
{
    /// The type of error returned when the bytes cannot be decoded.
    type Error;

    /// Attempt to deserialize from a slice of bytes.
    ///
    /// Implementations must decode field by field and never rely on the
    /// in-memory layout of `Self` matching the wire format.
    fn try_deserialize(bytes: &[u8]) -> Result<Self, Self::Error>;
}
