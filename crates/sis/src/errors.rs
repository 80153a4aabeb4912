use std::path::PathBuf;
use thiserror::Error;

/// The Result type for this library.
pub type Result<T> = std::result::Result<T, Error>;

/// Enum encapsulating all the possible errors from this library.
#[derive(Debug, Error)]
pub enum Error {
    /// A file or directory could not be opened, read or written.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// The path being accessed.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },

    /// The magic number is not `BM`.
    #[error("Not a bitmap: magic number {0:#06x}")]
    NotABitmap(u16),

    /// The bitmap is well formed but uses a variant this codec does not handle.
    #[error("Unsupported bitmap format: {0}")]
    UnsupportedFormat(String),

    /// Fewer bytes are available than the headers declare.
    #[error("Truncated file: expected {expected} bytes, found {found}")]
    TruncatedFile {
        /// Number of bytes required.
        expected: usize,
        /// Number of bytes available.
        found: usize,
    },

    /// A pixel array cannot be split in groups of `threshold` bytes.
    #[error("Pixel array of {size} bytes is not divisible by k = {threshold}")]
    IndivisibleSize {
        /// Size of the pixel array.
        size: usize,
        /// The reconstruction threshold.
        threshold: usize,
    },

    /// A cover is too small, or a directory holds too few usable files.
    #[error("Insufficient capacity: {0}")]
    InsufficientCapacity(String),

    /// The shadows given for reconstruction are inconsistent.
    #[error("Malformed shadow set: {0}")]
    MalformedShadowSet(String),

    /// Indicates that too few values were provided.
    #[error("Too few values provided: {0} is below limit {1}")]
    TooFewValues(usize, usize),

    /// A secret byte is not an element of GF(251).
    #[error("Secret byte {value} at position {position} is not below 251")]
    OutOfField {
        /// Offset of the byte in the pixel array.
        position: usize,
        /// The offending value.
        value: u8,
    },

    /// Invalid sharing parameters.
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    /// An error raised while processing a specific file.
    #[error("{}: {source}", path.display())]
    InFile {
        /// The file being processed.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: Box<Error>,
    },

    /// Indicates a mathematical error.
    #[error("{0}")]
    MathError(#[from] sis_math::Error),
}

/// Helper functions to create errors with uniform messages.
impl Error {
    /// Create an I/O error for `path`.
    pub fn io<P: Into<PathBuf>>(path: P, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Attach `path` to this error.
    pub fn in_file<P: Into<PathBuf>>(self, path: P) -> Self {
        match self {
            e @ (Self::Io { .. } | Self::InFile { .. }) => e,
            e => Self::InFile {
                path: path.into(),
                source: Box::new(e),
            },
        }
    }

    /// Create an insufficient shadows error.
    pub fn insufficient_shadows(provided: usize, required: usize) -> Self {
        Self::TooFewValues(provided, required)
    }

    /// Create an insufficient capacity error for a cover.
    pub fn cover_too_small(available: usize, required: usize) -> Self {
        Self::InsufficientCapacity(format!(
            "cover holds {available} pixels but {required} are needed"
        ))
    }

    /// Create an insufficient capacity error for a directory scan.
    pub fn not_enough_files(
        found: usize,
        required: usize,
        what: &str,
        dir: &std::path::Path,
    ) -> Self {
        Self::InsufficientCapacity(format!(
            "found {found} valid {what} in {} but {required} are needed",
            dir.display()
        ))
    }

    /// Create a malformed shadow set error.
    pub fn malformed_shadow_set<S: Into<String>>(msg: S) -> Self {
        Self::MalformedShadowSet(msg.into())
    }

    /// Create an invalid parameters error.
    pub fn invalid_parameters<S: Into<String>>(msg: S) -> Self {
        Self::InvalidParameters(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use crate::Error;
    use std::path::Path;

    #[test]
    fn error_strings() {
        assert_eq!(
            Error::insufficient_shadows(2, 3).to_string(),
            "Too few values provided: 2 is below limit 3"
        );
        assert_eq!(
            Error::NotABitmap(0x5858).to_string(),
            "Not a bitmap: magic number 0x5858"
        );
        assert_eq!(
            Error::IndivisibleSize {
                size: 10,
                threshold: 3
            }
            .to_string(),
            "Pixel array of 10 bytes is not divisible by k = 3"
        );
        assert_eq!(
            Error::cover_too_small(8, 16).to_string(),
            "Insufficient capacity: cover holds 8 pixels but 16 are needed"
        );
        assert_eq!(
            Error::not_enough_files(1, 3, "covers", Path::new("dir")).to_string(),
            "Insufficient capacity: found 1 valid covers in dir but 3 are needed"
        );
    }

    #[test]
    fn in_file_wraps_once() {
        let e = Error::NotABitmap(0x5858).in_file("a.bmp");
        assert_eq!(e.to_string(), "a.bmp: Not a bitmap: magic number 0x5858");
        let e = e.in_file("b.bmp");
        assert_eq!(e.to_string(), "a.bmp: Not a bitmap: magic number 0x5858");

        let io = Error::io(
            "c.bmp",
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        );
        assert_eq!(io.in_file("d.bmp").to_string(), "I/O error on c.bmp: missing");
    }

    #[test]
    fn math_errors_convert() {
        let e: Error = sis_math::Error::NotInvertible(0).into();
        assert!(matches!(e, Error::MathError(_)));
    }
}
