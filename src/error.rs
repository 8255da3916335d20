//! Error and Result types for encoding and decoding NBT.

use crate::Tag;

/// Convenience type for Result.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while encoding or decoding NBT, or while mutating
/// the tag tree model.
///
/// Truncated input is always reported as [`Error::UnexpectedEof`], distinct
/// from the format errors, so callers can tell a cut-short stream from a
/// corrupt one. Use [`Error::is_eof`] and [`Error::is_format`] rather than
/// matching variants if you only care about the category.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// A tag byte outside the 13 known values.
    #[error("invalid nbt tag value: {0}")]
    InvalidTag(u8),

    /// An End tag byte where a real tag was required, e.g. at the root.
    #[error("unexpected End tag")]
    UnexpectedEndTag,

    /// A negative array length or list count in the input.
    #[error("negative length in {0} payload")]
    NegativeLength(Tag),

    /// A single array or list payload larger than [`MAX_PAYLOAD_BYTES`].
    ///
    /// [`MAX_PAYLOAD_BYTES`]: crate::MAX_PAYLOAD_BYTES
    #[error("{tag} payload of {bytes} bytes exceeds the payload size limit")]
    PayloadTooLarge { tag: Tag, bytes: u64 },

    /// Lists/compounds nested deeper than [`MAX_DEPTH`].
    ///
    /// [`MAX_DEPTH`]: crate::MAX_DEPTH
    #[error("nesting depth exceeds limit")]
    DepthLimit,

    /// A string whose Modified UTF-8 encoding does not fit the u16 length
    /// prefix.
    #[error("string of {0} bytes does not fit 16-bit length prefix")]
    StringTooLong(usize),

    /// A list, array or compound with more than `i32::MAX` entries, which
    /// the wire format cannot represent.
    #[error("{0} entries do not fit 32-bit length prefix")]
    LengthOverflow(usize),

    /// A malformed Modified UTF-8 byte sequence.
    #[error("invalid modified utf-8 at byte offset {offset}")]
    InvalidMutf8 { offset: usize },

    /// An element whose tag does not match the list's declared element tag.
    #[error("cannot add {actual} element to list of {expected}")]
    ListElementMismatch { expected: Tag, actual: Tag },

    /// An End-typed list that claims to contain elements.
    #[error("list with End element type must be empty")]
    EndListNonEmpty,

    /// Input ended before the declared structure was complete.
    #[error("unexpected end of input")]
    UnexpectedEof,

    /// Any other I/O failure from the underlying stream.
    #[error("io error: {0}")]
    Io(std::io::Error),
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        match e.kind() {
            std::io::ErrorKind::UnexpectedEof => Error::UnexpectedEof,
            _ => Error::Io(e),
        }
    }
}

impl Error {
    /// True if this error means the input ran out part way through a value.
    pub fn is_eof(&self) -> bool {
        matches!(self, Error::UnexpectedEof)
    }

    /// True if this error means the input was structurally malformed, as
    /// opposed to truncated or an I/O failure.
    pub fn is_format(&self) -> bool {
        !matches!(self, Error::UnexpectedEof | Error::Io(_))
    }

    pub(crate) fn invalid_mutf8(offset: usize) -> Error {
        Error::InvalidMutf8 { offset }
    }
}
