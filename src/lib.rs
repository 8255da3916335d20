//! nbtio reads and writes the NBT binary format used by *Minecraft: Java
//! Edition* for world data, player data and network payloads.
//!
//! NBT is a tree of named, typed values. This crate models the tree with
//! [`Value`], [`Compound`] and [`List`], and translates it to and from the
//! big-endian wire form with [`Reader`] and [`Writer`], or the convenience
//! functions [`from_bytes`]/[`to_bytes`] and friends.
//!
//! * Strings on the wire use Java's Modified UTF-8, handled by [`mutf8`].
//! * Compounds preserve insertion order, and the writer emits members in
//!   exactly that order.
//! * Malformed input fails with a typed [`error::Error`]; truncated input
//!   is reported distinctly from corrupt input.
//!
//! # Quick example
//!
//! ```
//! use nbtio::{Compound, Value};
//!
//! let mut level = Compound::new();
//! level.insert("intTest", 2147483647);
//! level.insert("stringTest", "HELLO WORLD THIS IS A TEST STRING ÅÄÖ!");
//!
//! let bytes = nbtio::to_bytes("Level", &Value::Compound(level)).unwrap();
//! let (name, root) = nbtio::from_bytes(&bytes).unwrap();
//!
//! assert_eq!(name, "Level");
//! let root = root.as_compound().unwrap();
//! assert_eq!(root.int("intTest"), Some(2147483647));
//! ```
//!
//! # Compression
//!
//! NBT files are usually gzip or zlib compressed. This crate works on the
//! uncompressed stream only; apply e.g. `flate2`'s decoder/encoder around
//! the reader/writer yourself.
//!
//! # Async
//!
//! With the `tokio` feature, [`asynchronous`] offers `AsyncRead`/`AsyncWrite`
//! entry points that buffer a whole tag tree and hand it to the synchronous
//! engine. The wire format is byte-for-byte identical.

pub mod error;
pub mod mutf8;

mod read;
mod value;
mod write;

#[cfg(feature = "tokio")]
pub mod asynchronous;

pub use read::{from_bytes, from_bytes_unnamed, from_reader, from_reader_unnamed, Reader};
pub use value::{Compound, List, Value};
pub use write::{to_bytes, to_bytes_unnamed, to_writer, to_writer_unnamed, Writer};

#[cfg(test)]
mod test;

/// Upper bound on the decoded size of any single array or list payload.
///
/// A corrupt or hostile length field must not be able to trigger an
/// arbitrarily large allocation before any payload byte has been seen.
pub const MAX_PAYLOAD_BYTES: u64 = 512 * 1024 * 1024;

/// Upper bound on list/compound nesting depth, applied by both reader and
/// writer. The wire format itself has no cap, so without one a short
/// malicious input could overflow the stack. The limit must leave the
/// recursive decode comfortably inside a default 2 MiB thread stack even in
/// unoptimized builds.
pub const MAX_DEPTH: usize = 128;

/// An NBT tag type. This does not carry the value or the name of the data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Tag {
    /// Terminates a Compound's members; also marks the element type of the
    /// canonical empty list. Never a standalone tag.
    End = 0,
    /// Equivalent to i8.
    Byte = 1,
    /// Equivalent to i16.
    Short = 2,
    /// Equivalent to i32.
    Int = 3,
    /// Equivalent to i64.
    Long = 4,
    /// Equivalent to f32.
    Float = 5,
    /// Equivalent to f64.
    Double = 6,
    /// An array of Byte (i8).
    ByteArray = 7,
    /// A Modified UTF-8 string.
    String = 8,
    /// An ordered sequence of unnamed elements sharing one tag.
    List = 9,
    /// A set of uniquely named tags.
    Compound = 10,
    /// An array of Int (i32).
    IntArray = 11,
    /// An array of Long (i64).
    LongArray = 12,
}

// Crates exist to generate this code for us, but would add to our compile
// times; the tag set is fixed by the wire format and will never grow.
impl TryFrom<u8> for Tag {
    type Error = ();

    fn try_from(value: u8) -> Result<Self, ()> {
        use Tag::*;
        Ok(match value {
            0 => End,
            1 => Byte,
            2 => Short,
            3 => Int,
            4 => Long,
            5 => Float,
            6 => Double,
            7 => ByteArray,
            8 => String,
            9 => List,
            10 => Compound,
            11 => IntArray,
            12 => LongArray,
            13..=u8::MAX => return Err(()),
        })
    }
}

impl From<Tag> for u8 {
    fn from(tag: Tag) -> Self {
        tag as u8
    }
}

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Tag::End => "End",
            Tag::Byte => "Byte",
            Tag::Short => "Short",
            Tag::Int => "Int",
            Tag::Long => "Long",
            Tag::Float => "Float",
            Tag::Double => "Double",
            Tag::ByteArray => "ByteArray",
            Tag::String => "String",
            Tag::List => "List",
            Tag::Compound => "Compound",
            Tag::IntArray => "IntArray",
            Tag::LongArray => "LongArray",
        };
        f.write_str(name)
    }
}
