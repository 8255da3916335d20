//! Encoding NBT to anything implementing [`Write`].
//!
//! [`Writer`] does not compress. Wrap the stream in e.g.
//! `flate2::write::GzEncoder` if the consumer expects compressed NBT.

use std::io::Write;

use byteorder::{BigEndian, ByteOrder, WriteBytesExt};

use crate::error::{Error, Result};
use crate::{mutf8, Tag, Value, MAX_DEPTH};

/// Encode a named root tag to a byte vector.
pub fn to_bytes(name: &str, value: &Value) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    Writer::new(&mut buf).write_named(name, value)?;
    Ok(buf)
}

/// Encode an unnamed root tag to a byte vector (the network convention).
pub fn to_bytes_unnamed(value: &Value) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    Writer::new(&mut buf).write_unnamed(value)?;
    Ok(buf)
}

/// Encode a named root tag to a writer.
pub fn to_writer<W: Write>(writer: W, name: &str, value: &Value) -> Result<()> {
    Writer::new(writer).write_named(name, value)
}

/// Encode an unnamed root tag to a writer.
pub fn to_writer_unnamed<W: Write>(writer: W, value: &Value) -> Result<()> {
    Writer::new(writer).write_unnamed(value)
}

/// Writes NBT tag trees to a stream.
///
/// Output byte order is big-endian throughout and is identical on any host;
/// bytes appear in exactly the traversal order of the tree, compound members
/// in insertion order and list elements in index order. Construct over
/// `&mut W` to keep ownership of the stream, or use [`Writer::into_inner`].
pub struct Writer<W: Write> {
    writer: W,
    depth: usize,
}

impl<W: Write> Writer<W> {
    /// Create a new writer for the given stream.
    pub fn new(writer: W) -> Self {
        Self { writer, depth: 0 }
    }

    /// Gets a reference to the underlying stream.
    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    /// Gets a mutable reference to the underlying stream.
    pub fn get_mut(&mut self) -> &mut W {
        &mut self.writer
    }

    /// Consumes this writer, returning the underlying stream.
    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Write one named tag: type byte, name, payload.
    pub fn write_named(&mut self, name: &str, value: &Value) -> Result<()> {
        // A failed write leaves entered levels behind; each root gets the
        // full budget.
        self.depth = 0;
        self.writer.write_u8(value.tag().into())?;
        self.write_string(name)?;
        self.write_payload(value)
    }

    /// Write one unnamed tag: type byte, then payload directly.
    pub fn write_unnamed(&mut self, value: &Value) -> Result<()> {
        self.depth = 0;
        self.writer.write_u8(value.tag().into())?;
        self.write_payload(value)
    }

    fn write_string(&mut self, s: &str) -> Result<()> {
        let encoded = mutf8::encode(s)?;
        self.writer.write_u16::<BigEndian>(encoded.len() as u16)?;
        self.writer.write_all(&encoded)?;
        Ok(())
    }

    fn write_len(&mut self, len: usize) -> Result<()> {
        let len: i32 = len.try_into().map_err(|_| Error::LengthOverflow(len))?;
        self.writer.write_i32::<BigEndian>(len)?;
        Ok(())
    }

    fn write_payload(&mut self, value: &Value) -> Result<()> {
        match value {
            Value::Byte(v) => self.writer.write_i8(*v)?,
            Value::Short(v) => self.writer.write_i16::<BigEndian>(*v)?,
            Value::Int(v) => self.writer.write_i32::<BigEndian>(*v)?,
            Value::Long(v) => self.writer.write_i64::<BigEndian>(*v)?,
            Value::Float(v) => self.writer.write_f32::<BigEndian>(*v)?,
            Value::Double(v) => self.writer.write_f64::<BigEndian>(*v)?,
            Value::String(v) => self.write_string(v)?,
            Value::ByteArray(v) => {
                self.write_len(v.len())?;
                self.writer.write_all(i8_slice_as_u8(v))?;
            }
            Value::IntArray(v) => {
                self.write_len(v.len())?;
                // Bulk byte-swap into one scratch buffer rather than a
                // write call per element.
                let mut buf = vec![0u8; v.len() * 4];
                BigEndian::write_i32_into(v, &mut buf);
                self.writer.write_all(&buf)?;
            }
            Value::LongArray(v) => {
                self.write_len(v.len())?;
                let mut buf = vec![0u8; v.len() * 8];
                BigEndian::write_i64_into(v, &mut buf);
                self.writer.write_all(&buf)?;
            }
            Value::List(list) => {
                self.enter()?;
                self.writer.write_u8(list.element_tag().into())?;
                self.write_len(list.len())?;
                for element in list {
                    self.write_payload(element)?;
                }
                self.leave();
            }
            Value::Compound(compound) => {
                self.enter()?;
                for (name, child) in compound {
                    self.writer.write_u8(child.tag().into())?;
                    self.write_string(name)?;
                    self.write_payload(child)?;
                }
                // Member terminator.
                self.writer.write_u8(Tag::End.into())?;
                self.leave();
            }
        }
        Ok(())
    }

    // Same cap as the reader, so any tree this writer accepts can be read
    // back.
    fn enter(&mut self) -> Result<()> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(Error::DepthLimit);
        }
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }
}

// Safe to treat [i8] as [u8].
fn i8_slice_as_u8(v: &[i8]) -> &[u8] {
    unsafe { &*(v as *const [i8] as *const [u8]) }
}
