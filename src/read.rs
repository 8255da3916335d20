//! Decoding NBT from anything implementing [`Read`].
//!
//! [`Reader`] does not decompress. NBT found on disk is usually gzip or
//! zlib compressed; wrap the stream in a decoder first, e.g. with
//! `flate2::read::GzDecoder`.

use std::io::Read;

use byteorder::{BigEndian, ReadBytesExt};

use crate::error::{Error, Result};
use crate::{mutf8, Compound, List, Tag, Value, MAX_DEPTH, MAX_PAYLOAD_BYTES};

/// Decode a named root tag from a byte slice.
///
/// This is the classic on-disk form: the root carries a name, which for
/// files written by the game is usually the empty string.
pub fn from_bytes(bytes: &[u8]) -> Result<(String, Value)> {
    Reader::new(bytes).read_named()
}

/// Decode an unnamed root tag from a byte slice (the network convention:
/// a type byte followed directly by the payload).
pub fn from_bytes_unnamed(bytes: &[u8]) -> Result<Value> {
    Reader::new(bytes).read_unnamed()
}

/// Decode a named root tag from a reader.
pub fn from_reader<R: Read>(reader: R) -> Result<(String, Value)> {
    Reader::new(reader).read_named()
}

/// Decode an unnamed root tag from a reader.
pub fn from_reader_unnamed<R: Read>(reader: R) -> Result<Value> {
    Reader::new(reader).read_unnamed()
}

/// Reads one NBT tag tree from a stream.
///
/// A reader is bound to its stream for its lifetime and is not usable from
/// multiple threads without external synchronization. Construct it over
/// `&mut R` if you need the stream back without consuming the reader, or use
/// [`Reader::into_inner`].
///
/// Malformed input is rejected, never repaired; after any error the stream
/// position is unspecified and a partially-decoded tree is never returned.
pub struct Reader<R: Read> {
    reader: R,
    depth: usize,
}

impl<R: Read> Reader<R> {
    /// Create a new reader for the given stream.
    pub fn new(reader: R) -> Self {
        Self { reader, depth: 0 }
    }

    /// Gets a reference to the underlying stream.
    pub fn get_ref(&self) -> &R {
        &self.reader
    }

    /// Gets a mutable reference to the underlying stream.
    pub fn get_mut(&mut self) -> &mut R {
        &mut self.reader
    }

    /// Consumes this reader, returning the underlying stream.
    pub fn into_inner(self) -> R {
        self.reader
    }

    /// Read one named tag: type byte, name, payload.
    pub fn read_named(&mut self) -> Result<(String, Value)> {
        // A failed read leaves entered levels behind; each root gets the
        // full budget.
        self.depth = 0;
        let tag = self.read_tag()?;
        if tag == Tag::End {
            return Err(Error::UnexpectedEndTag);
        }
        let name = self.read_string()?;
        let value = self.read_payload(tag)?;
        Ok((name, value))
    }

    /// Read one unnamed tag: type byte, then payload directly.
    pub fn read_unnamed(&mut self) -> Result<Value> {
        self.depth = 0;
        let tag = self.read_tag()?;
        if tag == Tag::End {
            return Err(Error::UnexpectedEndTag);
        }
        self.read_payload(tag)
    }

    fn read_tag(&mut self) -> Result<Tag> {
        let b = self.reader.read_u8()?;
        Tag::try_from(b).map_err(|_| Error::InvalidTag(b))
    }

    fn read_string(&mut self) -> Result<String> {
        let len = self.reader.read_u16::<BigEndian>()? as usize;
        let mut buf = vec![0; len];
        self.reader.read_exact(&mut buf)?;
        Ok(mutf8::decode(&buf)?.into_owned())
    }

    /// Checked element count for an array or list of fixed-size elements.
    /// Rejects negative counts and anything that would allocate more than
    /// [`MAX_PAYLOAD_BYTES`], before any allocation happens.
    fn read_len(&mut self, tag: Tag, elem_size: usize) -> Result<usize> {
        let count = self.reader.read_i32::<BigEndian>()?;
        let count: usize = count.try_into().map_err(|_| Error::NegativeLength(tag))?;
        let bytes = (count as u64) * (elem_size as u64);
        if bytes > MAX_PAYLOAD_BYTES {
            return Err(Error::PayloadTooLarge { tag, bytes });
        }
        Ok(count)
    }

    fn read_payload(&mut self, tag: Tag) -> Result<Value> {
        Ok(match tag {
            Tag::End => return Err(Error::UnexpectedEndTag),
            Tag::Byte => Value::Byte(self.reader.read_i8()?),
            Tag::Short => Value::Short(self.reader.read_i16::<BigEndian>()?),
            Tag::Int => Value::Int(self.reader.read_i32::<BigEndian>()?),
            Tag::Long => Value::Long(self.reader.read_i64::<BigEndian>()?),
            Tag::Float => Value::Float(self.reader.read_f32::<BigEndian>()?),
            Tag::Double => Value::Double(self.reader.read_f64::<BigEndian>()?),
            Tag::String => Value::String(self.read_string()?),
            Tag::ByteArray => {
                let len = self.read_len(Tag::ByteArray, 1)?;
                let mut buf = vec![0u8; len];
                self.reader.read_exact(&mut buf)?;
                Value::ByteArray(vec_u8_into_i8(buf))
            }
            Tag::IntArray => {
                let len = self.read_len(Tag::IntArray, 4)?;
                let mut data = vec![0i32; len];
                // One contiguous fetch, byte-swapped in place on LE hosts.
                self.reader.read_i32_into::<BigEndian>(&mut data)?;
                Value::IntArray(data)
            }
            Tag::LongArray => {
                let len = self.read_len(Tag::LongArray, 8)?;
                let mut data = vec![0i64; len];
                self.reader.read_i64_into::<BigEndian>(&mut data)?;
                Value::LongArray(data)
            }
            Tag::List => self.read_list()?,
            Tag::Compound => self.read_compound()?,
        })
    }

    fn read_list(&mut self) -> Result<Value> {
        let element = self.read_tag()?;

        if element == Tag::End {
            // Only the degenerate empty list may declare End elements.
            let count = self.reader.read_i32::<BigEndian>()?;
            return match count {
                0 => Ok(Value::List(List::default())),
                c if c < 0 => Err(Error::NegativeLength(Tag::List)),
                _ => Err(Error::EndListNonEmpty),
            };
        }

        self.enter()?;
        let mut list = List::new(element)?;
        match element {
            Tag::Byte => {
                let len = self.read_len(Tag::List, 1)?;
                let mut buf = vec![0u8; len];
                self.reader.read_exact(&mut buf)?;
                for b in buf {
                    list.push(b as i8)?;
                }
            }
            Tag::Short => {
                let len = self.read_len(Tag::List, 2)?;
                let mut data = vec![0i16; len];
                self.reader.read_i16_into::<BigEndian>(&mut data)?;
                for v in data {
                    list.push(v)?;
                }
            }
            Tag::Int => {
                let len = self.read_len(Tag::List, 4)?;
                let mut data = vec![0i32; len];
                self.reader.read_i32_into::<BigEndian>(&mut data)?;
                for v in data {
                    list.push(v)?;
                }
            }
            Tag::Long => {
                let len = self.read_len(Tag::List, 8)?;
                let mut data = vec![0i64; len];
                self.reader.read_i64_into::<BigEndian>(&mut data)?;
                for v in data {
                    list.push(v)?;
                }
            }
            Tag::Float => {
                let len = self.read_len(Tag::List, 4)?;
                let mut data = vec![0f32; len];
                self.reader.read_f32_into::<BigEndian>(&mut data)?;
                for v in data {
                    list.push(v)?;
                }
            }
            Tag::Double => {
                let len = self.read_len(Tag::List, 8)?;
                let mut data = vec![0f64; len];
                self.reader.read_f64_into::<BigEndian>(&mut data)?;
                for v in data {
                    list.push(v)?;
                }
            }
            _ => {
                // Variable-size elements: no up-front allocation, so the
                // count needs no byte bound of its own. Each element's own
                // payload is still bounded as it is read.
                let count = self.reader.read_i32::<BigEndian>()?;
                if count < 0 {
                    return Err(Error::NegativeLength(Tag::List));
                }
                for _ in 0..count {
                    let value = self.read_payload(element)?;
                    list.push(value)?;
                }
            }
        }
        self.leave();
        Ok(Value::List(list))
    }

    fn read_compound(&mut self) -> Result<Value> {
        self.enter()?;
        let mut compound = Compound::new();
        loop {
            // Member loop: type byte, then name and payload, until the End
            // terminator byte. The End byte is consumed here and never
            // surfaces as a value.
            let tag = self.read_tag()?;
            if tag == Tag::End {
                break;
            }
            let name = self.read_string()?;
            let value = self.read_payload(tag)?;
            compound.insert(name, value);
        }
        self.leave();
        Ok(Value::Compound(compound))
    }

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

// Reinterpret the allocation rather than copying element by element.
// Thanks to https://stackoverflow.com/a/59707887
fn vec_u8_into_i8(v: Vec<u8>) -> Vec<i8> {
    // Make sure v's destructor doesn't free the data it thinks it owns.
    let mut v = std::mem::ManuallyDrop::new(v);

    let p = v.as_mut_ptr();
    let len = v.len();
    let cap = v.capacity();

    unsafe { Vec::from_raw_parts(p as *mut i8, len, cap) }
}
