//! Async convenience layer over the synchronous engine, available with the
//! `tokio` cargo feature.
//!
//! NBT is not length-prefixed, so a tag tree cannot be sliced out of an
//! async stream without parsing it. These functions therefore work in whole
//! trees: reading buffers the stream to the end before decoding, writing
//! encodes to a buffer before a single `write_all`. The unit of work is one
//! full tag tree, never one byte, and the produced/consumed bytes are
//! identical to the synchronous API's.
//!
//! Cancellation is cooperative and coarse-grained: dropping a future
//! abandons the operation between I/O steps, but a decode or encode of one
//! tree that has already started runs to completion.

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

use crate::error::Result;
use crate::Value;

/// Read the stream to its end and decode a named root tag.
pub async fn from_async_reader<R>(mut reader: R) -> Result<(String, Value)>
where
    R: AsyncRead + Unpin,
{
    let mut buf = Vec::new();
    reader.read_to_end(&mut buf).await?;
    crate::from_bytes(&buf)
}

/// Read the stream to its end and decode an unnamed root tag.
pub async fn from_async_reader_unnamed<R>(mut reader: R) -> Result<Value>
where
    R: AsyncRead + Unpin,
{
    let mut buf = Vec::new();
    reader.read_to_end(&mut buf).await?;
    crate::from_bytes_unnamed(&buf)
}

/// Encode a named root tag and write it out in one `write_all`.
pub async fn to_async_writer<W>(mut writer: W, name: &str, value: &Value) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    let bytes = crate::to_bytes(name, value)?;
    writer.write_all(&bytes).await?;
    Ok(())
}

/// Encode an unnamed root tag and write it out in one `write_all`.
pub async fn to_async_writer_unnamed<W>(mut writer: W, value: &Value) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    let bytes = crate::to_bytes_unnamed(value)?;
    writer.write_all(&bytes).await?;
    Ok(())
}
