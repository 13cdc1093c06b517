//! # tds-stream
//!
//! Streaming conversion for column values too large to hold in one buffer
//! (`TEXT`/`NTEXT`/`VARCHAR(MAX)`-class data).
//!
//! [`convert_stream`] pulls bytes from any [`std::io::Read`] into a small
//! fixed preconversion buffer, pushes them through a [`TdsIconv`]
//! descriptor, and commits the converted bytes to an output stream. A
//! multi-byte character split across two reads is carried over in the
//! buffer head and completed by the next chunk's bytes; incomplete-sequence
//! diagnostics are suppressed on every chunk except the final flush, where
//! a truncated character is a real error.
//!
//! [`copy_stream`] is the same loop without transcoding. Output goes to
//! anything implementing [`OutStream`]: a caller-provided fixed buffer
//! ([`StaticOutStream`]) or a growable one ([`DynOutStream`]).

#![warn(missing_docs)]
#![deny(unsafe_code)]

use std::io::Read;

use thiserror::Error;

use tds_iconv::{Direction, IconvError, Suppress, TdsIconv};

/// Size of the on-stack preconversion buffer. Correctness does not depend
/// on the value as long as it holds at least one multi-byte character.
const PRECONV_BUF: usize = 4096;

/// Errors from stream conversion and the output adapters.
#[derive(Debug, Error)]
pub enum StreamError {
    /// The input stream failed.
    #[error("input stream error: {0}")]
    Io(#[from] std::io::Error),
    /// The output stream has no remaining capacity.
    #[error("output stream exhausted")]
    OutputExhausted,
    /// A commit exceeded a fixed output buffer's capacity.
    #[error("output buffer capacity exceeded")]
    CapacityExceeded,
    /// The input contains a byte sequence invalid in its charset.
    #[error("invalid byte sequence in stream")]
    InvalidSequence,
    /// The stream ended inside a multi-byte character.
    #[error("stream ends inside a multi-byte character")]
    Truncated,
    /// The converter stopped making progress.
    #[error("conversion made no progress")]
    Stalled,
    /// Growing the output buffer failed.
    #[error("out of memory growing output buffer")]
    OutOfMemory,
}

/// An output endpoint that exposes its writable window and accepts commits.
///
/// After every `commit` the stream re-exposes a (possibly relocated)
/// window; callers must not hold the previous one across a commit.
pub trait OutStream {
    /// The currently writable window.
    fn buffer(&mut self) -> &mut [u8];
    /// Accept `len` bytes just written into the exposed window.
    fn commit(&mut self, len: usize) -> Result<(), StreamError>;
}

/// Reads and writes from a stream, converting characters.
///
/// Returns once the input reports end-of-input and everything pulled has
/// been converted and committed.
pub fn convert_stream<R: Read, O: OutStream>(
    conv: &TdsIconv,
    direction: Direction,
    istream: &mut R,
    ostream: &mut O,
) -> Result<(), StreamError> {
    // The preconversion buffer, the place where wire bytes are parked
    // before converting them. Leftover head bytes hold any partial
    // multi-byte sequence between chunks.
    let mut temp = [0u8; PRECONV_BUF];
    let mut bufleft = 0usize;
    let mut suppress = Suppress::default();

    loop {
        if ostream.buffer().is_empty() {
            return Err(StreamError::OutputExhausted);
        }

        let len = istream.read(&mut temp[bufleft..])?;
        if len == 0 {
            return flush_tail(conv, direction, &mut temp, bufleft, ostream, &mut suppress);
        }
        bufleft += len;

        loop {
            // An incomplete tail sequence matters only on the last chunk;
            // here the missing bytes arrive with the next read.
            suppress.einval = true;
            let res = conv.convert(direction, &temp[..bufleft], ostream.buffer(), &mut suppress);
            ostream.commit(res.written)?;
            if res.consumed > 0 {
                temp.copy_within(res.consumed..bufleft, 0);
                bufleft -= res.consumed;
            }

            match res.error {
                None | Some(IconvError::Incomplete) => break,
                Some(IconvError::TooBig) => {
                    if res.consumed == 0 && res.written == 0 {
                        // The exposed window cannot fit a single character
                        // and will not grow: stop instead of spinning.
                        if ostream.buffer().is_empty() {
                            return Err(StreamError::OutputExhausted);
                        }
                        tracing::debug!("stream conversion made no progress");
                        return Err(StreamError::Stalled);
                    }
                    if !ostream.buffer().is_empty() && bufleft > 0 {
                        continue;
                    }
                    break;
                }
                Some(IconvError::InvalidSequence) => {
                    tracing::warn!(
                        bytes = ?&temp[..bufleft.min(16)],
                        "gave up converting stream: invalid byte sequence"
                    );
                    return Err(StreamError::InvalidSequence);
                }
            }
        }
    }
}

/// Convert whatever is parked in the buffer once end-of-input is reached.
/// This is the one place an incomplete sequence is a genuine truncation.
fn flush_tail<O: OutStream>(
    conv: &TdsIconv,
    direction: Direction,
    temp: &mut [u8; PRECONV_BUF],
    mut bufleft: usize,
    ostream: &mut O,
    suppress: &mut Suppress,
) -> Result<(), StreamError> {
    while bufleft > 0 {
        suppress.einval = false;
        let res = conv.convert(direction, &temp[..bufleft], ostream.buffer(), suppress);
        ostream.commit(res.written)?;
        if res.consumed > 0 {
            temp.copy_within(res.consumed..bufleft, 0);
            bufleft -= res.consumed;
        }
        match res.error {
            None => {}
            Some(IconvError::TooBig) => {
                if res.consumed == 0 && res.written == 0 {
                    return Err(StreamError::OutputExhausted);
                }
            }
            Some(IconvError::Incomplete) => {
                tracing::warn!(
                    bytes = ?&temp[..bufleft.min(16)],
                    "stream truncated inside a multi-byte character"
                );
                return Err(StreamError::Truncated);
            }
            Some(IconvError::InvalidSequence) => {
                tracing::warn!(
                    bytes = ?&temp[..bufleft.min(16)],
                    "gave up converting stream: invalid byte sequence"
                );
                return Err(StreamError::InvalidSequence);
            }
        }
    }
    Ok(())
}

/// Reads and writes from a stream to another without conversion.
pub fn copy_stream<R: Read, O: OutStream>(
    istream: &mut R,
    ostream: &mut O,
) -> Result<(), StreamError> {
    loop {
        let buf = ostream.buffer();
        if buf.is_empty() {
            return Err(StreamError::OutputExhausted);
        }
        let len = istream.read(buf)?;
        if len == 0 {
            return Ok(());
        }
        ostream.commit(len)?;
    }
}

/// An input stream bounded by a wire-declared byte count.
///
/// The token layer knows how many bytes a column value occupies; wrapping
/// the network reader keeps the conversion loop from reading past it.
#[derive(Debug)]
pub struct BoundedReader<R> {
    inner: R,
    remaining: usize,
}

impl<R: Read> BoundedReader<R> {
    /// Wrap `inner`, exposing at most `wire_size` bytes.
    pub fn new(inner: R, wire_size: usize) -> Self {
        Self {
            inner,
            remaining: wire_size,
        }
    }

    /// Bytes not yet read.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.remaining
    }
}

impl<R: Read> Read for BoundedReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let want = buf.len().min(self.remaining);
        if want == 0 {
            return Ok(0);
        }
        let n = self.inner.read(&mut buf[..want])?;
        self.remaining -= n;
        Ok(n)
    }
}

/// Output into a caller-provided fixed buffer; committing past its capacity
/// is an error and never writes beyond it.
#[derive(Debug)]
pub struct StaticOutStream<'a> {
    buf: &'a mut [u8],
    len: usize,
}

impl<'a> StaticOutStream<'a> {
    /// Wrap a fixed destination buffer.
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, len: 0 }
    }

    /// Bytes committed so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// True when nothing has been committed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl OutStream for StaticOutStream<'_> {
    fn buffer(&mut self) -> &mut [u8] {
        &mut self.buf[self.len..]
    }

    fn commit(&mut self, len: usize) -> Result<(), StreamError> {
        if len > self.buf.len() - self.len {
            return Err(StreamError::CapacityExceeded);
        }
        self.len += len;
        Ok(())
    }
}

/// Growth headroom added past the committed size on every reallocation,
/// amortizing the number of grows.
const DYN_HEADROOM: usize = 2048;

const DYN_INITIAL: usize = 1024;

/// Output into a growable buffer that re-exposes its tail after every
/// commit.
#[derive(Debug)]
pub struct DynOutStream {
    buf: Vec<u8>,
    size: usize,
}

impl Default for DynOutStream {
    fn default() -> Self {
        Self::new()
    }
}

impl DynOutStream {
    /// Create with at least the default initial allocation.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DYN_INITIAL)
    }

    /// Create with an initial allocation, useful for reusing a size hint.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: vec![0; capacity.max(DYN_INITIAL)],
            size: 0,
        }
    }

    /// Bytes committed so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.size
    }

    /// True when nothing has been committed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Consume the stream, returning exactly the committed bytes.
    #[must_use]
    pub fn into_vec(mut self) -> Vec<u8> {
        self.buf.truncate(self.size);
        self.buf
    }
}

impl OutStream for DynOutStream {
    fn buffer(&mut self) -> &mut [u8] {
        &mut self.buf[self.size..]
    }

    fn commit(&mut self, len: usize) -> Result<(), StreamError> {
        if len > self.buf.len() - self.size {
            return Err(StreamError::CapacityExceeded);
        }
        self.size += len;
        let wanted = self.size + DYN_HEADROOM;
        if wanted > self.buf.len() {
            self.buf
                .try_reserve_exact(wanted - self.buf.len())
                .map_err(|_| StreamError::OutOfMemory)?;
            self.buf.resize(wanted, 0);
        }
        Ok(())
    }
}
