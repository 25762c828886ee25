// lzp - streaming LZP compression codec
//
// Dual-licensed under MIT and Apache-2.0.

//! Byte stream abstraction
//!
//! This module defines the pull-style source and push-style sink the codec
//! transcodes between, plus adapters for in-memory buffers and `std::io`
//! streams. The transcoder never sees the underlying transport; everything
//! it needs is "next byte or end" and "write byte or fail".

use crate::error::StreamError;
use std::io::{ErrorKind, Read, Write};

/// Pull-style byte source.
///
/// End-of-data is reported as `Ok(None)` and is the codec's only normal
/// termination signal. Sources must be fused: once `Ok(None)` is returned,
/// every later call must return `Ok(None)` as well.
pub trait ByteSource {
    /// Pull the next byte, or `None` at end-of-data
    fn next_byte(&mut self) -> Result<Option<u8>, StreamError>;
}

/// Push-style byte sink.
///
/// A failed write is fatal for the operation that issued it; the codec
/// aborts without retrying.
pub trait ByteSink {
    /// Write one byte
    fn write_byte(&mut self, byte: u8) -> Result<(), StreamError>;
}

/// Source over an in-memory byte slice
#[derive(Debug, Clone)]
pub struct SliceSource<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> SliceSource<'a> {
    /// Create a source reading `data` front to back
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Bytes not yet pulled
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }
}

impl ByteSource for SliceSource<'_> {
    fn next_byte(&mut self) -> Result<Option<u8>, StreamError> {
        match self.data.get(self.pos) {
            Some(&byte) => {
                self.pos += 1;
                Ok(Some(byte))
            }
            None => Ok(None),
        }
    }
}

/// Source adapter over any `std::io::Read`.
///
/// Reads one byte per call; wrap the reader in a `BufReader` when the
/// underlying stream is a file or pipe.
#[derive(Debug)]
pub struct ReaderSource<R> {
    inner: R,
}

impl<R: Read> ReaderSource<R> {
    /// Wrap a reader
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    /// Unwrap, returning the reader
    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> ByteSource for ReaderSource<R> {
    fn next_byte(&mut self) -> Result<Option<u8>, StreamError> {
        let mut byte = [0u8; 1];
        loop {
            match self.inner.read(&mut byte) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(byte[0])),
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(StreamError::Read(e.to_string())),
            }
        }
    }
}

/// Sink adapter over any `std::io::Write`.
///
/// Writes one byte per call; wrap the writer in a `BufWriter` when the
/// underlying stream is a file or pipe, and flush it after the session.
#[derive(Debug)]
pub struct WriterSink<W> {
    inner: W,
}

impl<W: Write> WriterSink<W> {
    /// Wrap a writer
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    /// Unwrap, returning the writer
    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> ByteSink for WriterSink<W> {
    fn write_byte(&mut self, byte: u8) -> Result<(), StreamError> {
        self.inner
            .write_all(&[byte])
            .map_err(|e| StreamError::Write(e.to_string()))
    }
}

impl ByteSink for Vec<u8> {
    fn write_byte(&mut self, byte: u8) -> Result<(), StreamError> {
        self.push(byte);
        Ok(())
    }
}

/// Sink that discards every byte.
///
/// Used by training sessions that only want the model side effects of an
/// encode, not its output.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl ByteSink for NullSink {
    fn write_byte(&mut self, _byte: u8) -> Result<(), StreamError> {
        Ok(())
    }
}
