//! # lzp - streaming predictive compression
//!
//! A lossless byte codec built on LZP (Lempel-Ziv + Prediction): an order-1
//! model predicts each byte from a small rolling context, and every correct
//! prediction is transmitted as a single bit in a control byte instead of
//! the byte itself.
//!
//! ## Key properties
//!
//! - **Streaming**: bytes flow source to sink, no buffering beyond one run
//! - **Self-contained stream**: no header, length, or checksum; the stream
//!   ends when the transport ends
//! - **Bounded expansion**: incompressible input grows by at most 1 byte
//!   per 8 (12.5%)
//! - **Pluggable prediction**: four context-update functions, each bound to
//!   the table width it needs
//!
//! ## Quick Start
//!
//! ```rust
//! use lzp::{decode_to_vec, encode_to_vec, Predictor};
//!
//! let input = b"hello hello hello hello";
//! let compressed = encode_to_vec(input, Predictor::default()).unwrap();
//! let restored = decode_to_vec(&compressed, Predictor::default()).unwrap();
//! assert_eq!(restored, input);
//! ```
//!
//! Streaming over arbitrary transports goes through the [`ByteSource`] and
//! [`ByteSink`] traits:
//!
//! ```rust
//! use lzp::{Encoder, Predictor, ReaderSource, WriterSink};
//!
//! let mut source = ReaderSource::new(&b"abcabcabc"[..]);
//! let mut sink = WriterSink::new(Vec::new());
//! let mut encoder = Encoder::new(Predictor::ShiftXor16);
//! encoder.encode(&mut source, &mut sink).unwrap();
//! assert!(!sink.into_inner().is_empty());
//! ```
//!
//! ## Modules
//!
//! - [`model`]: predictor variants and the context-to-byte table
//! - [`encoder`]: byte stream to runs
//! - [`decoder`]: runs back to the byte stream
//! - [`stream`]: source/sink traits and `std::io` adapters
//! - [`metrics`]: session counters for ratio reporting
//! - [`error`]: error types

// Modules
pub mod decoder;
pub mod encoder;
pub mod error;
pub mod metrics;
pub mod model;
pub mod stream;

// Re-exports for convenient access
pub use decoder::{decode_to_vec, Decoder};
pub use encoder::{encode_to_vec, Encoder};
pub use error::{LzpError, ModelError, Result, StreamError};
pub use metrics::SessionMetrics;
pub use model::{Model, Predictor};
pub use stream::{ByteSink, ByteSource, NullSink, ReaderSource, SliceSource, WriterSink};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Positions covered by one control byte
pub const RUN_LEN: usize = 8;
