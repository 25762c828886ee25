//! Decoder
//!
//! Replays the encoder's transform in reverse: each control byte names
//! which of the next up-to-8 positions come from the model and which are
//! carried as literals. The decoder's model mutations mirror the encoder's
//! bit for bit, so both sides stay in lockstep without any metadata in the
//! stream.

use crate::error::Result;
use crate::metrics::SessionMetrics;
use crate::model::{Model, Predictor};
use crate::stream::{ByteSink, ByteSource, SliceSource};
use crate::RUN_LEN;

/// Streaming LZP decoder.
///
/// Owns the predictor model for the session, exactly as [`Encoder`] does;
/// a decoder only reproduces the encoder's input when both start from
/// identical models (normally both zeroed, or both loaded from the same
/// dump).
///
/// [`Encoder`]: crate::Encoder
#[derive(Debug, Clone)]
pub struct Decoder {
    model: Model,
    metrics: SessionMetrics,
}

impl Decoder {
    /// Create a decoder with a zeroed model for `predictor`
    pub fn new(predictor: Predictor) -> Self {
        Self::with_model(Model::new(predictor))
    }

    /// Create a decoder seeded with an existing model
    pub fn with_model(model: Model) -> Self {
        Self {
            model,
            metrics: SessionMetrics::new(),
        }
    }

    /// The model in its current state
    pub fn model(&self) -> &Model {
        &self.model
    }

    /// Consume the decoder, returning the model
    pub fn into_model(self) -> Model {
        self.model
    }

    /// Session counters
    pub fn metrics(&self) -> &SessionMetrics {
        &self.metrics
    }

    /// Zero the model and counters, restoring fresh-session state
    pub fn reset(&mut self) {
        self.model.reset();
        self.metrics.reset();
    }

    /// Decode `source` to `sink` until the source reports end-of-data.
    ///
    /// The stream carries no length field: end-of-data at a run boundary is
    /// the normal termination, and end-of-data where a literal was expected
    /// closes the final run early, mirroring the encoder's truncation. Both
    /// are clean ends, not errors. Fails only if the sink rejects a write
    /// or the source itself fails.
    pub fn decode<S, K>(&mut self, source: &mut S, sink: &mut K) -> Result<()>
    where
        S: ByteSource,
        K: ByteSink,
    {
        let mut ctx: u16 = 0;

        while let Some(mask) = source.next_byte()? {
            self.metrics.bytes_in += 1;
            self.metrics.runs += 1;

            for i in 0..RUN_LEN {
                let byte;
                if mask & (1 << i) != 0 {
                    byte = self.model.predict(ctx);
                    self.metrics.predicted += 1;
                } else {
                    match source.next_byte()? {
                        Some(literal) => {
                            self.metrics.bytes_in += 1;
                            self.model.observe(ctx, literal);
                            self.metrics.literals += 1;
                            byte = literal;
                        }
                        None => break,
                    }
                }

                sink.write_byte(byte)?;
                self.metrics.bytes_out += 1;
                ctx = self.model.advance(ctx, byte);
            }
        }

        #[cfg(feature = "logging")]
        log::debug!(
            "decode session: {} bytes in, {} bytes out, {} runs",
            self.metrics.bytes_in,
            self.metrics.bytes_out,
            self.metrics.runs
        );

        Ok(())
    }
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new(Predictor::default())
    }
}

/// Decode an in-memory buffer with a fresh model
pub fn decode_to_vec(input: &[u8], predictor: Predictor) -> Result<Vec<u8>> {
    let mut decoder = Decoder::new(predictor);
    let mut source = SliceSource::new(input);
    let mut output = Vec::new();
    decoder.decode(&mut source, &mut output)?;
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::encode_to_vec;
    use crate::error::{LzpError, StreamError};

    #[test]
    fn test_decode_empty_input() {
        let output = decode_to_vec(&[], Predictor::ShiftXor16).unwrap();
        assert!(output.is_empty());
    }

    #[test]
    fn test_decode_predicted_zero_byte() {
        let output = decode_to_vec(&[0x01], Predictor::ShiftXor16).unwrap();
        assert_eq!(output, vec![0x00]);
    }

    #[test]
    fn test_decode_single_literal() {
        let output = decode_to_vec(&[0x00, 0xFF], Predictor::ShiftXor16).unwrap();
        assert_eq!(output, vec![0xFF]);
    }

    #[test]
    fn test_decode_truncated_run_is_clean_end() {
        // Control byte promises 8 positions but only 2 literals follow;
        // the run closes at end-of-data without an error.
        let output = decode_to_vec(&[0x00, 0x10, 0x20], Predictor::ShiftXor16).unwrap();
        assert_eq!(output, vec![0x10, 0x20]);
    }

    #[test]
    fn test_decode_full_predicted_run() {
        let output = decode_to_vec(&[0xFF], Predictor::ShiftXor16).unwrap();
        assert_eq!(output, vec![0u8; 8]);
    }

    #[test]
    fn test_decode_mirrors_encode_model_state() {
        let input = b"state mirror state mirror";
        let encoded = encode_to_vec(input, Predictor::ShiftXor16).unwrap();

        let mut encoder = crate::Encoder::new(Predictor::ShiftXor16);
        let mut sink = Vec::new();
        encoder
            .encode(&mut SliceSource::new(input), &mut sink)
            .unwrap();

        let mut decoder = Decoder::new(Predictor::ShiftXor16);
        let mut output = Vec::new();
        decoder
            .decode(&mut SliceSource::new(&encoded), &mut output)
            .unwrap();

        assert_eq!(output, input);
        // Identical table mutations on both sides
        assert_eq!(
            decoder.model().fingerprint(),
            encoder.model().fingerprint()
        );
    }

    #[test]
    fn test_decode_counts_control_bytes() {
        let encoded = encode_to_vec(&[9, 9, 9], Predictor::ShiftXor16).unwrap();
        let mut decoder = Decoder::new(Predictor::ShiftXor16);
        let mut output = Vec::new();
        decoder
            .decode(&mut SliceSource::new(&encoded), &mut output)
            .unwrap();

        // Every byte pulled from the source is counted, control bytes included
        assert_eq!(decoder.metrics().bytes_in, encoded.len() as u64);
        assert_eq!(decoder.metrics().bytes_out, 3);
        assert_eq!(decoder.metrics().runs, 1);
    }

    #[test]
    fn test_decode_aborts_on_write_failure() {
        struct RejectingSink;
        impl ByteSink for RejectingSink {
            fn write_byte(&mut self, _byte: u8) -> std::result::Result<(), StreamError> {
                Err(StreamError::Write("sink full".to_string()))
            }
        }

        let mut decoder = Decoder::new(Predictor::ShiftXor16);
        let mut source = SliceSource::new(&[0x00, 0x42]);
        let err = decoder.decode(&mut source, &mut RejectingSink).unwrap_err();
        assert!(matches!(err, LzpError::Stream(StreamError::Write(_))));
    }
}
