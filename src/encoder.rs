//! Encoder
//!
//! Consumes a plain byte stream and emits runs: one control byte whose bits
//! flag correctly predicted positions, followed by the literal bytes the
//! model got wrong, in position order. Correctly predicted bytes cost one
//! bit; everything else costs the byte plus its control bit.

use crate::error::Result;
use crate::metrics::SessionMetrics;
use crate::model::{Model, Predictor};
use crate::stream::{ByteSink, ByteSource, SliceSource};
use crate::RUN_LEN;

/// Streaming LZP encoder.
///
/// Owns the predictor model for the session. The model is deliberately not
/// reset between `encode` calls so it can be pre-seeded from a dump or
/// carried into a dump after training; call [`Encoder::reset`] for a fresh
/// session on the same instance.
#[derive(Debug, Clone)]
pub struct Encoder {
    model: Model,
    metrics: SessionMetrics,
}

impl Encoder {
    /// Create an encoder with a zeroed model for `predictor`
    pub fn new(predictor: Predictor) -> Self {
        Self::with_model(Model::new(predictor))
    }

    /// Create an encoder seeded with an existing model.
    ///
    /// The paired decoder must start from an identical model or the output
    /// will not decode to the input.
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

    /// Consume the encoder, returning the trained model
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

    /// Encode `source` to `sink` until the source reports end-of-data.
    ///
    /// Bytes are processed in runs of up to [`RUN_LEN`]; a run is truncated
    /// when the source ends mid-run, and nothing at all is emitted for a
    /// source that was already at end. Fails only if the sink rejects a
    /// write or the source itself fails.
    pub fn encode<S, K>(&mut self, source: &mut S, sink: &mut K) -> Result<()>
    where
        S: ByteSource,
        K: ByteSink,
    {
        let mut ctx: u16 = 0;
        // One run: control byte followed by up to RUN_LEN literals
        let mut buf = [0u8; RUN_LEN + 1];

        loop {
            let mut mask = 0u8;
            let mut consumed = 0usize;
            let mut len = 1usize; // buf[0] is the control byte

            for i in 0..RUN_LEN {
                let byte = match source.next_byte()? {
                    Some(byte) => byte,
                    None => break,
                };
                consumed += 1;
                self.metrics.bytes_in += 1;

                if byte == self.model.predict(ctx) {
                    mask |= 1 << i;
                    self.metrics.predicted += 1;
                } else {
                    self.model.observe(ctx, byte);
                    buf[len] = byte;
                    len += 1;
                    self.metrics.literals += 1;
                }
                ctx = self.model.advance(ctx, byte);
            }

            if consumed == 0 {
                break;
            }

            buf[0] = mask;
            for &byte in &buf[..len] {
                sink.write_byte(byte)?;
                self.metrics.bytes_out += 1;
            }
            self.metrics.runs += 1;
        }

        #[cfg(feature = "logging")]
        log::debug!(
            "encode session: {} bytes in, {} bytes out, {} runs",
            self.metrics.bytes_in,
            self.metrics.bytes_out,
            self.metrics.runs
        );

        Ok(())
    }
}

impl Default for Encoder {
    fn default() -> Self {
        Self::new(Predictor::default())
    }
}

/// Encode an in-memory buffer with a fresh model
pub fn encode_to_vec(input: &[u8], predictor: Predictor) -> Result<Vec<u8>> {
    let mut encoder = Encoder::new(predictor);
    let mut source = SliceSource::new(input);
    let mut output = Vec::new();
    encoder.encode(&mut source, &mut output)?;
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{LzpError, StreamError};
    use crate::stream::NullSink;

    #[test]
    fn test_encode_empty_input() {
        let output = encode_to_vec(&[], Predictor::ShiftXor16).unwrap();
        assert!(output.is_empty());
    }

    #[test]
    fn test_encode_single_zero_byte() {
        // A zeroed table already predicts 0x00 at context 0, so the byte
        // collapses into the control bit.
        let output = encode_to_vec(&[0x00], Predictor::ShiftXor16).unwrap();
        assert_eq!(output, vec![0x01]);
    }

    #[test]
    fn test_encode_single_nonzero_byte() {
        let output = encode_to_vec(&[0xFF], Predictor::ShiftXor16).unwrap();
        assert_eq!(output, vec![0x00, 0xFF]);
    }

    #[test]
    fn test_encode_partial_final_run() {
        // 3 unpredictable bytes: one control byte covering 3 positions
        let output = encode_to_vec(&[1, 2, 3], Predictor::ShiftXor16).unwrap();
        assert_eq!(output, vec![0x00, 1, 2, 3]);
    }

    #[test]
    fn test_encode_worst_case_bound() {
        // Strictly increasing nonzero bytes: any stored table entry is an
        // earlier (smaller) byte, so no position is ever predicted and the
        // output hits the bound exactly: n literals + ceil(n/8) control bytes.
        for n in [1usize, 7, 8, 9, 16, 100, 255] {
            let input: Vec<u8> = (1..=n).map(|i| i as u8).collect();
            let output = encode_to_vec(&input, Predictor::ShiftXor16).unwrap();
            assert_eq!(output.len(), n + (n + 7) / 8);
        }
    }

    #[test]
    fn test_encode_run_of_zeros_collapses() {
        // 0x00 is predicted everywhere in a zeroed model
        let output = encode_to_vec(&[0u8; 8], Predictor::ShiftXor16).unwrap();
        assert_eq!(output, vec![0xFF]);

        let output = encode_to_vec(&[0u8; 64], Predictor::ShiftXor16).unwrap();
        assert_eq!(output, vec![0xFF; 8]);
    }

    #[test]
    fn test_encode_deterministic() {
        let input = b"the quick brown fox jumps over the lazy dog";
        let a = encode_to_vec(input, Predictor::ShiftXor16).unwrap();
        let b = encode_to_vec(input, Predictor::ShiftXor16).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_encode_metrics() {
        let mut encoder = Encoder::new(Predictor::ShiftXor16);
        let mut source = SliceSource::new(&[0x00, 0x00, 0xAA]);
        let mut output = Vec::new();
        encoder.encode(&mut source, &mut output).unwrap();

        let metrics = encoder.metrics();
        assert_eq!(metrics.bytes_in, 3);
        assert_eq!(metrics.bytes_out, output.len() as u64);
        assert_eq!(metrics.runs, 1);
        assert_eq!(metrics.predicted + metrics.literals, 3);
    }

    #[test]
    fn test_encode_updates_model_on_literals_only() {
        let mut encoder = Encoder::new(Predictor::LastByte);
        let mut source = SliceSource::new(&[0x41, 0x41]);
        let mut output = Vec::new();
        encoder.encode(&mut source, &mut output).unwrap();

        // ctx 0 saw literal 0x41, ctx 0x41 saw literal 0x41
        assert_eq!(encoder.model().predict(0x00), 0x41);
        assert_eq!(encoder.model().predict(0x41), 0x41);
    }

    #[test]
    fn test_train_to_null_sink() {
        let mut encoder = Encoder::new(Predictor::ShiftXor16);
        let mut source = SliceSource::new(b"training corpus, training corpus");
        encoder.encode(&mut source, &mut NullSink).unwrap();

        let model = encoder.into_model();
        assert_ne!(model, Model::new(Predictor::ShiftXor16));
    }

    #[test]
    fn test_encode_aborts_on_write_failure() {
        struct RejectingSink;
        impl ByteSink for RejectingSink {
            fn write_byte(&mut self, _byte: u8) -> std::result::Result<(), StreamError> {
                Err(StreamError::Write("sink full".to_string()))
            }
        }

        let mut encoder = Encoder::new(Predictor::ShiftXor16);
        let mut source = SliceSource::new(&[1, 2, 3]);
        let err = encoder.encode(&mut source, &mut RejectingSink).unwrap_err();
        assert!(matches!(err, LzpError::Stream(StreamError::Write(_))));
    }

    #[test]
    fn test_reset_restores_fresh_output() {
        let input = b"abcabcabc";
        let mut encoder = Encoder::new(Predictor::ShiftXor16);

        let mut first = Vec::new();
        encoder
            .encode(&mut SliceSource::new(input), &mut first)
            .unwrap();

        encoder.reset();

        let mut second = Vec::new();
        encoder
            .encode(&mut SliceSource::new(input), &mut second)
            .unwrap();

        assert_eq!(first, second);
    }
}
