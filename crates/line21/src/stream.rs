//! Envelope-to-text caption pipeline.

use line21_core::{Decoder, DecoderConfig, Snapshot};
use line21_envelope::{ExtractConfig, extract_cc_units_with};

use crate::Result;

/// Split a big-endian byte stream into 16-bit units.
///
/// A trailing odd byte is ignored.
#[must_use]
pub fn units_from_be_bytes(bytes: &[u8]) -> Vec<u16> {
    bytes
        .chunks_exact(2)
        .map(|pair| u16::from_be_bytes([pair[0], pair[1]]))
        .collect()
}

/// A decoder fed from either raw units or CEA-708 envelopes.
///
/// Each `push_*` call returns the rendered caption text once for every
/// point at which a caption became ready, in order.
#[derive(Debug, Clone, Default)]
pub struct CaptionStream {
    decoder: Decoder,
    extract: ExtractConfig,
}

impl CaptionStream {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_config(decoder: DecoderConfig, extract: ExtractConfig) -> Self {
        Self {
            decoder: Decoder::with_config(decoder),
            extract,
        }
    }

    /// Decode parity-carrying units.
    pub fn push_units(&mut self, units: &[u16]) -> Vec<String> {
        self.decoder.feed(units)
    }

    /// Decode a big-endian byte stream of units (e.g. a raw line-21 capture).
    pub fn push_bytes(&mut self, bytes: &[u8]) -> Vec<String> {
        self.push_units(&units_from_be_bytes(bytes))
    }

    /// Extract units from a registered user data payload and decode them.
    ///
    /// A malformed payload is rejected whole and the decoder is left as it
    /// was.
    pub fn push_payload(&mut self, payload: &[u8]) -> Result<Vec<String>> {
        let units = extract_cc_units_with(payload, &self.extract)?;
        Ok(self.push_units(&units))
    }

    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        self.decoder.snapshot()
    }

    #[must_use]
    pub fn decoder(&self) -> &Decoder {
        &self.decoder
    }

    #[must_use]
    pub fn extract_config(&self) -> &ExtractConfig {
        &self.extract
    }

    /// Clear all caption state. Configuration is kept.
    pub fn reset(&mut self) {
        self.decoder.reset();
    }
}
