#![forbid(unsafe_code)]

//! line21 public facade crate.
//!
//! Re-exports the 608 decoding engine and the CEA-708 envelope parser, and
//! ties them together in [`CaptionStream`]:
//!
//! ```
//! use line21::CaptionStream;
//!
//! let mut stream = CaptionStream::new();
//! // Resume direct captioning, then "HI", parity applied.
//! let captions = stream.push_units(&[0x9429, 0xC849]);
//! assert_eq!(captions, vec!["HI"]);
//! ```

use std::fmt;

mod stream;

pub use stream::{CaptionStream, units_from_be_bytes};

// --- Core re-exports -------------------------------------------------------

pub use line21_core::{
    BufferSlot, Cell, CellFlags, CodeKind, Command, ControlCode, Cursor, DecodeOutcome, Decoder,
    DecoderConfig, DisplayState, FrameBuffer, Mode, Parser, Snapshot, Style, parity_byte,
    parity_word, validate_and_strip,
};

// --- Envelope re-exports ---------------------------------------------------

pub use line21_envelope::{
    CcBlock, CcData, CcType, EnvelopeError, ExtractConfig, Provider, UserDataRegistered,
    extract_cc_units, extract_cc_units_with, parse_cc_block, parse_registered_user_data,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for caption pipelines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The transport envelope was malformed and discarded.
    Envelope(EnvelopeError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Envelope(err) => write!(f, "caption envelope: {err}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Envelope(err) => Some(err),
        }
    }
}

impl From<EnvelopeError> for Error {
    fn from(err: EnvelopeError) -> Self {
        Self::Envelope(err)
    }
}

/// Standard result type for line21 APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        CaptionStream, Decoder, DecoderConfig, Error, ExtractConfig, Mode, Result, Snapshot,
    };

    pub use crate::{core, envelope};
}

pub use line21_core as core;
pub use line21_envelope as envelope;
