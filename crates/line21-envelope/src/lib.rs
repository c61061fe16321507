#![forbid(unsafe_code)]

//! CEA-708 caption envelope extraction.
//!
//! Digital video carries line-21 captions inside ITU-T T.35 "registered
//! user data" (an H.264/H.265 SEI payload or an MPEG-2 user data packet).
//! This crate peels that envelope and returns the 16-bit EIA-608 units for
//! one line-21 field, parity bits intact, ready for `line21-core`.
//!
//! # Primary responsibilities
//!
//! - **Header parsing**: country code, provider, ATSC user identifier and
//!   user-data type code ([`parse_registered_user_data`]).
//! - **Caption block parsing**: `cc_data` header flags, declared count and
//!   three-byte entries ([`parse_cc_block`]).
//! - **Filtering**: keep the payloads of one field whose valid flag is set
//!   ([`extract_cc_units`], [`ExtractConfig`]).
//!
//! A structural problem discards the whole payload with an
//! [`EnvelopeError`]; there is no partial result.

mod cc_data;
mod error;
mod user_data;

pub use cc_data::{
    BLOCK_HEADER_LEN, CC_COUNT_MASK, CC_VALID, CcBlock, CcBlockFlags, CcData, CcType, ENTRY_LEN,
    parse_cc_block,
};
pub use error::EnvelopeError;
pub use user_data::{
    ATSC_USER_IDENTIFIER, CC_DATA_TYPE_CODE, COUNTRY_CODE_EXTENDED, MIN_PAYLOAD_LEN, Provider,
    UserDataRegistered, parse_registered_user_data,
};

/// Which caption entries [`extract_cc_units_with`] keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractConfig {
    /// Entry type to keep. Default: NTSC field 1.
    pub field: CcType,
    /// Drop entries whose valid flag is clear. Default `true`.
    pub require_valid: bool,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            field: CcType::NtscField1,
            require_valid: true,
        }
    }
}

impl ExtractConfig {
    #[must_use]
    pub fn with_field(mut self, field: CcType) -> Self {
        self.field = field;
        self
    }

    #[must_use]
    pub fn with_require_valid(mut self, require_valid: bool) -> Self {
        self.require_valid = require_valid;
        self
    }
}

/// Extract valid NTSC field 1 units from a registered user data payload.
pub fn extract_cc_units(buf: &[u8]) -> Result<Vec<u16>, EnvelopeError> {
    extract_cc_units_with(buf, &ExtractConfig::default())
}

/// Extract units from a registered user data payload, filtered by `config`.
pub fn extract_cc_units_with(
    buf: &[u8],
    config: &ExtractConfig,
) -> Result<Vec<u16>, EnvelopeError> {
    let user_data = match parse_registered_user_data(buf) {
        Ok(user_data) => user_data,
        Err(err) => {
            #[cfg(feature = "tracing")]
            tracing::warn!(error = %err, len = buf.len(), "caption envelope discarded");
            return Err(err);
        }
    };
    Ok(user_data
        .cc_block
        .units(config.field, config.require_valid))
}
