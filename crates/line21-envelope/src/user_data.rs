//! ITU-T T.35 registered user data header.
//!
//! ```text
//! country (1) [ext (1) if country == 0xFF] provider (BE u16)
//!   [user identifier (BE u32) if ATSC]
//!   [reserved (1) if country == 0 && provider == 0]
//!   [type code (1) if ATSC or DirecTV]
//!   cc_data block (type code 3)
//! ```

use crate::cc_data::{CcBlock, parse_cc_block};
use crate::error::EnvelopeError;

/// Smallest buffer that can hold a country code, provider and type code.
pub const MIN_PAYLOAD_LEN: usize = 4;
/// Country code value signalling an extension byte.
pub const COUNTRY_CODE_EXTENDED: u8 = 0xFF;
/// ATSC A/53 user identifier, `"GA94"`.
pub const ATSC_USER_IDENTIFIER: u32 = 0x4741_3934;
/// User-data type code carrying a caption data block.
pub const CC_DATA_TYPE_CODE: u8 = 0x03;

/// Terminal provider code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Provider {
    DirecTv,
    Atsc,
    Other(u16),
}

impl Provider {
    pub const DIRECTV_CODE: u16 = 47;
    pub const ATSC_CODE: u16 = 49;

    #[must_use]
    pub fn from_code(code: u16) -> Self {
        match code {
            Self::DIRECTV_CODE => Self::DirecTv,
            Self::ATSC_CODE => Self::Atsc,
            other => Self::Other(other),
        }
    }

    #[must_use]
    pub fn code(self) -> u16 {
        match self {
            Self::DirecTv => Self::DIRECTV_CODE,
            Self::Atsc => Self::ATSC_CODE,
            Self::Other(code) => code,
        }
    }

    /// Providers whose payload carries a user-data type code.
    #[must_use]
    pub fn is_known(self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

/// Parsed registered user data carrying a caption block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDataRegistered {
    pub country_code: u8,
    pub country_code_extension: Option<u8>,
    pub provider: Provider,
    /// Present for ATSC payloads.
    pub user_identifier: Option<u32>,
    pub type_code: u8,
    pub cc_block: CcBlock,
}

struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> Reader<'a> {
    fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    fn rest(&self) -> &'a [u8] {
        &self.buf[self.pos..]
    }

    fn take<const N: usize>(&mut self, field: &'static str) -> Result<[u8; N], EnvelopeError> {
        let bytes = self
            .buf
            .get(self.pos..self.pos + N)
            .and_then(|slice| <[u8; N]>::try_from(slice).ok())
            .ok_or(EnvelopeError::Truncated {
                field,
                available: self.remaining(),
                needed: N,
            })?;
        self.pos += N;
        Ok(bytes)
    }

    fn u8(&mut self, field: &'static str) -> Result<u8, EnvelopeError> {
        self.take::<1>(field).map(|[b]| b)
    }

    fn skip(&mut self, n: usize) {
        self.pos = (self.pos + n).min(self.buf.len());
    }
}

/// Parse a registered user data payload down to its caption block.
///
/// Only ATSC and DirecTV payloads with type code 3 carry captions; every
/// other shape is [`EnvelopeError::Unrecognized`].
pub fn parse_registered_user_data(buf: &[u8]) -> Result<UserDataRegistered, EnvelopeError> {
    if buf.len() < MIN_PAYLOAD_LEN {
        return Err(EnvelopeError::TooShort {
            available: buf.len(),
            needed: MIN_PAYLOAD_LEN,
        });
    }
    let mut r = Reader::new(buf);

    let country_code = r.u8("country code")?;
    let country_code_extension = if country_code == COUNTRY_CODE_EXTENDED {
        Some(r.u8("country code extension")?)
    } else {
        None
    };
    let provider_code = u16::from_be_bytes(r.take("provider code")?);
    let provider = Provider::from_code(provider_code);

    let user_identifier = if provider == Provider::Atsc {
        Some(u32::from_be_bytes(r.take("user identifier")?))
    } else {
        None
    };

    if country_code == 0 && provider_code == 0 {
        r.skip(1);
    }

    if !provider.is_known() {
        return Err(EnvelopeError::Unrecognized {
            provider: provider_code,
            type_code: None,
        });
    }
    // The type code must be followed by at least one byte of payload.
    if r.remaining() < 2 {
        return Err(EnvelopeError::Truncated {
            field: "user data type code",
            available: r.remaining(),
            needed: 2,
        });
    }
    let type_code = r.u8("user data type code")?;

    if type_code != CC_DATA_TYPE_CODE || r.remaining() < 2 {
        return Err(EnvelopeError::Unrecognized {
            provider: provider_code,
            type_code: Some(type_code),
        });
    }

    Ok(UserDataRegistered {
        country_code,
        country_code_extension,
        provider,
        user_identifier,
        type_code,
        cc_block: parse_cc_block(r.rest())?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cc_data::CcType;

    const ATSC_PAYLOAD: &[u8] = &[
        0xB5, // United States
        0x00, 0x31, // ATSC
        0x47, 0x41, 0x39, 0x34, // "GA94"
        0x03, // cc_data
        0xC2, 0xFF, //
        0xFC, 0x94, 0x20, //
        0xFD, 0x80, 0x80, //
        0xFF,
    ];

    #[test]
    fn atsc_payload() {
        let ud = parse_registered_user_data(ATSC_PAYLOAD).unwrap();
        assert_eq!(ud.country_code, 0xB5);
        assert_eq!(ud.country_code_extension, None);
        assert_eq!(ud.provider, Provider::Atsc);
        assert_eq!(ud.user_identifier, Some(ATSC_USER_IDENTIFIER));
        assert_eq!(ud.type_code, CC_DATA_TYPE_CODE);
        assert_eq!(ud.cc_block.entries.len(), 2);
        assert_eq!(ud.cc_block.units(CcType::NtscField1, true), vec![0x9420]);
    }

    #[test]
    fn directv_payload_has_no_user_identifier() {
        let ud = parse_registered_user_data(&[
            0xB5, 0x00, 0x2F, 0x03, 0x41, 0xFF, 0xFC, 0xC1, 0xC2,
        ])
        .unwrap();
        assert_eq!(ud.provider, Provider::DirecTv);
        assert_eq!(ud.user_identifier, None);
        assert_eq!(ud.cc_block.entries[0].data, 0xC1C2);
    }

    #[test]
    fn extended_country_code() {
        let ud = parse_registered_user_data(&[
            0xFF, 0x01, 0x00, 0x2F, 0x03, 0x41, 0xFF, 0xFC, 0x94, 0x2F,
        ])
        .unwrap();
        assert_eq!(ud.country_code_extension, Some(0x01));
        assert_eq!(ud.provider, Provider::DirecTv);
    }

    #[test]
    fn single_byte_is_too_short() {
        assert_eq!(
            parse_registered_user_data(&[0xB5]),
            Err(EnvelopeError::TooShort {
                available: 1,
                needed: MIN_PAYLOAD_LEN
            })
        );
    }

    #[test]
    fn truncated_atsc_identifier() {
        let err = parse_registered_user_data(&[0xB5, 0x00, 0x31, 0x47, 0x41]).unwrap_err();
        assert!(matches!(
            err,
            EnvelopeError::Truncated {
                field: "user identifier",
                ..
            }
        ));
    }

    #[test]
    fn missing_type_code_is_truncated() {
        let err = parse_registered_user_data(&[0xB5, 0x00, 0x2F, 0x03]).unwrap_err();
        assert!(matches!(
            err,
            EnvelopeError::Truncated {
                field: "user data type code",
                ..
            }
        ));
    }

    #[test]
    fn unknown_provider_is_unrecognized() {
        assert_eq!(
            parse_registered_user_data(&[0xB5, 0x12, 0x34, 0x03, 0x41, 0xFF]),
            Err(EnvelopeError::Unrecognized {
                provider: 0x1234,
                type_code: None
            })
        );
    }

    #[test]
    fn zero_country_and_provider_is_unrecognized() {
        assert!(matches!(
            parse_registered_user_data(&[0x00, 0x00, 0x00, 0x00, 0x03, 0x41]),
            Err(EnvelopeError::Unrecognized { provider: 0, .. })
        ));
    }

    #[test]
    fn non_caption_type_code_is_unrecognized() {
        assert_eq!(
            parse_registered_user_data(&[0xB5, 0x00, 0x2F, 0x06, 0x41, 0xFF]),
            Err(EnvelopeError::Unrecognized {
                provider: 47,
                type_code: Some(6)
            })
        );
    }

    #[test]
    fn caption_type_code_without_block_is_unrecognized() {
        assert_eq!(
            parse_registered_user_data(&[0xB5, 0x00, 0x2F, 0x03, 0x41]),
            Err(EnvelopeError::Unrecognized {
                provider: 47,
                type_code: Some(3)
            })
        );
    }

    #[test]
    fn block_errors_propagate() {
        assert_eq!(
            parse_registered_user_data(&[0xB5, 0x00, 0x2F, 0x03, 0x42, 0xFF, 0xFC, 0x94, 0x20]),
            Err(EnvelopeError::CountMismatch {
                declared: 2,
                parsed: 1
            })
        );
    }

    #[test]
    fn provider_codes_round_trip() {
        for code in [0u16, 47, 49, 0xFFFF] {
            assert_eq!(Provider::from_code(code).code(), code);
        }
    }
}
