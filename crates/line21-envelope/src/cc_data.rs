//! Caption data block (`cc_data`) parsing.
//!
//! ```text
//! +-------------------+---------+---------------------------+
//! | flags(3) count(5) | em (1)  | count x entry (3 bytes)   |
//! +-------------------+---------+---------------------------+
//!
//! entry: marker(5) valid(1) type(2) | payload (BE u16)
//! ```

use bitflags::bitflags;

use crate::error::EnvelopeError;

/// Header byte plus the em_data byte.
pub const BLOCK_HEADER_LEN: usize = 2;
/// Size of one caption entry.
pub const ENTRY_LEN: usize = 3;
/// Low 5 bits of the header byte carry the entry count.
pub const CC_COUNT_MASK: u8 = 0x1F;
/// Entry validity flag (0x04). Some decoders test bit 6 (0x40) instead,
/// but that is a marker bit every encoder sets.
pub const CC_VALID: u8 = 0x04;

bitflags! {
    /// Flags in the caption block header byte.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct CcBlockFlags: u8 {
        const PROCESS_EM_DATA = 0x80;
        const PROCESS_CC_DATA = 0x40;
        const ADDITIONAL_DATA = 0x20;
    }
}

/// What a caption entry's payload carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum CcType {
    /// Line-21 field 1 (CC1/CC2).
    #[default]
    NtscField1 = 0,
    /// Line-21 field 2 (CC3/CC4).
    NtscField2 = 1,
    DtvccData = 2,
    DtvccStart = 3,
}

impl CcType {
    /// Decode the low two bits of an entry's first byte.
    #[must_use]
    pub fn from_bits(bits: u8) -> Self {
        match bits & 0x03 {
            0 => Self::NtscField1,
            1 => Self::NtscField2,
            2 => Self::DtvccData,
            _ => Self::DtvccStart,
        }
    }

    /// Whether the payload is a line-21 (608) unit.
    #[must_use]
    pub fn is_ntsc(self) -> bool {
        matches!(self, Self::NtscField1 | Self::NtscField2)
    }
}

/// One three-byte caption entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CcData {
    /// Top five bits of the first byte (`one_bit` and `reserved`).
    pub marker_bits: u8,
    pub valid: bool,
    pub cc_type: CcType,
    /// Payload word, parity bits intact.
    pub data: u16,
}

impl CcData {
    #[must_use]
    pub fn from_bytes(bytes: [u8; ENTRY_LEN]) -> Self {
        Self {
            marker_bits: bytes[0] >> 3,
            valid: bytes[0] & CC_VALID == CC_VALID,
            cc_type: CcType::from_bits(bytes[0]),
            data: u16::from_be_bytes([bytes[1], bytes[2]]),
        }
    }
}

/// Parsed caption data block.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CcBlock {
    pub flags: CcBlockFlags,
    /// Entry count declared by the header.
    pub cc_count: u8,
    pub em_data: u8,
    pub entries: Vec<CcData>,
}

impl CcBlock {
    /// Payload words of entries of type `field`, optionally only valid ones.
    #[must_use]
    pub fn units(&self, field: CcType, require_valid: bool) -> Vec<u16> {
        self.entries
            .iter()
            .filter(|cc| cc.cc_type == field && (cc.valid || !require_valid))
            .map(|cc| cc.data)
            .collect()
    }
}

/// Parse a caption data block.
///
/// Bytes after the declared entries (marker bytes, padding) are ignored.
pub fn parse_cc_block(buf: &[u8]) -> Result<CcBlock, EnvelopeError> {
    if buf.len() <= BLOCK_HEADER_LEN {
        return Err(EnvelopeError::TooShort {
            available: buf.len(),
            needed: BLOCK_HEADER_LEN + 1,
        });
    }
    let header = buf[0];
    let cc_count = header & CC_COUNT_MASK;
    let entries: Vec<CcData> = buf[BLOCK_HEADER_LEN..]
        .chunks_exact(ENTRY_LEN)
        .take(usize::from(cc_count))
        .map(|chunk| CcData::from_bytes([chunk[0], chunk[1], chunk[2]]))
        .collect();

    let parsed = entries.len() as u8;
    if parsed != cc_count {
        return Err(EnvelopeError::CountMismatch {
            declared: cc_count,
            parsed,
        });
    }

    Ok(CcBlock {
        flags: CcBlockFlags::from_bits_truncate(header),
        cc_count,
        em_data: buf[1],
        entries,
    })
}
