//! Odd-parity handling for line-21 bytes.
//!
//! Each transmitted byte carries 7 data bits plus a parity bit in bit 7,
//! chosen so the whole byte has an odd number of set bits. A unit whose
//! bytes fail the check is broadcast noise and is dropped by the caller.

/// Lookup table: `PARITY_TABLE[v]` is `v` with bit 7 set iff `v` has an even
/// number of set bits, making the total population count odd.
pub static PARITY_TABLE: [u8; 128] = build_parity_table();

const fn build_parity_table() -> [u8; 128] {
    let mut table = [0u8; 128];
    let mut i = 0;
    while i < 128 {
        let v = i as u8;
        table[i] = if v.count_ones() % 2 == 0 { v | 0x80 } else { v };
        i += 1;
    }
    table
}

/// Apply odd parity to the low 7 bits of `byte`.
#[must_use]
pub fn parity_byte(byte: u8) -> u8 {
    PARITY_TABLE[usize::from(byte & 0x7F)]
}

/// Apply odd parity to both bytes of a unit.
#[must_use]
pub fn parity_word(unit: u16) -> u16 {
    let [hi, lo] = unit.to_be_bytes();
    u16::from_be_bytes([parity_byte(hi), parity_byte(lo)])
}

/// Validate both parity bits of `unit` and strip them.
///
/// Returns `None` when either byte's stored parity bit is wrong.
#[must_use]
pub fn validate_and_strip(unit: u16) -> Option<u16> {
    if parity_word(unit) == unit {
        Some(unit & 0x7F7F)
    } else {
        None
    }
}
