//! Classification of parity-stripped 608 units.
//!
//! The 608 code space reuses bit patterns across categories, so the
//! predicates below are only meaningful when evaluated in the order
//! [`classify`] uses: each later check assumes every earlier one failed.

/// Category of a stripped unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CodeKind {
    /// Miscellaneous control command (mode changes, erase, CR, tabs).
    Control,
    /// Preamble address code: row, indent/style, underline.
    Preamble,
    /// Mid-row style change.
    MidRow,
    /// Special North American character (one glyph).
    SpecialChar,
    /// Extended Western European character (one glyph, implicit backspace).
    ExtendedChar,
    /// One or two basic characters.
    BasicText,
    /// Anything else (unassigned codes, padding).
    Unknown,
}

#[must_use]
pub fn is_control(unit: u16) -> bool {
    (unit & 0x7670) == 0x1420 || (unit & 0x7770) == 0x1720
}

#[must_use]
pub fn is_preamble(unit: u16) -> bool {
    (unit & 0x7040) == 0x1040
}

#[must_use]
pub fn is_mid_row(unit: u16) -> bool {
    (unit & 0x7770) == 0x1120
}

#[must_use]
pub fn is_special_char(unit: u16) -> bool {
    (unit & 0x7770) == 0x1130
}

#[must_use]
pub fn is_extended_char(unit: u16) -> bool {
    (unit & 0x7660) == 0x1220
}

#[must_use]
pub fn is_basic_text(unit: u16) -> bool {
    (unit & 0x6000) != 0
}

/// Classify a stripped unit using the standard precedence.
#[must_use]
pub fn classify(unit: u16) -> CodeKind {
    if is_control(unit) {
        CodeKind::Control
    } else if is_preamble(unit) {
        CodeKind::Preamble
    } else if is_mid_row(unit) {
        CodeKind::MidRow
    } else if is_special_char(unit) {
        CodeKind::SpecialChar
    } else if is_extended_char(unit) {
        CodeKind::ExtendedChar
    } else if is_basic_text(unit) {
        CodeKind::BasicText
    } else {
        CodeKind::Unknown
    }
}

/// Miscellaneous control commands.
///
/// Discriminants are the channel-1 field-1 codes after channel masking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum ControlCode {
    /// RCL: select pop-on, compose into the back buffer.
    ResumeCaptionLoading = 0x1420,
    /// BS
    Backspace = 0x1421,
    AlarmOff = 0x1422,
    AlarmOn = 0x1423,
    /// DER
    DeleteToEndOfRow = 0x1424,
    RollUp2 = 0x1425,
    RollUp3 = 0x1426,
    RollUp4 = 0x1427,
    /// RDC: paint-on, write straight to the display.
    ResumeDirectCaptioning = 0x1429,
    TextRestart = 0x142A,
    ResumeTextDisplay = 0x142B,
    /// EDM
    EraseDisplayedMemory = 0x142C,
    /// CR
    CarriageReturn = 0x142D,
    /// ENM
    EraseNonDisplayedMemory = 0x142E,
    /// EOC: swap front and back buffers.
    EndOfCaption = 0x142F,
    TabOffset1 = 0x1721,
    TabOffset2 = 0x1722,
    TabOffset3 = 0x1723,
}

impl ControlCode {
    /// Decode a stripped control unit, masking off the channel bits.
    ///
    /// Returns `None` for control-shaped units with no assigned command.
    #[must_use]
    pub fn from_unit(unit: u16) -> Option<Self> {
        let cmd = if unit & 0x0200 == 0 {
            unit & 0x167F
        } else {
            unit & 0x177F
        };
        Some(match cmd {
            0x1420 => Self::ResumeCaptionLoading,
            0x1421 => Self::Backspace,
            0x1422 => Self::AlarmOff,
            0x1423 => Self::AlarmOn,
            0x1424 => Self::DeleteToEndOfRow,
            0x1425 => Self::RollUp2,
            0x1426 => Self::RollUp3,
            0x1427 => Self::RollUp4,
            0x1429 => Self::ResumeDirectCaptioning,
            0x142A => Self::TextRestart,
            0x142B => Self::ResumeTextDisplay,
            0x142C => Self::EraseDisplayedMemory,
            0x142D => Self::CarriageReturn,
            0x142E => Self::EraseNonDisplayedMemory,
            0x142F => Self::EndOfCaption,
            0x1721 => Self::TabOffset1,
            0x1722 => Self::TabOffset2,
            0x1723 => Self::TabOffset3,
            _ => return None,
        })
    }

    /// The canonical (channel 1, field 1) stripped unit for this command.
    #[must_use]
    pub fn unit(self) -> u16 {
        self as u16
    }

    /// Roll-up depth selected by this command, if it is a roll-up command.
    #[must_use]
    pub fn roll_up_depth(self) -> Option<u8> {
        match self {
            Self::RollUp2 => Some(2),
            Self::RollUp3 => Some(3),
            Self::RollUp4 => Some(4),
            _ => None,
        }
    }

    /// Column advance for tab-offset commands.
    #[must_use]
    pub fn tab_offset(self) -> Option<u8> {
        match self {
            Self::TabOffset1 => Some(1),
            Self::TabOffset2 => Some(2),
            Self::TabOffset3 => Some(3),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_precedence() {
        assert_eq!(classify(0x142C), CodeKind::Control);
        assert_eq!(classify(0x1721), CodeKind::Control);
        assert_eq!(classify(0x1460), CodeKind::Preamble);
        assert_eq!(classify(0x1140), CodeKind::Preamble);
        assert_eq!(classify(0x1120), CodeKind::MidRow);
        assert_eq!(classify(0x112E), CodeKind::MidRow);
        assert_eq!(classify(0x1137), CodeKind::SpecialChar);
        assert_eq!(classify(0x1220), CodeKind::ExtendedChar);
        assert_eq!(classify(0x133F), CodeKind::ExtendedChar);
        assert_eq!(classify(0x4849), CodeKind::BasicText);
        assert_eq!(classify(0x0000), CodeKind::Unknown);
    }

    #[test]
    fn channel_two_variants_share_categories() {
        // Bit 0x0800 selects the second channel of a field.
        assert_eq!(classify(0x1C2C), CodeKind::Control);
        assert_eq!(classify(0x1937), CodeKind::SpecialChar);
        assert_eq!(classify(0x1A25), CodeKind::ExtendedChar);
        assert_eq!(classify(0x1920), CodeKind::MidRow);
    }

    #[test]
    fn unassigned_control_shapes_still_classify_as_control() {
        assert_eq!(classify(0x1428), CodeKind::Control);
        assert_eq!(ControlCode::from_unit(0x1428), None);
    }

    #[test]
    fn control_from_unit_masks_channel_bits() {
        assert_eq!(
            ControlCode::from_unit(0x142F),
            Some(ControlCode::EndOfCaption)
        );
        // Channel 2 (0x1C..) and field 2 (0x15..) forms decode to the same command.
        assert_eq!(
            ControlCode::from_unit(0x1C2F),
            Some(ControlCode::EndOfCaption)
        );
        assert_eq!(
            ControlCode::from_unit(0x152F),
            Some(ControlCode::EndOfCaption)
        );
        assert_eq!(ControlCode::from_unit(0x1F22), Some(ControlCode::TabOffset2));
        assert_eq!(ControlCode::from_unit(0x1428), None);
        assert_eq!(ControlCode::from_unit(0x1720), None);
    }

    #[test]
    fn control_helpers() {
        assert_eq!(ControlCode::RollUp3.roll_up_depth(), Some(3));
        assert_eq!(ControlCode::EndOfCaption.roll_up_depth(), None);
        assert_eq!(ControlCode::TabOffset3.tab_offset(), Some(3));
        assert_eq!(ControlCode::Backspace.tab_offset(), None);
        assert_eq!(ControlCode::CarriageReturn.unit(), 0x142D);
    }
}
