//! Envelope parse errors.

/// Structural problems that cause a whole payload to be discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnvelopeError {
    /// Input buffer is shorter than the smallest parseable structure.
    TooShort { available: usize, needed: usize },
    /// A header field runs past the end of the buffer.
    Truncated {
        field: &'static str,
        available: usize,
        needed: usize,
    },
    /// Provider or user-data type code does not carry a caption block.
    Unrecognized { provider: u16, type_code: Option<u8> },
    /// The caption block holds fewer entries than its header declares.
    CountMismatch { declared: u8, parsed: u8 },
}

impl core::fmt::Display for EnvelopeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::TooShort { available, needed } => {
                write!(f, "buffer too short: {available} bytes, need {needed}")
            }
            Self::Truncated {
                field,
                available,
                needed,
            } => write!(
                f,
                "truncated {field}: {available} bytes left, need {needed}"
            ),
            Self::Unrecognized {
                provider,
                type_code: Some(code),
            } => write!(
                f,
                "unrecognized user data: provider {provider}, type code {code}"
            ),
            Self::Unrecognized {
                provider,
                type_code: None,
            } => write!(f, "unrecognized user data: provider {provider}"),
            Self::CountMismatch { declared, parsed } => write!(
                f,
                "cc count mismatch: header declares {declared}, found {parsed}"
            ),
        }
    }
}

impl std::error::Error for EnvelopeError {}
