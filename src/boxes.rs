use std::fmt;

use crate::parser::{ParseError, Result};

#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct FourCC(pub [u8; 4]);

impl FourCC {
    pub fn from_str(s: &str) -> Option<Self> {
        let b = s.as_bytes();
        if b.len() == 4 {
            Some(FourCC([b[0], b[1], b[2], b[3]]))
        } else { None }
    }
    pub fn as_str_lossy(&self) -> String {
        // 0xa9 is the copyright sign that prefixes iTunes item names
        self.0.iter().map(|&c| match c {
            32..=126 => c as char,
            0xa9 => '©',
            _ => '.',
        }).collect()
    }
    /// The code as a big-endian integer, used as a tag id by item-keyed directories.
    pub fn as_u32(&self) -> u32 { u32::from_be_bytes(self.0) }
}
impl fmt::Debug for FourCC { fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.as_str_lossy()) } }
impl fmt::Display for FourCC { fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.as_str_lossy()) } }

/// Effective size of a box after normalising the three header encodings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoxSize {
    /// Total size in bytes, header included.
    Fixed(u64),
    /// Declared size 0: the box runs to the end of the enclosing window.
    ToEnd,
}

#[derive(Debug, Clone)]
pub struct BoxHeader {
    pub size: BoxSize,
    pub typ: FourCC,
    pub header_size: u64,   // 8, or 16 for the 64-bit size form
    pub start: u64,         // offset of header start
}

impl BoxHeader {
    /// Size of a compact header.
    pub const HEADER_SIZE: u64 = 8;
    /// Size of a header carrying a 64-bit size.
    pub const LARGE_HEADER_SIZE: u64 = 16;

    /// Offset of the first payload byte.
    pub fn payload_start(&self) -> u64 {
        self.start + self.header_size
    }

    /// Absolute end offset, if the size is known.
    pub fn end(&self) -> Option<u64> {
        match self.size {
            BoxSize::Fixed(size) => Some(self.start.saturating_add(size)),
            BoxSize::ToEnd => None,
        }
    }

    /// Payload length, if the size is known. Call `validate` first.
    pub fn payload_len(&self) -> Option<u64> {
        match self.size {
            BoxSize::Fixed(size) => Some(size.saturating_sub(self.header_size)),
            BoxSize::ToEnd => None,
        }
    }

    pub fn extends_to_end(&self) -> bool {
        self.size == BoxSize::ToEnd
    }

    /// A fixed size may never be smaller than the header that declared it.
    pub fn validate(&self) -> Result<()> {
        match self.size {
            BoxSize::Fixed(size) if size < self.header_size => Err(ParseError::InvalidSize {
                size,
                header_size: self.header_size,
            }),
            _ => Ok(()),
        }
    }
}
