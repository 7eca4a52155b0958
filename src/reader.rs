use crate::boxes::FourCC;
use crate::parser::{ParseError, Result};
use byteorder::{BigEndian, LittleEndian, ReadBytesExt};
use std::io::{Cursor, Read, Seek, SeekFrom};

/// Byte order applied to every multi-byte integer read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ByteOrder {
    /// Network / Motorola order, used by the whole ISO box family.
    #[default]
    BigEndian,
    LittleEndian,
}

/// Text encodings understood by [`ByteReader::read_string`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    Utf8,
    Latin1,
    Utf16Be,
    Utf16Le,
}

impl TextEncoding {
    /// Decode `bytes`, stopping at the first NUL code unit.
    pub fn decode(self, bytes: &[u8]) -> String {
        match self {
            TextEncoding::Utf8 => {
                let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
                String::from_utf8_lossy(&bytes[..end]).to_string()
            }
            TextEncoding::Latin1 => bytes
                .iter()
                .take_while(|&&b| b != 0)
                .map(|&b| b as char)
                .collect(),
            TextEncoding::Utf16Be | TextEncoding::Utf16Le => {
                let units = bytes.chunks_exact(2).map(|c| match self {
                    TextEncoding::Utf16Le => u16::from_le_bytes([c[0], c[1]]),
                    _ => u16::from_be_bytes([c[0], c[1]]),
                });
                char::decode_utf16(units.take_while(|&u| u != 0))
                    .map(|c| c.unwrap_or(char::REPLACEMENT_CHARACTER))
                    .collect()
            }
        }
    }
}

/// Reader over an in-memory payload.
pub type SliceReader<'a> = ByteReader<Cursor<&'a [u8]>>;

/// Bounds-checked primitive reader over a seekable byte source.
///
/// Every read checks the remaining length first and fails with
/// [`ParseError::InsufficientData`] without consuming anything, so callers never see a
/// truncated or zero-filled value.
pub struct ByteReader<R> {
    inner: R,
    pos: u64,
    len: u64,
    order: ByteOrder,
}

macro_rules! read_ordered {
    ($(#[$doc:meta])* $name:ident, $ty:ty, $read:ident, $n:expr) => {
        $(#[$doc])*
        pub fn $name(&mut self) -> Result<$ty> {
            self.ensure($n)?;
            let v = match self.order {
                ByteOrder::BigEndian => self.inner.$read::<BigEndian>()?,
                ByteOrder::LittleEndian => self.inner.$read::<LittleEndian>()?,
            };
            self.pos += $n;
            Ok(v)
        }
    };
}

impl<R: Read + Seek> ByteReader<R> {
    /// Wrap `inner`, starting at its current position.
    pub fn new(mut inner: R) -> Result<Self> {
        let pos = inner.stream_position()?;
        let len = inner.seek(SeekFrom::End(0))?;
        inner.seek(SeekFrom::Start(pos))?;
        Ok(Self { inner, pos, len, order: ByteOrder::default() })
    }

    pub fn with_byte_order(mut self, order: ByteOrder) -> Self {
        self.order = order;
        self
    }

    pub fn set_byte_order(&mut self, order: ByteOrder) {
        self.order = order;
    }

    pub fn byte_order(&self) -> ByteOrder {
        self.order
    }

    /// Absolute position of the cursor.
    pub fn position(&self) -> u64 {
        self.pos
    }

    /// Total length of the source.
    pub fn len(&self) -> u64 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn remaining(&self) -> u64 {
        self.len.saturating_sub(self.pos)
    }

    pub fn into_inner(self) -> R {
        self.inner
    }

    fn ensure(&self, needed: u64) -> Result<()> {
        let available = self.remaining();
        if needed > available {
            return Err(ParseError::InsufficientData { needed, available });
        }
        Ok(())
    }

    pub fn read_u8(&mut self) -> Result<u8> {
        self.ensure(1)?;
        let v = self.inner.read_u8()?;
        self.pos += 1;
        Ok(v)
    }

    pub fn read_i8(&mut self) -> Result<i8> {
        self.ensure(1)?;
        let v = self.inner.read_i8()?;
        self.pos += 1;
        Ok(v)
    }

    read_ordered!(read_u16, u16, read_u16, 2);
    read_ordered!(read_i16, i16, read_i16, 2);
    read_ordered!(
        /// 24-bit unsigned integer, e.g. FullBox flags.
        read_u24, u32, read_u24, 3
    );
    read_ordered!(read_u32, u32, read_u32, 4);
    read_ordered!(read_i32, i32, read_i32, 4);
    read_ordered!(read_u64, u64, read_u64, 8);
    read_ordered!(read_i64, i64, read_i64, 8);
    read_ordered!(read_f32, f32, read_f32, 4);
    read_ordered!(read_f64, f64, read_f64, 8);

    /// Big-endian read that ignores the byte-order flag (box headers).
    pub fn read_be_u32(&mut self) -> Result<u32> {
        self.ensure(4)?;
        let v = self.inner.read_u32::<BigEndian>()?;
        self.pos += 4;
        Ok(v)
    }

    pub fn read_be_u64(&mut self) -> Result<u64> {
        self.ensure(8)?;
        let v = self.inner.read_u64::<BigEndian>()?;
        self.pos += 8;
        Ok(v)
    }

    /// Signed 16.16 fixed-point value.
    pub fn read_fixed_16_16(&mut self) -> Result<f64> {
        Ok(self.read_i32()? as f64 / 65536.0)
    }

    /// Signed 8.8 fixed-point value.
    pub fn read_fixed_8_8(&mut self) -> Result<f64> {
        Ok(self.read_i16()? as f64 / 256.0)
    }

    pub fn read_exact_into(&mut self, buf: &mut [u8]) -> Result<()> {
        self.ensure(buf.len() as u64)?;
        self.inner.read_exact(buf)?;
        self.pos += buf.len() as u64;
        Ok(())
    }

    pub fn read_bytes(&mut self, n: usize) -> Result<Vec<u8>> {
        // checked before allocating so a hostile length cannot reserve memory
        self.ensure(n as u64)?;
        let mut v = vec![0u8; n];
        self.read_exact_into(&mut v)?;
        Ok(v)
    }

    /// Everything from the cursor to the end of the source.
    pub fn read_to_end(&mut self) -> Result<Vec<u8>> {
        let n = usize::try_from(self.remaining())
            .map_err(|_| ParseError::Unsupported("source too large to buffer"))?;
        self.read_bytes(n)
    }

    pub fn read_fourcc(&mut self) -> Result<FourCC> {
        let mut b = [0u8; 4];
        self.read_exact_into(&mut b)?;
        Ok(FourCC(b))
    }

    /// Fixed-length string; the text stops at the first NUL but all `len` bytes are consumed.
    pub fn read_string(&mut self, len: usize, encoding: TextEncoding) -> Result<String> {
        let bytes = self.read_bytes(len)?;
        Ok(encoding.decode(&bytes))
    }

    /// Counted string stored in a fixed `field_len` field (length byte included).
    pub fn read_pascal_string(&mut self, field_len: usize) -> Result<String> {
        let field = self.read_bytes(field_len)?;
        let Some((&count, rest)) = field.split_first() else {
            return Ok(String::new());
        };
        let count = (count as usize).min(rest.len());
        Ok(TextEncoding::Latin1.decode(&rest[..count]))
    }

    /// Advance without materialising the skipped bytes.
    pub fn skip(&mut self, n: u64) -> Result<()> {
        self.ensure(n)?;
        let target = self.pos + n;
        self.inner.seek(SeekFrom::Start(target))?;
        self.pos = target;
        Ok(())
    }

    /// Random-access jump to an absolute position within the source.
    pub fn seek_to(&mut self, pos: u64) -> Result<()> {
        if pos > self.len {
            return Err(ParseError::InsufficientData {
                needed: pos - self.pos.min(pos),
                available: self.remaining(),
            });
        }
        self.inner.seek(SeekFrom::Start(pos))?;
        self.pos = pos;
        Ok(())
    }
}

impl<'a> ByteReader<Cursor<&'a [u8]>> {
    /// Reader over an in-memory payload, starting at offset 0.
    pub fn from_slice(buf: &'a [u8]) -> Self {
        Self {
            inner: Cursor::new(buf),
            pos: 0,
            len: buf.len() as u64,
            order: ByteOrder::default(),
        }
    }
}
