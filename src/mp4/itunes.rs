//! iTunes-style item list (`meta` → `hdlr(mdir)` → `ilst`).

use crate::{
    boxes::{BoxHeader, FourCC},
    handler::{BoxHandler, Next},
    known_boxes::KnownBox,
    metadata::{Directory, DirectoryId, Metadata, TagValue},
    parser::{ParseError, Result},
    reader::{ByteReader, TextEncoding},
    tags::itunes,
};

/// Well-known `data` box type codes.
const TYPE_IMPLICIT: u32 = 0;
const TYPE_UTF8: u32 = 1;
const TYPE_UTF16: u32 = 2;
const TYPE_JPEG: u32 = 13;
const TYPE_PNG: u32 = 14;
const TYPE_SIGNED_INT: u32 = 21;
const TYPE_UNSIGNED_INT: u32 = 22;
const TYPE_BMP: u32 = 27;

#[derive(Debug, Clone)]
pub struct ItunesHandler {
    directory: DirectoryId,
    in_list: bool,
    item: Option<FourCC>,
}

impl ItunesHandler {
    pub fn new(metadata: &mut Metadata) -> Self {
        let directory = metadata.add_directory(Directory::with_tag_names("iTunes", itunes::name));
        Self { directory, in_list: false, item: None }
    }
}

fn be_int(bytes: &[u8]) -> Result<TagValue> {
    Ok(match *bytes {
        [a] => TagValue::Int(a as i8 as i32),
        [a, b] => TagValue::Int(i16::from_be_bytes([a, b]) as i32),
        [a, b, c, d] => TagValue::Int(i32::from_be_bytes([a, b, c, d])),
        [a, b, c, d, e, f, g, h] => TagValue::Long(i64::from_be_bytes([a, b, c, d, e, f, g, h])),
        _ => return Err(ParseError::Malformed(format!("{}-byte integer", bytes.len()))),
    })
}

fn be_uint(bytes: &[u8]) -> Result<TagValue> {
    Ok(match *bytes {
        [a] => TagValue::Int(a as i32),
        [a, b] => TagValue::Int(u16::from_be_bytes([a, b]) as i32),
        [a, b, c, d] => TagValue::Long(u32::from_be_bytes([a, b, c, d]) as i64),
        _ => return Err(ParseError::Malformed(format!("{}-byte unsigned integer", bytes.len()))),
    })
}

/// Decode the value of one `data` box belonging to `item`.
fn decode_data(item: FourCC, payload: &[u8]) -> Result<TagValue> {
    let mut r = ByteReader::from_slice(payload);
    // the top byte is a version, the rest the type code
    let data_type = r.read_u32()? & 0x00ff_ffff;
    let _locale = r.read_u32()?;
    let value = r.read_to_end()?;

    Ok(match data_type {
        TYPE_UTF8 => TagValue::String(TextEncoding::Utf8.decode(&value)),
        TYPE_UTF16 => TagValue::String(TextEncoding::Utf16Be.decode(&value)),
        TYPE_JPEG | TYPE_PNG | TYPE_BMP => TagValue::Bytes(value),
        TYPE_SIGNED_INT => be_int(&value)?,
        TYPE_UNSIGNED_INT => be_uint(&value)?,
        TYPE_IMPLICIT => match item.as_u32() {
            itunes::TRACK_NUMBER | itunes::DISK_NUMBER => {
                let mut r = ByteReader::from_slice(&value);
                r.skip(2)?;
                let number = r.read_u16()? as i32;
                let total = r.read_u16()? as i32;
                TagValue::IntArray(vec![number, total])
            }
            itunes::GENRE_ID => TagValue::Int(ByteReader::from_slice(&value).read_u16()? as i32),
            _ => TagValue::Bytes(value),
        },
        other => {
            return Err(ParseError::Unsupported(match other {
                3..=12 => "legacy data box type",
                _ => "unknown data box type",
            }));
        }
    })
}

impl BoxHandler for ItunesHandler {
    fn name(&self) -> &'static str {
        "itunes"
    }

    fn directory(&self) -> DirectoryId {
        self.directory
    }

    fn wants_container(&self, header: &BoxHeader) -> bool {
        match (self.in_list, self.item) {
            (false, _) => KnownBox::from(header.typ) == KnownBox::Ilst,
            // free-form items carry their own mean/name and are not decoded
            (true, None) => KnownBox::from(header.typ) != KnownBox::FreeForm,
            (true, Some(_)) => false,
        }
    }

    fn wants_leaf(&self, header: &BoxHeader) -> bool {
        self.item.is_some() && KnownBox::from(header.typ) == KnownBox::Data
    }

    fn enter_container(
        &mut self,
        header: &BoxHeader,
        _metadata: &mut Metadata,
    ) -> Result<Box<dyn BoxHandler>> {
        let mut child = self.clone();
        if self.in_list {
            child.item = Some(header.typ);
        } else {
            child.in_list = true;
        }
        Ok(Box::new(child))
    }

    fn decode_leaf(
        &mut self,
        _header: &BoxHeader,
        payload: &[u8],
        metadata: &mut Metadata,
    ) -> Result<Next> {
        if let Some(item) = self.item {
            let value = decode_data(item, payload)?;
            metadata.directory_mut(self.directory).set(item.as_u32(), value);
        }
        Ok(Next::Keep)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data(kind: u32, value: &[u8]) -> Vec<u8> {
        let mut v = kind.to_be_bytes().to_vec();
        v.extend_from_slice(&[0; 4]);
        v.extend_from_slice(value);
        v
    }

    #[test]
    fn text_and_integer_items() {
        let title = FourCC(*b"\xa9nam");
        assert_eq!(
            decode_data(title, &data(TYPE_UTF8, b"Song")).unwrap(),
            TagValue::String("Song".into())
        );
        let tempo = FourCC(*b"tmpo");
        assert_eq!(
            decode_data(tempo, &data(TYPE_SIGNED_INT, &[0x00, 0x78])).unwrap(),
            TagValue::Int(120)
        );
    }

    #[test]
    fn implicit_track_number() {
        let trkn = FourCC(*b"trkn");
        let value = [0, 0, 0, 3, 0, 12, 0, 0];
        assert_eq!(
            decode_data(trkn, &data(TYPE_IMPLICIT, &value)).unwrap(),
            TagValue::IntArray(vec![3, 12])
        );
    }

    #[test]
    fn odd_integer_width_is_malformed() {
        let tempo = FourCC(*b"tmpo");
        assert!(matches!(
            decode_data(tempo, &data(TYPE_SIGNED_INT, &[1, 2, 3])),
            Err(ParseError::Malformed(_))
        ));
    }
}
