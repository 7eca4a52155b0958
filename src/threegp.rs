//! 3GPP/3GPP2 front-end: MP4 plus the asset boxes of `udta`.

use crate::{
    api::ContainerFormat,
    boxes::{BoxHeader, FourCC},
    handler::{BoxHandler, Next},
    known_boxes::KnownBox,
    metadata::{Directory, DirectoryId, Metadata},
    mp4::{COMPRESSED_MOVIE_ERROR, Mp4BoxHandler, read_version_and_flags},
    parser::Result,
    reader::{ByteReader, SliceReader, TextEncoding},
    tags::asset,
};

fn is_asset(typ: FourCC) -> bool {
    matches!(
        KnownBox::from(typ),
        KnownBox::Titl
            | KnownBox::Dscp
            | KnownBox::Cprt
            | KnownBox::Perf
            | KnownBox::Auth
            | KnownBox::Gnre
            | KnownBox::Albm
            | KnownBox::Yrrc
            | KnownBox::Rtng
            | KnownBox::Clsf
            | KnownBox::Kywd
            | KnownBox::Loci
    )
}

/// Text with an optional UTF-16 byte order mark; UTF-8 otherwise.
fn decode_asset_text(bytes: &[u8]) -> String {
    match bytes {
        [0xfe, 0xff, rest @ ..] => TextEncoding::Utf16Be.decode(rest),
        [0xff, 0xfe, rest @ ..] => TextEncoding::Utf16Le.decode(rest),
        _ => TextEncoding::Utf8.decode(bytes),
    }
}

/// NUL-terminated asset string; consumes the terminator.
fn read_asset_string(r: &mut SliceReader<'_>) -> Result<String> {
    let start = r.position();
    let bom = if r.remaining() >= 2 { Some(r.read_u16()?) } else { None };
    let (encoding, unit) = match bom {
        Some(0xfeff) => (TextEncoding::Utf16Be, 2),
        Some(0xfffe) => (TextEncoding::Utf16Le, 2),
        _ => {
            r.seek_to(start)?;
            (TextEncoding::Utf8, 1)
        }
    };

    let mut bytes = Vec::new();
    while r.remaining() >= unit as u64 {
        let chunk = r.read_bytes(unit)?;
        if chunk.iter().all(|&b| b == 0) {
            break;
        }
        bytes.extend_from_slice(&chunk);
    }
    Ok(encoding.decode(&bytes))
}

fn decode_asset(typ: FourCC, payload: &[u8], dir: &mut Directory) -> Result<()> {
    let mut r = ByteReader::from_slice(payload);
    read_version_and_flags(&mut r)?;
    let tag = typ.as_u32();

    match KnownBox::from(typ) {
        KnownBox::Yrrc => dir.set(tag, r.read_u16()?),
        KnownBox::Rtng => {
            let entity = r.read_fourcc()?;
            let criteria = r.read_fourcc()?;
            r.skip(2)?;
            let text = read_asset_string(&mut r)?;
            dir.set(tag, format!("{entity} {criteria} {text}").trim_end().to_string());
        }
        KnownBox::Clsf => {
            let entity = r.read_fourcc()?;
            let table = r.read_u16()?;
            r.skip(2)?;
            let text = read_asset_string(&mut r)?;
            dir.set(tag, format!("{entity} {table} {text}").trim_end().to_string());
        }
        KnownBox::Kywd => {
            r.skip(2)?;
            let count = r.read_u8()?;
            let mut keywords = Vec::with_capacity(count as usize);
            for _ in 0..count {
                let len = r.read_u8()? as usize;
                keywords.push(decode_asset_text(&r.read_bytes(len)?));
            }
            dir.set(tag, keywords);
        }
        KnownBox::Loci => {
            r.skip(2)?;
            let name = read_asset_string(&mut r)?;
            let _role = r.read_u8()?;
            let longitude = r.read_fixed_16_16()?;
            let latitude = r.read_fixed_16_16()?;
            let altitude = r.read_fixed_16_16()?;
            dir.set(tag, name);
            dir.set(asset::LOCATION_COORDINATES, vec![longitude, latitude, altitude]);
        }
        KnownBox::Albm => {
            r.skip(2)?;
            let title = read_asset_string(&mut r)?;
            dir.set(tag, title);
            if r.remaining() >= 1 {
                dir.set(asset::ALBUM_TRACK_NUMBER, r.read_u8()?);
            }
        }
        // titl, dscp, cprt, perf, auth, gnre: language then text
        _ => {
            r.skip(2)?;
            dir.set(tag, read_asset_string(&mut r)?);
        }
    }
    Ok(())
}

/// Root handler for 3GP files.
#[derive(Debug, Clone)]
pub struct ThreeGpBoxHandler {
    inner: Mp4BoxHandler,
    in_user_data: bool,
}

impl ThreeGpBoxHandler {
    pub fn new(metadata: &mut Metadata) -> Self {
        let directory = metadata.add_directory(Directory::with_tag_names(
            ContainerFormat::ThreeGp.label(),
            asset::name,
        ));
        Self {
            inner: Mp4BoxHandler::in_directory(ContainerFormat::ThreeGp, directory),
            in_user_data: false,
        }
    }
}

impl BoxHandler for ThreeGpBoxHandler {
    fn name(&self) -> &'static str {
        "3gp"
    }

    fn directory(&self) -> DirectoryId {
        self.inner.directory()
    }

    fn wants_container(&self, header: &BoxHeader) -> bool {
        Mp4BoxHandler::accepts_container(header.typ)
    }

    fn wants_leaf(&self, header: &BoxHeader) -> bool {
        Mp4BoxHandler::accepts_leaf(header.typ) || (self.in_user_data && is_asset(header.typ))
    }

    fn container_preamble(&self, header: &BoxHeader) -> u64 {
        Mp4BoxHandler::preamble(header.typ)
    }

    fn enter_container(
        &mut self,
        header: &BoxHeader,
        metadata: &mut Metadata,
    ) -> Result<Box<dyn BoxHandler>> {
        if KnownBox::from(header.typ) == KnownBox::Cmov {
            metadata.add_error(self.directory(), COMPRESSED_MOVIE_ERROR);
        }
        let mut child = self.clone();
        child.in_user_data = KnownBox::from(header.typ) == KnownBox::Udta;
        Ok(Box::new(child))
    }

    fn decode_leaf(
        &mut self,
        header: &BoxHeader,
        payload: &[u8],
        metadata: &mut Metadata,
    ) -> Result<Next> {
        if self.in_user_data && is_asset(header.typ) {
            decode_asset(header.typ, payload, metadata.directory_mut(self.directory()))?;
            return Ok(Next::Keep);
        }
        self.inner.decode(header, payload, metadata)
    }
}
