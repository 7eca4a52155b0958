//! MP4 front-end, plus the movie-level decoders and track handler factory that the QuickTime
//! and 3GP front-ends share.

pub mod itunes;
pub mod media;

use crate::{
    api::ContainerFormat,
    boxes::{BoxHeader, FourCC},
    handler::{BoxHandler, Next},
    known_boxes::KnownBox,
    metadata::{Directory, DirectoryId, Metadata},
    parser::Result,
    reader::{ByteReader, SliceReader, TextEncoding},
    tags::movie,
    util::{iso639_language, mac_time_to_unix, matrix_rotation},
};
use itunes::ItunesHandler;
use media::{HintTrack, MediaHandler, SoundTrack, TimecodeTrack, VideoTrack};

/// Values read earlier in the walk that later handlers need.
///
/// Each child handler gets its own copy, so values never leak from one track to the next.
#[derive(Debug, Clone, Default)]
pub struct TrackContext {
    pub movie_timescale: Option<u32>,
    // tkhd
    pub track_id: Option<u32>,
    pub track_width: Option<f64>,
    pub track_height: Option<f64>,
    pub track_volume: Option<f64>,
    pub rotation: Option<f64>,
    // mdhd
    pub creation_time: Option<i64>,
    pub modification_time: Option<i64>,
    pub timescale: Option<u32>,
    pub duration: Option<u64>,
    pub language: Option<String>,
    pub language_code: Option<u16>,
}

/// Fields of a handler reference (`hdlr`) box.
#[derive(Debug, Clone)]
pub struct HandlerReference {
    /// `mhlr`/`dhlr` in QuickTime, zero in MP4.
    pub component_type: FourCC,
    pub handler_type: FourCC,
    pub name: String,
}

pub(crate) fn read_version_and_flags(r: &mut SliceReader<'_>) -> Result<(u8, u32)> {
    Ok((r.read_u8()?, r.read_u24()?))
}

/// Creation, modification, timescale and duration, in version 0 or 1 layout.
fn read_times(r: &mut SliceReader<'_>, version: u8) -> Result<(u64, u64, u32, Option<u64>)> {
    if version == 1 {
        let created = r.read_u64()?;
        let modified = r.read_u64()?;
        let timescale = r.read_u32()?;
        let duration = r.read_u64()?;
        Ok((created, modified, timescale, (duration != u64::MAX).then_some(duration)))
    } else {
        let created = r.read_u32()? as u64;
        let modified = r.read_u32()? as u64;
        let timescale = r.read_u32()?;
        let duration = r.read_u32()?;
        Ok((created, modified, timescale, (duration != u32::MAX).then_some(duration as u64)))
    }
}

pub(crate) fn decode_file_type(payload: &[u8], dir: &mut Directory) -> Result<()> {
    let mut r = ByteReader::from_slice(payload);
    let major = r.read_fourcc()?;
    let minor = r.read_u32()?;

    let mut brands = Vec::new();
    while r.remaining() >= 4 {
        brands.push(r.read_fourcc()?.to_string());
    }

    dir.set(movie::MAJOR_BRAND, major.to_string());
    dir.set(movie::MINOR_VERSION, minor);
    dir.set(movie::COMPATIBLE_BRANDS, brands);
    Ok(())
}

pub(crate) fn decode_movie_header(
    payload: &[u8],
    format: ContainerFormat,
    dir: &mut Directory,
    ctx: &mut TrackContext,
) -> Result<()> {
    let mut r = ByteReader::from_slice(payload);
    let (version, _) = read_version_and_flags(&mut r)?;
    let (created, modified, timescale, duration) = read_times(&mut r, version)?;

    dir.set(movie::CREATION_TIME, mac_time_to_unix(created));
    dir.set(movie::MODIFICATION_TIME, mac_time_to_unix(modified));
    dir.set(movie::TIMESCALE, timescale);
    if let Some(duration) = duration {
        dir.set(movie::DURATION, duration as i64);
        if timescale > 0 {
            dir.set(movie::DURATION_SECONDS, duration as f64 / timescale as f64);
        }
    }
    ctx.movie_timescale = Some(timescale);

    dir.set(movie::PREFERRED_RATE, r.read_fixed_16_16()?);
    dir.set(movie::PREFERRED_VOLUME, r.read_fixed_8_8()?);
    // reserved + matrix
    r.skip(10 + 36)?;

    if format == ContainerFormat::QuickTime {
        dir.set(movie::PREVIEW_TIME, r.read_u32()?);
        dir.set(movie::PREVIEW_DURATION, r.read_u32()?);
        dir.set(movie::POSTER_TIME, r.read_u32()?);
        dir.set(movie::SELECTION_TIME, r.read_u32()?);
        dir.set(movie::SELECTION_DURATION, r.read_u32()?);
        dir.set(movie::CURRENT_TIME, r.read_u32()?);
    } else {
        // pre_defined
        r.skip(24)?;
    }
    dir.set(movie::NEXT_TRACK_ID, r.read_u32()?);
    Ok(())
}

pub(crate) fn decode_track_header(payload: &[u8], ctx: &mut TrackContext) -> Result<()> {
    let mut r = ByteReader::from_slice(payload);
    let (version, _) = read_version_and_flags(&mut r)?;
    if version == 1 {
        r.skip(16)?;
    } else {
        r.skip(8)?;
    }
    let track_id = r.read_u32()?;
    // reserved, duration, reserved[2], layer, alternate group
    r.skip(4)?;
    r.skip(if version == 1 { 8 } else { 4 })?;
    r.skip(8 + 2 + 2)?;
    let volume = r.read_fixed_8_8()?;
    r.skip(2)?;

    let mut matrix = [0f64; 9];
    for m in matrix.iter_mut() {
        *m = r.read_fixed_16_16()?;
    }
    let width = r.read_fixed_16_16()?;
    let height = r.read_fixed_16_16()?;

    ctx.track_id = Some(track_id);
    ctx.track_volume = Some(volume);
    ctx.rotation = Some(matrix_rotation(matrix[0], matrix[1]));
    ctx.track_width = Some(width);
    ctx.track_height = Some(height);
    Ok(())
}

pub(crate) fn decode_media_header(payload: &[u8], ctx: &mut TrackContext) -> Result<()> {
    let mut r = ByteReader::from_slice(payload);
    let (version, _) = read_version_and_flags(&mut r)?;
    let (created, modified, timescale, duration) = read_times(&mut r, version)?;
    let language = r.read_u16()?;

    ctx.creation_time = Some(mac_time_to_unix(created));
    ctx.modification_time = Some(mac_time_to_unix(modified));
    ctx.timescale = Some(timescale);
    ctx.duration = duration;
    ctx.language = iso639_language(language);
    ctx.language_code = if ctx.language.is_none() { Some(language) } else { None };
    Ok(())
}

pub(crate) fn decode_handler_reference(
    payload: &[u8],
    format: ContainerFormat,
) -> Result<HandlerReference> {
    let mut r = ByteReader::from_slice(payload);
    let _ = read_version_and_flags(&mut r)?;
    let component_type = r.read_fourcc()?;
    let handler_type = r.read_fourcc()?;
    // reserved (or manufacturer, flags and flags mask in QuickTime)
    r.skip(12)?;

    let rest = r.read_to_end()?;
    let name = match rest.split_first() {
        // QuickTime stores a counted string
        Some((&count, text)) if format == ContainerFormat::QuickTime && count as usize <= text.len() => {
            TextEncoding::Latin1.decode(&text[..count as usize])
        }
        _ => TextEncoding::Utf8.decode(&rest),
    };

    Ok(HandlerReference { component_type, handler_type, name })
}

/// Handler that takes over the rest of an `mdia` (or `meta`) once its `hdlr` is known.
///
/// Returns `None` for handler types without a dedicated handler; the caller keeps going with
/// the handler it has.
pub(crate) fn track_handler(
    format: ContainerFormat,
    hdlr: &HandlerReference,
    ctx: &TrackContext,
    metadata: &mut Metadata,
) -> Option<Box<dyn BoxHandler>> {
    let handler: Box<dyn BoxHandler> = match &hdlr.handler_type.0 {
        b"soun" => Box::new(MediaHandler::<SoundTrack>::new(format, ctx, &hdlr.name, metadata)),
        b"vide" => Box::new(MediaHandler::<VideoTrack>::new(format, ctx, &hdlr.name, metadata)),
        b"hint" => Box::new(MediaHandler::<HintTrack>::new(format, ctx, &hdlr.name, metadata)),
        b"tmcd" if format == ContainerFormat::QuickTime => {
            Box::new(MediaHandler::<TimecodeTrack>::new(format, ctx, &hdlr.name, metadata))
        }
        b"mdir" if format != ContainerFormat::QuickTime => Box::new(ItunesHandler::new(metadata)),
        _ => return None,
    };
    Some(handler)
}

/// Movie-level leaf decoding shared by the MP4, QuickTime and 3GP root handlers.
pub(crate) fn decode_movie_leaf(
    format: ContainerFormat,
    directory: DirectoryId,
    ctx: &mut TrackContext,
    header: &BoxHeader,
    payload: &[u8],
    metadata: &mut Metadata,
) -> Result<Next> {
    match KnownBox::from(header.typ) {
        KnownBox::Ftyp => decode_file_type(payload, metadata.directory_mut(directory))?,
        KnownBox::Mvhd => {
            decode_movie_header(payload, format, metadata.directory_mut(directory), ctx)?
        }
        KnownBox::Tkhd => decode_track_header(payload, ctx)?,
        KnownBox::Mdhd => decode_media_header(payload, ctx)?,
        KnownBox::Hdlr => {
            let hdlr = decode_handler_reference(payload, format)?;
            if let Some(next) = track_handler(format, &hdlr, ctx, metadata) {
                return Ok(Next::Replace(next));
            }
        }
        _ => {}
    }
    Ok(Next::Keep)
}

pub(crate) const COMPRESSED_MOVIE_ERROR: &str = "compressed movies are not supported";

/// Root handler for ISO base media files (`.mp4`, `.m4a`, `.m4v`, ...).
#[derive(Debug, Clone)]
pub struct Mp4BoxHandler {
    format: ContainerFormat,
    directory: DirectoryId,
    ctx: TrackContext,
}

impl Mp4BoxHandler {
    /// Register an `"MP4"` directory and return a handler writing to it.
    pub fn new(metadata: &mut Metadata) -> Self {
        let directory = metadata.add_directory(Directory::with_tag_names(
            ContainerFormat::Mp4.label(),
            movie::name,
        ));
        Self::in_directory(ContainerFormat::Mp4, directory)
    }

    /// Handler writing movie-level tags into an existing directory.
    pub(crate) fn in_directory(format: ContainerFormat, directory: DirectoryId) -> Self {
        Self { format, directory, ctx: TrackContext::default() }
    }

    pub(crate) fn accepts_container(typ: FourCC) -> bool {
        matches!(
            KnownBox::from(typ),
            KnownBox::Moov
                | KnownBox::Trak
                | KnownBox::Mdia
                | KnownBox::Udta
                | KnownBox::Meta
                | KnownBox::Cmov
        )
    }

    pub(crate) fn accepts_leaf(typ: FourCC) -> bool {
        matches!(
            KnownBox::from(typ),
            KnownBox::Ftyp | KnownBox::Mvhd | KnownBox::Tkhd | KnownBox::Mdhd | KnownBox::Hdlr
        )
    }

    /// `meta` is a FullBox in the ISO family.
    pub(crate) fn preamble(typ: FourCC) -> u64 {
        if KnownBox::from(typ) == KnownBox::Meta { 4 } else { 0 }
    }

    pub(crate) fn decode(
        &mut self,
        header: &BoxHeader,
        payload: &[u8],
        metadata: &mut Metadata,
    ) -> Result<Next> {
        decode_movie_leaf(self.format, self.directory, &mut self.ctx, header, payload, metadata)
    }
}

impl BoxHandler for Mp4BoxHandler {
    fn name(&self) -> &'static str {
        "mp4"
    }

    fn directory(&self) -> DirectoryId {
        self.directory
    }

    fn wants_container(&self, header: &BoxHeader) -> bool {
        Self::accepts_container(header.typ)
    }

    fn wants_leaf(&self, header: &BoxHeader) -> bool {
        Self::accepts_leaf(header.typ)
    }

    fn container_preamble(&self, header: &BoxHeader) -> u64 {
        Self::preamble(header.typ)
    }

    fn enter_container(
        &mut self,
        header: &BoxHeader,
        metadata: &mut Metadata,
    ) -> Result<Box<dyn BoxHandler>> {
        if KnownBox::from(header.typ) == KnownBox::Cmov {
            // children (dcom, cmvd) are skipped by the copy below
            metadata.add_error(self.directory, COMPRESSED_MOVIE_ERROR);
        }
        Ok(Box::new(self.clone()))
    }

    fn decode_leaf(
        &mut self,
        header: &BoxHeader,
        payload: &[u8],
        metadata: &mut Metadata,
    ) -> Result<Next> {
        self.decode(header, payload, metadata)
    }
}
