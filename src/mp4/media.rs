//! Track media handlers, selected by the `hdlr` box of an `mdia`.

use super::{TrackContext, read_version_and_flags};
use crate::{
    api::ContainerFormat,
    boxes::{BoxHeader, FourCC},
    handler::{BoxHandler, Next},
    known_boxes::KnownBox,
    metadata::{Directory, DirectoryId, Metadata, TagNames},
    parser::{ParseError, Result},
    reader::{ByteReader, SliceReader},
    tags::{hint, media, sound, timecode, video},
};
use std::marker::PhantomData;

/// Per-kind behaviour of a [`MediaHandler`].
pub trait TrackKind: 'static {
    /// Handler name, used in logs.
    const NAME: &'static str;
    /// Tag receiving the sample entry's four-character format.
    const FORMAT: u32;
    /// The kind's media information header (`smhd`, `vmhd`, ...).
    const MEDIA_INFORMATION: FourCC;
    /// Extra containers between `minf` and the media information header.
    const MEDIA_CONTAINERS: &'static [FourCC] = &[];
    /// Whether `stts` carries anything for this kind.
    const USES_TIME_TO_SAMPLE: bool = false;

    fn directory_name(format: ContainerFormat) -> &'static str;

    fn tag_names() -> TagNames;

    /// Kind-specific values known when the handler is created.
    fn on_create(_dir: &mut Directory, _ctx: &TrackContext) {}

    fn decode_media_information(payload: &[u8], dir: &mut Directory) -> Result<()>;

    /// Decode the kind-specific part of the first sample entry; the reader sits just after the
    /// data reference index.
    fn decode_sample_entry(r: &mut SliceReader<'_>, dir: &mut Directory) -> Result<()>;

    fn decode_time_to_sample(
        _payload: &[u8],
        _dir: &mut Directory,
        _ctx: &TrackContext,
    ) -> Result<()> {
        Ok(())
    }
}

pub struct SoundTrack;

impl TrackKind for SoundTrack {
    const NAME: &'static str = "sound";
    const FORMAT: u32 = sound::FORMAT;
    const MEDIA_INFORMATION: FourCC = FourCC(*b"smhd");

    fn directory_name(format: ContainerFormat) -> &'static str {
        match format {
            ContainerFormat::Mp4 => "MP4 Sound",
            ContainerFormat::QuickTime => "QuickTime Sound",
            ContainerFormat::ThreeGp => "3GP Sound",
        }
    }

    fn tag_names() -> TagNames {
        sound::name
    }

    fn on_create(dir: &mut Directory, ctx: &TrackContext) {
        if let Some(volume) = ctx.track_volume {
            dir.set(sound::TRACK_VOLUME, volume);
        }
    }

    fn decode_media_information(payload: &[u8], dir: &mut Directory) -> Result<()> {
        let mut r = ByteReader::from_slice(payload);
        read_version_and_flags(&mut r)?;
        dir.set(sound::BALANCE, r.read_fixed_8_8()?);
        Ok(())
    }

    fn decode_sample_entry(r: &mut SliceReader<'_>, dir: &mut Directory) -> Result<()> {
        // version, revision level, vendor
        r.skip(2 + 2 + 4)?;
        dir.set(sound::NUMBER_OF_CHANNELS, r.read_u16()?);
        dir.set(sound::SAMPLE_SIZE, r.read_u16()?);
        // compression id, packet size
        r.skip(2 + 2)?;
        dir.set(sound::SAMPLE_RATE, r.read_u32()? as f64 / 65536.0);
        Ok(())
    }
}

pub struct VideoTrack;

impl TrackKind for VideoTrack {
    const NAME: &'static str = "video";
    const FORMAT: u32 = video::FORMAT;
    const MEDIA_INFORMATION: FourCC = FourCC(*b"vmhd");
    const USES_TIME_TO_SAMPLE: bool = true;

    fn directory_name(format: ContainerFormat) -> &'static str {
        match format {
            ContainerFormat::Mp4 => "MP4 Video",
            ContainerFormat::QuickTime => "QuickTime Video",
            ContainerFormat::ThreeGp => "3GP Video",
        }
    }

    fn tag_names() -> TagNames {
        video::name
    }

    fn on_create(dir: &mut Directory, ctx: &TrackContext) {
        if let Some(width) = ctx.track_width {
            dir.set(video::TRACK_WIDTH, width);
        }
        if let Some(height) = ctx.track_height {
            dir.set(video::TRACK_HEIGHT, height);
        }
        if let Some(rotation) = ctx.rotation {
            dir.set(video::ROTATION, rotation);
        }
    }

    fn decode_media_information(payload: &[u8], dir: &mut Directory) -> Result<()> {
        let mut r = ByteReader::from_slice(payload);
        read_version_and_flags(&mut r)?;
        dir.set(video::GRAPHICS_MODE, r.read_u16()?);
        let opcolor = vec![r.read_u16()? as i32, r.read_u16()? as i32, r.read_u16()? as i32];
        dir.set(video::OPCOLOR, opcolor);
        Ok(())
    }

    fn decode_sample_entry(r: &mut SliceReader<'_>, dir: &mut Directory) -> Result<()> {
        // version, revision level, vendor, temporal and spatial quality
        r.skip(2 + 2 + 4 + 4 + 4)?;
        dir.set(video::WIDTH, r.read_u16()?);
        dir.set(video::HEIGHT, r.read_u16()?);
        dir.set(video::HORIZONTAL_RESOLUTION, r.read_fixed_16_16()?);
        dir.set(video::VERTICAL_RESOLUTION, r.read_fixed_16_16()?);
        // data size
        r.skip(4)?;
        dir.set(video::FRAMES_PER_SAMPLE, r.read_u16()?);
        let compressor = r.read_pascal_string(32)?;
        if !compressor.is_empty() {
            dir.set(video::COMPRESSOR_NAME, compressor);
        }
        dir.set(video::DEPTH, r.read_u16()?);
        Ok(())
    }

    fn decode_time_to_sample(payload: &[u8], dir: &mut Directory, ctx: &TrackContext) -> Result<()> {
        let mut r = ByteReader::from_slice(payload);
        read_version_and_flags(&mut r)?;
        if r.read_u32()? == 0 {
            return Ok(());
        }
        let _sample_count = r.read_u32()?;
        let delta = r.read_u32()?;
        if let (Some(timescale), true) = (ctx.timescale, delta > 0) {
            dir.set(video::FRAME_RATE, timescale as f64 / delta as f64);
        }
        Ok(())
    }
}

pub struct HintTrack;

impl TrackKind for HintTrack {
    const NAME: &'static str = "hint";
    const FORMAT: u32 = hint::FORMAT;
    const MEDIA_INFORMATION: FourCC = FourCC(*b"hmhd");

    fn directory_name(format: ContainerFormat) -> &'static str {
        match format {
            ContainerFormat::Mp4 => "MP4 Hint",
            ContainerFormat::QuickTime => "QuickTime Hint",
            ContainerFormat::ThreeGp => "3GP Hint",
        }
    }

    fn tag_names() -> TagNames {
        hint::name
    }

    fn decode_media_information(payload: &[u8], dir: &mut Directory) -> Result<()> {
        let mut r = ByteReader::from_slice(payload);
        read_version_and_flags(&mut r)?;
        dir.set(hint::MAX_PDU_SIZE, r.read_u16()?);
        dir.set(hint::AVERAGE_PDU_SIZE, r.read_u16()?);
        dir.set(hint::MAX_BITRATE, r.read_u32()?);
        dir.set(hint::AVERAGE_BITRATE, r.read_u32()?);
        Ok(())
    }

    fn decode_sample_entry(_r: &mut SliceReader<'_>, _dir: &mut Directory) -> Result<()> {
        Ok(())
    }
}

/// QuickTime timecode track (`tmcd` handler type).
pub struct TimecodeTrack;

impl TrackKind for TimecodeTrack {
    const NAME: &'static str = "timecode";
    const FORMAT: u32 = timecode::FORMAT;
    const MEDIA_INFORMATION: FourCC = FourCC(*b"tcmi");
    const MEDIA_CONTAINERS: &'static [FourCC] = &[FourCC(*b"gmhd"), FourCC(*b"tmcd")];

    fn directory_name(format: ContainerFormat) -> &'static str {
        match format {
            ContainerFormat::Mp4 => "MP4 Timecode",
            ContainerFormat::QuickTime => "QuickTime Timecode",
            ContainerFormat::ThreeGp => "3GP Timecode",
        }
    }

    fn tag_names() -> TagNames {
        timecode::name
    }

    fn decode_media_information(payload: &[u8], dir: &mut Directory) -> Result<()> {
        let mut r = ByteReader::from_slice(payload);
        read_version_and_flags(&mut r)?;
        dir.set(timecode::TEXT_FONT, r.read_u16()?);
        dir.set(timecode::TEXT_FACE, r.read_u16()?);
        dir.set(timecode::TEXT_SIZE, r.read_u16()?);
        r.skip(2)?;
        let mut rgb = || -> Result<Vec<i32>> {
            Ok(vec![r.read_u16()? as i32, r.read_u16()? as i32, r.read_u16()? as i32])
        };
        let text_color = rgb()?;
        let background_color = rgb()?;
        dir.set(timecode::TEXT_COLOR, text_color);
        dir.set(timecode::BACKGROUND_COLOR, background_color);

        let field_len = r.remaining() as usize;
        let font_name = r.read_pascal_string(field_len)?;
        if !font_name.is_empty() {
            dir.set(timecode::FONT_NAME, font_name);
        }
        Ok(())
    }

    fn decode_sample_entry(r: &mut SliceReader<'_>, dir: &mut Directory) -> Result<()> {
        r.skip(4)?;
        let flags = r.read_u32()?;
        dir.set(timecode::FLAGS, flags);
        dir.set(timecode::DROP_FRAME, (flags & 1) as i32);
        dir.set(timecode::TIMECODE_TIMESCALE, r.read_u32()?);
        dir.set(timecode::FRAME_DURATION, r.read_u32()?);
        dir.set(timecode::NUMBER_OF_FRAMES, r.read_u8()?);
        Ok(())
    }
}

/// Handler for the rest of an `mdia` whose `hdlr` named a known media type.
pub struct MediaHandler<K: TrackKind> {
    directory: DirectoryId,
    ctx: TrackContext,
    kind: PhantomData<fn() -> K>,
}

impl<K: TrackKind> Clone for MediaHandler<K> {
    fn clone(&self) -> Self {
        Self { directory: self.directory, ctx: self.ctx.clone(), kind: PhantomData }
    }
}

impl<K: TrackKind> MediaHandler<K> {
    /// Register the track's directory and fill in what the track and media headers said.
    pub fn new(
        format: ContainerFormat,
        ctx: &TrackContext,
        handler_name: &str,
        metadata: &mut Metadata,
    ) -> Self {
        let mut dir = Directory::with_tag_names(K::directory_name(format), K::tag_names());

        if let Some(created) = ctx.creation_time {
            dir.set(media::CREATION_TIME, created);
        }
        if let Some(modified) = ctx.modification_time {
            dir.set(media::MODIFICATION_TIME, modified);
        }
        if let Some(timescale) = ctx.timescale {
            dir.set(media::TIMESCALE, timescale);
        }
        if let Some(duration) = ctx.duration {
            dir.set(media::DURATION, duration as i64);
            if let Some(timescale) = ctx.timescale.filter(|&t| t > 0) {
                dir.set(media::DURATION_SECONDS, duration as f64 / timescale as f64);
            }
        }
        if let Some(language) = &ctx.language {
            dir.set(media::LANGUAGE, language.as_str());
        }
        if let Some(code) = ctx.language_code {
            dir.set(media::LANGUAGE_CODE, code);
        }
        if !handler_name.is_empty() {
            dir.set(media::HANDLER_NAME, handler_name);
        }
        if let Some(track_id) = ctx.track_id {
            dir.set(media::TRACK_ID, track_id);
        }
        K::on_create(&mut dir, ctx);

        let directory = metadata.add_directory(dir);
        Self { directory, ctx: ctx.clone(), kind: PhantomData }
    }

    fn decode_sample_description(&self, payload: &[u8], dir: &mut Directory) -> Result<()> {
        let mut r = ByteReader::from_slice(payload);
        read_version_and_flags(&mut r)?;
        if r.read_u32()? == 0 {
            return Ok(());
        }

        let entry_size = r.read_u32()?;
        if entry_size < 16 {
            return Err(ParseError::Malformed(format!(
                "sample entry of {entry_size} bytes is shorter than its header"
            )));
        }
        let format = r.read_fourcc()?;
        dir.set(K::FORMAT, format.to_string());
        // reserved, data reference index
        r.skip(6 + 2)?;
        K::decode_sample_entry(&mut r, dir)
    }
}

impl<K: TrackKind> BoxHandler for MediaHandler<K> {
    fn name(&self) -> &'static str {
        K::NAME
    }

    fn directory(&self) -> DirectoryId {
        self.directory
    }

    fn wants_container(&self, header: &BoxHeader) -> bool {
        matches!(KnownBox::from(header.typ), KnownBox::Minf | KnownBox::Stbl)
            || K::MEDIA_CONTAINERS.contains(&header.typ)
    }

    fn wants_leaf(&self, header: &BoxHeader) -> bool {
        header.typ == K::MEDIA_INFORMATION
            || match KnownBox::from(header.typ) {
                KnownBox::Stsd => true,
                KnownBox::Stts => K::USES_TIME_TO_SAMPLE,
                _ => false,
            }
    }

    fn enter_container(
        &mut self,
        _header: &BoxHeader,
        _metadata: &mut Metadata,
    ) -> Result<Box<dyn BoxHandler>> {
        Ok(Box::new(self.clone()))
    }

    fn decode_leaf(
        &mut self,
        header: &BoxHeader,
        payload: &[u8],
        metadata: &mut Metadata,
    ) -> Result<Next> {
        let dir = metadata.directory_mut(self.directory);
        if header.typ == K::MEDIA_INFORMATION {
            K::decode_media_information(payload, dir)?;
        } else {
            match KnownBox::from(header.typ) {
                KnownBox::Stsd => self.decode_sample_description(payload, dir)?,
                KnownBox::Stts => K::decode_time_to_sample(payload, dir, &self.ctx)?,
                _ => {}
            }
        }
        Ok(Next::Keep)
    }
}
