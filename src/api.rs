use crate::{
    boxes::FourCC,
    handler::BoxHandler,
    known_boxes::KnownBox,
    metadata::Metadata,
    mp4::Mp4BoxHandler,
    parser::{
        DEFAULT_MAX_DEPTH, DEFAULT_MAX_PAYLOAD_LEN, ParseError, Result, WalkOptions,
        read_box_header, walk,
    },
    quicktime::QuickTimeAtomHandler,
    reader::ByteReader,
    threegp::ThreeGpBoxHandler,
};
use log::debug;
use serde::Serialize;
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

/// Container family, selecting the root handler and directory names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ContainerFormat {
    Mp4,
    QuickTime,
    ThreeGp,
}

impl ContainerFormat {
    /// Family announced by an `ftyp` major brand.
    pub fn from_brand(brand: FourCC) -> Self {
        match &brand.0 {
            b"qt  " => ContainerFormat::QuickTime,
            [b'3', b'g', ..] => ContainerFormat::ThreeGp,
            _ => ContainerFormat::Mp4,
        }
    }

    /// Name of the movie-level directory, and prefix of the track directories.
    pub fn label(self) -> &'static str {
        match self {
            ContainerFormat::Mp4 => "MP4",
            ContainerFormat::QuickTime => "QuickTime",
            ContainerFormat::ThreeGp => "3GP",
        }
    }

    /// Root handler for this family, with its directory registered in `metadata`.
    pub fn root_handler(self, metadata: &mut Metadata) -> Box<dyn BoxHandler> {
        match self {
            ContainerFormat::Mp4 => Box::new(Mp4BoxHandler::new(metadata)),
            ContainerFormat::QuickTime => Box::new(QuickTimeAtomHandler::new(metadata)),
            ContainerFormat::ThreeGp => Box::new(ThreeGpBoxHandler::new(metadata)),
        }
    }
}

/// Guess the family from the first box without moving the cursor.
///
/// Files without a leading `ftyp` predate the ISO brands and are treated as QuickTime.
pub fn detect_format<R: Read + Seek>(r: &mut ByteReader<R>) -> Result<ContainerFormat> {
    let start = r.position();
    let header = read_box_header(r)?;
    let format = match KnownBox::from(header.typ) {
        KnownBox::Ftyp => match r.read_fourcc() {
            Ok(brand) => ContainerFormat::from_brand(brand),
            Err(_) => ContainerFormat::Mp4,
        },
        KnownBox::Moov
        | KnownBox::Mdat
        | KnownBox::Wide
        | KnownBox::Free
        | KnownBox::Skip
        | KnownBox::Pnot => ContainerFormat::QuickTime,
        _ => ContainerFormat::Mp4,
    };
    r.seek_to(start)?;
    Ok(format)
}

/// Extraction settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Force a family instead of detecting it from the first box.
    pub format: Option<ContainerFormat>,
    pub max_depth: usize,
    pub max_payload_len: u64,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            format: None,
            max_depth: DEFAULT_MAX_DEPTH,
            max_payload_len: DEFAULT_MAX_PAYLOAD_LEN,
        }
    }
}

impl ExtractOptions {
    pub fn with_format(mut self, format: ContainerFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_max_payload_len(mut self, max_payload_len: u64) -> Self {
        self.max_payload_len = max_payload_len;
        self
    }

    pub fn walk_options(&self) -> WalkOptions {
        WalkOptions { max_depth: self.max_depth, max_payload_len: self.max_payload_len }
    }
}

/// Extract metadata with default options.
///
/// # Example
/// ```no_run
/// use boxmeta::extract;
/// use std::fs::File;
///
/// let metadata = extract(File::open("video.mp4")?)?;
/// for dir in &metadata {
///     println!("{}: {} tags", dir.name(), dir.tag_count());
/// }
/// # Ok::<(), boxmeta::ParseError>(())
/// ```
pub fn extract<R: Read + Seek>(source: R) -> Result<Metadata> {
    extract_with(source, &ExtractOptions::default())
}

/// Extract metadata from `source`, starting at its current position.
///
/// Malformed content never fails the call: problems are recorded as directory errors and
/// whatever was decoded before them is kept. The only error for bad input is
/// [`ParseError::EmptySource`], when not even the first box header can be read.
pub fn extract_with<R: Read + Seek>(source: R, opts: &ExtractOptions) -> Result<Metadata> {
    let mut reader = ByteReader::new(source)?;

    let start = reader.position();
    if read_box_header(&mut reader).is_err() {
        return Err(ParseError::EmptySource);
    }
    reader.seek_to(start)?;

    let format = match opts.format {
        Some(format) => format,
        None => detect_format(&mut reader)?,
    };
    debug!("extracting {} metadata from {} bytes", format.label(), reader.len());

    let mut metadata = Metadata::new();
    let root = format.root_handler(&mut metadata);
    let _ = walk(&mut reader, None, root, &mut metadata, &opts.walk_options());
    Ok(metadata)
}

/// Extract metadata from a file on disk.
pub fn extract_path(path: impl AsRef<Path>, opts: &ExtractOptions) -> Result<Metadata> {
    let file = File::open(path)?;
    extract_with(BufReader::new(file), opts)
}
