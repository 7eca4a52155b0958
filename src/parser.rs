use crate::boxes::{BoxHeader, BoxSize, FourCC};
use crate::handler::{BoxHandler, Next};
use crate::known_boxes::KnownBox;
use crate::metadata::Metadata;
use crate::reader::ByteReader;
use log::{debug, trace, warn};
use std::io::{Read, Seek};

#[derive(thiserror::Error, Debug)]
pub enum ParseError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("insufficient data: needed {needed} bytes, {available} available")]
    InsufficientData { needed: u64, available: u64 },
    #[error("invalid box size {size} (header is {header_size} bytes)")]
    InvalidSize { size: u64, header_size: u64 },
    #[error("source contains no readable box header")]
    EmptySource,
    #[error("malformed payload: {0}")]
    Malformed(String),
    #[error("unsupported: {0}")]
    Unsupported(&'static str),
}

impl ParseError {
    /// True for reads that ran out of bytes, however the source reported it.
    pub fn is_insufficient_data(&self) -> bool {
        match self {
            ParseError::InsufficientData { .. } => true,
            ParseError::Io(e) => e.kind() == std::io::ErrorKind::UnexpectedEof,
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, ParseError>;

/// Default bound on container nesting.
pub const DEFAULT_MAX_DEPTH: usize = 32;
/// Default bound on the payload materialised for a single leaf box.
pub const DEFAULT_MAX_PAYLOAD_LEN: u64 = 64 * 1024 * 1024;

/// Limits applied by [`walk`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalkOptions {
    /// Deepest container level the walker descends into; the root window is level 0.
    pub max_depth: usize,
    /// Leaf payloads longer than this are reported and skipped instead of decoded.
    pub max_payload_len: u64,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self { max_depth: DEFAULT_MAX_DEPTH, max_payload_len: DEFAULT_MAX_PAYLOAD_LEN }
    }
}

pub fn read_box_header<R: Read + Seek>(r: &mut ByteReader<R>) -> Result<BoxHeader> {
    let start = r.position();
    let size32 = r.read_be_u32()?;
    let typ = r.read_fourcc()?;

    let (size, header_size) = match size32 {
        0 => (BoxSize::ToEnd, BoxHeader::HEADER_SIZE),
        1 => (BoxSize::Fixed(r.read_be_u64()?), BoxHeader::LARGE_HEADER_SIZE),
        n => (BoxSize::Fixed(n as u64), BoxHeader::HEADER_SIZE),
    };

    Ok(BoxHeader { size, typ, header_size, start })
}

/// Walk the boxes between the reader's position and `window_end` (`None` = to end of stream),
/// dispatching each to `handler`.
///
/// Returns the handler that was active when the window closed. Decode problems never escape:
/// they are recorded on the active handler's directory and the walk keeps whatever it read.
pub fn walk<R: Read + Seek>(
    r: &mut ByteReader<R>,
    window_end: Option<u64>,
    handler: Box<dyn BoxHandler>,
    metadata: &mut Metadata,
    opts: &WalkOptions,
) -> Box<dyn BoxHandler> {
    walk_level(r, window_end, handler, metadata, opts, 0)
}

fn walk_level<R: Read + Seek>(
    r: &mut ByteReader<R>,
    window_end: Option<u64>,
    mut handler: Box<dyn BoxHandler>,
    metadata: &mut Metadata,
    opts: &WalkOptions,
    depth: usize,
) -> Box<dyn BoxHandler> {
    while window_end.is_none_or(|end| r.position() < end) {
        if let Some(end) = window_end {
            let left = end - r.position();
            if left < BoxHeader::HEADER_SIZE {
                // too small for a header: padding or a terminator, not a sibling
                trace!("skipping {} trailing bytes at {}", left, r.position());
                let _ = r.seek_to(end);
                break;
            }
        }

        let available = r.remaining();
        let header = match read_box_header(r) {
            Ok(h) => h,
            Err(e) => {
                if window_end.is_some() || available > 0 {
                    report(metadata, handler.as_ref(), None, format!("truncated box header: {e}"));
                }
                break;
            }
        };

        trace!(
            "[{}] '{}' at {} size {:?} (depth {})",
            handler.name(),
            header.typ,
            header.start,
            header.size,
            depth
        );

        if let Err(e) = header.validate() {
            // nothing after an undersized header can be located reliably
            report(metadata, handler.as_ref(), Some(header.typ), e.to_string());
            break;
        }

        let box_end = header.end();
        let overruns = matches!((box_end, window_end), (Some(b), Some(w)) if b > w);

        if handler.wants_container(&header) {
            let child_end = match (box_end, window_end) {
                (Some(b), Some(w)) => Some(b.min(w)),
                (Some(b), None) => Some(b),
                (None, w) => w,
            };
            if overruns {
                report(metadata, handler.as_ref(), Some(header.typ), "box extends beyond its parent".into());
            }

            if depth + 1 > opts.max_depth {
                report(
                    metadata,
                    handler.as_ref(),
                    Some(header.typ),
                    format!("box nesting exceeds {} levels", opts.max_depth),
                );
            } else {
                descend(r, &header, child_end, handler.as_mut(), metadata, opts, depth);
            }

            match child_end {
                Some(end) if !header.extends_to_end() && !overruns => {
                    if r.seek_to(end).is_err() {
                        break;
                    }
                }
                _ => break,
            }
        } else if handler.wants_leaf(&header) {
            if overruns {
                report(metadata, handler.as_ref(), Some(header.typ), "box extends beyond its parent".into());
                break;
            }
            let payload_len = match header.payload_len() {
                Some(len) => len,
                None => window_end.map_or(r.remaining(), |end| end.saturating_sub(r.position())),
            };
            if payload_len > opts.max_payload_len {
                report(
                    metadata,
                    handler.as_ref(),
                    Some(header.typ),
                    format!("payload of {} bytes exceeds the {} byte limit", payload_len, opts.max_payload_len),
                );
                if header.extends_to_end() || r.skip(payload_len).is_err() {
                    break;
                }
                continue;
            }

            let payload = match r.read_bytes(payload_len as usize) {
                Ok(p) => p,
                Err(e) => {
                    report(metadata, handler.as_ref(), Some(header.typ), e.to_string());
                    break;
                }
            };

            match handler.decode_leaf(&header, &payload, metadata) {
                Ok(Next::Keep) => {}
                Ok(Next::Replace(next)) => {
                    debug!("'{}' switched handler {} -> {}", header.typ, handler.name(), next.name());
                    handler = next;
                }
                Err(e) => report(metadata, handler.as_ref(), Some(header.typ), e.to_string()),
            }

            if header.extends_to_end() {
                break;
            }
        } else {
            match header.payload_len() {
                Some(len) => {
                    if overruns {
                        report(metadata, handler.as_ref(), Some(header.typ), "box extends beyond its parent".into());
                        break;
                    }
                    if let Err(e) = r.skip(len) {
                        report(metadata, handler.as_ref(), Some(header.typ), e.to_string());
                        break;
                    }
                }
                // an unknown box of unknown extent hides everything after it
                None => break,
            }
        }
    }

    handler
}

fn descend<R: Read + Seek>(
    r: &mut ByteReader<R>,
    header: &BoxHeader,
    child_end: Option<u64>,
    handler: &mut dyn BoxHandler,
    metadata: &mut Metadata,
    opts: &WalkOptions,
    depth: usize,
) {
    let preamble = handler.container_preamble(header);
    if preamble > 0 {
        let fits = child_end.is_none_or(|end| r.position() + preamble <= end);
        if !fits || r.skip(preamble).is_err() {
            report(metadata, handler, Some(header.typ), "container too short for its preamble".into());
            return;
        }
    }

    let child = match handler.enter_container(header, metadata) {
        Ok(child) => child,
        Err(e) => {
            report(metadata, handler, Some(header.typ), e.to_string());
            return;
        }
    };
    debug!("entering '{}' with {} at depth {}", header.typ, child.name(), depth + 1);

    // the child's final handler only governed the child window
    let _ = walk_level(r, child_end, child, metadata, opts, depth + 1);
}

fn report(metadata: &mut Metadata, handler: &dyn BoxHandler, typ: Option<FourCC>, message: String) {
    let message = match typ {
        Some(typ) => format!("{}: {}", KnownBox::from(typ).full_name(), message),
        None => message,
    };
    warn!("[{}] {}", handler.name(), message);
    metadata.add_error(handler.directory(), message);
}
