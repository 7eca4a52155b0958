//! QuickTime front-end (`.mov`).

use crate::{
    api::ContainerFormat,
    boxes::BoxHeader,
    handler::{BoxHandler, Next},
    known_boxes::KnownBox,
    metadata::{Directory, DirectoryId, Metadata},
    mp4::{COMPRESSED_MOVIE_ERROR, TrackContext, decode_movie_leaf},
    parser::Result,
    tags::movie,
};

/// Root handler for QuickTime movies.
///
/// Shares the movie-level decoders with MP4 but reads the QuickTime `mvhd` layout and
/// counted `hdlr` names, and does not walk `udta`/`meta`.
#[derive(Debug, Clone)]
pub struct QuickTimeAtomHandler {
    directory: DirectoryId,
    ctx: TrackContext,
}

impl QuickTimeAtomHandler {
    pub fn new(metadata: &mut Metadata) -> Self {
        let directory = metadata.add_directory(Directory::with_tag_names(
            ContainerFormat::QuickTime.label(),
            movie::name,
        ));
        Self { directory, ctx: TrackContext::default() }
    }
}

impl BoxHandler for QuickTimeAtomHandler {
    fn name(&self) -> &'static str {
        "quicktime"
    }

    fn directory(&self) -> DirectoryId {
        self.directory
    }

    fn wants_container(&self, header: &BoxHeader) -> bool {
        matches!(
            KnownBox::from(header.typ),
            KnownBox::Moov | KnownBox::Trak | KnownBox::Mdia | KnownBox::Cmov
        )
    }

    fn wants_leaf(&self, header: &BoxHeader) -> bool {
        matches!(
            KnownBox::from(header.typ),
            KnownBox::Ftyp | KnownBox::Mvhd | KnownBox::Tkhd | KnownBox::Mdhd | KnownBox::Hdlr
        )
    }

    fn enter_container(
        &mut self,
        header: &BoxHeader,
        metadata: &mut Metadata,
    ) -> Result<Box<dyn BoxHandler>> {
        if KnownBox::from(header.typ) == KnownBox::Cmov {
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
        decode_movie_leaf(
            ContainerFormat::QuickTime,
            self.directory,
            &mut self.ctx,
            header,
            payload,
            metadata,
        )
    }
}
