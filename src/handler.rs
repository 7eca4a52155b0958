use crate::boxes::BoxHeader;
use crate::metadata::{DirectoryId, Metadata};
use crate::parser::Result;

/// What governs the siblings that follow a decoded leaf.
pub enum Next {
    /// The current handler stays active.
    Keep,
    /// The given handler takes over the rest of this nesting level.
    Replace(Box<dyn BoxHandler>),
}

/// Per-family box classification and decoding.
///
/// The walker owns exactly one handler per nesting level. Containers are walked with the
/// handler returned by [`BoxHandler::enter_container`]; a leaf decode may hand the level over
/// to another handler through [`Next::Replace`]. Neither affects levels above the current one.
pub trait BoxHandler {
    /// Stable name, used in logs.
    fn name(&self) -> &'static str;

    /// Directory that receives this handler's tags and errors.
    fn directory(&self) -> DirectoryId;

    /// Should the walker descend into this box?
    fn wants_container(&self, header: &BoxHeader) -> bool;

    /// Should the walker read this box's payload and pass it to `decode_leaf`?
    fn wants_leaf(&self, header: &BoxHeader) -> bool;

    /// Bytes between a container's header and its first child (version and flags of FullBox
    /// containers such as `meta`).
    fn container_preamble(&self, _header: &BoxHeader) -> u64 {
        0
    }

    /// Handler for the children of `header`. Usually a copy of `self`.
    fn enter_container(
        &mut self,
        header: &BoxHeader,
        metadata: &mut Metadata,
    ) -> Result<Box<dyn BoxHandler>>;

    /// Decode a leaf payload into the directory.
    fn decode_leaf(
        &mut self,
        header: &BoxHeader,
        payload: &[u8],
        metadata: &mut Metadata,
    ) -> Result<Next>;
}
