pub mod api;
pub mod boxes;
pub mod handler;
pub mod known_boxes;
pub mod metadata;
pub mod mp4;
pub mod parser;
pub mod quicktime;
pub mod reader;
pub mod tags;
pub mod threegp;
pub mod util;

pub use api::{ContainerFormat, ExtractOptions, detect_format, extract, extract_path, extract_with};
pub use boxes::{BoxHeader, BoxSize, FourCC};
pub use handler::{BoxHandler, Next};
pub use metadata::{Directory, DirectoryId, Metadata, TagValue};
pub use parser::{ParseError, WalkOptions, read_box_header, walk};
pub use reader::{ByteOrder, ByteReader, TextEncoding};
