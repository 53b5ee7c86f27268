pub mod api;
pub mod boxes;
pub mod decoders;
pub mod known_boxes;
pub mod parser;
pub mod reader;
pub mod registry;
pub mod render;
pub mod select;

pub use api::{BoxTree, analyze_file, parse_reader, parse_reader_with};
pub use boxes::{BoxHeader, BoxRef, FourCC, FullBoxPrefix, NodeKind};
pub use parser::{ParseError, parse_children, read_box_header, read_full_box_prefix};
pub use reader::BoxReader;
pub use registry::{Decoder, Registry, default_registry};
