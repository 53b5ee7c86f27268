use crate::{
    boxes::BoxRef,
    parser::{ParseError, Result, parse_children},
    reader::BoxReader,
    registry::{Registry, default_registry},
};
use serde::Serialize;
use std::{
    fs::File,
    io::{Read, Seek},
    path::Path,
};
use tracing::info;

/// The decoded box tree of a whole file.
#[derive(Debug, Clone, Serialize)]
pub struct BoxTree {
    /// Length of the source in bytes
    pub len: u64,
    /// Top-level boxes in stream order
    pub boxes: Vec<BoxRef>,
    /// A declared box range ran past the end of the source
    pub truncated: bool,
}

/// Parse an MP4/ISOBMFF source and return its complete box tree.
///
/// # Parameters
/// - `r`: A reader that implements `Read + Seek` (e.g., `File`, `Cursor<Vec<u8>>`)
///
/// Boxes without a registered decoder are kept as opaque nodes. Any decoder
/// failure aborts the whole parse; there is no partial tree.
///
/// # Example
/// ```no_run
/// use mp4analyzer::parse_reader;
/// use std::fs::File;
///
/// let tree = parse_reader(File::open("video.mp4")?)?;
/// println!("{} top-level boxes", tree.boxes.len());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn parse_reader<R: Read + Seek>(r: R) -> Result<BoxTree> {
    parse_reader_with(r, default_registry())
}

/// Same as [`parse_reader`], dispatching through a caller-supplied registry.
pub fn parse_reader_with<R: Read + Seek>(r: R, reg: &Registry) -> Result<BoxTree> {
    let mut r = BoxReader::new(r)?;
    let len = r.len();
    let boxes = parse_children(&mut r, 0, len, reg)?;
    Ok(BoxTree { len, boxes, truncated: r.truncated() })
}

/// Open `path` and parse it with the default registry.
pub fn analyze_file(path: impl AsRef<Path>) -> Result<BoxTree> {
    let path = path.as_ref();
    let f = File::open(path).map_err(|source| ParseError::FileOpen {
        path: path.to_path_buf(),
        source,
    })?;
    let len = f.metadata()?.len();
    info!(path = %path.display(), len, "file is open");

    parse_reader(f)
}
