use crate::boxes::{BoxHeader, BoxRef, FourCC, FullBoxPrefix};
use crate::reader::BoxReader;
use crate::registry::Registry;
use std::io::{Read, Seek};
use std::path::PathBuf;
use tracing::{debug, warn};

#[derive(thiserror::Error, Debug)]
pub enum ParseError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("short read at {offset:#x}: needed {needed} bytes, {available} available")]
    ShortRead { offset: u64, needed: u64, available: u64 },
    #[error("unsupported box type '{typ}' at {offset:#x}")]
    UnsupportedBoxType { typ: FourCC, offset: u64 },
    #[error("invalid size {size} for '{typ}' box at {offset:#x}")]
    InvalidSize { typ: FourCC, offset: u64, size: u64 },
    #[error("decoding '{typ}' box at {offset:#x}: {source}")]
    Decode {
        typ: FourCC,
        offset: u64,
        #[source]
        source: Box<ParseError>,
    },
    #[error("cannot open {}: {source}", .path.display())]
    FileOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, ParseError>;

/// Decode a box header at the current position.
///
/// On `uuid` the reader is put back at the header start.
pub fn read_box_header<R: Read + Seek>(r: &mut BoxReader<R>) -> Result<BoxHeader> {
    let start = r.position();
    let size32 = r.read_u32()?;
    let typ = r.read_fourcc()?;

    if typ == FourCC::UUID {
        r.seek(start)?;
        return Err(ParseError::UnsupportedBoxType { typ, offset: start });
    }

    let (size, header_size) = if size32 == 1 {
        (r.read_u64()?, 16)
    } else {
        (size32 as u64, 8)
    };

    Ok(BoxHeader { size, typ, header_size, start })
}

pub fn read_full_box_prefix<R: Read + Seek>(r: &mut BoxReader<R>) -> Result<FullBoxPrefix> {
    let version = r.read_u8()?;
    let flags = r.read_u24()?;
    Ok(FullBoxPrefix { version, flags })
}

/// Walk `[start, end)` and build one node per box found there.
///
/// The cursor always steps by each box's declared size, however many bytes
/// its decoder consumed. Running out of file before `end` stops the walk and
/// marks the reader truncated; it is not an error.
pub fn parse_children<R: Read + Seek>(
    r: &mut BoxReader<R>,
    start: u64,
    end: u64,
    reg: &Registry,
) -> Result<Vec<BoxRef>> {
    let mut kids = Vec::new();
    let mut cursor = start;

    while cursor < end {
        if cursor >= r.len() {
            warn!(cursor, end, len = r.len(), "range ends past end of file");
            r.mark_truncated();
            break;
        }

        r.seek(cursor)?;
        let h = read_box_header(r)?;
        if h.size != 0 && h.size < h.header_size {
            return Err(ParseError::InvalidSize { typ: h.typ, offset: h.start, size: h.size });
        }

        let box_end = if h.size == 0 { end } else { h.start.saturating_add(h.size) };
        if box_end > end {
            warn!(typ = %h.typ, offset = h.start, box_end, parent_end = end, "box overruns its parent");
        }
        if box_end > r.len() {
            warn!(typ = %h.typ, offset = h.start, box_end, len = r.len(), "box overruns end of file");
            r.mark_truncated();
        }
        debug!(typ = %h.typ, offset = h.start, size = h.size, header_size = h.header_size, "box");

        r.seek(h.payload_start())?;
        let kind = reg.decode(r, &h, box_end)?;

        kids.push(BoxRef { hdr: h, kind });
        cursor = box_end;
    }

    // a declared end can lie far past the source; never seek beyond it
    r.seek(cursor.min(r.len()))?;
    Ok(kids)
}
