use serde::{Serialize, Serializer};
use std::fmt;

#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct FourCC(pub [u8; 4]);

impl FourCC {
    pub const UUID: FourCC = FourCC(*b"uuid");

    pub fn from_str(s: &str) -> Option<Self> {
        let b = s.as_bytes();
        if b.len() == 4 {
            Some(FourCC([b[0], b[1], b[2], b[3]]))
        } else { None }
    }
    pub fn as_str_lossy(&self) -> String {
        self.0.iter().map(|&c| if (32..=126).contains(&c) { c as char } else { '.' })
            .collect()
    }
}
impl fmt::Debug for FourCC { fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.as_str_lossy()) } }
impl fmt::Display for FourCC { fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.as_str_lossy()) } }

impl Serialize for FourCC {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&self.as_str_lossy())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoxHeader {
    pub size: u64,          // total size including header, or 0=to parent end
    pub typ: FourCC,
    pub header_size: u64,   // 8, or 16 for extended size
    pub start: u64,         // file offset of header start
}

impl BoxHeader {
    pub fn payload_start(&self) -> u64 {
        self.start + self.header_size
    }
}

/// Version and flags prefix shared by all full boxes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FullBoxPrefix {
    pub version: u8,
    /// Only the low 24 bits are used.
    pub flags: u32,
}

impl FullBoxPrefix {
    pub fn has(&self, bit: u32) -> bool {
        self.flags & bit != 0
    }
}

/// File Type Box.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FtypBox {
    pub major_brand: FourCC,
    pub minor_version: u32,
    pub compatible_brands: Vec<FourCC>,
}

/// Movie Fragment Header Box.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MfhdBox {
    pub prefix: FullBoxPrefix,
    pub sequence_number: u32,
}

/// Track Fragment Header Box.
///
/// Optional fields whose presence bit is unset stay at zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TfhdBox {
    pub prefix: FullBoxPrefix,
    pub track_id: u32,
    pub base_data_offset: u64,
    pub sample_description_index: u32,
    pub default_sample_duration: u32,
    pub default_sample_size: u32,
    pub default_sample_flags: u32,
    pub duration_is_empty: bool,
    pub default_base_is_moof: bool,
}

impl TfhdBox {
    pub const BASE_DATA_OFFSET_PRESENT: u32 = 0x000001;
    pub const SAMPLE_DESCRIPTION_INDEX_PRESENT: u32 = 0x000002;
    pub const DEFAULT_SAMPLE_DURATION_PRESENT: u32 = 0x000008;
    pub const DEFAULT_SAMPLE_SIZE_PRESENT: u32 = 0x000010;
    pub const DEFAULT_SAMPLE_FLAGS_PRESENT: u32 = 0x000020;
    pub const DURATION_IS_EMPTY: u32 = 0x010000;
    pub const DEFAULT_BASE_IS_MOOF: u32 = 0x020000;
}

/// Track Fragment Base Media Decode Time Box.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TfdtBox {
    pub prefix: FullBoxPrefix,
    pub base_media_decode_time: u64,
}

/// Composition time offset of a track run sample: unsigned in version 0,
/// signed in later versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum CompositionOffset {
    Unsigned(u32),
    Signed(i32),
}

impl CompositionOffset {
    pub fn as_i64(&self) -> i64 {
        match *self {
            CompositionOffset::Unsigned(v) => v as i64,
            CompositionOffset::Signed(v) => v as i64,
        }
    }
}

impl fmt::Display for CompositionOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_i64())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrunSample {
    pub duration: u32,
    pub size: u32,
    pub flags: u32,
    pub composition_time_offset: CompositionOffset,
}

/// Track Run Box. Samples are kept in stream order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrunBox {
    pub prefix: FullBoxPrefix,
    pub sample_count: u32,
    pub data_offset: i32,
    pub first_sample_flags: u32,
    pub samples: Vec<TrunSample>,
}

impl TrunBox {
    pub const DATA_OFFSET_PRESENT: u32 = 0x000001;
    pub const FIRST_SAMPLE_FLAGS_PRESENT: u32 = 0x000004;
    pub const SAMPLE_DURATION_PRESENT: u32 = 0x000100;
    pub const SAMPLE_SIZE_PRESENT: u32 = 0x000200;
    pub const SAMPLE_FLAGS_PRESENT: u32 = 0x000400;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Container(Vec<BoxRef>),
    Ftyp(FtypBox),
    Mfhd(MfhdBox),
    Tfhd(TfhdBox),
    Tfdt(TfdtBox),
    Trun(TrunBox),
    /// No registered decoder: header only.
    Opaque,
}

impl NodeKind {
    pub fn label(&self) -> &'static str {
        match self {
            NodeKind::Container(_) => "container",
            NodeKind::Opaque => "opaque",
            _ => "decoded",
        }
    }

    pub fn prefix(&self) -> Option<&FullBoxPrefix> {
        match self {
            NodeKind::Mfhd(b) => Some(&b.prefix),
            NodeKind::Tfhd(b) => Some(&b.prefix),
            NodeKind::Tfdt(b) => Some(&b.prefix),
            NodeKind::Trun(b) => Some(&b.prefix),
            NodeKind::Container(_) | NodeKind::Ftyp(_) | NodeKind::Opaque => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoxRef {
    pub hdr: BoxHeader,
    pub kind: NodeKind,
}

impl BoxRef {
    pub fn children(&self) -> &[BoxRef] {
        match &self.kind {
            NodeKind::Container(kids) => kids,
            _ => &[],
        }
    }
}
