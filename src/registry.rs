use crate::boxes::{BoxHeader, FourCC, NodeKind};
use crate::decoders;
use crate::parser::{ParseError, Result, parse_children};
use crate::reader::BoxReader;
use std::collections::HashMap;
use std::io::{Read, Seek};
use std::sync::LazyLock;

/// What to do with the payload of a box of a given type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Decoder {
    /// Payload is a sequence of child boxes.
    Container,
    Ftyp,
    Mfhd,
    Tfhd,
    Tfdt,
    Trun,
}

pub const CONTAINER_TYPES: [&[u8; 4]; 21] = [
    b"moov", b"trak", b"edts", b"mdia", b"minf", b"dinf", b"stbl", b"mvex", b"moof", b"traf",
    b"mfra", b"skip", b"udta", b"strk", b"meta", b"ipro", b"sinf", b"fiin", b"paen", b"meco",
    b"mere",
];

/// Registry of decoders keyed by box type.
///
/// Immutable once built; use [`Registry::with_decoder`] to build it fluently.
#[derive(Debug, Clone, Default)]
pub struct Registry {
    map: HashMap<FourCC, Decoder>,
}

impl Registry {
    /// Create an empty registry. Every box parsed with it is opaque.
    pub fn new() -> Self {
        Self { map: HashMap::new() }
    }

    /// Return a new registry with the given decoder added.
    pub fn with_decoder(mut self, typ: FourCC, dec: Decoder) -> Self {
        self.map.insert(typ, dec);
        self
    }

    pub fn lookup(&self, typ: &FourCC) -> Option<Decoder> {
        self.map.get(typ).copied()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Decode the payload `[hdr.payload_start(), end)` with the reader
    /// positioned at its start.
    ///
    /// Leaf decoder failures are wrapped with the box type and offset;
    /// errors from nested containers already carry their own.
    pub fn decode<R: Read + Seek>(
        &self,
        r: &mut BoxReader<R>,
        hdr: &BoxHeader,
        end: u64,
    ) -> Result<NodeKind> {
        let Some(dec) = self.lookup(&hdr.typ) else {
            return Ok(NodeKind::Opaque);
        };

        let leaf = match dec {
            Decoder::Container => {
                return Ok(NodeKind::Container(parse_children(r, hdr.payload_start(), end, self)?));
            }
            Decoder::Ftyp => decoders::decode_ftyp(r, end).map(NodeKind::Ftyp),
            Decoder::Mfhd => decoders::decode_mfhd(r).map(NodeKind::Mfhd),
            Decoder::Tfhd => decoders::decode_tfhd(r).map(NodeKind::Tfhd),
            Decoder::Tfdt => decoders::decode_tfdt(r).map(NodeKind::Tfdt),
            Decoder::Trun => decoders::decode_trun(r).map(NodeKind::Trun),
        };

        leaf.map_err(|e| ParseError::Decode {
            typ: hdr.typ,
            offset: hdr.start,
            source: Box::new(e),
        })
    }
}

static DEFAULT_REGISTRY: LazyLock<Registry> = LazyLock::new(|| {
    let reg = CONTAINER_TYPES
        .iter()
        .fold(Registry::new(), |reg, t| reg.with_decoder(FourCC(**t), Decoder::Container));

    reg.with_decoder(FourCC(*b"ftyp"), Decoder::Ftyp)
        .with_decoder(FourCC(*b"mfhd"), Decoder::Mfhd)
        .with_decoder(FourCC(*b"tfhd"), Decoder::Tfhd)
        .with_decoder(FourCC(*b"tfdt"), Decoder::Tfdt)
        .with_decoder(FourCC(*b"trun"), Decoder::Trun)
});

/// The process-wide registry of every supported box type, built on first use.
pub fn default_registry() -> &'static Registry {
    &DEFAULT_REGISTRY
}
