use crate::boxes::FourCC;

/// Display names for the registered box types, plus `mdat` and `free`.
///
/// Anything else becomes `KnownBox::Unknown(fourcc)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KnownBox {
    // top-level
    Ftyp,
    Moov,
    Mdat,
    Free,
    Skip,
    Meta,
    Mfra,

    // moov / trak containers
    Trak,
    Edts,
    Mdia,
    Minf,
    Dinf,
    Stbl,
    Udta,
    Strk,
    Meco,
    Mere,

    // fragments
    Mvex,
    Moof,
    Mfhd,
    Traf,
    Tfhd,
    Tfdt,
    Trun,

    // protection / partitions
    Ipro,
    Sinf,
    Fiin,
    Paen,

    Unknown(FourCC),
}

impl From<FourCC> for KnownBox {
    fn from(cc: FourCC) -> Self {
        match &cc.0 {
            b"ftyp" => KnownBox::Ftyp,
            b"moov" => KnownBox::Moov,
            b"mdat" => KnownBox::Mdat,
            b"free" => KnownBox::Free,
            b"skip" => KnownBox::Skip,
            b"meta" => KnownBox::Meta,
            b"mfra" => KnownBox::Mfra,

            b"trak" => KnownBox::Trak,
            b"edts" => KnownBox::Edts,
            b"mdia" => KnownBox::Mdia,
            b"minf" => KnownBox::Minf,
            b"dinf" => KnownBox::Dinf,
            b"stbl" => KnownBox::Stbl,
            b"udta" => KnownBox::Udta,
            b"strk" => KnownBox::Strk,
            b"meco" => KnownBox::Meco,
            b"mere" => KnownBox::Mere,

            b"mvex" => KnownBox::Mvex,
            b"moof" => KnownBox::Moof,
            b"mfhd" => KnownBox::Mfhd,
            b"traf" => KnownBox::Traf,
            b"tfhd" => KnownBox::Tfhd,
            b"tfdt" => KnownBox::Tfdt,
            b"trun" => KnownBox::Trun,

            b"ipro" => KnownBox::Ipro,
            b"sinf" => KnownBox::Sinf,
            b"fiin" => KnownBox::Fiin,
            b"paen" => KnownBox::Paen,

            _ => KnownBox::Unknown(cc),
        }
    }
}

impl KnownBox {
    /// Human-readable name, e.g. "Track Run Box".
    pub fn full_name(&self) -> &'static str {
        match self {
            KnownBox::Ftyp => "File Type Box",
            KnownBox::Moov => "Movie Box",
            KnownBox::Mdat => "Media Data Box",
            KnownBox::Free => "Free Space Box",
            KnownBox::Skip => "Free Space Box (skip)",
            KnownBox::Meta => "Meta Box",
            KnownBox::Mfra => "Movie Fragment Random Access Box",

            KnownBox::Trak => "Track Box",
            KnownBox::Edts => "Edit Box",
            KnownBox::Mdia => "Media Box",
            KnownBox::Minf => "Media Information Box",
            KnownBox::Dinf => "Data Information Box",
            KnownBox::Stbl => "Sample Table Box",
            KnownBox::Udta => "User Data Box",
            KnownBox::Strk => "Sub Track Box",
            KnownBox::Meco => "Additional Metadata Container Box",
            KnownBox::Mere => "Metabox Relation Box",

            KnownBox::Mvex => "Movie Extends Box",
            KnownBox::Moof => "Movie Fragment Box",
            KnownBox::Mfhd => "Movie Fragment Header Box",
            KnownBox::Traf => "Track Fragment Box",
            KnownBox::Tfhd => "Track Fragment Header Box",
            KnownBox::Tfdt => "Track Fragment Decode Time Box",
            KnownBox::Trun => "Track Run Box",

            KnownBox::Ipro => "Item Protection Box",
            KnownBox::Sinf => "Protection Scheme Information Box",
            KnownBox::Fiin => "FD Item Information Box",
            KnownBox::Paen => "Partition Entry",

            KnownBox::Unknown(_) => "Unknown Box",
        }
    }
}
