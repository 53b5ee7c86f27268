//! Payload decoders for the box types the analyzer understands.
//!
//! Each decoder starts with the reader at the first payload byte, right
//! after the box header. None of them recurse.

use crate::boxes::{
    CompositionOffset, FtypBox, FullBoxPrefix, MfhdBox, TfdtBox, TfhdBox, TrunBox, TrunSample,
};
use crate::parser::{Result, read_full_box_prefix};
use crate::reader::BoxReader;
use std::io::{Read, Seek};
use tracing::trace;

// ftyp: major + minor + compatible brands up to `end`
pub fn decode_ftyp<R: Read + Seek>(r: &mut BoxReader<R>, end: u64) -> Result<FtypBox> {
    let major_brand = r.read_fourcc()?;
    let minor_version = r.read_u32()?;

    // a tail shorter than a whole brand is ignored
    let end = end.min(r.len());
    let mut compatible_brands = Vec::new();
    while end.saturating_sub(r.position()) >= 4 {
        compatible_brands.push(r.read_fourcc()?);
    }

    trace!(%major_brand, minor_version, brands = compatible_brands.len(), "ftyp");
    Ok(FtypBox { major_brand, minor_version, compatible_brands })
}

pub fn decode_mfhd<R: Read + Seek>(r: &mut BoxReader<R>) -> Result<MfhdBox> {
    let prefix = read_full_box_prefix(r)?;
    let sequence_number = r.read_u32()?;
    trace!(sequence_number, "mfhd");
    Ok(MfhdBox { prefix, sequence_number })
}

// tfhd: track id, then optional fields in flag-bit order
pub fn decode_tfhd<R: Read + Seek>(r: &mut BoxReader<R>) -> Result<TfhdBox> {
    let prefix = read_full_box_prefix(r)?;
    let mut b = TfhdBox { prefix, track_id: r.read_u32()?, ..Default::default() };

    if prefix.has(TfhdBox::BASE_DATA_OFFSET_PRESENT) {
        b.base_data_offset = r.read_u64()?;
    }
    if prefix.has(TfhdBox::SAMPLE_DESCRIPTION_INDEX_PRESENT) {
        b.sample_description_index = r.read_u32()?;
    }
    if prefix.has(TfhdBox::DEFAULT_SAMPLE_DURATION_PRESENT) {
        b.default_sample_duration = r.read_u32()?;
    }
    if prefix.has(TfhdBox::DEFAULT_SAMPLE_SIZE_PRESENT) {
        b.default_sample_size = r.read_u32()?;
    }
    if prefix.has(TfhdBox::DEFAULT_SAMPLE_FLAGS_PRESENT) {
        b.default_sample_flags = r.read_u32()?;
    }
    b.duration_is_empty = prefix.has(TfhdBox::DURATION_IS_EMPTY);
    b.default_base_is_moof = prefix.has(TfhdBox::DEFAULT_BASE_IS_MOOF);

    trace!(track_id = b.track_id, flags = prefix.flags, "tfhd");
    Ok(b)
}

pub fn decode_tfdt<R: Read + Seek>(r: &mut BoxReader<R>) -> Result<TfdtBox> {
    let prefix = read_full_box_prefix(r)?;
    let base_media_decode_time = if prefix.version == 1 {
        r.read_u64()?
    } else {
        r.read_u32()? as u64
    };
    trace!(version = prefix.version, base_media_decode_time, "tfdt");
    Ok(TfdtBox { prefix, base_media_decode_time })
}

// trun: sample count, optional data offset and first-sample flags, then one
// record per sample. The composition offset is read for every sample.
pub fn decode_trun<R: Read + Seek>(r: &mut BoxReader<R>) -> Result<TrunBox> {
    let prefix = read_full_box_prefix(r)?;
    let sample_count = r.read_u32()?;

    let data_offset = if prefix.has(TrunBox::DATA_OFFSET_PRESENT) { r.read_i32()? } else { 0 };
    let first_sample_flags =
        if prefix.has(TrunBox::FIRST_SAMPLE_FLAGS_PRESENT) { r.read_u32()? } else { 0 };

    // sample_count comes from the file; don't trust it for preallocation
    let per_sample = 4 * (1
        + prefix.has(TrunBox::SAMPLE_DURATION_PRESENT) as u64
        + prefix.has(TrunBox::SAMPLE_SIZE_PRESENT) as u64
        + prefix.has(TrunBox::SAMPLE_FLAGS_PRESENT) as u64);
    let cap = (sample_count as u64).min(r.remaining() / per_sample) as usize;
    let mut samples = Vec::with_capacity(cap);

    for _ in 0..sample_count {
        let duration = flagged_u32(r, &prefix, TrunBox::SAMPLE_DURATION_PRESENT)?;
        let size = flagged_u32(r, &prefix, TrunBox::SAMPLE_SIZE_PRESENT)?;
        let flags = flagged_u32(r, &prefix, TrunBox::SAMPLE_FLAGS_PRESENT)?;
        let composition_time_offset = if prefix.version == 0 {
            CompositionOffset::Unsigned(r.read_u32()?)
        } else {
            CompositionOffset::Signed(r.read_i32()?)
        };
        samples.push(TrunSample { duration, size, flags, composition_time_offset });
    }

    trace!(sample_count, data_offset, flags = prefix.flags, "trun");
    Ok(TrunBox { prefix, sample_count, data_offset, first_sample_flags, samples })
}

fn flagged_u32<R: Read + Seek>(r: &mut BoxReader<R>, prefix: &FullBoxPrefix, bit: u32) -> Result<u32> {
    if prefix.has(bit) { r.read_u32() } else { Ok(0) }
}
