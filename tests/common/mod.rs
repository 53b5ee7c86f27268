#![allow(dead_code)]

/// Plain box: 32-bit size + type + payload.
pub fn boxed(typ: &[u8; 4], payload: &[u8]) -> Vec<u8> {
    let mut v = Vec::new();
    v.extend_from_slice(&(8 + payload.len() as u32).to_be_bytes());
    v.extend_from_slice(typ);
    v.extend_from_slice(payload);
    v
}

/// Extended-size box: size field 1, then a 64-bit size after the type.
pub fn large_boxed(typ: &[u8; 4], payload: &[u8]) -> Vec<u8> {
    let mut v = Vec::new();
    v.extend_from_slice(&1u32.to_be_bytes());
    v.extend_from_slice(typ);
    v.extend_from_slice(&(16 + payload.len() as u64).to_be_bytes());
    v.extend_from_slice(payload);
    v
}

/// Full box: version + 24-bit flags ahead of `body`.
pub fn full_boxed(typ: &[u8; 4], version: u8, flags: u32, body: &[u8]) -> Vec<u8> {
    let mut payload = vec![version];
    payload.extend_from_slice(&flags.to_be_bytes()[1..]);
    payload.extend_from_slice(body);
    boxed(typ, &payload)
}

pub fn cat(parts: &[Vec<u8>]) -> Vec<u8> {
    parts.concat()
}

pub fn u32s(vals: &[u32]) -> Vec<u8> {
    vals.iter().flat_map(|v| v.to_be_bytes()).collect()
}

pub fn ftyp() -> Vec<u8> {
    let mut p = Vec::new();
    p.extend_from_slice(b"iso6");
    p.extend_from_slice(&512u32.to_be_bytes());
    p.extend_from_slice(b"iso6");
    p.extend_from_slice(b"dash");
    boxed(b"ftyp", &p)
}

/// moof { mfhd, traf { tfhd, tfdt, trun } } with two samples.
pub fn fragment(sequence: u32, track_id: u32, decode_time: u32) -> Vec<u8> {
    let mfhd = full_boxed(b"mfhd", 0, 0, &sequence.to_be_bytes());
    let tfhd = full_boxed(b"tfhd", 0, 0x020000, &track_id.to_be_bytes());
    let tfdt = full_boxed(b"tfdt", 0, 0, &decode_time.to_be_bytes());
    // sample_count=2, data_offset, then (duration, size, cto) per sample
    let mut trun_body = u32s(&[2]);
    trun_body.extend_from_slice(&100i32.to_be_bytes());
    trun_body.extend(u32s(&[1024, 500, 0, 1024, 300, 2048]));
    let trun = full_boxed(b"trun", 0, 0x000301, &trun_body);
    let traf = boxed(b"traf", &cat(&[tfhd, tfdt, trun]));
    boxed(b"moof", &cat(&[mfhd, traf]))
}
