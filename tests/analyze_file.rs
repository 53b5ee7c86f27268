mod common;

use common::{cat, fragment, ftyp};
use mp4analyzer::{ParseError, analyze_file};
use std::io::Write;

fn temp_mp4(bytes: &[u8]) -> tempfile::NamedTempFile {
    let mut f = tempfile::NamedTempFile::new().unwrap();
    f.write_all(bytes).unwrap();
    f.flush().unwrap();
    f
}

#[test]
fn analyze_file_reads_whole_tree() {
    let data = cat(&[ftyp(), fragment(3, 1, 512)]);
    let f = temp_mp4(&data);

    let tree = analyze_file(f.path()).expect("analyze_file failed");
    assert_eq!(tree.len, data.len() as u64);
    assert_eq!(tree.boxes.len(), 2);
    assert!(!tree.truncated);
}

#[test]
fn missing_file_is_open_failure() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.mp4");

    match analyze_file(&path) {
        Err(ParseError::FileOpen { path: p, .. }) => assert_eq!(p, path),
        other => panic!("expected FileOpen, got {:?}", other),
    }
}

#[test]
fn empty_file_has_no_boxes() {
    let f = temp_mp4(&[]);
    let tree = analyze_file(f.path()).unwrap();
    assert_eq!(tree.len, 0);
    assert!(tree.boxes.is_empty());
}

#[test]
fn tree_serializes_to_json() {
    let f = temp_mp4(&cat(&[ftyp(), fragment(3, 1, 512)]));
    let tree = analyze_file(f.path()).unwrap();

    let v = serde_json::to_value(&tree).unwrap();
    assert_eq!(v["boxes"][0]["hdr"]["typ"], "ftyp");
    assert_eq!(v["boxes"][0]["kind"]["ftyp"]["major_brand"], "iso6");

    let moof = &v["boxes"][1];
    assert_eq!(moof["hdr"]["size"], 108);
    let traf = &moof["kind"]["container"][1];
    let trun = &traf["kind"]["container"][2]["kind"]["trun"];
    assert_eq!(trun["sample_count"], 2);
    assert_eq!(trun["samples"][1]["composition_time_offset"], 2048);
    assert_eq!(traf["kind"]["container"][1]["kind"]["tfdt"]["base_media_decode_time"], 512);
}

#[test]
fn huge_extended_size_stops_cleanly_on_a_real_file() {
    // mdat declaring a 64-bit size far beyond any seekable offset
    let mut mdat = Vec::new();
    mdat.extend_from_slice(&1u32.to_be_bytes());
    mdat.extend_from_slice(b"mdat");
    mdat.extend_from_slice(&0xFFFF_FFFF_FFFF_FF00u64.to_be_bytes());
    mdat.extend_from_slice(&[0xAB; 32]);
    let data = cat(&[ftyp(), mdat]);
    let f = temp_mp4(&data);

    let tree = analyze_file(f.path()).expect("oversized box must not be an io error");
    assert!(tree.truncated);
    assert_eq!(tree.boxes.len(), 2);
    assert_eq!(tree.boxes[1].hdr.size, 0xFFFF_FFFF_FFFF_FF00);

    // same outcome as reading from memory
    let mem = mp4analyzer::parse_reader(std::io::Cursor::new(data)).unwrap();
    assert_eq!(mem.truncated, tree.truncated);
    assert_eq!(mem.boxes.len(), tree.boxes.len());
}
