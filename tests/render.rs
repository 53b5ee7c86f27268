mod common;

use common::{boxed, cat, fragment, ftyp};
use mp4analyzer::parse_reader;
use mp4analyzer::render::{Level, RenderOptions, render_to_string};
use mp4analyzer::select::select;
use std::io::Cursor;

fn sample_tree() -> mp4analyzer::BoxTree {
    let data = cat(&[ftyp(), fragment(1, 2, 0), fragment(2, 2, 2048), boxed(b"zzzz", &[0; 3])]);
    parse_reader(Cursor::new(data)).unwrap()
}

fn opts(level: Level) -> RenderOptions {
    RenderOptions { level, ..Default::default() }
}

#[test]
fn low_level_prints_type_and_size_indented() {
    let tree = sample_tree();
    let out = render_to_string(&tree.boxes, &opts(Level::Low));
    let lines: Vec<&str> = out.lines().collect();

    assert_eq!(lines[0], "ftyp size=24");
    assert_eq!(lines[1], "moof size=108");
    assert_eq!(lines[2], "  mfhd size=16");
    assert_eq!(lines[3], "  traf size=84");
    assert_eq!(lines[4], "    tfhd size=16");
    assert_eq!(lines.last().copied(), Some("zzzz size=11"));
    // ftyp + 2 * (moof, mfhd, traf, tfhd, tfdt, trun) + zzzz
    assert_eq!(lines.len(), 14);
}

#[test]
fn middle_level_shows_names_and_fields() {
    let tree = sample_tree();
    let out = render_to_string(&tree.boxes, &opts(Level::Middle));

    assert!(out.contains("File Type Box"));
    assert!(out.contains("major=iso6 minor=512 compatible=[iso6, dash]"));
    assert!(out.contains("sequence_number=2"));
    assert!(out.contains("track_id=2 default_base_is_moof"));
    assert!(out.contains("base_media_decode_time=2048"));
    assert!(out.contains("ver=0 flags=0x000301 sample_count=2 data_offset=100"));
    assert!(out.contains("zzzz (Unknown Box) [opaque]"));
    assert!(out.contains("(Movie Fragment Box) [container]"));
    assert!(!out.contains("#0"));
    assert!(!out.contains("brand["));
}

#[test]
fn high_level_lists_brands_and_trun_samples() {
    let tree = sample_tree();
    let out = render_to_string(&tree.boxes, &opts(Level::High));
    let lines: Vec<&str> = out.lines().collect();

    assert!(lines[0].contains("ftyp (File Type Box) hdr=8"));
    assert_eq!(lines[1], "    brand[0]=iso6");
    assert_eq!(lines[2], "    brand[1]=dash");
    assert!(lines[3].contains("moof"));
    assert!(out.contains("#0 duration=1024 size=500 flags=0x00000000 cto=0"));
    assert!(out.contains("#1 duration=1024 size=300 flags=0x00000000 cto=2048"));
}

#[test]
fn max_depth_limits_nesting() {
    let tree = sample_tree();
    let o = RenderOptions { level: Level::Low, max_depth: 1 };
    let out = render_to_string(&tree.boxes, &o);

    assert!(out.contains("  traf size=84"));
    assert!(!out.contains("tfhd"));
}

#[test]
fn selected_subtrees_render_from_depth_zero() {
    let tree = sample_tree();
    let picked = select(&tree.boxes, "trun");
    assert_eq!(picked.len(), 2);

    let out = render_to_string(picked, &opts(Level::Low));
    assert_eq!(out, "trun size=44\ntrun size=44\n");
}

#[test]
fn dotted_path_selection() {
    let tree = sample_tree();

    let second = select(&tree.boxes, "moof[1].traf.tfdt");
    assert_eq!(second.len(), 1);
    let out = render_to_string(second, &opts(Level::Middle));
    assert!(out.contains("base_media_decode_time=2048"));

    assert_eq!(select(&tree.boxes, "moof.traf.tfhd").len(), 2);
    assert!(select(&tree.boxes, "moov.trak").is_empty());
    assert!(select(&tree.boxes, "nope").is_empty());
}
