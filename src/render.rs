//! Human-readable tree output.

use crate::boxes::{BoxRef, FtypBox, NodeKind, TfhdBox, TrunBox};
use crate::known_boxes::KnownBox;
use std::fmt::Write as _;
use std::io::{self, Write};

/// How much of each box to print.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    /// Type and size only.
    Low,
    /// Offsets, names, version/flags and decoded scalar fields.
    #[default]
    Middle,
    /// Everything, including one line per compatible brand and per track
    /// run sample.
    High,
}

#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    pub level: Level,
    /// Deepest nesting level printed; 0 prints only the given boxes.
    pub max_depth: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { level: Level::Middle, max_depth: 64 }
    }
}

/// Print each box and its subtree, two spaces of indent per level.
pub fn render_tree<'a, W: Write>(
    w: &mut W,
    boxes: impl IntoIterator<Item = &'a BoxRef>,
    opts: &RenderOptions,
) -> io::Result<()> {
    for b in boxes {
        print_box(w, b, 0, opts)?;
    }
    Ok(())
}

pub fn render_to_string<'a>(
    boxes: impl IntoIterator<Item = &'a BoxRef>,
    opts: &RenderOptions,
) -> String {
    let mut out = Vec::new();
    // writing into a Vec cannot fail
    let _ = render_tree(&mut out, boxes, opts);
    String::from_utf8_lossy(&out).into_owned()
}

fn print_box<W: Write>(w: &mut W, b: &BoxRef, depth: usize, opts: &RenderOptions) -> io::Result<()> {
    let indent = "  ".repeat(depth);
    let hdr = &b.hdr;

    if opts.level == Level::Low {
        writeln!(w, "{indent}{} size={}", hdr.typ, hdr.size)?;
    } else {
        let mut line = format!(
            "{indent}{:>8} {:>10} {} ({})",
            format!("{:#x}", hdr.start),
            hdr.size,
            hdr.typ,
            KnownBox::from(hdr.typ).full_name()
        );
        if opts.level == Level::High {
            let _ = write!(line, " hdr={}", hdr.header_size);
        }
        if let Some(p) = b.kind.prefix() {
            let _ = write!(line, " ver={} flags=0x{:06x}", p.version, p.flags);
        }
        match &b.kind {
            NodeKind::Container(_) | NodeKind::Opaque => {
                let _ = write!(line, " [{}]", b.kind.label());
            }
            kind => {
                let _ = write!(line, " {}", summary(kind));
            }
        }
        writeln!(w, "{line}")?;

        if opts.level == Level::High {
            match &b.kind {
                NodeKind::Ftyp(ftyp) => print_brands(w, ftyp, &indent)?,
                NodeKind::Trun(trun) => print_samples(w, trun, &indent)?,
                _ => {}
            }
        }
    }

    if depth < opts.max_depth {
        for c in b.children() {
            print_box(w, c, depth + 1, opts)?;
        }
    }
    Ok(())
}

fn summary(kind: &NodeKind) -> String {
    let mut s = String::new();
    match kind {
        NodeKind::Ftyp(f) => {
            let brands: Vec<String> = f.compatible_brands.iter().map(|b| b.to_string()).collect();
            let _ = write!(
                s,
                "major={} minor={} compatible=[{}]",
                f.major_brand,
                f.minor_version,
                brands.join(", ")
            );
        }
        NodeKind::Mfhd(m) => {
            let _ = write!(s, "sequence_number={}", m.sequence_number);
        }
        NodeKind::Tfhd(t) => {
            let _ = write!(s, "track_id={}", t.track_id);
            let p = &t.prefix;
            if p.has(TfhdBox::BASE_DATA_OFFSET_PRESENT) {
                let _ = write!(s, " base_data_offset={}", t.base_data_offset);
            }
            if p.has(TfhdBox::SAMPLE_DESCRIPTION_INDEX_PRESENT) {
                let _ = write!(s, " sample_description_index={}", t.sample_description_index);
            }
            if p.has(TfhdBox::DEFAULT_SAMPLE_DURATION_PRESENT) {
                let _ = write!(s, " default_sample_duration={}", t.default_sample_duration);
            }
            if p.has(TfhdBox::DEFAULT_SAMPLE_SIZE_PRESENT) {
                let _ = write!(s, " default_sample_size={}", t.default_sample_size);
            }
            if p.has(TfhdBox::DEFAULT_SAMPLE_FLAGS_PRESENT) {
                let _ = write!(s, " default_sample_flags=0x{:08x}", t.default_sample_flags);
            }
            if t.duration_is_empty {
                s.push_str(" duration_is_empty");
            }
            if t.default_base_is_moof {
                s.push_str(" default_base_is_moof");
            }
        }
        NodeKind::Tfdt(t) => {
            let _ = write!(s, "base_media_decode_time={}", t.base_media_decode_time);
        }
        NodeKind::Trun(t) => {
            let _ = write!(s, "sample_count={}", t.sample_count);
            if t.prefix.has(TrunBox::DATA_OFFSET_PRESENT) {
                let _ = write!(s, " data_offset={}", t.data_offset);
            }
            if t.prefix.has(TrunBox::FIRST_SAMPLE_FLAGS_PRESENT) {
                let _ = write!(s, " first_sample_flags=0x{:08x}", t.first_sample_flags);
            }
        }
        NodeKind::Container(_) | NodeKind::Opaque => {}
    }
    s
}

fn print_brands<W: Write>(w: &mut W, ftyp: &FtypBox, indent: &str) -> io::Result<()> {
    for (i, brand) in ftyp.compatible_brands.iter().enumerate() {
        writeln!(w, "{indent}    brand[{i}]={brand}")?;
    }
    Ok(())
}

fn print_samples<W: Write>(w: &mut W, trun: &TrunBox, indent: &str) -> io::Result<()> {
    for (i, smp) in trun.samples.iter().enumerate() {
        writeln!(
            w,
            "{indent}    #{i} duration={} size={} flags=0x{:08x} cto={}",
            smp.duration, smp.size, smp.flags, smp.composition_time_offset
        )?;
    }
    Ok(())
}
