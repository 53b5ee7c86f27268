//! Box selection for the `--find` option.
//!
//! A bare 4CC (`trun`) matches at any depth. A dotted path with optional
//! indices (`moof.traf[0].tfhd`) is resolved from the top level down.

use crate::boxes::{BoxRef, FourCC};

pub fn select<'a>(roots: &'a [BoxRef], sel: &str) -> Vec<&'a BoxRef> {
    if sel.contains('.') || sel.contains('[') {
        select_by_path(roots, sel)
    } else {
        let mut out = Vec::new();
        if let Some(cc) = FourCC::from_str(sel) {
            find_by_type(roots, cc, &mut out);
        }
        out
    }
}

/// Collect every box of type `cc` in pre-order.
pub fn find_by_type<'a>(list: &'a [BoxRef], cc: FourCC, out: &mut Vec<&'a BoxRef>) {
    for b in list {
        if b.hdr.typ == cc {
            out.push(b);
        }
        find_by_type(b.children(), cc, out);
    }
}

// ---------- Filter path: moof.traf[0].trun ----------

pub fn select_by_path<'a>(roots: &'a [BoxRef], path: &str) -> Vec<&'a BoxRef> {
    let mut current: Vec<&'a BoxRef> = Vec::new();

    for (depth, seg) in path.split('.').enumerate() {
        let (name, idx) = parse_segment(seg);
        let Some(fourcc) = FourCC::from_str(name) else {
            return Vec::new();
        };

        let mut next = Vec::new();
        if depth == 0 {
            pick(roots.iter(), fourcc, idx, &mut next);
        } else {
            // indices count within each parent, not across the whole set
            for &b in &current {
                pick(b.children().iter(), fourcc, idx, &mut next);
            }
        }

        current = next;
        if current.is_empty() {
            break;
        }
    }

    current
}

fn pick<'a>(
    candidates: impl Iterator<Item = &'a BoxRef>,
    fourcc: FourCC,
    idx: Option<usize>,
    out: &mut Vec<&'a BoxRef>,
) {
    let mut matches = candidates.filter(|b| b.hdr.typ == fourcc);
    match idx {
        Some(i) => out.extend(matches.nth(i)),
        None => out.extend(matches),
    }
}

fn parse_segment(seg: &str) -> (&str, Option<usize>) {
    if let Some(l) = seg.find('[') {
        let name = &seg[..l];
        if let Some(r) = seg[l + 1..].find(']') {
            let idx_str = &seg[l + 1..l + 1 + r];
            let idx = idx_str.parse::<usize>().ok();
            return (name, idx);
        }
        (name, None)
    } else {
        (seg, None)
    }
}
