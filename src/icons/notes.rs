//! Note-length input icons, semibreve through hemidemisemiquaver.
//!
//! Each icon is a note head on the shared canvas, optionally with a stem and
//! rhythmic tails. Three geometry rules give the icons their hand-set look:
//!
//! - The head is an ellipse rotated −30° about its own centre when the note
//!   has a stem, and left unrotated otherwise.
//! - Unfilled heads (semibreve, minim) are hollowed by an SVG mask rather
//!   than a drawn outline: a full-canvas white rectangle with a black inner
//!   ellipse carving out the centre. The inner ellipse is rotated 60° for
//!   the stemless semibreve so the hollow tracks the unrotated head.
//! - The stem attaches where it visually touches the rotated ellipse's
//!   edge, offset from the centre by `rx·cos 30°` / `rx·sin 30°`.
//!
//! Tails hang off the stem bottom, one every `tail_gap` units counted back
//! up the stem.

use svg::Document;
use svg::node::element::{Ellipse, Line, Mask, Rectangle};

use super::layout::{Layout, stem_attachment};

const HEAD_RX: f64 = 10.0;
const HEAD_RY: f64 = 7.0;
const STROKE_WIDTH: f64 = 3.0;
const TAIL_WIDTH: f64 = 20.0;
const TAIL_HEIGHT: f64 = 10.0;

/// Shape parameters for one note-length icon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoteSpec {
    pub name: &'static str,
    /// Solid head, or hollowed by the centre mask.
    pub filled: bool,
    pub stem: bool,
    pub tails: u32,
}

/// Every note length the score editor can input.
pub const NOTES: &[NoteSpec] = &[
    NoteSpec {
        name: "semibreve",
        filled: false,
        stem: false,
        tails: 0,
    },
    NoteSpec {
        name: "minim",
        filled: false,
        stem: true,
        tails: 0,
    },
    NoteSpec {
        name: "crotchet",
        filled: true,
        stem: true,
        tails: 0,
    },
    NoteSpec {
        name: "quaver",
        filled: true,
        stem: true,
        tails: 1,
    },
    NoteSpec {
        name: "semiquaver",
        filled: true,
        stem: true,
        tails: 2,
    },
    NoteSpec {
        name: "demisemiquaver",
        filled: true,
        stem: true,
        tails: 3,
    },
    NoteSpec {
        name: "hemidemisemiquaver",
        filled: true,
        stem: true,
        tails: 4,
    },
];

/// Draw one note-length icon.
pub fn draw_note(layout: &Layout, spec: &NoteSpec) -> Document {
    let cx = layout.hmid();
    // Stemmed heads sit high so the stem has room to drop.
    let cy = if spec.stem { 30.0 } else { layout.vmid() };

    let mut doc = super::canvas(layout);

    let mut head = Ellipse::new()
        .set("cx", cx)
        .set("cy", cy)
        .set("rx", HEAD_RX)
        .set("ry", HEAD_RY)
        .set("stroke", "black")
        .set("stroke-width", STROKE_WIDTH)
        .set("fill", "black");
    if spec.stem {
        head = head.set("transform", rotate(-30.0, cx, cy));
    }

    if !spec.filled {
        // Mask ids land in the output file; derive them from the icon name
        // so regeneration is byte-identical.
        let mask_id = format!("hollow-{}", spec.name);
        let (mask_rx, mask_angle) = if spec.stem { (10.0, 0.0) } else { (8.0, 60.0) };
        let mut inner = Ellipse::new()
            .set("cx", cx)
            .set("cy", cy)
            .set("rx", mask_rx)
            .set("ry", 4.0)
            .set("fill", "black");
        if mask_angle != 0.0 {
            inner = inner.set("transform", rotate(mask_angle, cx, cy));
        }
        let mask = Mask::new()
            .set("id", mask_id.as_str())
            .add(
                Rectangle::new()
                    .set("x", 0)
                    .set("y", 0)
                    .set("width", layout.width)
                    .set("height", layout.height)
                    .set("fill", "white"),
            )
            .add(inner);
        doc = doc.add(mask);
        head = head.set("mask", format!("url(#{mask_id})"));
    }

    doc = doc.add(head);

    if spec.stem {
        let (dx, dy) = stem_attachment(HEAD_RX);
        let stem_x = cx - dx;
        let stem_top = cy + dy;
        let stem_bottom = stem_top + layout.stem_length;
        doc = doc.add(
            Line::new()
                .set("x1", stem_x)
                .set("y1", stem_top)
                .set("x2", stem_x)
                .set("y2", stem_bottom)
                .set("stroke", "black")
                .set("stroke-width", STROKE_WIDTH),
        );

        for n in 0..spec.tails {
            let y = stem_bottom - layout.tail_gap * f64::from(n);
            doc = doc.add(
                Line::new()
                    .set("x1", stem_x)
                    .set("y1", y)
                    .set("x2", stem_x + TAIL_WIDTH)
                    .set("y2", y - TAIL_HEIGHT)
                    .set("stroke", "black")
                    .set("stroke-width", STROKE_WIDTH),
            );
        }
    }

    doc
}

fn rotate(angle: f64, cx: f64, cy: f64) -> String {
    format!("rotate({angle} {cx} {cy})")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(name: &str) -> String {
        let layout = Layout::default();
        let spec = NOTES.iter().find(|s| s.name == name).unwrap();
        draw_note(&layout, spec).to_string()
    }

    #[test]
    fn regeneration_is_byte_identical() {
        for spec in NOTES {
            assert_eq!(rendered(spec.name), rendered(spec.name), "{}", spec.name);
        }
    }

    #[test]
    fn tail_count_matches_table() {
        // One <line> per tail, plus the stem itself.
        for spec in NOTES {
            let lines = rendered(spec.name).matches("<line").count() as u32;
            let expected = if spec.stem { spec.tails + 1 } else { 0 };
            assert_eq!(lines, expected, "{}", spec.name);
        }
    }

    #[test]
    fn unfilled_heads_carry_a_mask() {
        assert!(rendered("semibreve").contains("<mask"));
        assert!(rendered("minim").contains("<mask"));
        assert!(!rendered("crotchet").contains("<mask"));
    }

    #[test]
    fn mask_id_is_stable_per_icon() {
        let svg = rendered("minim");
        assert!(svg.contains(r##"url(#hollow-minim)"##));
        assert!(svg.contains(r#"id="hollow-minim""#));
    }

    #[test]
    fn stemmed_head_is_rotated() {
        let svg = rendered("crotchet");
        assert!(svg.contains("rotate(-30 50 30)"));
    }

    #[test]
    fn stemless_head_is_not_rotated() {
        let svg = rendered("semibreve");
        assert!(!svg.contains("rotate(-30"));
        // The semibreve hollow runs at 60° across the unrotated head.
        assert!(svg.contains("rotate(60 50 50)"));
    }

    #[test]
    fn stem_starts_at_head_edge() {
        let (dx, dy) = stem_attachment(HEAD_RX);
        let svg = rendered("minim");
        assert!(svg.contains(&format!(r#"x1="{}""#, 50.0 - dx)));
        assert!(svg.contains(&format!(r#"y1="{}""#, 30.0 + dy)));
    }
}
