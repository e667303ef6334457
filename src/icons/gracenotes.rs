//! Gracenote embellishment input icons.
//!
//! Each icon shows a complete embellishment the way it appears on a stave:
//! a run of small note heads beamed together under a three-line cutting
//! bar, drawn over faded stave lines so the pitches read at a glance.
//!
//! Pitch vertical positions come from a fixed table: low G sits three stave
//! gaps below the top line and each step up the scale rises half a gap
//! (5 units on the default canvas).

use svg::Document;
use svg::node::element::{Ellipse, Line};

use super::layout::{Layout, stem_attachment};

const HEAD_RX: f64 = 4.0;
const HEAD_RY: f64 = 2.7;
/// Left edge of the embellishment spread.
const LEFT_X: f64 = 25.0;
/// Top of the gracenote stems, where the cutting bar sits.
const BAR_Y: f64 = 10.0;

/// The nine pitches a gracenote head can sit on, low G up to high A.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pitch {
    G,
    A,
    B,
    C,
    D,
    E,
    F,
    HighG,
    HighA,
}

impl Pitch {
    /// Vertical position of a head on this pitch, in stave steps below the
    /// top line (half-gap resolution, high A sits above the stave).
    fn steps(self) -> f64 {
        match self {
            Pitch::G => 3.0,
            Pitch::A => 2.5,
            Pitch::B => 2.0,
            Pitch::C => 1.5,
            Pitch::D => 1.0,
            Pitch::E => 0.5,
            Pitch::F => 0.0,
            Pitch::HighG => -0.5,
            Pitch::HighA => -1.0,
        }
    }

    fn height(self, layout: &Layout) -> f64 {
        layout.stave_top + self.steps() * layout.stave_gap
    }
}

/// An embellishment: a named sequence of gracenote pitches.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmbellishmentSpec {
    pub name: &'static str,
    pub pitches: &'static [Pitch],
}

use Pitch::{A, C, D, E, F, G, HighG};

/// Every embellishment the score editor can input.
pub const EMBELLISHMENTS: &[EmbellishmentSpec] = &[
    EmbellishmentSpec {
        name: "doubling",
        pitches: &[HighG, C, D],
    },
    EmbellishmentSpec {
        name: "throw-d",
        pitches: &[G, D, C],
    },
    EmbellishmentSpec {
        name: "grip",
        pitches: &[G, D, G],
    },
    EmbellishmentSpec {
        name: "birl",
        pitches: &[G, A, G],
    },
    EmbellishmentSpec {
        name: "g-gracenote-birl",
        pitches: &[HighG, A, G, A, G],
    },
    EmbellishmentSpec {
        name: "toarluath",
        pitches: &[G, D, G, E],
    },
    EmbellishmentSpec {
        name: "crunluath",
        pitches: &[G, D, G, E, A, F, A],
    },
    EmbellishmentSpec {
        name: "edre",
        pitches: &[E, A, F, A],
    },
];

/// Draw one embellishment icon: stave lines, then heads with stems, then
/// the cutting bar across the stem tops.
pub fn draw_embellishment(layout: &Layout, spec: &EmbellishmentSpec) -> Document {
    let mut doc = add_stave_lines(super::canvas(layout), layout);

    let total_width = layout.width - 2.0 * LEFT_X;
    let note_width = total_width / (spec.pitches.len() - 1) as f64;
    let (dx, edge_dy) = stem_attachment(HEAD_RX);
    // Start the stem a unit inside the head so the joint reads solid at
    // this scale.
    let dy = edge_dy - 1.0;

    for (i, pitch) in spec.pitches.iter().enumerate() {
        let hx = LEFT_X + i as f64 * note_width;
        let hy = pitch.height(layout);
        doc = doc
            .add(
                Ellipse::new()
                    .set("cx", hx)
                    .set("cy", hy)
                    .set("rx", HEAD_RX)
                    .set("ry", HEAD_RY)
                    .set("transform", format!("rotate(-30 {hx} {hy})"))
                    .set("fill", "black"),
            )
            .add(
                Line::new()
                    .set("x1", hx + dx)
                    .set("y1", hy - dy)
                    .set("x2", hx + dx)
                    .set("y2", BAR_Y)
                    .set("stroke", "black")
                    .set("stroke-width", 1),
            );
    }

    for n in 0..3 {
        let y = BAR_Y + 1.0 + f64::from(n) * 3.0;
        doc = doc.add(
            Line::new()
                .set("x1", LEFT_X + dx)
                .set("y1", y)
                .set("x2", LEFT_X + total_width + dx)
                .set("y2", y)
                .set("stroke", "black")
                .set("stroke-width", 2),
        );
    }

    doc
}

/// Draw the single-gracenote icon: one oversized head with a flagged stem.
pub fn draw_single(layout: &Layout) -> Document {
    let rx = 8.0;
    let ry = 5.0;
    let (hx, hy) = (layout.hmid(), 60.0);
    let stem_top = 20.0;

    let (dx, edge_dy) = stem_attachment(rx);
    let dy = edge_dy - 2.0;
    let stem_x = hx + dx;

    let mut doc = super::canvas(layout).add(
        Ellipse::new()
            .set("cx", hx)
            .set("cy", hy)
            .set("rx", rx)
            .set("ry", ry)
            .set("transform", format!("rotate(-30 {hx} {hy})"))
            .set("fill", "black"),
    );

    doc = doc.add(
        Line::new()
            .set("x1", stem_x)
            .set("y1", hy - dy)
            .set("x2", stem_x)
            .set("y2", stem_top)
            .set("stroke", "black")
            .set("stroke-width", 2),
    );

    for n in 0..3 {
        let y = stem_top + f64::from(n) * 5.0;
        doc = doc.add(
            Line::new()
                .set("x1", stem_x)
                .set("y1", y)
                .set("x2", stem_x + 10.0)
                .set("y2", y + 10.0)
                .set("stroke", "black")
                .set("stroke-width", 2),
        );
    }

    doc
}

fn add_stave_lines(mut doc: Document, layout: &Layout) -> Document {
    for n in 0..5 {
        let y = layout.stave_top + f64::from(n) * layout.stave_gap;
        doc = doc.add(
            Line::new()
                .set("x1", 10)
                .set("y1", y)
                .set("x2", layout.width - 10.0)
                .set("y2", y)
                .set("stroke", "black")
                .set("stroke-width", 2)
                .set("opacity", 0.3),
        );
    }
    doc
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(name: &str) -> &'static EmbellishmentSpec {
        EMBELLISHMENTS.iter().find(|s| s.name == name).unwrap()
    }

    #[test]
    fn regeneration_is_byte_identical() {
        let layout = Layout::default();
        for spec in EMBELLISHMENTS {
            let a = draw_embellishment(&layout, spec).to_string();
            let b = draw_embellishment(&layout, spec).to_string();
            assert_eq!(a, b, "{}", spec.name);
        }
        assert_eq!(
            draw_single(&layout).to_string(),
            draw_single(&layout).to_string()
        );
    }

    #[test]
    fn one_head_per_pitch() {
        let layout = Layout::default();
        for spec in EMBELLISHMENTS {
            let svg = draw_embellishment(&layout, spec).to_string();
            assert_eq!(
                svg.matches("<ellipse").count(),
                spec.pitches.len(),
                "{}",
                spec.name
            );
        }
    }

    #[test]
    fn line_budget_per_icon() {
        // 5 stave lines + 3 cutting bar lines + one stem per head.
        let layout = Layout::default();
        let svg = draw_embellishment(&layout, spec("doubling")).to_string();
        assert_eq!(svg.matches("<line").count(), 5 + 3 + 3);
    }

    #[test]
    fn pitch_heights_step_by_half_gaps() {
        let layout = Layout::default();
        assert_eq!(Pitch::G.height(&layout), 65.0);
        assert_eq!(Pitch::A.height(&layout), 60.0);
        assert_eq!(Pitch::F.height(&layout), 35.0);
        assert_eq!(Pitch::HighA.height(&layout), 25.0);
    }

    #[test]
    fn heads_spread_across_the_canvas() {
        let layout = Layout::default();
        // crunluath has 7 heads over a 50-unit spread.
        let svg = draw_embellishment(&layout, spec("crunluath")).to_string();
        let step = 50.0 / 6.0;
        assert!(svg.contains(&format!(r#"cx="{}""#, 25.0)));
        assert!(svg.contains(&format!(r#"cx="{}""#, 25.0 + step)));
        assert!(svg.contains(&format!(r#"cx="{}""#, 25.0 + 6.0 * step)));
    }

    #[test]
    fn single_has_three_tails() {
        let layout = Layout::default();
        let svg = draw_single(&layout).to_string();
        // stem + 3 tails
        assert_eq!(svg.matches("<line").count(), 4);
    }
}
