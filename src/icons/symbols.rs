//! Toolbar symbol icons: plus, minus, undo, natural.

use svg::Document;
use svg::node::element::{Line, Path, Polygon};

use super::layout::Layout;

/// Half-length of the plus/minus strokes.
const CROSS_ARM: f64 = 40.0;

pub fn draw_plus(layout: &Layout) -> Document {
    super::canvas(layout)
        .add(horizontal_bar(layout))
        .add(stroke(
            layout.hmid(),
            layout.vmid() - CROSS_ARM,
            layout.hmid(),
            layout.vmid() + CROSS_ARM,
            5,
        ))
}

pub fn draw_minus(layout: &Layout) -> Document {
    super::canvas(layout).add(horizontal_bar(layout))
}

/// A solid arrowhead with an elliptical-arc tail sweeping behind it.
pub fn draw_undo(layout: &Layout) -> Document {
    let arrow_x = 30.0;
    let arrow_y = 35.0;
    let arrow_width = 20.0;
    let arrow_height = 13.0;
    let tail_width = 70.0;
    let tail_height = 30.0;
    let tail_thickness = 7.0;

    let tip_x = arrow_x + arrow_width;
    // Outer arc down the right side, a short close, then the inner arc
    // back up. The two radii differ by the tail thickness.
    let tail = format!(
        "M {} {} a {} {} 180 0 1 0,{} l 0 {} A {} {} 180 0 0 {},{}",
        tip_x,
        arrow_y - tail_thickness / 2.0,
        tail_width,
        tail_height,
        arrow_height + tail_height,
        -tail_thickness,
        tail_width - tail_thickness,
        tail_height - tail_thickness,
        tip_x,
        arrow_y + tail_thickness / 2.0,
    );

    super::canvas(layout)
        .add(Polygon::new().set("fill", "black").set(
            "points",
            format!(
                "{},{} {},{} {},{}",
                arrow_x,
                arrow_y,
                tip_x,
                arrow_y + arrow_height,
                tip_x,
                arrow_y - arrow_height
            ),
        ))
        .add(Path::new().set("d", tail))
}

/// The natural accidental: two verticals joined by two thick slanted bars.
pub fn draw_natural(layout: &Layout) -> Document {
    let h = layout.hmid();
    let v = layout.vmid();
    let x_gap = 10.0;
    let y_gap = 20.0;
    let y_off = 8.0;
    let y_height = 40.0;
    let y_shift = 3.0;

    super::canvas(layout)
        .add(stroke(
            h - x_gap,
            v + y_gap / 2.0 + y_shift + 3.5,
            h - x_gap,
            v - y_height + y_gap / 2.0,
            4,
        ))
        .add(stroke(
            h + x_gap,
            v - y_off - y_gap / 2.0 + y_shift - 3.5,
            h + x_gap,
            v + y_height - y_gap / 2.0,
            4,
        ))
        .add(stroke(
            h - x_gap,
            v + y_gap / 2.0 + y_shift,
            h + x_gap,
            v - y_off + y_gap / 2.0 + y_shift,
            7,
        ))
        .add(stroke(
            h - x_gap,
            v - y_gap / 2.0 + y_shift,
            h + x_gap,
            v - y_off - y_gap / 2.0 + y_shift,
            7,
        ))
}

fn horizontal_bar(layout: &Layout) -> Line {
    stroke(
        layout.hmid() - CROSS_ARM,
        layout.vmid(),
        layout.hmid() + CROSS_ARM,
        layout.vmid(),
        5,
    )
}

fn stroke(x1: f64, y1: f64, x2: f64, y2: f64, width: u32) -> Line {
    Line::new()
        .set("x1", x1)
        .set("y1", y1)
        .set("x2", x2)
        .set("y2", y2)
        .set("stroke", "black")
        .set("stroke-width", width)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plus_is_two_strokes_minus_is_one() {
        let layout = Layout::default();
        assert_eq!(draw_plus(&layout).to_string().matches("<line").count(), 2);
        assert_eq!(draw_minus(&layout).to_string().matches("<line").count(), 1);
    }

    #[test]
    fn undo_tail_arc_is_exact() {
        let layout = Layout::default();
        let svg = draw_undo(&layout).to_string();
        assert!(svg.contains("M 50 31.5 a 70 30 180 0 1 0,43 l 0 -7 A 63 23 180 0 0 50,38.5"));
        assert!(svg.contains(r#"points="30,35 50,48 50,22""#));
    }

    #[test]
    fn natural_is_four_strokes() {
        let layout = Layout::default();
        let svg = draw_natural(&layout).to_string();
        assert_eq!(svg.matches("<line").count(), 4);
        // Verticals at width 4, slanted bars at width 7.
        assert_eq!(svg.matches(r#"stroke-width="4""#).count(), 2);
        assert_eq!(svg.matches(r#"stroke-width="7""#).count(), 2);
    }

    #[test]
    fn regeneration_is_byte_identical() {
        let layout = Layout::default();
        assert_eq!(
            draw_undo(&layout).to_string(),
            draw_undo(&layout).to_string()
        );
        assert_eq!(
            draw_natural(&layout).to_string(),
            draw_natural(&layout).to_string()
        );
    }
}
