//! Segment-style numeric glyphs for tick labels.
//!
//! Only digits, `-` and `.` are drawn; anything else advances the pen
//! without ink. Glyphs are stroked line segments, so no font is needed.

use tiny_skia::{LineCap, LineJoin, Paint, PathBuilder, Pixmap, Stroke, Transform};

/// Glyph width as a fraction of its height.
const ASPECT: f32 = 0.55;
/// Gap between glyphs as a fraction of the height.
const SPACING: f32 = 0.25;

/// Horizontal placement of a label relative to its anchor point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Left,
    Center,
    Right,
}

type Segment = ((f32, f32), (f32, f32));

/// Segments of `ch` in a box centered on the origin.
fn segments(ch: char, half_w: f32, half_h: f32) -> Vec<Segment> {
    let top = ((-half_w, -half_h), (half_w, -half_h));
    let middle = ((-half_w, 0.0), (half_w, 0.0));
    let bottom = ((-half_w, half_h), (half_w, half_h));
    let upper_left = ((-half_w, -half_h), (-half_w, 0.0));
    let upper_right = ((half_w, -half_h), (half_w, 0.0));
    let lower_left = ((-half_w, 0.0), (-half_w, half_h));
    let lower_right = ((half_w, 0.0), (half_w, half_h));

    match ch {
        '0' => vec![top, upper_right, lower_right, bottom, lower_left, upper_left],
        '1' => vec![((0.0, -half_h), (0.0, half_h))],
        '2' => vec![top, upper_right, middle, lower_left, bottom],
        '3' => vec![top, upper_right, middle, lower_right, bottom],
        '4' => vec![upper_left, middle, upper_right, lower_right],
        '5' => vec![top, upper_left, middle, lower_right, bottom],
        '6' => vec![top, upper_left, lower_left, bottom, lower_right, middle],
        '7' => vec![top, ((half_w, -half_h), (0.0, half_h))],
        '8' => vec![top, upper_right, lower_right, bottom, lower_left, upper_left, middle],
        '9' => vec![middle, upper_left, top, upper_right, lower_right, bottom],
        '-' => vec![middle],
        '.' => vec![((0.0, half_h * 0.8), (0.0, half_h))],
        _ => Vec::new(),
    }
}

fn advance(ch: char, height: f32) -> f32 {
    let w = if ch == '.' { height * ASPECT * 0.4 } else { height * ASPECT };
    w + height * SPACING
}

/// Width of `text` drawn at `height` pixels.
pub fn text_width(text: &str, height: f32) -> f32 {
    let total: f32 = text.chars().map(|c| advance(c, height)).sum();
    (total - height * SPACING).max(0.0)
}

/// Draw `text` vertically centered on `y`, anchored horizontally at `x`.
pub fn draw_text(
    pixmap: &mut Pixmap,
    text: &str,
    x: f32,
    y: f32,
    height: f32,
    anchor: Anchor,
    paint: &Paint,
) {
    let width = text_width(text, height);
    let mut pen = match anchor {
        Anchor::Left => x,
        Anchor::Center => x - width / 2.0,
        Anchor::Right => x - width,
    };

    let mut stroke = Stroke::default();
    stroke.width = (height * 0.12).max(1.0);
    stroke.line_cap = LineCap::Round;
    stroke.line_join = LineJoin::Round;

    let half_h = height / 2.0;
    for ch in text.chars() {
        let step = advance(ch, height);
        let glyph_w = step - height * SPACING;
        let cx = pen + glyph_w / 2.0;

        let mut pb = PathBuilder::new();
        for ((x1, y1), (x2, y2)) in segments(ch, glyph_w / 2.0, half_h) {
            pb.move_to(cx + x1, y + y1);
            pb.line_to(cx + x2, y + y2);
        }
        if let Some(path) = pb.finish() {
            pixmap.stroke_path(&path, paint, &stroke, Transform::identity(), None);
        }

        pen += step;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tiny_skia::Color;

    #[test]
    fn test_known_glyphs_have_segments() {
        for ch in "0123456789-.".chars() {
            assert!(!segments(ch, 1.0, 2.0).is_empty(), "no segments for {}", ch);
        }
        assert!(segments('x', 1.0, 2.0).is_empty());
        assert_eq!(segments('8', 1.0, 2.0).len(), 7);
    }

    #[test]
    fn test_text_width_grows_with_length() {
        assert_eq!(text_width("", 10.0), 0.0);
        assert!(text_width("100", 10.0) > text_width("10", 10.0));
        assert!(text_width("1.5", 10.0) < text_width("105", 10.0));
    }

    #[test]
    fn test_draw_text_inks_pixels() {
        let mut pixmap = Pixmap::new(40, 20).unwrap();
        let mut paint = Paint::default();
        paint.set_color(Color::BLACK);
        draw_text(&mut pixmap, "42", 20.0, 10.0, 10.0, Anchor::Center, &paint);
        assert!(pixmap.pixels().iter().any(|p| p.alpha() > 0));
    }
}
