// Vine stroke between consecutive vine points.
// Visual: tight pointer motion draws a thick stem, fast strokes thin out; color and fade
// are the average of each segment's two ends.

use rand::Rng;

use crate::config::VineWidth;
use crate::curve::CurvePoint;
use crate::raster::Canvas;
use crate::types::{Point, Rgba};

/// Width for a segment of length `distance`: closer points, thicker stem.
pub fn segment_width<R: Rng>(w: &VineWidth, distance: f32, rng: &mut R) -> f32 {
    let base = (w.max_width - (distance / w.distance_step).floor()).max(w.min_width);
    if w.jitter > 0.0 {
        base + rng.gen_range(-w.jitter..=w.jitter)
    } else {
        base
    }
}

/// Blend of the two ends, alpha from their averaged opacity.
pub fn segment_color(p1: &CurvePoint, p2: &CurvePoint) -> Rgba {
    let avg = |a: f32, b: f32| ((a + b) / 2.0).clamp(0.0, 255.0) as u8;
    Rgba {
        r: avg(p1.color[0], p2.color[0]),
        g: avg(p1.color[1], p2.color[1]),
        b: avg(p1.color[2], p2.color[2]),
        a: avg(p1.opacity, p2.opacity),
    }
}

pub fn draw_vine<C: Canvas, R: Rng>(canvas: &mut C, points: &[CurvePoint], width: &VineWidth, rng: &mut R) {
    for pair in points.windows(2) {
        let (p1, p2) = (&pair[0], &pair[1]);
        let w = segment_width(width, p1.pos.distance(p2.pos), rng);
        let color = segment_color(p1, p2);
        canvas.line(p1.pos, p2.pos, w, color);

        // Softer edge: a lighter hairline one pixel to the right
        if let Some(above) = width.highlight_above {
            if w > above {
                let light = Rgba { g: color.g.saturating_add(20), ..color };
                let shift = Point::new(1.0, 0.0);
                canvas.aa_line(p1.pos + shift, p2.pos + shift, light);
            }
        }
    }
}
