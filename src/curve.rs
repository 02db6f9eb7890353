// Curve smoothing for the vine.
// The whole trail is the control polygon of one Bezier curve of degree n = samples - 1.
// For each of segments + 1 evenly spaced t, position, opacity and color channels are the same
// Bernstein-weighted sum C(n, i) * t^i * (1 - t)^(n - i) over all samples.
// Pure: the result depends only on the input slice.

use crate::trail::MotionSample;
use crate::types::Point;

/// Minimum number of samples that defines a curve.
pub const MIN_CONTROL_POINTS: usize = 3;

/// A point on the vine for this frame only.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CurvePoint {
    pub pos: Point,
    pub opacity: f32,
    /// Blended RGB, kept fractional until the final draw.
    pub color: [f32; 3],
}

impl CurvePoint {
    pub fn from_sample(s: &MotionSample) -> Self {
        Self {
            pos: s.pos,
            opacity: s.opacity,
            color: [s.color.r as f32, s.color.g as f32, s.color.b as f32],
        }
    }
}

/// Smooth `samples` into `segments + 1` curve points.
/// Fewer than three samples give an empty curve.
pub fn smooth(samples: &[MotionSample], segments: usize) -> Vec<CurvePoint> {
    if samples.len() < MIN_CONTROL_POINTS || segments == 0 {
        return Vec::new();
    }

    let n = samples.len() - 1;
    let binomials = binomial_row(n);
    let mut curve = Vec::with_capacity(segments + 1);

    for step in 0..=segments {
        let t = step as f64 / segments as f64;
        let u = 1.0 - t;
        let (mut x, mut y, mut a) = (0.0f64, 0.0f64, 0.0f64);
        let mut rgb = [0.0f64; 3];

        for (i, s) in samples.iter().enumerate() {
            let w = binomials[i] * t.powi(i as i32) * u.powi((n - i) as i32);
            if w == 0.0 {
                continue;
            }
            x += w * s.pos.x as f64;
            y += w * s.pos.y as f64;
            a += w * s.opacity as f64;
            rgb[0] += w * s.color.r as f64;
            rgb[1] += w * s.color.g as f64;
            rgb[2] += w * s.color.b as f64;
        }

        curve.push(CurvePoint {
            pos: Point::new(x as f32, y as f32),
            opacity: a as f32,
            color: [rgb[0] as f32, rgb[1] as f32, rgb[2] as f32],
        });
    }
    curve
}

/// The raw samples as vine points, for the unsmoothed look.
/// Fewer than two samples give nothing to draw.
pub fn polyline(samples: &[MotionSample]) -> Vec<CurvePoint> {
    if samples.len() < 2 {
        return Vec::new();
    }
    samples.iter().map(CurvePoint::from_sample).collect()
}

/// `C(n, 0..=n)` as floats. f64 holds the middle terms up to n ~ 1000,
/// well beyond any trail capacity.
fn binomial_row(n: usize) -> Vec<f64> {
    let mut row = Vec::with_capacity(n + 1);
    let mut c = 1.0f64;
    row.push(c);
    for i in 0..n {
        c = c * (n - i) as f64 / (i + 1) as f64;
        row.push(c);
    }
    row
}
