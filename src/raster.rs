// Software drawing onto the transparent layer, and the one-pass composite onto the screen.
// Visual: everything the vine and flowers paint lands in the layer first; the screen only
// ever sees the finished layer blended over the background color.

use crate::types::{FrameBuffer, Layer, Point, Rgba};

/// Drawing contract the vine and blooms render through.
pub trait Canvas {
    /// Straight segment `width` pixels wide.
    fn line(&mut self, a: Point, b: Point, width: f32, color: Rgba);
    /// 1-pixel anti-aliased segment.
    fn aa_line(&mut self, a: Point, b: Point, color: Rgba);
    fn fill_polygon(&mut self, points: &[Point], color: Rgba);
    fn fill_circle(&mut self, center: Point, radius: f32, color: Rgba);

    /// Anti-aliased closed outline.
    fn aa_polygon(&mut self, points: &[Point], color: Rgba) {
        if points.len() < 2 {
            return;
        }
        for i in 0..points.len() {
            let next = points[(i + 1) % points.len()];
            self.aa_line(points[i], next, color);
        }
    }
}

/// Source-over for a straight-alpha destination (the layer itself may be translucent).
#[inline]
fn blend_over(dst: Rgba, src: Rgba) -> Rgba {
    if src.a == 255 || dst.a == 0 {
        return src;
    }
    let sa = src.a as f32 / 255.0;
    let da = dst.a as f32 / 255.0;
    let oa = sa + da * (1.0 - sa);
    if oa <= 0.0 {
        return Rgba::TRANSPARENT;
    }
    let mix = |s: u8, d: u8| ((s as f32 * sa + d as f32 * da * (1.0 - sa)) / oa).round().clamp(0.0, 255.0) as u8;
    Rgba {
        r: mix(src.r, dst.r),
        g: mix(src.g, dst.g),
        b: mix(src.b, dst.b),
        a: (oa * 255.0).round().clamp(0.0, 255.0) as u8,
    }
}

/// Alpha blend a single opaque color channel.
/// Uses (x + 1 + (x >> 8)) >> 8 instead of x / 255.
#[inline]
fn blend_channel(src: u8, dst: u8, alpha: u16) -> u8 {
    let result = src as u16 * alpha + dst as u16 * (255 - alpha);
    ((result + 1 + (result >> 8)) >> 8) as u8
}

impl Layer {
    /// Blend `color` into the pixel at (x,y) if it is inside bounds.
    #[inline]
    pub fn blend_pixel(&mut self, x: i32, y: i32, color: Rgba) {
        if x < 0 || y < 0 || color.a == 0 {
            return;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return;
        }
        let idx = y * self.width + x;
        self.pixels[idx] = blend_over(self.pixels[idx], color);
    }

    /// Horizontal span x1..=x2, clipped.
    fn hline_blend(&mut self, x1: i32, x2: i32, y: i32, color: Rgba) {
        if y < 0 || y >= self.height as i32 {
            return;
        }
        let (x1, x2) = if x1 <= x2 { (x1, x2) } else { (x2, x1) };
        let x1 = x1.max(0);
        let x2 = x2.min(self.width as i32 - 1);
        for x in x1..=x2 {
            self.blend_pixel(x, y, color);
        }
    }

    /// Pixel with its alpha scaled by `coverage` in 0..1.
    #[inline]
    fn plot(&mut self, x: i32, y: i32, color: Rgba, coverage: f32) {
        let a = (color.a as f32 * coverage.clamp(0.0, 1.0)).round() as u8;
        self.blend_pixel(x, y, Rgba { a, ..color });
    }
}

impl Canvas for Layer {
    fn line(&mut self, a: Point, b: Point, width: f32, color: Rgba) {
        if width <= 1.5 {
            self.aa_line(a, b, color);
            return;
        }
        let d = b - a;
        let len = d.length();
        if len < 0.001 {
            // Degenerate segment: a dot as wide as the line
            self.fill_circle(a, width / 2.0, color);
            return;
        }
        // Quad around the segment, half the width on each side
        let n = Point::new(-d.y, d.x) / len * (width / 2.0);
        self.fill_polygon(&[a + n, b + n, b - n, a - n], color);
    }

    /// Xiaolin Wu's line.
    fn aa_line(&mut self, a: Point, b: Point, color: Rgba) {
        let (mut x0, mut y0, mut x1, mut y1) = (a.x, a.y, b.x, b.y);
        let steep = (y1 - y0).abs() > (x1 - x0).abs();
        if steep {
            std::mem::swap(&mut x0, &mut y0);
            std::mem::swap(&mut x1, &mut y1);
        }
        if x0 > x1 {
            std::mem::swap(&mut x0, &mut x1);
            std::mem::swap(&mut y0, &mut y1);
        }
        let dx = x1 - x0;
        let gradient = if dx.abs() < f32::EPSILON { 1.0 } else { (y1 - y0) / dx };

        let put = |layer: &mut Layer, x: i32, y: i32, c: f32| {
            if steep { layer.plot(y, x, color, c) } else { layer.plot(x, y, color, c) }
        };

        // first endpoint
        let xend = x0.round();
        let yend = y0 + gradient * (xend - x0);
        let xgap = 1.0 - (x0 + 0.5).fract();
        let xpx1 = xend as i32;
        let ypx1 = yend.floor() as i32;
        put(&mut *self, xpx1, ypx1, (1.0 - yend.fract()) * xgap);
        put(&mut *self, xpx1, ypx1 + 1, yend.fract() * xgap);
        let mut intery = yend + gradient;

        // second endpoint
        let xend = x1.round();
        let yend = y1 + gradient * (xend - x1);
        let xgap = (x1 + 0.5).fract();
        let xpx2 = xend as i32;
        let ypx2 = yend.floor() as i32;
        if xpx2 != xpx1 {
            put(&mut *self, xpx2, ypx2, (1.0 - yend.fract()) * xgap);
            put(&mut *self, xpx2, ypx2 + 1, yend.fract() * xgap);
        }

        for x in (xpx1 + 1)..xpx2 {
            let y = intery.floor() as i32;
            put(&mut *self, x, y, 1.0 - intery.fract());
            put(&mut *self, x, y + 1, intery.fract());
            intery += gradient;
        }
    }

    /// Scanline fill, even-odd rule.
    fn fill_polygon(&mut self, points: &[Point], color: Rgba) {
        if points.len() < 3 || color.a == 0 {
            return;
        }

        let mut min_y = f32::MAX;
        let mut max_y = f32::MIN;
        for p in points {
            min_y = min_y.min(p.y);
            max_y = max_y.max(p.y);
        }
        let min_y = (min_y.floor() as i32).max(0);
        let max_y = (max_y.ceil() as i32).min(self.height as i32 - 1);

        // reused per scanline
        let mut intersections: Vec<f32> = Vec::with_capacity(points.len());
        let n = points.len();

        for y in min_y..=max_y {
            intersections.clear();
            let yf = y as f32 + 0.5;

            for i in 0..n {
                let p1 = points[i];
                let p2 = points[(i + 1) % n];
                if (p1.y <= yf && p2.y > yf) || (p2.y <= yf && p1.y > yf) {
                    intersections.push(p1.x + (yf - p1.y) / (p2.y - p1.y) * (p2.x - p1.x));
                }
            }

            intersections.sort_unstable_by(|a, b| a.total_cmp(b));
            for pair in intersections.chunks_exact(2) {
                let x1 = (pair[0] - 0.5).ceil() as i32;
                let x2 = (pair[1] - 0.5).floor() as i32;
                if x1 <= x2 {
                    self.hline_blend(x1, x2, y, color);
                }
            }
        }
    }

    /// Midpoint circle with span filling; each row is blended once.
    fn fill_circle(&mut self, center: Point, radius: f32, color: Rgba) {
        let (cx, cy) = (center.x.round() as i32, center.y.round() as i32);
        let radius = radius.round() as i32;
        if radius <= 0 {
            if radius == 0 {
                self.blend_pixel(cx, cy, color);
            }
            return;
        }

        let mut x = radius;
        let mut y = 0;
        let mut err = 1 - radius;

        while x >= y {
            self.hline_blend(cx - x, cx + x, cy + y, color);
            if y != 0 {
                self.hline_blend(cx - x, cx + x, cy - y, color);
            }
            // the x-rows are only drawn when x is about to change, so no row is blended twice
            if err >= 0 && x != y {
                self.hline_blend(cx - y, cx + y, cy + x, color);
                self.hline_blend(cx - y, cx + y, cy - x, color);
            }

            y += 1;
            if err < 0 {
                err += 2 * y + 1;
            } else {
                x -= 1;
                err += 2 * (y - x) + 1;
            }
        }
    }
}

/// Blend the whole layer over the screen in one pass.
/// Visual: vine + flowers appear on top of the background color.
pub fn composite_onto(layer: &Layer, screen: &mut FrameBuffer) {
    let w = layer.width.min(screen.width);
    let h = layer.height.min(screen.height);
    for y in 0..h {
        for x in 0..w {
            let src = layer.pixels[y * layer.width + x];
            if src.a == 0 {
                continue;
            }
            let di = y * screen.width + x;
            if src.a == 255 {
                screen.pixels[di] = src.rgb().to_u32();
                continue;
            }
            let old = screen.pixels[di];
            let a = src.a as u16;
            let r = blend_channel(src.r, ((old >> 16) & 0xFF) as u8, a) as u32;
            let g = blend_channel(src.g, ((old >> 8) & 0xFF) as u8, a) as u32;
            let b = blend_channel(src.b, (old & 0xFF) as u8, a) as u32;
            screen.pixels[di] = (r << 16) | (g << 8) | b;
        }
    }
}
