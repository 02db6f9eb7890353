// Flowers that bloom along the vine.
// A Bloom builds its petal polygons, center disc and stamens once, in Bloom::new,
// and never touches them again. Fading only lowers the alpha its cached colors are drawn with.
// Visual: a flower keeps its exact shape and hue until it disappears.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::config::{FlowerStyle, PetalShape};
use crate::decay::Fade;
use crate::palette::Palette;
use crate::raster::Canvas;
use crate::types::{Point, Rgba};

/// Colors a bloom is born with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BloomColors {
    pub base: Rgba,
    /// Petal outline.
    pub edge: Rgba,
    pub center: Rgba,
    pub stamen: Option<Rgba>,
}

impl BloomColors {
    /// One random pick from each of the palette's flower tables.
    pub fn pick<R: Rng>(palette: &Palette, rng: &mut R) -> Self {
        let base = choose(palette.petal_base, rng);
        let edge = match palette.petal_edge {
            Some(edges) => choose(edges, rng),
            None => base,
        };
        let center = choose(palette.center, rng);
        let stamen = palette.stamen.map(|s| choose(s, rng));
        Self { base, edge, center, stamen }
    }
}

fn choose<R: Rng>(table: &[Rgba], rng: &mut R) -> Rgba {
    table.choose(rng).copied().unwrap_or(Rgba::TRANSPARENT)
}

/// One concentric ring of petals.
#[derive(Clone, Debug, PartialEq)]
pub struct PetalLayer {
    pub petals: Vec<Vec<Point>>,
    pub color: Rgba,
}

#[derive(Clone, Debug)]
pub struct Bloom {
    pub pos: Point,
    pub size: f32,
    pub opacity: f32,
    colors: BloomColors,
    layers: Vec<PetalLayer>, // outermost first
    center_radius: f32,
    stamens: Vec<(Point, Point)>,
}

impl Bloom {
    /// Build a flower at `pos`, rotated by `rotation_deg`, and freeze its geometry.
    pub fn new(pos: Point, size: f32, opacity: f32, colors: BloomColors, style: &FlowerStyle, rotation_deg: f32) -> Self {
        let layers = style
            .layer_scales
            .iter()
            .map(|&scale| PetalLayer {
                petals: (0..style.petals)
                    .map(|i| {
                        let angle = (i as f32 * 360.0 / style.petals as f32 + rotation_deg).to_radians();
                        petal(pos, size * scale, angle, &style.shape)
                    })
                    .collect(),
                color: colors.base,
            })
            .collect();

        let center_radius = size * style.center_ratio;
        let stamens = match colors.stamen {
            Some(_) if style.stamens > 0 => {
                let len = center_radius * style.stamen_ratio;
                (0..style.stamens)
                    .map(|i| {
                        let angle = (i as f32 * 360.0 / style.stamens as f32).to_radians();
                        (pos, pos + Point::new(angle.cos(), angle.sin()) * len)
                    })
                    .collect()
            }
            _ => Vec::new(),
        };

        Self { pos, size, opacity, colors, layers, center_radius, stamens }
    }

    #[cfg(test)]
    pub fn layers(&self) -> &[PetalLayer] {
        &self.layers
    }

    #[cfg(test)]
    pub fn center_radius(&self) -> f32 {
        self.center_radius
    }

    #[cfg(test)]
    pub fn stamens(&self) -> &[(Point, Point)] {
        &self.stamens
    }

    /// Paint the cached geometry at the current opacity: petal layers from the
    /// largest inward, then the center disc, then stamens.
    pub fn draw<C: Canvas>(&self, canvas: &mut C) {
        let op = self.opacity;
        let edge = self.colors.edge.faded(op);
        for layer in &self.layers {
            let fill = layer.color.faded(op);
            for poly in &layer.petals {
                canvas.fill_polygon(poly, fill);
                canvas.aa_polygon(poly, edge);
            }
        }
        canvas.fill_circle(self.pos, self.center_radius, self.colors.center.faded(op));
        if let Some(stamen) = self.colors.stamen {
            let stamen = stamen.faded(op);
            for &(from, to) in &self.stamens {
                canvas.aa_line(from, to, stamen);
            }
        }
    }
}

impl Fade for Bloom {
    fn opacity(&self) -> f32 {
        self.opacity
    }

    fn set_opacity(&mut self, opacity: f32) {
        self.opacity = opacity;
    }
}

fn petal(center: Point, size: f32, angle: f32, shape: &PetalShape) -> Vec<Point> {
    let dir = |a: f32| Point::new(a.cos(), a.sin());
    match *shape {
        PetalShape::Ellipse { segments } => {
            let c = center + dir(angle) * size;
            let (rx, ry) = (size / 2.0, size / 4.0);
            (0..segments.max(3))
                .map(|k| {
                    let t = k as f32 / segments.max(3) as f32 * std::f32::consts::TAU;
                    c + Point::new(t.cos() * rx, t.sin() * ry)
                })
                .collect()
        }
        PetalShape::Kite { spread_deg, side_scale, tip_squash, side_stretch } => {
            let spread = spread_deg.to_radians();
            let tip = center + dir(angle) * size * Point::new(1.0, tip_squash);
            let side = Point::new(side_scale, side_stretch);
            let left = center + dir(angle + spread) * size * side;
            let right = center + dir(angle - spread) * size * side;
            vec![tip, left, center, right]
        }
    }
}

/// Every live flower. Each frame they fade, the survivors draw, the rest are dropped.
pub struct BloomRegistry {
    blooms: Vec<Bloom>,
    fade_rate: f32,
}

impl BloomRegistry {
    pub fn new(fade_rate: f32) -> Self {
        Self { blooms: Vec::new(), fade_rate }
    }

    pub fn push(&mut self, bloom: Bloom) {
        self.blooms.push(bloom);
    }

    #[cfg(test)]
    pub fn blooms(&self) -> &[Bloom] {
        &self.blooms
    }

    pub fn len(&self) -> usize {
        self.blooms.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.blooms.is_empty()
    }

    /// Fade every bloom one step; draw and keep only those still visible.
    pub fn update_and_render<C: Canvas>(&mut self, canvas: &mut C) {
        let rate = self.fade_rate;
        self.blooms.retain_mut(|bloom| {
            if bloom.fade(rate) {
                return false;
            }
            bloom.draw(canvas);
            true
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::raster::testing::{DrawCall, Recorder};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn realistic_bloom(opacity: f32) -> Bloom {
        let cfg = Config::realistic();
        let mut rng = StdRng::seed_from_u64(3);
        let colors = BloomColors::pick(&cfg.palette, &mut rng);
        Bloom::new(Point::new(200.0, 150.0), 16.0, opacity, colors, &cfg.flower, 4.0)
    }

    fn geometry(calls: &[DrawCall]) -> Vec<DrawCall> {
        calls
            .iter()
            .map(|c| match c.clone() {
                DrawCall::Line { a, b, width, .. } => DrawCall::Line { a, b, width, color: Rgba::TRANSPARENT },
                DrawCall::AaLine { a, b, .. } => DrawCall::AaLine { a, b, color: Rgba::TRANSPARENT },
                DrawCall::Polygon { points, .. } => DrawCall::Polygon { points, color: Rgba::TRANSPARENT },
                DrawCall::Circle { center, radius, .. } => DrawCall::Circle { center, radius, color: Rgba::TRANSPARENT },
            })
            .collect()
    }

    #[test]
    fn realistic_bloom_has_three_shrinking_layers() {
        let bloom = realistic_bloom(255.0);
        assert_eq!(bloom.layers().len(), 3);
        let reach: Vec<f32> = bloom
            .layers()
            .iter()
            .map(|l| l.petals.iter().flatten().map(|p| p.distance(bloom.pos)).fold(0.0, f32::max))
            .collect();
        assert!(reach[0] > reach[1] && reach[1] > reach[2], "{reach:?}");
        assert!(bloom.layers().iter().all(|l| l.petals.len() == 5 && l.petals.iter().all(|p| p.len() == 4)));
        assert_eq!(bloom.stamens().len(), 12);
        let (from, to) = bloom.stamens()[0];
        assert!((from.distance(to) - bloom.center_radius() * 1.2).abs() < 1e-4);
    }

    #[test]
    fn classic_bloom_is_one_ring_of_ellipses() {
        let cfg = Config::classic();
        let mut rng = StdRng::seed_from_u64(11);
        let colors = BloomColors::pick(&cfg.palette, &mut rng);
        assert_eq!(colors.edge, colors.base);
        assert_eq!(colors.stamen, None);
        let bloom = Bloom::new(Point::new(50.0, 50.0), 12.0, 200.0, colors, &cfg.flower, 0.0);
        assert_eq!(bloom.layers().len(), 1);
        assert_eq!(bloom.layers()[0].petals.len(), 5);
        assert!(bloom.stamens().is_empty());
        assert_eq!(bloom.center_radius(), 3.0);
        // first petal sits `size` to the right of the center
        let first = &bloom.layers()[0].petals[0];
        let mid = first.iter().fold(Point::ZERO, |acc, p| acc + *p) / first.len() as f32;
        assert!(mid.distance(Point::new(62.0, 50.0)) < 1e-3);
    }

    #[test]
    fn geometry_is_frozen_across_fading_draws() {
        let mut bloom = realistic_bloom(255.0);
        let frozen = bloom.layers().to_vec();

        let mut first = Recorder::default();
        bloom.draw(&mut first);

        for _ in 0..200 {
            bloom.fade(0.6);
        }
        let mut second = Recorder::default();
        bloom.draw(&mut second);

        while !bloom.fade(0.6) {}
        let mut last = Recorder::default();
        bloom.draw(&mut last);

        assert_eq!(bloom.layers(), frozen.as_slice());
        assert_eq!(geometry(&first.calls), geometry(&second.calls));
        assert_eq!(geometry(&first.calls), geometry(&last.calls));

        // only alpha moves
        for (a, b) in first.calls.iter().zip(&second.calls) {
            let (ca, cb) = (a.color(), b.color());
            assert_eq!((ca.r, ca.g, ca.b), (cb.r, cb.g, cb.b));
            assert!(cb.a < ca.a);
        }
        assert!(last.calls.iter().all(|c| c.color().a == 0));
    }

    #[test]
    fn draw_order_is_outer_layer_then_center_then_stamens() {
        let bloom = realistic_bloom(255.0);
        let mut rec = Recorder::default();
        bloom.draw(&mut rec);
        // 3 layers * 5 petals * (fill + 4 outline edges), center, 12 stamens
        assert_eq!(rec.calls.len(), 3 * 5 * 5 + 1 + 12);
        assert!(matches!(rec.calls[0], DrawCall::Polygon { .. }));
        let circle = rec.calls.iter().position(|c| matches!(c, DrawCall::Circle { .. })).unwrap();
        assert_eq!(circle, 75);
        assert!(rec.calls[76..].iter().all(|c| matches!(c, DrawCall::AaLine { .. })));
    }

    #[test]
    fn registry_drops_blooms_that_fade_out() {
        let mut registry = BloomRegistry::new(0.6);
        registry.push(realistic_bloom(0.5));
        registry.push(realistic_bloom(255.0));
        let mut rec = Recorder::default();
        registry.update_and_render(&mut rec);
        assert_eq!(registry.len(), 1);
        assert!(rec.calls.iter().all(|c| c.color().a > 0));
        assert_eq!(registry.blooms()[0].opacity, 255.0 - 0.6);
    }

    #[test]
    fn registry_never_keeps_a_spent_bloom() {
        let mut registry = BloomRegistry::new(3.0);
        for i in 0..10 {
            registry.push(realistic_bloom(30.0 * i as f32));
        }
        for _ in 0..100 {
            let mut rec = Recorder::default();
            registry.update_and_render(&mut rec);
            assert!(registry.blooms().iter().all(|b| b.opacity > 0.0));
            assert!(rec.calls.iter().all(|c| c.color().a > 0));
        }
        assert!(registry.is_empty());
    }
}
