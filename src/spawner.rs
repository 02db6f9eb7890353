// Decides when and where new flowers appear on the vine.
// Visual: flowers pop up where the pointer slowed down (local policy) or, now and then,
// somewhere along the middle of the smoothed vine (curve policy).

use rand::Rng;
use tracing::trace;

use crate::bloom::{Bloom, BloomColors};
use crate::config::{Config, FlowerStyle, SpawnConfig};
use crate::curve::CurvePoint;
use crate::palette::Palette;

pub struct BloomSpawner {
    policy: SpawnConfig,
    size: (u32, u32),
    style: FlowerStyle,
    palette: Palette,
}

impl BloomSpawner {
    pub fn new(config: &Config) -> Self {
        Self {
            policy: config.spawn,
            size: config.bloom_size,
            style: config.flower.clone(),
            palette: config.palette,
        }
    }

    /// Roll for new blooms on this frame's vine points.
    pub fn spawn<R: Rng>(&self, points: &[CurvePoint], rng: &mut R) -> Vec<Bloom> {
        match self.policy {
            SpawnConfig::Local { max_distance, probability } => {
                let mut out = Vec::new();
                for pair in points.windows(2) {
                    let (p1, p2) = (&pair[0], &pair[1]);
                    if p1.pos.distance(p2.pos) >= max_distance {
                        continue;
                    }
                    if rng.gen_bool(probability) {
                        let opacity = ((p1.opacity + p2.opacity) / 2.0).floor();
                        out.push(self.make(p2, opacity, rng));
                    }
                }
                out
            }
            SpawnConfig::Curve { min_points, margin, probability } => {
                // both ends keep `margin` points clear
                if points.len() < min_points || points.len() <= 2 * margin {
                    return Vec::new();
                }
                if !rng.gen_bool(probability) {
                    return Vec::new();
                }
                let idx = rng.gen_range(margin..points.len() - margin);
                let p = &points[idx];
                vec![self.make(p, p.opacity.floor(), rng)]
            }
        }
    }

    fn make<R: Rng>(&self, at: &CurvePoint, opacity: f32, rng: &mut R) -> Bloom {
        let size = rng.gen_range(self.size.0..=self.size.1) as f32;
        let colors = BloomColors::pick(&self.palette, rng);
        let jitter = self.style.jitter_deg;
        let rotation = if jitter > 0.0 { rng.gen_range(-jitter..=jitter) } else { 0.0 };
        let bloom = Bloom::new(at.pos, size, opacity, colors, &self.style, rotation);
        trace!(x = bloom.pos.x, y = bloom.pos.y, size = bloom.size, opacity = bloom.opacity, rotation, "bloom");
        bloom
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Point;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn point(x: f32, y: f32, opacity: f32) -> CurvePoint {
        CurvePoint { pos: Point::new(x, y), opacity, color: [80.0, 120.0, 60.0] }
    }

    fn always(mut config: Config) -> Config {
        config.spawn = match config.spawn {
            SpawnConfig::Local { max_distance, .. } => SpawnConfig::Local { max_distance, probability: 1.0 },
            SpawnConfig::Curve { min_points, margin, .. } => SpawnConfig::Curve { min_points, margin, probability: 1.0 },
        };
        config
    }

    fn line(n: usize, spacing: f32) -> Vec<CurvePoint> {
        (0..n).map(|i| point(i as f32 * spacing, 100.0, 100.0 + i as f32)).collect()
    }

    #[test]
    fn local_spawns_on_the_later_point_of_close_pairs() {
        let spawner = BloomSpawner::new(&always(Config::classic()));
        let mut rng = StdRng::seed_from_u64(1);
        let mut pts = line(4, 5.0);
        // one far jump at the end
        pts.push(point(500.0, 100.0, 200.0));
        let blooms = spawner.spawn(&pts, &mut rng);
        assert_eq!(blooms.len(), 3);
        let xs: Vec<f32> = blooms.iter().map(|b| b.pos.x).collect();
        assert_eq!(xs, vec![5.0, 10.0, 15.0]);
        // opacity is the pair's average, floored
        assert_eq!(blooms[0].opacity, 100.0);
        assert_eq!(blooms[2].opacity, 102.0);
        assert!(blooms.iter().all(|b| (8.0..=15.0).contains(&b.size)));
    }

    #[test]
    fn local_needs_two_points() {
        let spawner = BloomSpawner::new(&always(Config::classic()));
        let mut rng = StdRng::seed_from_u64(1);
        assert!(spawner.spawn(&line(1, 1.0), &mut rng).is_empty());
        assert!(spawner.spawn(&[], &mut rng).is_empty());
    }

    #[test]
    fn local_rate_is_roughly_the_configured_probability() {
        let spawner = BloomSpawner::new(&Config::classic());
        let mut rng = StdRng::seed_from_u64(99);
        let pts = line(101, 2.0);
        let total: usize = (0..100).map(|_| spawner.spawn(&pts, &mut rng).len()).sum();
        // 10_000 rolls at 0.18
        assert!((1500..2100).contains(&total), "{total}");
    }

    #[test]
    fn curve_spawns_only_on_interior_points() {
        let spawner = BloomSpawner::new(&always(Config::realistic()));
        let mut rng = StdRng::seed_from_u64(5);
        let pts = line(11, 10.0);
        for _ in 0..500 {
            let blooms = spawner.spawn(&pts, &mut rng);
            assert_eq!(blooms.len(), 1);
            let x = blooms[0].pos.x;
            assert!((30.0..=70.0).contains(&x), "{x}");
            assert!((12.0..=20.0).contains(&blooms[0].size));
        }
    }

    #[test]
    fn curve_takes_the_point_opacity() {
        let spawner = BloomSpawner::new(&always(Config::realistic()));
        let mut rng = StdRng::seed_from_u64(5);
        let pts: Vec<_> = (0..11).map(|i| point(i as f32, 0.0, 77.9)).collect();
        let blooms = spawner.spawn(&pts, &mut rng);
        assert_eq!(blooms[0].opacity, 77.0);
    }

    #[test]
    fn short_curves_never_spawn() {
        let spawner = BloomSpawner::new(&always(Config::realistic()));
        let mut rng = StdRng::seed_from_u64(5);
        for n in 0..=6 {
            assert!(spawner.spawn(&line(n, 10.0), &mut rng).is_empty(), "n = {n}");
        }
        assert_eq!(spawner.spawn(&line(7, 10.0), &mut rng).len(), 1);
    }
}
