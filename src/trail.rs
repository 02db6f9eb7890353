// Bounded trail of pointer samples, oldest first.
// A sample is only kept once the pointer moved far enough from the previous one;
// the oldest is dropped when the buffer grows past capacity.
// Each frame every sample fades and spent ones are removed in place, order kept.
// Visual: the vine follows the pointer and fades from its tail.

use rand::Rng;
use rand::seq::SliceRandom;
use tracing::trace;

use crate::decay::Fade;
use crate::types::{Point, Rgba};

pub const FULL_OPACITY: f32 = 255.0;

#[derive(Clone, Debug, PartialEq)]
pub struct MotionSample {
    pub pos: Point,
    /// 0..=255, only ever decreases.
    pub opacity: f32,
    /// Fixed at creation so re-blending across frames does not flicker.
    pub color: Rgba,
    /// Reserved for shaping the vine; not read by the renderer.
    pub curvature: f32,
}

impl MotionSample {
    pub fn new(pos: Point, color: Rgba, curvature: f32) -> Self {
        Self { pos, opacity: FULL_OPACITY, color, curvature }
    }
}

impl Fade for MotionSample {
    fn opacity(&self) -> f32 {
        self.opacity
    }

    fn set_opacity(&mut self, opacity: f32) {
        self.opacity = opacity;
    }
}

pub struct Trail {
    samples: Vec<MotionSample>,
    capacity: usize,
    min_step: f32,
    fade_rate: f32,
}

impl Trail {
    pub fn new(capacity: usize, min_step: f32, fade_rate: f32) -> Self {
        Self {
            samples: Vec::with_capacity(capacity + 1),
            capacity,
            min_step,
            fade_rate,
        }
    }

    pub fn samples(&self) -> &[MotionSample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    #[cfg(test)]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Record a sample at `pos` if the pointer moved at least `min_step` pixels
    /// (on either axis) since the last one. Its color is drawn from `palette`.
    /// Returns whether a sample was added.
    pub fn append<R: Rng>(&mut self, pos: Point, palette: &[Rgba], rng: &mut R) -> bool {
        if !self.moved_enough(pos) {
            return false;
        }
        let color = palette.choose(rng).copied().unwrap_or(Rgba::TRANSPARENT);
        let sample = MotionSample::new(pos, color, rng.gen_range(-0.5..=0.5));
        trace!(x = pos.x, y = pos.y, curvature = sample.curvature, "sample");
        self.push(sample);
        true
    }

    /// Push an already-built sample, bypassing the distance check.
    pub fn push(&mut self, sample: MotionSample) {
        self.samples.push(sample);
        self.evict_oldest_if_over_capacity();
    }

    fn moved_enough(&self, pos: Point) -> bool {
        match self.samples.last() {
            None => true,
            Some(last) => {
                let d = (pos - last.pos).abs();
                d.max_element() >= self.min_step
            }
        }
    }

    pub fn evict_oldest_if_over_capacity(&mut self) {
        if self.samples.len() > self.capacity {
            self.samples.remove(0);
        }
    }

    /// Fade every sample one step and drop the ones that reached zero.
    pub fn tick(&mut self) {
        let rate = self.fade_rate;
        self.samples.retain_mut(|s| !s.fade(rate));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::CLASSIC_VINE;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(7)
    }

    fn xs(trail: &Trail) -> Vec<f32> {
        trail.samples().iter().map(|s| s.pos.x).collect()
    }

    #[test]
    fn five_appends_keep_order() {
        let mut rng = rng();
        let mut trail = Trail::new(80, 1.0, 3.0);
        for i in 0..5 {
            assert!(trail.append(Point::new(10.0 * i as f32, 5.0), &CLASSIC_VINE, &mut rng));
        }
        assert_eq!(trail.len(), 5);
        assert_eq!(xs(&trail), vec![0.0, 10.0, 20.0, 30.0, 40.0]);
        assert!(trail.samples().iter().all(|s| s.opacity == FULL_OPACITY));
        assert!(trail.samples().iter().all(|s| CLASSIC_VINE.contains(&s.color)));
    }

    #[test]
    fn full_buffer_drops_the_oldest() {
        let mut rng = rng();
        let mut trail = Trail::new(80, 1.0, 3.0);
        for i in 0..80 {
            trail.append(Point::new(i as f32 * 2.0, 0.0), &CLASSIC_VINE, &mut rng);
        }
        assert_eq!(trail.len(), 80);
        let second = trail.samples()[1].pos;
        trail.append(Point::new(1000.0, 0.0), &CLASSIC_VINE, &mut rng);
        assert_eq!(trail.len(), 80);
        assert_eq!(trail.samples()[0].pos, second);
        assert_eq!(trail.samples()[79].pos, Point::new(1000.0, 0.0));
    }

    #[test]
    fn never_exceeds_capacity() {
        let mut rng = rng();
        let mut trail = Trail::new(12, 1.0, 3.0);
        for i in 0..500 {
            let angle = i as f32 * 0.3;
            trail.append(Point::new(angle.cos() * 200.0, angle.sin() * 200.0 + i as f32), &CLASSIC_VINE, &mut rng);
            assert!(trail.len() <= trail.capacity());
            if i % 7 == 0 {
                trail.tick();
            }
        }
    }

    #[test]
    fn stationary_pointer_adds_nothing() {
        let mut rng = rng();
        let mut trail = Trail::new(300, 3.0, 1.0);
        assert!(trail.append(Point::new(100.0, 100.0), &CLASSIC_VINE, &mut rng));
        assert!(!trail.append(Point::new(100.0, 100.0), &CLASSIC_VINE, &mut rng));
        assert!(!trail.append(Point::new(102.0, 98.0), &CLASSIC_VINE, &mut rng));
        assert!(trail.append(Point::new(103.0, 100.0), &CLASSIC_VINE, &mut rng));
        assert_eq!(trail.len(), 2);
    }

    #[test]
    fn tick_preserves_order_of_survivors() {
        let mut trail = Trail::new(80, 1.0, 3.0);
        for i in 0..10 {
            let mut s = MotionSample::new(Point::new(i as f32, 0.0), CLASSIC_VINE[0], 0.0);
            // odd samples are nearly gone
            if i % 2 == 1 {
                s.opacity = 2.0;
            }
            trail.push(s);
        }
        trail.tick();
        assert_eq!(xs(&trail), vec![0.0, 2.0, 4.0, 6.0, 8.0]);
        assert!(trail.samples().iter().all(|s| s.opacity == 252.0));
    }

    #[test]
    fn sample_is_evicted_after_85_ticks() {
        let mut rng = rng();
        let mut trail = Trail::new(80, 1.0, 3.0);
        trail.append(Point::ZERO, &CLASSIC_VINE, &mut rng);
        for _ in 0..84 {
            trail.tick();
        }
        assert_eq!(trail.len(), 1);
        assert_eq!(trail.samples()[0].opacity, 3.0);
        trail.tick();
        assert!(trail.is_empty());
    }

    #[test]
    fn curvature_stays_in_range() {
        let mut rng = rng();
        let mut trail = Trail::new(300, 1.0, 1.0);
        for i in 0..200 {
            trail.append(Point::new(i as f32, 0.0), &CLASSIC_VINE, &mut rng);
        }
        assert!(trail.samples().iter().all(|s| (-0.5..=0.5).contains(&s.curvature)));
    }
}
