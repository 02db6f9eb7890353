// The whole drawing state and the per-frame pipeline.
// Scene owns the trail, the live blooms, the current background and the transparent layer.
// One frame:
// 1) record the pointer (if it moved far enough), evict past capacity
// 2) fade the trail, drop spent samples
// 3) clear the layer
// 4) build this frame's vine points (raw samples or the smoothed curve)
// 5) stroke the vine into the layer
// 6) roll for new blooms
// 7) fade, draw and prune the blooms
// 8) fill the background and composite the layer over it

use minifb::Key;
use rand::rngs::StdRng;
use tracing::{debug, info};

use crate::bloom::BloomRegistry;
use crate::config::{Config, VineSource};
use crate::curve::{self, CurvePoint};
use crate::draw::InputEvent;
use crate::raster::composite_onto;
use crate::spawner::BloomSpawner;
use crate::trail::Trail;
use crate::types::{FrameBuffer, Layer, Point, Rgb};
use crate::vine;

/// What the frame loop should do after an input event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
    Save,
}

pub struct Scene {
    config: Config,
    trail: Trail,
    blooms: BloomRegistry,
    spawner: BloomSpawner,
    background: usize,
    layer: Layer,
    rng: StdRng,
}

impl Scene {
    pub fn new(config: Config, width: usize, height: usize, rng: StdRng) -> Self {
        info!(preset = ?config.preset, width, height, "scene ready");
        Self {
            trail: Trail::new(config.max_trail, config.min_step, config.trail_fade),
            blooms: BloomRegistry::new(config.bloom_fade),
            spawner: BloomSpawner::new(&config),
            background: 0,
            layer: Layer::new(width, height),
            rng,
            config,
        }
    }

    #[cfg(test)]
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[cfg(test)]
    pub fn trail(&self) -> &Trail {
        &self.trail
    }

    #[cfg(test)]
    pub fn blooms(&self) -> &BloomRegistry {
        &self.blooms
    }

    #[cfg(test)]
    pub fn layer(&self) -> &Layer {
        &self.layer
    }

    pub fn background(&self) -> Rgb {
        let backgrounds = self.config.palette.backgrounds;
        backgrounds.get(self.background).copied().unwrap_or(Rgb::new(0, 0, 0))
    }

    pub fn cycle_background(&mut self) {
        let count = self.config.palette.backgrounds.len().max(1);
        self.background = (self.background + 1) % count;
        info!(index = self.background, "background changed");
    }

    /// Map one input event onto the scene. Unknown keys do nothing.
    pub fn handle_event(&mut self, event: InputEvent) -> Control {
        match event {
            InputEvent::Quit | InputEvent::KeyDown(Key::Escape) => Control::Quit,
            InputEvent::PrimaryButtonDown => {
                self.cycle_background();
                Control::Continue
            }
            InputEvent::KeyDown(Key::S) => Control::Save,
            InputEvent::KeyDown(_) => Control::Continue,
        }
    }

    /// Record the pointer and age the trail.
    pub fn advance(&mut self, pointer: Option<Point>) {
        if let Some(pos) = pointer {
            self.trail.append(pos, self.config.palette.vine, &mut self.rng);
        }
        self.trail.tick();
    }

    /// Redraw the layer from the current state and composite it over the background.
    pub fn render(&mut self, screen: &mut FrameBuffer) {
        self.layer.clear();

        let points = self.vine_points();
        vine::draw_vine(&mut self.layer, &points, &self.config.vine_width, &mut self.rng);

        for bloom in self.spawner.spawn(&points, &mut self.rng) {
            self.blooms.push(bloom);
        }
        self.blooms.update_and_render(&mut self.layer);

        screen.fill(self.background());
        composite_onto(&self.layer, screen);
    }

    /// One full frame: advance, then render.
    pub fn frame(&mut self, pointer: Option<Point>, screen: &mut FrameBuffer) {
        self.advance(pointer);
        self.render(screen);
    }

    fn vine_points(&self) -> Vec<CurvePoint> {
        let samples = self.trail.samples();
        match self.config.vine_source {
            VineSource::Samples => curve::polyline(samples),
            VineSource::Curve => curve::smooth(samples, self.config.curve_segments),
        }
    }

    pub fn log_stats(&self, fps: f32) {
        debug!(fps, trail = self.trail.len(), blooms = self.blooms.len(), "frame stats");
    }
}
