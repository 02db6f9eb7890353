// Tunables for the scene.
// The two looks (polyline vine with round flowers, smoothed vine with layered flowers)
// are presets of one pipeline; every constant the trail, spawner and renderer read lives in Config.
// Visual: --preset picks which look you get.

use crate::palette::Palette;

pub const WINDOW_WIDTH: usize = 1280;
pub const WINDOW_HEIGHT: usize = 720;
pub const WINDOW_TITLE: &str = "Mucha Vines - move to grow, S to save, click to change background";
pub const DEFAULT_FPS: u32 = 60;

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum Preset {
    /// Vine through the raw samples; round flowers bloom where the pointer slows down.
    Classic,
    /// Smoothed vine; layered flowers bloom along the inside of the curve.
    Realistic,
}

/// What the vine is drawn through.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VineSource {
    /// Consecutive raw trail samples.
    Samples,
    /// Points of the smoothed curve.
    Curve,
}

/// Width of a vine segment as `max(min, max_width - floor(distance / step))`,
/// plus an optional uniform jitter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VineWidth {
    pub max_width: f32,
    pub distance_step: f32,
    pub min_width: f32,
    pub jitter: f32,
    /// Segments wider than this get a lighter 1px stroke beside them.
    pub highlight_above: Option<f32>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SpawnConfig {
    /// Roll once per pair of close vine points.
    Local { max_distance: f32, probability: f64 },
    /// Roll once per frame, spawn on an interior curve point.
    Curve { min_points: usize, margin: usize, probability: f64 },
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PetalShape {
    /// Axis-aligned ellipse `size` wide and `size / 2` tall, centered `size` away from the flower center.
    Ellipse { segments: usize },
    /// Four-point kite: tip, side, flower center, side. The tip's y reach is
    /// scaled by `tip_squash`; the sides sit `spread_deg` off the petal axis,
    /// scaled by `side_scale` in x and `side_stretch` in y.
    Kite { spread_deg: f32, side_scale: f32, tip_squash: f32, side_stretch: f32 },
}

#[derive(Clone, Debug, PartialEq)]
pub struct FlowerStyle {
    pub petals: usize,
    pub shape: PetalShape,
    /// Scale of each concentric layer, outermost first.
    pub layer_scales: Vec<f32>,
    /// Uniform random rotation of the whole flower, in degrees either way.
    pub jitter_deg: f32,
    /// Center disc radius as a fraction of the flower size.
    pub center_ratio: f32,
    pub stamens: usize,
    /// Stamen length as a multiple of the center radius.
    pub stamen_ratio: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub preset: Preset,
    pub palette: Palette,
    pub max_trail: usize,
    /// Chebyshev distance the pointer must travel before a new sample is kept.
    pub min_step: f32,
    pub trail_fade: f32,
    pub bloom_fade: f32,
    pub vine_source: VineSource,
    pub curve_segments: usize,
    pub vine_width: VineWidth,
    pub spawn: SpawnConfig,
    /// Inclusive bloom size range in pixels.
    pub bloom_size: (u32, u32),
    pub flower: FlowerStyle,
    /// Prefix of exported file names.
    pub art_name: &'static str,
}

impl Config {
    pub fn new(preset: Preset) -> Self {
        match preset {
            Preset::Classic => Self::classic(),
            Preset::Realistic => Self::realistic(),
        }
    }

    pub fn classic() -> Self {
        Self {
            preset: Preset::Classic,
            palette: Palette::CLASSIC,
            max_trail: 80,
            min_step: 1.0,
            trail_fade: 3.0,
            bloom_fade: 3.0,
            vine_source: VineSource::Samples,
            curve_segments: 10,
            vine_width: VineWidth {
                max_width: 8.0,
                distance_step: 5.0,
                min_width: 2.0,
                jitter: 0.0,
                highlight_above: None,
            },
            spawn: SpawnConfig::Local { max_distance: 15.0, probability: 0.18 },
            bloom_size: (8, 15),
            flower: FlowerStyle {
                petals: 5,
                shape: PetalShape::Ellipse { segments: 16 },
                layer_scales: vec![1.0],
                jitter_deg: 0.0,
                center_ratio: 0.25,
                stamens: 0,
                stamen_ratio: 0.0,
            },
            art_name: "mucha_art",
        }
    }

    pub fn realistic() -> Self {
        Self {
            preset: Preset::Realistic,
            palette: Palette::REALISTIC,
            max_trail: 300,
            min_step: 3.0,
            trail_fade: 1.0,
            bloom_fade: 0.6,
            vine_source: VineSource::Curve,
            curve_segments: 10,
            vine_width: VineWidth {
                max_width: 7.0,
                distance_step: 8.0,
                min_width: 2.0,
                jitter: 0.5,
                highlight_above: Some(3.0),
            },
            spawn: SpawnConfig::Curve { min_points: 6, margin: 3, probability: 0.12 },
            bloom_size: (12, 20),
            flower: FlowerStyle {
                petals: 5,
                shape: PetalShape::Kite {
                    spread_deg: 28.0,
                    side_scale: 0.62,
                    tip_squash: 0.85,
                    side_stretch: 1.1,
                },
                layer_scales: vec![1.0, 0.88, 0.76],
                jitter_deg: 6.0,
                center_ratio: 1.0 / 3.0,
                stamens: 12,
                stamen_ratio: 1.2,
            },
            art_name: "mucha_realistic_art",
        }
    }
}
