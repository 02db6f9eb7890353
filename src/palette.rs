// Mucha-style color tables. Every random color pick in the scene comes from here.

use crate::types::{Rgb, Rgba};

/// Warm paper, lavender, mint. Cycled with a left click.
pub const BACKGROUNDS: [Rgb; 3] = [
    Rgb::new(255, 248, 230),
    Rgb::new(240, 230, 250),
    Rgb::new(230, 245, 240),
];

pub const CLASSIC_VINE: [Rgba; 3] = [
    Rgba::new(80, 120, 60, 255),
    Rgba::new(100, 140, 80, 255),
    Rgba::new(60, 100, 70, 255),
];

pub const CLASSIC_PETAL: [Rgba; 3] = [
    Rgba::new(255, 180, 200, 255),
    Rgba::new(220, 160, 255, 255),
    Rgba::new(180, 220, 255, 255),
];

pub const CLASSIC_CENTER: [Rgba; 2] = [
    Rgba::new(255, 220, 100, 255),
    Rgba::new(250, 180, 50, 255),
];

// Dark greens first, lighter transition greens after.
pub const REALISTIC_VINE: [Rgba; 4] = [
    Rgba::new(60, 100, 50, 255),
    Rgba::new(80, 120, 60, 255),
    Rgba::new(100, 140, 80, 255),
    Rgba::new(120, 160, 100, 255),
];

pub const REALISTIC_PETAL_BASE: [Rgba; 3] = [
    Rgba::new(255, 190, 210, 255),
    Rgba::new(220, 170, 255, 255),
    Rgba::new(180, 230, 255, 255),
];

/// Lighter than the base tones; outlines the petals.
pub const REALISTIC_PETAL_EDGE: [Rgba; 3] = [
    Rgba::new(255, 210, 220, 255),
    Rgba::new(230, 190, 255, 255),
    Rgba::new(200, 240, 255, 255),
];

pub const REALISTIC_CENTER: [Rgba; 3] = [
    Rgba::new(255, 220, 100, 255),
    Rgba::new(250, 180, 50, 255),
    Rgba::new(240, 160, 30, 255),
];

pub const STAMEN: [Rgba; 1] = [Rgba::new(255, 240, 180, 255)];

/// The set of tables one preset draws from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
    pub backgrounds: &'static [Rgb],
    pub vine: &'static [Rgba],
    pub petal_base: &'static [Rgba],
    /// `None` means petals are outlined in their base color.
    pub petal_edge: Option<&'static [Rgba]>,
    pub center: &'static [Rgba],
    /// `None` means the flower style has no stamens.
    pub stamen: Option<&'static [Rgba]>,
}

impl Palette {
    pub const CLASSIC: Palette = Palette {
        backgrounds: &BACKGROUNDS,
        vine: &CLASSIC_VINE,
        petal_base: &CLASSIC_PETAL,
        petal_edge: None,
        center: &CLASSIC_CENTER,
        stamen: None,
    };

    pub const REALISTIC: Palette = Palette {
        backgrounds: &BACKGROUNDS,
        vine: &REALISTIC_VINE,
        petal_base: &REALISTIC_PETAL_BASE,
        petal_edge: Some(&REALISTIC_PETAL_EDGE),
        center: &REALISTIC_CENTER,
        stamen: Some(&STAMEN),
    };
}
