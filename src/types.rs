// Core types shared by the trail, the blooms and the renderer.

/// Positions are plain 2D float vectors in window pixel coordinates.
pub type Point = glam::Vec2;

/// Opaque color (used for backgrounds).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Packed as 0x00RRGGBB, the layout minifb expects.
    #[inline]
    pub fn to_u32(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    #[inline]
    pub fn from_u32(px: u32) -> Self {
        Self {
            r: ((px >> 16) & 0xFF) as u8,
            g: ((px >> 8) & 0xFF) as u8,
            b: (px & 0xFF) as u8,
        }
    }
}

/// Color with straight (non-premultiplied) alpha.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const TRANSPARENT: Rgba = Rgba::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Same color with its alpha capped at `opacity` (0..=255).
    /// Used to fade frozen colors without touching their hue.
    #[inline]
    pub fn faded(self, opacity: f32) -> Self {
        let cap = opacity.round().clamp(0.0, 255.0) as u8;
        Self { a: self.a.min(cap), ..self }
    }

    #[inline]
    pub fn rgb(self) -> Rgb {
        Rgb::new(self.r, self.g, self.b)
    }
}

#[derive(Clone)]
pub struct FrameBuffer {
    pub width: usize,      // how wide the frame is on screen (pixels)
    pub height: usize,     // how tall the frame is on screen (pixels)
    pub pixels: Vec<u32>,  // each entry is 0x00RRGGBB for minifb
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, pixels: vec![0u32; width * height] }
    }

    pub fn fill(&mut self, color: Rgb) {
        self.pixels.fill(color.to_u32());
    }

    #[cfg(test)]
    pub fn get(&self, x: usize, y: usize) -> Option<Rgb> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(Rgb::from_u32(self.pixels[y * self.width + x]))
    }
}

/// Transparent RGBA layer the vine and blooms are drawn into each frame.
/// It is cleared, redrawn, and composited onto the screen in one pass.
pub struct Layer {
    pub width: usize,
    pub height: usize,
    pub pixels: Vec<Rgba>, // length = width * height
}

impl Layer {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, pixels: vec![Rgba::TRANSPARENT; width * height] }
    }

    pub fn clear(&mut self) {
        self.pixels.fill(Rgba::TRANSPARENT);
    }

    #[cfg(test)]
    pub fn get(&self, x: usize, y: usize) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[y * self.width + x])
    }

    #[cfg(test)]
    pub fn is_clear(&self) -> bool {
        self.pixels.iter().all(|p| p.a == 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn faded_caps_alpha_only() {
        let c = Rgba::new(255, 190, 210, 255);
        let f = c.faded(100.4);
        assert_eq!((f.r, f.g, f.b, f.a), (255, 190, 210, 100));
        // never raises alpha above the color's own
        assert_eq!(Rgba::new(1, 2, 3, 50).faded(200.0).a, 50);
        assert_eq!(c.faded(-3.0).a, 0);
    }

    #[test]
    fn rgb_packs_like_minifb() {
        let c = Rgb::new(0x12, 0x34, 0x56);
        assert_eq!(c.to_u32(), 0x00_12_34_56);
        assert_eq!(Rgb::from_u32(c.to_u32()), c);
    }

    #[test]
    fn layer_clear_resets_everything() {
        let mut layer = Layer::new(4, 3);
        layer.pixels[5] = Rgba::new(9, 9, 9, 9);
        assert!(!layer.is_clear());
        layer.clear();
        assert!(layer.is_clear());
        assert_eq!(layer.get(4, 0), None);
    }
}
