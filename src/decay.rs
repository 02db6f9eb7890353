// Linear fade toward zero, one step per frame.
// Shared by trail samples and blooms; each caller picks its own rate and prunes what reports done.

/// One decay step: `max(0, value - rate)`, plus whether the value is now fully gone.
#[inline]
pub fn decay(value: f32, rate: f32) -> (f32, bool) {
    let next = (value - rate).max(0.0);
    (next, next == 0.0)
}

/// Anything carrying an opacity that fades each frame.
pub trait Fade {
    fn opacity(&self) -> f32;
    fn set_opacity(&mut self, opacity: f32);

    /// Apply one decay step. Returns true once fully decayed.
    fn fade(&mut self, rate: f32) -> bool {
        let (next, done) = decay(self.opacity(), rate);
        self.set_opacity(next);
        done
    }
}
