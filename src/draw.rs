// Window + input.
// Visual effects provided here:
// 1) A window that shows the composited frame.
// 2) The pointer position that grows the vine.
// 3) Discrete events: close/ESC, left click (background), key presses (S saves).

use crate::error::Error;
use crate::types::{FrameBuffer, Point};
use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};

/// One discrete input event, drained once per frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputEvent {
    Quit,
    PrimaryButtonDown,
    KeyDown(Key),
}

pub struct Drawer {
    window: Window,      // the on-screen window you see
    left_was_down: bool, // to turn the held button into a single press
}

impl Drawer {
    /// Create a window of the canvas size.
    /// Visual: a new empty window appears with your chosen title.
    pub fn new(title: &str, width: usize, height: usize) -> Result<Self, Error> {
        let window = Window::new(title, width, height, WindowOptions::default())
            .map_err(|e| Error::WindowInit(e.to_string()))?;
        Ok(Self { window, left_was_down: false })
    }

    /// Push the pixels for this frame to the screen.
    /// Visual: the window immediately displays the new image.
    pub fn present(&mut self, framebuffer: &FrameBuffer) -> Result<(), Error> {
        self.window
            .update_with_buffer(&framebuffer.pixels, framebuffer.width, framebuffer.height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))?;
        Ok(())
    }

    /// Everything that happened since the last frame.
    /// The window's input state refreshes inside `present`.
    pub fn poll_events(&mut self) -> Vec<InputEvent> {
        let mut events = Vec::new();
        if !self.window.is_open() {
            events.push(InputEvent::Quit);
            return events;
        }

        let left_down = self.window.get_mouse_down(MouseButton::Left);
        if left_down && !self.left_was_down {
            events.push(InputEvent::PrimaryButtonDown);
        }
        self.left_was_down = left_down;

        events.extend(
            self.window
                .get_keys_pressed(KeyRepeat::No)
                .into_iter()
                .map(InputEvent::KeyDown),
        );
        events
    }

    /// Current pointer position in window pixel coordinates (clamped to the window).
    /// Visual: the vine grows toward this point.
    pub fn pointer(&self) -> Option<Point> {
        self.window
            .get_mouse_pos(MouseMode::Clamp)
            .map(|(x, y)| Point::new(x.max(0.0), y.max(0.0)))
    }
}
