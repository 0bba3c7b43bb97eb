//! Input state consumed by the Trellis UI.
//!
//! The UI never polls devices. The host feeds raw pointer and keyboard changes
//! into an [`InputState`] as they arrive, and once per frame freezes them into
//! an [`InputSnapshot`] holding the cursor position (UI space) and the primary
//! button edges seen since the previous frame.

use bitflags::bitflags;
use trellis_core::math::Vec2;

/// Backspace as delivered in the typed-text stream.
pub const BACKSPACE: char = '\u{8}';

bitflags! {
    /// Primary button edges observed during one frame.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ButtonEdges: u8 {
        const JUST_PRESSED  = 0b01;
        const JUST_RELEASED = 0b10;
    }
}

/// Immutable per-frame view of the input devices.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputSnapshot {
    pub cursor: Vec2,
    pub edges: ButtonEdges,
    /// Characters typed this frame, backspace included as [`BACKSPACE`].
    pub typed: Vec<char>,
}

impl InputSnapshot {
    /// Snapshot with the cursor at `cursor` and no edges.
    pub fn at(cursor: Vec2) -> Self {
        Self {
            cursor,
            ..Default::default()
        }
    }

    pub fn pressed(mut self) -> Self {
        self.edges |= ButtonEdges::JUST_PRESSED;
        self
    }

    pub fn released(mut self) -> Self {
        self.edges |= ButtonEdges::JUST_RELEASED;
        self
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.typed.extend(text.chars());
        self
    }

    #[inline]
    pub fn just_pressed(&self) -> bool {
        self.edges.contains(ButtonEdges::JUST_PRESSED)
    }

    #[inline]
    pub fn just_released(&self) -> bool {
        self.edges.contains(ButtonEdges::JUST_RELEASED)
    }
}

/// Accumulates device changes between frames.
#[derive(Debug, Default)]
pub struct InputState {
    cursor: Vec2,
    primary_down: bool,
    edges: ButtonEdges,
    typed: Vec<char>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_cursor(&mut self, position: Vec2) {
        self.cursor = position;
    }

    /// Record a primary button change. Repeated presses without a release in
    /// between produce a single edge.
    pub fn set_primary(&mut self, down: bool) {
        if down == self.primary_down {
            return;
        }
        self.primary_down = down;
        if down {
            self.edges |= ButtonEdges::JUST_PRESSED;
        } else {
            self.edges |= ButtonEdges::JUST_RELEASED;
        }
    }

    pub fn type_char(&mut self, c: char) {
        self.typed.push(c);
    }

    pub fn is_primary_down(&self) -> bool {
        self.primary_down
    }

    pub fn cursor(&self) -> Vec2 {
        self.cursor
    }

    /// Freeze this frame's input and reset the edge and text accumulators.
    pub fn end_frame(&mut self) -> InputSnapshot {
        InputSnapshot {
            cursor: self.cursor,
            edges: std::mem::take(&mut self.edges),
            typed: std::mem::take(&mut self.typed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges_reset_after_frame() {
        let mut input = InputState::new();
        input.set_primary(true);
        let first = input.end_frame();
        assert!(first.just_pressed());
        assert!(!first.just_released());

        let second = input.end_frame();
        assert!(!second.just_pressed());
        assert!(input.is_primary_down());
    }

    #[test]
    fn test_press_and_release_in_one_frame() {
        let mut input = InputState::new();
        input.set_primary(true);
        input.set_primary(false);
        let snapshot = input.end_frame();
        assert!(snapshot.just_pressed());
        assert!(snapshot.just_released());
    }

    #[test]
    fn test_repeated_press_is_one_edge() {
        let mut input = InputState::new();
        input.set_primary(true);
        input.end_frame();
        input.set_primary(true);
        assert!(!input.end_frame().just_pressed());
    }

    #[test]
    fn test_typed_text_drained() {
        let mut input = InputState::new();
        input.move_cursor(Vec2::new(4.0, 2.0));
        input.type_char('a');
        input.type_char(BACKSPACE);
        let snapshot = input.end_frame();
        assert_eq!(snapshot.cursor, Vec2::new(4.0, 2.0));
        assert_eq!(snapshot.typed, vec!['a', BACKSPACE]);
        assert!(input.end_frame().typed.is_empty());
    }
}
