//! # Input State
//!
//! This module defines the input state types used by the input manager.
//! It provides the per-key state transition enum and the per-frame snapshot
//! consumed by the engine.

use std::collections::HashMap;
use winit::keyboard::KeyCode;

/// Represents the state of a key across two consecutive frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawInputState {
    /// Key is not pressed
    NotPressed,
    /// Key was just pressed this frame
    Pressed,
    /// Key has been held down for multiple frames
    Held,
    /// Key was just released this frame
    Released,
}

impl Default for RawInputState {
    fn default() -> Self {
        Self::NotPressed
    }
}

impl RawInputState {
    /// Determines if the input is actively down (either pressed or held)
    pub fn is_active(&self) -> bool {
        matches!(self, RawInputState::Pressed | RawInputState::Held)
    }

    /// Derives the transition state from the previous and current raw states
    pub fn from_raw_states(previous: bool, current: bool) -> Self {
        match (previous, current) {
            (false, true) => RawInputState::Pressed,
            (true, true) => RawInputState::Held,
            (true, false) => RawInputState::Released,
            (false, false) => RawInputState::NotPressed,
        }
    }
}

/// A snapshot of the processed input for one frame.
///
/// Key states are translated into [`RawInputState`] transitions; the pointer
/// delta is the accumulated displacement since the previous snapshot, in the
/// center-relative convention the camera consumes (positive x turns left,
/// positive y tilts up).
pub struct ProcessedInputState {
    /// Current transition state of all tracked keyboard keys
    pub keyboard_states: HashMap<KeyCode, RawInputState>,

    /// Accumulated pointer displacement since the last frame, if any
    pub pointer_delta: Option<(f64, f64)>,
}

impl ProcessedInputState {
    /// Gets the transition state of a keyboard key
    pub fn get_key_state(&self, key: KeyCode) -> RawInputState {
        self.keyboard_states.get(&key).copied().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transition_table_covers_all_edges() {
        assert_eq!(
            RawInputState::from_raw_states(false, true),
            RawInputState::Pressed
        );
        assert_eq!(
            RawInputState::from_raw_states(true, true),
            RawInputState::Held
        );
        assert_eq!(
            RawInputState::from_raw_states(true, false),
            RawInputState::Released
        );
        assert_eq!(
            RawInputState::from_raw_states(false, false),
            RawInputState::NotPressed
        );
    }

    #[test]
    fn pressed_and_held_are_active() {
        assert!(RawInputState::Pressed.is_active());
        assert!(RawInputState::Held.is_active());
        assert!(!RawInputState::Released.is_active());
        assert!(!RawInputState::NotPressed.is_active());
    }
}
