//! # Input Manager
//!
//! This module tracks raw keyboard and pointer input between frames and
//! produces one [`ProcessedInputState`] snapshot per frame for the engine
//! to translate into player actions.

use std::collections::HashMap;

use winit::{
    event::{ElementState, KeyEvent, WindowEvent},
    keyboard::{KeyCode, PhysicalKey},
};

use super::input_state::{ProcessedInputState, RawInputState};

const KEY_CODES: [KeyCode; 9] = [
    KeyCode::KeyW,
    KeyCode::KeyS,
    KeyCode::KeyA,
    KeyCode::KeyD,
    KeyCode::Space,
    KeyCode::ShiftLeft,
    KeyCode::ControlLeft,
    KeyCode::NumpadAdd,
    KeyCode::NumpadSubtract,
];

/// Tracks keyboard and pointer input between frame snapshots.
///
/// Two key maps (last snapshot's state and the state being accumulated)
/// are enough to derive the pressed/held/released transitions the engine
/// consumes; the pointer displacement is summed until the next snapshot
/// collects it.
pub struct InputManager {
    /// Key state as of the previous snapshot
    pub keyboard_inputs_old: HashMap<KeyCode, bool>,
    /// Key state accumulated since then
    pub keyboard_inputs_new: HashMap<KeyCode, bool>,

    /// Pointer displacement accumulated since the last snapshot
    pointer_delta: Option<(f64, f64)>,
}

impl InputManager {
    /// Creates a new InputManager with all tracked keys released.
    pub fn new() -> Self {
        let mut keyboard_inputs_old = HashMap::new();
        let mut keyboard_inputs_new = HashMap::new();
        for key_code in KEY_CODES {
            keyboard_inputs_old.insert(key_code, false);
            keyboard_inputs_new.insert(key_code, false);
        }

        Self {
            keyboard_inputs_old,
            keyboard_inputs_new,
            pointer_delta: None,
        }
    }

    /// Copies the current key states over the previous ones.
    pub fn move_old_states(&mut self) {
        for (key, new_state) in self.keyboard_inputs_new.iter() {
            if let Some(old_state) = self.keyboard_inputs_old.get_mut(key) {
                *old_state = *new_state;
            }
        }
    }

    /// Records a keyboard event for a tracked key; other events are ignored.
    pub fn intake_input(&mut self, event: &WindowEvent) {
        if let WindowEvent::KeyboardInput {
            event:
                KeyEvent {
                    state,
                    physical_key: PhysicalKey::Code(key),
                    ..
                },
            ..
        } = event
        {
            if let Some(key_state) = self.keyboard_inputs_new.get_mut(key) {
                *key_state = *state == ElementState::Pressed;
            }
        }
    }

    /// Accumulates a raw pointer motion delta.
    ///
    /// Raw deltas are positive rightward/downward; the camera consumes the
    /// center-relative convention (positive turns left, positive tilts up),
    /// so both axes are negated on intake.
    ///
    /// # Arguments
    /// * `delta` - The (x, y) raw motion reported by the device
    pub fn intake_pointer_motion(&mut self, delta: (f64, f64)) {
        let (acc_x, acc_y) = self.pointer_delta.unwrap_or((0.0, 0.0));
        self.pointer_delta = Some((acc_x - delta.0, acc_y - delta.1));
    }

    /// Creates a processed input snapshot from the current raw states.
    ///
    /// # Returns
    /// A new `ProcessedInputState` with transition states for every tracked
    /// key and the pointer displacement accumulated since the last snapshot.
    pub fn create_processed_input_state(&mut self) -> ProcessedInputState {
        let mut keyboard_states = HashMap::new();

        for (key, &new_state) in self.keyboard_inputs_new.iter() {
            let old_state = self.keyboard_inputs_old.get(key).copied().unwrap_or(false);
            keyboard_states.insert(*key, RawInputState::from_raw_states(old_state, new_state));
        }

        ProcessedInputState {
            keyboard_states,
            pointer_delta: self.pointer_delta,
        }
    }

    /// Returns the processed input state and resets internal state.
    ///
    /// # Returns
    /// The processed input state for the frame that just ended.
    pub fn get_and_reset_processed_input(&mut self) -> Option<ProcessedInputState> {
        let processed_input = Some(self.create_processed_input_state());
        self.reset_inputs();
        processed_input
    }

    /// Resets the per-frame input state.
    ///
    /// Also called when the window loses focus to prevent stuck keys.
    pub fn reset_inputs(&mut self) {
        self.move_old_states();
        self.pointer_delta = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pointer_motion_accumulates_and_negates() {
        let mut manager = InputManager::new();
        manager.intake_pointer_motion((3.0, -2.0));
        manager.intake_pointer_motion((1.0, 1.0));

        let snapshot = manager.create_processed_input_state();
        assert_eq!(snapshot.pointer_delta, Some((-4.0, 1.0)));
    }

    #[test]
    fn snapshot_reset_clears_pointer_delta() {
        let mut manager = InputManager::new();
        manager.intake_pointer_motion((5.0, 5.0));

        let first = manager.get_and_reset_processed_input().unwrap();
        assert!(first.pointer_delta.is_some());

        let second = manager.get_and_reset_processed_input().unwrap();
        assert!(second.pointer_delta.is_none());
    }

    #[test]
    fn held_key_transitions_across_snapshots() {
        let mut manager = InputManager::new();
        *manager.keyboard_inputs_new.get_mut(&KeyCode::KeyW).unwrap() = true;

        let first = manager.get_and_reset_processed_input().unwrap();
        assert_eq!(first.get_key_state(KeyCode::KeyW), RawInputState::Pressed);

        let second = manager.get_and_reset_processed_input().unwrap();
        assert_eq!(second.get_key_state(KeyCode::KeyW), RawInputState::Held);
    }
}
