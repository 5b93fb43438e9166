use std::collections::HashSet;

use super::frame::InputFrame;
use super::types::{ButtonState, InputEvent, Key, MouseButton};

/// Current input state for the window.
///
/// Holds "is down" information and the pointer position.
/// Per-frame transitions are recorded into an `InputFrame`.
#[derive(Debug, Default)]
pub struct InputState {
    pub focused: bool,

    /// Pointer position in window logical pixels.
    pub pointer_pos: Option<(f32, f32)>,

    pub keys_down: HashSet<Key>,
    pub buttons_down: HashSet<MouseButton>,
}

impl InputState {
    /// Applies an input event to the current state and writes transitions to `frame`.
    pub fn apply_event(&mut self, frame: &mut InputFrame, ev: InputEvent) {
        match ev {
            InputEvent::Focused(f) => {
                self.focused = f;
                if !f {
                    // On focus loss, release everything held.
                    for key in self.keys_down.drain() {
                        frame.keys_released.insert(key);
                    }
                    for button in self.buttons_down.drain() {
                        frame.buttons_released.insert(button);
                    }
                }
            }

            InputEvent::PointerMoved { x, y } => {
                self.pointer_pos = Some((x, y));
            }

            InputEvent::PointerLeft => {
                self.pointer_pos = None;
            }

            InputEvent::Key { key, state, .. } => match state {
                ButtonState::Pressed => {
                    // Repeats of a held key are not new presses.
                    if self.keys_down.insert(key) {
                        frame.keys_pressed.insert(key);
                    }
                }
                ButtonState::Released => {
                    if self.keys_down.remove(&key) {
                        frame.keys_released.insert(key);
                    }
                }
            },

            InputEvent::PointerButton { button, state } => match state {
                ButtonState::Pressed => {
                    if self.buttons_down.insert(button) {
                        frame.buttons_pressed.insert(button);
                    }
                }
                ButtonState::Released => {
                    if self.buttons_down.remove(&button) {
                        frame.buttons_released.insert(button);
                    }
                }
            },
        }
    }

    pub fn key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }

    pub fn button_down(&self, btn: MouseButton) -> bool {
        self.buttons_down.contains(&btn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(key: Key, state: ButtonState, repeat: bool) -> InputEvent {
        InputEvent::Key { key, state, repeat }
    }

    fn click(state: ButtonState) -> InputEvent {
        InputEvent::PointerButton { button: MouseButton::Left, state }
    }

    // ── keys ──────────────────────────────────────────────────────────────

    #[test]
    fn press_is_reported_once_while_held() {
        let mut st = InputState::default();
        let mut fr = InputFrame::default();

        st.apply_event(&mut fr, key(Key::Escape, ButtonState::Pressed, false));
        assert!(fr.key_pressed(Key::Escape));
        assert!(st.key_down(Key::Escape));

        fr.clear();
        st.apply_event(&mut fr, key(Key::Escape, ButtonState::Pressed, true));
        assert!(!fr.key_pressed(Key::Escape));
        assert!(st.key_down(Key::Escape));
    }

    #[test]
    fn release_clears_held_and_records_edge() {
        let mut st = InputState::default();
        let mut fr = InputFrame::default();
        st.apply_event(&mut fr, key(Key::R, ButtonState::Pressed, false));
        fr.clear();

        st.apply_event(&mut fr, key(Key::R, ButtonState::Released, false));
        assert!(fr.key_released(Key::R));
        assert!(!st.key_down(Key::R));
    }

    #[test]
    fn stray_release_is_ignored() {
        let mut st = InputState::default();
        let mut fr = InputFrame::default();
        st.apply_event(&mut fr, key(Key::A, ButtonState::Released, false));
        assert!(!fr.key_released(Key::A));
    }

    // ── pointer ───────────────────────────────────────────────────────────

    #[test]
    fn button_edges_and_pointer_tracking() {
        let mut st = InputState::default();
        let mut fr = InputFrame::default();

        st.apply_event(&mut fr, InputEvent::PointerMoved { x: 10.0, y: 20.0 });
        st.apply_event(&mut fr, click(ButtonState::Pressed));
        assert_eq!(st.pointer_pos, Some((10.0, 20.0)));
        assert!(fr.button_pressed(MouseButton::Left));
        assert!(st.button_down(MouseButton::Left));

        fr.clear();
        st.apply_event(&mut fr, click(ButtonState::Released));
        assert!(fr.button_released(MouseButton::Left));
        assert!(!fr.button_pressed(MouseButton::Left));

        st.apply_event(&mut fr, InputEvent::PointerLeft);
        assert_eq!(st.pointer_pos, None);
    }

    #[test]
    fn focus_loss_releases_everything() {
        let mut st = InputState::default();
        let mut fr = InputFrame::default();
        st.apply_event(&mut fr, key(Key::Space, ButtonState::Pressed, false));
        st.apply_event(&mut fr, click(ButtonState::Pressed));
        fr.clear();

        st.apply_event(&mut fr, InputEvent::Focused(false));
        assert!(st.keys_down.is_empty() && st.buttons_down.is_empty());
        assert!(fr.key_released(Key::Space));
        assert!(fr.button_released(MouseButton::Left));
    }
}
