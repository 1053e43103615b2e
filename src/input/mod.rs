use std::collections::{HashMap, HashSet};
use std::hash::Hash;
pub use winit::keyboard::KeyCode;

pub mod gamepad;

pub use gamepad::{Gamepads, PadEvent};

/// Represents a raw input source that can be bound to an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputSource {
    Key(KeyCode),
    JoyButton(u32),
}

/// Raw hardware state for a single frame.
///
/// The `*_pressed` / `*_released` sets only hold what changed since the last
/// `clear_frame_state`; the `*_held` sets persist across frames.
#[derive(Debug, Default)]
pub struct InputState {
    pub keys_held: HashSet<KeyCode>,
    pub keys_pressed: HashSet<KeyCode>,
    pub keys_released: HashSet<KeyCode>,

    pub joy_held: HashSet<u32>,
    pub joy_pressed: HashSet<u32>,
    /// Axis values in [-1, 1]; `None` when no joystick is attached.
    pub joy_axes: Option<Vec<f32>>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear_frame_state(&mut self) {
        self.keys_pressed.clear();
        self.keys_released.clear();
        self.joy_pressed.clear();
    }

    pub fn press_key(&mut self, key: KeyCode) {
        if self.keys_held.insert(key) {
            self.keys_pressed.insert(key);
        }
    }

    pub fn release_key(&mut self, key: KeyCode) {
        self.keys_held.remove(&key);
        self.keys_released.insert(key);
    }

    pub fn press_joy_button(&mut self, button: u32) {
        if self.joy_held.insert(button) {
            self.joy_pressed.insert(button);
        }
    }

    pub fn release_joy_button(&mut self, button: u32) {
        self.joy_held.remove(&button);
    }

    pub fn is_key_held(&self, key: KeyCode) -> bool { self.keys_held.contains(&key) }
    pub fn is_key_pressed(&self, key: KeyCode) -> bool { self.keys_pressed.contains(&key) }
    pub fn is_key_released(&self, key: KeyCode) -> bool { self.keys_released.contains(&key) }

    pub fn is_joy_held(&self, button: u32) -> bool { self.joy_held.contains(&button) }
    pub fn is_joy_pressed(&self, button: u32) -> bool { self.joy_pressed.contains(&button) }

    /// Ignored while no joystick is attached.
    pub fn set_axis(&mut self, n: usize, value: f32) {
        if let Some(axes) = self.joy_axes.as_mut() {
            if axes.len() <= n {
                axes.resize(n + 1, 0.0);
            }
            axes[n] = value.clamp(-1.0, 1.0);
        }
    }

    /// Current value of joystick axis `n`, or `0.0` without a joystick.
    pub fn axis(&self, n: usize) -> f32 {
        self.joy_axes
            .as_ref()
            .and_then(|axes| axes.get(n).copied())
            .unwrap_or(0.0)
    }
}

/// Maps logical actions (defined by the game) to one or more physical inputs.
#[derive(Debug, Clone)]
pub struct ActionMap<A: Hash + Eq + Copy> {
    bindings: HashMap<A, Vec<InputSource>>,
}

impl<A: Hash + Eq + Copy> ActionMap<A> {
    pub fn new() -> Self {
        Self { bindings: HashMap::new() }
    }

    pub fn bind(&mut self, action: A, source: InputSource) {
        self.bindings.entry(action).or_default().push(source);
    }

    /// Returns true if the action was triggered this frame (pressed).
    pub fn is_pressed(&self, action: A, input: &InputState) -> bool {
        self.bindings.get(&action).is_some_and(|sources| {
            sources.iter().any(|s| match s {
                InputSource::Key(k) => input.is_key_pressed(*k),
                InputSource::JoyButton(b) => input.is_joy_pressed(*b),
            })
        })
    }

    /// Returns true if the action is currently being held.
    pub fn is_held(&self, action: A, input: &InputState) -> bool {
        self.bindings.get(&action).is_some_and(|sources| {
            sources.iter().any(|s| match s {
                InputSource::Key(k) => input.is_key_held(*k),
                InputSource::JoyButton(b) => input.is_joy_held(*b),
            })
        })
    }
}

impl<A: Hash + Eq + Copy> Default for ActionMap<A> {
    fn default() -> Self { Self::new() }
}

// ── Game actions ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,
    /// Dismiss the current text box.
    Confirm,
    Quit,
}

impl ActionMap<Action> {
    /// Arrow keys / WASD to move, Space or joystick button 0 to confirm,
    /// Escape to quit.
    pub fn with_default_bindings() -> Self {
        let mut map = Self::new();
        for (action, keys) in [
            (Action::MoveLeft, [KeyCode::ArrowLeft, KeyCode::KeyA]),
            (Action::MoveRight, [KeyCode::ArrowRight, KeyCode::KeyD]),
            (Action::MoveUp, [KeyCode::ArrowUp, KeyCode::KeyW]),
            (Action::MoveDown, [KeyCode::ArrowDown, KeyCode::KeyS]),
        ] {
            for key in keys {
                map.bind(action, InputSource::Key(key));
            }
        }
        map.bind(Action::Confirm, InputSource::Key(KeyCode::Space));
        map.bind(Action::Confirm, InputSource::JoyButton(0));
        map.bind(Action::Quit, InputSource::Key(KeyCode::Escape));
        map
    }
}
