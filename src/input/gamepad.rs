use gilrs::{Axis, Button, EventType, Gilrs};

use super::InputState;

/// Gamepad change after decoding, in `InputState` terms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PadEvent {
    Connected,
    Disconnected,
    Button { index: u32, pressed: bool },
    Axis { index: usize, value: f32 },
}

/// Joystick button number for a gamepad button. Face buttons come first so
/// the primary button (south) is button 0.
pub fn button_index(button: Button) -> Option<u32> {
    let index = match button {
        Button::South => 0,
        Button::East => 1,
        Button::West => 2,
        Button::North => 3,
        Button::LeftTrigger => 4,
        Button::RightTrigger => 5,
        Button::Select => 6,
        Button::Start => 7,
        Button::LeftThumb => 8,
        Button::RightThumb => 9,
        _ => return None,
    };
    Some(index)
}

/// Axis 0 is horizontal, axis 1 vertical with down positive to match screen
/// space (gilrs reports stick Y up positive).
pub fn axis_value(axis: Axis, value: f32) -> Option<(usize, f32)> {
    match axis {
        Axis::LeftStickX | Axis::DPadX => Some((0, value)),
        Axis::LeftStickY | Axis::DPadY => Some((1, -value)),
        _ => None,
    }
}

pub fn decode(event: EventType) -> Option<PadEvent> {
    match event {
        EventType::Connected => Some(PadEvent::Connected),
        EventType::Disconnected => Some(PadEvent::Disconnected),
        EventType::ButtonPressed(button, _) => {
            button_index(button).map(|index| PadEvent::Button { index, pressed: true })
        }
        EventType::ButtonReleased(button, _) => {
            button_index(button).map(|index| PadEvent::Button { index, pressed: false })
        }
        EventType::AxisChanged(axis, value, _) => {
            axis_value(axis, value).map(|(index, value)| PadEvent::Axis { index, value })
        }
        _ => None,
    }
}

impl InputState {
    pub fn apply_pad_event(&mut self, event: PadEvent) {
        match event {
            PadEvent::Connected => {
                self.joy_axes.get_or_insert_with(|| vec![0.0; 2]);
            }
            PadEvent::Disconnected => {
                self.joy_axes = None;
                self.joy_held.clear();
            }
            PadEvent::Button { index, pressed: true } => self.press_joy_button(index),
            PadEvent::Button { index, pressed: false } => self.release_joy_button(index),
            PadEvent::Axis { index, value } => self.set_axis(index, value),
        }
    }
}

/// Polls connected gamepads and feeds their state into `InputState`.
pub struct Gamepads {
    gilrs: Gilrs,
}

impl Gamepads {
    /// `None` when gamepad support fails to start. Platforms without a
    /// backend get a poller that never reports a pad.
    pub fn new() -> Option<Self> {
        match Gilrs::new() {
            Ok(gilrs) => Some(Self { gilrs }),
            Err(gilrs::Error::NotImplemented(gilrs)) => {
                log::warn!("gamepads are not supported on this platform");
                Some(Self { gilrs })
            }
            Err(e) => {
                log::warn!("gamepad input disabled: {e}");
                None
            }
        }
    }

    /// Drain pending gamepad events into `input`.
    pub fn poll(&mut self, input: &mut InputState) {
        while let Some(event) = self.gilrs.next_event() {
            if let Some(pad_event) = decode(event.event) {
                if matches!(pad_event, PadEvent::Connected | PadEvent::Disconnected) {
                    log::info!("gamepad {:?} {:?}", event.id, pad_event);
                }
                input.apply_pad_event(pad_event);
            }
        }
        // A pad that was already plugged in at startup sends no Connected event.
        if input.joy_axes.is_none() && self.gilrs.gamepads().next().is_some() {
            input.apply_pad_event(PadEvent::Connected);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn south_button_is_confirm_button() {
        assert_eq!(button_index(Button::South), Some(0));
        assert_eq!(button_index(Button::Mode), None);
    }

    #[test]
    fn stick_y_is_flipped_to_screen_down() {
        assert_eq!(axis_value(Axis::LeftStickX, 0.5), Some((0, 0.5)));
        assert_eq!(axis_value(Axis::LeftStickY, 0.5), Some((1, -0.5)));
        assert_eq!(axis_value(Axis::RightStickX, 0.5), None);
    }

    #[test]
    fn connect_press_and_disconnect() {
        let mut input = InputState::new();
        assert_eq!(input.axis(0), 0.0);

        input.apply_pad_event(PadEvent::Connected);
        assert_eq!(input.joy_axes, Some(vec![0.0, 0.0]));

        input.apply_pad_event(PadEvent::Button { index: 0, pressed: true });
        input.apply_pad_event(PadEvent::Axis { index: 0, value: -0.8 });
        assert!(input.is_joy_pressed(0));
        assert_eq!(input.axis(0), -0.8);

        input.clear_frame_state();
        assert!(!input.is_joy_pressed(0));
        assert!(input.is_joy_held(0));

        input.apply_pad_event(PadEvent::Disconnected);
        assert_eq!(input.joy_axes, None);
        assert!(!input.is_joy_held(0));
        assert_eq!(input.axis(0), 0.0);
    }
}
