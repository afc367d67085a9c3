//! Logical input actions and their translation from winit events.

use bitflags::bitflags;
use winit::{
    event::{DeviceEvent, ElementState, KeyEvent, WindowEvent},
    keyboard::{KeyCode, PhysicalKey},
};

bitflags! {
    /// Movement actions currently held down.
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
    pub struct Actions: u8 {
        const STRAFE_LEFT = 1 << 0;
        const STRAFE_RIGHT = 1 << 1;
        const FORWARD = 1 << 2;
        const BACKWARD = 1 << 3;
        const ASCEND = 1 << 4;
        const DESCEND = 1 << 5;
    }
}

/// Input as the game sees it, independent of the windowing backend.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    PointerDelta { dx: f64, dy: f64 },
    Key {
        action: Actions,
        pressed: bool,
        repeat: bool,
    },
    ToggleCapture,
}

pub fn action_for_key(code: KeyCode) -> Option<Actions> {
    match code {
        KeyCode::KeyA => Some(Actions::STRAFE_LEFT),
        KeyCode::KeyD => Some(Actions::STRAFE_RIGHT),
        KeyCode::KeyW => Some(Actions::FORWARD),
        KeyCode::KeyS => Some(Actions::BACKWARD),
        KeyCode::Space => Some(Actions::ASCEND),
        KeyCode::ShiftLeft => Some(Actions::DESCEND),
        _ => None,
    }
}

/// Maps a physical key transition to an [`InputEvent`].
///
/// Escape toggles capture on its initial press only. Unmapped keys yield
/// `None`.
pub fn translate_key(code: KeyCode, state: ElementState, repeat: bool) -> Option<InputEvent> {
    let pressed = state.is_pressed();
    if code == KeyCode::Escape {
        return (pressed && !repeat).then_some(InputEvent::ToggleCapture);
    }
    action_for_key(code).map(|action| InputEvent::Key {
        action,
        pressed,
        repeat,
    })
}

pub fn translate_window_event(event: &WindowEvent) -> Option<InputEvent> {
    match event {
        WindowEvent::KeyboardInput {
            event:
                KeyEvent {
                    physical_key: PhysicalKey::Code(code),
                    state,
                    repeat,
                    ..
                },
            ..
        } => translate_key(*code, *state, *repeat),
        _ => None,
    }
}

/// Raw mouse motion is used for looking since it keeps arriving while the
/// cursor is locked.
pub fn translate_device_event(event: &DeviceEvent) -> Option<InputEvent> {
    match event {
        DeviceEvent::MouseMotion { delta: (dx, dy) } => Some(InputEvent::PointerDelta {
            dx: *dx,
            dy: *dy,
        }),
        _ => None,
    }
}

/// Held actions plus whether the pointer is captured.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputState {
    actions: Actions,
    captured: bool,
}

impl InputState {
    pub fn new(captured: bool) -> Self {
        Self {
            actions: Actions::empty(),
            captured,
        }
    }

    /// Applies a key transition. Repeated key-downs are ignored; a key-up
    /// always clears the action.
    pub fn handle_key(&mut self, action: Actions, pressed: bool, repeat: bool) {
        match (pressed, repeat) {
            (true, true) => {}
            (true, false) => self.press(action),
            (false, _) => self.release(action),
        }
    }

    pub fn press(&mut self, action: Actions) {
        self.actions.insert(action);
    }

    pub fn release(&mut self, action: Actions) {
        self.actions.remove(action);
    }

    pub fn actions(&self) -> Actions {
        self.actions
    }

    pub fn is_captured(&self) -> bool {
        self.captured
    }

    pub fn set_captured(&mut self, captured: bool) {
        self.captured = captured;
    }

    /// Flips capture and returns the new state.
    pub fn toggle_capture(&mut self) -> bool {
        self.captured = !self.captured;
        self.captured
    }
}
