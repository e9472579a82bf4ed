//! # Input Sampling
//!
//! Turns `winit` window events into one immutable [`InputSnapshot`] per
//! frame. The core only ever sees snapshots, so it can be driven headless by
//! building snapshots directly.
//!
//! Axes follow the usual keyboard pairs and range over [-1, 1]:
//!
//! | Axis          | -1          | +1           |
//! |---------------|-------------|--------------|
//! | `LeftRight`   | Arrow Left  | Arrow Right  |
//! | `UpDown`      | Arrow Down  | Arrow Up     |
//! | `WS`          | S           | W            |
//! | `AD`          | A           | D            |
//!
//! Key presses are edge-triggered: a key shows up in
//! [`InputSnapshot::was_pressed`] only in the frame its press arrived, never
//! while it is merely held or auto-repeating.

use std::collections::HashSet;

use cgmath::Vector2;
use winit::{
    event::{ElementState, KeyEvent, MouseButton, WindowEvent},
    keyboard::{KeyCode, PhysicalKey},
};

use crate::gfx::camera::screen_to_ndc;

/// Keyboard axis pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputAxis {
    LeftRight,
    UpDown,
    WS,
    AD,
}

impl InputAxis {
    /// (negative, positive) keys of the pair
    pub fn keys(self) -> (KeyCode, KeyCode) {
        match self {
            InputAxis::LeftRight => (KeyCode::ArrowLeft, KeyCode::ArrowRight),
            InputAxis::UpDown => (KeyCode::ArrowDown, KeyCode::ArrowUp),
            InputAxis::WS => (KeyCode::KeyS, KeyCode::KeyW),
            InputAxis::AD => (KeyCode::KeyA, KeyCode::KeyD),
        }
    }
}

/// Input state of a single frame
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputSnapshot {
    pub left_right: f32,
    pub up_down: f32,
    pub ws: f32,
    pub ad: f32,
    /// Primary (left) pointer button is held down
    pub pointer_down: bool,
    /// Keys whose press arrived this frame
    pub pressed: Vec<KeyCode>,
}

impl InputSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder pattern: Set one axis, clamped to [-1, 1]
    pub fn with_axis(mut self, axis: InputAxis, value: f32) -> Self {
        let value = value.clamp(-1.0, 1.0);
        match axis {
            InputAxis::LeftRight => self.left_right = value,
            InputAxis::UpDown => self.up_down = value,
            InputAxis::WS => self.ws = value,
            InputAxis::AD => self.ad = value,
        }
        self
    }

    /// Builder pattern: Hold the primary pointer button
    pub fn with_pointer_down(mut self, down: bool) -> Self {
        self.pointer_down = down;
        self
    }

    /// Builder pattern: Register a key press edge
    pub fn with_pressed(mut self, key: KeyCode) -> Self {
        if !self.pressed.contains(&key) {
            self.pressed.push(key);
        }
        self
    }

    pub fn axis(&self, axis: InputAxis) -> f32 {
        match axis {
            InputAxis::LeftRight => self.left_right,
            InputAxis::UpDown => self.up_down,
            InputAxis::WS => self.ws,
            InputAxis::AD => self.ad,
        }
    }

    pub fn was_pressed(&self, key: KeyCode) -> bool {
        self.pressed.contains(&key)
    }
}

/// Accumulates window events between frames
#[derive(Debug, Default)]
pub struct InputState {
    held: HashSet<KeyCode>,
    pressed: Vec<KeyCode>,
    pointer_down: bool,
    cursor: (f32, f32),
    window_size: (f32, f32),
}

impl InputState {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            window_size: (width as f32, height as f32),
            ..Default::default()
        }
    }

    /// Feeds one window event; returns true if it was consumed
    pub fn process_window_event(&mut self, event: &WindowEvent) -> bool {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                self.process_keyed_event(event);
                true
            }
            WindowEvent::MouseInput { state, button, .. } => {
                self.process_mouse_button(*button, *state);
                true
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor = (position.x as f32, position.y as f32);
                true
            }
            WindowEvent::Resized(size) => {
                self.window_size = (size.width as f32, size.height as f32);
                false
            }
            WindowEvent::Focused(false) => {
                // Releases never arrive for keys held while focus is lost
                self.held.clear();
                self.pointer_down = false;
                false
            }
            _ => false,
        }
    }

    pub fn process_keyed_event(&mut self, event: &KeyEvent) {
        if let PhysicalKey::Code(code) = event.physical_key {
            self.set_key(code, event.state == ElementState::Pressed);
        }
    }

    pub fn process_mouse_button(&mut self, button: MouseButton, state: ElementState) {
        if button == MouseButton::Left {
            self.pointer_down = state == ElementState::Pressed;
        }
    }

    /// Records a key transition; only an up-to-down change counts as a press
    pub fn set_key(&mut self, code: KeyCode, down: bool) {
        if down {
            if self.held.insert(code) {
                self.pressed.push(code);
            }
        } else {
            self.held.remove(&code);
        }
    }

    pub fn set_cursor(&mut self, x: f32, y: f32) {
        self.cursor = (x, y);
    }

    /// Cursor in normalized device coordinates
    pub fn cursor_ndc(&self) -> Vector2<f32> {
        if self.window_size.0 <= 0.0 || self.window_size.1 <= 0.0 {
            return Vector2::new(0.0, 0.0);
        }
        screen_to_ndc(self.cursor, self.window_size)
    }

    fn axis_value(&self, axis: InputAxis) -> f32 {
        let (neg, pos) = axis.keys();
        let value = |k: KeyCode| if self.held.contains(&k) { 1.0 } else { 0.0 };
        value(pos) - value(neg)
    }

    /// Captures the current frame and clears the press edges
    pub fn take_snapshot(&mut self) -> InputSnapshot {
        InputSnapshot {
            left_right: self.axis_value(InputAxis::LeftRight),
            up_down: self.axis_value(InputAxis::UpDown),
            ws: self.axis_value(InputAxis::WS),
            ad: self.axis_value(InputAxis::AD),
            pointer_down: self.pointer_down,
            pressed: std::mem::take(&mut self.pressed),
        }
    }
}
