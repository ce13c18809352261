//! Pointer, wheel and touch input mapped onto the orbit camera.
//!
//! | Gesture | Effect |
//! |---------|--------|
//! | Left drag / one finger | rotate |
//! | Right or middle drag | pan |
//! | Wheel / two-finger pinch | zoom |
//!
//! [`OrbitControls::handle_event`] is a thin dispatcher over winit events;
//! the per-gesture methods can be driven directly.

use std::collections::HashMap;

use glam::Vec2;
use winit::event::{
    ElementState, MouseButton as WinitMouseButton, MouseScrollDelta, Touch, TouchPhase, WindowEvent,
};

use crate::camera::OrbitCamera;

const ROTATE_SPEED: f32 = 0.005;
const PIXELS_PER_LINE: f32 = 40.0;
const PINCH_SPEED: f32 = 0.05;

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
    Other,
}

impl From<WinitMouseButton> for MouseButton {
    fn from(btn: WinitMouseButton) -> Self {
        match btn {
            WinitMouseButton::Left => MouseButton::Left,
            WinitMouseButton::Right => MouseButton::Right,
            WinitMouseButton::Middle => MouseButton::Middle,
            _ => MouseButton::Other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Drag {
    Rotate,
    Pan,
}

/// Maps pointer gestures onto an [`OrbitCamera`].
#[derive(Debug)]
pub struct OrbitControls {
    drag: Option<Drag>,
    cursor: Option<Vec2>,
    touches: HashMap<u64, Vec2>,
    pinch: Option<f32>,
    /// Disable all camera input while leaving the controls attached.
    pub enabled: bool,
}

impl OrbitControls {
    pub fn new() -> Self {
        Self {
            drag: None,
            cursor: None,
            touches: HashMap::new(),
            pinch: None,
            enabled: true,
        }
    }

    /// Route a window event to the camera. Returns `true` if it was used.
    pub fn handle_event(&mut self, event: &WindowEvent, camera: &mut OrbitCamera) -> bool {
        if !self.enabled {
            return false;
        }
        match event {
            WindowEvent::MouseInput { state, button, .. } => {
                self.button((*button).into(), *state == ElementState::Pressed)
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.cursor_moved(Vec2::new(position.x as f32, position.y as f32), camera)
            }
            WindowEvent::CursorLeft { .. } => {
                self.release();
                false
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let lines = match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / PIXELS_PER_LINE,
                };
                self.scroll(lines, camera)
            }
            WindowEvent::Touch(Touch { phase, location, id, .. }) => self.touch(
                *id,
                *phase,
                Vec2::new(location.x as f32, location.y as f32),
                camera,
            ),
            _ => false,
        }
    }

    /// Press or release a mouse button.
    pub fn button(&mut self, button: MouseButton, pressed: bool) -> bool {
        let mode = match button {
            MouseButton::Left => Drag::Rotate,
            MouseButton::Right | MouseButton::Middle => Drag::Pan,
            MouseButton::Other => return false,
        };
        if pressed {
            self.drag = Some(mode);
        } else if self.drag == Some(mode) {
            self.drag = None;
        }
        true
    }

    /// Cursor moved to `position` (window pixels).
    pub fn cursor_moved(&mut self, position: Vec2, camera: &mut OrbitCamera) -> bool {
        let last = self.cursor.replace(position);
        let (Some(drag), Some(last)) = (self.drag, last) else {
            return false;
        };
        let delta = position - last;
        match drag {
            Drag::Rotate => camera.rotate(-delta.x * ROTATE_SPEED, delta.y * ROTATE_SPEED),
            Drag::Pan => camera.pan(delta.x, delta.y),
        }
        true
    }

    /// Wheel scrolled by `lines`; positive zooms in.
    pub fn scroll(&mut self, lines: f32, camera: &mut OrbitCamera) -> bool {
        if lines == 0.0 || !lines.is_finite() {
            return false;
        }
        camera.zoom(lines);
        true
    }

    /// Touch contact update. One finger rotates, two fingers pinch-zoom.
    pub fn touch(
        &mut self,
        id: u64,
        phase: TouchPhase,
        position: Vec2,
        camera: &mut OrbitCamera,
    ) -> bool {
        match phase {
            TouchPhase::Started => {
                self.touches.insert(id, position);
                self.pinch = self.pinch_distance();
                false
            }
            TouchPhase::Moved => {
                let Some(last) = self.touches.insert(id, position) else {
                    return false;
                };
                match self.touches.len() {
                    1 => {
                        let delta = position - last;
                        camera.rotate(-delta.x * ROTATE_SPEED, delta.y * ROTATE_SPEED);
                        true
                    }
                    2 => {
                        let current = self.pinch_distance();
                        let used = match (self.pinch, current) {
                            (Some(before), Some(now)) => {
                                camera.zoom((now - before) * PINCH_SPEED);
                                true
                            }
                            _ => false,
                        };
                        self.pinch = current;
                        used
                    }
                    _ => false,
                }
            }
            TouchPhase::Ended | TouchPhase::Cancelled => {
                self.touches.remove(&id);
                self.pinch = self.pinch_distance();
                false
            }
        }
    }

    /// Forget any drag in progress.
    pub fn release(&mut self) {
        self.drag = None;
        self.cursor = None;
        self.touches.clear();
        self.pinch = None;
    }

    fn pinch_distance(&self) -> Option<f32> {
        if self.touches.len() != 2 {
            return None;
        }
        let mut points = self.touches.values();
        let a = *points.next()?;
        let b = *points.next()?;
        Some(a.distance(b))
    }
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self::new()
    }
}
