//! Per-frame input snapshot
//!
//! Event handlers mutate a live copy of this struct; the tick receives a
//! clone taken at the top of the frame, so a half-updated input is never
//! observed mid-step.

use glam::Vec2;

use crate::consts::STICK_MAX_THROW;

/// Virtual joystick reading: angle plus clamped throw distance. Present
/// only while a drag gesture holds the stick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stick {
    /// Direction of the drag, radians
    pub angle: f32,
    /// Drag distance clamped to [0, STICK_MAX_THROW]
    pub throw: f32,
}

impl Stick {
    /// Build a reading from a raw drag vector relative to the control
    /// center, clamping the throw
    pub fn from_drag(dx: f32, dy: f32) -> Self {
        Self {
            angle: dy.atan2(dx),
            throw: (dx * dx + dy * dy).sqrt().min(STICK_MAX_THROW),
        }
    }

    /// Movement contribution for a body with the given per-frame speed,
    /// scaled by how far the stick is pushed
    pub fn delta(&self, speed: f32) -> Vec2 {
        let scale = (self.throw / STICK_MAX_THROW) * speed;
        Vec2::new(self.angle.cos() * scale, self.angle.sin() * scale)
    }

    /// Clamped stick-knob offset in control-area units, for positioning
    /// the visual knob element
    pub fn knob_offset(&self) -> Vec2 {
        Vec2::new(self.angle.cos() * self.throw, self.angle.sin() * self.throw)
    }
}

/// Input for a single frame
#[derive(Debug, Clone, Default)]
pub struct InputSnapshot {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Active joystick gesture, if any
    pub stick: Option<Stick>,
    /// One-shot surface click in logical coordinates (restart hit-testing)
    pub restart_click: Option<Vec2>,
}

impl InputSnapshot {
    /// Total movement delta for this frame. Keyboard and joystick are
    /// independent sources; when both are active their deltas add. That
    /// matches the original game and is intentional.
    pub fn movement(&self, speed: f32) -> Vec2 {
        let mut delta = Vec2::ZERO;
        if self.up {
            delta.y -= speed;
        }
        if self.down {
            delta.y += speed;
        }
        if self.left {
            delta.x -= speed;
        }
        if self.right {
            delta.x += speed;
        }
        if let Some(stick) = &self.stick {
            delta += stick.delta(speed);
        }
        delta
    }

    /// Toggle a direction key by its DOM `key` value. Returns false for
    /// keys this game doesn't use.
    pub fn set_key(&mut self, key: &str, held: bool) -> bool {
        match key {
            "ArrowUp" => self.up = held,
            "ArrowDown" => self.down = held,
            "ArrowLeft" => self.left = held,
            "ArrowRight" => self.right = held,
            _ => return false,
        }
        true
    }
}
