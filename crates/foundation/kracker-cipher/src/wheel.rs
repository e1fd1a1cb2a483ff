//! Rotary wheel state
//!
//! The engine is pure; this is the small piece of mutable state a front end
//! keeps between pointer events. Angles accumulate freely while dragging and
//! are snapped back onto a letter when the drag ends.

use crate::engine::{angle_to_shift, shift_to_angle};
use crate::Shift;
use serde::{Deserialize, Serialize};

/// Drag-to-rotate cipher wheel
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Wheel {
    /// Cumulative rotation in degrees, unbounded while dragging
    angle: f64,
    #[serde(skip)]
    drag: Option<Drag>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Drag {
    last_pointer: f64,
}

impl Wheel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wheel resting exactly on `shift`
    pub fn at_shift(shift: Shift) -> Self {
        Self {
            angle: shift_to_angle(shift),
            drag: None,
        }
    }

    pub fn angle(&self) -> f64 {
        self.angle
    }

    /// Live "Shift: N" readout
    pub fn shift(&self) -> Shift {
        angle_to_shift(self.angle)
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn begin_drag(&mut self, pointer_deg: f64) {
        self.drag = Some(Drag {
            last_pointer: pointer_deg,
        });
    }

    /// Follow the pointer and return the shift under it.
    pub fn drag_to(&mut self, pointer_deg: f64) -> Shift {
        if let Some(drag) = self.drag.as_mut() {
            let delta = unwrap_delta(pointer_deg - drag.last_pointer);
            if delta.is_finite() {
                self.angle += delta;
                drag.last_pointer = pointer_deg;
            }
        }
        self.shift()
    }

    /// End the drag and snap onto the nearest letter. Returns the snapped angle.
    pub fn release(&mut self) -> f64 {
        self.drag = None;
        self.angle = shift_to_angle(self.shift());
        self.angle
    }

    /// Button tap: move by `delta` letters. Cancels any drag in progress.
    pub fn step(&mut self, delta: i64) -> Shift {
        let shift = self.shift().offset(delta);
        self.drag = None;
        self.angle = shift_to_angle(shift);
        shift
    }

    pub fn set_shift(&mut self, shift: Shift) {
        self.drag = None;
        self.angle = shift_to_angle(shift);
    }
}

/// Pointer direction around the wheel center, in degrees
pub fn pointer_angle(center: (f64, f64), point: (f64, f64)) -> f64 {
    let (dx, dy) = (point.0 - center.0, point.1 - center.1);
    dy.atan2(dx).to_degrees()
}

/// Map a raw pointer delta into [-180, 180) so crossing the atan2 seam
/// does not count as a full turn
fn unwrap_delta(delta: f64) -> f64 {
    (delta + 180.0).rem_euclid(360.0) - 180.0
}
