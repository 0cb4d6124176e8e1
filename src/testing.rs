// Host doubles for native unit tests.

use crate::color::Color;
use crate::random::RandomSource;
use crate::schedule::{CallbackHandle, Scheduler};
use crate::surface::Surface;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Clone, Debug, PartialEq)]
pub enum DrawCall {
    Clear { width: f64, height: f64 },
    Fill(Color),
    Circle { x: f64, y: f64, radius: f64 },
}

pub struct RecordingSurface {
    pub width: u32,
    pub height: u32,
    pub container: Rc<RefCell<(u32, u32)>>,
    pub calls: Vec<DrawCall>,
}

impl RecordingSurface {
    pub fn new(container_width: u32, container_height: u32) -> RecordingSurface {
        RecordingSurface {
            width: 0,
            height: 0,
            container: Rc::new(RefCell::new((container_width, container_height))),
            calls: Vec::new(),
        }
    }

    pub fn circles(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, DrawCall::Circle { .. }))
            .count()
    }

    pub fn clears(&self) -> usize {
        self.calls
            .iter()
            .filter(|c| matches!(c, DrawCall::Clear { .. }))
            .count()
    }
}

impl Surface for RecordingSurface {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn container_size(&self) -> (u32, u32) {
        *self.container.borrow()
    }

    fn set_size(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    fn clear_rect(&mut self, _x: f64, _y: f64, width: f64, height: f64) {
        self.calls.push(DrawCall::Clear { width, height });
    }

    fn set_fill_color(&mut self, color: Color) {
        self.calls.push(DrawCall::Fill(color));
    }

    fn fill_circle(&mut self, x: f64, y: f64, radius: f64) {
        self.calls.push(DrawCall::Circle { x, y, radius });
    }
}

/// Records outstanding frame and timer requests instead of running them.
#[derive(Default)]
pub struct ManualScheduler {
    next_handle: CallbackHandle,
    pub frames: Vec<CallbackHandle>,
    pub timers: Vec<(CallbackHandle, u32)>,
    pub cancelled_frames: Vec<CallbackHandle>,
    pub cancelled_timers: Vec<CallbackHandle>,
    pub refuse: bool,
}

impl ManualScheduler {
    /// Pops the oldest frame request, as the host does when it runs the callback.
    pub fn fire_frame(&mut self) -> bool {
        if self.frames.is_empty() {
            return false;
        }
        self.frames.remove(0);
        true
    }

    pub fn fire_timer(&mut self) -> bool {
        if self.timers.is_empty() {
            return false;
        }
        self.timers.remove(0);
        true
    }

    fn issue(&mut self) -> Option<CallbackHandle> {
        if self.refuse {
            return None;
        }
        self.next_handle += 1;
        Some(self.next_handle)
    }
}

impl Scheduler for ManualScheduler {
    fn request_frame(&mut self) -> Option<CallbackHandle> {
        let handle = self.issue()?;
        self.frames.push(handle);
        Some(handle)
    }

    fn cancel_frame(&mut self, handle: CallbackHandle) {
        self.frames.retain(|&h| h != handle);
        self.cancelled_frames.push(handle);
    }

    fn start_timer(&mut self, delay_ms: u32) -> Option<CallbackHandle> {
        let handle = self.issue()?;
        self.timers.push((handle, delay_ms));
        Some(handle)
    }

    fn cancel_timer(&mut self, handle: CallbackHandle) {
        self.timers.retain(|&(h, _)| h != handle);
        self.cancelled_timers.push(handle);
    }
}

/// Replays a fixed list of draws, cycling when exhausted.
pub struct ScriptedRandom {
    values: Vec<f64>,
    cursor: usize,
}

impl ScriptedRandom {
    pub fn new(values: Vec<f64>) -> ScriptedRandom {
        ScriptedRandom { values, cursor: 0 }
    }
}

impl RandomSource for ScriptedRandom {
    fn next_unit(&mut self) -> f64 {
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value
    }
}
