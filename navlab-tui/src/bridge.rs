//! Retained chart frame: the terminal implementation of `RenderBridge`.
//!
//! Handlers write into the frame; the draw pass reads it. A redraw request
//! only marks the frame dirty, so any number of requests between two draws
//! cost one paint.

use navlab_core::render::{MessageLevel, RenderBridge};
use navlab_core::view::{LineData, Marker, ScaleMode, ViewWindow};

#[derive(Debug, Clone, Default)]
pub struct FrameLine {
    pub data: LineData,
    pub visible: bool,
}

#[derive(Debug, Default)]
pub struct ChartFrame {
    pub window: Option<ViewWindow>,
    pub lines: Vec<FrameLine>,
    pub markers: Vec<Marker>,
    pub cursor: Option<f64>,
    pub scale: ScaleMode,
    pub log_ticks: Vec<f64>,
    /// Messages posted since the app last drained them.
    pub inbox: Vec<(MessageLevel, String)>,
    dirty: bool,
}

impl ChartFrame {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn mark_drawn(&mut self) {
        self.dirty = false;
    }

    /// Y-range over visible lines, if any has data.
    pub fn y_range(&self) -> Option<(f64, f64)> {
        self.lines
            .iter()
            .filter(|l| l.visible)
            .filter_map(|l| l.data.y_range())
            .reduce(|(lo, hi), (l, h)| (lo.min(l), hi.max(h)))
    }
}

impl RenderBridge for ChartFrame {
    fn set_window(&mut self, window: &ViewWindow) {
        self.window = Some(*window);
    }

    fn set_line(&mut self, index: usize, line: &LineData, visible: bool) {
        if index >= self.lines.len() {
            self.lines.resize_with(index + 1, FrameLine::default);
        }
        self.lines[index] = FrameLine {
            data: line.clone(),
            visible,
        };
    }

    fn set_marker(&mut self, index: usize, marker: &Marker) {
        if index >= self.markers.len() {
            self.markers.resize(index + 1, marker.clone());
        }
        self.markers[index] = marker.clone();
    }

    fn set_cursor(&mut self, x: Option<f64>) {
        self.cursor = x;
    }

    fn set_scale(&mut self, mode: ScaleMode, ticks: Option<&[f64]>) {
        self.scale = mode;
        if let Some(ticks) = ticks {
            self.log_ticks = ticks.to_vec();
        }
    }

    fn post_message(&mut self, level: MessageLevel, text: &str) {
        self.inbox.push((level, text.to_string()));
    }

    fn request_redraw(&mut self) {
        self.dirty = true;
    }
}
