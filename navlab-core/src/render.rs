//! The render seam. The core never draws: it pushes state through this trait
//! and asks for a redraw; the front end decides when and how to paint.

use crate::view::{LineData, Marker, ScaleMode, ViewWindow};

/// Severity of a posted message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Warning,
    Error,
}

pub trait RenderBridge {
    /// Visible range and anchor line.
    fn set_window(&mut self, window: &ViewWindow);

    /// Replace the data of line `index` (legend order).
    fn set_line(&mut self, index: usize, line: &LineData, visible: bool);

    /// Create or move marker `index`.
    fn set_marker(&mut self, index: usize, marker: &Marker);

    /// Vertical probe line at `x`, or hidden.
    fn set_cursor(&mut self, x: Option<f64>);

    /// Y-axis mode; `ticks` is the fixed tick list in log mode.
    fn set_scale(&mut self, mode: ScaleMode, ticks: Option<&[f64]>);

    /// Status-line message.
    fn post_message(&mut self, level: MessageLevel, text: &str);

    fn request_redraw(&mut self);
}
