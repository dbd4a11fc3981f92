//! Interactive session: the explicit context every event handler works on.
//!
//! `AppContext` owns the dataset, the committed view, the normalized matrix
//! derived from it, markers, visibility, scale, and the render bridge.
//! `InteractionState` holds the probe selection and key buffer. Handlers
//! (see `handlers`) run to completion and request at most one redraw.

pub mod events;
mod handlers;

pub use events::{Event, EventKind, EventTable, Handler, Pointer};

use crate::config::ViewOptions;
use crate::data::Dataset;
use crate::render::{MessageLevel, RenderBridge};
use crate::view::{
    LineData, MultiMarker, NormalizationEngine, NormalizedMatrix, ViewError, ViewState,
    ViewWindow, VisibilityState, YScale,
};

/// Shown at startup and whenever probing is switched off.
pub const INSTRUCTIONS: &str =
    "Press 'c' to add cursor, then enter a fund's index. Press 'c' to remove cursor.";

/// Shown when probing is switched on.
pub const SELECT_PROMPT: &str = "Now select a fund by typing its 2-digit identifier.";

/// Key that toggles cursor probing.
pub const CURSOR_TOGGLE_KEY: char = 'c';

/// Probe selection and key-entry state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InteractionState {
    /// Selected series, by legend index.
    pub selected: Option<usize>,
    pub cursor_enabled: bool,
    /// Digits typed so far toward a two-digit selection.
    pub digit_buffer: String,
}

pub struct AppContext<R: RenderBridge> {
    dataset: Dataset,
    view: ViewState,
    normalized: NormalizedMatrix,
    lines: Vec<LineData>,
    visibility: VisibilityState,
    markers: MultiMarker,
    scale: YScale,
    cursor_x: Option<f64>,
    bridge: R,
}

impl<R: RenderBridge> AppContext<R> {
    /// Start on the full calendar with the anchor at its first day, and push
    /// the initial state to the bridge.
    pub fn new(dataset: Dataset, options: &ViewOptions, bridge: R) -> Result<Self, ViewError> {
        let view = ViewState::new(dataset.calendar.first(), dataset.calendar.last());
        let w = view.window();
        let normalized = NormalizationEngine::normalize(&dataset.aligned, w.min, w.max, w.norm)?;
        let lines = LineData::from_normalized(&normalized);
        let visibility = VisibilityState::new(dataset.labels());

        let mut ctx = Self {
            dataset,
            view,
            normalized,
            lines,
            visibility,
            markers: MultiMarker::new(options.marker_hit_radius),
            scale: YScale::new(options.log_ticks.clone()),
            cursor_x: None,
            bridge,
        };

        ctx.bridge.set_window(&w);
        ctx.push_lines();
        ctx.bridge.set_scale(ctx.scale.mode(), ctx.scale.ticks());
        ctx.bridge.set_cursor(None);
        ctx.bridge.post_message(MessageLevel::Info, INSTRUCTIONS);
        ctx.bridge.request_redraw();
        Ok(ctx)
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn window(&self) -> ViewWindow {
        self.view.window()
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn normalized(&self) -> &NormalizedMatrix {
        &self.normalized
    }

    pub fn lines(&self) -> &[LineData] {
        &self.lines
    }

    pub fn visibility(&self) -> &VisibilityState {
        &self.visibility
    }

    pub fn markers(&self) -> &MultiMarker {
        &self.markers
    }

    pub fn scale(&self) -> &YScale {
        &self.scale
    }

    pub fn cursor_x(&self) -> Option<f64> {
        self.cursor_x
    }

    pub fn bridge(&self) -> &R {
        &self.bridge
    }

    pub fn bridge_mut(&mut self) -> &mut R {
        &mut self.bridge
    }

    /// Install a freshly computed matrix and push window and lines.
    fn commit(&mut self, normalized: NormalizedMatrix) {
        self.normalized = normalized;
        self.lines = LineData::from_normalized(&self.normalized);
        let window = self.view.window();
        self.bridge.set_window(&window);
        self.push_lines();
    }

    fn push_lines(&mut self) {
        for (i, line) in self.lines.iter().enumerate() {
            self.bridge.set_line(i, line, self.visibility.is_visible(i));
        }
    }
}
