//! Built-in event handlers.
//!
//! Each handler leaves every structure in `AppContext` valid and ends with at
//! most one `request_redraw`.

use chrono::NaiveDate;

use super::events::Event;
use super::{AppContext, InteractionState, CURSOR_TOGGLE_KEY, INSTRUCTIONS, SELECT_PROMPT};
use crate::domain::{format_date, num_to_date};
use crate::render::{MessageLevel, RenderBridge};
use crate::view::{CursorProbe, NormalizedMatrix, ProbeError, ViewError};

impl<R: RenderBridge> AppContext<R> {
    pub fn on_slider_changed(&mut self, _interaction: &mut InteractionState, event: &Event) {
        let Event::SliderChanged { control, value } = *event else {
            return;
        };
        let Some(date) = num_to_date(value) else {
            tracing::debug!(value, "slider value outside the date domain");
            return;
        };
        let w = self.view.window().with(control, date);
        tracing::debug!(?control, %date, "slider changed");
        let result = self
            .view
            .set_window(w.min, w.max, w.norm, &self.dataset.aligned);
        self.apply_window_result(result);
    }

    pub fn on_dates_submitted(&mut self, _interaction: &mut InteractionState, event: &Event) {
        let Event::DatesSubmitted { min, max, norm } = event else {
            return;
        };
        let result = self
            .view
            .submit_explicit_dates(min, max, norm, &self.dataset.aligned);
        self.apply_window_result(result);
    }

    pub fn on_key(&mut self, interaction: &mut InteractionState, event: &Event) {
        let Event::Key(key) = *event else {
            return;
        };
        if key.is_ascii_digit() {
            interaction.digit_buffer.push(key);
            if interaction.digit_buffer.len() < 2 {
                return;
            }
            let id = std::mem::take(&mut interaction.digit_buffer);
            interaction.selected = self.select_series(&id);
            if !interaction.cursor_enabled {
                self.bridge.set_cursor(None);
            }
            self.bridge.request_redraw();
        } else if key == CURSOR_TOGGLE_KEY {
            interaction.cursor_enabled = !interaction.cursor_enabled;
            interaction.digit_buffer.clear();
            if interaction.cursor_enabled {
                self.bridge.post_message(MessageLevel::Info, SELECT_PROMPT);
            } else {
                interaction.selected = None;
                self.cursor_x = None;
                self.bridge.set_cursor(None);
                self.bridge.post_message(MessageLevel::Info, INSTRUCTIONS);
            }
            tracing::debug!(enabled = interaction.cursor_enabled, "cursor probe toggled");
            self.bridge.request_redraw();
        }
    }

    pub fn on_pointer_moved(&mut self, interaction: &mut InteractionState, event: &Event) {
        let Event::PointerMoved(pointer) = *event else {
            return;
        };

        if self.markers.drag_state().marker().is_some() {
            let Some(date) = num_to_date(pointer.x) else {
                return;
            };
            let w = self.view.window();
            if let Some(i) = self.markers.drag_to(date.clamp(w.min, w.max)) {
                if let Some(marker) = self.markers.get(i) {
                    self.bridge.set_marker(i, marker);
                }
                self.bridge.request_redraw();
            }
            return;
        }

        if !interaction.cursor_enabled {
            return;
        }
        let Some(selected) = interaction.selected else {
            return;
        };

        self.cursor_x = Some(pointer.x);
        self.bridge.set_cursor(self.cursor_x);
        if self.visibility.is_visible(selected) {
            self.probe(selected, pointer.x);
        }
        self.bridge.request_redraw();
    }

    pub fn on_pointer_pressed(&mut self, _interaction: &mut InteractionState, event: &Event) {
        let Event::PointerPressed(pointer) = *event else {
            return;
        };
        if let Some(i) = self.markers.press(pointer.x, pointer.px_per_day) {
            tracing::debug!(marker = i, "marker grabbed");
        }
    }

    pub fn on_pointer_released(&mut self, _interaction: &mut InteractionState, _event: &Event) {
        if let Some(i) = self.markers.release() {
            tracing::debug!(marker = i, "marker released");
        }
    }

    pub fn on_pointer_left(&mut self, _interaction: &mut InteractionState, _event: &Event) {
        if self.cursor_x.take().is_some() {
            self.bridge.set_cursor(None);
            self.bridge.request_redraw();
        }
    }

    pub fn on_legend_clicked(&mut self, _interaction: &mut InteractionState, event: &Event) {
        let Event::LegendClicked { label } = event else {
            return;
        };
        match self.visibility.toggle_visibility(label) {
            Ok((index, visible)) => {
                if let Some(line) = self.lines.get(index) {
                    self.bridge.set_line(index, line, visible);
                }
                tracing::debug!(%label, visible, "visibility toggled");
            }
            Err(e) => self.bridge.post_message(MessageLevel::Warning, &e.to_string()),
        }
        self.bridge.request_redraw();
    }

    pub fn on_add_marker(&mut self, _interaction: &mut InteractionState, _event: &Event) {
        let date = self.view.window().midpoint();
        self.add_marker_at(date);
    }

    pub fn on_toggle_scale(&mut self, _interaction: &mut InteractionState, _event: &Event) {
        let mode = self.scale.toggle();
        self.bridge.set_scale(mode, self.scale.ticks());
        tracing::debug!(mode = mode.name(), "y-scale toggled");
        self.bridge.request_redraw();
    }

    /// Append a marker at `date` with the next palette color.
    pub fn add_marker_at(&mut self, date: NaiveDate) -> usize {
        let color = self.markers.next_color();
        let index = self.markers.add_marker(color, date);
        if let Some(marker) = self.markers.get(index) {
            self.bridge.set_marker(index, marker);
            self.bridge
                .post_message(MessageLevel::Info, &format!("Added marker at {}", marker.label));
        }
        self.bridge.request_redraw();
        index
    }

    fn apply_window_result(&mut self, result: Result<NormalizedMatrix, ViewError>) {
        match result {
            Ok(normalized) => self.commit(normalized),
            Err(e) => {
                tracing::debug!(error = %e, "window change rejected");
                let level = match e {
                    ViewError::InvalidDate { .. } => MessageLevel::Error,
                    _ => MessageLevel::Warning,
                };
                self.bridge.post_message(level, &e.to_string());
            }
        }
        self.bridge.request_redraw();
    }

    /// Resolve a two-digit, 1-based identifier.
    fn select_series(&mut self, id: &str) -> Option<usize> {
        let index = id.parse::<usize>().ok().and_then(|n| n.checked_sub(1));
        match index.filter(|i| *i < self.dataset.series.len()) {
            Some(i) => {
                let label = &self.dataset.labels()[i];
                self.bridge
                    .post_message(MessageLevel::Info, &format!("Selected fund: {label}"));
                Some(i)
            }
            None => {
                self.bridge
                    .post_message(MessageLevel::Warning, &format!("Invalid fund ID: {id}"));
                None
            }
        }
    }

    fn probe(&mut self, series: usize, x: f64) {
        let Some(line) = self.lines.get(series) else {
            return;
        };
        let label = &self.dataset.labels()[series];
        match CursorProbe::locate(line, x) {
            Ok(sample) => {
                let nav = self
                    .dataset
                    .aligned
                    .value(series, sample.date)
                    .map_or_else(|| "n/a".to_string(), |v| format!("{v:.2}"));
                let text = format!(
                    "Fund: {label}, Date: {}, NAV: {nav}, Index: {:.2}",
                    format_date(sample.date),
                    sample.value
                );
                self.bridge.post_message(MessageLevel::Info, &text);
            }
            Err(ProbeError::NoValidSample { date }) => {
                let text = format!("Fund: {label}, no data at or before {}", format_date(date));
                self.bridge.post_message(MessageLevel::Info, &text);
            }
            Err(ProbeError::EmptyLine) => {}
        }
    }
}
