//! Application state — single-owner, main-thread only.
//!
//! Wraps the core session (`AppContext` over a `ChartFrame`) together with
//! terminal-only state: overlays, the focused date control, and the message
//! history.

use std::collections::VecDeque;

use chrono::NaiveDateTime;
use ratatui::layout::Rect;

use navlab_core::config::ViewOptions;
use navlab_core::data::Dataset;
use navlab_core::domain::format_date;
use navlab_core::render::MessageLevel;
use navlab_core::session::{AppContext, Event, EventTable, InteractionState};
use navlab_core::view::{DateControl, ViewError};

use crate::bridge::ChartFrame;

const HISTORY_CAP: usize = 50;

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

impl From<MessageLevel> for StatusLevel {
    fn from(level: MessageLevel) -> Self {
        match level {
            MessageLevel::Info => StatusLevel::Info,
            MessageLevel::Warning => StatusLevel::Warning,
            MessageLevel::Error => StatusLevel::Error,
        }
    }
}

impl StatusLevel {
    pub fn label(self) -> &'static str {
        match self {
            StatusLevel::Info => "INFO",
            StatusLevel::Warning => "WARN",
            StatusLevel::Error => "ERR",
        }
    }
}

/// A message record for the history overlay.
#[derive(Debug, Clone)]
pub struct MessageRecord {
    pub timestamp: NaiveDateTime,
    pub level: StatusLevel,
    pub message: String,
}

/// Three-field `dd-mm-yyyy` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateEntry {
    /// min, max, norm
    pub fields: [String; 3],
    pub focus: usize,
}

impl DateEntry {
    pub const LABELS: [&'static str; 3] = ["Min Date", "Max Date", "Norm Date"];

    pub fn focused_mut(&mut self) -> &mut String {
        &mut self.fields[self.focus]
    }

    pub fn next_field(&mut self) {
        self.focus = (self.focus + 1) % 3;
    }

    pub fn prev_field(&mut self) {
        self.focus = (self.focus + 2) % 3;
    }

    pub fn to_event(&self) -> Event {
        Event::DatesSubmitted {
            min: self.fields[0].clone(),
            max: self.fields[1].clone(),
            norm: self.fields[2].clone(),
        }
    }
}

/// Which overlay (if any) is shown on top.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay {
    None,
    Help,
    MessageHistory,
    DateEntry(DateEntry),
}

pub struct AppState {
    pub running: bool,
    pub ctx: AppContext<ChartFrame>,
    pub interaction: InteractionState,
    pub table: EventTable<ChartFrame>,

    pub focused_control: DateControl,
    pub overlay: Overlay,
    /// Terminal area at the last draw; mouse hit-testing uses it.
    pub screen: Rect,
    /// Whether the pointer was over the plot on the last mouse event.
    pub pointer_in_plot: bool,

    pub status_message: Option<(String, StatusLevel)>,
    pub message_history: VecDeque<MessageRecord>,
    pub history_scroll: usize,
}

impl AppState {
    pub fn new(dataset: Dataset, options: &ViewOptions) -> Result<Self, ViewError> {
        let ctx = AppContext::new(dataset, options, ChartFrame::new())?;
        let mut app = Self {
            running: true,
            ctx,
            interaction: InteractionState::default(),
            table: EventTable::standard(),
            focused_control: DateControl::Anchor,
            overlay: Overlay::None,
            screen: Rect::default(),
            pointer_in_plot: false,
            status_message: None,
            message_history: VecDeque::with_capacity(HISTORY_CAP),
            history_scroll: 0,
        };
        app.drain_messages();
        Ok(app)
    }

    pub fn frame(&self) -> &ChartFrame {
        self.ctx.bridge()
    }

    /// Route an event through the handler table, then collect its messages.
    pub fn dispatch(&mut self, event: Event) {
        self.table
            .dispatch(&mut self.ctx, &mut self.interaction, &event);
        self.drain_messages();
    }

    /// Move posted messages into the status line and history.
    fn drain_messages(&mut self) {
        let inbox = std::mem::take(&mut self.ctx.bridge_mut().inbox);
        for (level, text) in inbox {
            self.push_message(level.into(), text);
        }
    }

    /// Record a message, capping the history at 50.
    pub fn push_message(&mut self, level: StatusLevel, message: String) {
        self.message_history.push_front(MessageRecord {
            timestamp: chrono::Local::now().naive_local(),
            level,
            message: message.clone(),
        });
        if self.message_history.len() > HISTORY_CAP {
            self.message_history.pop_back();
        }
        self.status_message = Some((message, level));
        self.ctx.bridge_mut().mark_dirty();
    }

    /// Prefilled date-entry overlay for the current window.
    pub fn open_date_entry(&mut self) {
        let w = self.ctx.window();
        self.overlay = Overlay::DateEntry(DateEntry {
            fields: [format_date(w.min), format_date(w.max), format_date(w.norm)],
            focus: 0,
        });
        self.ctx.bridge_mut().mark_dirty();
    }

    pub fn set_overlay(&mut self, overlay: Overlay) {
        self.overlay = overlay;
        self.ctx.bridge_mut().mark_dirty();
    }

    pub fn needs_draw(&self) -> bool {
        self.frame().is_dirty()
    }

    pub fn mark_drawn(&mut self) {
        self.ctx.bridge_mut().mark_drawn();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::app;

    #[test]
    fn startup_message_lands_in_status() {
        let app = app();
        let (msg, level) = app.status_message.clone().unwrap();
        assert!(msg.starts_with("Press 'c'"));
        assert_eq!(level, StatusLevel::Info);
        assert_eq!(app.message_history.len(), 1);
        assert!(app.needs_draw());
    }

    #[test]
    fn message_history_caps_at_50() {
        let mut app = app();
        for i in 0..60 {
            app.push_message(StatusLevel::Warning, format!("message {i}"));
        }
        assert_eq!(app.message_history.len(), 50);
        assert!(app.message_history[0].message.contains("59"));
    }

    #[test]
    fn date_entry_prefills_current_window() {
        let mut app = app();
        app.open_date_entry();
        let Overlay::DateEntry(entry) = &app.overlay else {
            panic!("expected date entry");
        };
        assert_eq!(entry.fields[0], "01-01-2020");
        assert_eq!(entry.fields[2], "01-01-2020");
        let mut entry = entry.clone();
        entry.prev_field();
        assert_eq!(entry.focus, 2);
        entry.next_field();
        assert_eq!(entry.focus, 0);
    }

    #[test]
    fn dispatch_collects_messages() {
        let mut app = app();
        app.dispatch(Event::Key('0'));
        app.dispatch(Event::Key('1'));
        assert_eq!(
            app.status_message.as_ref().map(|(m, _)| m.as_str()),
            Some("Selected fund: Alpha")
        );
        assert!(app.frame().inbox.is_empty());
    }
}
