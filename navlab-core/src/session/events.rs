//! Input events and the handler table that routes them.

use std::collections::HashMap;

use super::{AppContext, InteractionState};
use crate::render::RenderBridge;
use crate::view::DateControl;

/// Pointer position in the x-domain plus the current horizontal zoom, so
/// pixel hit radii can be evaluated in the core.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pointer {
    pub x: f64,
    pub px_per_day: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// A date control moved to `value` (x-domain).
    SliderChanged { control: DateControl, value: f64 },
    /// Text entry of all three dates, `dd-mm-yyyy`.
    DatesSubmitted {
        min: String,
        max: String,
        norm: String,
    },
    Key(char),
    PointerMoved(Pointer),
    PointerPressed(Pointer),
    PointerReleased,
    PointerLeft,
    LegendClicked { label: String },
    AddMarker,
    ToggleScale,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    SliderChanged,
    DatesSubmitted,
    Key,
    PointerMoved,
    PointerPressed,
    PointerReleased,
    PointerLeft,
    LegendClicked,
    AddMarker,
    ToggleScale,
}

impl Event {
    pub fn kind(&self) -> EventKind {
        match self {
            Event::SliderChanged { .. } => EventKind::SliderChanged,
            Event::DatesSubmitted { .. } => EventKind::DatesSubmitted,
            Event::Key(_) => EventKind::Key,
            Event::PointerMoved(_) => EventKind::PointerMoved,
            Event::PointerPressed(_) => EventKind::PointerPressed,
            Event::PointerReleased => EventKind::PointerReleased,
            Event::PointerLeft => EventKind::PointerLeft,
            Event::LegendClicked { .. } => EventKind::LegendClicked,
            Event::AddMarker => EventKind::AddMarker,
            Event::ToggleScale => EventKind::ToggleScale,
        }
    }
}

pub type Handler<R> = fn(&mut AppContext<R>, &mut InteractionState, &Event);

pub struct EventTable<R: RenderBridge> {
    handlers: HashMap<EventKind, Handler<R>>,
}

impl<R: RenderBridge> Default for EventTable<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RenderBridge> EventTable<R> {
    /// Empty table; every event is ignored until registered.
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Table with the built-in handler for every event kind.
    pub fn standard() -> Self {
        let mut table = Self::new();
        table.register(EventKind::SliderChanged, AppContext::on_slider_changed);
        table.register(EventKind::DatesSubmitted, AppContext::on_dates_submitted);
        table.register(EventKind::Key, AppContext::on_key);
        table.register(EventKind::PointerMoved, AppContext::on_pointer_moved);
        table.register(EventKind::PointerPressed, AppContext::on_pointer_pressed);
        table.register(EventKind::PointerReleased, AppContext::on_pointer_released);
        table.register(EventKind::PointerLeft, AppContext::on_pointer_left);
        table.register(EventKind::LegendClicked, AppContext::on_legend_clicked);
        table.register(EventKind::AddMarker, AppContext::on_add_marker);
        table.register(EventKind::ToggleScale, AppContext::on_toggle_scale);
        table
    }

    /// Install or replace the handler for `kind`.
    pub fn register(&mut self, kind: EventKind, handler: Handler<R>) {
        self.handlers.insert(kind, handler);
    }

    pub fn is_registered(&self, kind: EventKind) -> bool {
        self.handlers.contains_key(&kind)
    }

    /// Run the handler for `event` to completion.
    pub fn dispatch(
        &self,
        ctx: &mut AppContext<R>,
        interaction: &mut InteractionState,
        event: &Event,
    ) {
        match self.handlers.get(&event.kind()) {
            Some(handler) => handler(ctx, interaction, event),
            None => tracing::debug!(kind = ?event.kind(), "no handler registered"),
        }
    }
}
