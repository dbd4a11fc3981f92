//! NavLab Core — NAV series alignment, rebasing, and the interactive view engine.
//!
//! This crate contains everything except drawing:
//! - Data providers (mfapi.in, saved JSON responses) and ingest
//! - SeriesStore with time-weighted gap interpolation
//! - Daily union calendar and forward-filled alignment
//! - ViewState clamping and rebasing to 100 at an anchor date
//! - Cursor probing, draggable markers, visibility, y-scale mode
//! - The render-bridge trait and the event-handler table

pub mod config;
pub mod data;
pub mod domain;
pub mod render;
pub mod session;
pub mod view;

pub use config::{load_config, parse_config, AppConfig, ConfigError, InstrumentConfig, ViewOptions};
pub use data::{Dataset, DatasetError};
pub use render::{MessageLevel, RenderBridge};
pub use session::{AppContext, Event, EventTable, InteractionState, Pointer};

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: the shared model types are Send + Sync.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<domain::Series>();
        require_sync::<domain::Series>();
        require_send::<domain::ValueMatrix>();
        require_sync::<domain::ValueMatrix>();
        require_send::<data::Dataset>();
        require_sync::<data::Dataset>();
        require_send::<view::NormalizedMatrix>();
        require_sync::<view::NormalizedMatrix>();
        require_send::<view::MultiMarker>();
        require_sync::<view::MultiMarker>();
        require_send::<session::InteractionState>();
        require_sync::<session::InteractionState>();
    }

    /// Every event kind has a built-in handler.
    #[test]
    fn standard_table_is_complete() {
        struct Null;
        impl RenderBridge for Null {
            fn set_window(&mut self, _: &view::ViewWindow) {}
            fn set_line(&mut self, _: usize, _: &view::LineData, _: bool) {}
            fn set_marker(&mut self, _: usize, _: &view::Marker) {}
            fn set_cursor(&mut self, _: Option<f64>) {}
            fn set_scale(&mut self, _: view::ScaleMode, _: Option<&[f64]>) {}
            fn post_message(&mut self, _: MessageLevel, _: &str) {}
            fn request_redraw(&mut self) {}
        }

        use session::EventKind::*;
        let table = EventTable::<Null>::standard();
        for kind in [
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
        ] {
            assert!(table.is_registered(kind), "{kind:?}");
        }
    }
}
