//! User-placed vertical reference markers with a shared drag state machine.
//!
//! Markers are append-only: there is no removal.

use chrono::NaiveDate;

use crate::domain::{date_to_num, format_date};

/// Colors assigned to new markers, in order.
pub const MARKER_PALETTE: [&str; 6] = ["green", "magenta", "cyan", "yellow", "blue", "gray"];

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub color: String,
    pub date: NaiveDate,
    /// Date text shown next to the marker; always `format_date(date)`.
    pub label: String,
}

impl Marker {
    pub fn new(color: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            color: color.into(),
            date,
            label: format_date(date),
        }
    }

    pub fn x(&self) -> f64 {
        date_to_num(self.date)
    }

    fn move_to(&mut self, date: NaiveDate) {
        self.date = date;
        self.label = format_date(date);
    }
}

/// Drag interaction shared by every marker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DragState {
    #[default]
    Idle,
    /// Pressed on a marker; no movement yet.
    Pressed { marker: usize },
    Dragging { marker: usize },
}

impl DragState {
    pub fn marker(&self) -> Option<usize> {
        match *self {
            DragState::Idle => None,
            DragState::Pressed { marker } | DragState::Dragging { marker } => Some(marker),
        }
    }
}

#[derive(Debug, Clone)]
pub struct MultiMarker {
    markers: Vec<Marker>,
    drag: DragState,
    hit_radius_px: f64,
}

impl MultiMarker {
    pub fn new(hit_radius_px: f64) -> Self {
        Self {
            markers: Vec::new(),
            drag: DragState::Idle,
            hit_radius_px,
        }
    }

    pub fn markers(&self) -> &[Marker] {
        &self.markers
    }

    pub fn get(&self, index: usize) -> Option<&Marker> {
        self.markers.get(index)
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    /// Palette color for the next marker.
    pub fn next_color(&self) -> &'static str {
        MARKER_PALETTE[self.markers.len() % MARKER_PALETTE.len()]
    }

    /// Append a marker; returns its index.
    pub fn add_marker(&mut self, color: impl Into<String>, date: NaiveDate) -> usize {
        self.markers.push(Marker::new(color, date));
        self.markers.len() - 1
    }

    /// Start a drag if a marker lies within the hit radius of `pointer_x`.
    ///
    /// The nearest marker wins; ties go to the earliest created. A press while
    /// a drag is in progress abandons it first.
    pub fn press(&mut self, pointer_x: f64, px_per_day: f64) -> Option<usize> {
        self.drag = DragState::Idle;
        let mut best: Option<(usize, f64)> = None;
        for (i, m) in self.markers.iter().enumerate() {
            let dist_px = (m.x() - pointer_x).abs() * px_per_day;
            if dist_px <= self.hit_radius_px && best.map_or(true, |(_, b)| dist_px < b) {
                best = Some((i, dist_px));
            }
        }
        let (marker, _) = best?;
        self.drag = DragState::Pressed { marker };
        Some(marker)
    }

    /// Move the grabbed marker; returns its index if one moved.
    pub fn drag_to(&mut self, date: NaiveDate) -> Option<usize> {
        let marker = self.drag.marker()?;
        self.markers.get_mut(marker)?.move_to(date);
        self.drag = DragState::Dragging { marker };
        Some(marker)
    }

    /// End the interaction; returns the marker that was held.
    pub fn release(&mut self) -> Option<usize> {
        let held = self.drag.marker();
        self.drag = DragState::Idle;
        held
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn press_drag_release() {
        let mut mm = MultiMarker::new(1.5);
        let i = mm.add_marker("green", d("2020-01-10"));
        assert_eq!(mm.get(i).unwrap().label, "10-01-2020");

        let x = date_to_num(d("2020-01-10"));
        assert_eq!(mm.press(x + 1.0, 1.0), Some(0));
        assert_eq!(mm.drag_state(), DragState::Pressed { marker: 0 });

        assert_eq!(mm.drag_to(d("2020-02-01")), Some(0));
        assert_eq!(mm.drag_state(), DragState::Dragging { marker: 0 });
        assert_eq!(mm.get(0).unwrap().label, "01-02-2020");

        assert_eq!(mm.release(), Some(0));
        assert_eq!(mm.drag_state(), DragState::Idle);
        assert_eq!(mm.drag_to(d("2020-03-01")), None);
        assert_eq!(mm.get(0).unwrap().date, d("2020-02-01"));
    }

    #[test]
    fn press_out_of_range_is_ignored() {
        let mut mm = MultiMarker::new(1.5);
        mm.add_marker("green", d("2020-01-10"));
        let x = date_to_num(d("2020-01-10"));
        // Two days away at one column per day.
        assert_eq!(mm.press(x + 2.0, 1.0), None);
        assert_eq!(mm.drag_state(), DragState::Idle);
        // Same distance, zoomed out: within the radius.
        assert_eq!(mm.press(x + 2.0, 0.5), Some(0));
    }

    #[test]
    fn nearest_then_earliest_wins() {
        let mut mm = MultiMarker::new(5.0);
        mm.add_marker("a", d("2020-01-10"));
        mm.add_marker("b", d("2020-01-12"));
        mm.add_marker("c", d("2020-01-12"));
        let x = date_to_num(d("2020-01-11")) + 0.5;
        assert_eq!(mm.press(x, 1.0), Some(1));
    }

    #[test]
    fn palette_cycles() {
        let mut mm = MultiMarker::new(1.0);
        for _ in 0..MARKER_PALETTE.len() {
            let c = mm.next_color();
            mm.add_marker(c, d("2020-01-01"));
        }
        assert_eq!(mm.next_color(), MARKER_PALETTE[0]);
    }
}
