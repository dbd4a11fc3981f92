//! Top-level UI layout — chart, legend, date controls, status bar.
//!
//! The layout is a pure function of the terminal area so mouse handling can
//! recompute exactly where the plot and legend were drawn.

pub mod chart_panel;
pub mod controls_panel;
pub mod legend_panel;
pub mod overlays;
pub mod status_bar;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::widgets::{Block, Borders};

use navlab_core::domain::date_to_num;

use crate::app::{AppState, Overlay};
use crate::coords::PlotGeometry;

const LEGEND_WIDTH: u16 = 30;
const Y_LABEL_WIDTH: u16 = 8;
const CONTROLS_HEIGHT: u16 = 5;

/// Every region the draw pass uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScreenLayout {
    pub chart: Rect,
    pub plot: Rect,
    pub y_labels: Rect,
    pub x_labels: Rect,
    pub legend: Rect,
    pub legend_inner: Rect,
    pub controls: Rect,
    pub status: Rect,
}

pub fn layout(area: Rect) -> ScreenLayout {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(6),
            Constraint::Length(CONTROLS_HEIGHT),
            Constraint::Length(1),
        ])
        .split(area);

    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(LEGEND_WIDTH)])
        .split(rows[0]);

    let chart = top[0];
    let legend = top[1];
    let chart_inner = Block::default().borders(Borders::ALL).inner(chart);
    let legend_inner = Block::default().borders(Borders::ALL).inner(legend);

    let graph_rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(chart_inner);
    let graph_cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(Y_LABEL_WIDTH), Constraint::Min(1)])
        .split(graph_rows[0]);

    let plot = graph_cols[1];
    let x_labels = Rect::new(plot.x, graph_rows[1].y, plot.width, graph_rows[1].height);

    ScreenLayout {
        chart,
        plot,
        y_labels: graph_cols[0],
        x_labels,
        legend,
        legend_inner,
        controls: rows[1],
        status: rows[2],
    }
}

/// Where the current window is plotted on the last-drawn screen.
pub fn plot_geometry(app: &AppState) -> Option<PlotGeometry> {
    let window = app.frame().window?;
    let plot = layout(app.screen).plot;
    Some(PlotGeometry::new(
        plot,
        date_to_num(window.min),
        date_to_num(window.max),
    ))
}

/// Draw the entire UI.
pub fn draw(f: &mut Frame, app: &AppState) {
    let regions = layout(f.area());

    chart_panel::render(f, &regions, app);
    legend_panel::render(f, regions.legend, app);
    controls_panel::render(f, regions.controls, app);
    status_bar::render(f, regions.status, app);

    let main_area = Rect::new(
        f.area().x,
        f.area().y,
        f.area().width,
        f.area().height.saturating_sub(1),
    );
    match &app.overlay {
        Overlay::Help => overlays::render_help(f, main_area),
        Overlay::MessageHistory => overlays::render_message_history(f, main_area, app),
        Overlay::DateEntry(entry) => overlays::render_date_entry(f, main_area, entry),
        Overlay::None => {}
    }
}

/// Compute a centered rect for overlays.
pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
