//! Chart: normalized NAV lines, anchor line, markers, and the probe cursor.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph};

use navlab_core::domain::{date_to_num, format_date};
use navlab_core::view::ScaleMode;

use super::ScreenLayout;
use crate::app::AppState;
use crate::bridge::ChartFrame;
use crate::coords::PlotGeometry;
use crate::theme;

const LINEAR_Y_LABELS: usize = 5;

/// Y mapping for the active scale: plotted value and bounds.
struct YAxis {
    mode: ScaleMode,
    lo: f64,
    hi: f64,
}

impl YAxis {
    fn from_frame(frame: &ChartFrame) -> Self {
        let (lo, hi) = frame.y_range().unwrap_or((90.0, 110.0));
        match frame.scale {
            ScaleMode::Linear => {
                let pad = ((hi - lo).abs() * 0.05).max(1.0);
                Self {
                    mode: ScaleMode::Linear,
                    lo: lo - pad,
                    hi: hi + pad,
                }
            }
            ScaleMode::Logarithmic => {
                let lo = lo.max(f64::MIN_POSITIVE).log10();
                let hi = hi.max(f64::MIN_POSITIVE).log10();
                let pad = ((hi - lo) * 0.05).max(0.01);
                Self {
                    mode: ScaleMode::Logarithmic,
                    lo: lo - pad,
                    hi: hi + pad,
                }
            }
        }
    }

    fn plot(&self, y: f64) -> Option<f64> {
        match self.mode {
            ScaleMode::Linear => Some(y),
            ScaleMode::Logarithmic => (y > 0.0).then(|| y.log10()),
        }
    }

    /// (value, label) pairs for the y-label column.
    fn ticks(&self, frame: &ChartFrame) -> Vec<(f64, String)> {
        match self.mode {
            ScaleMode::Linear => (0..LINEAR_Y_LABELS)
                .map(|i| {
                    let v = self.lo + (self.hi - self.lo) * i as f64 / (LINEAR_Y_LABELS - 1) as f64;
                    (v, format!("{v:.0}"))
                })
                .collect(),
            ScaleMode::Logarithmic => frame
                .log_ticks
                .iter()
                .filter_map(|t| {
                    let p = t.log10();
                    (self.lo..=self.hi).contains(&p).then(|| (p, format!("{t}")))
                })
                .collect(),
        }
    }
}

pub fn render(f: &mut Frame, regions: &ScreenLayout, app: &AppState) {
    let frame = app.frame();
    let title = format!(" Normalized NAV ({}) ", frame.scale.name());
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(theme::panel_border(true))
        .title(title)
        .title_style(theme::panel_title(true));
    f.render_widget(block, regions.chart);

    let Some(window) = frame.window else {
        let text = Paragraph::new(Span::styled("No data loaded.", theme::muted()));
        f.render_widget(text, regions.plot);
        return;
    };

    let geometry = PlotGeometry::new(
        regions.plot,
        date_to_num(window.min),
        date_to_num(window.max),
    );
    let y = YAxis::from_frame(frame);

    // Owned point buffers first; datasets borrow them.
    let mut series: Vec<(Vec<(f64, f64)>, Style)> = Vec::new();
    for (line, color) in frame
        .lines
        .iter()
        .zip(app.ctx.dataset().series.series().iter().map(|s| theme::series_color(&s.color)))
    {
        if !line.visible {
            continue;
        }
        let points = line
            .data
            .xs
            .iter()
            .zip(&line.data.ys)
            .filter_map(|(x, v)| Some((*x, y.plot((*v)?)?)))
            .collect();
        series.push((points, Style::default().fg(color)));
    }

    let vertical = |x: f64| vec![(x, y.lo), (x, y.hi)];
    series.push((vertical(date_to_num(window.norm)), Style::default().fg(theme::ANCHOR)));
    for marker in &frame.markers {
        let x = marker.x();
        if (geometry.x_min..=geometry.x_max).contains(&x) {
            series.push((vertical(x), Style::default().fg(theme::series_color(&marker.color))));
        }
    }
    if let Some(x) = frame.cursor {
        series.push((vertical(x), Style::default().fg(theme::CURSOR)));
    }

    let datasets: Vec<Dataset> = series
        .iter()
        .map(|(points, style)| {
            Dataset::default()
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(*style)
                .data(points)
        })
        .collect();

    let chart = Chart::new(datasets)
        .x_axis(Axis::default().bounds([geometry.x_min, geometry.x_max]))
        .y_axis(Axis::default().bounds([y.lo, y.hi]));
    f.render_widget(chart, regions.plot);

    render_y_labels(f, regions.y_labels, &y, frame);
    render_x_labels(f, regions.x_labels, &geometry, app);
}

fn render_y_labels(f: &mut Frame, area: Rect, y: &YAxis, frame: &ChartFrame) {
    if area.height == 0 {
        return;
    }
    let mut rows: Vec<Line> = vec![Line::from(""); area.height as usize];
    let last = f64::from(area.height - 1);
    for (value, label) in y.ticks(frame) {
        let row = ((y.hi - value) / (y.hi - y.lo) * last).round() as usize;
        if let Some(slot) = rows.get_mut(row) {
            *slot = Line::from(Span::styled(format!("{label:>7}"), theme::muted()));
        }
    }
    f.render_widget(Paragraph::new(rows), area);
}

fn render_x_labels(f: &mut Frame, area: Rect, geometry: &PlotGeometry, app: &AppState) {
    let frame = app.frame();
    let Some(window) = frame.window else {
        return;
    };
    if area.width == 0 || area.height == 0 {
        return;
    }

    let buf = f.buffer_mut();
    let mut put = |x: f64, text: &str, style: Style| {
        let Some(col) = geometry.column_at_x(x) else {
            return;
        };
        let width = text.len() as u16;
        let start = col
            .saturating_sub(width / 2)
            .clamp(area.x, area.right().saturating_sub(width).max(area.x));
        buf.set_string(start, area.y, text, style);
    };

    put(geometry.x_min, &format_date(window.min), theme::muted());
    put(geometry.x_max, &format_date(window.max), theme::muted());
    for marker in &frame.markers {
        put(
            marker.x(),
            &marker.label,
            Style::default().fg(theme::series_color(&marker.color)),
        );
    }
    put(
        date_to_num(window.norm),
        &format_date(window.norm),
        Style::default().fg(Color::Black).bg(theme::ANCHOR),
    );
}
