//! Coordinate mapping between terminal cells and the chart's x-domain
//! (days since 1970-01-01).

use ratatui::layout::Rect;

/// Plot rectangle and the x-range drawn across it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotGeometry {
    pub area: Rect,
    pub x_min: f64,
    pub x_max: f64,
}

impl PlotGeometry {
    pub fn new(area: Rect, x_min: f64, x_max: f64) -> Self {
        Self { area, x_min, x_max }
    }

    fn span(&self) -> f64 {
        (self.x_max - self.x_min).max(f64::EPSILON)
    }

    pub fn contains(&self, column: u16, row: u16) -> bool {
        column >= self.area.x
            && column < self.area.x + self.area.width
            && row >= self.area.y
            && row < self.area.y + self.area.height
    }

    /// X-domain value at the center of a terminal column.
    pub fn x_at_column(&self, column: u16) -> Option<f64> {
        if self.area.width == 0
            || column < self.area.x
            || column >= self.area.x + self.area.width
        {
            return None;
        }
        let offset = f64::from(column - self.area.x) + 0.5;
        Some(self.x_min + offset / f64::from(self.area.width) * self.span())
    }

    /// Terminal column drawing `x`, if it is inside the plotted range.
    pub fn column_at_x(&self, x: f64) -> Option<u16> {
        if self.area.width == 0 || !(self.x_min..=self.x_max).contains(&x) {
            return None;
        }
        let frac = (x - self.x_min) / self.span();
        let col = (frac * f64::from(self.area.width)).floor() as u16;
        Some(self.area.x + col.min(self.area.width - 1))
    }

    /// Horizontal zoom: terminal columns per day.
    pub fn px_per_day(&self) -> f64 {
        f64::from(self.area.width) / self.span()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn geometry() -> PlotGeometry {
        // 100 columns over 200 days.
        PlotGeometry::new(Rect::new(10, 2, 100, 20), 1000.0, 1200.0)
    }

    #[test]
    fn column_and_x_agree() {
        let g = geometry();
        assert_eq!(g.x_at_column(10), Some(1001.0));
        assert_eq!(g.x_at_column(109), Some(1199.0));
        assert_eq!(g.x_at_column(9), None);
        assert_eq!(g.x_at_column(110), None);
        for col in 10..110 {
            let x = g.x_at_column(col).unwrap();
            assert_eq!(g.column_at_x(x), Some(col));
        }
        assert_eq!(g.column_at_x(1200.0), Some(109));
        assert_eq!(g.column_at_x(999.0), None);
    }

    #[test]
    fn zoom_and_containment() {
        let g = geometry();
        assert_eq!(g.px_per_day(), 0.5);
        assert!(g.contains(10, 2));
        assert!(!g.contains(10, 22));
    }
}
