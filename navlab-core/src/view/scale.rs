//! Y-axis scale mode. Switching re-renders; it never renormalizes.

use crate::config::DEFAULT_LOG_TICKS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScaleMode {
    #[default]
    Linear,
    Logarithmic,
}

impl ScaleMode {
    pub fn toggled(self) -> Self {
        match self {
            ScaleMode::Linear => ScaleMode::Logarithmic,
            ScaleMode::Logarithmic => ScaleMode::Linear,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ScaleMode::Linear => "linear",
            ScaleMode::Logarithmic => "log",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct YScale {
    mode: ScaleMode,
    log_ticks: Vec<f64>,
}

impl Default for YScale {
    fn default() -> Self {
        Self::new(DEFAULT_LOG_TICKS.to_vec())
    }
}

impl YScale {
    pub fn new(log_ticks: Vec<f64>) -> Self {
        Self {
            mode: ScaleMode::Linear,
            log_ticks,
        }
    }

    pub fn mode(&self) -> ScaleMode {
        self.mode
    }

    pub fn toggle(&mut self) -> ScaleMode {
        self.mode = self.mode.toggled();
        self.mode
    }

    /// Fixed ticks in logarithmic mode; `None` lets the renderer choose.
    pub fn ticks(&self) -> Option<&[f64]> {
        match self.mode {
            ScaleMode::Linear => None,
            ScaleMode::Logarithmic => Some(&self.log_ticks),
        }
    }
}
