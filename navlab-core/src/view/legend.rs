//! Per-series visibility. Toggling never touches data.

use super::ViewError;

#[derive(Debug, Clone)]
pub struct VisibilityState {
    entries: Vec<(String, bool)>,
}

impl VisibilityState {
    /// Every series visible.
    pub fn new(labels: &[String]) -> Self {
        Self {
            entries: labels.iter().map(|l| (l.clone(), true)).collect(),
        }
    }

    /// Flip one series; returns its index and new visibility.
    pub fn toggle_visibility(&mut self, label: &str) -> Result<(usize, bool), ViewError> {
        let (index, entry) = self
            .entries
            .iter_mut()
            .enumerate()
            .find(|(_, (l, _))| l == label)
            .ok_or_else(|| ViewError::UnknownSeries {
                label: label.to_string(),
            })?;
        entry.1 = !entry.1;
        Ok((index, entry.1))
    }

    pub fn is_visible(&self, index: usize) -> bool {
        self.entries.get(index).is_some_and(|(_, v)| *v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, bool)> {
        self.entries.iter().map(|(l, v)| (l.as_str(), *v))
    }
}
