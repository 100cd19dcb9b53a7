use std::collections::BTreeSet;

/// Lifecycle of one remote fetch owned by a view.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ViewState<T> {
    #[default]
    Idle,
    Loading,
    Loaded(T),
    Failed(String),
}

impl<T> ViewState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            ViewState::Loaded(data) => Some(data),
            _ => None,
        }
    }

    pub fn data_mut(&mut self) -> Option<&mut T> {
        match self {
            ViewState::Loaded(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ViewState::Failed(msg) => Some(msg),
            _ => None,
        }
    }

    pub fn from_result<E: std::fmt::Display>(
        result: std::result::Result<T, E>,
        context: &str,
    ) -> Self {
        match result {
            Ok(data) => ViewState::Loaded(data),
            Err(e) => ViewState::Failed(format!("{}: {}", context, e)),
        }
    }
}

/// Row indices whose detail panel is open.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpandedRows(BTreeSet<usize>);

impl ExpandedRows {
    /// Flips row `index` and returns whether it is now expanded.
    pub fn toggle(&mut self, index: usize) -> bool {
        if self.0.remove(&index) {
            false
        } else {
            self.0.insert(index);
            true
        }
    }

    pub fn is_expanded(&self, index: usize) -> bool {
        self.0.contains(&index)
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
