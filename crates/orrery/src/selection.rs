//! Mutually exclusive selection plus a separate hover slot.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::aspects::PairKey;

/// Exactly one selected thing, or nothing
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum Selection {
    #[default]
    None,
    Body(String),
    ZodiacSegment(u8),
    Aspect(PairKey),
    Event(String),
}

impl Selection {
    pub fn is_none(&self) -> bool {
        matches!(self, Selection::None)
    }

    pub fn body(&self) -> Option<&str> {
        match self {
            Selection::Body(name) => Some(name),
            _ => None,
        }
    }

    pub fn segment(&self) -> Option<u8> {
        match self {
            Selection::ZodiacSegment(index) => Some(*index),
            _ => None,
        }
    }

    pub fn aspect(&self) -> Option<&PairKey> {
        match self {
            Selection::Aspect(key) => Some(key),
            _ => None,
        }
    }

    pub fn event(&self) -> Option<&str> {
        match self {
            Selection::Event(id) => Some(id),
            _ => None,
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::None => write!(f, "none"),
            Selection::Body(name) => write!(f, "body:{}", name),
            Selection::ZodiacSegment(index) => write!(f, "segment:{}", index),
            Selection::Aspect(key) => write!(f, "aspect:{}", key),
            Selection::Event(id) => write!(f, "event:{}", id),
        }
    }
}

/// A transition between two distinct selections
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionChange {
    pub previous: Selection,
    pub current: Selection,
}

#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    current: Selection,
    hovered: Option<String>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> &Selection {
        &self.current
    }

    pub fn hovered(&self) -> Option<&str> {
        self.hovered.as_deref()
    }

    /// Replace the selection. Re-selecting the current value is not a change.
    pub fn select(&mut self, selection: Selection) -> Option<SelectionChange> {
        if selection == self.current {
            return None;
        }
        let previous = std::mem::replace(&mut self.current, selection);
        log::debug!("Selection {} -> {}", previous, self.current);
        Some(SelectionChange {
            previous,
            current: self.current.clone(),
        })
    }

    pub fn clear(&mut self) -> Option<SelectionChange> {
        self.select(Selection::None)
    }

    /// Set or clear the hovered body; returns true if it changed
    pub fn hover(&mut self, body: Option<String>) -> bool {
        if self.hovered == body {
            return false;
        }
        self.hovered = body;
        true
    }

    /// Hovered or selected
    pub fn is_focused_body(&self, name: &str) -> bool {
        self.hovered.as_deref() == Some(name) || self.current.body() == Some(name)
    }
}
