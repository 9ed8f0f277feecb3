//! Per-mode behaviour of the drill engine.
//!
//! | Mode           | Scored | Navigation          | Shuffle | Panels   |
//! |----------------|--------|---------------------|---------|----------|
//! | Quiz           | yes    | linear, completes   | no      | –        |
//! | Classification | yes    | linear, completes   | no      | –        |
//! | Calculation    | no     | linear, stops, jump | no      | Hints    |
//! | Interpretation | no     | linear, stops, jump | no      | Guidance |
//! | Flashcards     | no     | circular, retreat   | yes     | –        |

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::drill_engine::models::DrillMode;

/// What `advance()` does at the last item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Navigation {
    /// Scored modes: the last advance completes the session.
    Complete,
    /// Browsing modes: the last item is a hard stop; items can be picked directly.
    Stop,
    /// Flashcards: wrap around in both directions.
    Circular,
}

/// A reveal-only side panel with its own shown/hidden flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Panel {
    Hints,
    Guidance,
}

impl Panel {
    fn bit(self) -> u8 {
        match self {
            Panel::Hints    => 0b01,
            Panel::Guidance => 0b10,
        }
    }
}

impl fmt::Display for Panel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Panel::Hints    => write!(f, "Hints"),
            Panel::Guidance => write!(f, "Guidance"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModePolicy {
    pub scored: bool,
    pub navigation: Navigation,
    pub shuffle: bool,
    pub panels: &'static [Panel],
}

impl ModePolicy {
    pub fn for_mode(mode: DrillMode) -> Self {
        match mode {
            DrillMode::Quiz | DrillMode::Classification => ModePolicy {
                scored: true,
                navigation: Navigation::Complete,
                shuffle: false,
                panels: &[],
            },
            DrillMode::Calculation => ModePolicy {
                scored: false,
                navigation: Navigation::Stop,
                shuffle: false,
                panels: &[Panel::Hints],
            },
            DrillMode::Interpretation => ModePolicy {
                scored: false,
                navigation: Navigation::Stop,
                shuffle: false,
                panels: &[Panel::Guidance],
            },
            DrillMode::Flashcards => ModePolicy {
                scored: false,
                navigation: Navigation::Circular,
                shuffle: true,
                panels: &[],
            },
        }
    }

    pub fn offers(&self, panel: Panel) -> bool {
        self.panels.contains(&panel)
    }
}

/// Shown flags for the panels a mode offers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PanelSet {
    shown: u8,
}

impl PanelSet {
    pub fn is_shown(&self, panel: Panel) -> bool {
        self.shown & panel.bit() != 0
    }

    /// Flip one panel; returns the new state.
    pub fn toggle(&mut self, panel: Panel) -> bool {
        self.shown ^= panel.bit();
        self.is_shown(panel)
    }

    pub fn hide_all(&mut self) {
        self.shown = 0;
    }

    pub fn shown(&self) -> Vec<Panel> {
        [Panel::Hints, Panel::Guidance]
            .into_iter()
            .filter(|p| self.is_shown(*p))
            .collect()
    }
}
