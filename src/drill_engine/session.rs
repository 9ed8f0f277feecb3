//! The drill-session state machine shared by every learning mode.
//!
//! A session borrows one [`DrillSet`] and walks a single learner through it:
//! `select` → `reveal` → `advance`, once per item. Which transitions are legal
//! is decided by the session's [`ModePolicy`]; an illegal call returns
//! [`Rejected`] and leaves the session untouched.
//!
//! States are {in progress, completed} × {unrevealed, revealed}. Completion is
//! only reachable in scored modes, by advancing past the last revealed item,
//! and from there only [`DrillSession::restart`] is accepted.

use std::fmt;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use tracing::debug;

use crate::drill_engine::{
    evaluator::{self, Evaluate},
    models::{DrillItem, DrillSet, Selection},
    policy::{ModePolicy, Navigation, Panel, PanelSet},
    scoring::{SessionSummary, Tally, DEFAULT_PASS_THRESHOLD},
    shuffle,
};
use crate::error::Rejected;

/// Outcome of a successful [`DrillSession::reveal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Revealed {
    /// First reveal in a scored mode; the tally has been updated.
    Scored { correct: bool },
    /// First reveal in a review-only mode; nothing is scored.
    Shown,
    /// The item was already revealed; nothing changed.
    Again,
}

/// Outcome of a successful [`DrillSession::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advanced {
    Moved { position: usize },
    /// Flashcards wrapped from the last card back to the first.
    Wrapped,
    Completed,
}

pub struct DrillSession<'a, T> {
    set: &'a DrillSet<T>,
    policy: ModePolicy,
    evaluate: Evaluate<T>,
    rng: StdRng,
    order: Vec<usize>,
    position: usize,
    revealed: bool,
    // Set by the first reveal of the current item; guards against double scoring.
    scored: bool,
    selection: Option<Selection>,
    tally: Tally,
    completed: bool,
    panels: PanelSet,
    pass_threshold: u32,
}

impl<'a, T: DrillItem> DrillSession<'a, T> {
    /// Start a session over `set`.
    ///
    /// `rng_seed` makes shuffled orders reproducible; `None` seeds from OS
    /// entropy. Modes that shuffle do so immediately.
    pub fn new(set: &'a DrillSet<T>, policy: ModePolicy, rng_seed: Option<u64>) -> Self {
        let rng = match rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None       => StdRng::from_entropy(),
        };
        let mut session = DrillSession {
            set,
            policy,
            evaluate: evaluator::answer_key::<T>,
            rng,
            order: shuffle::identity(set.len()),
            position: 0,
            revealed: false,
            scored: false,
            selection: None,
            tally: Tally::default(),
            completed: false,
            panels: PanelSet::default(),
            pass_threshold: DEFAULT_PASS_THRESHOLD,
        };
        session.restart();
        session
    }

    /// Replace the default [`evaluator::answer_key`] strategy.
    pub fn with_evaluator(mut self, evaluate: Evaluate<T>) -> Self {
        self.evaluate = evaluate;
        self
    }

    pub fn with_pass_threshold(mut self, pass_threshold: u32) -> Self {
        self.pass_threshold = pass_threshold;
        self
    }

    // -----------------------------------------------------------------------
    // Transitions
    // -----------------------------------------------------------------------

    /// Record the learner's answer for the current item.
    pub fn select(&mut self, choice: impl Into<Selection>) -> Result<(), Rejected> {
        self.ensure_in_progress()?;
        if !self.policy.scored {
            return Err(Rejected::Unsupported);
        }
        if self.revealed {
            return Err(Rejected::Locked);
        }
        let choice = choice.into();
        if !self.current_item().accepts(&choice) {
            return Err(Rejected::InvalidChoice);
        }
        self.selection = Some(choice);
        Ok(())
    }

    /// Show feedback for the current item, scoring it on the first call.
    pub fn reveal(&mut self) -> Result<Revealed, Rejected> {
        self.ensure_in_progress()?;
        if self.revealed {
            return Ok(Revealed::Again);
        }
        if !self.policy.scored {
            self.revealed = true;
            return Ok(Revealed::Shown);
        }

        let Some(selection) = self.selection.as_ref() else {
            return Err(Rejected::NoSelection);
        };
        let correct = (self.evaluate)(self.current_item(), selection);
        if !self.scored {
            self.tally.record(correct);
            self.scored = true;
        }
        self.revealed = true;
        debug!(
            set = self.set.key(),
            item = self.current_item().item_id(),
            correct,
            tally = %self.tally,
            "item scored"
        );
        Ok(Revealed::Scored { correct })
    }

    /// Hide the revealed side again. Review-only modes only.
    pub fn conceal(&mut self) -> Result<(), Rejected> {
        self.ensure_in_progress()?;
        if self.policy.scored {
            return Err(Rejected::Locked);
        }
        self.revealed = false;
        Ok(())
    }

    /// Move to the next item, or finish the drill from the last one.
    pub fn advance(&mut self) -> Result<Advanced, Rejected> {
        self.ensure_in_progress()?;
        if self.policy.scored && !self.revealed {
            return Err(Rejected::NotRevealed);
        }

        if self.position + 1 < self.len() {
            self.move_to(self.position + 1);
            return Ok(Advanced::Moved { position: self.position });
        }

        match self.policy.navigation {
            Navigation::Complete => {
                self.completed = true;
                debug!(set = self.set.key(), tally = %self.tally, "drill completed");
                Ok(Advanced::Completed)
            }
            Navigation::Stop => Err(Rejected::AtEnd),
            Navigation::Circular => {
                self.move_to(0);
                Ok(Advanced::Wrapped)
            }
        }
    }

    /// Step back one item, wrapping to the end. Flashcards only.
    pub fn retreat(&mut self) -> Result<usize, Rejected> {
        self.ensure_in_progress()?;
        if self.policy.navigation != Navigation::Circular {
            return Err(Rejected::Unsupported);
        }
        let len = self.len();
        self.move_to((self.position + len - 1) % len);
        Ok(self.position)
    }

    /// Go straight to the item at `index`. Browsing modes only.
    pub fn jump_to(&mut self, index: usize) -> Result<(), Rejected> {
        self.ensure_in_progress()?;
        if self.policy.navigation != Navigation::Stop {
            return Err(Rejected::Unsupported);
        }
        if index >= self.len() {
            return Err(Rejected::OutOfRange);
        }
        self.move_to(index);
        Ok(())
    }

    /// Show or hide an auxiliary panel; returns whether it is now shown.
    pub fn toggle_panel(&mut self, panel: Panel) -> Result<bool, Rejected> {
        self.ensure_in_progress()?;
        if !self.policy.offers(panel) {
            return Err(Rejected::Unsupported);
        }
        Ok(self.panels.toggle(panel))
    }

    /// Draw a fresh presentation order and go back to the first item.
    pub fn shuffle(&mut self) -> Result<(), Rejected> {
        self.ensure_in_progress()?;
        if !self.policy.shuffle {
            return Err(Rejected::Unsupported);
        }
        self.order = shuffle::permutation(&mut self.rng, self.set.len());
        self.move_to(0);
        debug!(set = self.set.key(), "order shuffled");
        Ok(())
    }

    /// Back to the initial state over the same set. Always accepted.
    pub fn restart(&mut self) {
        self.order = if self.policy.shuffle {
            shuffle::permutation(&mut self.rng, self.set.len())
        } else {
            shuffle::identity(self.set.len())
        };
        self.tally = Tally::default();
        self.completed = false;
        self.move_to(0);
    }

    fn move_to(&mut self, position: usize) {
        self.position = position;
        self.revealed = false;
        self.scored = false;
        self.selection = None;
        self.panels.hide_all();
    }

    fn ensure_in_progress(&self) -> Result<(), Rejected> {
        if self.completed {
            Err(Rejected::Completed)
        } else {
            Ok(())
        }
    }

    // -----------------------------------------------------------------------
    // Read-only state
    // -----------------------------------------------------------------------

    /// The item at `order[position]`.
    pub fn current_item(&self) -> &'a T {
        &self.set.items()[self.order[self.position]]
    }

    pub fn drill_set(&self) -> &'a DrillSet<T> {
        self.set
    }

    pub fn policy(&self) -> ModePolicy {
        self.policy
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn len(&self) -> usize {
        self.set.len()
    }

    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    pub fn tally(&self) -> Tally {
        self.tally
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn order(&self) -> &[usize] {
        &self.order
    }

    pub fn is_panel_shown(&self, panel: Panel) -> bool {
        self.panels.is_shown(panel)
    }

    /// Panels currently shown, in a fixed order.
    pub fn shown_panels(&self) -> Vec<Panel> {
        self.panels.shown()
    }

    /// Whether the current selection is correct. `None` until revealed in a
    /// scored mode.
    pub fn is_correct(&self) -> Option<bool> {
        if !(self.policy.scored && self.revealed) {
            return None;
        }
        self.selection
            .as_ref()
            .map(|s| (self.evaluate)(self.current_item(), s))
    }

    /// Result card, available once the drill is completed.
    pub fn summary(&self) -> Option<SessionSummary> {
        if !self.completed {
            return None;
        }
        SessionSummary::from_tally(self.tally, self.pass_threshold)
    }

    pub fn snapshot(&self) -> SessionSnapshot<'_, T> {
        SessionSnapshot {
            set: self.set.key(),
            position: self.position,
            len: self.len(),
            revealed: self.revealed,
            selection: self.selection.as_ref(),
            correct: self.is_correct(),
            tally: self.tally,
            percentage: self.tally.percentage(),
            completed: self.completed,
            panels: self.shown_panels(),
            item: self.current_item(),
        }
    }
}

impl<T> fmt::Debug for DrillSession<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DrillSession")
            .field("set", &self.set.key())
            .field("policy", &self.policy)
            .field("order", &self.order)
            .field("position", &self.position)
            .field("revealed", &self.revealed)
            .field("selection", &self.selection)
            .field("tally", &self.tally)
            .field("completed", &self.completed)
            .field("panels", &self.panels)
            .finish_non_exhaustive()
    }
}

/// Everything a view needs to render the current state.
#[derive(Debug, Serialize)]
pub struct SessionSnapshot<'s, T> {
    pub set: &'s str,
    pub position: usize,
    pub len: usize,
    pub revealed: bool,
    pub selection: Option<&'s Selection>,
    pub correct: Option<bool>,
    pub tally: Tally,
    pub percentage: Option<u32>,
    pub completed: bool,
    pub panels: Vec<Panel>,
    pub item: &'s T,
}
