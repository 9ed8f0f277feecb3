use tracing::info;

use crate::content::ContentStore;
use crate::drill_engine::{
    models::{
        ClassificationItem, DrillMode, DrillRequest, DrillSet, ExerciseItem, FlashcardItem,
        QuestionItem, ScenarioItem,
    },
    policy::{ModePolicy, Panel},
    scoring::{SessionSummary, Tally, DEFAULT_PASS_THRESHOLD},
    session::{Advanced, DrillSession, Revealed},
};
use crate::error::{DrillError, Rejected};

/// The session behind whichever mode is active.
#[derive(Debug)]
pub enum ActiveDrill<'a> {
    Quiz(DrillSession<'a, QuestionItem>),
    Classification(DrillSession<'a, ClassificationItem>),
    Calculation(DrillSession<'a, ExerciseItem>),
    Interpretation(DrillSession<'a, ScenarioItem>),
    Flashcards(DrillSession<'a, FlashcardItem>),
}

/// Run `$body` against the inner session whatever its item type.
macro_rules! with_session {
    ($drill:expr, $s:ident => $body:expr) => {
        match $drill {
            $crate::drill_engine::coordinator::ActiveDrill::Quiz($s)           => $body,
            $crate::drill_engine::coordinator::ActiveDrill::Classification($s) => $body,
            $crate::drill_engine::coordinator::ActiveDrill::Calculation($s)    => $body,
            $crate::drill_engine::coordinator::ActiveDrill::Interpretation($s) => $body,
            $crate::drill_engine::coordinator::ActiveDrill::Flashcards($s)     => $body,
        }
    };
}
pub(crate) use with_session;

impl ActiveDrill<'_> {
    pub fn mode(&self) -> DrillMode {
        match self {
            ActiveDrill::Quiz(_)           => DrillMode::Quiz,
            ActiveDrill::Classification(_) => DrillMode::Classification,
            ActiveDrill::Calculation(_)    => DrillMode::Calculation,
            ActiveDrill::Interpretation(_) => DrillMode::Interpretation,
            ActiveDrill::Flashcards(_)     => DrillMode::Flashcards,
        }
    }

    pub fn set_key(&self) -> &str {
        with_session!(self, s => s.drill_set().key())
    }

    pub fn position(&self) -> usize {
        with_session!(self, s => s.position())
    }

    pub fn len(&self) -> usize {
        with_session!(self, s => s.len())
    }

    pub fn is_empty(&self) -> bool {
        with_session!(self, s => s.is_empty())
    }

    pub fn tally(&self) -> Tally {
        with_session!(self, s => s.tally())
    }

    pub fn is_completed(&self) -> bool {
        with_session!(self, s => s.is_completed())
    }

    pub fn summary(&self) -> Option<SessionSummary> {
        with_session!(self, s => s.summary())
    }

    pub fn policy(&self) -> ModePolicy {
        with_session!(self, s => s.policy())
    }

    pub fn is_revealed(&self) -> bool {
        with_session!(self, s => s.is_revealed())
    }

    pub fn is_correct(&self) -> Option<bool> {
        with_session!(self, s => s.is_correct())
    }

    pub fn is_panel_shown(&self, panel: Panel) -> bool {
        with_session!(self, s => s.is_panel_shown(panel))
    }

    // Transitions, forwarded to the inner session.

    /// Pick the `index`-th (zero-based) choice of the current item.
    ///
    /// Classification choices are the category's fixed labels, so the index
    /// is translated to the label before it is recorded.
    pub fn select_choice(&mut self, index: usize) -> Result<(), Rejected> {
        match self {
            ActiveDrill::Quiz(s) => s.select(index),
            ActiveDrill::Classification(s) => {
                let options = s.current_item().category.options();
                let label = options.get(index).ok_or(Rejected::InvalidChoice)?;
                s.select(*label)
            }
            _ => Err(Rejected::Unsupported),
        }
    }

    /// Pick a classification label by name (case-insensitive).
    pub fn select_value(&mut self, value: &str) -> Result<(), Rejected> {
        let ActiveDrill::Classification(s) = self else {
            return Err(Rejected::Unsupported);
        };
        let wanted = value.trim();
        let label = s
            .current_item()
            .category
            .options()
            .iter()
            .find(|o| o.eq_ignore_ascii_case(wanted))
            .ok_or(Rejected::InvalidChoice)?;
        s.select(*label)
    }

    pub fn reveal(&mut self) -> Result<Revealed, Rejected> {
        with_session!(self, s => s.reveal())
    }

    pub fn conceal(&mut self) -> Result<(), Rejected> {
        with_session!(self, s => s.conceal())
    }

    pub fn advance(&mut self) -> Result<Advanced, Rejected> {
        with_session!(self, s => s.advance())
    }

    pub fn retreat(&mut self) -> Result<usize, Rejected> {
        with_session!(self, s => s.retreat())
    }

    pub fn jump_to(&mut self, index: usize) -> Result<(), Rejected> {
        with_session!(self, s => s.jump_to(index))
    }

    pub fn toggle_panel(&mut self, panel: Panel) -> Result<bool, Rejected> {
        with_session!(self, s => s.toggle_panel(panel))
    }

    pub fn shuffle(&mut self) -> Result<(), Rejected> {
        with_session!(self, s => s.shuffle())
    }

    pub fn restart(&mut self) {
        with_session!(self, s => s.restart())
    }
}

fn require<'a, T>(set: Option<&'a DrillSet<T>>, mode: DrillMode, key: &str) -> Result<&'a DrillSet<T>, DrillError> {
    set.ok_or_else(|| DrillError::NoContent { mode, key: key.to_string() })
}

/// Start a new drill for `request`, replacing whatever was active before.
pub fn start_drill(store: &ContentStore, request: DrillRequest) -> Result<ActiveDrill<'_>, DrillError> {
    start_drill_with_threshold(store, request, DEFAULT_PASS_THRESHOLD)
}

/// [`start_drill`] with a custom mastery threshold for the result card.
pub fn start_drill_with_threshold(
    store: &ContentStore,
    request: DrillRequest,
    pass_threshold: u32,
) -> Result<ActiveDrill<'_>, DrillError> {
    let DrillRequest { mode, topic, category, rng_seed } = request;
    let policy = ModePolicy::for_mode(mode);

    let drill = match mode {
        DrillMode::Quiz => {
            let set = require(store.questions(topic), mode, topic.key())?;
            ActiveDrill::Quiz(DrillSession::new(set, policy, rng_seed).with_pass_threshold(pass_threshold))
        }
        DrillMode::Classification => {
            let set = require(store.classifications(category), mode, category.key())?;
            ActiveDrill::Classification(DrillSession::new(set, policy, rng_seed).with_pass_threshold(pass_threshold))
        }
        DrillMode::Calculation => {
            let set = require(store.exercises(topic), mode, topic.key())?;
            ActiveDrill::Calculation(DrillSession::new(set, policy, rng_seed))
        }
        DrillMode::Interpretation => {
            let set = require(store.scenarios(topic), mode, topic.key())?;
            ActiveDrill::Interpretation(DrillSession::new(set, policy, rng_seed))
        }
        DrillMode::Flashcards => {
            let set = require(store.flashcards(topic), mode, topic.key())?;
            ActiveDrill::Flashcards(DrillSession::new(set, policy, rng_seed))
        }
    };

    info!(mode = mode.key(), set = drill.set_key(), items = drill.len(), "drill started");
    Ok(drill)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drill_engine::models::{ClassificationCategory, Topic};

    fn store() -> ContentStore {
        ContentStore::builtin().unwrap()
    }

    #[test]
    fn each_mode_gets_its_session() {
        let store = store();
        for mode in DrillMode::ALL {
            let drill = start_drill(&store, DrillRequest::new(mode)).unwrap();
            assert_eq!(drill.mode(), mode);
            assert_eq!(drill.position(), 0);
            assert!(!drill.is_empty());
            assert_eq!(drill.policy(), ModePolicy::for_mode(mode));
        }
    }

    #[test]
    fn set_key_names_topic_or_category() {
        let store = store();
        let quiz = start_drill(&store, DrillRequest::new(DrillMode::Quiz).with_topic(Topic::Almm)).unwrap();
        assert_eq!(quiz.set_key(), "almm");
        let req = DrillRequest::new(DrillMode::Classification).with_category(ClassificationCategory::Rsf);
        let cls = start_drill(&store, req).unwrap();
        assert_eq!(cls.set_key(), "rsf");
    }

    #[test]
    fn classification_choice_maps_to_label() {
        let store = store();
        let mut drill = start_drill(&store, DrillRequest::new(DrillMode::Classification)).unwrap();
        // "Coins and banknotes" is Level 1, the first HQLA label.
        drill.select_choice(0).unwrap();
        assert_eq!(drill.reveal(), Ok(Revealed::Scored { correct: true }));
        assert_eq!(drill.select_choice(9), Err(Rejected::InvalidChoice));

        drill.advance().unwrap();
        assert_eq!(drill.select_value("bogus"), Err(Rejected::InvalidChoice));
        drill.select_value("level 2a").unwrap();
        assert!(drill.reveal().is_ok());
    }

    #[test]
    fn review_modes_refuse_choices() {
        let store = store();
        let mut drill = start_drill(&store, DrillRequest::new(DrillMode::Flashcards)).unwrap();
        assert_eq!(drill.select_choice(0), Err(Rejected::Unsupported));
        assert_eq!(drill.select_value("Level 1"), Err(Rejected::Unsupported));
        assert_eq!(drill.reveal(), Ok(Revealed::Shown));
        drill.conceal().unwrap();
        assert!(!drill.is_revealed());
    }

    #[test]
    fn custom_threshold_reaches_summary() {
        let store = store();
        let req = DrillRequest::new(DrillMode::Quiz).with_topic(Topic::Almm);
        let mut drill = start_drill_with_threshold(&store, req, 0).unwrap();
        while !drill.is_completed() {
            drill.select_choice(0).unwrap();
            drill.reveal().unwrap();
            drill.advance().unwrap();
        }
        let summary = drill.summary().unwrap();
        assert_eq!(summary.tally.total as usize, drill.len());
        assert_eq!(summary.band, crate::drill_engine::scoring::ScoreBand::Mastered);

        drill.restart();
        assert_eq!(drill.tally(), Tally::default());
        assert!(drill.summary().is_none());
    }

    #[test]
    fn missing_content_is_reported() {
        let store = store();
        let err = start_drill(&store, DrillRequest::new(DrillMode::Quiz).with_topic(Topic::Repos)).unwrap_err();
        assert_eq!(err.to_string(), "no Conceptual Quiz content for `repos`");
    }
}
