//! Drill engine: session state machine, mode policies and scoring.
//!
//! ## Module overview
//!
//! | Module        | Purpose |
//! |---------------|---------|
//! | `models`      | Topics, modes, content item types, `DrillSet`, `DrillRequest` |
//! | `session`     | `DrillSession`: select / reveal / advance state machine |
//! | `policy`      | Per-mode rules: scoring, end-of-set behaviour, shuffle, panels |
//! | `evaluator`   | Injected correctness strategies |
//! | `scoring`     | `Tally`, percentage, result card |
//! | `shuffle`     | Fisher-Yates permutations |
//! | `coordinator` | `start_drill()`, binds a request to content and a session |

pub mod coordinator;
pub mod evaluator;
pub mod models;
pub mod policy;
pub mod scoring;
pub mod session;
pub mod shuffle;

pub use coordinator::{start_drill, start_drill_with_threshold, ActiveDrill};
pub use models::{
    AnswerKey, ClassificationCategory, ClassificationItem, Difficulty, DrillItem, DrillMode,
    DrillRequest, DrillSet, ExerciseItem, FlashcardItem, QuestionItem, ScenarioItem, Selection,
    Solution, Topic,
};
pub use policy::{ModePolicy, Navigation, Panel};
pub use scoring::{ScoreBand, SessionSummary, Tally};
pub use session::{Advanced, DrillSession, Revealed, SessionSnapshot};
