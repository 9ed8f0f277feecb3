//! # basel_drill
//!
//! An offline study engine for Basel III liquidity and capital regulation.
//!
//! Five learning modes share one drill-session state machine:
//!
//! - **Quiz**: multiple-choice conceptual questions (LCR, NSFR, ALMM), scored.
//! - **Classification**: place an asset or liability in its HQLA level or
//!   ASF/RSF/outflow factor, scored.
//! - **Calculation**: worked ratio exercises with hints and solutions.
//! - **Interpretation**: open regulatory cases with guidance and a model answer.
//! - **Flashcards**: shuffled cards for seven topics, browsed circularly.
//!
//! ## How it works
//!
//! 1. Load a [`ContentStore`] (built-in content, optionally with a TOML pack).
//! 2. Call [`start_drill`] with a [`DrillRequest`]; it binds the matching
//!    [`DrillSet`] to a fresh [`DrillSession`] wrapped in an [`ActiveDrill`].
//! 3. Drive the session with `select` → `reveal` → `advance`. Every transition
//!    returns `Result<_, Rejected>`, so illegal moves (answering twice,
//!    skipping feedback) are refused without touching the score.
//! 4. Render with [`view_adapter::to_view_state`] or read a
//!    [`SessionSnapshot`] directly.
//!
//! ## Quick start
//!
//! ```rust
//! use basel_drill::{start_drill, ActiveDrill, ContentStore, DrillMode, DrillRequest, Topic};
//!
//! let store = ContentStore::builtin().expect("built-in content is valid");
//! let mut drill = start_drill(&store, DrillRequest::new(DrillMode::Quiz).with_topic(Topic::Nsfr))
//!     .expect("NSFR has a quiz");
//!
//! if let ActiveDrill::Quiz(session) = &mut drill {
//!     println!("Q: {}", session.current_item().question);
//!     session.select(1usize).unwrap();
//!     session.reveal().unwrap();
//!     println!("Score so far: {}", session.tally());
//!     session.advance().unwrap();
//! }
//! ```

pub mod config;
pub mod content;
pub mod drill_engine;
pub mod error;
pub mod telemetry;
pub mod view_adapter;

pub use config::AppConfig;
pub use content::{ContentBank, ContentStore};
pub use drill_engine::{
    start_drill, start_drill_with_threshold, ActiveDrill, Advanced, ClassificationCategory,
    DrillItem, DrillMode, DrillRequest, DrillSession, DrillSet, ModePolicy, Panel, Revealed,
    ScoreBand, Selection, SessionSnapshot, SessionSummary, Tally, Topic,
};
pub use error::{DrillError, Rejected};
pub use view_adapter::to_view_state;
