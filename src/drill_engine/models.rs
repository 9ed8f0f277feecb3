use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DrillError;

// ---------------------------------------------------------------------------
// Topic / mode metadata
// ---------------------------------------------------------------------------

/// Regulatory area a drill set belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Topic {
    Lcr,
    Nsfr,
    Almm,
    Capital,
    Leverage,
    Repos,
    Bonds,
}

impl Topic {
    pub const ALL: [Topic; 7] = [
        Topic::Lcr,
        Topic::Nsfr,
        Topic::Almm,
        Topic::Capital,
        Topic::Leverage,
        Topic::Repos,
        Topic::Bonds,
    ];

    /// Lower-case key used in content packs and on the command line.
    pub fn key(self) -> &'static str {
        match self {
            Topic::Lcr      => "lcr",
            Topic::Nsfr     => "nsfr",
            Topic::Almm     => "almm",
            Topic::Capital  => "capital",
            Topic::Leverage => "leverage",
            Topic::Repos    => "repos",
            Topic::Bonds    => "bonds",
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Topic::Lcr      => "LCR",
            Topic::Nsfr     => "NSFR",
            Topic::Almm     => "ALMM",
            Topic::Capital  => "Capital",
            Topic::Leverage => "Leverage",
            Topic::Repos    => "Repos",
            Topic::Bonds    => "Covered Bonds",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for Topic {
    type Err = DrillError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Topic::ALL
            .into_iter()
            .find(|t| t.key() == wanted)
            .ok_or_else(|| DrillError::UnknownTopic(s.to_string()))
    }
}

/// Classification drills are keyed by category rather than by topic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassificationCategory {
    Hqla,
    Asf,
    Rsf,
    Outflows,
}

impl ClassificationCategory {
    pub const ALL: [ClassificationCategory; 4] = [
        ClassificationCategory::Hqla,
        ClassificationCategory::Asf,
        ClassificationCategory::Rsf,
        ClassificationCategory::Outflows,
    ];

    pub fn key(self) -> &'static str {
        match self {
            ClassificationCategory::Hqla     => "hqla",
            ClassificationCategory::Asf      => "asf",
            ClassificationCategory::Rsf      => "rsf",
            ClassificationCategory::Outflows => "outflows",
        }
    }

    /// The fixed answer choices offered for every item in this category.
    pub fn options(self) -> &'static [&'static str] {
        match self {
            ClassificationCategory::Hqla =>
                &["Level 1", "Level 2A", "Level 2B", "Ineligible"],
            ClassificationCategory::Asf =>
                &["100%", "95%", "90%", "50%", "0%"],
            ClassificationCategory::Rsf =>
                &["0%", "5%", "10%", "15%", "25%", "50%", "65%", "85%", "100%"],
            ClassificationCategory::Outflows =>
                &["0%", "3%", "5%", "10%", "15%", "25%", "30%", "40%", "100%"],
        }
    }
}

impl fmt::Display for ClassificationCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ClassificationCategory::Hqla     => "HQLA Classification",
            ClassificationCategory::Asf      => "ASF Factors",
            ClassificationCategory::Rsf      => "RSF Factors",
            ClassificationCategory::Outflows => "Outflow Rates",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for ClassificationCategory {
    type Err = DrillError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        ClassificationCategory::ALL
            .into_iter()
            .find(|c| c.key() == wanted)
            .ok_or_else(|| DrillError::UnknownCategory(s.to_string()))
    }
}

/// The five learning modes. Each one maps to a fixed [`ModePolicy`].
///
/// [`ModePolicy`]: crate::drill_engine::policy::ModePolicy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DrillMode {
    Quiz,
    Classification,
    Calculation,
    Interpretation,
    Flashcards,
}

impl DrillMode {
    pub const ALL: [DrillMode; 5] = [
        DrillMode::Quiz,
        DrillMode::Classification,
        DrillMode::Calculation,
        DrillMode::Interpretation,
        DrillMode::Flashcards,
    ];

    pub fn key(self) -> &'static str {
        match self {
            DrillMode::Quiz           => "quiz",
            DrillMode::Classification => "classification",
            DrillMode::Calculation    => "calculation",
            DrillMode::Interpretation => "interpretation",
            DrillMode::Flashcards     => "flashcards",
        }
    }
}

impl fmt::Display for DrillMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DrillMode::Quiz           => "Conceptual Quiz",
            DrillMode::Classification => "Classification Practice",
            DrillMode::Calculation    => "Calculation Exercises",
            DrillMode::Interpretation => "Regulatory Interpretation",
            DrillMode::Flashcards     => "Flashcards",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for DrillMode {
    type Err = DrillError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        DrillMode::ALL
            .into_iter()
            .find(|m| m.key() == wanted)
            .ok_or_else(|| DrillError::UnknownMode(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Basic,
    Intermediate,
    Advanced,
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Basic        => write!(f, "basic"),
            Difficulty::Intermediate => write!(f, "intermediate"),
            Difficulty::Advanced     => write!(f, "advanced"),
        }
    }
}

// ---------------------------------------------------------------------------
// Answers
// ---------------------------------------------------------------------------

/// What the learner picked for the current item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Selection {
    /// Index into a multiple-choice option list.
    Option(usize),
    /// A value matched as a string (classification levels, factors).
    Value(String),
}

impl From<usize> for Selection {
    fn from(index: usize) -> Self {
        Selection::Option(index)
    }
}

impl From<&str> for Selection {
    fn from(value: &str) -> Self {
        Selection::Value(value.to_string())
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::Option(i) => write!(f, "option {}", i + 1),
            Selection::Value(v)  => write!(f, "{}", v),
        }
    }
}

/// The correct answer an item exposes to the evaluate function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerKey<'a> {
    Option(usize),
    Value(&'a str),
    /// Review-only items (exercises, scenarios, flashcards) have nothing to pick.
    Open,
}

/// A unit of drill content. The engine only looks at identity, answer key and
/// accepted choices; every other field is display data.
pub trait DrillItem {
    fn item_id(&self) -> &str;

    fn answer_key(&self) -> AnswerKey<'_>;

    /// Whether `selection` is one of this item's choices. Items with nothing
    /// to pick accept nothing.
    fn accepts(&self, _selection: &Selection) -> bool {
        false
    }
}

// ---------------------------------------------------------------------------
// Content items
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionItem {
    pub id: String,
    pub topic: Topic,
    pub difficulty: Difficulty,
    pub question: String,
    pub options: Vec<String>,
    /// Index of the correct entry in `options`.
    pub correct: usize,
    pub explanation: String,
    /// Basel Framework paragraph, e.g. "LCR20.1".
    pub reference: String,
}

impl DrillItem for QuestionItem {
    fn item_id(&self) -> &str {
        &self.id
    }

    fn answer_key(&self) -> AnswerKey<'_> {
        AnswerKey::Option(self.correct)
    }

    fn accepts(&self, selection: &Selection) -> bool {
        matches!(selection, Selection::Option(index) if *index < self.options.len())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationItem {
    pub id: String,
    pub category: ClassificationCategory,
    pub item: String,
    /// HQLA level or ASF/RSF/outflow factor, one of `category.options()`.
    pub answer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub haircut: Option<String>,
    pub explanation: String,
}

impl DrillItem for ClassificationItem {
    fn item_id(&self) -> &str {
        &self.id
    }

    fn answer_key(&self) -> AnswerKey<'_> {
        AnswerKey::Value(&self.answer)
    }

    fn accepts(&self, selection: &Selection) -> bool {
        match selection {
            Selection::Value(label) => self.category.options().contains(&label.as_str()),
            Selection::Option(_) => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    pub steps: Vec<String>,
    pub answer: String,
    pub key_insight: String,
}

/// A worked ratio calculation with hints and a step-by-step solution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseItem {
    pub id: String,
    pub topic: Topic,
    pub title: String,
    pub difficulty: Difficulty,
    pub scenario: String,
    pub question: String,
    #[serde(default)]
    pub hints: Vec<String>,
    pub solution: Solution,
}

impl DrillItem for ExerciseItem {
    fn item_id(&self) -> &str {
        &self.id
    }

    fn answer_key(&self) -> AnswerKey<'_> {
        AnswerKey::Open
    }
}

/// An open interpretation case with guidance and a model answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioItem {
    pub id: String,
    pub topic: Topic,
    pub title: String,
    pub difficulty: Difficulty,
    pub scenario: String,
    pub question: String,
    #[serde(default)]
    pub guidance: Vec<String>,
    pub model_answer: String,
    #[serde(default)]
    pub regulations: Vec<String>,
}

impl DrillItem for ScenarioItem {
    fn item_id(&self) -> &str {
        &self.id
    }

    fn answer_key(&self) -> AnswerKey<'_> {
        AnswerKey::Open
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlashcardItem {
    pub id: String,
    pub topic: Topic,
    pub front: String,
    pub back: String,
}

impl DrillItem for FlashcardItem {
    fn item_id(&self) -> &str {
        &self.id
    }

    fn answer_key(&self) -> AnswerKey<'_> {
        AnswerKey::Open
    }
}

// ---------------------------------------------------------------------------
// Drill sets / requests
// ---------------------------------------------------------------------------

/// An ordered, non-empty sequence of items for one topic and mode.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DrillSet<T> {
    key: String,
    items: Vec<T>,
}

impl<T> DrillSet<T> {
    /// Fails with [`DrillError::EmptyDrillSet`] when `items` is empty.
    pub fn new(key: impl Into<String>, items: Vec<T>) -> Result<Self, DrillError> {
        let key = key.into();
        if items.is_empty() {
            return Err(DrillError::EmptyDrillSet { key });
        }
        Ok(DrillSet { key, items })
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }
}

/// Which drill to start. Only `mode` is required; [`DrillRequest::new`]
/// defaults to the LCR topic, the HQLA category and an entropy seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrillRequest {
    pub mode: DrillMode,
    pub topic: Topic,
    /// Used by classification drills only.
    pub category: ClassificationCategory,
    /// Seed for shuffled modes; `None` draws from OS entropy.
    pub rng_seed: Option<u64>,
}

impl DrillRequest {
    pub fn new(mode: DrillMode) -> Self {
        DrillRequest {
            mode,
            topic: Topic::Lcr,
            category: ClassificationCategory::Hqla,
            rng_seed: None,
        }
    }

    pub fn with_topic(mut self, topic: Topic) -> Self {
        self.topic = topic;
        self
    }

    pub fn with_category(mut self, category: ClassificationCategory) -> Self {
        self.category = category;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn topic_keys_round_trip_through_from_str() {
        for topic in Topic::ALL {
            assert_eq!(topic.key().parse::<Topic>().unwrap(), topic);
        }
        assert_eq!(" NSFR ".parse::<Topic>().unwrap(), Topic::Nsfr);
        assert!(matches!("basel4".parse::<Topic>(), Err(DrillError::UnknownTopic(_))));
    }

    #[test]
    fn unknown_mode_and_category_are_rejected() {
        assert!(matches!("essay".parse::<DrillMode>(), Err(DrillError::UnknownMode(_))));
        assert!(matches!("liabilities".parse::<ClassificationCategory>(), Err(DrillError::UnknownCategory(_))));
        assert_eq!("Flashcards".parse::<DrillMode>().unwrap(), DrillMode::Flashcards);
    }

    #[test]
    fn empty_drill_set_fails_fast() {
        let err = DrillSet::<FlashcardItem>::new("lcr", Vec::new()).unwrap_err();
        assert!(matches!(err, DrillError::EmptyDrillSet { ref key } if key == "lcr"));
    }

    #[test]
    fn request_builder_overrides_defaults() {
        let req = DrillRequest::new(DrillMode::Classification)
            .with_topic(Topic::Nsfr)
            .with_category(ClassificationCategory::Rsf)
            .with_seed(7);
        assert_eq!(req.topic, Topic::Nsfr);
        assert_eq!(req.category, ClassificationCategory::Rsf);
        assert_eq!(req.rng_seed, Some(7));
    }
}
