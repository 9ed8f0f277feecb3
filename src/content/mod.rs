//! Static study content and its index.
//!
//! Content is authored as TOML ([`ContentBank`]). The built-in bank is embedded
//! in the binary; a user content pack with the same schema can be merged on
//! top before the bank is validated and indexed into a [`ContentStore`].
//!
//! ```toml
//! [[flashcards]]
//! id = "lcr_f99"
//! topic = "lcr"
//! front = "LCR Formula"
//! back = "Stock of HQLA / Total net cash outflows over 30 days"
//! ```

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::drill_engine::models::{
    ClassificationCategory, ClassificationItem, DrillSet, ExerciseItem, FlashcardItem,
    QuestionItem, ScenarioItem, Topic,
};
use crate::error::DrillError;

const BUILTIN: &str = include_str!("builtin.toml");

/// Raw, unindexed content in authoring order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentBank {
    #[serde(default)]
    pub questions: Vec<QuestionItem>,
    #[serde(default)]
    pub classifications: Vec<ClassificationItem>,
    #[serde(default)]
    pub exercises: Vec<ExerciseItem>,
    #[serde(default)]
    pub scenarios: Vec<ScenarioItem>,
    #[serde(default)]
    pub flashcards: Vec<FlashcardItem>,
}

impl ContentBank {
    pub fn builtin() -> Result<Self, DrillError> {
        Self::from_toml_str(BUILTIN)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, DrillError> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: &Path) -> Result<Self, DrillError> {
        let text = std::fs::read_to_string(path).map_err(|source| DrillError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let bank: Self = toml::from_str(&text).map_err(|source| DrillError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), items = bank.item_count(), "loaded content pack");
        Ok(bank)
    }

    /// Append another bank. Entries whose id already exists replace the
    /// existing entry in place, so a pack can correct built-in content.
    pub fn merge(&mut self, other: ContentBank) {
        merge_by_id(&mut self.questions, other.questions, |q| &q.id);
        merge_by_id(&mut self.classifications, other.classifications, |c| &c.id);
        merge_by_id(&mut self.exercises, other.exercises, |e| &e.id);
        merge_by_id(&mut self.scenarios, other.scenarios, |s| &s.id);
        merge_by_id(&mut self.flashcards, other.flashcards, |f| &f.id);
    }

    pub fn item_count(&self) -> usize {
        self.questions.len()
            + self.classifications.len()
            + self.exercises.len()
            + self.scenarios.len()
            + self.flashcards.len()
    }

    /// Check answer keys and id uniqueness.
    pub fn validate(&self) -> Result<(), DrillError> {
        let mut seen = HashSet::new();
        let ids = self
            .questions
            .iter()
            .map(|q| &q.id)
            .chain(self.classifications.iter().map(|c| &c.id))
            .chain(self.exercises.iter().map(|e| &e.id))
            .chain(self.scenarios.iter().map(|s| &s.id))
            .chain(self.flashcards.iter().map(|f| &f.id));
        for id in ids {
            if id.trim().is_empty() {
                return Err(invalid(id, "empty id"));
            }
            if !seen.insert(id.as_str()) {
                return Err(invalid(id, "duplicate id"));
            }
        }

        for q in &self.questions {
            if q.options.len() < 2 {
                return Err(invalid(&q.id, "needs at least two options"));
            }
            if q.correct >= q.options.len() {
                return Err(invalid(
                    &q.id,
                    format!("correct index {} but only {} options", q.correct, q.options.len()),
                ));
            }
        }
        for c in &self.classifications {
            if !c.category.options().contains(&c.answer.as_str()) {
                return Err(invalid(
                    &c.id,
                    format!("answer `{}` is not a {} option", c.answer, c.category.key()),
                ));
            }
        }
        Ok(())
    }
}

fn invalid(id: &str, reason: impl Into<String>) -> DrillError {
    DrillError::InvalidContent { id: id.to_string(), reason: reason.into() }
}

fn merge_by_id<T>(into: &mut Vec<T>, from: Vec<T>, id: impl Fn(&T) -> &String) {
    for item in from {
        match into.iter().position(|existing| id(existing) == id(&item)) {
            Some(index) => into[index] = item,
            None => into.push(item),
        }
    }
}

/// Group `items` into non-empty drill sets, preserving authoring order.
fn group<K: Ord + Copy, T>(
    items: &[T],
    key_of: impl Fn(&T) -> K,
    name: impl Fn(K) -> &'static str,
) -> Result<BTreeMap<K, DrillSet<T>>, DrillError>
where
    T: Clone,
{
    let mut grouped: BTreeMap<K, Vec<T>> = BTreeMap::new();
    for item in items {
        grouped.entry(key_of(item)).or_default().push(item.clone());
    }
    grouped
        .into_iter()
        .map(|(k, v)| DrillSet::new(name(k), v).map(|set| (k, set)))
        .collect()
}

/// Validated, indexed content. Read-only once built.
#[derive(Debug, Clone)]
pub struct ContentStore {
    questions: BTreeMap<Topic, DrillSet<QuestionItem>>,
    classifications: BTreeMap<ClassificationCategory, DrillSet<ClassificationItem>>,
    exercises: BTreeMap<Topic, DrillSet<ExerciseItem>>,
    scenarios: BTreeMap<Topic, DrillSet<ScenarioItem>>,
    flashcards: BTreeMap<Topic, DrillSet<FlashcardItem>>,
}

impl ContentStore {
    /// Index the embedded content.
    pub fn builtin() -> Result<Self, DrillError> {
        Self::from_bank(ContentBank::builtin()?)
    }

    /// Built-in content with an optional pack merged on top.
    pub fn with_pack(pack: Option<&Path>) -> Result<Self, DrillError> {
        let mut bank = ContentBank::builtin()?;
        if let Some(path) = pack {
            bank.merge(ContentBank::load(path)?);
        }
        Self::from_bank(bank)
    }

    pub fn from_bank(bank: ContentBank) -> Result<Self, DrillError> {
        bank.validate()?;

        let mut exercises = group(&bank.exercises, |e| e.topic, Topic::key)?;
        let mut scenarios = group(&bank.scenarios, |s| s.topic, Topic::key)?;
        // ALMM has no exercise or scenario sets of its own; it browses the whole bank.
        if !bank.exercises.is_empty() {
            exercises.insert(Topic::Almm, DrillSet::new(Topic::Almm.key(), bank.exercises.clone())?);
        }
        if !bank.scenarios.is_empty() {
            scenarios.insert(Topic::Almm, DrillSet::new(Topic::Almm.key(), bank.scenarios.clone())?);
        }

        let store = ContentStore {
            questions: group(&bank.questions, |q| q.topic, Topic::key)?,
            classifications: group(&bank.classifications, |c| c.category, ClassificationCategory::key)?,
            exercises,
            scenarios,
            flashcards: group(&bank.flashcards, |f| f.topic, Topic::key)?,
        };
        debug!(items = bank.item_count(), "content indexed");
        Ok(store)
    }

    pub fn questions(&self, topic: Topic) -> Option<&DrillSet<QuestionItem>> {
        self.questions.get(&topic)
    }

    pub fn classifications(&self, category: ClassificationCategory) -> Option<&DrillSet<ClassificationItem>> {
        self.classifications.get(&category)
    }

    pub fn exercises(&self, topic: Topic) -> Option<&DrillSet<ExerciseItem>> {
        self.exercises.get(&topic)
    }

    pub fn scenarios(&self, topic: Topic) -> Option<&DrillSet<ScenarioItem>> {
        self.scenarios.get(&topic)
    }

    pub fn flashcards(&self, topic: Topic) -> Option<&DrillSet<FlashcardItem>> {
        self.flashcards.get(&topic)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drill_engine::models::Difficulty;

    const PACK: &str = r#"
[[flashcards]]
id = "lcr_f01"
topic = "lcr"
front = "LCR Formula"
back = "HQLA / net cash outflows over 30 days, at least 100%"

[[flashcards]]
id = "cap_extra"
topic = "capital"
front = "Countercyclical buffer range"
back = "0-2.5% of RWA"

[[questions]]
id = "lev_q1"
topic = "leverage"
difficulty = "basic"
question = "What is the minimum leverage ratio?"
options = ["3%", "4.5%", "8%"]
correct = 0
explanation = "Tier 1 capital over total exposure of at least 3%."
reference = "LEV20.1"
"#;

    #[test]
    fn builtin_content_validates_and_indexes() {
        let bank = ContentBank::builtin().unwrap();
        bank.validate().unwrap();
        let store = ContentStore::from_bank(bank).unwrap();
        for topic in [Topic::Lcr, Topic::Nsfr, Topic::Almm] {
            assert!(store.questions(topic).is_some(), "no quiz for {topic}");
        }
        for topic in Topic::ALL {
            assert!(store.flashcards(topic).is_some(), "no flashcards for {topic}");
        }
        for category in ClassificationCategory::ALL {
            assert!(store.classifications(category).is_some(), "no items for {category}");
        }
        assert!(store.questions(Topic::Bonds).is_none());
    }

    #[test]
    fn almm_browses_every_exercise_and_scenario() {
        let bank = ContentBank::builtin().unwrap();
        let store = ContentStore::from_bank(bank.clone()).unwrap();
        assert_eq!(store.exercises(Topic::Almm).unwrap().items(), bank.exercises.as_slice());
        assert_eq!(store.scenarios(Topic::Almm).unwrap().items(), bank.scenarios.as_slice());
        assert!(store
            .exercises(Topic::Lcr)
            .unwrap()
            .items()
            .iter()
            .all(|e| e.topic == Topic::Lcr));
    }

    #[test]
    fn pack_replaces_matching_ids_and_appends_new_ones() {
        let mut bank = ContentBank::builtin().unwrap();
        let before = bank.flashcards.len();
        bank.merge(ContentBank::from_toml_str(PACK).unwrap());
        assert_eq!(bank.flashcards.len(), before + 1);
        let first = &bank.flashcards[0];
        assert_eq!(first.id, "lcr_f01");
        assert!(first.back.starts_with("HQLA / net cash outflows"));

        let store = ContentStore::from_bank(bank).unwrap();
        let leverage = store.questions(Topic::Leverage).unwrap();
        assert_eq!(leverage.len(), 1);
        assert_eq!(leverage.items()[0].difficulty, Difficulty::Basic);
    }

    #[test]
    fn out_of_range_answer_is_invalid() {
        let mut bank = ContentBank::from_toml_str(PACK).unwrap();
        bank.questions[0].correct = 3;
        let err = bank.validate().unwrap_err();
        assert!(matches!(err, DrillError::InvalidContent { ref id, .. } if id == "lev_q1"));
    }

    #[test]
    fn classification_answer_must_be_a_category_option() {
        let mut bank = ContentBank::builtin().unwrap();
        bank.classifications[0].answer = "Level 3".into();
        assert!(matches!(bank.validate(), Err(DrillError::InvalidContent { .. })));
    }

    #[test]
    fn duplicate_ids_are_invalid() {
        let mut bank = ContentBank::from_toml_str(PACK).unwrap();
        let dup = bank.flashcards[0].clone();
        bank.flashcards.push(dup);
        assert!(matches!(bank.validate(), Err(DrillError::InvalidContent { .. })));
    }

    #[test]
    fn malformed_pack_file_names_its_path() {
        let path = std::env::temp_dir().join(format!("basel_drill_pack_{}.toml", std::process::id()));
        std::fs::write(&path, "[[flashcards]]\nid = \"x\"\ntopic = \"basel4\"\n").unwrap();

        let err = ContentStore::with_pack(Some(&path)).unwrap_err();
        assert!(matches!(err, DrillError::Parse { path: ref p, .. } if *p == path));
        assert!(err.to_string().contains(&path.display().to_string()));

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn malformed_pack_is_a_toml_error() {
        let err = ContentBank::from_toml_str("[[flashcards]]\nid = 1\n").unwrap_err();
        assert!(matches!(err, DrillError::Toml(_)));
    }

    #[test]
    fn missing_pack_file_reports_path() {
        let err = ContentStore::with_pack(Some(Path::new("/nonexistent/pack.toml"))).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/pack.toml"));
    }
}
