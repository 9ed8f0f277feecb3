//! Correctness strategies injected into a [`DrillSession`].
//!
//! A strategy is a plain function pointer, swapped in with
//! [`DrillSession::with_evaluator`].
//!
//! [`DrillSession`]: crate::drill_engine::session::DrillSession

use crate::drill_engine::models::{AnswerKey, DrillItem, Selection};

/// Decides whether `selection` is correct for `item`.
pub type Evaluate<T> = fn(&T, &Selection) -> bool;

/// Compare the selection against the item's own [`AnswerKey`].
///
/// Option keys only accept option selections and value keys only accept
/// exact value matches. `Open` items are never "correct".
pub fn answer_key<T: DrillItem>(item: &T, selection: &Selection) -> bool {
    match (item.answer_key(), selection) {
        (AnswerKey::Option(correct), Selection::Option(chosen)) => correct == *chosen,
        (AnswerKey::Value(correct), Selection::Value(chosen)) => correct == chosen,
        _ => false,
    }
}
