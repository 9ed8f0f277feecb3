use serde_json::{json, Value};

use crate::drill_engine::{
    coordinator::{with_session, ActiveDrill},
    models::{ClassificationItem, ExerciseItem, FlashcardItem, QuestionItem, ScenarioItem, Selection},
    policy::Panel,
    session::DrillSession,
};

/// Render state for one multiple-choice option.
///
/// Before reveal only `selected` is meaningful; afterwards the view colours
/// the correct option green and a wrong pick red.
fn option_state(index: usize, text: &str, selected: bool, revealed: bool, correct: bool) -> Value {
    let state = match (revealed, correct, selected) {
        (false, _, true)    => "selected",
        (false, _, false)   => "idle",
        (true, true, _)     => "correct",
        (true, false, true) => "wrong",
        (true, false, false) => "idle",
    };
    json!({ "index": index, "text": text, "state": state })
}

fn selected_index(selection: Option<&Selection>) -> Option<usize> {
    match selection {
        Some(Selection::Option(i)) => Some(*i),
        _ => None,
    }
}

fn selected_value(selection: Option<&Selection>) -> Option<&str> {
    match selection {
        Some(Selection::Value(v)) => Some(v.as_str()),
        _ => None,
    }
}

fn quiz_body(s: &DrillSession<'_, QuestionItem>) -> Value {
    let q = s.current_item();
    let revealed = s.is_revealed();
    let chosen = selected_index(s.selection());
    let options: Vec<Value> = q
        .options
        .iter()
        .enumerate()
        .map(|(i, text)| option_state(i, text, chosen == Some(i), revealed, i == q.correct))
        .collect();

    let mut body = json!({
        "id":         q.id,
        "difficulty": q.difficulty.to_string(),
        "question":   q.question,
        "options":    options,
    });
    if revealed {
        body["explanation"] = json!(q.explanation);
        body["reference"] = json!(q.reference);
    }
    body
}

fn classification_body(s: &DrillSession<'_, ClassificationItem>) -> Value {
    let c = s.current_item();
    let revealed = s.is_revealed();
    let chosen = selected_value(s.selection());
    let options: Vec<Value> = c
        .category
        .options()
        .iter()
        .enumerate()
        .map(|(i, opt)| option_state(i, opt, chosen == Some(*opt), revealed, *opt == c.answer))
        .collect();

    let mut body = json!({
        "id":       c.id,
        "category": c.category.to_string(),
        "item":     c.item,
        "options":  options,
    });
    if revealed {
        body["answer"] = json!(c.answer);
        body["explanation"] = json!(c.explanation);
        if let Some(haircut) = &c.haircut {
            body["haircut"] = json!(haircut);
        }
    }
    body
}

fn exercise_body(s: &DrillSession<'_, ExerciseItem>) -> Value {
    let e = s.current_item();
    let mut body = json!({
        "id":         e.id,
        "title":      e.title,
        "difficulty": e.difficulty.to_string(),
        "scenario":   e.scenario,
        "question":   e.question,
    });
    if s.is_panel_shown(Panel::Hints) {
        body["hints"] = json!(e.hints);
    }
    if s.is_revealed() {
        body["solution"] = json!({
            "steps":       e.solution.steps,
            "answer":      e.solution.answer,
            "key_insight": e.solution.key_insight,
        });
    }
    body
}

fn scenario_body(s: &DrillSession<'_, ScenarioItem>) -> Value {
    let sc = s.current_item();
    let mut body = json!({
        "id":         sc.id,
        "title":      sc.title,
        "difficulty": sc.difficulty.to_string(),
        "scenario":   sc.scenario,
        "question":   sc.question,
    });
    if s.is_panel_shown(Panel::Guidance) {
        body["guidance"] = json!(sc.guidance);
        body["regulations"] = json!(sc.regulations);
    }
    if s.is_revealed() {
        body["model_answer"] = json!(sc.model_answer);
    }
    body
}

fn flashcard_body(s: &DrillSession<'_, FlashcardItem>) -> Value {
    let f = s.current_item();
    let mut body = json!({ "id": f.id, "front": f.front });
    if s.is_revealed() {
        body["back"] = json!(f.back);
    }
    body
}

/// Map an [`ActiveDrill`] to the JSON view state a front-end renders.
///
/// Answers, explanations, solutions and model answers are left out until the
/// current item is revealed, so the payload can go straight to a client.
pub fn to_view_state(drill: &ActiveDrill<'_>) -> Value {
    let item = match drill {
        ActiveDrill::Quiz(s)           => quiz_body(s),
        ActiveDrill::Classification(s) => classification_body(s),
        ActiveDrill::Calculation(s)    => exercise_body(s),
        ActiveDrill::Interpretation(s) => scenario_body(s),
        ActiveDrill::Flashcards(s)     => flashcard_body(s),
    };

    let (revealed, correct, panels, shown_panels) = with_session!(drill, s => (
        s.is_revealed(),
        s.is_correct(),
        s.policy().panels.to_vec(),
        s.shown_panels(),
    ));
    let tally = drill.tally();

    json!({
        "mode":      drill.mode().key(),
        "set":       drill.set_key(),
        "position":  drill.position(),
        "len":       drill.len(),
        "revealed":  revealed,
        "correct":   correct,
        "completed": drill.is_completed(),
        "panels":    panels,
        "shown_panels": shown_panels,
        "tally": {
            "correct":    tally.correct,
            "total":      tally.total,
            "percentage": tally.percentage(),
        },
        "summary":   drill.summary(),
        "item":      item,
    })
}
