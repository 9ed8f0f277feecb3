use std::io::{self, Write};

use serde_json::json;

use basel_drill::drill_engine::{
    ClassificationItem, ExerciseItem, FlashcardItem, QuestionItem, ScenarioItem,
};
use basel_drill::{to_view_state, ActiveDrill, DrillSession, Panel, Selection};

use crate::OutputFormat;

pub const HELP: &str = "\
commands: <number> pick option   <label> pick classification label
          c check   f flip/hide   h hints/guidance
          n next    p previous    g <n> go to item
          s shuffle r restart     ? help   q quit
          t <topic> switch topic   m <mode> switch mode   k <category> classify";

/// Print the current state, preceded by `notice` if there is one.
pub fn frame(
    out: &mut impl Write,
    drill: &ActiveDrill<'_>,
    format: OutputFormat,
    notice: Option<&str>,
) -> io::Result<()> {
    match format {
        OutputFormat::Json => {
            let mut view = to_view_state(drill);
            if let Some(notice) = notice {
                view["notice"] = json!(notice);
            }
            writeln!(out, "{view}")?;
        }
        OutputFormat::Plain => {
            if let Some(notice) = notice {
                writeln!(out, "{notice}")?;
            }
            plain(out, drill)?;
        }
    }
    prompt(out, format)
}

pub fn prompt(out: &mut impl Write, format: OutputFormat) -> io::Result<()> {
    if let OutputFormat::Plain = format {
        write!(out, "> ")?;
    }
    out.flush()
}

fn plain(out: &mut impl Write, drill: &ActiveDrill<'_>) -> io::Result<()> {
    writeln!(out)?;
    writeln!(
        out,
        "── {} · {} · {}/{} · score {} ──",
        drill.mode(),
        drill.set_key(),
        drill.position() + 1,
        drill.len(),
        drill.tally(),
    )?;

    if drill.is_completed() {
        if let Some(summary) = drill.summary() {
            writeln!(out, "Drill complete: {} ({}%)", summary.band, summary.percentage)?;
        }
        return writeln!(out, "r to restart, q to quit");
    }

    match drill {
        ActiveDrill::Quiz(s)           => quiz(out, s),
        ActiveDrill::Classification(s) => classification(out, s),
        ActiveDrill::Calculation(s)    => exercise(out, s),
        ActiveDrill::Interpretation(s) => scenario(out, s),
        ActiveDrill::Flashcards(s)     => flashcard(out, s),
    }
}

fn marker(revealed: bool, selected: bool, correct: bool) -> char {
    match (revealed, selected, correct) {
        (true, _, true)     => '✓',
        (true, true, false) => '✗',
        (false, true, _)    => '›',
        _                   => ' ',
    }
}

fn verdict(out: &mut impl Write, correct: Option<bool>) -> io::Result<()> {
    match correct {
        Some(true)  => writeln!(out, "Correct."),
        Some(false) => writeln!(out, "Incorrect."),
        None        => Ok(()),
    }
}

fn bullets(out: &mut impl Write, heading: &str, lines: &[String]) -> io::Result<()> {
    writeln!(out, "{heading}:")?;
    for line in lines {
        writeln!(out, "  • {line}")?;
    }
    Ok(())
}

fn quiz(out: &mut impl Write, s: &DrillSession<'_, QuestionItem>) -> io::Result<()> {
    let q = s.current_item();
    let chosen = match s.selection() {
        Some(Selection::Option(i)) => Some(*i),
        _ => None,
    };
    writeln!(out, "[{}] {}", q.difficulty, q.question)?;
    for (i, text) in q.options.iter().enumerate() {
        let mark = marker(s.is_revealed(), chosen == Some(i), i == q.correct);
        writeln!(out, " {mark} {}. {text}", i + 1)?;
    }
    if s.is_revealed() {
        verdict(out, s.is_correct())?;
        writeln!(out, "{}", q.explanation)?;
        writeln!(out, "Reference: {}", q.reference)?;
    }
    Ok(())
}

fn classification(out: &mut impl Write, s: &DrillSession<'_, ClassificationItem>) -> io::Result<()> {
    let c = s.current_item();
    let chosen = match s.selection() {
        Some(Selection::Value(v)) => Some(v.as_str()),
        _ => None,
    };
    writeln!(out, "Classify: {}", c.item)?;
    for (i, label) in c.category.options().iter().enumerate() {
        let mark = marker(s.is_revealed(), chosen == Some(*label), *label == c.answer);
        writeln!(out, " {mark} {}. {label}", i + 1)?;
    }
    if s.is_revealed() {
        verdict(out, s.is_correct())?;
        if let Some(haircut) = &c.haircut {
            writeln!(out, "Haircut: {haircut}")?;
        }
        writeln!(out, "{}", c.explanation)?;
    }
    Ok(())
}

fn exercise(out: &mut impl Write, s: &DrillSession<'_, ExerciseItem>) -> io::Result<()> {
    let e = s.current_item();
    writeln!(out, "{} [{}]", e.title, e.difficulty)?;
    writeln!(out, "{}", e.scenario.trim_end())?;
    writeln!(out, "Q: {}", e.question)?;
    if s.is_panel_shown(Panel::Hints) {
        bullets(out, "Hints", &e.hints)?;
    }
    if s.is_revealed() {
        writeln!(out, "Solution:")?;
        for (i, step) in e.solution.steps.iter().enumerate() {
            writeln!(out, "  {}. {step}", i + 1)?;
        }
        writeln!(out, "Answer: {}", e.solution.answer)?;
        writeln!(out, "Key insight: {}", e.solution.key_insight)?;
    }
    Ok(())
}

fn scenario(out: &mut impl Write, s: &DrillSession<'_, ScenarioItem>) -> io::Result<()> {
    let sc = s.current_item();
    writeln!(out, "{} [{}]", sc.title, sc.difficulty)?;
    writeln!(out, "{}", sc.scenario.trim_end())?;
    writeln!(out, "Q: {}", sc.question)?;
    if s.is_panel_shown(Panel::Guidance) {
        bullets(out, "Guidance", &sc.guidance)?;
        bullets(out, "Regulations", &sc.regulations)?;
    }
    if s.is_revealed() {
        writeln!(out, "Model answer:")?;
        writeln!(out, "{}", sc.model_answer.trim_end())?;
    }
    Ok(())
}

fn flashcard(out: &mut impl Write, s: &DrillSession<'_, FlashcardItem>) -> io::Result<()> {
    let f = s.current_item();
    writeln!(out, "{}", f.front)?;
    if s.is_revealed() {
        writeln!(out, "  ↳ {}", f.back)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use basel_drill::{start_drill, ContentStore, DrillMode, DrillRequest};

    fn render(drill: &ActiveDrill<'_>, format: OutputFormat, notice: Option<&str>) -> String {
        let mut buf = Vec::new();
        frame(&mut buf, drill, format, notice).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn plain_quiz_hides_explanation_until_checked() {
        let store = ContentStore::builtin().unwrap();
        let mut drill = start_drill(&store, DrillRequest::new(DrillMode::Quiz)).unwrap();
        let explanation = match &drill {
            ActiveDrill::Quiz(s) => s.current_item().explanation.clone(),
            _ => unreachable!(),
        };

        let before = render(&drill, OutputFormat::Plain, None);
        assert!(before.contains(" 1. "));
        assert!(!before.contains(&explanation));

        drill.select_choice(0).unwrap();
        drill.reveal().unwrap();
        let after = render(&drill, OutputFormat::Plain, None);
        assert!(after.contains(&explanation));
        assert!(after.contains("score 1/1") || after.contains("score 0/1"));
    }

    #[test]
    fn json_frame_is_one_line_with_notice() {
        let store = ContentStore::builtin().unwrap();
        let drill = start_drill(&store, DrillRequest::new(DrillMode::Flashcards).with_seed(2)).unwrap();
        let text = render(&drill, OutputFormat::Json, Some("already at the last item"));
        assert_eq!(text.lines().count(), 1);
        let view: serde_json::Value = serde_json::from_str(text.trim()).unwrap();
        assert_eq!(view["mode"], "flashcards");
        assert_eq!(view["notice"], "already at the last item");
    }
}
