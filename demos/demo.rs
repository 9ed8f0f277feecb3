//! Scripted walk through all five learning modes.
//!
//! Run with: `cargo run --example demo`
//!
//! Every drill is driven through the same `select → reveal → advance` calls,
//! with fixed seeds so the output is reproducible:
//!
//! 1. **Quiz** (NSFR): answer every question with option 1 and read the
//!    result card.
//! 2. **Classification** (HQLA): answer with the right label, then show that a
//!    second answer after reveal is refused.
//! 3. **Calculation** (LCR): open the hints panel, reveal the worked solution,
//!    and hit the end-of-set stop.
//! 4. **Interpretation** (ALMM): jump straight to the last case.
//! 5. **Flashcards** (Repos): flip, step back past the first card, shuffle.
//!
//! Set `LOG_LEVEL=debug` to see the engine's transition events on stderr.

use basel_drill::{
    start_drill, telemetry, ActiveDrill, Advanced, ClassificationCategory, ContentStore,
    DrillError, DrillMode, DrillRequest, Panel, Revealed, Topic,
};

fn banner(title: &str) {
    println!();
    println!("══ {title} ══");
    println!();
}

fn quiz(store: &ContentStore) -> Result<(), DrillError> {
    banner("Quiz: NSFR, always answering option 1");
    let mut drill = start_drill(store, DrillRequest::new(DrillMode::Quiz).with_topic(Topic::Nsfr))?;
    let ActiveDrill::Quiz(s) = &mut drill else { return Ok(()) };

    loop {
        let q = s.current_item();
        println!("  Q{}: {}", s.position() + 1, q.question);
        s.select(0usize).ok();
        if let Ok(Revealed::Scored { correct }) = s.reveal() {
            let mark = if correct { "✓" } else { "✗" };
            println!("     {mark} picked \"{}\", answer \"{}\"", q.options[0], q.options[q.correct]);
        }
        if let Ok(Advanced::Completed) = s.advance() {
            break;
        }
    }

    if let Some(summary) = s.summary() {
        println!();
        println!("  Result: {} ({}%) → {}", summary.tally, summary.percentage, summary.band);
    }
    Ok(())
}

fn classification(store: &ContentStore) -> Result<(), DrillError> {
    banner("Classification: HQLA levels");
    let req = DrillRequest::new(DrillMode::Classification).with_category(ClassificationCategory::Hqla);
    let mut drill = start_drill(store, req)?;
    let ActiveDrill::Classification(s) = &mut drill else { return Ok(()) };

    for _ in 0..3 {
        let item = s.current_item();
        s.select(item.answer.as_str()).ok();
        s.reveal().ok();
        println!("  {} → {}", item.item, item.answer);
        if let Some(haircut) = &item.haircut {
            println!("     haircut {haircut}");
        }
        if let Err(rejected) = s.select("Ineligible") {
            println!("     second answer refused: {rejected}");
        }
        s.advance().ok();
    }
    println!("  Score after three: {}", s.tally());
    Ok(())
}

fn calculation(store: &ContentStore) -> Result<(), DrillError> {
    banner("Calculation: LCR exercises");
    let mut drill = start_drill(store, DrillRequest::new(DrillMode::Calculation).with_topic(Topic::Lcr))?;
    let ActiveDrill::Calculation(s) = &mut drill else { return Ok(()) };

    let e = s.current_item();
    println!("  {} [{}]", e.title, e.difficulty);
    println!("  Q: {}", e.question);
    if let Ok(true) = s.toggle_panel(Panel::Hints) {
        for hint in &e.hints {
            println!("     hint: {hint}");
        }
    }
    s.reveal().ok();
    for (i, step) in e.solution.steps.iter().enumerate() {
        println!("     {}. {step}", i + 1);
    }
    println!("  Answer: {}", e.solution.answer);

    while let Ok(Advanced::Moved { position }) = s.advance() {
        println!("  → exercise {}: {}", position + 1, s.current_item().title);
    }
    if let Err(rejected) = s.advance() {
        println!("  next at the last exercise: {rejected}");
    }
    Ok(())
}

fn interpretation(store: &ContentStore) -> Result<(), DrillError> {
    banner("Interpretation: the whole case bank via ALMM");
    let req = DrillRequest::new(DrillMode::Interpretation).with_topic(Topic::Almm);
    let mut drill = start_drill(store, req)?;
    let ActiveDrill::Interpretation(s) = &mut drill else { return Ok(()) };

    let last = s.len() - 1;
    s.jump_to(last).ok();
    let sc = s.current_item();
    println!("  Case {}/{}: {} ({})", s.position() + 1, s.len(), sc.title, sc.topic);
    s.toggle_panel(Panel::Guidance).ok();
    for g in &sc.guidance {
        println!("     guidance: {g}");
    }
    s.reveal().ok();
    if let Some(first) = sc.model_answer.lines().find(|l| !l.trim().is_empty()) {
        println!("  Model answer opens: {first}");
    }
    Ok(())
}

fn flashcards(store: &ContentStore) -> Result<(), DrillError> {
    banner("Flashcards: repos, seed 2024");
    let req = DrillRequest::new(DrillMode::Flashcards).with_topic(Topic::Repos).with_seed(2024);
    let mut drill = start_drill(store, req)?;
    let ActiveDrill::Flashcards(s) = &mut drill else { return Ok(()) };

    println!("  Order: {:?}", s.order());
    let card = s.current_item();
    s.reveal().ok();
    println!("  {}\n     ↳ {}", card.front, card.back);
    if let Ok(position) = s.retreat() {
        println!("  Previous from the first card lands on {}/{}", position + 1, s.len());
    }
    s.shuffle().ok();
    println!("  Reshuffled: {:?}", s.order());
    Ok(())
}

fn main() -> Result<(), DrillError> {
    telemetry::init_tracing();
    let store = ContentStore::builtin()?;

    quiz(&store)?;
    classification(&store)?;
    calculation(&store)?;
    interpretation(&store)?;
    flashcards(&store)?;
    println!();
    Ok(())
}
