//! Catalogue of the study content, per mode and topic.
//!
//! Run with:
//!   cargo run --example topics
//!   cargo run --example topics -- my-pack.toml
//!
//! With a path argument the pack is merged over the built-in bank first, so
//! the counts show what a learner would actually get.

use std::path::PathBuf;

use basel_drill::{
    start_drill, ClassificationCategory, ContentStore, DrillError, DrillMode, DrillRequest, Topic,
};

// ── topic metadata ────────────────────────────────────────────────────────────

fn covers(topic: Topic) -> &'static str {
    match topic {
        Topic::Lcr      => "30-day stress survival: HQLA stock over net cash outflows.",
        Topic::Nsfr     => "One-year funding stability: available over required stable funding.",
        Topic::Almm     => "Additional liquidity monitoring metrics: maturity ladders, concentration.",
        Topic::Capital  => "CET1, Tier 1 and total capital ratios, buffers and Pillar 2.",
        Topic::Leverage => "Non-risk-based backstop: Tier 1 over total exposure.",
        Topic::Repos    => "Repo and reverse-repo treatment across LCR, NSFR and leverage.",
        Topic::Bonds    => "Covered bond eligibility and haircuts in the liquidity buffer.",
    }
}

/// Item count of the drill `request` would start, or 0 when there is none.
fn count(store: &ContentStore, request: DrillRequest) -> usize {
    start_drill(store, request).map(|d| d.len()).unwrap_or(0)
}

fn main() -> Result<(), DrillError> {
    let pack = std::env::args_os().nth(1).map(PathBuf::from);
    let store = ContentStore::with_pack(pack.as_deref())?;

    println!();
    println!("{:<14} {:>5} {:>7} {:>9} {:>6}", "topic", "quiz", "calc", "interp", "cards");
    println!("{}", "─".repeat(45));
    for topic in Topic::ALL {
        let n = |mode| count(&store, DrillRequest::new(mode).with_topic(topic));
        println!(
            "{:<14} {:>5} {:>7} {:>9} {:>6}",
            topic.to_string(),
            n(DrillMode::Quiz),
            n(DrillMode::Calculation),
            n(DrillMode::Interpretation),
            n(DrillMode::Flashcards),
        );
        println!("  {}", covers(topic));
    }

    println!();
    println!("Classification practice");
    println!("{}", "─".repeat(45));
    for category in ClassificationCategory::ALL {
        let n = count(&store, DrillRequest::new(DrillMode::Classification).with_category(category));
        println!("{:<22} {:>3} items  choices: {}", category.to_string(), n, category.options().join(" | "));
    }
    println!();
    Ok(())
}
