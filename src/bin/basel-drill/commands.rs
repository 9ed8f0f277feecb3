use basel_drill::{ActiveDrill, DrillError, DrillMode, DrillRequest, Rejected};

/// One line of learner input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Option number, stored zero-based.
    Choose(usize),
    /// Classification label typed out, e.g. "Level 2A" or "85%".
    Label(String),
    Check,
    Flip,
    Panel,
    Next,
    Prev,
    /// Item number, stored zero-based.
    Jump(usize),
    Shuffle,
    Restart,
    /// Start a different drill.
    Switch(Switch),
    Help,
    Quit,
}

/// Which part of the request a switch replaces. Keys are parsed when the
/// switch is applied, so a typo comes back as a `DrillError`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Switch {
    Topic(String),
    Mode(String),
    /// Also moves to classification practice.
    Category(String),
}

impl Switch {
    /// The request this switch makes out of `current`.
    pub fn apply(&self, current: DrillRequest) -> Result<DrillRequest, DrillError> {
        let next = match self {
            Switch::Topic(key) => current.with_topic(key.parse()?),
            Switch::Mode(key) => DrillRequest { mode: key.parse()?, ..current },
            Switch::Category(key) => DrillRequest {
                mode: DrillMode::Classification,
                ..current.with_category(key.parse()?)
            },
        };
        Ok(next)
    }
}

/// `None` for blank or malformed input.
pub fn parse(line: &str) -> Option<Command> {
    let line = line.trim();
    let mut words = line.split_whitespace();
    let head = words.next()?;

    let command = match head.to_ascii_lowercase().as_str() {
        "c" | "check"    => Command::Check,
        "f" | "flip"     => Command::Flip,
        "h" | "hint"     => Command::Panel,
        "n" | "next"     => Command::Next,
        "p" | "prev"     => Command::Prev,
        "s" | "shuffle"  => Command::Shuffle,
        "r" | "restart"  => Command::Restart,
        "?" | "help"     => Command::Help,
        "q" | "quit"     => Command::Quit,
        "t" | "topic"    => Command::Switch(Switch::Topic(words.next()?.to_string())),
        "m" | "mode"     => Command::Switch(Switch::Mode(words.next()?.to_string())),
        "k" | "category" => Command::Switch(Switch::Category(words.next()?.to_string())),
        "g" | "go" => {
            let n: usize = words.next()?.parse().ok()?;
            Command::Jump(n.checked_sub(1)?)
        }
        _ => match line.parse::<usize>() {
            Ok(n) => Command::Choose(n.checked_sub(1)?),
            Err(_) => Command::Label(line.to_string()),
        },
    };
    Some(command)
}

/// Run one command against the active drill.
pub fn apply(drill: &mut ActiveDrill<'_>, command: Command) -> Result<(), Rejected> {
    match command {
        Command::Choose(index) => drill.select_choice(index),
        Command::Label(label) => drill.select_value(&label),
        Command::Check => drill.reveal().map(drop),
        // Flip toggles in review modes; in scored modes it is another check.
        Command::Flip if drill.is_revealed() && !drill.policy().scored => drill.conceal(),
        Command::Flip => drill.reveal().map(drop),
        Command::Panel => {
            let panel = drill.policy().panels.first().copied().ok_or(Rejected::Unsupported)?;
            drill.toggle_panel(panel).map(drop)
        }
        Command::Next => drill.advance().map(drop),
        Command::Prev => drill.retreat().map(drop),
        Command::Jump(index) => drill.jump_to(index),
        Command::Shuffle => drill.shuffle(),
        Command::Restart => {
            drill.restart();
            Ok(())
        }
        // Switching replaces the drill itself; the caller owns that.
        Command::Switch(_) | Command::Help | Command::Quit => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use basel_drill::{start_drill, ClassificationCategory, ContentStore, Tally, Topic};

    #[test]
    fn parses_letters_numbers_and_labels() {
        assert_eq!(parse("c"), Some(Command::Check));
        assert_eq!(parse("  N "), Some(Command::Next));
        assert_eq!(parse("2"), Some(Command::Choose(1)));
        assert_eq!(parse("g 3"), Some(Command::Jump(2)));
        assert_eq!(parse("Level 2A"), Some(Command::Label("Level 2A".into())));
        assert_eq!(parse("85%"), Some(Command::Label("85%".into())));
        assert_eq!(parse("t nsfr"), Some(Command::Switch(Switch::Topic("nsfr".into()))));
        assert_eq!(parse("m flashcards"), Some(Command::Switch(Switch::Mode("flashcards".into()))));
        assert_eq!(parse("k rsf"), Some(Command::Switch(Switch::Category("rsf".into()))));
    }

    #[test]
    fn rejects_blank_and_zero() {
        assert_eq!(parse(""), None);
        assert_eq!(parse("   "), None);
        assert_eq!(parse("0"), None);
        assert_eq!(parse("g"), None);
        assert_eq!(parse("g 0"), None);
        assert_eq!(parse("g x"), None);
        assert_eq!(parse("t"), None);
        assert_eq!(parse("m"), None);
    }

    #[test]
    fn switches_rebuild_the_request() {
        let quiz = DrillRequest::new(DrillMode::Quiz).with_seed(5);

        let nsfr = Switch::Topic("NSFR".into()).apply(quiz).unwrap();
        assert_eq!((nsfr.mode, nsfr.topic, nsfr.rng_seed), (DrillMode::Quiz, Topic::Nsfr, Some(5)));

        let cards = Switch::Mode("flashcards".into()).apply(nsfr).unwrap();
        assert_eq!((cards.mode, cards.topic), (DrillMode::Flashcards, Topic::Nsfr));

        let rsf = Switch::Category("rsf".into()).apply(cards).unwrap();
        assert_eq!((rsf.mode, rsf.category), (DrillMode::Classification, ClassificationCategory::Rsf));

        assert!(matches!(Switch::Topic("basel4".into()).apply(quiz), Err(DrillError::UnknownTopic(_))));
        assert!(matches!(Switch::Mode("essay".into()).apply(quiz), Err(DrillError::UnknownMode(_))));
    }

    #[test]
    fn switching_starts_a_fresh_drill_on_the_same_store() {
        let store = ContentStore::builtin().unwrap();
        let request = DrillRequest::new(DrillMode::Quiz);
        let mut drill = start_drill(&store, request).unwrap();
        apply(&mut drill, Command::Choose(0)).unwrap();
        apply(&mut drill, Command::Check).unwrap();

        let next = Switch::Topic("almm".into()).apply(request).unwrap();
        drill = start_drill(&store, next).unwrap();
        assert_eq!(drill.set_key(), "almm");
        assert_eq!(drill.tally(), Tally::default());
        assert!(!drill.is_revealed());

        // There is no covered-bond quiz; the current drill is kept.
        let bonds = Switch::Topic("bonds".into()).apply(next).unwrap();
        let err = start_drill(&store, bonds).unwrap_err();
        assert!(matches!(err, DrillError::NoContent { mode: DrillMode::Quiz, .. }));
        assert_eq!(drill.set_key(), "almm");
    }

    #[test]
    fn scripted_quiz_run() {
        let store = ContentStore::builtin().unwrap();
        let mut drill = start_drill(&store, DrillRequest::new(DrillMode::Quiz)).unwrap();

        assert_eq!(apply(&mut drill, Command::Next), Err(Rejected::NotRevealed));
        assert_eq!(apply(&mut drill, Command::Check), Err(Rejected::NoSelection));
        apply(&mut drill, Command::Choose(0)).unwrap();
        apply(&mut drill, Command::Check).unwrap();
        assert_eq!(apply(&mut drill, Command::Choose(1)), Err(Rejected::Locked));
        assert_eq!(apply(&mut drill, Command::Panel), Err(Rejected::Unsupported));
        apply(&mut drill, Command::Next).unwrap();
        assert_eq!(drill.position(), 1);
        assert_eq!(drill.tally().total, 1);

        apply(&mut drill, Command::Restart).unwrap();
        assert_eq!(drill.tally(), Tally::default());
    }

    #[test]
    fn flip_toggles_flashcards() {
        let store = ContentStore::builtin().unwrap();
        let mut drill = start_drill(&store, DrillRequest::new(DrillMode::Flashcards).with_seed(1)).unwrap();
        apply(&mut drill, Command::Flip).unwrap();
        assert!(drill.is_revealed());
        apply(&mut drill, Command::Flip).unwrap();
        assert!(!drill.is_revealed());
        apply(&mut drill, Command::Prev).unwrap();
        assert_eq!(drill.position(), drill.len() - 1);
    }
}
