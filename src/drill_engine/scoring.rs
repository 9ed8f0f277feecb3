use std::fmt;

use serde::{Deserialize, Serialize};

/// Percentage at or above which a finished drill counts as mastered.
pub const DEFAULT_PASS_THRESHOLD: u32 = 80;

/// Running score for one session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    pub correct: u32,
    pub total: u32,
}

impl Tally {
    /// `round(100 * correct / total)` with halves rounded up, or `None`
    /// before anything has been scored.
    pub fn percentage(&self) -> Option<u32> {
        if self.total == 0 {
            return None;
        }
        let (correct, total) = (u64::from(self.correct), u64::from(self.total));
        Some(((200 * correct + total) / (2 * total)) as u32)
    }

    pub(crate) fn record(&mut self, correct: bool) {
        self.total += 1;
        if correct {
            self.correct += 1;
        }
    }
}

impl fmt::Display for Tally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.percentage() {
            Some(pct) => write!(f, "{}/{} ({}%)", self.correct, self.total, pct),
            None      => write!(f, "{}/{}", self.correct, self.total),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    Mastered,
    KeepPracticing,
}

impl ScoreBand {
    pub fn for_percentage(percentage: u32, pass_threshold: u32) -> Self {
        if percentage >= pass_threshold {
            ScoreBand::Mastered
        } else {
            ScoreBand::KeepPracticing
        }
    }
}

impl fmt::Display for ScoreBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoreBand::Mastered       => write!(f, "Mastered"),
            ScoreBand::KeepPracticing => write!(f, "Keep practising"),
        }
    }
}

/// Result card shown when a scored drill completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub tally: Tally,
    pub percentage: u32,
    pub band: ScoreBand,
}

impl SessionSummary {
    /// `None` when nothing was scored.
    pub fn from_tally(tally: Tally, pass_threshold: u32) -> Option<Self> {
        let percentage = tally.percentage()?;
        Some(SessionSummary {
            tally,
            percentage,
            band: ScoreBand::for_percentage(percentage, pass_threshold),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tally(correct: u32, total: u32) -> Tally {
        Tally { correct, total }
    }

    #[test]
    fn percentage_rounds_to_nearest() {
        assert_eq!(tally(3, 4).percentage(), Some(75));
        assert_eq!(tally(7, 7).percentage(), Some(100));
        assert_eq!(tally(0, 5).percentage(), Some(0));
        assert_eq!(tally(2, 3).percentage(), Some(67));
        assert_eq!(tally(1, 3).percentage(), Some(33));
        // 1/8 = 12.5 rounds up
        assert_eq!(tally(1, 8).percentage(), Some(13));
    }

    #[test]
    fn percentage_is_undefined_before_first_score() {
        assert_eq!(Tally::default().percentage(), None);
        assert_eq!(Tally::default().to_string(), "0/0");
    }

    #[test]
    fn record_keeps_correct_at_most_total() {
        let mut t = Tally::default();
        t.record(true);
        t.record(false);
        t.record(true);
        assert_eq!(t, tally(2, 3));
        assert_eq!(t.to_string(), "2/3 (67%)");
    }

    #[test]
    fn summary_band_uses_threshold() {
        let pass = SessionSummary::from_tally(tally(4, 5), DEFAULT_PASS_THRESHOLD).unwrap();
        assert_eq!(pass.band, ScoreBand::Mastered);
        let fail = SessionSummary::from_tally(tally(3, 4), DEFAULT_PASS_THRESHOLD).unwrap();
        assert_eq!(fail.band, ScoreBand::KeepPracticing);
        assert!(SessionSummary::from_tally(Tally::default(), 80).is_none());
    }
}
