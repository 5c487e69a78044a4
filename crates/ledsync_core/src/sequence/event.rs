use crate::pulse::Channel;

use super::LedId;

/// Emitted for every observed id that equals the expected id.
///
/// `index` is the cursor position the match consumed.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct MatchEvent {
    pub value: LedId,
    pub index: usize,
    pub is_final: bool,
}

impl MatchEvent {
    /// Output channel this match should pulse.
    pub const fn channel(self) -> Channel {
        if self.is_final {
            Channel::Final
        } else {
            Channel::Intermediate
        }
    }
}

/// An observed id that was discarded because a different id was expected.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Mismatch {
    pub value: LedId,
    pub expected: LedId,
}

/// Outcome of one `observe()` batch.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct ObserveReport {
    /// Matches in arrival order.
    pub matches: Vec<MatchEvent>,
    /// Out-of-order detections, dropped without touching the cursor.
    pub mismatches: Vec<Mismatch>,
    /// Ids left unprocessed because the sequence was already complete.
    pub skipped: usize,
}

impl ObserveReport {
    /// True if the batch ended early on a complete sequence.
    pub fn exhausted(&self) -> bool {
        self.skipped > 0
    }

    /// The final match of this batch, if the batch completed the sequence.
    pub fn final_match(&self) -> Option<MatchEvent> {
        self.matches.iter().copied().find(|m| m.is_final)
    }
}

/// Result of announcing a target sequence.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum TargetUpdate {
    /// Same ids in the same order; progress kept.
    Unchanged,
    /// New target stored and cursor reset to 0.
    Replaced { len: usize },
}
