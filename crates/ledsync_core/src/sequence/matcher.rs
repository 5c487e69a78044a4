use super::{MatchEvent, Mismatch, ObserveReport, TargetUpdate};

/// LED identifier as carried by the detection messages (`int32`).
pub type LedId = i32;

/// Ordered-sequence matcher.
///
/// States are `cursor ∈ [0, len]`; `cursor == len` is terminal until the
/// target is replaced. Not synchronized: the owner serializes
/// `set_target_sequence` and `observe` behind one lock.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct SequenceMatcher {
    target: Vec<LedId>,
    cursor: usize,
}

impl SequenceMatcher {
    /// Empty target, cursor 0 (already complete).
    pub const fn new() -> Self {
        Self {
            target: Vec::new(),
            cursor: 0,
        }
    }

    /// Replace the target sequence.
    ///
    /// An identical sequence (same ids, same order) leaves the cursor where it is.
    pub fn set_target_sequence(&mut self, seq: &[LedId]) -> TargetUpdate {
        if self.target == seq {
            return TargetUpdate::Unchanged;
        }

        self.target.clear();
        self.target.extend_from_slice(seq);
        self.cursor = 0;

        TargetUpdate::Replaced {
            len: self.target.len(),
        }
    }

    /// Process one batch of observed ids in order.
    ///
    /// Mismatches are recorded and dropped. Once the cursor reaches the end,
    /// the rest of the batch is counted in `skipped` and not inspected.
    pub fn observe(&mut self, values: &[LedId]) -> ObserveReport {
        let mut report = ObserveReport::default();

        for (pos, &value) in values.iter().enumerate() {
            let Some(&expected) = self.target.get(self.cursor) else {
                report.skipped = values.len() - pos;
                break;
            };

            if value == expected {
                report.matches.push(MatchEvent {
                    value,
                    index: self.cursor,
                    is_final: self.cursor + 1 == self.target.len(),
                });
                self.cursor += 1;
            } else {
                report.mismatches.push(Mismatch { value, expected });
            }
        }

        report
    }

    pub fn target(&self) -> &[LedId] {
        &self.target
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.target.len()
    }

    pub fn is_empty(&self) -> bool {
        self.target.is_empty()
    }

    /// True once every id of the target has been matched (or the target is empty).
    pub fn is_complete(&self) -> bool {
        self.cursor >= self.target.len()
    }

    /// Next id the matcher is waiting for.
    pub fn expected(&self) -> Option<LedId> {
        self.target.get(self.cursor).copied()
    }

    /// Ids still to be matched, in order.
    pub fn remaining(&self) -> &[LedId] {
        &self.target[self.cursor..]
    }
}
