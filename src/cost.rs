//! Scoring of (question, slot) pairs.
//!
//! Costs are exact fixed-point integers so the matcher's arithmetic is
//! well-defined on every platform: one difficulty step costs
//! [`LOD_STEP`], the subcategory mismatch penalty is a literal
//! additive multiple of it, and the writer-preference nudge is a
//! single unit, small enough that a whole tournament's worth of
//! nudges still sums to less than one difficulty step.

use std::collections::HashSet;

use crate::model::{Question, SlotSpec};

/// Fixed-point cost of one level-of-difficulty step.
pub const LOD_STEP: i64 = 1_000;

/// Cost added when a non-empty preferred-writers set does not contain
/// the question's writer. Strictly smaller than any nonzero
/// difficulty distance.
pub const WRITER_PENALTY: i64 = 1;

/// Scores a question against a slot, or flags the pair infeasible.
#[derive(Debug, Clone)]
pub struct CostModel {
    mismatch_penalty: i64,
    preferred_writers: HashSet<String>,
}

impl CostModel {
    /// Builds a model from the configured subcategory mismatch penalty
    /// (in difficulty steps) and preferred writer set.
    pub fn new(subcategory_mismatch_penalty: u32, preferred_writers: &[String]) -> Self {
        Self {
            mismatch_penalty: i64::from(subcategory_mismatch_penalty) * LOD_STEP,
            preferred_writers: preferred_writers.iter().cloned().collect(),
        }
    }

    /// Cost of filling `slot` with `question`, or `None` when the pair
    /// is infeasible (kind mismatch, or a pinned answer format the
    /// question does not have).
    ///
    /// The penalty is an explicit exchange rate: a subcategory-wrong,
    /// exact-LOD question costs exactly the penalty; a
    /// subcategory-right question `k` steps off costs `k` steps.
    pub fn cost(&self, question: &Question, slot: &SlotSpec) -> Option<i64> {
        if question.kind != slot.kind {
            return None;
        }
        if let Some(format) = slot.format {
            if question.format != format {
                return None;
            }
        }

        let mut cost = (i64::from(question.lod) - i64::from(slot.lod)).abs() * LOD_STEP;

        if let Some(want) = slot.subcategory.as_deref() {
            if question.subcategory.as_deref() != Some(want) {
                cost += self.mismatch_penalty;
            }
        }

        if !self.preferred_writers.is_empty()
            && !self.preferred_writers.contains(&question.writer)
        {
            cost += WRITER_PENALTY;
        }

        Some(cost)
    }
}
