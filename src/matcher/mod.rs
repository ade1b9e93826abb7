//! Global cost-minimizing matching of questions to slots.
//!
//! One matching problem is solved per question kind across the whole
//! tournament, never per round: sequential per-round allocation can
//! prematurely exhaust scarce difficulty/subcategory combinations and
//! is not equivalent. Surplus questions are implicitly matched to
//! zero-cost dummy slots and simply remain unused.

mod hungarian;

use std::collections::BTreeMap;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::cost::CostModel;
use crate::error::{AssignError, Result};
use crate::model::{Question, QuestionKind, RoundId, SlotSpec};

pub use hungarian::{assignment_cost, solve};

/// Cost sentinel for a pair that must never be chosen. Large enough to
/// dominate any sum of feasible pair costs, small enough that solver
/// arithmetic stays far from `i64` overflow.
pub const INFEASIBLE: i64 = 1 << 44;

/// One unfilled slot, tracked back to its round so failures can name
/// the exact position that could not be satisfied.
#[derive(Debug, Clone, Copy)]
pub struct OpenSlot<'a> {
    pub round: &'a RoundId,
    /// Slot index within the round, in presentation order.
    pub position: usize,
    pub spec: &'a SlotSpec,
}

/// Outcome of matching one kind group.
#[derive(Debug, Clone)]
pub struct KindMatch {
    /// For each open slot in input order, the pool index of the
    /// question chosen for it.
    pub question_indices: Vec<usize>,
    /// Sum of the chosen pair costs, in fixed-point cost units.
    pub cost: i64,
}

/// Matches every open slot of `kind` against the unused questions of
/// that kind, minimizing total cost over the whole group.
///
/// `questions` carries `(pool index, question)` pairs so the result can
/// refer back into the caller's pool. When `rng` is supplied the
/// question ordering is permuted before solving, which makes tie-breaks
/// among equally optimal assignments reproducible under a seed; without
/// it, ties resolve by pool input order.
pub fn match_kind<R: Rng>(
    kind: QuestionKind,
    slots: &[OpenSlot<'_>],
    questions: &[(usize, &Question)],
    model: &CostModel,
    rng: Option<&mut R>,
) -> Result<KindMatch> {
    if questions.len() < slots.len() {
        return Err(AssignError::InsufficientPool {
            kind,
            required: slots.len(),
            available: questions.len(),
            starved: most_starved(slots, questions),
        });
    }
    if slots.is_empty() {
        return Ok(KindMatch {
            question_indices: Vec::new(),
            cost: 0,
        });
    }

    let mut order: Vec<usize> = (0..questions.len()).collect();
    if let Some(rng) = rng {
        order.shuffle(rng);
    }

    let matrix: Vec<Vec<i64>> = slots
        .iter()
        .map(|slot| {
            order
                .iter()
                .map(|&qi| {
                    model
                        .cost(questions[qi].1, slot.spec)
                        .unwrap_or(INFEASIBLE)
                })
                .collect()
        })
        .collect();

    let assignment = hungarian::solve(&matrix);

    let mut cost = 0i64;
    let mut question_indices = Vec::with_capacity(slots.len());
    for (row, &col) in assignment.iter().enumerate() {
        let pair_cost = matrix[row][col];
        if pair_cost >= INFEASIBLE {
            let slot = &slots[row];
            return Err(AssignError::Infeasible {
                round: slot.round.clone(),
                position: slot.position,
                kind,
            });
        }
        cost += pair_cost;
        question_indices.push(questions[order[col]].0);
    }

    debug!(
        %kind,
        slots = slots.len(),
        pool = questions.len(),
        cost,
        "matched kind group"
    );
    Ok(KindMatch {
        question_indices,
        cost,
    })
}

/// The demanded (LOD, subcategory) combination with the largest
/// demand-over-supply gap, if any combination is oversubscribed.
///
/// Wildcard-subcategory demand counts every question at that LOD as
/// supply, so overlapping combinations can each look satisfied while
/// the aggregate still falls short; in that case no single combination
/// is to blame and `None` is returned.
fn most_starved(slots: &[OpenSlot<'_>], questions: &[(usize, &Question)]) -> Option<String> {
    let mut demand: BTreeMap<(u8, Option<&str>), usize> = BTreeMap::new();
    for slot in slots {
        *demand
            .entry((slot.spec.lod, slot.spec.subcategory.as_deref()))
            .or_insert(0) += 1;
    }

    demand
        .into_iter()
        .filter_map(|((lod, subcategory), wanted)| {
            let supply = questions
                .iter()
                .filter(|(_, q)| {
                    q.lod == lod
                        && subcategory.is_none_or(|s| q.subcategory.as_deref() == Some(s))
                })
                .count();
            (wanted > supply).then_some((wanted - supply, lod, subcategory))
        })
        .max_by_key(|&(gap, _, _)| gap)
        .map(|(_, lod, subcategory)| match subcategory {
            Some(s) => format!("LOD {lod}, subcategory {s}"),
            None => format!("LOD {lod}, any subcategory"),
        })
}
