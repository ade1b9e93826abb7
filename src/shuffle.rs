//! Presentation-order shuffling of completed rounds.
//!
//! Each pass reorders whole (slot, question) entries, so which question
//! answers which slot requirement is never revisited, only where in
//! the round it appears. Slots pinned to an answer format (the closing
//! short-answer question of each group) keep their positions through
//! every pass, so a round always ends its groups the way the template
//! laid them out.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::model::{AssignedRound, AssignedSlot, QuestionKind};

/// Which presentation permutations run. Passes apply in a fixed order:
/// subcategory, then pairs, then difficulty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShufflePasses {
    /// Redistribute which positions inside each type group carry a
    /// requested subcategory label, uniformly rather than wherever the
    /// template put them. Each group draws independently, so any
    /// toss-up/bonus subcategory alignment is decoupled.
    pub subcategory: bool,
    /// Permute the order of (toss-up, bonus) pairs. The final pair of
    /// the round stays in place. Rounds whose groups do not pair up
    /// one-to-one are left untouched.
    pub pairs: bool,
    /// Permute slot order by difficulty label within each type group,
    /// independently of the other two passes.
    pub lod: bool,
}

impl ShufflePasses {
    /// True when at least one pass is enabled.
    pub fn any(&self) -> bool {
        self.subcategory || self.pairs || self.lod
    }
}

/// Applies the enabled passes to one round.
pub fn shuffle_round<R: Rng>(round: &mut AssignedRound, passes: ShufflePasses, rng: &mut R) {
    if passes.subcategory {
        permute_groups(round, rng);
    }
    if passes.pairs {
        shuffle_pairs(round, rng);
    }
    if passes.lod {
        permute_groups(round, rng);
    }
}

const KINDS: [QuestionKind; 2] = [QuestionKind::TossUp, QuestionKind::Bonus];

/// One independent uniform permutation of the unpinned slots of each
/// type group.
fn permute_groups<R: Rng>(round: &mut AssignedRound, rng: &mut R) {
    for kind in KINDS {
        let group = kind_positions(round, kind);
        permute_unpinned(&mut round.slots, &group, rng);
    }
}

fn kind_positions(round: &AssignedRound, kind: QuestionKind) -> Vec<usize> {
    round
        .slots
        .iter()
        .enumerate()
        .filter(|(_, s)| s.slot.kind == kind)
        .map(|(i, _)| i)
        .collect()
}

fn permute_unpinned<R: Rng>(slots: &mut [AssignedSlot], group: &[usize], rng: &mut R) {
    let movable: Vec<usize> = group
        .iter()
        .copied()
        .filter(|&i| slots[i].slot.format.is_none())
        .collect();
    if movable.len() < 2 {
        return;
    }

    let mut entries: Vec<AssignedSlot> = movable.iter().map(|&i| slots[i].clone()).collect();
    entries.shuffle(rng);
    for (&target, entry) in movable.iter().zip(entries) {
        slots[target] = entry;
    }
}

/// Permutes (toss-up, bonus) pairs, holding the final pair in place.
fn shuffle_pairs<R: Rng>(round: &mut AssignedRound, rng: &mut R) {
    let toss_ups = kind_positions(round, QuestionKind::TossUp);
    let bonuses = kind_positions(round, QuestionKind::Bonus);
    if toss_ups.len() != bonuses.len() || toss_ups.len() < 2 {
        return;
    }

    let last = toss_ups.len() - 1;
    let mut order: Vec<usize> = (0..last).collect();
    order.shuffle(rng);
    order.push(last);

    let snapshot = round.slots.clone();
    for (k, &source) in order.iter().enumerate() {
        round.slots[toss_ups[k]] = snapshot[toss_ups[source]].clone();
        round.slots[bonuses[k]] = snapshot[bonuses[source]].clone();
    }
}
