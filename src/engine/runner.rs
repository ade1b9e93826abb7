//! Assignment pipeline.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use super::config::EngineConfig;
use crate::cost::CostModel;
use crate::error::Result;
use crate::matcher::{self, OpenSlot};
use crate::model::{
    AssignedRound, AssignedSlot, Assignment, Question, QuestionKind, RoundSpec,
};
use crate::shuffle::{self, ShufflePasses};
use crate::template::{self, TournamentPlan};

/// Runs the whole assignment pipeline: expand templates, match
/// questions to slots globally per kind, reassemble rounds, shuffle
/// presentation order.
///
/// Any failure aborts the run as a whole; a partial assignment is
/// never returned.
pub struct Engine;

impl Engine {
    /// Expands `plan` and assigns `pool` to the resulting rounds.
    pub fn run(
        plan: &TournamentPlan,
        pool: &[Question],
        config: &EngineConfig,
    ) -> Result<Assignment> {
        let rounds = template::expand(plan)?;
        Self::run_rounds(&rounds, pool, config)
    }

    /// Assigns `pool` to already-expanded rounds.
    pub fn run_rounds(
        rounds: &[RoundSpec],
        pool: &[Question],
        config: &EngineConfig,
    ) -> Result<Assignment> {
        config.validate()?;

        let mut rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::seed_from_u64(rand::random()),
        };
        let model = CostModel::new(
            config.subcategory_mismatch_penalty,
            &config.preferred_writers,
        );

        // One global matching problem per kind, across every round.
        let mut placements: Vec<(usize, usize, usize)> = Vec::new();
        let mut used = vec![false; pool.len()];
        let mut total_cost = 0i64;

        for kind in [QuestionKind::TossUp, QuestionKind::Bonus] {
            let mut slots = Vec::new();
            let mut origins = Vec::new();
            for (round_index, round) in rounds.iter().enumerate() {
                for (position, spec) in round.slots.iter().enumerate() {
                    if spec.kind == kind {
                        slots.push(OpenSlot {
                            round: &round.id,
                            position,
                            spec,
                        });
                        origins.push((round_index, position));
                    }
                }
            }
            let questions: Vec<(usize, &Question)> = pool
                .iter()
                .enumerate()
                .filter(|(_, q)| q.kind == kind)
                .collect();

            let matched = matcher::match_kind(
                kind,
                &slots,
                &questions,
                &model,
                config.seed.is_some().then_some(&mut rng),
            )?;

            total_cost += matched.cost;
            for (&(round_index, position), &pool_index) in
                origins.iter().zip(&matched.question_indices)
            {
                used[pool_index] = true;
                placements.push((round_index, position, pool_index));
            }
        }

        // Scatter the matched kind groups back into presentation order.
        placements.sort_unstable_by_key(|&(round_index, position, _)| (round_index, position));

        let mut assigned = Vec::with_capacity(rounds.len());
        let mut next = placements.into_iter().peekable();
        for (round_index, round) in rounds.iter().enumerate() {
            let mut slots = Vec::with_capacity(round.slots.len());
            while let Some(&(owner, position, pool_index)) = next.peek() {
                if owner != round_index {
                    break;
                }
                next.next();
                slots.push(AssignedSlot {
                    slot: round.slots[position].clone(),
                    question: pool[pool_index].clone(),
                });
            }
            assigned.push(AssignedRound {
                id: round.id.clone(),
                slots,
            });
        }

        let passes = ShufflePasses {
            subcategory: config.shuffle_subcategory,
            pairs: config.shuffle_pairs,
            lod: config.shuffle_lod,
        };
        if passes.any() {
            for round in &mut assigned {
                shuffle::shuffle_round(round, passes, &mut rng);
            }
        }

        let unused: Vec<Question> = pool
            .iter()
            .zip(&used)
            .filter(|(_, &taken)| !taken)
            .map(|(q, _)| q.clone())
            .collect();

        debug!(
            rounds = assigned.len(),
            total_cost,
            unused = unused.len(),
            "assignment complete"
        );
        Ok(Assignment {
            rounds: assigned,
            total_cost,
            unused,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cost::LOD_STEP;
    use crate::error::AssignError;
    use crate::model::{QuestionFormat, RoundId, SlotSpec};
    use crate::template::{RoundTemplate, SetEntry, SlotGroup, TemplateRef};
    use std::collections::HashSet;

    fn question(id: u64, kind: QuestionKind, lod: u8) -> Question {
        Question {
            id,
            kind,
            format: QuestionFormat::MultipleChoice,
            subcategory: None,
            lod,
            writer: "w".into(),
            payload: String::new(),
        }
    }

    fn short_answer(id: u64, kind: QuestionKind, lod: u8) -> Question {
        Question {
            format: QuestionFormat::ShortAnswer,
            ..question(id, kind, lod)
        }
    }

    fn wildcard_slot(kind: QuestionKind, lod: u8) -> SlotSpec {
        SlotSpec {
            kind,
            lod,
            subcategory: None,
            format: None,
        }
    }

    fn single_round(slots: Vec<SlotSpec>) -> Vec<RoundSpec> {
        vec![RoundSpec {
            id: RoundId {
                set: "HSR".into(),
                prefix: "RR".into(),
                number: 1,
            },
            slots,
        }]
    }

    /// Two rounds of 2 toss-ups + 2 bonuses each, with a pool that
    /// covers every slot exactly plus two spares. Both kinds need one
    /// short-answer closer per round.
    fn plan_and_pool() -> (TournamentPlan, Vec<Question>) {
        let mut plan = TournamentPlan::new();
        plan.add_template(
            "RoundRobin",
            RoundTemplate::new(SlotGroup::from_lods([1, 2]), SlotGroup::from_lods([1, 2])),
        );
        plan.add_entry(SetEntry {
            sets: vec!["HSR".into()],
            prefix: "RR".into(),
            rounds: vec![1, 2],
            template: TemplateRef::Named("RoundRobin".into()),
        });

        let mut pool = Vec::new();
        let mut id = 0;
        for kind in [QuestionKind::TossUp, QuestionKind::Bonus] {
            for lod in [1, 2] {
                id += 1;
                pool.push(question(id, kind, lod));
                id += 1;
                pool.push(short_answer(id, kind, lod));
            }
            // spare
            id += 1;
            pool.push(question(id, kind, 3));
        }
        (plan, pool)
    }

    #[test]
    fn test_every_slot_filled_no_question_reused() {
        let (plan, pool) = plan_and_pool();
        let config = EngineConfig::default().with_seed(42);

        let assignment = Engine::run(&plan, &pool, &config).unwrap();

        assert_eq!(assignment.rounds.len(), 2);
        assert_eq!(assignment.slot_count(), 8);
        for round in &assignment.rounds {
            assert_eq!(round.slots.len(), 4);
        }

        let mut seen = HashSet::new();
        for round in &assignment.rounds {
            for slot in &round.slots {
                assert_eq!(slot.question.kind, slot.slot.kind);
                assert!(seen.insert(slot.question.id), "question used twice");
            }
        }
        assert_eq!(seen.len() + assignment.unused.len(), pool.len());
    }

    #[test]
    fn test_unused_pool_keeps_input_order() {
        let (plan, pool) = plan_and_pool();
        let config = EngineConfig::default().with_seed(42);

        let assignment = Engine::run(&plan, &pool, &config).unwrap();

        let pool_order: Vec<u64> = pool.iter().map(|q| q.id).collect();
        let unused_positions: Vec<usize> = assignment
            .unused
            .iter()
            .map(|q| pool_order.iter().position(|&id| id == q.id).unwrap())
            .collect();
        assert!(unused_positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_same_seed_same_assignment() {
        let (plan, pool) = plan_and_pool();
        let config = EngineConfig::default()
            .with_seed(42)
            .with_shuffle_subcategory(true)
            .with_shuffle_pairs(true)
            .with_shuffle_lod(true);

        let first = Engine::run(&plan, &pool, &config).unwrap();
        let second = Engine::run(&plan, &pool, &config).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_exact_difficulty_pool_costs_nothing() {
        // Pool LODs [1, 1, 2, 3] against one LOD-1 slot: a LOD-1
        // question wins at cost 0, the LOD 2 and 3 questions never.
        let pool = [
            question(1, QuestionKind::TossUp, 1),
            question(2, QuestionKind::TossUp, 1),
            question(3, QuestionKind::TossUp, 2),
            question(4, QuestionKind::TossUp, 3),
        ];
        let rounds = single_round(vec![wildcard_slot(QuestionKind::TossUp, 1)]);
        let config = EngineConfig::default();

        let assignment = Engine::run_rounds(&rounds, &pool, &config).unwrap();

        assert_eq!(assignment.total_cost, 0);
        let chosen = assignment.rounds[0].slots[0].question.id;
        assert!(chosen == 1 || chosen == 2);
        assert_eq!(assignment.unused.len(), 3);
    }

    #[test]
    fn test_mismatch_penalty_boundary_controls_the_choice() {
        // One slot wants Organic at LOD 3; a second wildcard slot at
        // LOD 2 takes whichever question is left. qright matches the
        // subcategory but sits 2 steps off; qwrong sits at the exact
        // difficulty with the wrong subcategory.
        let qright = Question {
            subcategory: Some("Organic".into()),
            ..question(1, QuestionKind::TossUp, 1)
        };
        let qwrong = Question {
            subcategory: Some("Physical".into()),
            ..question(2, QuestionKind::TossUp, 3)
        };
        let target = SlotSpec {
            kind: QuestionKind::TossUp,
            lod: 3,
            subcategory: Some("Organic".into()),
            format: None,
        };
        let rounds = single_round(vec![target, wildcard_slot(QuestionKind::TossUp, 2)]);
        let pool = [qright, qwrong];

        let on_target = |penalty: u32| {
            let config =
                EngineConfig::default().with_subcategory_mismatch_penalty(penalty);
            Engine::run_rounds(&rounds, &pool, &config).unwrap()
        };

        // Below the boundary the wrong-subcategory exact-LOD question
        // wins the target slot; past it the preference flips.
        assert_eq!(on_target(1).rounds[0].slots[0].question.id, 2);
        assert_eq!(on_target(3).rounds[0].slots[0].question.id, 1);
        // At the boundary both choices cost the same.
        assert_eq!(on_target(2).total_cost, 3 * LOD_STEP);
    }

    #[test]
    fn test_bonus_shortage_aborts_whole_run() {
        // Toss-ups are plentiful; bonuses are one short.
        let pool = [
            question(1, QuestionKind::TossUp, 1),
            question(2, QuestionKind::TossUp, 1),
            question(3, QuestionKind::Bonus, 1),
        ];
        let rounds = single_round(vec![
            wildcard_slot(QuestionKind::TossUp, 1),
            wildcard_slot(QuestionKind::Bonus, 1),
            wildcard_slot(QuestionKind::Bonus, 1),
        ]);

        let err = Engine::run_rounds(&rounds, &pool, &EngineConfig::default()).unwrap_err();
        match err {
            AssignError::InsufficientPool { kind, required, available, .. } => {
                assert_eq!(kind, QuestionKind::Bonus);
                assert_eq!(required, 2);
                assert_eq!(available, 1);
            }
            other => panic!("expected InsufficientPool, got {other:?}"),
        }
    }

    #[test]
    fn test_invalid_config_rejected_before_matching() {
        let (plan, pool) = plan_and_pool();
        let config = EngineConfig::default().with_subcategory_mismatch_penalty(0);
        assert!(matches!(
            Engine::run(&plan, &pool, &config).unwrap_err(),
            AssignError::Config(_)
        ));
    }

    #[test]
    fn test_matching_is_global_across_rounds() {
        // Round 1 wants LOD 1, round 2 wants LOD 2. The pool holds one
        // of each; both rounds must end up exact even though a
        // round-at-a-time greedy could give round 1 the LOD-2 question
        // when it happens to come first in the pool.
        let pool = [
            question(1, QuestionKind::TossUp, 2),
            question(2, QuestionKind::TossUp, 1),
        ];
        let mut rounds = single_round(vec![wildcard_slot(QuestionKind::TossUp, 1)]);
        rounds.push(RoundSpec {
            id: RoundId {
                set: "HSR".into(),
                prefix: "RR".into(),
                number: 2,
            },
            slots: vec![wildcard_slot(QuestionKind::TossUp, 2)],
        });

        let assignment =
            Engine::run_rounds(&rounds, &pool, &EngineConfig::default()).unwrap();

        assert_eq!(assignment.total_cost, 0);
        assert_eq!(assignment.rounds[0].slots[0].question.id, 2);
        assert_eq!(assignment.rounds[1].slots[0].question.id, 1);
    }

    #[test]
    fn test_shuffled_round_still_complete_and_unique() {
        let (plan, pool) = plan_and_pool();
        let config = EngineConfig::default()
            .with_seed(7)
            .with_shuffle_subcategory(true)
            .with_shuffle_pairs(true)
            .with_shuffle_lod(true);

        let assignment = Engine::run(&plan, &pool, &config).unwrap();

        let mut seen = HashSet::new();
        for round in &assignment.rounds {
            assert_eq!(round.slots.len(), 4);
            for slot in &round.slots {
                assert!(seen.insert(slot.question.id));
            }
            // The closing slot of each kind group keeps its
            // short-answer pin through shuffling.
            for kind in [QuestionKind::TossUp, QuestionKind::Bonus] {
                let closer = round
                    .slots
                    .iter()
                    .filter(|s| s.slot.kind == kind)
                    .next_back()
                    .unwrap();
                assert_eq!(closer.slot.format, Some(QuestionFormat::ShortAnswer));
                assert_eq!(closer.question.format, QuestionFormat::ShortAnswer);
            }
        }
    }

    #[test]
    fn test_unseeded_run_still_fills_everything() {
        let (plan, pool) = plan_and_pool();
        let config = EngineConfig::default().with_shuffle_pairs(true);

        let assignment = Engine::run(&plan, &pool, &config).unwrap();
        assert_eq!(assignment.slot_count(), 8);
    }
}
