//! Round assignment engine for question-based academic competitions.
//!
//! Given a pool of vetted questions and a declarative description of a
//! tournament's rounds, computes a globally cost-minimizing assignment
//! of questions to round slots, then applies seed-reproducible
//! shuffling to presentation order:
//!
//! - **Template expansion** ([`template`]): turns named round templates
//!   plus set combinatorics (including a derive-and-append inheritance
//!   form) into concrete ordered round specifications.
//! - **Cost model** ([`cost`]): scores a (question, slot) pair on
//!   difficulty distance, subcategory match, and writer preference, or
//!   flags it infeasible.
//! - **Matcher** ([`matcher`]): solves an exact minimum-cost one-to-one
//!   assignment per question kind across the whole tournament, never a
//!   greedy per-slot choice.
//! - **Shuffler** ([`shuffle`]): up to three independently gated
//!   permutations of presentation order that never revisit which
//!   question fills which slot.
//! - **Engine** ([`engine`]): orchestrates the pipeline and returns the
//!   final round → slot → question mapping plus the unused pool.
//!
//! # Architecture
//!
//! A single-threaded, synchronous, in-memory batch computation: one
//! pass (expand → match → shuffle), no I/O. Document parsing, output
//! emission, and configuration-syntax handling belong to external
//! collaborators on either side of [`engine::Engine::run`]. All
//! randomness flows through one explicit seed, so repeated runs with
//! the same inputs and seed produce identical output.
//!
//! # Example
//!
//! ```
//! use round_assign::engine::{Engine, EngineConfig};
//! use round_assign::model::{Question, QuestionFormat, QuestionKind};
//! use round_assign::template::{RoundTemplate, SetEntry, SlotGroup, TemplateRef, TournamentPlan};
//!
//! let mut plan = TournamentPlan::new();
//! plan.add_template(
//!     "Tiebreakers",
//!     RoundTemplate::new(SlotGroup::from_lods([2]), SlotGroup::default()),
//! );
//! plan.add_entry(SetEntry {
//!     sets: vec!["HSR".into()],
//!     prefix: "TB".into(),
//!     rounds: vec![1],
//!     template: TemplateRef::Named("Tiebreakers".into()),
//! });
//!
//! let pool = vec![Question {
//!     id: 1,
//!     kind: QuestionKind::TossUp,
//!     format: QuestionFormat::ShortAnswer,
//!     subcategory: None,
//!     lod: 2,
//!     writer: "Chen, Andrew".into(),
//!     payload: "What is the SI unit of force?".into(),
//! }];
//!
//! let config = EngineConfig::default().with_seed(42);
//! let assignment = Engine::run(&plan, &pool, &config)?;
//! assert_eq!(assignment.slot_count(), 1);
//! # Ok::<(), round_assign::error::AssignError>(())
//! ```

pub mod cost;
pub mod engine;
pub mod error;
pub mod matcher;
pub mod model;
pub mod shuffle;
pub mod template;
