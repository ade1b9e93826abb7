//! Error types for round assignment.

use thiserror::Error;

use crate::model::{QuestionKind, RoundId};

/// Main error type for assignment operations.
///
/// Every variant aborts the entire run: no partial assignment is ever
/// returned, and there is no fallback to a suboptimal mapping.
#[derive(Debug, Error)]
pub enum AssignError {
    /// A set entry references a round template that was never defined.
    #[error("unknown round template `{0}`")]
    UnknownTemplate(String),

    /// A template group declares parallel LOD and subcategory lists of
    /// different lengths.
    #[error(
        "template `{template}` {kind} group: {lods} LOD entries but {subcategories} subcategory entries"
    )]
    TemplateShape {
        template: String,
        kind: QuestionKind,
        lods: usize,
        subcategories: usize,
    },

    /// Invalid engine options.
    #[error("configuration error: {0}")]
    Config(String),

    /// Not enough questions of a kind to fill all slots of that kind.
    #[error(
        "not enough {kind} questions: {required} slots but only {available} available{starved}",
        starved = .starved.as_ref().map(|s| format!("; most starved: {s}")).unwrap_or_default()
    )]
    InsufficientPool {
        kind: QuestionKind,
        required: usize,
        available: usize,
        /// The most oversubscribed LOD/subcategory combination, when
        /// one could be determined.
        starved: Option<String>,
    },

    /// Raw counts match but some slot cannot be satisfied by any
    /// remaining question without violating a hard constraint.
    #[error("no feasible {kind} question for round {round}, slot {position}")]
    Infeasible {
        round: RoundId,
        position: usize,
        kind: QuestionKind,
    },
}

/// Result type alias for assignment operations.
pub type Result<T> = std::result::Result<T, AssignError>;
