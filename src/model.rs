//! Shared data model: questions, slots, rounds, and the final assignment.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The two question roles in a round.
///
/// A toss-up is answered individually; the bonus that follows is
/// answered by the team that won the toss-up. A slot of one kind can
/// never be filled by a question of the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum QuestionKind {
    TossUp,
    Bonus,
}

impl fmt::Display for QuestionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionKind::TossUp => write!(f, "TOSS-UP"),
            QuestionKind::Bonus => write!(f, "BONUS"),
        }
    }
}

/// Answer format of a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum QuestionFormat {
    MultipleChoice,
    ShortAnswer,
}

impl fmt::Display for QuestionFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionFormat::MultipleChoice => write!(f, "Multiple Choice"),
            QuestionFormat::ShortAnswer => write!(f, "Short Answer"),
        }
    }
}

/// A vetted competition question.
///
/// Immutable once loaded. The engine reads only the fields that drive
/// matching (`kind`, `format`, `subcategory`, `lod`, `writer`); the
/// `payload` travels through untouched and is handed back to the
/// caller inside the assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Question {
    /// Caller-supplied identifier, unique within the pool.
    pub id: u64,
    pub kind: QuestionKind,
    pub format: QuestionFormat,
    /// Fine-grained topic label, if the writer tagged one.
    pub subcategory: Option<String>,
    /// Level of difficulty, a small integer scale (typically 1-5).
    pub lod: u8,
    pub writer: String,
    /// Opaque content (stem, answer, ...) carried through unchanged.
    pub payload: String,
}

/// One position in a round requiring a question.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SlotSpec {
    pub kind: QuestionKind,
    /// Target level of difficulty.
    pub lod: u8,
    /// Target subcategory. `None` is a wildcard and never penalizes.
    pub subcategory: Option<String>,
    /// Required answer format. `None` accepts any format; `Some` is a
    /// hard constraint, used to pin the closing slot of each type
    /// group to short-answer questions.
    pub format: Option<QuestionFormat>,
}

/// Identifies one round: set name, slot-id prefix, and round number.
///
/// Displays as `"<set>-<prefix><number>"`, e.g. `"HSR-A-RR3"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RoundId {
    pub set: String,
    pub prefix: String,
    pub number: u32,
}

impl fmt::Display for RoundId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}{}", self.set, self.prefix, self.number)
    }
}

/// A fully resolved round: its identity and its ordered slots.
///
/// Slot order is presentation order and is meaningful: the expander
/// emits the toss-up group followed by the bonus group.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RoundSpec {
    pub id: RoundId,
    pub slots: Vec<SlotSpec>,
}

/// A slot together with the question chosen for it.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AssignedSlot {
    pub slot: SlotSpec,
    pub question: Question,
}

/// One completed round in presentation order.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AssignedRound {
    pub id: RoundId,
    pub slots: Vec<AssignedSlot>,
}

/// The engine's output: every round filled, plus bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Assignment {
    /// Completed rounds, in expansion order.
    pub rounds: Vec<AssignedRound>,
    /// Total matching cost in fixed-point units of
    /// [`crate::cost::LOD_STEP`] per difficulty step.
    pub total_cost: i64,
    /// Questions left over after matching, in pool order.
    pub unused: Vec<Question>,
}

impl Assignment {
    /// Looks up a completed round by identifier.
    pub fn round(&self, id: &RoundId) -> Option<&AssignedRound> {
        self.rounds.iter().find(|r| &r.id == id)
    }

    /// Total number of filled slots across all rounds.
    pub fn slot_count(&self) -> usize {
        self.rounds.iter().map(|r| r.slots.len()).sum()
    }
}
