//! Round template expansion.
//!
//! Turns a declarative tournament description (named round templates
//! plus set combinatorics) into concrete, ordered [`RoundSpec`]s
//! ready for matching. Supports a single inheritance form: derive from
//! a base template, then append extra slots after it.
//!
//! Templates and merges are plain immutable value structures combined
//! by a pure function; there is no class-style inheritance anywhere.
//!
//! [`RoundSpec`]: crate::model::RoundSpec

mod expand;
mod types;

pub use expand::expand;
pub use types::{RoundTemplate, SetEntry, SlotGroup, TemplateRef, TournamentPlan};
