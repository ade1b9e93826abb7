//! Declarative round template structures.

use std::collections::HashMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The slots a template requests for one question kind, as parallel
/// per-slot lists.
///
/// `subcategories` is either empty (every slot is a wildcard) or
/// exactly as long as `lods`; a `None` entry is a per-slot wildcard.
/// A non-empty list of the wrong length is rejected during expansion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SlotGroup {
    pub lods: Vec<u8>,
    pub subcategories: Vec<Option<String>>,
}

impl SlotGroup {
    /// A group with the given difficulty targets and all-wildcard
    /// subcategories.
    pub fn from_lods(lods: impl Into<Vec<u8>>) -> Self {
        Self {
            lods: lods.into(),
            subcategories: Vec::new(),
        }
    }

    /// Sets the per-slot subcategory targets.
    pub fn with_subcategories(mut self, subcategories: Vec<Option<String>>) -> Self {
        self.subcategories = subcategories;
        self
    }

    pub fn is_empty(&self) -> bool {
        self.lods.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lods.len()
    }
}

/// A named round shape: the toss-up and bonus slots one round needs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RoundTemplate {
    pub toss_ups: SlotGroup,
    pub bonuses: SlotGroup,
}

impl RoundTemplate {
    pub fn new(toss_ups: SlotGroup, bonuses: SlotGroup) -> Self {
        Self { toss_ups, bonuses }
    }
}

/// How a set entry names its round shape.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TemplateRef {
    /// Use a defined template as-is.
    Named(String),

    /// Clone a defined template, then append the extra slots of `add`
    /// after it, group by group.
    Derived { base: String, add: RoundTemplate },
}

/// One block of set combinatorics: every listed set gets every listed
/// round number, all instantiated from the same template.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SetEntry {
    pub sets: Vec<String>,
    pub prefix: String,
    pub rounds: Vec<u32>,
    pub template: TemplateRef,
}

/// The resolved tournament description: named templates plus the set
/// entries that instantiate them.
///
/// # Examples
///
/// ```
/// use round_assign::template::{RoundTemplate, SetEntry, SlotGroup, TemplateRef, TournamentPlan};
///
/// let mut plan = TournamentPlan::new();
/// plan.add_template(
///     "RoundRobin",
///     RoundTemplate::new(SlotGroup::from_lods([1, 2]), SlotGroup::from_lods([1, 2])),
/// );
/// plan.add_entry(SetEntry {
///     sets: vec!["HSR".into()],
///     prefix: "RR".into(),
///     rounds: vec![1, 2],
///     template: TemplateRef::Named("RoundRobin".into()),
/// });
/// ```
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TournamentPlan {
    pub templates: HashMap<String, RoundTemplate>,
    pub entries: Vec<SetEntry>,
}

impl TournamentPlan {
    /// Creates an empty plan.
    pub fn new() -> Self {
        Self::default()
    }

    /// Defines a named round template.
    pub fn add_template(&mut self, name: impl Into<String>, template: RoundTemplate) {
        self.templates.insert(name.into(), template);
    }

    /// Appends a set entry.
    pub fn add_entry(&mut self, entry: SetEntry) {
        self.entries.push(entry);
    }
}
