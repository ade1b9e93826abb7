//! Pure expansion of a tournament plan into concrete round specs.

use tracing::debug;

use super::types::{RoundTemplate, SlotGroup, TemplateRef, TournamentPlan};
use crate::error::{AssignError, Result};
use crate::model::{QuestionFormat, QuestionKind, RoundId, RoundSpec, SlotSpec};

/// Expands every (set name x round number) pair of every entry into a
/// concrete [`RoundSpec`], in declaration order.
///
/// Template inheritance (`TemplateRef::Derived`) is resolved by a pure
/// merge: the base template's slots are cloned verbatim and the added
/// slots are appended after them, group by group, preserving both
/// orderings.
pub fn expand(plan: &TournamentPlan) -> Result<Vec<RoundSpec>> {
    let mut rounds = Vec::new();

    for entry in &plan.entries {
        let template = resolve(plan, &entry.template)?;

        for set in &entry.sets {
            for &number in &entry.rounds {
                let id = RoundId {
                    set: set.clone(),
                    prefix: entry.prefix.clone(),
                    number,
                };
                rounds.push(RoundSpec {
                    id,
                    slots: instantiate(&template),
                });
            }
        }
    }

    debug!(
        rounds = rounds.len(),
        slots = rounds.iter().map(|r| r.slots.len()).sum::<usize>(),
        "expanded tournament plan"
    );
    Ok(rounds)
}

/// Resolves a template reference against the plan's definitions.
fn resolve(plan: &TournamentPlan, reference: &TemplateRef) -> Result<RoundTemplate> {
    match reference {
        TemplateRef::Named(name) => {
            let template = lookup(plan, name)?;
            check_shape(name, template)?;
            Ok(template.clone())
        }
        TemplateRef::Derived { base, add } => {
            let base_template = lookup(plan, base)?;
            check_shape(base, base_template)?;
            check_shape(&format!("{base}/add"), add)?;
            Ok(merge(base_template, add))
        }
    }
}

fn lookup<'a>(plan: &'a TournamentPlan, name: &str) -> Result<&'a RoundTemplate> {
    plan.templates
        .get(name)
        .ok_or_else(|| AssignError::UnknownTemplate(name.to_string()))
}

/// A non-empty subcategory list must be parallel to the LOD list.
fn check_shape(name: &str, template: &RoundTemplate) -> Result<()> {
    for (kind, group) in groups(template) {
        if !group.subcategories.is_empty() && group.subcategories.len() != group.lods.len() {
            return Err(AssignError::TemplateShape {
                template: name.to_string(),
                kind,
                lods: group.lods.len(),
                subcategories: group.subcategories.len(),
            });
        }
    }
    Ok(())
}

fn groups(template: &RoundTemplate) -> [(QuestionKind, &SlotGroup); 2] {
    [
        (QuestionKind::TossUp, &template.toss_ups),
        (QuestionKind::Bonus, &template.bonuses),
    ]
}

/// Clones `base` and appends `add`'s slots after it, per group.
fn merge(base: &RoundTemplate, add: &RoundTemplate) -> RoundTemplate {
    RoundTemplate {
        toss_ups: merge_group(&base.toss_ups, &add.toss_ups),
        bonuses: merge_group(&base.bonuses, &add.bonuses),
    }
}

fn merge_group(base: &SlotGroup, add: &SlotGroup) -> SlotGroup {
    let mut lods = base.lods.clone();
    lods.extend_from_slice(&add.lods);

    // Subcategory lists stay empty unless one side targets any; then
    // both sides are padded to full length so positions line up.
    let subcategories = if base.subcategories.is_empty() && add.subcategories.is_empty() {
        Vec::new()
    } else {
        let mut subcategories = normalized(base);
        subcategories.extend(normalized(add));
        subcategories
    };

    SlotGroup {
        lods,
        subcategories,
    }
}

fn normalized(group: &SlotGroup) -> Vec<Option<String>> {
    if group.subcategories.is_empty() {
        vec![None; group.lods.len()]
    } else {
        group.subcategories.clone()
    }
}

/// Turns a resolved template into an ordered slot list: the toss-up
/// group followed by the bonus group. The closing slot of each
/// non-empty group is pinned to short-answer format.
fn instantiate(template: &RoundTemplate) -> Vec<SlotSpec> {
    let mut slots = Vec::with_capacity(template.toss_ups.len() + template.bonuses.len());
    for (kind, group) in groups(template) {
        for (idx, &lod) in group.lods.iter().enumerate() {
            let format = if idx + 1 == group.len() {
                Some(QuestionFormat::ShortAnswer)
            } else {
                None
            };
            slots.push(SlotSpec {
                kind,
                lod,
                subcategory: group.subcategories.get(idx).cloned().flatten(),
                format,
            });
        }
    }
    slots
}
