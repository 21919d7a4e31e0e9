//! Grouping rules: conjunctive condition lists and first-match-wins
//! group selection.

use chrono::{DateTime, Utc};
use grouping_core::{Asset, GroupingError, GroupingResult};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::conditions::{self, GroupingCondition};

/// A named target group plus the conditions an asset must satisfy (all of
/// them) to be assigned to it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupingRule {
    pub id: Uuid,
    pub group_name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub conditions: Vec<GroupingCondition>,
    /// Monotonic insertion sequence. Group selection iterates rules in
    /// ascending `seq`, so precedence survives a storage-backend swap.
    pub seq: u64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleInput {
    pub group_name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub conditions: Vec<GroupingCondition>,
}

/// Partial update for a rule. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RulePatch {
    #[serde(default)]
    pub group_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub conditions: Option<Vec<GroupingCondition>>,
}

impl GroupingRule {
    /// True iff every condition holds for the asset. An empty condition
    /// list is vacuously true; rule validation rejects such rules before
    /// they are stored, so this only matters for rules built by hand.
    pub fn matches(&self, asset: &Asset) -> GroupingResult<bool> {
        for condition in &self.conditions {
            if !conditions::evaluate(asset, condition)? {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

/// Pick the group for an asset: first matching rule wins, in rule
/// insertion order. Later, more specific rules never override earlier
/// broad ones. Returns `None` when no rule matches.
pub fn select_group<'a, I>(asset: &Asset, rules: I) -> GroupingResult<Option<String>>
where
    I: IntoIterator<Item = &'a GroupingRule>,
{
    for rule in rules {
        if rule.matches(asset)? {
            return Ok(Some(rule.group_name.clone()));
        }
    }
    Ok(None)
}

/// Reject structurally malformed rule input at the API boundary:
/// empty group name, empty condition list, or any broken condition.
pub fn validate_rule(group_name: &str, conds: &[GroupingCondition]) -> GroupingResult<()> {
    if group_name.is_empty() {
        return Err(GroupingError::Validation(
            "rule group_name must not be empty".into(),
        ));
    }
    if conds.is_empty() {
        return Err(GroupingError::Validation(
            "rule must have at least one condition".into(),
        ));
    }
    for condition in conds {
        conditions::validate(condition)?;
    }
    Ok(())
}
