//! Condition types and evaluation logic for grouping rules.

use grouping_core::{Asset, GroupingError, GroupingResult};
use serde::{Deserialize, Serialize};

/// Asset attribute a condition inspects. Closed set; anything else is
/// rejected at the serde boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConditionField {
    Type,
    Name,
    Tags,
    Region,
    OwnerId,
    CloudAccount,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    /// Exact, case-sensitive string equality. On `tags`, matches a tag
    /// with the condition's key whose value equals the condition's value.
    Equals,
    /// Case-sensitive substring containment on scalar fields; on `tags`,
    /// same semantics as `equals`.
    Contains,
    /// `tags` only: the asset has a tag with the condition's key,
    /// regardless of value.
    Exists,
}

/// A single predicate over one asset field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupingCondition {
    pub field: ConditionField,
    pub operator: Operator,
    /// Comparison value. Required except for `exists`.
    #[serde(default)]
    pub value: Option<String>,
    /// Tag key to inspect. Required iff `field` is `tags`.
    #[serde(default)]
    pub key: Option<String>,
}

/// Evaluate one condition against one asset. Pure; no side effects.
///
/// Structurally broken conditions (missing tag key, missing value,
/// `exists` on a scalar field) surface as
/// [`GroupingError::InvalidCondition`] rather than silently failing the
/// match. [`validate`] rejects the same shapes at rule-creation time.
pub fn evaluate(asset: &Asset, condition: &GroupingCondition) -> GroupingResult<bool> {
    match condition.field {
        ConditionField::Tags => evaluate_tags(asset, condition),
        ConditionField::Type => evaluate_scalar(&asset.asset_type, condition),
        ConditionField::Name => evaluate_scalar(&asset.name, condition),
        ConditionField::Region => evaluate_scalar(&asset.region, condition),
        ConditionField::OwnerId => evaluate_scalar(&asset.owner_id, condition),
        // The account id is the canonical string form of the pair.
        ConditionField::CloudAccount => evaluate_scalar(&asset.cloud_account.id, condition),
    }
}

fn evaluate_tags(asset: &Asset, condition: &GroupingCondition) -> GroupingResult<bool> {
    let key = condition.key.as_deref().ok_or_else(|| {
        GroupingError::InvalidCondition("tags condition requires a tag key".into())
    })?;

    match condition.operator {
        Operator::Exists => Ok(asset.tags.iter().any(|tag| tag.key == key)),
        Operator::Equals | Operator::Contains => {
            let value = condition.value.as_deref().ok_or_else(|| {
                GroupingError::InvalidCondition("tags condition requires a value".into())
            })?;
            Ok(asset
                .tags
                .iter()
                .any(|tag| tag.key == key && tag.value == value))
        }
    }
}

fn evaluate_scalar(actual: &str, condition: &GroupingCondition) -> GroupingResult<bool> {
    let value = condition.value.as_deref().ok_or_else(|| {
        GroupingError::InvalidCondition(format!(
            "{:?} condition requires a value",
            condition.field
        ))
    })?;

    match condition.operator {
        Operator::Equals => Ok(actual == value),
        Operator::Contains => Ok(actual.contains(value)),
        Operator::Exists => Err(GroupingError::InvalidCondition(
            "exists operator applies only to the tags field".into(),
        )),
    }
}

/// Structural check applied when a rule is created or updated, so a
/// malformed condition is a [`GroupingError::Validation`] at the API
/// boundary instead of an evaluation failure later.
pub fn validate(condition: &GroupingCondition) -> GroupingResult<()> {
    match condition.field {
        ConditionField::Tags => {
            if condition.key.as_deref().map_or(true, str::is_empty) {
                return Err(GroupingError::Validation(
                    "tags condition requires a non-empty tag key".into(),
                ));
            }
            if condition.operator != Operator::Exists && condition.value.is_none() {
                return Err(GroupingError::Validation(
                    "tags condition requires a value".into(),
                ));
            }
        }
        _ => {
            if condition.operator == Operator::Exists {
                return Err(GroupingError::Validation(
                    "exists operator applies only to the tags field".into(),
                ));
            }
            if condition.value.is_none() {
                return Err(GroupingError::Validation(format!(
                    "{:?} condition requires a value",
                    condition.field
                )));
            }
        }
    }
    Ok(())
}
