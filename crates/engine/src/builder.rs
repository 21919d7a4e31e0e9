//! Fluent builder for rule input.

use crate::conditions::{ConditionField, GroupingCondition, Operator};
use crate::rules::RuleInput;

pub struct RuleBuilder {
    group_name: String,
    description: Option<String>,
    conditions: Vec<GroupingCondition>,
}

impl RuleBuilder {
    pub fn new(group_name: impl Into<String>) -> Self {
        Self {
            group_name: group_name.into(),
            description: None,
            conditions: Vec::new(),
        }
    }

    pub fn description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    pub fn type_equals(self, value: impl Into<String>) -> Self {
        self.scalar(ConditionField::Type, Operator::Equals, value)
    }

    pub fn name_contains(self, value: impl Into<String>) -> Self {
        self.scalar(ConditionField::Name, Operator::Contains, value)
    }

    pub fn region_equals(self, value: impl Into<String>) -> Self {
        self.scalar(ConditionField::Region, Operator::Equals, value)
    }

    pub fn owner_equals(self, value: impl Into<String>) -> Self {
        self.scalar(ConditionField::OwnerId, Operator::Equals, value)
    }

    pub fn account_equals(self, account_id: impl Into<String>) -> Self {
        self.scalar(ConditionField::CloudAccount, Operator::Equals, account_id)
    }

    /// Require a tag with this exact key and value.
    pub fn tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.conditions.push(GroupingCondition {
            field: ConditionField::Tags,
            operator: Operator::Contains,
            value: Some(value.into()),
            key: Some(key.into()),
        });
        self
    }

    /// Require a tag with this key, any value.
    pub fn tag_exists(mut self, key: impl Into<String>) -> Self {
        self.conditions.push(GroupingCondition {
            field: ConditionField::Tags,
            operator: Operator::Exists,
            value: None,
            key: Some(key.into()),
        });
        self
    }

    fn scalar(mut self, field: ConditionField, operator: Operator, value: impl Into<String>) -> Self {
        self.conditions.push(GroupingCondition {
            field,
            operator,
            value: Some(value.into()),
            key: None,
        });
        self
    }

    pub fn build(self) -> RuleInput {
        RuleInput {
            group_name: self.group_name,
            description: self.description,
            conditions: self.conditions,
        }
    }
}
