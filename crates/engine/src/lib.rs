//! Rule-driven group assignment for cloud assets — condition evaluation,
//! first-match-wins rule selection, and the engine that re-derives every
//! asset's group when assets or rules change.

pub mod builder;
pub mod conditions;
pub mod engine;
pub mod rules;
pub mod store;

pub use builder::RuleBuilder;
pub use conditions::{ConditionField, GroupingCondition, Operator};
pub use engine::GroupingEngine;
pub use rules::{GroupingRule, RuleInput, RulePatch};
