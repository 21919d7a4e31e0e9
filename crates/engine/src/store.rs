//! In-memory keyed stores with explicit insertion-order iteration.
//!
//! Iteration order is load-bearing: rule precedence is first-match-wins
//! by insertion, and asset listings are returned in creation order.

use std::collections::HashMap;

use grouping_core::Asset;
use uuid::Uuid;

use crate::rules::GroupingRule;

/// Keyed asset storage. `put` on an existing id replaces the entry in
/// place, keeping its original iteration position.
#[derive(Debug, Default)]
pub struct AssetStore {
    entries: HashMap<Uuid, Asset>,
    order: Vec<Uuid>,
}

impl AssetStore {
    pub fn get(&self, id: &Uuid) -> Option<&Asset> {
        self.entries.get(id)
    }

    pub fn put(&mut self, asset: Asset) {
        if !self.entries.contains_key(&asset.id) {
            self.order.push(asset.id);
        }
        self.entries.insert(asset.id, asset);
    }

    pub fn list(&self) -> impl Iterator<Item = &Asset> {
        self.order.iter().filter_map(|id| self.entries.get(id))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Asset> {
        self.entries.values_mut()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Keyed rule storage. Each newly inserted rule is stamped with the next
/// value of a monotonic sequence counter; `list` iterates in that order.
#[derive(Debug, Default)]
pub struct RuleStore {
    entries: HashMap<Uuid, GroupingRule>,
    order: Vec<Uuid>,
    next_seq: u64,
}

impl RuleStore {
    pub fn get(&self, id: &Uuid) -> Option<&GroupingRule> {
        self.entries.get(id)
    }

    /// Insert a new rule, assigning its `seq`. Returns the stored rule.
    pub fn insert(&mut self, mut rule: GroupingRule) -> &GroupingRule {
        rule.seq = self.next_seq;
        self.next_seq += 1;
        let id = rule.id;
        self.order.push(id);
        self.entries.insert(id, rule);
        &self.entries[&id]
    }

    /// Replace an existing rule, preserving its `seq` and position.
    pub fn replace(&mut self, mut rule: GroupingRule) -> Option<&GroupingRule> {
        let id = rule.id;
        let existing = self.entries.get(&id)?;
        rule.seq = existing.seq;
        self.entries.insert(id, rule);
        self.entries.get(&id)
    }

    pub fn list(&self) -> impl Iterator<Item = &GroupingRule> {
        self.order.iter().filter_map(|id| self.entries.get(id))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use grouping_core::{AssetInput, CloudAccount};

    fn asset(name: &str) -> Asset {
        Asset::from_input(
            Uuid::new_v4(),
            AssetInput {
                name: name.into(),
                asset_type: "ec2-instance".into(),
                tags: vec![],
                cloud_account: CloudAccount {
                    id: "123".into(),
                    name: "main".into(),
                },
                owner_id: "user1".into(),
                region: "us-east-1".into(),
            },
            Utc::now(),
        )
    }

    fn rule(group_name: &str) -> GroupingRule {
        let now = Utc::now();
        GroupingRule {
            id: Uuid::new_v4(),
            group_name: group_name.into(),
            description: None,
            conditions: vec![],
            seq: 0,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_asset_store_preserves_insertion_order() {
        let mut store = AssetStore::default();
        let a = asset("a");
        let b = asset("b");
        let c = asset("c");
        let b_id = b.id;
        store.put(a);
        store.put(b);
        store.put(c);

        // Replacing b keeps its slot.
        let mut b2 = asset("b2");
        b2.id = b_id;
        store.put(b2);

        let names: Vec<_> = store.list().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b2", "c"]);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_rule_store_assigns_monotonic_seq() {
        let mut store = RuleStore::default();
        let first = store.insert(rule("first")).clone();
        let second = store.insert(rule("second")).clone();
        assert_eq!(first.seq, 0);
        assert_eq!(second.seq, 1);

        // Replacement keeps the original seq.
        let mut updated = rule("first-renamed");
        updated.id = first.id;
        updated.seq = 999;
        let stored = store.replace(updated).unwrap();
        assert_eq!(stored.seq, 0);

        let order: Vec<_> = store.list().map(|r| r.group_name.as_str()).collect();
        assert_eq!(order, vec!["first-renamed", "second"]);
    }

    #[test]
    fn test_rule_store_replace_unknown_id_is_none() {
        let mut store = RuleStore::default();
        assert!(store.replace(rule("ghost")).is_none());
    }
}
