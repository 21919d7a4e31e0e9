//! The grouping engine: the single owner of asset and rule state, and
//! the component that keeps every asset's `group_name` consistent with
//! the current rule set.

use chrono::Utc;
use grouping_core::{Asset, AssetInput, AssetPatch, GroupingError, GroupingResult};
use parking_lot::RwLock;
use tracing::{debug, info};
use uuid::Uuid;

use crate::rules::{self, GroupingRule, RuleInput, RulePatch};
use crate::store::{AssetStore, RuleStore};

#[derive(Default)]
struct EngineState {
    assets: AssetStore,
    rules: RuleStore,
}

/// Rule evaluation and group-assignment engine.
///
/// Both stores live behind one lock so that a rule-triggered re-scan
/// observes a consistent snapshot of every asset: an asset created
/// concurrently is either included in the scan or evaluated on creation
/// against the already-stored rule, never missed. All operations are
/// synchronous; there is no internal I/O.
pub struct GroupingEngine {
    state: RwLock<EngineState>,
}

impl GroupingEngine {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(EngineState::default()),
        }
    }

    /// Create an asset and assign its group from the current rules.
    pub fn create_asset(&self, input: AssetInput) -> GroupingResult<Asset> {
        let mut state = self.state.write();
        let mut asset = Asset::from_input(Uuid::new_v4(), input, Utc::now());
        asset.group_name = rules::select_group(&asset, state.rules.list())?;

        info!(
            asset_id = %asset.id,
            asset_type = %asset.asset_type,
            group = ?asset.group_name,
            "Asset created"
        );

        state.assets.put(asset.clone());
        Ok(asset)
    }

    /// Apply a patch and recompute the group. Any `group_name` in the
    /// patch is ignored; the engine is authoritative.
    pub fn update_asset(&self, id: Uuid, patch: AssetPatch) -> GroupingResult<Asset> {
        let mut state = self.state.write();
        let mut asset = state
            .assets
            .get(&id)
            .cloned()
            .ok_or(GroupingError::AssetNotFound(id))?;

        asset.apply_patch(patch);
        asset.group_name = rules::select_group(&asset, state.rules.list())?;
        asset.updated_at = Utc::now();

        info!(asset_id = %id, group = ?asset.group_name, "Asset updated");

        state.assets.put(asset.clone());
        Ok(asset)
    }

    pub fn get_asset(&self, id: Uuid) -> GroupingResult<Asset> {
        self.state
            .read()
            .assets
            .get(&id)
            .cloned()
            .ok_or(GroupingError::AssetNotFound(id))
    }

    /// All assets, in creation order.
    pub fn list_assets(&self) -> Vec<Asset> {
        self.state.read().assets.list().cloned().collect()
    }

    /// Assets currently assigned to `group_name`, in creation order.
    pub fn assets_by_group(&self, group_name: &str) -> Vec<Asset> {
        self.state
            .read()
            .assets
            .list()
            .filter(|asset| asset.group_name.as_deref() == Some(group_name))
            .cloned()
            .collect()
    }

    /// Store a new rule, then re-evaluate every asset against the full
    /// rule set. The re-scan is O(assets × rules × conditions); fine at
    /// this scale, and a known limit beyond it.
    pub fn create_rule(&self, input: RuleInput) -> GroupingResult<GroupingRule> {
        rules::validate_rule(&input.group_name, &input.conditions)?;

        let mut state = self.state.write();
        let now = Utc::now();
        let rule = state
            .rules
            .insert(GroupingRule {
                id: Uuid::new_v4(),
                group_name: input.group_name,
                description: input.description,
                conditions: input.conditions,
                seq: 0, // assigned by the store
                created_at: now,
                updated_at: now,
            })
            .clone();

        info!(rule_id = %rule.id, group = %rule.group_name, seq = rule.seq, "Rule created");

        Self::regroup_all(&mut state)?;
        Ok(rule)
    }

    /// Patch an existing rule (its `seq`, and so its precedence, is
    /// preserved), then re-evaluate every asset.
    pub fn update_rule(&self, id: Uuid, patch: RulePatch) -> GroupingResult<GroupingRule> {
        let mut state = self.state.write();
        let mut rule = state
            .rules
            .get(&id)
            .cloned()
            .ok_or(GroupingError::RuleNotFound(id))?;

        if let Some(group_name) = patch.group_name {
            rule.group_name = group_name;
        }
        if let Some(description) = patch.description {
            rule.description = Some(description);
        }
        if let Some(conditions) = patch.conditions {
            rule.conditions = conditions;
        }
        rules::validate_rule(&rule.group_name, &rule.conditions)?;
        rule.updated_at = Utc::now();

        let rule = state
            .rules
            .replace(rule)
            .ok_or(GroupingError::RuleNotFound(id))?
            .clone();

        info!(rule_id = %id, group = %rule.group_name, "Rule updated");

        Self::regroup_all(&mut state)?;
        Ok(rule)
    }

    pub fn get_rule(&self, id: Uuid) -> GroupingResult<GroupingRule> {
        self.state
            .read()
            .rules
            .get(&id)
            .cloned()
            .ok_or(GroupingError::RuleNotFound(id))
    }

    /// All rules, in precedence (insertion) order.
    pub fn list_rules(&self) -> Vec<GroupingRule> {
        self.state.read().rules.list().cloned().collect()
    }

    /// Recompute `group_name` for every stored asset under the write
    /// lock already held by the caller. Stored conditions passed
    /// validation, so evaluation errors here indicate a defect upstream;
    /// they are propagated, not swallowed.
    fn regroup_all(state: &mut EngineState) -> GroupingResult<()> {
        let EngineState { assets, rules } = state;
        let rule_list: Vec<&GroupingRule> = rules.list().collect();
        let mut changed = 0usize;

        for asset in assets.iter_mut() {
            let group = rules::select_group(asset, rule_list.iter().copied())?;
            if asset.group_name != group {
                debug!(
                    asset_id = %asset.id,
                    from = ?asset.group_name,
                    to = ?group,
                    "Asset regrouped"
                );
                asset.group_name = group;
                asset.updated_at = Utc::now();
                changed += 1;
            }
        }

        debug!(scanned = assets.len(), changed, "Re-scan complete");
        Ok(())
    }
}

impl Default for GroupingEngine {
    fn default() -> Self {
        Self::new()
    }
}
