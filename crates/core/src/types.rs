use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A cloud infrastructure resource tracked by the grouping engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Asset {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "type")]
    pub asset_type: String,
    /// Ordered tag list; duplicate keys are allowed.
    pub tags: Vec<Tag>,
    pub cloud_account: CloudAccount,
    pub owner_id: String,
    pub region: String,
    /// Assigned group, if any. Written exclusively by the grouping engine.
    pub group_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A single key/value tag on an asset. Not independently addressable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub key: String,
    pub value: String,
}

impl Tag {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// The cloud account an asset belongs to. Opaque to the engine except for
/// condition matching, which uses the account id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CloudAccount {
    pub id: String,
    pub name: String,
}

/// User-supplied fields for asset creation. Identity, timestamps, and the
/// group assignment are generated by the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetInput {
    pub name: String,
    #[serde(rename = "type")]
    pub asset_type: String,
    #[serde(default)]
    pub tags: Vec<Tag>,
    pub cloud_account: CloudAccount,
    pub owner_id: String,
    pub region: String,
}

/// Partial update for an asset. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssetPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type", default)]
    pub asset_type: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<Tag>>,
    #[serde(default)]
    pub cloud_account: Option<CloudAccount>,
    #[serde(default)]
    pub owner_id: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    /// Accepted for wire compatibility but never authoritative: the engine
    /// recomputes the group after every patch and overwrites this value.
    #[serde(default)]
    pub group_name: Option<String>,
}

impl Asset {
    /// Materialize a stored asset from user input.
    pub fn from_input(id: Uuid, input: AssetInput, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: input.name,
            asset_type: input.asset_type,
            tags: input.tags,
            cloud_account: input.cloud_account,
            owner_id: input.owner_id,
            region: input.region,
            group_name: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply patch fields in place. Does not touch `group_name` or
    /// timestamps; the engine owns both.
    pub fn apply_patch(&mut self, patch: AssetPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(asset_type) = patch.asset_type {
            self.asset_type = asset_type;
        }
        if let Some(tags) = patch.tags {
            self.tags = tags;
        }
        if let Some(cloud_account) = patch.cloud_account {
            self.cloud_account = cloud_account;
        }
        if let Some(owner_id) = patch.owner_id {
            self.owner_id = owner_id;
        }
        if let Some(region) = patch.region {
            self.region = region;
        }
    }
}
