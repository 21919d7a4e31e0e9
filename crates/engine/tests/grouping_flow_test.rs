//! Integration test for the full asset/rule grouping flow.

use grouping_core::{AssetInput, AssetPatch, CloudAccount, Tag};
use grouping_engine::{GroupingEngine, RuleBuilder};

/// Construct a sample production EC2 asset for testing.
fn sample_asset_input() -> AssetInput {
    AssetInput {
        name: "test-instance-prod".to_string(),
        asset_type: "ec2-instance".to_string(),
        tags: vec![Tag::new("env", "prod"), Tag::new("team", "platform")],
        cloud_account: CloudAccount {
            id: "123".to_string(),
            name: "main".to_string(),
        },
        owner_id: "user1".to_string(),
        region: "us-east-1".to_string(),
    }
}

#[test]
fn test_full_grouping_flow() {
    let engine = GroupingEngine::new();

    // Asset created before any rule exists stays ungrouped.
    let asset = engine.create_asset(sample_asset_input()).unwrap();
    assert_eq!(asset.group_name, None);

    // Creating a matching rule regroups the existing asset.
    let rule = engine
        .create_rule(
            RuleBuilder::new("production-instances")
                .description("Production EC2 instances")
                .type_equals("ec2-instance")
                .tag("env", "prod")
                .build(),
        )
        .unwrap();
    assert_eq!(rule.seq, 0);

    let stored = engine.get_asset(asset.id).unwrap();
    assert_eq!(stored.group_name.as_deref(), Some("production-instances"));
    assert_eq!(engine.assets_by_group("production-instances").len(), 1);

    // A second asset created after the rule is grouped immediately.
    let second = engine.create_asset(sample_asset_input()).unwrap();
    assert_eq!(second.group_name.as_deref(), Some("production-instances"));
}

#[test]
fn test_broad_rule_added_first_beats_specific_rule() {
    let engine = GroupingEngine::new();

    // Insertion order is the precedence order: the broad "instances"
    // rule wins over the later, more specific "production-instances"
    // rule.
    engine
        .create_rule(RuleBuilder::new("instances").type_equals("ec2-instance").build())
        .unwrap();
    engine
        .create_rule(
            RuleBuilder::new("production-instances")
                .type_equals("ec2-instance")
                .tag("env", "prod")
                .build(),
        )
        .unwrap();

    let asset = engine.create_asset(sample_asset_input()).unwrap();
    assert_eq!(asset.group_name.as_deref(), Some("instances"));

    assert_eq!(engine.assets_by_group("instances").len(), 1);
    assert!(engine.assets_by_group("production-instances").is_empty());
}

#[test]
fn test_multi_condition_rule_over_mixed_fleet() {
    let engine = GroupingEngine::new();
    engine
        .create_rule(
            RuleBuilder::new("production-instances")
                .type_equals("ec2-instance")
                .name_contains("prod")
                .tag("env", "prod")
                .build(),
        )
        .unwrap();

    let matching = engine.create_asset(sample_asset_input()).unwrap();
    assert_eq!(
        matching.group_name.as_deref(),
        Some("production-instances")
    );

    // Same type and tag, but the name lacks "prod".
    let mut input = sample_asset_input();
    input.name = "test-instance-staging".to_string();
    let near_miss = engine.create_asset(input).unwrap();
    assert_eq!(near_miss.group_name, None);
}

#[test]
fn test_patch_cannot_pin_a_group() {
    let engine = GroupingEngine::new();
    let asset = engine.create_asset(sample_asset_input()).unwrap();

    // With no rules at all, a user-supplied group_name is overwritten.
    let patched = engine
        .update_asset(
            asset.id,
            AssetPatch {
                group_name: Some("hand-picked".to_string()),
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(patched.group_name, None);
    assert!(engine.assets_by_group("hand-picked").is_empty());
}

#[test]
fn test_rules_and_assets_survive_listing() {
    let engine = GroupingEngine::new();
    engine
        .create_rule(RuleBuilder::new("instances").type_equals("ec2-instance").build())
        .unwrap();
    engine
        .create_rule(RuleBuilder::new("buckets").type_equals("s3-bucket").build())
        .unwrap();
    engine.create_asset(sample_asset_input()).unwrap();

    let rules = engine.list_rules();
    assert_eq!(rules.len(), 2);
    assert_eq!(rules[0].group_name, "instances");
    assert_eq!(rules[1].group_name, "buckets");
    assert!(rules[0].seq < rules[1].seq);

    assert_eq!(engine.list_assets().len(), 1);
}
