use crate::sim::{QdiscSpec, ScenarioError, ScenarioSpec};

#[test]
fn scenario_parses_minimal_json_with_defaults() {
    let raw = r#"
    {
        "schema_version": 1,
        "hosts": [ { "id": 0 }, { "id": 1 } ]
    }
    "#;
    let spec: ScenarioSpec = serde_json::from_str(raw).expect("parse scenario");
    assert_eq!(spec.schema_version, 1);
    assert_eq!(spec.hosts.len(), 2);
    assert!(spec.hosts[0].name.is_none());
    assert!(spec.bursts.is_empty());
    assert!(spec.defaults.is_none());
    spec.validate().expect("valid scenario");
}

#[test]
fn scenario_parses_qdisc_variants_and_bursts() {
    let raw = r#"
    {
        "schema_version": 1,
        "defaults": { "qdisc": { "kind": "codel", "target_us": 5000 }, "latency_us": 100 },
        "hosts": [
            { "id": 0, "name": "src", "qdisc": { "kind": "single_slot" } },
            { "id": 1, "downstream_mbps": 5, "qdisc": { "kind": "static_fifo", "capacity_pkts": 2 } }
        ],
        "bursts": [ { "src": 0, "dst": 1, "pkts": 3, "gap_us": 0 } ]
    }
    "#;
    let spec: ScenarioSpec = serde_json::from_str(raw).expect("parse scenario");
    assert!(matches!(spec.hosts[0].qdisc, Some(QdiscSpec::SingleSlot)));
    assert!(matches!(
        spec.hosts[1].qdisc,
        Some(QdiscSpec::StaticFifo {
            capacity_pkts: Some(2)
        })
    ));
    assert!(matches!(
        spec.defaults.as_ref().and_then(|d| d.qdisc),
        Some(QdiscSpec::Codel {
            target_us: Some(5000),
            interval_us: None
        })
    ));
    assert_eq!(spec.bursts[0].pkts, 3);
    assert_eq!(spec.bursts[0].gap_us, Some(0));
    spec.validate().expect("valid scenario");
}

#[test]
fn scenario_rejects_unknown_qdisc_kind_at_parse_time() {
    let raw = r#"
    {
        "schema_version": 1,
        "hosts": [ { "id": 0, "qdisc": { "kind": "red" } } ]
    }
    "#;
    assert!(serde_json::from_str::<ScenarioSpec>(raw).is_err());
}

#[test]
fn scenario_rejects_unsupported_schema_version() {
    let raw = r#"{ "schema_version": 99, "hosts": [ { "id": 0 } ] }"#;
    let spec: ScenarioSpec = serde_json::from_str(raw).expect("parse scenario");
    assert!(matches!(spec.validate(), Err(ScenarioError::Invalid(_))));
}

#[test]
fn scenario_rejects_duplicate_host_ids() {
    let raw = r#"{ "schema_version": 1, "hosts": [ { "id": 3 }, { "id": 3 } ] }"#;
    let spec: ScenarioSpec = serde_json::from_str(raw).expect("parse scenario");
    assert!(matches!(spec.validate(), Err(ScenarioError::Invalid(_))));
}

#[test]
fn scenario_rejects_burst_referencing_unknown_host() {
    let raw = r#"
    {
        "schema_version": 1,
        "hosts": [ { "id": 0 } ],
        "bursts": [ { "src": 0, "dst": 5, "pkts": 1 } ]
    }
    "#;
    let spec: ScenarioSpec = serde_json::from_str(raw).expect("parse scenario");
    let err = spec.validate().expect_err("unknown host");
    assert!(err.to_string().contains("unknown host id 5"));
}

#[test]
fn scenario_rejects_empty_burst() {
    let raw = r#"
    {
        "schema_version": 1,
        "hosts": [ { "id": 0 }, { "id": 1 } ],
        "bursts": [ { "src": 0, "dst": 1, "pkts": 0 } ]
    }
    "#;
    let spec: ScenarioSpec = serde_json::from_str(raw).expect("parse scenario");
    assert!(matches!(spec.validate(), Err(ScenarioError::Invalid(_))));
}
