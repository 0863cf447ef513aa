//! Scenario description loaded from JSON.
//!
//! Describes the simulated hosts (downstream bandwidth, queue
//! discipline of the upstream router) and the traffic bursts to inject.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Scenario schema version understood by this build.
pub const SCENARIO_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("read scenario file: {0}")]
    Io(#[from] std::io::Error),
    #[error("parse scenario json: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid scenario: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioSpec {
    pub schema_version: u32,
    #[serde(default)]
    pub defaults: Option<ScenarioDefaults>,
    pub hosts: Vec<HostSpec>,
    #[serde(default)]
    pub bursts: Vec<BurstSpec>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScenarioDefaults {
    #[serde(default)]
    pub downstream_mbps: Option<u64>,
    #[serde(default)]
    pub latency_us: Option<u64>,
    #[serde(default)]
    pub pkt_bytes: Option<u32>,
    #[serde(default)]
    pub qdisc: Option<QdiscSpec>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostSpec {
    pub id: u64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub downstream_mbps: Option<u64>,
    #[serde(default)]
    pub qdisc: Option<QdiscSpec>,
}

/// Queue discipline selection for a host's upstream router. Unknown
/// kinds are rejected at parse time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum QdiscSpec {
    SingleSlot,
    StaticFifo {
        #[serde(default)]
        capacity_pkts: Option<u64>,
    },
    Codel {
        #[serde(default)]
        target_us: Option<u64>,
        #[serde(default)]
        interval_us: Option<u64>,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BurstSpec {
    pub src: u64,
    pub dst: u64,
    pub pkts: u64,
    #[serde(default)]
    pub pkt_bytes: Option<u32>,
    #[serde(default)]
    pub gap_us: Option<u64>,
    #[serde(default)]
    pub start_us: Option<u64>,
    #[serde(default)]
    pub flow_id: Option<u64>,
}

impl ScenarioSpec {
    /// Load and validate a scenario from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ScenarioError> {
        let raw = std::fs::read_to_string(path)?;
        let spec: ScenarioSpec = serde_json::from_str(&raw)?;
        spec.validate()?;
        Ok(spec)
    }

    /// Cross-reference checks serde cannot express.
    pub fn validate(&self) -> Result<(), ScenarioError> {
        if self.schema_version != SCENARIO_SCHEMA_VERSION {
            return Err(ScenarioError::Invalid(format!(
                "unsupported schema_version {} (expected {})",
                self.schema_version, SCENARIO_SCHEMA_VERSION
            )));
        }
        if self.hosts.is_empty() {
            return Err(ScenarioError::Invalid("scenario declares no hosts".into()));
        }
        let mut seen = HashSet::new();
        for host in &self.hosts {
            if !seen.insert(host.id) {
                return Err(ScenarioError::Invalid(format!(
                    "duplicate host id {}",
                    host.id
                )));
            }
        }
        for (i, burst) in self.bursts.iter().enumerate() {
            for endpoint in [burst.src, burst.dst] {
                if !seen.contains(&endpoint) {
                    return Err(ScenarioError::Invalid(format!(
                        "burst {i} references unknown host id {endpoint}"
                    )));
                }
            }
            if burst.pkts == 0 {
                return Err(ScenarioError::Invalid(format!("burst {i} sends no packets")));
            }
        }
        Ok(())
    }
}
