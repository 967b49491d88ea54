use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A per-machine-type override: whether automation is enabled for the
/// type, and its processing priority within a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachineOverride {
    pub enabled: bool,
    pub priority: i32,
}

impl Default for MachineOverride {
    fn default() -> Self {
        Self {
            enabled: true,
            priority: 0,
        }
    }
}

/// The configured rule overrides, keyed by machine type identifier.
///
/// Absence of an entry means enabled with priority 0. Read-only during
/// scans; shareable by reference across concurrent scans.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleSet {
    overrides: HashMap<String, MachineOverride>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the override for a machine type.
    pub fn set(&mut self, machine_type: impl Into<String>, rule: MachineOverride) {
        self.overrides.insert(machine_type.into(), rule);
    }

    /// Look up the override for a machine type, if configured.
    pub fn get(&self, machine_type: &str) -> Option<MachineOverride> {
        self.overrides.get(machine_type).copied()
    }

    /// Whether automation is enabled for the machine type.
    pub fn is_enabled(&self, machine_type: &str) -> bool {
        self.get(machine_type).map_or(true, |rule| rule.enabled)
    }

    /// The configured priority for the machine type (0 when absent).
    pub fn priority(&self, machine_type: &str) -> i32 {
        self.get(machine_type).map_or(0, |rule| rule.priority)
    }

    pub fn len(&self) -> usize {
        self.overrides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overrides.is_empty()
    }

    /// Load a rule set from a JSON document mapping machine types to
    /// overrides.
    #[cfg(feature = "config-loader")]
    pub fn from_json(json: &str) -> Result<Self, RuleLoadError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Errors that can occur while loading rule overrides.
#[cfg(feature = "config-loader")]
#[derive(Debug, thiserror::Error)]
pub enum RuleLoadError {
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),
}
