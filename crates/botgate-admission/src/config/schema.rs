use serde::Deserialize;

use botgate_core::{GateError, Result};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GateConfig {
    pub version: u32,

    #[serde(default)]
    pub bypass: BypassSection,

    #[serde(default)]
    pub admission: AdmissionSection,
}

impl GateConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(GateError::UnsupportedVersion);
        }
        self.bypass.validate()?;
        Ok(())
    }
}

/// Commands exempt from entitlement checks. These must always be reachable,
/// even for an expired workspace, or no workspace could ever recover.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BypassSection {
    #[serde(default = "default_bypass_commands")]
    pub commands: Vec<String>,

    #[serde(default = "default_bypass_prefixes")]
    pub prefixes: Vec<String>,

    /// Key of the redemption entry point, attached to expiry denials as the
    /// recovery affordance. Must itself be bypass-covered.
    #[serde(default = "default_recovery_command")]
    pub recovery_command: String,
}

impl Default for BypassSection {
    fn default() -> Self {
        Self {
            commands: default_bypass_commands(),
            prefixes: default_bypass_prefixes(),
            recovery_command: default_recovery_command(),
        }
    }
}

impl BypassSection {
    pub fn validate(&self) -> Result<()> {
        if self.commands.is_empty() {
            return Err(GateError::BadConfig(
                "bypass.commands must not be empty".into(),
            ));
        }
        for entry in self.commands.iter().chain(self.prefixes.iter()) {
            if entry.is_empty() || entry.chars().any(char::is_whitespace) {
                return Err(GateError::BadConfig(format!(
                    "invalid bypass entry: {entry:?} (must be non-empty, no whitespace)"
                )));
            }
        }
        Ok(())
    }
}

fn default_bypass_commands() -> Vec<String> {
    vec![
        "entitlement-purchase".to_string(),
        "entitlement-code-redeem".to_string(),
    ]
}

fn default_bypass_prefixes() -> Vec<String> {
    vec!["entitlement-".to_string()]
}

fn default_recovery_command() -> String {
    "entitlement-code-redeem".to_string()
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AdmissionSection {
    #[serde(default)]
    pub unregistered: UnregisteredPolicy,
}

/// Verdict for a workspace with no tenant record at admission time.
///
/// The permissive default matches the observed platform behavior: absence at
/// this point is an anomaly (registration rides the join event), not a denial
/// condition. Operators who want registration to be mandatory before any
/// business command set `deny`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnregisteredPolicy {
    #[default]
    Allow,
    Deny,
}
