//! Bypass rule compilation and matching.
//!
//! Exact command keys plus prefix entries (`entitlement-` matches every
//! command under that namespace).

use std::collections::HashSet;

use botgate_core::{GateError, Result};

use crate::config::BypassSection;

/// Compiled bypass rules. Construct once at startup, then share.
#[derive(Debug, Clone)]
pub struct BypassRules {
    commands: HashSet<String>,
    prefixes: Vec<String>,
    recovery_command: String,
}

impl BypassRules {
    pub fn compile(section: &BypassSection) -> Result<Self> {
        section.validate()?;
        let rules = Self {
            commands: section.commands.iter().cloned().collect(),
            prefixes: section.prefixes.clone(),
            recovery_command: section.recovery_command.clone(),
        };
        // The recovery entry point must itself be reachable when expired.
        if !rules.is_bypass(&rules.recovery_command) {
            return Err(GateError::BadConfig(format!(
                "recovery_command {:?} is not covered by bypass rules",
                rules.recovery_command
            )));
        }
        Ok(rules)
    }

    pub fn is_bypass(&self, command_key: &str) -> bool {
        self.commands.contains(command_key)
            || self.prefixes.iter().any(|p| command_key.starts_with(p.as_str()))
    }

    pub fn recovery_command(&self) -> &str {
        &self.recovery_command
    }
}

impl Default for BypassRules {
    fn default() -> Self {
        let section = BypassSection::default();
        Self {
            commands: section.commands.iter().cloned().collect(),
            prefixes: section.prefixes.clone(),
            recovery_command: section.recovery_command.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn exact_and_prefix_matching() {
        let rules = BypassRules::compile(&BypassSection {
            commands: vec!["redeem".into()],
            prefixes: vec!["billing-".into()],
            recovery_command: "redeem".into(),
        })
        .unwrap();

        assert!(rules.is_bypass("redeem"));
        assert!(rules.is_bypass("billing-portal"));
        assert!(!rules.is_bypass("generic-feature"));
        assert!(!rules.is_bypass("redeem-extra"));
    }

    #[test]
    fn defaults_cover_recovery_entry_point() {
        let rules = BypassRules::default();
        assert!(rules.is_bypass(rules.recovery_command()));
        assert!(rules.is_bypass("entitlement-purchase"));
    }

    #[test]
    fn uncovered_recovery_command_is_rejected() {
        let err = BypassRules::compile(&BypassSection {
            commands: vec!["redeem".into()],
            prefixes: vec![],
            recovery_command: "other".into(),
        })
        .unwrap_err();
        assert_eq!(err.reason_code().as_str(), "BAD_CONFIG");
    }
}
