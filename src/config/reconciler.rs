//! Reconciliation sweep configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Reconciliation sweep configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ReconcilerConfig {
    /// Actor label recorded on payments cancelled by the sweep
    #[serde(default = "default_actor")]
    pub actor: String,

    /// Report findings without writing repairs
    #[serde(default)]
    pub dry_run: bool,
}

impl ReconcilerConfig {
    /// Validate reconciler configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.actor.trim().is_empty() {
            return Err(ValidationError::EmptyReconcilerActor);
        }
        Ok(())
    }
}

impl Default for ReconcilerConfig {
    fn default() -> Self {
        Self {
            actor: default_actor(),
            dry_run: false,
        }
    }
}

fn default_actor() -> String {
    "reconciler".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_actor_is_reconciler() {
        let config = ReconcilerConfig::default();
        assert_eq!(config.actor, "reconciler");
        assert!(!config.dry_run);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn blank_actor_is_rejected() {
        let config = ReconcilerConfig {
            actor: "  ".to_string(),
            dry_run: false,
        };
        assert!(config.validate().is_err());
    }
}
