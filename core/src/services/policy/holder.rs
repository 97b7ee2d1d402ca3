//! Process-wide token policy holder
//!
//! Passing `&TokenPolicy` explicitly is preferred. The holder exists for call
//! sites that are not wired with the policy. It is written at most once, at
//! startup; every later read sees the same immutable policy.

use std::sync::Arc;

use once_cell::sync::OnceCell;
use tracing::{debug, warn};

use crate::errors::PolicyError;

use super::resolver::PolicyAware;
use super::token_policy::TokenPolicy;

static POLICY: OnceCell<Arc<TokenPolicy>> = OnceCell::new();

/// Installs the process-wide policy
///
/// # Returns
///
/// * `Ok(())` - Policy installed
/// * `Err(PolicyError::AlreadyInstalled)` - A policy was installed earlier
pub fn install(policy: Arc<TokenPolicy>) -> Result<(), PolicyError> {
    POLICY
        .set(policy)
        .map_err(|_| PolicyError::AlreadyInstalled)?;
    debug!("Installed process-wide token policy");
    Ok(())
}

/// Gets the process-wide policy
pub fn current() -> Result<Arc<TokenPolicy>, PolicyError> {
    POLICY.get().cloned().ok_or(PolicyError::NotInstalled)
}

pub fn is_installed() -> bool {
    POLICY.get().is_some()
}

/// Consumer that installs the resolved policy into the process-wide holder
#[derive(Debug, Default, Clone, Copy)]
pub struct GlobalPolicyHolder;

impl PolicyAware for GlobalPolicyHolder {
    fn policy_ready(&self, policy: Arc<TokenPolicy>) {
        if install(policy).is_err() {
            warn!("Token policy already installed, keeping the existing one");
        }
    }
}
