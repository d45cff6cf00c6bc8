//! Inbound/outbound permission switches for the observer module.

use serde::{Deserialize, Serialize};

/// The pair of permission switches kept under a single store key.
///
/// The `Default` value (both disabled) is also what readers assume when no
/// record has been written yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PermissionFlags {
    pub is_inbound_enabled: bool,
    pub is_outbound_enabled: bool,
}

impl PermissionFlags {
    pub fn new(is_inbound_enabled: bool, is_outbound_enabled: bool) -> Self {
        Self {
            is_inbound_enabled,
            is_outbound_enabled,
        }
    }

    /// Both directions open.
    pub fn all_enabled() -> Self {
        Self::new(true, true)
    }
}
