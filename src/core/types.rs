//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a vessel on the bench
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VesselId(pub Uuid);

impl VesselId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for VesselId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for VesselId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Milliseconds since the session started (or since the epoch, caller's choice)
pub type Timestamp = u64;
