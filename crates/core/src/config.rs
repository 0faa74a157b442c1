//! Explicit mapper configuration
//!
//! Configuration is passed by value into the components that need it
//! (put-item sanitization, physical table name resolution), never read
//! from ambient global state.

use serde::{Deserialize, Serialize};

/// Configuration for one mapper instance
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapperConfig {
    /// Send `Null` attribute values in put items instead of dropping them
    pub store_nulls: bool,
    /// Prefix applied to every logical table name when building requests
    pub table_prefix: Option<String>,
}

impl MapperConfig {
    /// Default configuration: nulls dropped, no table prefix
    pub fn new() -> Self {
        Self::default()
    }
}
