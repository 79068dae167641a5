//! Native context configuration.
//!
//! A [`Config`] is a plain set of key-value parameters that is applied to a
//! native configuration object when a [`Context`][crate::context::Context] is
//! created. The native object itself never outlives context creation.
//!
//! # Examples
//!
//! ```
//! use z3_rs::config::Config;
//!
//! let config = Config::default().timeout_ms(5000);
//! assert_eq!(config.get("model"), Some("true"));
//! assert_eq!(config.get("timeout"), Some("5000"));
//! ```

use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    params: BTreeMap<String, String>,
}

impl Config {
    /// Creates an empty configuration, without even `model = true`.
    pub fn empty() -> Self {
        Self {
            params: BTreeMap::new(),
        }
    }

    /// Sets an arbitrary native parameter.
    pub fn set(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Enables or disables model production.
    pub fn model(self, enabled: bool) -> Self {
        self.set("model", enabled.to_string())
    }

    pub fn timeout_ms(self, timeout: u64) -> Self {
        self.set("timeout", timeout.to_string())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.params.get(key).map(String::as_str)
    }

    pub fn params(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl Default for Config {
    fn default() -> Self {
        Config::empty().model(true)
    }
}
