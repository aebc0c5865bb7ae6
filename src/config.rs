// src/config.rs

//! Manages the engine's tunable constants: loading, resolving, and defaults.
//!
//! Every numeric knob in this file has a compile-time default; they are
//! only ever overridden by an operator who knows what they are doing.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// The tunable constants that drive per-generation parameter derivation and
/// the frozen-epsilon rule.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Config {
    /// ε_default: the composed false-positive rate used when a scalable
    /// filter is created without an explicit `ERROR` option.
    #[serde(default = "default_error")]
    pub default_error: f64,
    /// ε_min: the smallest ε an operator may request.
    #[serde(default = "default_min_error")]
    pub min_error: f64,
    /// P: the fill-ratio target at which a generation is declared full.
    #[serde(default = "default_fill_ratio")]
    pub fill_ratio: f64,
    /// BASESIZE: the initial memory size of generation 0, in bytes.
    #[serde(default = "default_base_size_bytes")]
    pub base_size_bytes: u64,
    /// r_n: the per-generation item-growth ratio.
    #[serde(default = "default_growth_ratio")]
    pub growth_ratio: f64,
    /// r_e: the per-generation error-tightening ratio.
    #[serde(default = "default_tightening_ratio")]
    pub tightening_ratio: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_error: default_error(),
            min_error: default_min_error(),
            fill_ratio: default_fill_ratio(),
            base_size_bytes: default_base_size_bytes(),
            growth_ratio: default_growth_ratio(),
            tightening_ratio: default_tightening_ratio(),
        }
    }
}

fn default_error() -> f64 {
    0.003
}

fn default_min_error() -> f64 {
    1e-10
}

fn default_fill_ratio() -> f64 {
    0.5
}

fn default_base_size_bytes() -> u64 {
    2048
}

fn default_growth_ratio() -> f64 {
    2.0
}

fn default_tightening_ratio() -> f64 {
    0.85
}

impl Config {
    /// Loads configuration layered as defaults → optional TOML file →
    /// environment variables prefixed `BLOOM_` (e.g. `BLOOM_DEFAULT_ERROR=0.01`).
    ///
    /// A missing file path is not an error; it simply leaves the defaults
    /// (and any environment overrides) in place.
    pub fn load(path: Option<&str>) -> anyhow::Result<Self> {
        let mut builder = config::Config::builder()
            .set_default("default_error", default_error())?
            .set_default("min_error", default_min_error())?
            .set_default("fill_ratio", default_fill_ratio())?
            .set_default("base_size_bytes", default_base_size_bytes() as i64)?
            .set_default("growth_ratio", default_growth_ratio())?
            .set_default("tightening_ratio", default_tightening_ratio())?;

        if let Some(path) = path {
            builder = builder.add_source(config::File::with_name(path).required(false));
        }
        builder = builder.add_source(config::Environment::with_prefix("BLOOM"));

        let raw = builder.build()?;
        Ok(raw.try_deserialize()?)
    }

    /// Wraps the config in an `Arc` for sharing across command executions.
    pub fn into_shared(self) -> Arc<Self> {
        Arc::new(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let cfg = Config::default();
        assert_eq!(cfg.default_error, 0.003);
        assert_eq!(cfg.min_error, 1e-10);
        assert_eq!(cfg.fill_ratio, 0.5);
        assert_eq!(cfg.base_size_bytes, 2048);
        assert_eq!(cfg.growth_ratio, 2.0);
        assert_eq!(cfg.tightening_ratio, 0.85);
    }

    #[test]
    fn load_without_file_falls_back_to_defaults() {
        let cfg = Config::load(None).expect("config should load from defaults alone");
        assert_eq!(cfg, Config::default());
    }
}
