// src/config.rs
use std::path::PathBuf;

use anyhow::{Context, Result};

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash-preview-09-2025";

#[derive(Clone)]
pub struct Config {
    pub port: u16,
    /// Server-held credential for the generative API. Never sent to clients.
    pub api_key: Option<String>,
    pub gemini_base_url: String,
    pub gemini_model: String,
    pub admin_key: Option<String>,
    pub static_dir: PathBuf,
}

// Keys are redacted.
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("port", &self.port)
            .field("api_key_set", &self.api_key.is_some())
            .field("gemini_base_url", &self.gemini_base_url)
            .field("gemini_model", &self.gemini_model)
            .field("admin_key_set", &self.admin_key.is_some())
            .field("static_dir", &self.static_dir)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            api_key: None,
            gemini_base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            gemini_model: DEFAULT_GEMINI_MODEL.to_string(),
            admin_key: None,
            static_dir: PathBuf::from("public"),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Config::default();

        let port = match get("PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .with_context(|| format!("PORT must be a valid port number, got {raw:?}"))?,
            None => defaults.port,
        };

        Ok(Self {
            port,
            api_key: get("GEMINI_API_KEY"),
            gemini_base_url: get("GEMINI_BASE_URL").unwrap_or(defaults.gemini_base_url),
            gemini_model: get("GEMINI_MODEL").unwrap_or(defaults.gemini_model),
            admin_key: get("ADMIN_API_KEY"),
            static_dir: get("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.static_dir),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn from_pairs(pairs: &[(&str, &str)]) -> Result<Config> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|k| map.get(k).cloned())
    }

    #[test]
    fn defaults_when_nothing_set() {
        let cfg = from_pairs(&[]).unwrap();
        assert_eq!(cfg.port, 3000);
        assert!(cfg.api_key.is_none());
        assert_eq!(cfg.gemini_model, DEFAULT_GEMINI_MODEL);
    }

    #[test]
    fn empty_api_key_is_unset() {
        let cfg = from_pairs(&[("GEMINI_API_KEY", ""), ("PORT", "8080")]).unwrap();
        assert!(cfg.api_key.is_none());
        assert_eq!(cfg.port, 8080);
    }

    #[test]
    fn bad_port_is_an_error() {
        assert!(from_pairs(&[("PORT", "eighty")]).is_err());
    }

    #[test]
    fn debug_hides_keys() {
        let cfg = from_pairs(&[("GEMINI_API_KEY", "super-secret")]).unwrap();
        let dbg = format!("{cfg:?}");
        assert!(!dbg.contains("super-secret"));
        assert!(dbg.contains("api_key_set: true"));
    }
}
