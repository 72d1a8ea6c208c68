use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use crate::state::session::AdminCachePolicy;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuntimeConfig {
    pub api_base_url: Option<String>,
    #[serde(default)]
    pub clear_admin_caches_on_logout: Option<bool>,
}

impl RuntimeConfig {
    /// True when no source set any field.
    pub fn is_empty(&self) -> bool {
        self.api_base_url.is_none() && self.clear_admin_caches_on_logout.is_none()
    }
}

static RUNTIME_CONFIG: OnceLock<RuntimeConfig> = OnceLock::new();

#[cfg(target_arch = "wasm32")]
fn read_global(name: &str) -> Option<RuntimeConfig> {
    // window.__BANKLINE_ENV = { API_BASE_URL: "...", CLEAR_ADMIN_CACHES_ON_LOGOUT: true }
    let w = web_sys::window()?;
    let any = js_sys::Reflect::get(&w, &name.into()).ok()?;
    if any.is_undefined() || any.is_null() {
        return None;
    }
    let obj = js_sys::Object::from(any);
    let lookup = |upper: &str, lower: &str| {
        js_sys::Reflect::get(&obj, &upper.into())
            .ok()
            .filter(|v| !v.is_undefined() && !v.is_null())
            .or_else(|| js_sys::Reflect::get(&obj, &lower.into()).ok())
            .filter(|v| !v.is_undefined() && !v.is_null())
    };
    let api_base_url = lookup("API_BASE_URL", "api_base_url").and_then(|v| v.as_string());
    let clear_admin_caches_on_logout = lookup(
        "CLEAR_ADMIN_CACHES_ON_LOGOUT",
        "clear_admin_caches_on_logout",
    )
    .and_then(|v| v.as_bool());
    let cfg = RuntimeConfig {
        api_base_url,
        clear_admin_caches_on_logout,
    };
    (!cfg.is_empty()).then_some(cfg)
}

#[cfg(target_arch = "wasm32")]
fn snapshot_from_globals() -> Option<RuntimeConfig> {
    read_global("__BANKLINE_ENV").or_else(|| read_global("__BANKLINE_CONFIG"))
}

#[cfg(not(target_arch = "wasm32"))]
fn snapshot_from_globals() -> Option<RuntimeConfig> {
    None
}

#[cfg(target_arch = "wasm32")]
async fn fetch_runtime_config() -> Option<RuntimeConfig> {
    let origin = web_sys::window()?.location().origin().ok()?;
    let resp = reqwest::get(format!("{}/config.json", origin)).await.ok()?;
    if !resp.status().is_success() {
        return None;
    }
    resp.json::<RuntimeConfig>().await.ok()
}

#[cfg(not(target_arch = "wasm32"))]
async fn fetch_runtime_config() -> Option<RuntimeConfig> {
    None
}

fn cache(cfg: RuntimeConfig) -> &'static RuntimeConfig {
    RUNTIME_CONFIG.get_or_init(|| cfg)
}

pub async fn await_runtime_config() -> &'static RuntimeConfig {
    if let Some(cached) = RUNTIME_CONFIG.get() {
        return cached;
    }
    if let Some(existing) = snapshot_from_globals() {
        return cache(existing);
    }
    if let Some(cfg) = fetch_runtime_config().await {
        if cfg.api_base_url.is_none() {
            log::warn!("config.json has no api_base_url, using default");
        }
        if !cfg.is_empty() {
            return cache(cfg);
        }
    }
    cache(RuntimeConfig::default())
}

pub async fn await_api_base_url() -> String {
    await_runtime_config()
        .await
        .api_base_url
        .clone()
        .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string())
}

/// Admin cache policy from the resolved config; `Retain` until the config is
/// loaded or when it says nothing.
pub fn admin_cache_policy() -> AdminCachePolicy {
    policy_from(RUNTIME_CONFIG.get())
}

fn policy_from(cfg: Option<&RuntimeConfig>) -> AdminCachePolicy {
    match cfg.and_then(|c| c.clear_admin_caches_on_logout) {
        Some(true) => AdminCachePolicy::ClearOnLogout,
        _ => AdminCachePolicy::Retain,
    }
}

pub async fn init() {
    let cfg = await_runtime_config().await;
    log::info!(
        "runtime config resolved (api_base_url = {})",
        cfg.api_base_url.as_deref().unwrap_or(DEFAULT_API_BASE_URL)
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runtime_config_parses_partial_json() {
        let cfg: RuntimeConfig =
            serde_json::from_str(r#"{"api_base_url":"https://bank.example/api"}"#).unwrap();
        assert_eq!(cfg.api_base_url.as_deref(), Some("https://bank.example/api"));
        assert!(cfg.clear_admin_caches_on_logout.is_none());
    }

    #[test]
    fn policy_alone_counts_as_configuration() {
        let cfg: RuntimeConfig =
            serde_json::from_str(r#"{"clear_admin_caches_on_logout":true}"#).unwrap();
        assert!(!cfg.is_empty());
        assert!(cfg.api_base_url.is_none());
        assert_eq!(policy_from(Some(&cfg)), AdminCachePolicy::ClearOnLogout);
        assert!(RuntimeConfig::default().is_empty());
    }

    #[test]
    fn admin_policy_defaults_to_retain() {
        assert_eq!(policy_from(None), AdminCachePolicy::Retain);
        assert_eq!(
            policy_from(Some(&RuntimeConfig::default())),
            AdminCachePolicy::Retain
        );
        let clearing = RuntimeConfig {
            api_base_url: None,
            clear_admin_caches_on_logout: Some(true),
        };
        assert_eq!(
            policy_from(Some(&clearing)),
            AdminCachePolicy::ClearOnLogout
        );
    }
}
