use anyhow::anyhow;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api";
pub const DEFAULT_TIME_ZONE: Tz = chrono_tz::Asia::Kolkata;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RuntimeConfig {
    #[serde(default, alias = "API_BASE_URL")]
    pub api_base_url: Option<String>,
    #[serde(default, alias = "TIME_ZONE", alias = "time_zone")]
    pub display_time_zone: Option<String>,
}

impl RuntimeConfig {
    fn merge(self, fallback: RuntimeConfig) -> RuntimeConfig {
        RuntimeConfig {
            api_base_url: self.api_base_url.or(fallback.api_base_url),
            display_time_zone: self.display_time_zone.or(fallback.display_time_zone),
        }
    }
}

static API_BASE_URL: OnceLock<String> = OnceLock::new();
static TIME_ZONE: OnceLock<Tz> = OnceLock::new();

pub fn parse_time_zone(raw: Option<&str>) -> Tz {
    raw.map(str::trim)
        .filter(|name| !name.is_empty())
        .and_then(|name| match name.parse::<Tz>() {
            Ok(tz) => Some(tz),
            Err(_) => {
                log::warn!("unknown time zone {:?}, using {}", name, DEFAULT_TIME_ZONE);
                None
            }
        })
        .unwrap_or(DEFAULT_TIME_ZONE)
}

pub fn normalize_base_url(raw: &str) -> Option<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
mod globals {
    use super::RuntimeConfig;

    fn read_key(obj: &wasm_bindgen::JsValue, keys: &[&str]) -> Option<String> {
        keys.iter().find_map(|key| {
            js_sys::Reflect::get(obj, &(*key).into())
                .ok()
                .filter(|v| !v.is_undefined() && !v.is_null())
                .and_then(|v| v.as_string())
        })
    }

    fn read_global(name: &str) -> Option<RuntimeConfig> {
        let window = web_sys::window()?;
        let any = js_sys::Reflect::get(&window, &name.into()).ok()?;
        if any.is_undefined() || any.is_null() {
            return None;
        }
        Some(RuntimeConfig {
            api_base_url: read_key(&any, &["API_BASE_URL", "api_base_url"]),
            display_time_zone: read_key(&any, &["TIME_ZONE", "time_zone", "display_time_zone"]),
        })
    }

    /// `window.__EMS_ENV` wins over `window.__EMS_CONFIG`.
    pub fn snapshot() -> RuntimeConfig {
        let env = read_global("__EMS_ENV").unwrap_or_default();
        let cfg = read_global("__EMS_CONFIG").unwrap_or_default();
        env.merge(cfg)
    }

    pub fn write_config(cfg: &RuntimeConfig) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let obj = js_sys::Object::new();
        if let Some(url) = &cfg.api_base_url {
            let _ = js_sys::Reflect::set(&obj, &"api_base_url".into(), &url.as_str().into());
        }
        if let Some(tz) = &cfg.display_time_zone {
            let _ = js_sys::Reflect::set(&obj, &"time_zone".into(), &tz.as_str().into());
        }
        let _ = js_sys::Reflect::set(&window, &"__EMS_CONFIG".into(), &obj);
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod globals {
    use super::RuntimeConfig;

    pub fn snapshot() -> RuntimeConfig {
        RuntimeConfig::default()
    }

    pub fn write_config(_cfg: &RuntimeConfig) {}
}

#[cfg(target_arch = "wasm32")]
async fn fetch_runtime_config() -> anyhow::Result<RuntimeConfig> {
    use anyhow::Context;

    let origin = web_sys::window()
        .and_then(|w| w.location().origin().ok())
        .ok_or_else(|| anyhow!("no window origin"))?;
    let resp = reqwest::get(format!("{}/config.json", origin))
        .await
        .context("requesting config.json")?;
    if !resp.status().is_success() {
        return Err(anyhow!("config.json returned {}", resp.status()));
    }
    resp.json::<RuntimeConfig>()
        .await
        .context("parsing config.json")
}

#[cfg(not(target_arch = "wasm32"))]
async fn fetch_runtime_config() -> anyhow::Result<RuntimeConfig> {
    Err(anyhow!("config.json is only served to the browser"))
}

fn cache(cfg: &RuntimeConfig) -> String {
    let tz = parse_time_zone(cfg.display_time_zone.as_deref());
    let _ = TIME_ZONE.set(tz);
    let url = cfg
        .api_base_url
        .as_deref()
        .and_then(normalize_base_url)
        .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());
    API_BASE_URL.get_or_init(|| url).clone()
}

/// Resolves the API base URL once: page globals, then `config.json`, then the default.
pub async fn await_api_base_url() -> String {
    if let Some(cached) = API_BASE_URL.get() {
        return cached.clone();
    }
    let snapshot = globals::snapshot();
    if snapshot.api_base_url.is_some() {
        return cache(&snapshot);
    }
    match fetch_runtime_config().await {
        Ok(fetched) => {
            globals::write_config(&fetched);
            cache(&snapshot.merge(fetched))
        }
        Err(err) => {
            log::debug!("runtime config unavailable: {:#}", err);
            cache(&snapshot)
        }
    }
}

pub fn display_time_zone() -> Tz {
    *TIME_ZONE.get_or_init(|| parse_time_zone(globals::snapshot().display_time_zone.as_deref()))
}

pub async fn init() {
    let url = await_api_base_url().await;
    log::info!("api base url: {}, display zone: {}", url, display_time_zone());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_or_missing_zones_fall_back_to_default() {
        assert_eq!(parse_time_zone(None), DEFAULT_TIME_ZONE);
        assert_eq!(parse_time_zone(Some("Mars/Olympus")), DEFAULT_TIME_ZONE);
        assert_eq!(parse_time_zone(Some("Europe/Berlin")), chrono_tz::Europe::Berlin);
    }

    #[test]
    fn base_urls_lose_trailing_slashes() {
        assert_eq!(
            normalize_base_url("https://ems.example.com/api/ "),
            Some("https://ems.example.com/api".into())
        );
        assert_eq!(normalize_base_url("  "), None);
    }

    #[test]
    fn env_values_take_precedence_over_config_values() {
        let env = RuntimeConfig {
            api_base_url: Some("https://env".into()),
            display_time_zone: None,
        };
        let cfg = RuntimeConfig {
            api_base_url: Some("https://cfg".into()),
            display_time_zone: Some("UTC".into()),
        };
        let merged = env.merge(cfg);
        assert_eq!(merged.api_base_url.as_deref(), Some("https://env"));
        assert_eq!(merged.display_time_zone.as_deref(), Some("UTC"));
    }

    #[test]
    fn config_json_accepts_upper_case_keys() {
        let cfg: RuntimeConfig =
            serde_json::from_str(r#"{"API_BASE_URL":"https://x/api","TIME_ZONE":"UTC"}"#).unwrap();
        assert_eq!(cfg.api_base_url.as_deref(), Some("https://x/api"));
        assert_eq!(cfg.display_time_zone.as_deref(), Some("UTC"));
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[tokio::test]
    async fn host_resolution_uses_default_base_url() {
        assert_eq!(await_api_base_url().await, DEFAULT_API_BASE_URL);
        assert_eq!(display_time_zone(), DEFAULT_TIME_ZONE);
    }
}
