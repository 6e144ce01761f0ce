use once_cell::sync::Lazy;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub lists: ListDefaults,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ApiConfig {
    /// Порт backend на том же хосте, что и frontend
    pub port: u16,
    /// Полный адрес API; если задан, `port` не используется
    #[serde(default)]
    pub base_url: Option<String>,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ListDefaults {
    pub page_size: usize,
    pub page_size_options: Vec<usize>,
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[api]
port = 3000

[lists]
page_size = 10
page_size_options = [10, 25, 50, 100]
"#;

/// Ключ localStorage с TOML, переопределяющим встроенную конфигурацию
const CONFIG_OVERRIDE_KEY: &str = "itam_config";

pub fn parse_config(contents: &str) -> anyhow::Result<AppConfig> {
    let config: AppConfig = toml::from_str(contents)?;
    if config.lists.page_size == 0 {
        anyhow::bail!("lists.page_size must be positive");
    }
    Ok(config)
}

/// Load configuration
///
/// Search order:
/// 1. `localStorage["itam_config"]` (для стендов и отладки)
/// 2. Falls back to embedded default config
pub fn load_config() -> anyhow::Result<AppConfig> {
    let override_toml = web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .and_then(|s| s.get_item(CONFIG_OVERRIDE_KEY).ok().flatten());

    if let Some(contents) = override_toml {
        match parse_config(&contents) {
            Ok(config) => {
                log::info!("Loading config from localStorage");
                return Ok(config);
            }
            Err(e) => log::warn!("invalid config override ignored: {}", e),
        }
    }

    parse_config(DEFAULT_CONFIG)
}

static APP_CONFIG: Lazy<AppConfig> = Lazy::new(|| {
    load_config().unwrap_or_else(|e| {
        log::error!("config load failed, using built-in values: {}", e);
        AppConfig {
            api: ApiConfig {
                port: 3000,
                base_url: None,
            },
            lists: ListDefaults {
                page_size: 10,
                page_size_options: vec![10, 25, 50, 100],
            },
        }
    })
});

pub fn app_config() -> &'static AppConfig {
    &APP_CONFIG
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config = parse_config(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.api.port, 3000);
        assert_eq!(config.api.base_url, None);
        assert_eq!(config.lists.page_size, 10);
        assert_eq!(config.lists.page_size_options, vec![10, 25, 50, 100]);
    }

    #[test]
    fn test_base_url_and_zero_page_size() {
        let config = parse_config(
            r#"
            [api]
            port = 8080
            base_url = "https://itam.example.com"

            [lists]
            page_size = 25
            page_size_options = [25, 50]
            "#,
        )
        .unwrap();
        assert_eq!(config.api.base_url.as_deref(), Some("https://itam.example.com"));

        let zero = parse_config(
            "[api]\nport = 3000\n[lists]\npage_size = 0\npage_size_options = []\n",
        );
        assert!(zero.is_err());
    }
}
