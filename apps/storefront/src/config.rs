use std::{collections::HashMap, fs, path::Path};

use serde::Deserialize;

pub const CONFIG_FILE: &str = "storefront.toml";

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Settings {
    pub database_url: String,
    pub catalog_path: String,
    pub checkout_base_url: String,
    pub auth_token: Option<String>,
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database_url: "sqlite://./data/storefront.db".into(),
            catalog_path: "./catalog.json".into(),
            checkout_base_url: "http://localhost:3001".into(),
            auth_token: None,
            log_filter: "info".into(),
        }
    }
}

pub fn load_settings() -> Settings {
    let mut settings = Settings::default();
    apply_file(&mut settings, Path::new(CONFIG_FILE));
    apply_env(&mut settings, |key| std::env::var(key).ok());
    settings.database_url = normalize_database_url(&settings.database_url);
    settings
}

fn apply_file(settings: &mut Settings, path: &Path) {
    let Ok(raw) = fs::read_to_string(path) else {
        return;
    };
    if let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(&raw) {
        apply_overrides(settings, |key| file_cfg.get(key).cloned());
    }
}

fn apply_env(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    // APP__ wins over STOREFRONT_ when both are set.
    apply_overrides(settings, |key| {
        let key = key.to_ascii_uppercase();
        lookup(&format!("APP__{key}")).or_else(|| lookup(&format!("STOREFRONT_{key}")))
    });
}

fn apply_overrides(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = lookup("database_url") {
        settings.database_url = v;
    }
    if let Some(v) = lookup("catalog_path") {
        settings.catalog_path = v;
    }
    if let Some(v) = lookup("checkout_base_url") {
        settings.checkout_base_url = v.trim_end_matches('/').to_string();
    }
    if let Some(v) = lookup("auth_token") {
        settings.auth_token = Some(v).filter(|token| !token.trim().is_empty());
    }
    if let Some(v) = lookup("log_filter") {
        settings.log_filter = v;
    }
}

fn normalize_database_url(raw_database_url: &str) -> String {
    let raw_database_url = raw_database_url.trim();

    if raw_database_url.is_empty() {
        return Settings::default().database_url;
    }

    if raw_database_url.starts_with("sqlite::memory:")
        || raw_database_url.starts_with("sqlite://")
        || raw_database_url.contains("://")
    {
        return raw_database_url.to_string();
    }

    if let Some(path) = raw_database_url.strip_prefix("sqlite:") {
        let path = path.replace('\\', "/");
        return format!("sqlite://{path}");
    }

    format!("sqlite://{}", raw_database_url.replace('\\', "/"))
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
