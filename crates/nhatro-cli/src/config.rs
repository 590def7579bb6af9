// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use nhatro_app::TabKind;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_VERSION: i64 = 1;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub version: i64,
    #[serde(default)]
    pub ui: Ui,
    #[serde(default)]
    pub data: Data,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            ui: Ui::default(),
            data: Data::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Ui {
    pub start_tab: Option<String>,
    pub tenants_page_size: Option<usize>,
    pub invoices_page_size: Option<usize>,
    pub activities_page_size: Option<usize>,
}

impl Default for Ui {
    fn default() -> Self {
        Self {
            start_tab: Some("buildings".to_owned()),
            tenants_page_size: Some(nhatro_app::TENANTS_PAGE_SIZE),
            invoices_page_size: Some(nhatro_app::INVOICES_PAGE_SIZE),
            activities_page_size: Some(nhatro_app::ACTIVITIES_PAGE_SIZE),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Data {
    pub seed_sample_data: Option<bool>,
}

impl Default for Data {
    fn default() -> Self {
        Self {
            seed_sample_data: Some(true),
        }
    }
}

impl Config {
    pub fn default_path() -> Result<PathBuf> {
        if let Some(path) = env::var_os("NHATRO_CONFIG_PATH") {
            return Ok(PathBuf::from(path));
        }

        let config_root = dirs::config_dir().ok_or_else(|| {
            anyhow!("cannot resolve config directory; set NHATRO_CONFIG_PATH to the config file")
        })?;

        let app_dir = config_root.join(nhatro_store::APP_NAME);
        fs::create_dir_all(&app_dir)
            .with_context(|| format!("create config directory {}", app_dir.display()))?;
        Ok(app_dir.join("config.toml"))
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        let value: toml::Value = toml::from_str(&raw)
            .with_context(|| format!("parse TOML config {}", path.display()))?;

        let version = value
            .get("version")
            .and_then(toml::Value::as_integer)
            .ok_or_else(|| {
                anyhow!(
                    "config file {} is not versioned. Add `version = 1` and move values under [ui] and [data]",
                    path.display()
                )
            })?;

        if version != CONFIG_VERSION {
            bail!(
                "unsupported config version {} in {}; expected version = 1",
                version,
                path.display()
            );
        }

        let config: Config = value
            .try_into()
            .with_context(|| format!("decode config {}", path.display()))?;
        config.validate(path)?;
        Ok(config)
    }

    fn validate(&self, path: &Path) -> Result<()> {
        for (name, value) in [
            ("ui.tenants_page_size", self.ui.tenants_page_size),
            ("ui.invoices_page_size", self.ui.invoices_page_size),
            ("ui.activities_page_size", self.ui.activities_page_size),
        ] {
            if let Some(size) = value
                && size == 0
            {
                bail!("{name} in {} must be at least 1", path.display());
            }
        }

        if let Some(raw) = &self.ui.start_tab
            && parse_start_tab(raw).is_none()
        {
            bail!(
                "ui.start_tab {raw:?} in {} is not one of: buildings, tenants, invoices, activities",
                path.display()
            );
        }

        Ok(())
    }

    pub fn start_tab(&self) -> TabKind {
        self.ui
            .start_tab
            .as_deref()
            .and_then(parse_start_tab)
            .unwrap_or(TabKind::Buildings)
    }

    pub fn tenants_page_size(&self) -> usize {
        self.ui
            .tenants_page_size
            .unwrap_or(nhatro_app::TENANTS_PAGE_SIZE)
    }

    pub fn invoices_page_size(&self) -> usize {
        self.ui
            .invoices_page_size
            .unwrap_or(nhatro_app::INVOICES_PAGE_SIZE)
    }

    pub fn activities_page_size(&self) -> usize {
        self.ui
            .activities_page_size
            .unwrap_or(nhatro_app::ACTIVITIES_PAGE_SIZE)
    }

    pub fn seed_sample_data(&self) -> bool {
        self.data.seed_sample_data.unwrap_or(true)
    }

    pub fn example_config(path: &Path) -> String {
        format!(
            "# nhatro config\n# Place this file at: {}\n\nversion = 1\n\n[ui]\n# One of: buildings, tenants, invoices, activities\nstart_tab = \"buildings\"\ntenants_page_size = {}\ninvoices_page_size = {}\nactivities_page_size = {}\n\n[data]\nseed_sample_data = true\n",
            path.display(),
            nhatro_app::TENANTS_PAGE_SIZE,
            nhatro_app::INVOICES_PAGE_SIZE,
            nhatro_app::ACTIVITIES_PAGE_SIZE,
        )
    }
}

fn parse_start_tab(raw: &str) -> Option<TabKind> {
    match raw {
        "buildings" => Some(TabKind::Buildings),
        "tenants" => Some(TabKind::Tenants),
        "invoices" => Some(TabKind::Invoices),
        "activities" => Some(TabKind::Activities),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::Config;
    use anyhow::Result;
    use nhatro_app::TabKind;
    use std::path::PathBuf;
    use std::sync::{Mutex, OnceLock};

    fn write_config(content: &str) -> Result<(tempfile::TempDir, PathBuf)> {
        let temp = tempfile::tempdir()?;
        let path = temp.path().join("config.toml");
        std::fs::write(&path, content)?;
        Ok((temp, path))
    }

    fn env_lock() -> std::sync::MutexGuard<'static, ()> {
        static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        match ENV_LOCK.get_or_init(|| Mutex::new(())).lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    #[test]
    fn missing_config_uses_defaults() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let config = Config::load(&temp.path().join("missing.toml"))?;
        assert_eq!(config.version, 1);
        assert_eq!(config.start_tab(), TabKind::Buildings);
        assert_eq!(config.tenants_page_size(), 5);
        assert_eq!(config.invoices_page_size(), 10);
        assert!(config.seed_sample_data());
        Ok(())
    }

    #[test]
    fn unversioned_config_is_rejected_with_actionable_message() -> Result<()> {
        let (_temp, path) = write_config("[ui]\ntenants_page_size = 8\n")?;
        let error = Config::load(&path).expect_err("unversioned config should fail");
        let message = error.to_string();
        assert!(message.contains("version = 1"));
        assert!(message.contains("[ui] and [data]"));
        Ok(())
    }

    #[test]
    fn unsupported_config_version_is_rejected() -> Result<()> {
        let (_temp, path) = write_config("version = 7\n")?;
        let error = Config::load(&path).expect_err("v7 config should fail");
        assert!(error.to_string().contains("unsupported config version 7"));
        Ok(())
    }

    #[test]
    fn v1_config_parses_and_overrides_defaults() -> Result<()> {
        let (_temp, path) = write_config(
            "version = 1\n[ui]\nstart_tab = \"invoices\"\ntenants_page_size = 8\n[data]\nseed_sample_data = false\n",
        )?;
        let config = Config::load(&path)?;
        assert_eq!(config.start_tab(), TabKind::Invoices);
        assert_eq!(config.tenants_page_size(), 8);
        assert_eq!(config.invoices_page_size(), 10);
        assert!(!config.seed_sample_data());
        Ok(())
    }

    #[test]
    fn malformed_config_returns_parse_error() -> Result<()> {
        let (_temp, path) = write_config("{{not toml")?;
        let error = Config::load(&path).expect_err("malformed config should fail");
        assert!(error.to_string().contains("parse TOML config"));
        Ok(())
    }

    #[test]
    fn zero_page_size_is_rejected() -> Result<()> {
        let (_temp, path) = write_config("version = 1\n[ui]\ninvoices_page_size = 0\n")?;
        let error = Config::load(&path).expect_err("zero page size should fail");
        assert!(error.to_string().contains("must be at least 1"));
        Ok(())
    }

    #[test]
    fn unknown_start_tab_is_rejected() -> Result<()> {
        let (_temp, path) = write_config("version = 1\n[ui]\nstart_tab = \"dashboard\"\n")?;
        let error = Config::load(&path).expect_err("unknown start tab should fail");
        assert!(error.to_string().contains("start_tab"));
        Ok(())
    }

    #[test]
    fn default_path_honors_env_override() -> Result<()> {
        let _guard = env_lock();
        let temp = tempfile::tempdir()?;
        let override_path = temp.path().join("custom-config.toml");
        // SAFETY: test-only process-local env mutation.
        unsafe {
            std::env::set_var("NHATRO_CONFIG_PATH", &override_path);
        }
        let resolved = Config::default_path()?;
        // SAFETY: test cleanup for process-local env mutation.
        unsafe {
            std::env::remove_var("NHATRO_CONFIG_PATH");
        }
        assert_eq!(resolved, override_path);
        Ok(())
    }

    #[test]
    fn default_path_uses_config_toml_suffix_when_no_env_override() -> Result<()> {
        let _guard = env_lock();
        // SAFETY: test-only process-local env mutation.
        unsafe {
            std::env::remove_var("NHATRO_CONFIG_PATH");
        }
        let path = Config::default_path()?;
        assert!(path.ends_with("config.toml"));
        Ok(())
    }

    #[test]
    fn example_config_includes_required_sections() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let path = temp.path().join("config.toml");
        let example = Config::example_config(&path);
        assert!(example.contains("version = 1"));
        assert!(example.contains("[ui]"));
        assert!(example.contains("[data]"));

        let written = temp.path().join("written.toml");
        std::fs::write(&written, example)?;
        let config = Config::load(&written)?;
        assert_eq!(config.tenants_page_size(), 5);
        Ok(())
    }
}
