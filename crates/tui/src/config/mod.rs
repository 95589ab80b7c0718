use std::num::NonZeroUsize;

use clap::Parser;
use listing::SortScope;
use serde::Deserialize;

use crate::error::Result;

const DEFAULT_CONFIG_PATH: &str = "config/pokeadmin.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: String,
    /// Prefills the login form.
    pub email: String,
    pub session_path: String,
    pub page_size: usize,
    pub sort_scope: SortScopeSetting,
    pub request_timeout_secs: u64,
    pub log_file: String,
    pub level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            email: String::new(),
            session_path: "config/session.json".to_string(),
            page_size: 5,
            sort_scope: SortScopeSetting::Page,
            request_timeout_secs: 15,
            log_file: "config/pokeadmin.log".to_string(),
            level: "info".to_string(),
        }
    }
}

impl AppConfig {
    pub fn page_size(&self) -> NonZeroUsize {
        NonZeroUsize::new(self.page_size).unwrap_or(listing::PageState::default().size())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortScopeSetting {
    #[default]
    Page,
    Filtered,
}

impl From<SortScopeSetting> for SortScope {
    fn from(value: SortScopeSetting) -> Self {
        match value {
            SortScopeSetting::Page => SortScope::Page,
            SortScopeSetting::Filtered => SortScope::Filtered,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "pokeadmin", disable_version_flag = true)]
struct Args {
    /// Optional config file path (TOML).
    #[arg(long)]
    config: Option<String>,
    /// Override base URL (e.g. http://127.0.0.1:8000).
    #[arg(long)]
    base_url: Option<String>,
    /// Prefill the login email (password is never read from CLI).
    #[arg(long)]
    email: Option<String>,
    /// Override where the signed-in user is persisted.
    #[arg(long)]
    session_path: Option<String>,
    /// Override rows per page.
    #[arg(long)]
    page_size: Option<usize>,
}

pub fn load() -> Result<AppConfig> {
    let args = Args::parse();

    let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(config::Environment::with_prefix("POKEADMIN"));
    let mut settings: AppConfig = builder.build()?.try_deserialize()?;

    if let Some(base_url) = args.base_url {
        settings.base_url = base_url;
    }
    if let Some(email) = args.email {
        settings.email = email;
    }
    if let Some(session_path) = args.session_path {
        settings.session_path = session_path;
    }
    if let Some(page_size) = args.page_size {
        settings.page_size = page_size;
    }

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_page_size_falls_back_to_default() {
        let config = AppConfig {
            page_size: 0,
            ..AppConfig::default()
        };
        assert_eq!(config.page_size().get(), 5);
    }

    #[test]
    fn toml_overrides_defaults() {
        let settings: AppConfig = config::Config::builder()
            .add_source(config::File::from_str(
                "base_url = \"http://api.test\"\npage_size = 10\nsort_scope = \"filtered\"",
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();
        assert_eq!(settings.base_url, "http://api.test");
        assert_eq!(settings.page_size().get(), 10);
        assert_eq!(SortScope::from(settings.sort_scope), SortScope::Filtered);
        assert_eq!(settings.session_path, "config/session.json");
    }
}
