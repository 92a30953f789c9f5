use kpdf::ComposerSettings;
use kpdf_storage::{DatabaseSettings, StorageSettings};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseSettings,
    pub storage: StorageSettings,
    #[serde(default)]
    pub document: ComposerSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Config {
    /// Loads the TOML file named by `KPDF_CONFIG` (or the first default location that
    /// exists) and layers `KPDF__SECTION__KEY` environment variables on top.
    pub fn load() -> Result<Self, config::ConfigError> {
        let candidates = ["config/default.toml", "crates/service/config/default.toml"];

        let mut builder = config::Config::builder();

        match std::env::var("KPDF_CONFIG") {
            Ok(path) if !path.is_empty() => {
                builder = builder.add_source(config::File::from(Path::new(&path)));
            }
            _ => {
                if let Some(path) = candidates.iter().find(|p| Path::new(p).exists()) {
                    builder = builder.add_source(config::File::from(Path::new(path)));
                }
            }
        }

        builder = builder.add_source(config::Environment::with_prefix("KPDF").separator("__"));

        let mut config: Config = builder.build()?.try_deserialize()?;
        config.apply_database_url_fallback(std::env::var("DATABASE_URL").ok());
        Ok(config)
    }

    /// Parses a configuration from TOML text alone.
    pub fn from_toml(source: &str) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()?
            .try_deserialize()
    }

    fn apply_database_url_fallback(&mut self, url: Option<String>) {
        if self.database.url.is_none() {
            self.database.url = url.filter(|u| !u.is_empty());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kpdf::{ExecutorVariants, LayoutMode};

    const MINIMAL: &str = r#"
        [server]
        host = "127.0.0.1"
        port = 3000

        [database]
        name = "kpdf"

        [storage]
        region = "ru-central1"
        bucket = "docs"
        upload_dir = "kp"
    "#;

    #[test]
    fn minimal_file_uses_defaults() {
        let config = Config::from_toml(MINIMAL).unwrap();
        assert_eq!(config.server.address(), "127.0.0.1:3000");
        assert_eq!(config.database.port, 5432);
        assert!(config.storage.force_path_style);
        assert_eq!(config.document, ComposerSettings::default());
    }

    #[test]
    fn document_section_is_read() {
        let source = format!(
            "{MINIMAL}\n[document]\ntitle = \"Offer\"\nexecutor_variants = \"every\"\nlayout_mode = \"fields\"\n"
        );
        let config = Config::from_toml(&source).unwrap();
        assert_eq!(config.document.title, "Offer");
        assert_eq!(config.document.executor_variants, ExecutorVariants::Every);
        assert_eq!(config.document.layout_mode, LayoutMode::Fields);
    }

    #[test]
    fn bundled_default_config_parses() {
        let config = Config::from_toml(include_str!("../config/default.toml")).unwrap();
        assert_eq!(config.storage.upload_dir, "kp");
        assert_eq!(config.storage.endpoint.as_deref(), Some("http://localhost:9000"));
        assert_eq!(config.document.fonts.system_families[0], "DejaVu Sans");
        assert_eq!(config.document.fonts.regular, None);
    }

    #[test]
    fn font_files_are_read() {
        let source = format!(
            "{MINIMAL}\n[document.fonts]\nregular = \"/srv/fonts/Sans.ttf\"\nbold = \"/srv/fonts/Sans-Bold.ttf\"\n"
        );
        let config = Config::from_toml(&source).unwrap();
        assert_eq!(
            config.document.fonts.regular.as_deref(),
            Some(Path::new("/srv/fonts/Sans.ttf"))
        );
        assert_eq!(
            config.document.fonts.bold.as_deref(),
            Some(Path::new("/srv/fonts/Sans-Bold.ttf"))
        );
        assert!(config.document.fonts.system_families.is_empty());
    }

    #[test]
    fn database_url_env_fills_missing_url_only() {
        let mut config = Config::from_toml(MINIMAL).unwrap();
        config.apply_database_url_fallback(Some("postgres://a@b/c".into()));
        assert_eq!(config.database.url.as_deref(), Some("postgres://a@b/c"));

        config.apply_database_url_fallback(Some("postgres://other".into()));
        assert_eq!(config.database.url.as_deref(), Some("postgres://a@b/c"));
    }
}
