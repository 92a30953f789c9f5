use serde::Deserialize;

/// Object storage location and credentials.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    pub region: String,
    pub bucket: String,
    /// Key prefix for uploaded artifacts, without a trailing slash.
    pub upload_dir: String,
    /// Custom S3-compatible endpoint (MinIO, Yandex Object Storage, ...).
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default)]
    pub access_key_id: Option<String>,
    #[serde(default)]
    pub secret_access_key: Option<String>,
    #[serde(default = "default_true")]
    pub force_path_style: bool,
}

/// PostgreSQL connection settings. `url` wins over the individual fields.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub user: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
}

fn default_true() -> bool {
    true
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_port() -> u16 {
    5432
}

fn default_max_connections() -> u32 {
    10
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn storage_defaults_to_path_style() {
        let settings: StorageSettings = serde_json::from_value(json!({
            "region": "ru-central1",
            "bucket": "docs",
            "upload_dir": "kp"
        }))
        .unwrap();
        assert!(settings.force_path_style);
        assert!(settings.endpoint.is_none());
    }

    #[test]
    fn database_defaults() {
        let settings: DatabaseSettings = serde_json::from_value(json!({ "name": "kpdf" })).unwrap();
        assert_eq!(settings.host, "localhost");
        assert_eq!(settings.port, 5432);
        assert_eq!(settings.max_connections, 10);
        assert!(settings.url.is_none());
    }
}
