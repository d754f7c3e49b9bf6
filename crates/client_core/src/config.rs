use std::{collections::HashMap, fs, path::Path, time::Duration};

use url::Url;

use crate::error::ClientError;

pub const DEFAULT_SETTINGS_FILE: &str = "gympoint.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub api_url: String,
    pub per_page: u32,
    pub request_timeout_secs: u64,
    /// Jump back to the first page when a new filter is submitted.
    pub reset_page_on_filter: bool,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:3333".into(),
            per_page: 7,
            request_timeout_secs: 10,
            reset_page_on_filter: false,
        }
    }
}

impl ClientSettings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    pub fn with_api_url(mut self, api_url: Option<String>) -> Self {
        if let Some(api_url) = api_url {
            self.api_url = api_url;
        }
        self
    }

    /// Normalized base url without a trailing slash.
    pub fn validated_api_url(&self) -> Result<String, ClientError> {
        let raw = self.api_url.trim();
        let parsed = Url::parse(raw)
            .map_err(|err| ClientError::Config(format!("api url '{raw}' is not valid: {err}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ClientError::Config(format!(
                "api url '{raw}' must use http or https"
            )));
        }
        Ok(raw.trim_end_matches('/').to_string())
    }
}

pub fn load_settings() -> ClientSettings {
    load_settings_from(Path::new(DEFAULT_SETTINGS_FILE))
}

pub fn load_settings_from(path: &Path) -> ClientSettings {
    let mut settings = ClientSettings::default();

    if let Ok(raw) = fs::read_to_string(path) {
        match file_values(&raw) {
            Ok(file_cfg) => apply_overrides(&mut settings, |key| file_cfg.get(key).cloned()),
            Err(err) => {
                tracing::warn!(path = %path.display(), "ignoring unreadable settings file: {err}")
            }
        }
    }

    if let Ok(v) = std::env::var("GYMPOINT_API_URL") {
        settings.api_url = v;
    }
    apply_overrides(&mut settings, |key| {
        std::env::var(format!("APP__{}", key.to_ascii_uppercase())).ok()
    });

    settings
}

/// Flattens the top-level table so `per_page = 7` and `per_page = "7"` read
/// the same.
fn file_values(raw: &str) -> Result<HashMap<String, String>, toml::de::Error> {
    let table = toml::from_str::<HashMap<String, toml::Value>>(raw)?;
    Ok(table
        .into_iter()
        .map(|(key, value)| {
            let value = match value {
                toml::Value::String(text) => text,
                other => other.to_string(),
            };
            (key, value)
        })
        .collect())
}

fn apply_overrides(settings: &mut ClientSettings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = lookup("api_url") {
        settings.api_url = v;
    }
    if let Some(v) = lookup("per_page") {
        match v.trim().parse::<u32>() {
            Ok(parsed) if parsed > 0 => settings.per_page = parsed,
            _ => tracing::warn!(value = %v, "ignoring invalid per_page setting"),
        }
    }
    if let Some(v) = lookup("request_timeout_secs") {
        if let Ok(parsed) = v.trim().parse::<u64>() {
            settings.request_timeout_secs = parsed;
        }
    }
    if let Some(v) = lookup("reset_page_on_filter") {
        if let Ok(parsed) = v.trim().parse::<bool>() {
            settings.reset_page_on_filter = parsed;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::{SystemTime, UNIX_EPOCH};

    use super::*;

    fn temp_settings_path(name: &str) -> std::path::PathBuf {
        let suffix = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock")
            .as_nanos();
        std::env::temp_dir().join(format!("gympoint_{name}_{suffix}.toml"))
    }

    #[test]
    fn settings_file_overrides_defaults() {
        let path = temp_settings_path("valid");
        fs::write(
            &path,
            "api_url = \"http://gym.local:3333\"\nper_page = 20\nreset_page_on_filter = true\n",
        )
        .expect("write settings");

        let settings = load_settings_from(&path);
        fs::remove_file(&path).expect("cleanup");

        assert_eq!(settings.per_page, 20);
        assert!(settings.reset_page_on_filter);
        assert_eq!(settings.request_timeout_secs, 10);
        if std::env::var_os("GYMPOINT_API_URL").is_none()
            && std::env::var_os("APP__API_URL").is_none()
        {
            assert_eq!(settings.api_url, "http://gym.local:3333");
        }
    }

    #[test]
    fn malformed_settings_file_keeps_defaults() {
        let path = temp_settings_path("malformed");
        fs::write(&path, "per_page = [").expect("write settings");

        let settings = load_settings_from(&path);
        fs::remove_file(&path).expect("cleanup");

        if std::env::var_os("APP__PER_PAGE").is_none() {
            assert_eq!(settings.per_page, 7);
        }
    }

    #[test]
    fn zero_per_page_is_ignored() {
        let mut settings = ClientSettings::default();
        apply_overrides(&mut settings, |key| (key == "per_page").then(|| "0".to_string()));
        assert_eq!(settings.per_page, 7);
    }

    #[test]
    fn validates_and_trims_api_url() {
        let settings = ClientSettings::default().with_api_url(Some("https://api.gym.com/".into()));
        assert_eq!(
            settings.validated_api_url().expect("valid"),
            "https://api.gym.com"
        );

        let bad = ClientSettings::default().with_api_url(Some("ftp://gym".into()));
        assert!(matches!(
            bad.validated_api_url(),
            Err(ClientError::Config(_))
        ));
    }
}
