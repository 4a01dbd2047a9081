use serde::{
    Deserialize,
    Serialize,
};

use crate::core::http::DEFAULT_TIMEOUT_SECS;

pub const SETTINGS_FILE: &str = "settings.json";

const SHEET_ID_ENV: &str = "HANZIDECK_SHEET_ID";
const UPDATE_URL_ENV: &str = "HANZIDECK_UPDATE_URL";
const PLACEHOLDER_MARKERS: [&str; 4] = ["YOUR_", "PASTE_", "REPLACE", "<"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeckSettings {
    pub sheet_id: String,
    pub update_url: String,
    pub request_timeout_secs: u64,
    pub font_path: Option<String>, // A CJK-capable font; egui's defaults have no hanzi
    pub dark_mode: bool,
}

impl Default for DeckSettings {
    fn default() -> Self {
        Self {
            sheet_id: String::new(),
            update_url: String::new(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
            font_path: None,
            dark_mode: true,
        }
    }
}

impl DeckSettings {
    /// Environment variables win over whatever was saved to disk.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(sheet_id) = std::env::var(SHEET_ID_ENV) {
            self.sheet_id = sheet_id;
        }
        if let Ok(update_url) = std::env::var(UPDATE_URL_ENV) {
            self.update_url = update_url;
        }
        self
    }

    pub fn has_sheet(&self) -> bool {
        !self.sheet_id.trim().is_empty()
    }

    /// The update endpoint, or `None` if it is missing or still a placeholder.
    pub fn update_endpoint(&self) -> Option<&str> {
        let url = self.update_url.trim();
        if url.is_empty() || !(url.starts_with("https://") || url.starts_with("http://")) {
            return None;
        }
        if PLACEHOLDER_MARKERS.iter().any(|marker| url.contains(marker)) {
            return None;
        }
        Some(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_url(url: &str) -> DeckSettings {
        DeckSettings { update_url: url.to_string(), ..DeckSettings::default() }
    }

    #[test]
    fn placeholder_endpoints_are_unconfigured() {
        assert_eq!(with_url("").update_endpoint(), None);
        assert_eq!(with_url("   ").update_endpoint(), None);
        assert_eq!(with_url("YOUR_APPS_SCRIPT_URL").update_endpoint(), None);
        assert_eq!(
            with_url("https://script.google.com/macros/s/PASTE_DEPLOYMENT_ID/exec")
                .update_endpoint(),
            None
        );
        assert_eq!(with_url("ftp://example.com/exec").update_endpoint(), None);
    }

    #[test]
    fn real_endpoint_is_trimmed() {
        let settings = with_url(" https://script.google.com/macros/s/AKfy123/exec ");
        assert_eq!(
            settings.update_endpoint(),
            Some("https://script.google.com/macros/s/AKfy123/exec")
        );
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let settings: DeckSettings = serde_json::from_str(r#"{ "sheet_id": "abc" }"#).unwrap();
        assert_eq!(settings.sheet_id, "abc");
        assert_eq!(settings.request_timeout_secs, DEFAULT_TIMEOUT_SECS);
        assert!(settings.dark_mode);
        assert!(settings.has_sheet());
    }
}
