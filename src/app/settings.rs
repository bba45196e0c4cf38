use serde::{Deserialize, Serialize};

#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub(super) struct AppSettings {
    pub gallery_dir: String,
    pub brush_color: String,
    pub brush_size: f32,
    pub audio_enabled: bool,
    pub background: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            gallery_dir: "gallery".to_string(),
            brush_color: "#000000".to_string(),
            brush_size: 10.0,
            audio_enabled: true,
            background: "#dcdcdc".to_string(),
        }
    }
}

pub(super) fn load_settings(path: &str) -> Option<AppSettings> {
    let s = std::fs::read_to_string(path).ok()?;
    if path.ends_with(".toml") {
        toml::from_str::<AppSettings>(&s)
            .ok()
            .or_else(|| serde_json::from_str::<AppSettings>(&s).ok())
    } else {
        serde_json::from_str::<AppSettings>(&s)
            .ok()
            .or_else(|| toml::from_str::<AppSettings>(&s).ok())
    }
}

pub(super) fn save_settings(path: &str, settings: &AppSettings) -> Result<(), String> {
    if path.ends_with(".toml") {
        let toml = toml::to_string_pretty(settings).map_err(|e| e.to_string())?;
        std::fs::write(path, toml).map_err(|e| e.to_string())
    } else {
        let json = serde_json::to_string_pretty(settings).map_err(|e| e.to_string())?;
        std::fs::write(path, json).map_err(|e| e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_round_trip_in_both_formats() {
        let dir = tempfile::tempdir().unwrap();
        let mut settings = AppSettings::default();
        settings.brush_color = "#112233".to_string();
        settings.audio_enabled = false;

        let toml_path = dir.path().join("settings.toml");
        save_settings(toml_path.to_str().unwrap(), &settings).unwrap();
        let loaded = load_settings(toml_path.to_str().unwrap()).unwrap();
        assert_eq!(loaded.brush_color, "#112233");
        assert!(!loaded.audio_enabled);

        let json_path = dir.path().join("settings.json");
        save_settings(json_path.to_str().unwrap(), &settings).unwrap();
        let loaded = load_settings(json_path.to_str().unwrap()).unwrap();
        assert_eq!(loaded.brush_color, "#112233");
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, r#"{"brush_size": 3.0}"#).unwrap();
        let loaded = load_settings(path.to_str().unwrap()).unwrap();
        assert_eq!(loaded.brush_size, 3.0);
        assert_eq!(loaded.gallery_dir, "gallery");
        assert!(loaded.audio_enabled);
    }
}
