use eframe::egui;

mod color_wheel;
mod settings;
mod update;

use crate::audio::CpalToneEngine;
use crate::gallery::{self, DirGallery, Gallery as _};
use crate::model::{Brush, Rgb};
use crate::store::StrokeStore;
use crate::tone::{NullToneEngine, ToneEngine, ToneMapper};

pub struct SoundBrushApp {
    store: StrokeStore,
    brush: Brush,
    wheel: color_wheel::ColorWheel,
    tones: ToneMapper,
    gallery: DirGallery,
    gallery_names: Vec<String>,
    background: Rgb,
    audio_enabled: bool,
    gallery_dir: String,
    settings_path: String,
    last_sample: Option<egui::Pos2>,
    status: Option<String>,
}

impl SoundBrushApp {
    fn config_path() -> Option<String> {
        if let Some(home) = std::env::var_os("HOME") {
            let path = std::path::PathBuf::from(home)
                .join(".config")
                .join("soundbrush.toml");
            if path.exists() {
                return Some(path.display().to_string());
            }
        }
        if std::path::Path::new("settings.toml").exists() {
            return Some("settings.toml".to_string());
        }
        None
    }

    fn make_engine(audio_enabled: bool) -> Box<dyn ToneEngine> {
        if audio_enabled {
            Box::new(CpalToneEngine::new())
        } else {
            Box::new(NullToneEngine)
        }
    }

    pub fn new(_cc: &eframe::CreationContext<'_>) -> Self {
        let settings_path = Self::config_path().unwrap_or_else(|| "settings.toml".to_string());
        let settings = settings::load_settings(&settings_path)
            .or_else(|| settings::load_settings("settings.json"))
            .unwrap_or_default();

        let brush = Brush {
            color: Rgb::from_hex(&settings.brush_color).unwrap_or_default(),
            size: settings.brush_size,
        };
        let background = Rgb::from_hex(&settings.background).unwrap_or(Rgb {
            r: 220,
            g: 220,
            b: 220,
        });
        let gallery = DirGallery::new(&settings.gallery_dir);
        let gallery_names = gallery.list().unwrap_or_default();

        Self {
            store: StrokeStore::new(),
            brush,
            wheel: color_wheel::ColorWheel::new(brush.color),
            tones: ToneMapper::new(Self::make_engine(settings.audio_enabled)),
            gallery,
            gallery_names,
            background,
            audio_enabled: settings.audio_enabled,
            gallery_dir: settings.gallery_dir,
            settings_path,
            last_sample: None,
            status: None,
        }
    }

    fn settings_snapshot(&self) -> settings::AppSettings {
        settings::AppSettings {
            gallery_dir: self.gallery_dir.clone(),
            brush_color: self.brush.color.to_hex(),
            brush_size: self.brush.size,
            audio_enabled: self.audio_enabled,
            background: self.background.to_hex(),
        }
    }

    fn persist_settings(&mut self) {
        let snapshot = self.settings_snapshot();
        if let Err(e) = settings::save_settings(&self.settings_path, &snapshot) {
            self.status = Some(format!("Settings save failed: {e}"));
        }
    }

    fn set_audio_enabled(&mut self, enabled: bool) {
        self.audio_enabled = enabled;
        self.tones = ToneMapper::new(Self::make_engine(enabled));
        self.persist_settings();
    }

    fn refresh_gallery(&mut self) {
        match self.gallery.list() {
            Ok(names) => self.gallery_names = names,
            Err(e) => {
                log::warn!("gallery listing failed: {e}");
                self.status = Some(format!("Gallery unavailable: {e}"));
            }
        }
    }

    fn save_drawing(&mut self) {
        let record = self.store.serialize(&gallery::timestamp_name());
        match self.gallery.save(&record) {
            Ok(name) => {
                self.status = Some(format!("Saved {name}"));
                self.refresh_gallery();
            }
            Err(e) => {
                log::warn!("save failed: {e}");
                self.status = Some(format!("Save failed: {e}"));
            }
        }
    }

    fn load_drawing(&mut self, name: &str) {
        match self.gallery.fetch(name) {
            Ok(record) => {
                self.store.load(record);
                self.status = Some(format!("Loaded {name}"));
            }
            Err(e) => {
                // Current history stays untouched when a record is bad.
                log::warn!("load of {name:?} failed: {e}");
                self.status = Some(format!("Load failed: {e}"));
            }
        }
    }
}
