mod app;
mod audio;
mod color;
mod gallery;
mod model;
mod render;
mod store;
mod tone;

fn main() -> eframe::Result<()> {
    env_logger::init();
    let native_options = eframe::NativeOptions::default();
    eframe::run_native(
        "SoundBrush",
        native_options,
        Box::new(|cc| Ok(Box::new(app::SoundBrushApp::new(cc)))),
    )
}
