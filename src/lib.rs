//! Desktop client for the CineAI / FlickFinder movie recommendation API
//!
//! Both front ends run the same code; the binary picks a [`Brand`].

pub mod api;
pub mod app;
pub mod brand;
pub mod constants;
pub mod db;
pub mod logging;
pub mod session;
pub mod settings;
pub mod theme;
pub mod types;
pub mod ui;
pub mod utils;

pub use brand::Brand;

use app::App;
use constants::APP_VERSION;
use db::Database;
use eframe::egui;
use settings::Settings;
use std::path::PathBuf;
use tracing::{error, info};

/// Open client storage, resolve the session, and run the window until closed.
pub fn run(brand: Brand) -> eframe::Result<()> {
    let data_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(brand.data_dir_name());

    std::fs::create_dir_all(&data_dir).ok();

    // Initialize logging - guard must live for entire app lifetime
    let _log_guard = logging::init_logging(&data_dir, brand);

    info!(version = APP_VERSION, brand = brand.display_name(), "Starting");

    let db_path = data_dir.join("storage.db");
    let db = Database::open(&db_path)
        .or_else(|e| {
            error!(error = %e, path = %db_path.display(), "Failed to open client storage, session will not persist");
            Database::open_in_memory()
        })
        .map_err(|e| eframe::Error::AppCreation(Box::new(e)))?;

    let session_id = session::load_or_create(&db, brand);
    drop(db);

    let settings = Settings::load(&data_dir);
    let win_pos = match (settings.window_x, settings.window_y) {
        (Some(x), Some(y)) => Some(egui::pos2(x, y)),
        _ => None,
    };
    let win_size = match (settings.window_w, settings.window_h) {
        (Some(w), Some(h)) => Some(egui::vec2(w, h)),
        _ => None,
    };

    let mut viewport = egui::ViewportBuilder::default()
        .with_inner_size(win_size.unwrap_or(egui::vec2(1200.0, 820.0)))
        .with_min_inner_size([900.0, 600.0])
        .with_title(brand.display_name());

    if let Some((rgba, width, height)) = utils::rasterize_logo(brand, 64) {
        viewport = viewport.with_icon(std::sync::Arc::new(egui::IconData { rgba, width, height }));
    }

    let needs_center = win_pos.is_none();
    if let Some(pos) = win_pos {
        viewport = viewport.with_position(pos);
    }

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        brand.display_name(),
        options,
        Box::new(move |cc| {
            let mut app = App::new(cc, brand, session_id, settings, data_dir)?;
            app.needs_center = needs_center;
            Ok(Box::new(app))
        }),
    )
}
