//! App module - contains the main application state and the frame loop

mod controller;
mod modals;
mod requests;
mod state;
mod views;

pub use controller::Controller;
pub use requests::{ApiEvent, Requests};
pub use state::{preference_from, BackendStatus, Command, ViewState};

use crate::api::HttpApi;
use crate::brand::Brand;
use crate::settings::Settings;
use crate::theme;
use eframe::egui;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

// ============================================================================
// APP STATE
// ============================================================================

pub struct App {
    pub(crate) brand: Brand,
    pub(crate) controller: Controller,
    pub(crate) settings: Settings,
    pub(crate) data_dir: PathBuf,
    pub(crate) logo_texture: Option<egui::TextureHandle>,
    pub(crate) window_pos: Option<egui::Pos2>,
    pub(crate) window_size: Option<egui::Vec2>,
    pub(crate) needs_center: bool,
    pub(crate) started: bool,
}

// ============================================================================
// APP INITIALIZATION & HELPERS
// ============================================================================

impl App {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        brand: Brand,
        session_id: String,
        settings: Settings,
        data_dir: PathBuf,
    ) -> std::io::Result<Self> {
        // Force dark theme
        cc.egui_ctx.set_theme(egui::Theme::Dark);

        // Add Phosphor icons font
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        theme::apply_visuals(&cc.egui_ctx, brand);

        let api_base_url = settings.api_base_url_or_default();
        info!(api = %api_base_url, session_id = %session_id, "Backend configured");

        let api = Arc::new(HttpApi::new(api_base_url.clone()));
        let requests = Requests::new(api, session_id.clone(), settings.history_limit)?
            .with_repaint(cc.egui_ctx.clone());
        let state = ViewState::new(session_id, api_base_url);

        Ok(Self {
            brand,
            controller: Controller::new(state, requests),
            settings,
            data_dir,
            logo_texture: None,
            window_pos: None,
            window_size: None,
            needs_center: false,
            started: false,
        })
    }

    pub fn save_settings(&mut self) {
        self.settings.window_x = self.window_pos.map(|p| p.x);
        self.settings.window_y = self.window_pos.map(|p| p.y);
        self.settings.window_w = self.window_size.map(|s| s.x);
        self.settings.window_h = self.window_size.map(|s| s.y);
        self.settings.save(&self.data_dir);
    }
}

// ============================================================================
// MAIN UPDATE LOOP
// ============================================================================

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Track window position/size for saving on exit
        ctx.input(|i| {
            if let Some(rect) = i.viewport().outer_rect {
                self.window_pos = Some(rect.min);
            }
            if let Some(rect) = i.viewport().inner_rect {
                self.window_size = Some(rect.size());
            }
        });

        // Health check + history load on first frame
        if !self.started {
            self.started = true;
            self.controller.start();
        }

        // Center window on first launch
        if self.needs_center {
            self.needs_center = false;
            if let Some(cmd) = egui::ViewportCommand::center_on_screen(ctx) {
                ctx.send_viewport_cmd(cmd);
            }
        }

        let now = Instant::now();
        self.controller.pump(now);
        if let Some(deadline) = self.controller.state.success_deadline() {
            ctx.request_repaint_after(deadline.saturating_duration_since(now));
        }

        // Ctrl+Enter submits from anywhere
        if !self.controller.state.loading
            && ctx.input_mut(|i| i.consume_key(egui::Modifiers::COMMAND, egui::Key::Enter))
        {
            self.controller.submit();
        }

        self.render_clear_history_modal(ctx);

        // Left sidebar (must be added BEFORE CentralPanel)
        egui::SidePanel::left("brand_panel")
            .exact_width(theme::SIDEBAR_WIDTH)
            .resizable(false)
            .show_separator_line(false)
            .frame(theme::sidebar_frame())
            .show(ctx, |ui| self.render_sidebar(ui, ctx));

        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(theme::BG_BASE).inner_margin(egui::Margin::same(24)))
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        ui.vertical_centered(|ui| {
                            ui.set_max_width(theme::CONTENT_MAX_WIDTH);
                            ui.with_layout(egui::Layout::top_down(egui::Align::Min), |ui| {
                                self.render_search_card(ui);
                                ui.add_space(theme::SPACING_LG);
                                self.render_messages(ui);
                                self.render_history_panel(ui);
                                self.render_analytics_panel(ui);
                                self.render_results(ui, ctx);
                            });
                        });
                    });
            });
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        info!("Shutting down");
        self.save_settings();
    }
}
