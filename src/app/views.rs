//! View rendering (sidebar, search card, history, analytics, results)

use super::state::BackendStatus;
use super::App;
use crate::brand::Brand;
use crate::constants::{APP_VERSION, GENRES, YEAR_RANGES};
use crate::theme;
use crate::types::Movie;
use crate::ui::components::{banner, format_created_at, render_stars, share_text, trailer_url};
use crate::utils;
use eframe::egui;
use egui_phosphor::regular as icons;
use std::time::Instant;
use tracing::{debug, warn};

enum CardAction {
    Trailer(usize),
    Share(usize),
}

impl App {
    // ========================================================================
    // SIDEBAR
    // ========================================================================

    pub(crate) fn render_sidebar(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        let brand = self.brand;
        let (accent, _) = brand.accent();

        if self.logo_texture.is_none() {
            if let Some((pixels, w, h)) = utils::rasterize_logo(brand, 192) {
                self.logo_texture = Some(ctx.load_texture(
                    "logo",
                    egui::ColorImage::from_rgba_unmultiplied([w as usize, h as usize], &pixels),
                    egui::TextureOptions::LINEAR,
                ));
            }
        }

        ui.add_space(theme::SPACING_XL);
        ui.vertical_centered(|ui| {
            if let Some(texture) = &self.logo_texture {
                ui.image(egui::load::SizedTexture::new(texture.id(), egui::vec2(88.0, 88.0)));
            }
            ui.add_space(theme::SPACING_LG);
            ui.add(egui::Label::new(
                egui::RichText::new(brand.display_name())
                    .size(theme::FONT_HERO)
                    .strong()
                    .color(accent),
            ).selectable(false));
            ui.add_space(theme::SPACING_SM);
            ui.add(egui::Label::new(
                egui::RichText::new(brand.tagline())
                    .size(theme::FONT_LABEL)
                    .color(theme::TEXT_MUTED),
            ).wrap());
        });

        ui.add_space(theme::SPACING_XL);
        ui.separator();
        ui.add_space(theme::SPACING_MD);

        let state = &self.controller.state;

        section_label(ui, "BACKEND");
        match &state.backend {
            BackendStatus::Unknown => {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label(egui::RichText::new("Checking...").color(theme::TEXT_DIM));
                });
            }
            BackendStatus::Online { ai_configured, provider } => {
                status_row(ui, theme::STATUS_SUCCESS, "Online");
                if *ai_configured {
                    let provider = provider.as_deref().unwrap_or("configured");
                    ui.label(
                        egui::RichText::new(format!("AI: {}", provider))
                            .size(theme::FONT_SMALL)
                            .color(theme::TEXT_MUTED),
                    );
                } else {
                    ui.label(
                        egui::RichText::new(format!("{}  AI service not configured", icons::WARNING))
                            .size(theme::FONT_SMALL)
                            .color(theme::STATUS_WARNING),
                    );
                }
            }
            BackendStatus::Offline(reason) => {
                status_row(ui, theme::STATUS_ERROR, "Offline");
                ui.add(egui::Label::new(
                    egui::RichText::new(reason)
                        .size(theme::FONT_SMALL)
                        .color(theme::TEXT_DIM),
                ).wrap());
            }
        }
        ui.label(
            egui::RichText::new(&state.api_base_url)
                .size(theme::FONT_SMALL)
                .monospace()
                .color(theme::TEXT_DIM),
        );

        ui.add_space(theme::SPACING_LG);
        section_label(ui, "SESSION");
        ui.add(egui::Label::new(
            egui::RichText::new(&state.session_id)
                .size(theme::FONT_SMALL)
                .monospace()
                .color(theme::TEXT_MUTED),
        ).wrap());
        ui.label(
            egui::RichText::new(format!("{} saved searches", state.history.len()))
                .size(theme::FONT_SMALL)
                .color(theme::TEXT_DIM),
        );

        ui.with_layout(egui::Layout::bottom_up(egui::Align::Min), |ui| {
            ui.label(
                egui::RichText::new(format!("v{}", APP_VERSION))
                    .size(theme::FONT_SMALL)
                    .color(theme::TEXT_DIM),
            );
        });
    }

    // ========================================================================
    // SEARCH CARD
    // ========================================================================

    pub(crate) fn render_search_card(&mut self, ui: &mut egui::Ui) {
        let brand = self.brand;
        let mut submit = false;
        let mut clear = false;
        let mut analytics = false;
        let mut history = false;

        theme::card_frame().show(ui, |ui| {
            ui.set_min_width(ui.available_width());
            let state = &mut self.controller.state;
            let loading = state.loading;

            // Filter dropdowns
            ui.horizontal(|ui| {
                let genre_label = match state.selected_genres.len() {
                    0 => "Select Genres".to_string(),
                    n => format!("{} genre{} selected", n, if n == 1 { "" } else { "s" }),
                };
                let caret = if state.show_genre_dropdown { icons::CARET_UP } else { icons::CARET_DOWN };
                if ui
                    .add(theme::button(format!("{}  {}  {}", icons::FILM_STRIP, genre_label, caret)))
                    .clicked()
                {
                    state.toggle_genre_dropdown();
                }

                let year_label = match state.selected_years.len() {
                    0 => "Select Years".to_string(),
                    n => format!("{} year{} selected", n, if n == 1 { "" } else { "s" }),
                };
                let caret = if state.show_year_dropdown { icons::CARET_UP } else { icons::CARET_DOWN };
                if ui
                    .add(theme::button(format!("{}  {}  {}", icons::CALENDAR, year_label, caret)))
                    .clicked()
                {
                    state.toggle_year_dropdown();
                }
            });

            if state.show_genre_dropdown {
                ui.add_space(theme::SPACING_SM);
                if let Some(genre) = chip_grid(ui, "genre_grid", &GENRES, brand, |g| state.is_genre_selected(g)) {
                    state.toggle_genre(genre);
                }
            }
            if state.show_year_dropdown {
                ui.add_space(theme::SPACING_SM);
                if let Some(year) = chip_grid(ui, "year_grid", &YEAR_RANGES, brand, |y| state.is_year_selected(y)) {
                    state.toggle_year(year);
                }
            }

            ui.add_space(theme::SPACING_LG);
            ui.add_enabled(
                !loading,
                egui::TextEdit::multiline(&mut state.preference)
                    .desired_rows(3)
                    .desired_width(f32::INFINITY)
                    .font(egui::FontId::proportional(theme::FONT_BODY))
                    .hint_text("Your selection will appear here, or type custom preferences..."),
            );
            ui.label(
                egui::RichText::new("Ctrl+Enter to submit")
                    .size(theme::FONT_SMALL)
                    .color(theme::TEXT_DIM),
            );

            ui.add_space(theme::SPACING_MD);
            ui.horizontal(|ui| {
                let label = if loading {
                    format!("{}  Discovering Movies...", icons::HOURGLASS)
                } else {
                    format!("{}  Get Recommendations", icons::MAGNIFYING_GLASS)
                };
                let submit_btn = theme::button_accent(label, brand)
                    .min_size(egui::vec2(0.0, theme::BUTTON_HEIGHT_LARGE));
                if ui.add_enabled(!loading, submit_btn).clicked() {
                    submit = true;
                }

                let tall = egui::vec2(0.0, theme::BUTTON_HEIGHT_LARGE);
                if ui.add(theme::button(format!("{}  Clear", icons::SPARKLE)).min_size(tall)).clicked() {
                    clear = true;
                }
                if ui
                    .add(theme::button(format!("{}  Analytics", icons::CHART_BAR)).min_size(tall))
                    .clicked()
                {
                    analytics = true;
                }
                if !state.history.is_empty()
                    && ui
                        .add(
                            theme::button(format!(
                                "{}  History ({})",
                                icons::CLOCK_COUNTER_CLOCKWISE,
                                state.history.len()
                            ))
                            .min_size(tall),
                        )
                        .clicked()
                {
                    history = true;
                }
            });
        });

        if submit {
            self.controller.submit();
        }
        if clear {
            self.controller.state.reset();
        }
        if analytics {
            self.controller.toggle_analytics();
        }
        if history {
            self.controller.state.toggle_history();
        }
    }

    // ========================================================================
    // MESSAGES
    // ========================================================================

    pub(crate) fn render_messages(&mut self, ui: &mut egui::Ui) {
        let state = &self.controller.state;
        if let Some(error) = &state.error {
            banner(ui, icons::WARNING, error, theme::STATUS_ERROR);
            ui.add_space(theme::SPACING_MD);
        }
        if let Some(success) = &state.success {
            banner(ui, icons::CHECK_CIRCLE, success, theme::STATUS_SUCCESS);
            ui.add_space(theme::SPACING_MD);
        }
    }

    // ========================================================================
    // HISTORY
    // ========================================================================

    pub(crate) fn render_history_panel(&mut self, ui: &mut egui::Ui) {
        let state = &self.controller.state;
        if !state.show_history || state.history.is_empty() {
            return;
        }

        let mut load = None;
        let mut clear_all = false;

        theme::card_frame().show(ui, |ui| {
            ui.set_min_width(ui.available_width());
            ui.horizontal(|ui| {
                ui.label(
                    egui::RichText::new(format!("{}  Recent Searches", icons::CLOCK_COUNTER_CLOCKWISE))
                        .size(theme::FONT_HEADING)
                        .strong()
                        .color(theme::TEXT_PRIMARY),
                );
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.add(theme::button_danger(format!("{}  Clear All", icons::TRASH))).clicked() {
                        clear_all = true;
                    }
                });
            });
            ui.add_space(theme::SPACING_MD);

            for (i, entry) in state.history.iter().enumerate() {
                let response = egui::Frame::new()
                    .fill(theme::BG_SURFACE)
                    .corner_radius(theme::RADIUS_MEDIUM)
                    .inner_margin(egui::Margin::symmetric(12, 8))
                    .show(ui, |ui| {
                        ui.set_min_width(ui.available_width());
                        ui.add(egui::Label::new(
                            egui::RichText::new(&entry.query)
                                .size(theme::FONT_BODY)
                                .color(theme::TEXT_PRIMARY),
                        ).selectable(false));
                        ui.add(egui::Label::new(
                            egui::RichText::new(format!(
                                "{} movies • {}",
                                entry.movies.len(),
                                format_created_at(&entry.created_at)
                            ))
                            .size(theme::FONT_SMALL)
                            .color(theme::TEXT_MUTED),
                        ).selectable(false));
                    })
                    .response
                    .interact(egui::Sense::click())
                    .on_hover_cursor(egui::CursorIcon::PointingHand);
                if response.clicked() {
                    load = Some(i);
                }
                ui.add_space(theme::SPACING_SM);
            }
        });
        ui.add_space(theme::SPACING_LG);

        if let Some(index) = load {
            debug!(index, "Loading history entry");
            self.controller.state.load_history_item(index);
        }
        if clear_all {
            self.controller.state.request_clear_history();
        }
    }

    // ========================================================================
    // ANALYTICS
    // ========================================================================

    pub(crate) fn render_analytics_panel(&mut self, ui: &mut egui::Ui) {
        let state = &self.controller.state;
        if !state.show_analytics {
            return;
        }

        let mut refresh = false;
        theme::card_frame().show(ui, |ui| {
            ui.set_min_width(ui.available_width());
            ui.horizontal(|ui| {
                ui.label(
                    egui::RichText::new(format!("{}  Analytics", icons::CHART_BAR))
                        .size(theme::FONT_HEADING)
                        .strong()
                        .color(theme::TEXT_PRIMARY),
                );
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if state.analytics_loading {
                        ui.spinner();
                    } else if ui.add(theme::button(icons::ARROW_CLOCKWISE)).clicked() {
                        refresh = true;
                    }
                });
            });
            ui.add_space(theme::SPACING_MD);

            if let Some(error) = &state.analytics_error {
                banner(ui, icons::WARNING, error, theme::STATUS_ERROR);
            }

            if let Some(analytics) = &state.analytics {
                let stats = &analytics.statistics;
                ui.columns(4, |cols| {
                    stat_tile(&mut cols[0], "Users", stats.total_users.to_string());
                    stat_tile(&mut cols[1], "Searches", stats.total_recommendations.to_string());
                    stat_tile(&mut cols[2], "Movies", stats.total_movies.to_string());
                    stat_tile(
                        &mut cols[3],
                        "Avg / search",
                        format!("{:.2}", stats.average_movies_per_recommendation),
                    );
                });

                if !analytics.recent_activity.is_empty() {
                    ui.add_space(theme::SPACING_LG);
                    section_label(ui, "RECENT ACTIVITY");
                    for activity in &analytics.recent_activity {
                        ui.horizontal(|ui| {
                            ui.label(egui::RichText::new(&activity.query).color(theme::TEXT_SECONDARY));
                            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                                ui.label(
                                    egui::RichText::new(format!(
                                        "{} movies • {}",
                                        activity.movie_count,
                                        format_created_at(&activity.timestamp)
                                    ))
                                    .size(theme::FONT_SMALL)
                                    .color(theme::TEXT_DIM),
                                );
                            });
                        });
                    }
                }
            }
        });
        ui.add_space(theme::SPACING_LG);

        if refresh {
            // Close and reopen to re-fetch
            self.controller.state.show_analytics = false;
            self.controller.toggle_analytics();
        }
    }

    // ========================================================================
    // RESULTS
    // ========================================================================

    pub(crate) fn render_results(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        let brand = self.brand;
        let state = &self.controller.state;

        if state.loading {
            ui.add_space(48.0);
            ui.vertical_centered(|ui| {
                ui.add(egui::Spinner::new().size(40.0).color(brand.accent().0));
                ui.add_space(theme::SPACING_LG);
                ui.label(
                    egui::RichText::new("Curating your perfect watchlist...")
                        .size(theme::FONT_HEADING)
                        .color(theme::TEXT_SECONDARY),
                );
            });
            return;
        }

        if !state.movies.is_empty() {
            let mut action = None;
            ui.label(
                egui::RichText::new(format!("{}  Curated For You", icons::TREND_UP))
                    .size(theme::FONT_TITLE + 4.0)
                    .strong()
                    .color(theme::TEXT_PRIMARY),
            );
            ui.add_space(theme::SPACING_MD);
            for (i, movie) in state.movies.iter().enumerate() {
                if let Some(a) = movie_card(ui, movie, i, brand) {
                    action = Some(a);
                }
                ui.add_space(theme::SPACING_MD);
            }
            if let Some(action) = action {
                self.handle_card_action(action, ctx);
            }
            return;
        }

        if !state.searched {
            ui.add_space(32.0);
            ui.columns(3, |cols| {
                feature_tile(&mut cols[0], icons::SPARKLE, "AI-Powered Intelligence", "Advanced algorithms understand your taste", brand);
                feature_tile(&mut cols[1], icons::STAR, "Personalized Curation", "Tailored recommendations just for you", brand);
                feature_tile(&mut cols[2], icons::FILM_SLATE, "Vast Movie Library", "Discover gems across all genres", brand);
            });
        }
    }

    fn handle_card_action(&mut self, action: CardAction, ctx: &egui::Context) {
        match action {
            CardAction::Trailer(i) => {
                let Some(movie) = self.controller.state.movies.get(i) else {
                    return;
                };
                let url = trailer_url(movie);
                debug!(%url, "Opening trailer search");
                if let Err(e) = open::that(&url) {
                    warn!(error = %e, "Failed to open browser");
                    self.controller.state.error = Some(format!("Could not open browser: {}", e));
                }
            }
            CardAction::Share(i) => {
                let Some(movie) = self.controller.state.movies.get(i) else {
                    return;
                };
                let text = share_text(movie);
                ctx.copy_text(text.clone());
                self.controller
                    .state
                    .flash_success(format!("Copied \"{}\" to clipboard", text), Instant::now());
            }
        }
    }
}

// ============================================================================
// WIDGET HELPERS
// ============================================================================

fn section_label(ui: &mut egui::Ui, text: &str) {
    ui.label(
        egui::RichText::new(text)
            .size(theme::FONT_SMALL)
            .strong()
            .color(theme::TEXT_DIM),
    );
}

fn status_row(ui: &mut egui::Ui, color: egui::Color32, text: &str) {
    ui.horizontal(|ui| {
        let (rect, _) = ui.allocate_exact_size(egui::vec2(10.0, 10.0), egui::Sense::hover());
        ui.painter().circle_filled(rect.center(), 4.0, color);
        ui.label(egui::RichText::new(text).color(color));
    });
}

/// Three-column grid of toggle chips. Returns the clicked item, if any.
fn chip_grid<'a>(
    ui: &mut egui::Ui,
    id: &str,
    items: &[&'a str],
    brand: Brand,
    is_selected: impl Fn(&str) -> bool,
) -> Option<&'a str> {
    let mut clicked = None;
    let width = ((ui.available_width() - 2.0 * 6.0) / 3.0).max(80.0);
    egui::Grid::new(id).spacing([6.0, 6.0]).show(ui, |ui| {
        for (i, item) in items.iter().enumerate() {
            let selected = is_selected(item);
            let text = if selected {
                format!("{}  {}", item, icons::CHECK)
            } else {
                item.to_string()
            };
            if ui
                .add_sized([width, 28.0], theme::chip(&text, selected, brand))
                .clicked()
            {
                clicked = Some(*item);
            }
            if (i + 1) % 3 == 0 {
                ui.end_row();
            }
        }
    });
    clicked
}

fn stat_tile(ui: &mut egui::Ui, label: &str, value: String) {
    egui::Frame::new()
        .fill(theme::BG_SURFACE)
        .corner_radius(theme::RADIUS_MEDIUM)
        .inner_margin(egui::Margin::same(10))
        .show(ui, |ui| {
            ui.set_min_width(ui.available_width());
            ui.label(
                egui::RichText::new(value)
                    .size(theme::FONT_TITLE)
                    .strong()
                    .color(theme::TEXT_PRIMARY),
            );
            ui.label(egui::RichText::new(label).size(theme::FONT_SMALL).color(theme::TEXT_MUTED));
        });
}

fn feature_tile(ui: &mut egui::Ui, icon: &str, title: &str, desc: &str, brand: Brand) {
    theme::card_frame().show(ui, |ui| {
        ui.set_min_width(ui.available_width());
        ui.vertical_centered(|ui| {
            ui.label(egui::RichText::new(icon).size(28.0).color(brand.accent().0));
            ui.add_space(theme::SPACING_SM);
            ui.label(
                egui::RichText::new(title)
                    .size(theme::FONT_HEADING)
                    .strong()
                    .color(theme::TEXT_PRIMARY),
            );
            ui.add(egui::Label::new(
                egui::RichText::new(desc).size(theme::FONT_LABEL).color(theme::TEXT_MUTED),
            ).wrap());
        });
    });
}

fn movie_card(ui: &mut egui::Ui, movie: &Movie, index: usize, brand: Brand) -> Option<CardAction> {
    let mut action = None;
    let (accent, _) = brand.accent();

    theme::card_frame().show(ui, |ui| {
        ui.set_min_width(ui.available_width());
        ui.horizontal_top(|ui| {
            // Poster placeholder
            let (rect, _) = ui.allocate_exact_size(
                egui::vec2(theme::POSTER_SIZE, theme::POSTER_SIZE * 1.4),
                egui::Sense::hover(),
            );
            ui.painter().rect_filled(rect, theme::RADIUS_LARGE, theme::BG_SURFACE);
            ui.painter().text(
                rect.center(),
                egui::Align2::CENTER_CENTER,
                icons::FILM_SLATE,
                egui::FontId::proportional(40.0),
                accent.gamma_multiply(0.6),
            );

            ui.vertical(|ui| {
                ui.horizontal(|ui| {
                    ui.label(
                        egui::RichText::new(format!("{}. {}", index + 1, movie.title))
                            .size(theme::FONT_TITLE)
                            .strong()
                            .color(theme::TEXT_PRIMARY),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(
                            egui::RichText::new(format!("{:.1}", movie.rating))
                                .strong()
                                .color(theme::STAR_FILLED),
                        );
                        ui.label(egui::RichText::new(render_stars(movie.rating)).color(theme::STAR_FILLED));
                    });
                });
                ui.horizontal(|ui| {
                    ui.label(
                        egui::RichText::new(format!("{}  {}", icons::CALENDAR, movie.year))
                            .size(theme::FONT_LABEL)
                            .color(theme::TEXT_MUTED),
                    );
                    ui.add_space(theme::SPACING_MD);
                    ui.label(
                        egui::RichText::new(format!("{}  {}", icons::TAG, movie.genre))
                            .size(theme::FONT_LABEL)
                            .color(theme::TEXT_MUTED),
                    );
                });
                ui.add_space(theme::SPACING_SM);
                ui.add(egui::Label::new(
                    egui::RichText::new(&movie.description)
                        .size(theme::FONT_BODY)
                        .color(theme::TEXT_SECONDARY),
                ).wrap());
                ui.add_space(theme::SPACING_MD);
                ui.horizontal(|ui| {
                    if ui.add(theme::button(format!("{}  Watch Trailer", icons::PLAY))).clicked() {
                        action = Some(CardAction::Trailer(index));
                    }
                    if ui.add(theme::button(format!("{}  Share", icons::SHARE_NETWORK))).clicked() {
                        action = Some(CardAction::Share(index));
                    }
                });
            });
        });
    });

    action
}
