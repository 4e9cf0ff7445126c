//! Modal dialogs (clear-history confirmation)

use super::App;
use crate::theme;
use eframe::egui;
use egui_phosphor::regular as icons;

impl App {
    pub(crate) fn render_clear_history_modal(&mut self, ctx: &egui::Context) {
        if !self.controller.state.confirm_clear {
            return;
        }

        let mut confirm = false;
        let mut cancel = false;

        let modal_area = egui::Modal::default_area(egui::Id::new("clear_history_modal"))
            .default_width(340.0 + theme::SPACING_XL * 2.0);
        let modal = egui::Modal::new(egui::Id::new("clear_history_modal"))
            .area(modal_area)
            .backdrop_color(egui::Color32::from_black_alpha(180))
            .frame(theme::modal_frame());
        let modal_response = modal.show(ctx, |ui| {
            ui.set_min_width(340.0);
            ui.set_max_width(340.0);

            ui.vertical_centered(|ui| {
                ui.add_space(8.0);
                ui.label(egui::RichText::new(icons::TRASH).size(36.0).color(theme::STATUS_ERROR));
                ui.add_space(theme::SPACING_MD);
                ui.label(
                    egui::RichText::new("Clear history?")
                        .size(theme::FONT_TITLE)
                        .strong()
                        .color(theme::TEXT_PRIMARY),
                );
                ui.add_space(theme::SPACING_SM);
                ui.label(
                    egui::RichText::new("Are you sure you want to clear your history?")
                        .size(theme::FONT_BODY)
                        .color(theme::TEXT_SECONDARY),
                );
                ui.add_space(theme::SPACING_XL);
            });

            ui.horizontal(|ui| {
                let half = (ui.available_width() - theme::SPACING_MD) / 2.0;
                if ui
                    .add_sized([half, theme::BUTTON_HEIGHT_LARGE], theme::button("Cancel"))
                    .clicked()
                {
                    cancel = true;
                }
                if ui
                    .add_sized(
                        [half, theme::BUTTON_HEIGHT_LARGE],
                        theme::button_danger(format!("{}  Clear", icons::TRASH)),
                    )
                    .clicked()
                {
                    confirm = true;
                }
            });
        });

        if confirm {
            self.controller.confirm_clear_history();
        } else if cancel || modal_response.should_close() {
            self.controller.state.cancel_clear_history();
        }
    }
}
