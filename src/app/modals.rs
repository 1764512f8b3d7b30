//! Modal dialogs

use super::App;
use crate::theme;
use eframe::egui;
use egui_phosphor::regular as icons;

const ALERT_WIDTH: f32 = 360.0;

impl App {
    /// Blocking alert for a failed prediction. Escape, a backdrop click or OK dismiss it.
    pub(crate) fn render_alert_modal(&mut self, ctx: &egui::Context) {
        let Some(message) = self.controller.alert().map(str::to_owned) else {
            return;
        };

        let modal_area = egui::Modal::default_area(egui::Id::new("alert_modal"))
            .default_width(ALERT_WIDTH + theme::SPACING_XL * 2.0);
        let modal = egui::Modal::new(egui::Id::new("alert_modal"))
            .area(modal_area)
            .backdrop_color(egui::Color32::from_black_alpha(180))
            .frame(theme::modal_frame());

        let modal_response = modal.show(ctx, |ui| {
            ui.set_min_width(ALERT_WIDTH);
            ui.set_max_width(ALERT_WIDTH);

            let mut ok = false;
            ui.vertical_centered(|ui| {
                ui.add_space(theme::SPACING_MD);
                ui.label(
                    egui::RichText::new(icons::WARNING)
                        .size(36.0)
                        .color(theme::STATUS_ERROR),
                );
                ui.add_space(theme::SPACING_MD);
                ui.label(egui::RichText::new("Analysis failed").size(theme::FONT_HEADING).strong());
                ui.add_space(theme::SPACING_SM);
                ui.add(
                    egui::Label::new(egui::RichText::new(&message).color(theme::TEXT_MUTED)).wrap(),
                );
                ui.add_space(theme::SPACING_XL);
                ok = ui
                    .add(theme::button_accent(format!("{}  OK", icons::CHECK)))
                    .clicked();
            });
            ok
        });

        if modal_response.inner || modal_response.should_close() {
            self.controller.dismiss_alert();
        }
    }
}
