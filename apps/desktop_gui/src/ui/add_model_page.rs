//! Add-model page.

use client_core::{CreateModelForm, FormField};
use egui::{CornerRadius, Margin, RichText};
use shared::domain::ModelType;

use crate::ui::theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    Submit,
    Cancel,
}

pub fn show(ui: &mut egui::Ui, form: &mut CreateModelForm) -> Option<FormAction> {
    let mut action = None;

    ui.heading("Add New AI Model");
    ui.add_space(8.0);

    if let Some(message) = form.error() {
        egui::Frame::new()
            .fill(theme::ERROR_FILL)
            .corner_radius(CornerRadius::same(6))
            .inner_margin(Margin::same(10))
            .show(ui, |ui| {
                ui.label(RichText::new(message).color(theme::ERROR_TEXT));
            });
        ui.add_space(8.0);
    }

    let invalid = form.invalid();
    let busy = form.is_submitting();

    ui.add_enabled_ui(!busy, |ui| {
        egui::Grid::new("add_model_form")
            .num_columns(2)
            .spacing([12.0, 10.0])
            .show(ui, |ui| {
                field_label(ui, FormField::Name, invalid.map(|e| e.field()));
                ui.text_edit_singleline(&mut form.name);
                ui.end_row();

                field_label(ui, FormField::Description, invalid.map(|e| e.field()));
                ui.add(egui::TextEdit::multiline(&mut form.description).desired_rows(4));
                ui.end_row();

                field_label(ui, FormField::ModelType, invalid.map(|e| e.field()));
                egui::ComboBox::from_id_salt("model_type")
                    .selected_text(form.model_type.map_or("Select a type", ModelType::label))
                    .show_ui(ui, |ui| {
                        for model_type in ModelType::ALL {
                            ui.selectable_value(
                                &mut form.model_type,
                                Some(model_type),
                                model_type.label(),
                            );
                        }
                    });
                ui.end_row();

                field_label(ui, FormField::GithubLink, invalid.map(|e| e.field()));
                ui.add(egui::TextEdit::singleline(&mut form.github_link).hint_text("https://github.com/..."));
                ui.end_row();

                field_label(ui, FormField::ArticleLink, invalid.map(|e| e.field()));
                ui.add(egui::TextEdit::singleline(&mut form.article_link).hint_text("https://..."));
                ui.end_row();

                field_label(ui, FormField::SubmitterLinkedin, invalid.map(|e| e.field()));
                ui.add(
                    egui::TextEdit::singleline(&mut form.submitter_linkedin)
                        .hint_text("https://www.linkedin.com/in/..."),
                );
                ui.end_row();
            });
    });

    if let Some(err) = invalid {
        ui.label(RichText::new(err.to_string()).color(theme::ERROR_TEXT));
    }

    ui.add_space(12.0);
    ui.horizontal(|ui| {
        let submit = egui::Button::new(form.submit_label()).fill(theme::ACCENT);
        if ui.add_enabled(!busy, submit).clicked() {
            action = Some(FormAction::Submit);
        }
        if ui.button("Cancel").clicked() {
            action = Some(FormAction::Cancel);
        }
    });

    action
}

fn field_label(ui: &mut egui::Ui, field: FormField, flagged: Option<FormField>) {
    let text = RichText::new(field.label());
    if flagged == Some(field) {
        ui.label(text.color(theme::ERROR_TEXT));
    } else {
        ui.label(text);
    }
}
