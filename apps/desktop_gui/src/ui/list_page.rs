//! Model list page: filter bar, status states and the card grid.

use client_core::{
    list_view::{EMPTY_MESSAGE, LOADING_MESSAGE},
    DisplayState, ListView, ModelCard,
};
use egui::{Color32, CornerRadius, Margin, RichText, Stroke};
use shared::domain::{ModelId, ModelType};

use crate::ui::theme;

const CARD_WIDTH: f32 = 320.0;
const ALL_TYPES_LABEL: &str = "All Model Types";

/// User intents collected while drawing; applied once the frame is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListAction {
    SetFilter(Option<ModelType>),
    RequestDelete(ModelId),
    Retry,
    AddModel,
}

pub fn show(ui: &mut egui::Ui, view: &ListView) -> Vec<ListAction> {
    let mut actions = Vec::new();

    ui.horizontal(|ui| {
        ui.heading("AI Models");
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("Add New Model").clicked() {
                actions.push(ListAction::AddModel);
            }
        });
    });
    ui.add_space(8.0);

    let active = view.state().active_filter;
    let mut selected = active;
    egui::ComboBox::from_label("Filter by type")
        .selected_text(filter_label(selected))
        .show_ui(ui, |ui| {
            ui.selectable_value(&mut selected, None, ALL_TYPES_LABEL);
            for model_type in ModelType::ALL {
                ui.selectable_value(&mut selected, Some(model_type), model_type.label());
            }
        });
    if selected != active {
        actions.push(ListAction::SetFilter(selected));
    }
    ui.add_space(12.0);

    match view.display() {
        DisplayState::Loading => {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label(LOADING_MESSAGE);
            });
        }
        DisplayState::Error(message) => {
            egui::Frame::new()
                .fill(theme::ERROR_FILL)
                .corner_radius(CornerRadius::same(6))
                .inner_margin(Margin::same(10))
                .show(ui, |ui| {
                    ui.label(RichText::new(message).color(theme::ERROR_TEXT));
                    if ui.small_button("Try again").clicked() {
                        actions.push(ListAction::Retry);
                    }
                });
        }
        DisplayState::Empty => {
            ui.label(RichText::new(EMPTY_MESSAGE).color(theme::MUTED_TEXT));
        }
        DisplayState::Grid(models) => {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.horizontal_wrapped(|ui| {
                    for model in models {
                        if let Some(action) = model_card(ui, &ModelCard::from_model(model)) {
                            actions.push(action);
                        }
                    }
                });
            });
        }
    }

    actions
}

fn filter_label(filter: Option<ModelType>) -> &'static str {
    filter.map_or(ALL_TYPES_LABEL, ModelType::label)
}

fn model_card(ui: &mut egui::Ui, card: &ModelCard<'_>) -> Option<ListAction> {
    let mut action = None;
    let badge = theme::type_badge(card.model_type);

    egui::Frame::new()
        .fill(theme::CARD_FILL)
        .stroke(Stroke::new(1.0, theme::CARD_BORDER))
        .corner_radius(CornerRadius::same(8))
        .inner_margin(Margin::same(12))
        .show(ui, |ui| {
            ui.set_width(CARD_WIDTH);
            ui.label(RichText::new(card.name).strong().size(17.0).color(Color32::BLACK));
            ui.label(card.description);
            ui.add_space(4.0);
            egui::Frame::new()
                .fill(badge.fill)
                .corner_radius(CornerRadius::same(10))
                .inner_margin(Margin::symmetric(8, 2))
                .show(ui, |ui| {
                    ui.label(RichText::new(card.type_line()).small().color(badge.text));
                });
            ui.add_space(4.0);
            for link in &card.links {
                ui.hyperlink_to(link.label, link.href);
            }
            ui.hyperlink_to(card.submitter_link.label, card.submitter_link.href);
            ui.add_space(6.0);
            let delete = egui::Button::new(RichText::new("Delete").color(Color32::WHITE))
                .fill(theme::DANGER);
            if ui.add(delete).clicked() {
                action = Some(ListAction::RequestDelete(card.model_id));
            }
        });

    action
}
