//! App shell: routing, confirm dialog and event intake.

use client_core::{
    list_view::DELETE_CONFIRM_PROMPT, CatalogError, CreateModelForm, FetchTicket, ListView,
    Route, SubmitOutcome,
};
use crossbeam_channel::{Receiver, Sender};
use shared::domain::ModelId;

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;
use crate::controller::orchestration::dispatch_backend_command;
use crate::ui::add_model_page::{self, FormAction};
use crate::ui::list_page::{self, ListAction};
use crate::ui::theme;

pub struct ModelsBaseApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    route: Route,
    list: Option<ListView>,
    form: Option<CreateModelForm>,
    pending_delete: Option<ModelId>,
    status: String,
}

impl ModelsBaseApp {
    pub fn new(cmd_tx: Sender<BackendCommand>, ui_rx: Receiver<UiEvent>) -> Self {
        let mut app = Self {
            cmd_tx,
            ui_rx,
            route: Route::AddModel,
            list: None,
            form: None,
            pending_delete: None,
            status: String::new(),
        };
        app.navigate(Route::List);
        app
    }

    pub fn route(&self) -> Route {
        self.route
    }

    /// Leaving a page drops its state; tickets issued by a dropped list view
    /// are ignored when their responses arrive.
    pub fn navigate(&mut self, route: Route) {
        tracing::debug!(from = self.route.path(), to = route.path(), "navigate");
        self.route = route;
        self.pending_delete = None;
        match route {
            Route::List => {
                self.form = None;
                let (mut view, ticket) = ListView::mount();
                queue_fetch(&self.cmd_tx, &mut view, ticket, &mut self.status);
                self.list = Some(view);
            }
            Route::AddModel => {
                self.list = None;
                self.form = Some(CreateModelForm::new());
            }
        }
    }

    pub fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::Info(message) => {
                    self.status = message;
                }
                UiEvent::BackendUnavailable(message) => {
                    tracing::error!("backend unavailable: {message}");
                    self.status = message;
                }
                UiEvent::ModelsFetched { ticket, result } => match self.list.as_mut() {
                    Some(view) => {
                        view.apply_fetch(ticket, result);
                    }
                    None => tracing::debug!(seq = ticket.seq(), "list unmounted; fetch dropped"),
                },
                UiEvent::ModelDeleted { ticket, result } => {
                    let Some(view) = self.list.as_mut() else {
                        continue;
                    };
                    if let Some(ticket) = view.finish_delete(ticket, result) {
                        queue_fetch(&self.cmd_tx, view, ticket, &mut self.status);
                    }
                }
                UiEvent::ModelCreated(result) => {
                    let Some(form) = self.form.as_mut() else {
                        continue;
                    };
                    if let SubmitOutcome::Created { navigate_to, .. } = form.finish_submit(result)
                    {
                        self.navigate(navigate_to);
                    }
                }
            }
        }
    }

    fn apply_list_action(&mut self, action: ListAction) {
        match action {
            ListAction::AddModel => self.navigate(Route::AddModel),
            ListAction::RequestDelete(model_id) => self.pending_delete = Some(model_id),
            ListAction::SetFilter(filter) => {
                self.pending_delete = None;
                if let Some(view) = self.list.as_mut() {
                    let ticket = view.set_filter(filter);
                    queue_fetch(&self.cmd_tx, view, ticket, &mut self.status);
                }
            }
            ListAction::Retry => {
                if let Some(view) = self.list.as_mut() {
                    let ticket = view.refresh();
                    queue_fetch(&self.cmd_tx, view, ticket, &mut self.status);
                }
            }
        }
    }

    /// Answer to the delete confirmation dialog.
    pub fn resolve_delete(&mut self, confirmed: bool) {
        let Some(model_id) = self.pending_delete.take() else {
            return;
        };
        if !confirmed {
            return;
        }
        if let Some(view) = self.list.as_mut() {
            let ticket = view.begin_delete(model_id);
            if !dispatch_backend_command(
                &self.cmd_tx,
                BackendCommand::DeleteModel { ticket },
                &mut self.status,
            ) {
                view.finish_delete(ticket, Err(not_queued("delete")));
            }
        }
    }

    fn apply_form_action(&mut self, action: FormAction) {
        let Some(form) = self.form.as_mut() else {
            return;
        };
        match action {
            FormAction::Cancel => {
                let route = form.cancel();
                self.navigate(route);
            }
            FormAction::Submit => match form.begin_submit() {
                Ok(request) => {
                    if !dispatch_backend_command(
                        &self.cmd_tx,
                        BackendCommand::CreateModel { request },
                        &mut self.status,
                    ) {
                        form.finish_submit(Err(not_queued("create")));
                    }
                }
                Err(err) => tracing::debug!("form blocked: {err}"),
            },
        }
    }

    fn show_delete_confirm(&mut self, ctx: &egui::Context) {
        if self.pending_delete.is_none() {
            return;
        }
        let mut answer = None;
        egui::Modal::new(egui::Id::new("delete_model_confirm")).show(ctx, |ui| {
            ui.heading("Delete model");
            ui.label(DELETE_CONFIRM_PROMPT);
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                if ui
                    .add(egui::Button::new("Delete").fill(theme::DANGER))
                    .clicked()
                {
                    answer = Some(true);
                }
                if ui.button("Cancel").clicked() {
                    answer = Some(false);
                }
            });
        });
        if answer.is_none() && ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            answer = Some(false);
        }
        if let Some(confirmed) = answer {
            self.resolve_delete(confirmed);
        }
    }
}

/// Queues a fetch; when the backend cannot take it the ticket is completed
/// as failed so the list leaves its loading state.
fn queue_fetch(
    cmd_tx: &Sender<BackendCommand>,
    view: &mut ListView,
    ticket: FetchTicket,
    status: &mut String,
) {
    if !dispatch_backend_command(cmd_tx, BackendCommand::FetchModels { ticket }, status) {
        view.apply_fetch(ticket, Err(not_queued("fetch")));
    }
}

fn not_queued(command: &str) -> CatalogError {
    CatalogError::Unavailable(format!("{command} request was not queued"))
}

impl eframe::App for ModelsBaseApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_ui_events();

        egui::TopBottomPanel::top("nav").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new("ModelsBase").strong().color(theme::ACCENT));
                ui.separator();
                if ui
                    .selectable_label(self.route == Route::List, "Models")
                    .clicked()
                    && self.route != Route::List
                {
                    self.navigate(Route::List);
                }
                if ui
                    .selectable_label(self.route == Route::AddModel, "Add Model")
                    .clicked()
                    && self.route != Route::AddModel
                {
                    self.navigate(Route::AddModel);
                }
            });
        });

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.label(egui::RichText::new(&self.status).small().color(theme::MUTED_TEXT));
        });

        egui::CentralPanel::default().show(ctx, |ui| match self.route {
            Route::List => {
                let actions = self
                    .list
                    .as_ref()
                    .map(|view| list_page::show(ui, view))
                    .unwrap_or_default();
                for action in actions {
                    self.apply_list_action(action);
                }
            }
            Route::AddModel => {
                let action = self
                    .form
                    .as_mut()
                    .and_then(|form| add_model_page::show(ui, form));
                if let Some(action) = action {
                    self.apply_form_action(action);
                }
            }
        });

        self.show_delete_confirm(ctx);

        ctx.request_repaint_after(std::time::Duration::from_millis(100));
    }
}

#[cfg(test)]
#[path = "tests/app_tests.rs"]
mod tests;
