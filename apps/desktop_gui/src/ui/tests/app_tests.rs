use super::*;
use client_core::CatalogError;
use crossbeam_channel::bounded;
use shared::domain::{Model, ModelType};

struct Harness {
    app: ModelsBaseApp,
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
}

fn harness() -> Harness {
    let (cmd_tx, cmd_rx) = bounded(16);
    let (ui_tx, ui_rx) = bounded(16);
    Harness {
        app: ModelsBaseApp::new(cmd_tx, ui_rx),
        cmd_rx,
        ui_tx,
    }
}

fn model(id: i64, model_type: ModelType) -> Model {
    Model {
        id: ModelId(id),
        name: format!("model-{id}"),
        description: "desc".to_string(),
        model_type,
        github_link: "https://github.com/example/repo".to_string(),
        article_link: None,
        submitter_linkedin: "https://www.linkedin.com/in/example".to_string(),
    }
}

impl Harness {
    fn next_fetch(&self) -> client_core::FetchTicket {
        match self.cmd_rx.try_recv() {
            Ok(BackendCommand::FetchModels { ticket }) => ticket,
            Ok(other) => panic!("expected fetch, got {}", other.name()),
            Err(err) => panic!("expected fetch, queue empty: {err}"),
        }
    }

    fn deliver(&mut self, event: UiEvent) {
        self.ui_tx.send(event).expect("send");
        self.app.process_ui_events();
    }

    fn model_ids(&self) -> Vec<ModelId> {
        self.app
            .list
            .as_ref()
            .expect("list mounted")
            .state()
            .models
            .iter()
            .map(|m| m.id)
            .collect()
    }
}

#[test]
fn startup_mounts_list_and_fetches_everything() {
    let mut h = harness();
    assert_eq!(h.app.route(), Route::List);
    let ticket = h.next_fetch();
    assert_eq!(ticket.filter(), None);

    h.deliver(UiEvent::ModelsFetched {
        ticket,
        result: Ok(vec![model(1, ModelType::Nlp), model(2, ModelType::Other)]),
    });
    assert_eq!(h.model_ids(), vec![ModelId(1), ModelId(2)]);
}

#[test]
fn filter_change_fetches_with_new_type() {
    let mut h = harness();
    let _initial = h.next_fetch();
    h.app
        .apply_list_action(ListAction::SetFilter(Some(ModelType::ComputerVision)));
    let ticket = h.next_fetch();
    assert_eq!(ticket.filter(), Some(ModelType::ComputerVision));
}

#[test]
fn fetch_arriving_after_leaving_the_list_is_dropped() {
    let mut h = harness();
    let stale = h.next_fetch();
    h.app.navigate(Route::AddModel);
    assert!(h.app.list.is_none());

    h.deliver(UiEvent::ModelsFetched {
        ticket: stale,
        result: Ok(vec![model(7, ModelType::Nlp)]),
    });

    h.app.navigate(Route::List);
    let fresh = h.next_fetch();
    h.deliver(UiEvent::ModelsFetched {
        ticket: stale,
        result: Ok(vec![model(7, ModelType::Nlp)]),
    });
    assert!(h.model_ids().is_empty());
    assert!(h.app.list.as_ref().expect("list").state().is_loading);

    h.deliver(UiEvent::ModelsFetched {
        ticket: fresh,
        result: Ok(vec![model(8, ModelType::Nlp)]),
    });
    assert_eq!(h.model_ids(), vec![ModelId(8)]);
}

#[test]
fn declined_delete_sends_nothing() {
    let mut h = harness();
    let _initial = h.next_fetch();
    h.app.apply_list_action(ListAction::RequestDelete(ModelId(3)));
    h.app.resolve_delete(false);
    assert!(h.cmd_rx.try_recv().is_err());
    assert!(h.app.pending_delete.is_none());
}

#[test]
fn confirmed_delete_refreshes_with_current_filter() {
    let mut h = harness();
    let _initial = h.next_fetch();
    h.app
        .apply_list_action(ListAction::SetFilter(Some(ModelType::Nlp)));
    let filtered = h.next_fetch();
    h.deliver(UiEvent::ModelsFetched {
        ticket: filtered,
        result: Ok(vec![model(3, ModelType::Nlp), model(4, ModelType::Nlp)]),
    });

    h.app.apply_list_action(ListAction::RequestDelete(ModelId(3)));
    h.app.resolve_delete(true);
    let ticket = match h.cmd_rx.try_recv() {
        Ok(BackendCommand::DeleteModel { ticket }) => ticket,
        _ => panic!("expected delete command"),
    };
    assert_eq!(ticket.model_id(), ModelId(3));

    h.deliver(UiEvent::ModelDeleted {
        ticket,
        result: Ok(()),
    });
    let refresh = h.next_fetch();
    assert_eq!(refresh.filter(), Some(ModelType::Nlp));
}

#[test]
fn failed_delete_shows_error_without_refetch() {
    let mut h = harness();
    let initial = h.next_fetch();
    h.deliver(UiEvent::ModelsFetched {
        ticket: initial,
        result: Ok(vec![model(5, ModelType::Other)]),
    });

    h.app.apply_list_action(ListAction::RequestDelete(ModelId(5)));
    h.app.resolve_delete(true);
    let ticket = match h.cmd_rx.try_recv() {
        Ok(BackendCommand::DeleteModel { ticket }) => ticket,
        _ => panic!("expected delete command"),
    };
    h.deliver(UiEvent::ModelDeleted {
        ticket,
        result: Err(CatalogError::InvalidResponse("boom".to_string())),
    });

    assert!(h.cmd_rx.try_recv().is_err());
    let state = h.app.list.as_ref().expect("list").state();
    assert_eq!(
        state.error.as_deref(),
        Some("Failed to delete model. Please try again.")
    );
    assert_eq!(h.model_ids(), vec![ModelId(5)]);
}

#[test]
fn created_model_returns_to_list() {
    let mut h = harness();
    let _initial = h.next_fetch();
    h.app.apply_list_action(ListAction::AddModel);
    assert_eq!(h.app.route(), Route::AddModel);

    {
        let form = h.app.form.as_mut().expect("form");
        form.name = "Whisper".to_string();
        form.description = "speech".to_string();
        form.model_type = Some(ModelType::SpeechRecognition);
        form.github_link = "https://github.com/openai/whisper".to_string();
        form.submitter_linkedin = "https://www.linkedin.com/in/example".to_string();
    }
    h.app.apply_form_action(FormAction::Submit);
    match h.cmd_rx.try_recv() {
        Ok(BackendCommand::CreateModel { request }) => {
            assert_eq!(request.name, "Whisper");
            assert_eq!(request.article_link, None);
        }
        _ => panic!("expected create command"),
    }
    assert!(h.app.form.as_ref().expect("form").is_submitting());

    h.deliver(UiEvent::ModelCreated(Ok(ModelId(11))));
    assert_eq!(h.app.route(), Route::List);
    assert!(h.app.form.is_none());
    assert_eq!(h.next_fetch().filter(), None);
}

#[test]
fn invalid_form_stays_put() {
    let mut h = harness();
    let _initial = h.next_fetch();
    h.app.navigate(Route::AddModel);
    h.app.apply_form_action(FormAction::Submit);
    assert!(h.cmd_rx.try_recv().is_err());
    assert_eq!(h.app.route(), Route::AddModel);
    assert!(h.app.form.as_ref().expect("form").invalid().is_some());
}

fn harness_with_capacity(capacity: usize) -> Harness {
    let (cmd_tx, cmd_rx) = bounded(capacity);
    let (ui_tx, ui_rx) = bounded(16);
    Harness {
        app: ModelsBaseApp::new(cmd_tx, ui_rx),
        cmd_rx,
        ui_tx,
    }
}

#[test]
fn stopped_backend_turns_initial_fetch_into_banner() {
    let (cmd_tx, cmd_rx) = bounded(16);
    drop(cmd_rx);
    let (_ui_tx, ui_rx) = bounded(16);
    let mut app = ModelsBaseApp::new(cmd_tx, ui_rx);
    app.process_ui_events();

    let view = app.list.as_ref().expect("list");
    assert!(!view.state().is_loading);
    assert_eq!(
        view.display(),
        client_core::DisplayState::Error("Failed to load models. Please try again.")
    );
    assert!(app.status.contains("Backend worker stopped"));
}

#[test]
fn filter_change_on_full_queue_does_not_leave_spinner() {
    let mut h = harness_with_capacity(1);
    h.app
        .apply_list_action(ListAction::SetFilter(Some(ModelType::Nlp)));

    let state = h.app.list.as_ref().expect("list").state();
    assert!(!state.is_loading);
    assert_eq!(state.active_filter, Some(ModelType::Nlp));
    assert_eq!(
        state.error.as_deref(),
        Some("Failed to load models. Please try again.")
    );
    assert!(h.app.status.contains("queue is full"));
}

#[test]
fn delete_on_full_queue_reports_delete_failure() {
    let mut h = harness_with_capacity(1);
    let initial = h.next_fetch();
    h.deliver(UiEvent::ModelsFetched {
        ticket: initial,
        result: Ok(vec![model(9, ModelType::Other)]),
    });
    h.app.apply_list_action(ListAction::Retry);
    let retry = h.next_fetch();
    h.deliver(UiEvent::ModelsFetched {
        ticket: retry,
        result: Ok(vec![model(9, ModelType::Other)]),
    });
    h.app.apply_list_action(ListAction::Retry);

    h.app.apply_list_action(ListAction::RequestDelete(ModelId(9)));
    h.app.resolve_delete(true);

    let state = h.app.list.as_ref().expect("list").state();
    assert!(!state.is_loading);
    assert_eq!(
        state.error.as_deref(),
        Some("Failed to delete model. Please try again.")
    );
    assert_eq!(h.model_ids(), vec![ModelId(9)]);
}

#[test]
fn changing_filter_drops_unanswered_delete_prompt() {
    let mut h = harness();
    let _initial = h.next_fetch();
    h.app.apply_list_action(ListAction::RequestDelete(ModelId(2)));
    h.app
        .apply_list_action(ListAction::SetFilter(Some(ModelType::Other)));
    assert!(h.app.pending_delete.is_none());

    let _filtered = h.next_fetch();
    h.app.resolve_delete(true);
    assert!(h.cmd_rx.try_recv().is_err());
}
