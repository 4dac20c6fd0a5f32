//! List page state: the fetched models, the active type filter, and the
//! loading/error flags, plus the rules that keep them consistent with the
//! catalog service.
//!
//! [`ListView`] is the synchronous reducer. Every fetch it asks for is
//! described by a [`FetchTicket`]; results are handed back with that ticket
//! and only the most recently issued one is applied. [`ListViewController`]
//! drives the reducer against a [`CatalogService`] one await at a time.

use std::sync::atomic::{AtomicU64, Ordering};

use shared::domain::{Model, ModelId, ModelType};
use tracing::{debug, error};

use crate::{error::CatalogError, fetch_models, CatalogService};

pub const LOAD_FAILED_MESSAGE: &str = "Failed to load models. Please try again.";
pub const DELETE_FAILED_MESSAGE: &str = "Failed to delete model. Please try again.";
pub const EMPTY_MESSAGE: &str = "No models found. Add a new model to get started!";
pub const LOADING_MESSAGE: &str = "Loading models...";
pub const DELETE_CONFIRM_PROMPT: &str = "Are you sure you want to delete this model?";

static NEXT_VIEW_INSTANCE: AtomicU64 = AtomicU64::new(1);

/// Identity of one mounted list view. Tickets from an unmounted view never
/// match a later mount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct ViewInstance(u64);

impl ViewInstance {
    fn next() -> Self {
        Self(NEXT_VIEW_INSTANCE.fetch_add(1, Ordering::Relaxed))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub models: Vec<Model>,
    pub active_filter: Option<ModelType>,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl ViewState {
    fn mounted() -> Self {
        Self {
            models: Vec::new(),
            active_filter: None,
            is_loading: true,
            error: None,
        }
    }
}

/// What the page shows, derived from [`ViewState`] by precedence:
/// loading, then error, then the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayState<'a> {
    Loading,
    Error(&'a str),
    Empty,
    Grid(&'a [Model]),
}

impl ViewState {
    pub fn display(&self) -> DisplayState<'_> {
        if self.is_loading {
            DisplayState::Loading
        } else if let Some(message) = self.error.as_deref() {
            DisplayState::Error(message)
        } else if self.models.is_empty() {
            DisplayState::Empty
        } else {
            DisplayState::Grid(&self.models)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    view: ViewInstance,
    seq: u64,
    filter: Option<ModelType>,
}

impl FetchTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    /// Filter the fetch must be issued with.
    pub fn filter(&self) -> Option<ModelType> {
        self.filter
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteTicket {
    view: ViewInstance,
    model_id: ModelId,
}

impl DeleteTicket {
    pub fn model_id(&self) -> ModelId {
        self.model_id
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    Applied,
    Failed,
    /// A newer fetch was issued after this one; the result was dropped.
    Stale,
}

pub struct ListView {
    instance: ViewInstance,
    state: ViewState,
    latest_seq: u64,
}

impl ListView {
    /// Fresh view with no filter, already loading. The returned ticket is the
    /// initial fetch.
    pub fn mount() -> (Self, FetchTicket) {
        Self::mount_filtered(None)
    }

    /// Fresh view whose first fetch already uses `filter`.
    pub fn mount_filtered(filter: Option<ModelType>) -> (Self, FetchTicket) {
        let mut view = Self {
            instance: ViewInstance::next(),
            state: ViewState::mounted(),
            latest_seq: 0,
        };
        view.state.active_filter = filter;
        let ticket = view.issue_fetch();
        (view, ticket)
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn display(&self) -> DisplayState<'_> {
        self.state.display()
    }

    pub fn set_filter(&mut self, filter: Option<ModelType>) -> FetchTicket {
        self.state.active_filter = filter;
        self.state.is_loading = true;
        self.state.error = None;
        self.issue_fetch()
    }

    /// Re-reads the list for the current filter.
    pub fn refresh(&mut self) -> FetchTicket {
        self.state.is_loading = true;
        self.issue_fetch()
    }

    pub fn apply_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<Model>, CatalogError>,
    ) -> FetchOutcome {
        if ticket.view != self.instance || ticket.seq != self.latest_seq {
            debug!(
                seq = ticket.seq,
                latest = self.latest_seq,
                "discarding superseded model fetch"
            );
            return FetchOutcome::Stale;
        }

        self.state.is_loading = false;
        match result {
            Ok(models) => {
                self.state.models = models;
                self.state.error = None;
                FetchOutcome::Applied
            }
            Err(err) => {
                error!(error = %err, filter = ?ticket.filter, "Error fetching models");
                self.state.error = Some(LOAD_FAILED_MESSAGE.to_string());
                FetchOutcome::Failed
            }
        }
    }

    /// Call only after the user confirmed the deletion. Fetches still in
    /// flight become stale so loading holds until the delete settles.
    pub fn begin_delete(&mut self, model_id: ModelId) -> DeleteTicket {
        self.state.is_loading = true;
        self.latest_seq += 1;
        DeleteTicket {
            view: self.instance,
            model_id,
        }
    }

    /// On success returns the one refresh to run with the current filter.
    /// The list itself is never edited locally.
    pub fn finish_delete(
        &mut self,
        ticket: DeleteTicket,
        result: Result<(), CatalogError>,
    ) -> Option<FetchTicket> {
        if ticket.view != self.instance {
            return None;
        }

        match result {
            Ok(()) => Some(self.refresh()),
            Err(err) => {
                error!(error = %err, model_id = ticket.model_id.0, "Error deleting model");
                self.state.error = Some(DELETE_FAILED_MESSAGE.to_string());
                self.state.is_loading = false;
                None
            }
        }
    }

    fn issue_fetch(&mut self) -> FetchTicket {
        self.latest_seq += 1;
        FetchTicket {
            view: self.instance,
            seq: self.latest_seq,
            filter: self.state.active_filter,
        }
    }
}

/// Yes/no gate in front of a deletion. Answering no has no side effects.
pub trait ConfirmDelete {
    fn confirm_delete(&self, model_id: ModelId) -> bool;
}

impl<F> ConfirmDelete for F
where
    F: Fn(ModelId) -> bool,
{
    fn confirm_delete(&self, model_id: ModelId) -> bool {
        self(model_id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Cancelled,
    Deleted,
    Failed,
}

pub struct ListViewController<S> {
    service: S,
    view: ListView,
}

impl<S: CatalogService> ListViewController<S> {
    /// Mounts the view and waits for the initial fetch.
    pub async fn mount(service: S) -> Self {
        Self::mount_filtered(service, None).await
    }

    /// Like [`mount`](Self::mount) but the initial fetch is already narrowed
    /// to `filter`.
    pub async fn mount_filtered(service: S, filter: Option<ModelType>) -> Self {
        let (view, ticket) = ListView::mount_filtered(filter);
        let mut controller = Self { service, view };
        controller.complete(ticket).await;
        controller
    }

    pub fn state(&self) -> &ViewState {
        self.view.state()
    }

    pub fn display(&self) -> DisplayState<'_> {
        self.view.display()
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub async fn set_filter(&mut self, filter: Option<ModelType>) -> FetchOutcome {
        let ticket = self.view.set_filter(filter);
        self.complete(ticket).await
    }

    pub async fn refresh(&mut self) -> FetchOutcome {
        let ticket = self.view.refresh();
        self.complete(ticket).await
    }

    pub async fn delete_model(
        &mut self,
        model_id: ModelId,
        gate: &impl ConfirmDelete,
    ) -> DeleteOutcome {
        if !gate.confirm_delete(model_id) {
            return DeleteOutcome::Cancelled;
        }

        let ticket = self.view.begin_delete(model_id);
        let result = self.service.delete_model(model_id).await;
        match self.view.finish_delete(ticket, result) {
            Some(refresh) => {
                self.complete(refresh).await;
                DeleteOutcome::Deleted
            }
            None => DeleteOutcome::Failed,
        }
    }

    async fn complete(&mut self, ticket: FetchTicket) -> FetchOutcome {
        let result = fetch_models(&self.service, ticket.filter()).await;
        self.view.apply_fetch(ticket, result)
    }
}

/// Display form of one catalog entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelCard<'a> {
    pub model_id: ModelId,
    pub model_type: ModelType,
    pub name: &'a str,
    pub description: &'a str,
    pub links: Vec<CardLink<'a>>,
    pub submitter_link: CardLink<'a>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardLink<'a> {
    pub label: &'static str,
    pub href: &'a str,
}

impl<'a> ModelCard<'a> {
    pub fn from_model(model: &'a Model) -> Self {
        let mut links = vec![CardLink {
            label: "GitHub Repository",
            href: &model.github_link,
        }];
        if let Some(article) = model.article_link.as_deref() {
            links.push(CardLink {
                label: "Related Article",
                href: article,
            });
        }

        Self {
            model_id: model.id,
            model_type: model.model_type,
            name: &model.name,
            description: &model.description,
            links,
            submitter_link: CardLink {
                label: "Submitter's Profile",
                href: &model.submitter_linkedin,
            },
        }
    }

    pub fn type_line(&self) -> String {
        format!("Type: {}", self.model_type.tag())
    }
}

#[cfg(test)]
#[path = "tests/list_view_tests.rs"]
mod tests;
