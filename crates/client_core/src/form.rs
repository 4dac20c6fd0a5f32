//! Create-model form state and submission.

use shared::{domain::ModelId, domain::ModelType, protocol::CreateModelRequest};
use thiserror::Error;
use tracing::{error, info};
use url::Url;

use crate::{error::CatalogError, routes::Route, CatalogService};

pub const CREATE_FAILED_MESSAGE: &str =
    "Failed to create model. Please check your inputs and try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    Description,
    ModelType,
    GithubLink,
    ArticleLink,
    SubmitterLinkedin,
}

impl FormField {
    pub fn label(self) -> &'static str {
        match self {
            FormField::Name => "Model Name",
            FormField::Description => "Description",
            FormField::ModelType => "Model Type",
            FormField::GithubLink => "GitHub Repository",
            FormField::ArticleLink => "Article Link (Optional)",
            FormField::SubmitterLinkedin => "Submitter's LinkedIn",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("{} is required", .0.label())]
    Missing(FormField),
    #[error("{} must be a valid URL", .0.label())]
    InvalidUrl(FormField),
}

impl FormError {
    pub fn field(&self) -> FormField {
        match self {
            FormError::Missing(field) | FormError::InvalidUrl(field) => *field,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Created { model_id: ModelId, navigate_to: Route },
    Failed,
}

#[derive(Debug, Clone, Default)]
pub struct CreateModelForm {
    pub name: String,
    pub description: String,
    pub model_type: Option<ModelType>,
    pub github_link: String,
    pub article_link: String,
    pub submitter_linkedin: String,
    is_submitting: bool,
    error: Option<String>,
    invalid: Option<FormError>,
}

impl CreateModelForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_submitting(&self) -> bool {
        self.is_submitting
    }

    /// Banner text after a rejected submission.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Field check that blocked the last submit attempt, if any.
    pub fn invalid(&self) -> Option<FormError> {
        self.invalid
    }

    pub fn submit_label(&self) -> &'static str {
        if self.is_submitting {
            "Submitting..."
        } else {
            "Submit Model"
        }
    }

    /// Required fields must be non-empty and URL fields must parse as
    /// absolute URLs. Values are sent as typed; an empty article link is
    /// treated as absent.
    pub fn validate(&self) -> Result<CreateModelRequest, FormError> {
        let name = required(FormField::Name, &self.name)?;
        let description = required(FormField::Description, &self.description)?;
        let model_type = self
            .model_type
            .ok_or(FormError::Missing(FormField::ModelType))?;
        let github_link = url_field(FormField::GithubLink, &self.github_link)?;
        let article_link = match self.article_link.as_str() {
            "" => None,
            raw => Some(url_field(FormField::ArticleLink, raw)?),
        };
        let submitter_linkedin = url_field(FormField::SubmitterLinkedin, &self.submitter_linkedin)?;

        Ok(CreateModelRequest {
            name,
            description,
            model_type,
            github_link,
            article_link,
            submitter_linkedin,
        })
    }

    /// Validates and, when the fields pass, marks the form as submitting.
    pub fn begin_submit(&mut self) -> Result<CreateModelRequest, FormError> {
        match self.validate() {
            Ok(request) => {
                self.invalid = None;
                self.is_submitting = true;
                self.error = None;
                Ok(request)
            }
            Err(err) => {
                self.invalid = Some(err);
                Err(err)
            }
        }
    }

    pub fn finish_submit(&mut self, result: Result<ModelId, CatalogError>) -> SubmitOutcome {
        self.is_submitting = false;
        match result {
            Ok(model_id) => {
                info!(model_id = model_id.0, "model created");
                SubmitOutcome::Created {
                    model_id,
                    navigate_to: Route::List,
                }
            }
            Err(err) => {
                error!(error = %err, "Error creating model");
                self.error = Some(CREATE_FAILED_MESSAGE.to_string());
                SubmitOutcome::Failed
            }
        }
    }

    pub async fn submit<S>(&mut self, service: &S) -> Result<SubmitOutcome, FormError>
    where
        S: CatalogService + ?Sized,
    {
        let request = self.begin_submit()?;
        let result = service.create_model(request).await;
        Ok(self.finish_submit(result))
    }

    pub fn cancel(&self) -> Route {
        Route::List
    }
}

fn required(field: FormField, value: &str) -> Result<String, FormError> {
    if value.is_empty() {
        return Err(FormError::Missing(field));
    }
    Ok(value.to_string())
}

fn url_field(field: FormField, value: &str) -> Result<String, FormError> {
    let value = required(field, value)?;
    Url::parse(&value).map_err(|_| FormError::InvalidUrl(field))?;
    Ok(value)
}

#[cfg(test)]
#[path = "tests/form_tests.rs"]
mod tests;
