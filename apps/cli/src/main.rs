use std::{
    io::{self, BufRead, Write},
    sync::Arc,
};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use client_core::{
    CreateModelForm, DeleteOutcome, DisplayState, HttpCatalogClient, ListViewController,
    ModelCard, SubmitOutcome,
    list_view::{DELETE_CONFIRM_PROMPT, EMPTY_MESSAGE},
};
use shared::domain::{ModelId, ModelType};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "modelsbase", about = "Command-line client for the AI model catalog")]
struct Cli {
    #[arg(
        long,
        env = "MODELSBASE_SERVER_URL",
        default_value = "http://127.0.0.1:8080"
    )]
    server_url: String,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the catalog, optionally narrowed to one model type.
    List {
        #[arg(long)]
        model_type: Option<ModelType>,
        #[arg(long)]
        json: bool,
    },
    /// Submit a new model.
    Create {
        #[arg(long)]
        name: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        model_type: ModelType,
        #[arg(long)]
        github_link: String,
        #[arg(long, default_value = "")]
        article_link: String,
        #[arg(long)]
        submitter_linkedin: String,
    },
    /// Delete a model after confirmation.
    Delete {
        model_id: i64,
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();
    let cli = Cli::parse();

    let client = Arc::new(parse_server_url(&cli.server_url)?);

    match cli.command {
        Command::List { model_type, json } => {
            let controller = ListViewController::mount_filtered(client, model_type).await;
            if json {
                if let Some(message) = controller.state().error.as_deref() {
                    bail!("{message}");
                }
                println!("{}", serde_json::to_string_pretty(&controller.state().models)?);
            } else {
                print_display(controller.display())?;
            }
        }
        Command::Create {
            name,
            description,
            model_type,
            github_link,
            article_link,
            submitter_linkedin,
        } => {
            let mut form = CreateModelForm::new();
            form.name = name;
            form.description = description;
            form.model_type = Some(model_type);
            form.github_link = github_link;
            form.article_link = article_link;
            form.submitter_linkedin = submitter_linkedin;
            match form.submit(client.as_ref()).await? {
                SubmitOutcome::Created { model_id, .. } => println!("created model_id={model_id}"),
                SubmitOutcome::Failed => {
                    bail!("{}", form.error().unwrap_or("model was not created"))
                }
            }
        }
        Command::Delete { model_id, yes } => {
            let mut controller = ListViewController::mount(client).await;
            let model_id = ModelId(model_id);
            let outcome = if yes {
                controller.delete_model(model_id, &|_: ModelId| true).await
            } else {
                controller.delete_model(model_id, &prompt_confirm).await
            };
            match outcome {
                DeleteOutcome::Cancelled => println!("cancelled"),
                DeleteOutcome::Deleted => {
                    println!("deleted model_id={model_id}");
                    print_display(controller.display())?;
                }
                DeleteOutcome::Failed => bail!(
                    "{}",
                    controller
                        .state()
                        .error
                        .as_deref()
                        .unwrap_or("model was not deleted")
                ),
            }
        }
    }

    Ok(())
}

fn prompt_confirm(model_id: ModelId) -> bool {
    let mut stdout = io::stdout();
    if write!(stdout, "{DELETE_CONFIRM_PROMPT} (model {model_id}) [y/N] ")
        .and_then(|()| stdout.flush())
        .is_err()
    {
        return false;
    }
    let mut answer = String::new();
    match io::stdin().lock().read_line(&mut answer) {
        Ok(_) => is_yes(&answer),
        Err(err) => {
            tracing::warn!("failed to read confirmation: {err}");
            false
        }
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

fn print_display(display: DisplayState<'_>) -> Result<()> {
    match display {
        DisplayState::Loading => bail!("catalog fetch did not complete"),
        DisplayState::Error(message) => bail!("{message}"),
        DisplayState::Empty => println!("{EMPTY_MESSAGE}"),
        DisplayState::Grid(models) => {
            for model in models {
                let card = ModelCard::from_model(model);
                println!("[{}] {}  ({})", card.model_id, card.name, card.type_line());
                println!("    {}", card.description);
                for link in card.links.iter().chain([&card.submitter_link]) {
                    println!("    {}: {}", link.label, link.href);
                }
            }
        }
    }
    Ok(())
}

fn parse_server_url(raw: &str) -> Result<HttpCatalogClient> {
    HttpCatalogClient::new(raw).with_context(|| format!("invalid server url {raw:?}"))
}
