use std::{fmt::Write as _, path::PathBuf, sync::Arc};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use client_core::{
    config::load_settings_from,
    load_settings,
    pages::{
        help_orders::{self, help_order_cards, HelpOrderCard, HelpOrderScope, HelpOrdersPage, QuestionForm},
        FetchOutcome, ListBody, ListResource, Pagination, SaveError,
    },
    GymApi, GymClient,
};
use shared::domain::{HelpOrder, StudentId};
use tracing_subscriber::EnvFilter;

/// Student-side help orders: list what you asked and ask something new.
#[derive(Parser, Debug)]
struct Args {
    #[arg(long)]
    api_url: Option<String>,
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    student_id: i64,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Lists the student's help orders, answered or not.
    List {
        #[arg(long, default_value_t = 1)]
        page: u32,
        /// Prints the raw orders as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Sends a new help order.
    Ask {
        #[arg(required = true)]
        question: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();
    let args = Args::parse();

    let settings = match &args.config {
        Some(path) => load_settings_from(path),
        None => load_settings(),
    }
    .with_api_url(args.api_url);
    let client = GymClient::from_settings(&settings).context("failed to build api client")?;
    let api: Arc<dyn GymApi> = Arc::new(client);
    let student_id = StudentId(args.student_id);

    match args.command {
        Command::List { page, json } => {
            let mut orders =
                HelpOrdersPage::new(Arc::clone(&api), HelpOrderScope::Student(student_id), &settings);
            let mut outcome = orders.mount().await;
            if page != 1 {
                outcome = orders.select_page(page).await.unwrap_or(outcome);
            }
            if outcome == FetchOutcome::Failed {
                if let ListBody::Failed(message) = orders.list().body() {
                    bail!("could not load help orders: {message}");
                }
            }

            if json {
                println!("{}", serde_json::to_string_pretty(orders.list().items())?);
            } else {
                print!("{}", render_list(orders.list().items(), orders.list().pagination()));
            }
        }
        Command::Ask { question } => {
            let form = QuestionForm {
                question: question.join(" "),
            };
            match form.submit(api.as_ref(), student_id).await {
                Ok(order) => {
                    tracing::info!(id = %order.id, "help order created");
                    println!("{}", help_orders::QUESTION_SUCCESS);
                }
                Err(SaveError::Invalid(errors)) => {
                    for (_, message) in errors.iter() {
                        eprintln!("{message}");
                    }
                    bail!("{}", help_orders::QUESTION_FAILURE);
                }
                Err(SaveError::Client(err)) => {
                    return Err(err).context(help_orders::QUESTION_FAILURE);
                }
            }
        }
    }

    Ok(())
}

fn render_badge(card: &HelpOrderCard) -> String {
    if card.badge.disabled {
        format!("( {} )", card.badge.label)
    } else {
        format!("[✔ {}]", card.badge.label)
    }
}

fn render_list(orders: &[HelpOrder], pagination: Pagination) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", help_orders::NEW_HELP_ORDER_LABEL.to_uppercase());
    if orders.is_empty() {
        let _ = writeln!(out, "\n{}", HelpOrder::EMPTY_PLACEHOLDER);
        return out;
    }
    for card in help_order_cards(orders) {
        let _ = writeln!(out, "\n{}  {}", render_badge(&card), card.time);
        let _ = writeln!(out, "  {}", card.question);
        if let Some(answer) = &card.answer {
            let _ = writeln!(out, "  > {answer}");
        }
    }
    let _ = writeln!(out, "\n{}", pagination.label());
    out
}
