//! transclip - clipboard translator
//!
//! Reads the current clipboard text, translates it with the DeepL API,
//! writes the result back to the clipboard and shows it in a notification.

mod app;
mod config;
mod models;
mod services;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::app::{App, Outcome, RunOptions};
use crate::models::TargetLang;
use crate::services::DeepLClient;

/// transclip - translate the clipboard in place
#[derive(Parser, Debug)]
#[command(name = "transclip")]
#[command(about = "Translate the clipboard with the DeepL API", long_about = None)]
struct Args {
    /// Translate to Chinese instead of English
    #[arg(long)]
    zh: bool,

    /// Do not show a notification
    #[arg(long)]
    silent: bool,

    /// Do not copy the result back to the clipboard
    #[arg(long)]
    no_copy: bool,
}

impl Args {
    fn target(&self) -> TargetLang {
        if self.zh {
            TargetLang::Zh
        } else {
            TargetLang::En
        }
    }
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Logs go to stderr; stdout carries only the outcome text.
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "transclip=info,warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Setup faults take the same terminal path as pipeline failures.
    let outcome = match run(args).await {
        Ok(outcome) => outcome,
        Err(e) => Outcome::Failure(format!("Error: {:#}", e)),
    };

    println!("{}", outcome.text());
    std::process::exit(outcome.exit_code());
}

/// Assemble the pipeline and run one clipboard snapshot through it.
async fn run(args: Args) -> Result<Outcome> {
    let config = config::Config::load()?;

    let clipboard = services::clipboard::detect();
    let notifier = services::notifier::detect(config.notify.title.clone());
    let translator = DeepLClient::new(
        config.api.endpoint.clone(),
        config::credential_from_env(),
        config.timeout(),
    )?;

    let app = App::new(
        clipboard,
        notifier,
        Box::new(translator),
        RunOptions {
            target: args.target(),
            notifications: !args.silent,
            copy_back: !args.no_copy,
            max_notify_chars: config.notify.max_chars,
        },
    );

    Ok(app.run().await)
}
