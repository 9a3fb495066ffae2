use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use eduvision::{
    config, ingest, logging,
    processing::{self, DocumentService, UserId},
};
use serde::Serialize;
use std::{
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};

#[derive(Parser)]
#[command(
    name = "eduvision",
    about = "Extract, summarize, and question educational documents and images"
)]
struct Cli {
    /// Identity recorded on every conversation.
    #[arg(long, env = "EDUVISION_USER", global = true)]
    user: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Extract text from a PDF, DOCX, TXT, or MD file.
    Extract { file: PathBuf },
    /// Summarize a document or inline text.
    Summarize {
        file: Option<PathBuf>,
        #[arg(long, conflicts_with = "file")]
        text: Option<String>,
        #[arg(long)]
        max_length: Option<usize>,
    },
    /// Answer a question about a document.
    Ask { file: PathBuf, question: String },
    /// Describe an image from its metadata.
    Describe { image: PathBuf },
    /// Answer a question about an image.
    AskImage { image: PathBuf, question: String },
    /// Estimate narration time for text.
    Speak {
        text: String,
        #[arg(long)]
        voice: Option<String>,
    },
    /// Extract every supported document under a directory.
    Batch { dir: PathBuf },
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = config::init_config().context("failed to load configuration")?;
    logging::init_tracing(config);

    let user = UserId::new(cli.user.unwrap_or_default())
        .context("a user id is required (pass --user or set EDUVISION_USER)")?;
    let service = Arc::new(DocumentService::new());

    match cli.command {
        Command::Extract { file } => {
            let bytes = read_file(&file)?;
            let outcome = service.ingest(&user, &file.to_string_lossy(), &bytes)?;
            print_json(&outcome)
        }
        Command::Summarize {
            file,
            text,
            max_length,
        } => {
            let text = match (file, text) {
                (Some(file), _) => extracted_text(&service, &user, &file)?,
                (None, Some(text)) => text,
                (None, None) => anyhow::bail!("provide a file or --text to summarize"),
            };
            print_json(&service.summarize(&user, &text, max_length)?)
        }
        Command::Ask { file, question } => {
            let context = extracted_text(&service, &user, &file)?;
            let document_id = file.to_string_lossy().into_owned();
            let outcome =
                service.ask_document(&user, Some(document_id.as_str()), &context, &question)?;
            print_json(&outcome)
        }
        Command::Describe { image } => {
            let description = processing::describe_image(&read_file(&image)?)?;
            print_json(&serde_json::json!({ "image_analysis": description }))
        }
        Command::AskImage { image, question } => {
            let outcome = service.ask_image(&user, &read_file(&image)?, &question)?;
            print_json(&outcome)
        }
        Command::Speak { text, voice } => {
            let outcome = service.speak(&user, &text, voice.as_deref())?;
            print_json(&serde_json::json!({
                "message": outcome.estimate.message,
                "word_count": outcome.estimate.word_count,
                "estimated_duration": outcome.estimate.duration_label(),
                "voice_used": outcome.estimate.voice,
                "record": outcome.record,
            }))
        }
        Command::Batch { dir } => {
            let report = ingest::ingest_directory(Arc::clone(&service), &user, &dir).await?;
            print_json(&serde_json::json!({
                "report": report,
                "usage": service.usage(),
            }))
        }
    }
}

fn read_file(path: &Path) -> Result<Vec<u8>> {
    fs::read(path).with_context(|| format!("failed to read {}", path.display()))
}

fn extracted_text(service: &DocumentService, user: &UserId, file: &Path) -> Result<String> {
    let bytes = read_file(file)?;
    let outcome = service.ingest(user, &file.to_string_lossy(), &bytes)?;
    Ok(outcome.document.text)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("failed to render JSON output")?;
    println!("{rendered}");
    Ok(())
}
