use anyhow::Result;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use tokio::io::AsyncBufReadExt;
use tracing::info;

use vinorm::{detect_and_normalize, Pipeline, SecDictionary};

#[derive(Parser, Debug)]
#[command(name = "vinorm")]
#[command(about = "Vietnamese ASR transcript normalizer")]
#[command(version)]
struct Args {
    /// Transcript file, one utterance per line; stdin when omitted
    input: Option<PathBuf>,

    /// Spelling-correction dictionary, one "wrong -> correct" rule per line
    #[arg(long)]
    sec_dict: Option<PathBuf>,

    /// Print detected entities as one JSON array per line instead of text
    #[arg(long)]
    entities: bool,

    /// Suppress the console progress bar
    #[arg(long)]
    no_progress: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // WHY: structured JSON logging enables observability and debugging in production
    tracing_subscriber::fmt()
        .with_target(false)
        .json()
        .init();

    let args = Args::parse();

    info!("Starting vinorm");
    info!(?args, "Parsed CLI arguments");

    // WHY: validate inputs early to fail fast with clear errors
    if let Some(path) = &args.input {
        if !path.exists() {
            anyhow::bail!("Input file does not exist: {}", path.display());
        }
        if !path.is_file() {
            anyhow::bail!("Input path is not a file: {}", path.display());
        }
    }

    let sec = match &args.sec_dict {
        Some(path) => SecDictionary::from_file(path)?,
        None => SecDictionary::empty(),
    };
    let pipeline = Pipeline::new(sec);

    match &args.input {
        Some(path) => {
            let content = tokio::fs::read_to_string(path).await?;
            let lines: Vec<&str> = content.lines().collect();

            let bar = if args.no_progress {
                ProgressBar::hidden()
            } else {
                ProgressBar::new(lines.len() as u64)
            };
            bar.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} lines")?
                    .progress_chars("━╸━"),
            );

            for line in &lines {
                emit(&pipeline, line, args.entities)?;
                bar.inc(1);
            }
            bar.finish_and_clear();

            info!(lines = lines.len(), "Normalization complete");
        }
        None => {
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            let mut lines = stdin.lines();
            let mut count = 0u64;
            while let Some(line) = lines.next_line().await? {
                emit(&pipeline, &line, args.entities)?;
                count += 1;
            }
            info!(lines = count, "Normalization complete");
        }
    }

    Ok(())
}

fn emit(pipeline: &Pipeline, line: &str, entities: bool) -> Result<()> {
    if entities {
        println!("{}", serde_json::to_string(&detect_and_normalize(line))?);
    } else {
        println!("{}", pipeline.process(line));
    }
    Ok(())
}
