//! Worksheet generator CLI
//!
//! Builds a three-section worksheet PDF for a topic, with content taken from
//! a JSON file, an Ollama-compatible endpoint, or both.

use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use std::process;

use pdf_worksheets::content::WorksheetContent;
use pdf_worksheets::document::{DocumentAssembler, DEFAULT_OUTPUT};
use pdf_worksheets::pdf::count_pages;
use pdf_worksheets::source::{OllamaSource, DEFAULT_BASE_URL, DEFAULT_MODEL};

/// PDF Worksheets - generate language-learning worksheets
#[derive(Parser)]
#[command(name = "pdf-worksheets")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    # Generate a full worksheet, content produced by a local Ollama model
    pdf-worksheets generate \"An airport departures board\" -o airport.pdf

    # Pre-supply some or all sections from a JSON file
    pdf-worksheets generate \"A restaurant menu\" --content menu.json

    # Deterministic answer shuffle
    pdf-worksheets generate \"A restaurant menu\" --content menu.json --seed 7

    # Inspect the result
    pdf-worksheets info final_document.pdf")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a worksheet PDF for a topic
    Generate {
        /// Worksheet topic, e.g. "An airport departures board"
        topic: String,

        /// Language skill shown in the section headers
        #[arg(long, default_value = "Reading")]
        skill: String,

        /// Difficulty level shown in the section headers
        #[arg(long, default_value = "A1")]
        difficulty: String,

        /// Output PDF file path
        #[arg(short, long, default_value = DEFAULT_OUTPUT)]
        output: PathBuf,

        /// JSON file with pre-supplied section content; sections present
        /// there are used as-is, the rest are generated
        #[arg(long)]
        content: Option<PathBuf>,

        /// Seed for the answer shuffle (random when omitted)
        #[arg(long)]
        seed: Option<u64>,

        /// Model used for content generation
        #[arg(long, default_value = DEFAULT_MODEL)]
        model: String,

        /// Base URL of the Ollama-compatible endpoint
        #[arg(long, default_value = DEFAULT_BASE_URL)]
        ollama_url: String,

        /// Open the output file after creation
        #[arg(long)]
        open: bool,
    },

    /// Show information about a PDF file
    Info {
        /// PDF file to inspect
        input: PathBuf,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Generate {
            topic,
            skill,
            difficulty,
            output,
            content,
            seed,
            model,
            ollama_url,
            open,
        } => cmd_generate(
            topic, skill, difficulty, output, content, seed, model, ollama_url, open,
        ),
        Commands::Info { input } => cmd_info(input),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn cmd_generate(
    topic: String,
    skill: String,
    difficulty: String,
    output: PathBuf,
    content: Option<PathBuf>,
    seed: Option<u64>,
    model: String,
    ollama_url: String,
    open: bool,
) -> anyhow::Result<()> {
    let content = match content {
        Some(path) => WorksheetContent::from_path(&path)?,
        None => WorksheetContent::default(),
    };

    let mut assembler = DocumentAssembler::new(skill, difficulty, topic).with_content(content);
    let source = OllamaSource::new(ollama_url, model);

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    if !assembler.generate(&source, &mut rng, &output) {
        anyhow::bail!("worksheet generation failed");
    }

    if open {
        open_file(&output)?;
    }

    Ok(())
}

fn cmd_info(input: PathBuf) -> anyhow::Result<()> {
    if !input.exists() {
        anyhow::bail!("input file not found: {}", input.display());
    }

    let pages = count_pages(&input)?;

    println!("File: {}", input.display());
    println!("Pages: {pages}");

    Ok(())
}

/// Open a file with the system default application
fn open_file(path: &PathBuf) -> anyhow::Result<()> {
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open").arg(path).spawn()?;
    }
    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open").arg(path).spawn()?;
    }
    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/C", "start", "", &path.display().to_string()])
            .spawn()?;
    }
    Ok(())
}
