//! CLI for building Business Intelligence Decks.

use anyhow::{Context, Result};
use bid_core::{
    import_rows, read_csv, write_template_csv, DeckConfig, Session, SlideViewer,
};
use bid_enrich::{EnrichConfig, Enricher, PerplexityClient};
use bid_pptx::{output_filename, DeckReader, DeckWriter};
use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::sync::watch;

/// Build company-profile decks from question/answer files.
#[derive(Parser, Debug)]
#[command(name = "bid")]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write the answer template as CSV
    Template {
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Write the example record as JSON
    Example {
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Import answers from a CSV file into a record
    Import {
        /// Answer file with question id and answer columns
        input: PathBuf,

        /// Record to import into (default: the example record)
        #[arg(short, long)]
        record: Option<PathBuf>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Fill a record from the enrichment service (needs PERPLEXITY_API_KEY)
    Enrich {
        /// Company to look up (default: the record's company name)
        company: Option<String>,

        /// Record to enrich (default: the example record)
        #[arg(short, long)]
        record: Option<PathBuf>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Timeout per section request, in seconds
        #[arg(long, default_value = "60")]
        timeout: u64,

        /// Give up on unanswered sections after this many seconds
        #[arg(long)]
        deadline: Option<u64>,

        /// Model name
        #[arg(long)]
        model: Option<String>,
    },

    /// Print the slide outline of a record
    Outline {
        /// Record file (default: the example record)
        record: Option<PathBuf>,

        #[command(flatten)]
        deck: DeckArgs,
    },

    /// Render a record to a .pptx deck
    Render {
        /// Record file (default: the example record)
        record: Option<PathBuf>,

        /// Output directory (default: current directory)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        deck: DeckArgs,
    },

    /// Print the text and tables of a .pptx deck
    Inspect {
        /// Deck file
        input: PathBuf,

        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Deck styling overrides.
#[derive(clap::Args, Debug)]
struct DeckArgs {
    /// Brand shown in the footer
    #[arg(long)]
    brand: Option<String>,

    /// Footer label next to the accent bar
    #[arg(long)]
    footer_label: Option<String>,

    /// Accent colour as hex, e.g. FF6B35
    #[arg(long)]
    accent_color: Option<String>,

    /// Table rows per slide before continuing on a new slide
    #[arg(long, default_value = "12")]
    rows_per_page: usize,
}

impl DeckArgs {
    fn config(&self) -> DeckConfig {
        let mut config = DeckConfig::new().with_rows_per_page(self.rows_per_page);
        if let Some(brand) = &self.brand {
            config = config.with_brand(brand);
        }
        if let Some(label) = &self.footer_label {
            config = config.with_footer_label(label);
        }
        if let Some(color) = &self.accent_color {
            config = config.with_accent_color(color);
        }
        config
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    if args.verbose {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    }

    match args.command {
        Command::Template { output } => {
            write_template_csv(open_output(output.as_deref())?)?;
        }
        Command::Example { output } => {
            Session::new().write_json(open_output(output.as_deref())?)?;
        }
        Command::Import {
            input,
            record,
            output,
        } => {
            let mut session = load_session(record.as_deref())?;
            let file = File::open(&input)
                .with_context(|| format!("Failed to open {}", input.display()))?;
            let rows = read_csv(BufReader::new(file))
                .with_context(|| format!("Failed to read {}", input.display()))?;

            let report = import_rows(&rows);
            for skipped in &report.skipped {
                eprintln!(
                    "  Row {} ({}): {}",
                    skipped.index + 1,
                    skipped.question_id,
                    skipped.reason
                );
            }
            eprintln!(
                "Imported {} fields, skipped {} rows",
                report.imported(),
                report.skipped.len()
            );

            session.apply(&report.record);
            session.write_json(open_output(output.as_deref())?)?;
        }
        Command::Enrich {
            company,
            record,
            output,
            timeout,
            deadline,
            model,
        } => {
            let mut session = load_session(record.as_deref())?;
            let company = company.unwrap_or_else(|| session.get().company_name.clone());
            anyhow::ensure!(!company.trim().is_empty(), "No company name to enrich");

            let mut config = EnrichConfig::from_env()?.with_timeout(Duration::from_secs(timeout));
            if let Some(model) = model {
                config = config.with_model(model);
            }
            let enricher = Enricher::new(PerplexityClient::new(config.clone()))
                .with_timeout(config.timeout());

            let (cancel_tx, cancel_rx) = watch::channel(false);
            if let Some(secs) = deadline {
                tokio::spawn(async move {
                    tokio::time::sleep(Duration::from_secs(secs)).await;
                    let _ = cancel_tx.send(true);
                });
            }

            if args.verbose {
                eprintln!("Enriching: {}", company);
            }
            let report = enricher.enrich_until(&company, cancel_rx).await;
            for (section, e) in report.failed() {
                eprintln!("  {} failed: {}", section.key(), e);
            }
            eprintln!(
                "Enriched {} of {} sections",
                report.succeeded().count(),
                report.outcomes.len()
            );

            session.apply(&report.record);
            session.write_json(open_output(output.as_deref())?)?;
        }
        Command::Outline { record, deck } => {
            let session = load_session(record.as_deref())?;
            let mut viewer = SlideViewer::for_record(session.get(), &deck.config());
            let stdout = io::stdout();
            let mut out = stdout.lock();
            for _ in 0..viewer.len() {
                writeln!(out, "== {} ==", viewer.position())?;
                if let Some(slide) = viewer.current() {
                    for line in slide.text_lines() {
                        writeln!(out, "{}", line)?;
                    }
                }
                writeln!(out)?;
                viewer.next();
            }
        }
        Command::Render {
            record,
            output,
            deck,
        } => {
            let session = load_session(record.as_deref())?;
            let output_path = get_output_path(&session.get().company_name, output.as_ref())?;
            let file = File::create(&output_path)
                .with_context(|| format!("Failed to create {}", output_path.display()))?;

            let count = DeckWriter::new()
                .with_config(deck.config())
                .write(session.get(), file)
                .with_context(|| format!("Failed to write {}", output_path.display()))?;
            if args.verbose {
                eprintln!("  Rendered {} slides", count);
            }
            println!("{}", output_path.display());
        }
        Command::Inspect { input, json } => {
            let file = File::open(&input)
                .with_context(|| format!("Failed to open {}", input.display()))?;
            let summary = DeckReader::new()
                .read(BufReader::new(file))
                .with_context(|| format!("Failed to read {}", input.display()))?;

            let stdout = io::stdout();
            let mut out = stdout.lock();
            if json {
                serde_json::to_writer_pretty(&mut out, &summary)?;
                writeln!(out)?;
            } else {
                for slide in &summary.slides {
                    writeln!(out, "== Slide {} ==", slide.number)?;
                    for text in &slide.texts {
                        writeln!(out, "{}", text)?;
                    }
                    for table in &slide.tables {
                        writeln!(out, "[table: {} rows]", table.len().saturating_sub(1))?;
                    }
                    writeln!(out)?;
                }
            }
        }
    }

    Ok(())
}

/// Load a record file, or start from the example record.
fn load_session(path: Option<&Path>) -> Result<Session> {
    match path {
        Some(path) => {
            let file =
                File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
            Session::from_json(BufReader::new(file))
                .with_context(|| format!("Failed to parse {}", path.display()))
        }
        None => Ok(Session::new()),
    }
}

/// Open a file for writing, or stdout.
fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    match path {
        Some(path) => {
            let file =
                File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(io::stdout().lock())),
    }
}

/// Determine the deck path for a company.
fn get_output_path(company: &str, output_dir: Option<&PathBuf>) -> Result<PathBuf> {
    let filename = output_filename(company);

    let output_path = match output_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;
            dir.join(filename)
        }
        None => PathBuf::from(filename),
    };

    Ok(output_path)
}
