use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, IsTerminal, Write};
use tracing_subscriber::EnvFilter;

use formnest::config::{Config, OutputFormat};
use formnest::file::loader::{load_form_file, load_form_from_stdin};
use formnest::file::saver::{render, save_result};
use formnest::form::FormSerializer;

/// formnest - Turn flat bracket-named form fields into nested data
#[derive(Parser)]
#[command(name = "formnest")]
#[command(version)]
#[command(about = "Turn flat bracket-named form fields into nested maps and lists", long_about = None)]
struct Cli {
    /// Form document to read (JSON, YAML or JSONL, optionally .gz; omit to read stdin)
    file: Option<String>,

    /// Container id to serialize (default: the first container in the document)
    #[arg(short, long)]
    container: Option<String>,

    /// Write the result to this file instead of stdout
    #[arg(short, long)]
    output: Option<String>,

    /// Output format: json or yaml (overrides the config file)
    #[arg(short, long)]
    format: Option<OutputFormat>,

    /// Skip fields whose value is empty
    #[arg(long)]
    drop_empty: bool,

    /// Log each written field to stderr
    #[arg(short, long)]
    verbose: bool,
}

/// Installs the stderr log subscriber.
///
/// `FORMNEST_LOG` takes precedence; otherwise warnings are shown, or debug
/// events with `--verbose`.
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("FORMNEST_LOG")
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = Config::load();
    if let Some(format) = cli.format {
        config.output_format = format;
    }
    if cli.drop_empty {
        config.drop_empty_values = true;
    }

    let document = if let Some(file_path) = &cli.file {
        load_form_file(file_path).with_context(|| format!("Failed to load {}", file_path))?
    } else {
        if io::stdin().is_terminal() {
            anyhow::bail!("No input file given and stdin is not piped");
        }
        load_form_from_stdin()?
    };

    // Without an explicit id, the first container is used
    let container = match cli.container {
        Some(id) => id,
        None => document
            .ids()
            .next()
            .map(str::to_string)
            .context("The form document contains no containers")?,
    };

    let serializer = FormSerializer::from_config(&config);
    let result = serializer.serialize_container(&document, &container);
    tracing::debug!(
        container = %container,
        diagnostics = result.diagnostics.len(),
        "serialized"
    );

    match &cli.output {
        Some(path) => save_result(path, &result.data, &config)
            .with_context(|| format!("Failed to write {}", path))?,
        None => {
            let output = render(&result.data, &config)?;
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(output.as_bytes())
                .context("Failed to write to stdout")?;
            stdout.flush().context("Failed to flush stdout")?;
        }
    }

    Ok(())
}
