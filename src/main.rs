//! Lsifgen CLI - Command-line interface for the LSIF index generator

use clap::{Parser, Subcommand};
use lsifgen::{JsonEmitter, LANGUAGE_PY, PythonProvider, export_project};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser)]
#[command(name = "lsifgen")]
#[command(version = "0.1.0")]
#[command(about = "LSIF index generator - code-intelligence graphs for editors and code browsers")]
#[command(long_about = r#"
Lsifgen exports a code-intelligence graph from your codebase, enabling:
  • Go to definition
  • Find references
  • Hover documentation

Example usage:
  lsifgen index --path ./src
  lsifgen index --path ./app/models.py --output data.lsif
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Index a file or directory into an LSIF dump
    Index {
        /// Path to the file or directory to index
        #[arg(short, long)]
        path: PathBuf,

        /// Path of the dump file to write
        #[arg(short, long, default_value = "dump.lsif")]
        output: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    match cli.command {
        Commands::Index { path, output } => {
            tracing::info!("Indexing {} into {:?}", path.display(), output);

            let files = collect_python_files(&path)?;
            if files.is_empty() {
                println!("∅ No Python files found under {:?}", path);
                return Ok(());
            }

            println!("🚀 Indexing: {:?}", path);
            println!("🗄️  Dump: {:?}", output);

            let out = std::fs::File::create(&output)?;
            let mut emitter = JsonEmitter::new(BufWriter::new(out));
            let provider = PythonProvider::new();

            export_project(&mut emitter, &provider, LANGUAGE_PY, &files)?;
            emitter.into_inner().flush()?;

            println!("\n✅ Indexing complete!");
            println!("   Files exported: {}", files.len());
            println!("🗄️  Dump saved to: {:?}", output);
        }
    }

    Ok(())
}

/// Collect the Python files to export, sorted for a reproducible dump.
/// Directories are walked gitignore-aware.
fn collect_python_files(path: &Path) -> anyhow::Result<Vec<PathBuf>> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }

    let mut files = Vec::new();
    for entry in ignore::Walk::new(path) {
        let entry = entry?;
        let is_file = entry.file_type().is_some_and(|t| t.is_file());
        if is_file && entry.path().extension().and_then(|e| e.to_str()) == Some("py") {
            files.push(entry.path().to_path_buf());
        }
    }
    files.sort();
    Ok(files)
}
