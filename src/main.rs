use anyhow::Result;
use clap::Parser;
use std::path::{Path, PathBuf};

use crate::error::NoteError;

/// Convert a Zettelkasten archive of `<ID> <Title>.md` notes into an Obsidian
/// vault with YAML frontmatter.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory holding the archive notes
    input_dir: PathBuf,
    /// Directory to write the vault to. ALL of its current contents are deleted.
    output_dir: PathBuf,
}

pub struct MarkdownProcessor {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
}

// Main processing traits
pub trait MarkdownProcessing {
    fn read_note(&self, file_path: &Path) -> Result<String, NoteError>;
    fn write_note(&self, file_name: &str, text: &str) -> Result<PathBuf, NoteError>;
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = config::Config::new()?;

    let processor = MarkdownProcessor {
        input_path: cli.input_dir,
        output_path: cli.output_dir,
    };

    let report = vault::convert_archive(&config, &processor)?;
    println!("{}", report.summary());

    if let Some(path) = &config.report_path {
        report.write_json(path)?;
    }

    Ok(())
}

// Implementation modules
mod backlinks;
mod config;
mod error;
mod filename;
mod frontmatter;
mod header;
mod keywords;
mod markdown;
mod note;
mod report;
mod vault;
