//! Arbor CLI
//!
//! Tokenize or parse a markup file and print the result.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use arbor_dom::{DomConfig, print_tree};
use arbor_markup::{MarkupTokenizer, build_document_with, parse};
use clap::{Args, Parser, Subcommand};
use owo_colors::OwoColorize;

#[derive(Parser, Debug)]
#[command(name = "arbor")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Show the token stream of a file
    arbor tokenize note.xml

    # Print the DOM tree built from inline markup
    arbor parse --markup '<note><to>Tove</to></note>'

    # Print the generic tree as JSON
    arbor parse note.xml --json

    # Enforce document placement rules while building
    arbor --config arbor.toml parse note.xml
"#)]
struct Cli {
    /// TOML file with tree settings (e.g. `placement = "document-rules"`)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the token stream as JSON.
    Tokenize {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Parse into a single tree and print it.
    Parse {
        #[command(flatten)]
        input: InputArgs,

        /// Print the generic tree as JSON instead of the DOM tree
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
struct InputArgs {
    /// Path to a markup file
    #[arg(value_name = "FILE")]
    path: Option<PathBuf>,

    /// Markup given inline
    #[arg(long, value_name = "MARKUP")]
    markup: Option<String>,
}

impl InputArgs {
    fn read(&self) -> Result<String> {
        match (&self.markup, &self.path) {
            (Some(markup), _) => Ok(markup.clone()),
            (None, Some(path)) => fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display())),
            (None, None) => anyhow::bail!("no input given"),
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<DomConfig> {
    let Some(path) = path else {
        return Ok(DomConfig::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("invalid config {}", path.display()))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Command::Tokenize { input } => {
            let tokens = tokenize(&input.read()?);
            println!("{}", serde_json::to_string_pretty(&tokens)?);
        }
        Command::Parse { input, json } => {
            let roots = parse(tokenize(&input.read()?)).context("markup is not well formed")?;
            if json {
                println!("{}", serde_json::to_string_pretty(&roots)?);
            } else {
                let tree = build_document_with(config, &roots)
                    .context("could not build a document from the markup")?;
                println!("{}", "=== DOM Tree ===".bold());
                print_tree(&tree, tree.root());
            }
        }
    }

    Ok(())
}

/// Tokenize, reporting tolerated input once per message on stderr.
fn tokenize(input: &str) -> Vec<arbor_markup::Token> {
    arbor_common::warning::clear_warnings();
    let mut tokenizer = MarkupTokenizer::new(input.to_string());
    tokenizer.run();
    if !tokenizer.issues().is_empty() {
        eprintln!(
            "{}",
            format!("{} tokenizer issue(s)", tokenizer.issues().len()).yellow()
        );
    }
    tokenizer.into_tokens()
}
