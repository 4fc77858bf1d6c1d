use crate::batch::{BatchRunner, BatchSummary};
use crate::config::ConfigLoader;
use crate::dictionary::{self, Direction};
use crate::errors::Error;
use crate::replacer::{ProcessOptions, Replacer};
use crate::reporter::{ConsoleReporter, Reporter};
use anyhow::Context;
use clap::Parser;
use dialoguer::{Input, Select};
use std::io::IsTerminal;
use std::path::PathBuf;

/// Replace text in files based on dictionary mappings.
///
/// Define replacement dictionaries in a JSON config file, then run this tool
/// to bulk replace text across all files in a folder.
#[derive(Parser, Debug)]
#[command(
    name = "textswap",
    author,
    version,
    about = "Replace text in files based on dictionary mappings",
    long_about = "Replace text in files based on dictionary mappings.

Define replacement dictionaries in a JSON config file, then run this tool
to bulk replace text across all files in a folder.

Config file format (config.json):
  {
    \"dictionaries\": {
      \"rebrand\": { \"Acme\": \"Globex\", \"acme\": \"globex\" }
    },
    \"ignore_extensions\": [\".png\", \".lock\"],
    \"ignore_directories\": [\".git\", \"node_modules\"],
    \"ignore_file_prefixes\": [\".\"]
  }

Pairs are applied in the order they are written, each one over the output of
the previous one.

EXAMPLES:
  textswap -d 1 -f src/                   # keys -> values, single dictionary
  textswap -d 2 -f src/ -n rebrand        # values -> keys
  textswap -d 1 -f src/ --dry-run         # preview as a diff"
)]
pub struct Args {
    /// Path to config file (default: config.json in current directory).
    #[arg(short, long, default_value = "config.json", env = "TEXTSWAP_CONFIG")]
    pub config: PathBuf,

    /// 1 for keys-to-values, 2 for values-to-keys. Prompted for when omitted.
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=2))]
    pub direction: Option<u8>,

    /// Path to folder containing files to process. Prompted for when omitted.
    #[arg(short, long)]
    pub folder: Option<PathBuf>,

    /// Dictionary name from config (auto-selects if only one).
    #[arg(short = 'n', long)]
    pub dict_name: Option<String>,

    /// Show what would be replaced without making changes.
    #[arg(long)]
    pub dry_run: bool,

    /// Log every file handled to stderr.
    #[arg(short, long)]
    pub verbose: bool,

    /// Disable coloured output.
    #[arg(long)]
    pub no_color: bool,
}

/// Parses command-line arguments and returns the populated `Args` struct.
pub fn parse_args() -> Args {
    Args::parse()
}

/// The main entry point for a replacement run.
///
/// This function orchestrates the entire process:
/// 1. It fills in missing direction and folder, asking on a terminal.
/// 2. It loads the config and picks the dictionary, asking when several exist.
/// 3. It walks the folder and prints the summary.
pub fn run(args: Args) -> anyhow::Result<BatchSummary> {
    let interactive = std::io::stdin().is_terminal();

    let direction = match args.direction {
        Some(n) => Direction::try_from(n)?,
        None if interactive => prompt_direction()?,
        None => anyhow::bail!("Missing option '--direction' (1 or 2)"),
    };

    let folder = match args.folder {
        Some(folder) => folder,
        None if interactive => prompt_folder()?,
        None => anyhow::bail!("Missing option '--folder'"),
    };
    if !folder.is_dir() {
        return Err(Error::FolderNotFound(folder).into());
    }

    let config_path = ConfigLoader::find_config(&args.config)?;
    let config = ConfigLoader::load(&config_path)?;

    let dict_name = match args.dict_name {
        Some(name) => Some(name),
        None if interactive && config.dictionaries.len() > 1 => {
            let names: Vec<&str> = config.dictionaries.keys().map(String::as_str).collect();
            Some(prompt_dictionary(&names)?)
        }
        None => None,
    };

    let resolution = dictionary::resolve(&config.dictionaries, dict_name.as_deref(), direction)?;

    let color = !args.no_color
        && std::env::var_os("NO_COLOR").is_none()
        && std::io::stdout().is_terminal();
    let mut reporter = ConsoleReporter::stdout(color);
    if resolution.auto_selected {
        reporter.dictionary_selected(&resolution.name);
    }

    let replacer = Replacer::new(resolution.replacements);
    let options = ProcessOptions {
        dry_run: args.dry_run,
    };
    let summary = BatchRunner::new(&replacer, &config.ignore, options).run(&folder, &mut reporter);

    Ok(summary)
}

fn prompt_direction() -> anyhow::Result<Direction> {
    let choice = Select::new()
        .with_prompt("Direction")
        .items(&["1: keys-to-values", "2: values-to-keys"])
        .default(0)
        .interact()
        .context("failed to read direction")?;
    Ok(if choice == 0 {
        Direction::KeysToValues
    } else {
        Direction::ValuesToKeys
    })
}

fn prompt_folder() -> anyhow::Result<PathBuf> {
    let folder: String = Input::new()
        .with_prompt("Folder path")
        .validate_with(|input: &String| -> Result<(), String> {
            if PathBuf::from(input).is_dir() {
                Ok(())
            } else {
                Err(format!("'{input}' is not a directory"))
            }
        })
        .interact_text()
        .context("failed to read folder path")?;
    Ok(PathBuf::from(folder))
}

fn prompt_dictionary(names: &[&str]) -> anyhow::Result<String> {
    let choice = Select::new()
        .with_prompt("Dictionary name")
        .items(names)
        .default(0)
        .interact()
        .context("failed to read dictionary name")?;
    Ok(names[choice].to_string())
}
