use anyhow::{Context, Result};
use clap::{ArgAction, CommandFactory, Parser};
use clap_complete::{generate, Shell};
use env_logger::Builder;
use log::LevelFilter;
use spellfix::cli::output::{self, OutputFormat};
use spellfix::cli::session::{Session, SessionOutcome};
use spellfix::config::Overrides;
use spellfix::{dict, Config, SpellChecker};
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "spellfix")]
#[command(version, about = "Find, rank and correct misspellings in place", long_about = None)]
struct Cli {
    /// Files to check
    #[arg(value_name = "FILES")]
    files: Vec<PathBuf>,

    /// Check this text instead of files
    #[arg(short, long, conflicts_with = "files")]
    text: Option<String>,

    /// Fix misspellings (auto-apply the top suggestion)
    #[arg(short, long)]
    fix: bool,

    /// Review each misspelling interactively
    #[arg(short, long, requires = "fix")]
    interactive: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Exit with code 0 even if errors are found
    #[arg(long)]
    no_fail: bool,

    /// Installed dictionary to use (e.g., en_US, en_GB)
    #[arg(short, long)]
    language: Option<String>,

    /// Use your own dictionary file (word list or compiled .dict)
    #[arg(short, long, value_name = "PATH")]
    dictionary: Option<PathBuf>,

    /// Output format (text, json)
    #[arg(short = 'o', long, default_value = "text")]
    format: OutputFormat,

    /// Personal word list merged into the dictionary
    #[arg(long)]
    personal_dict: Option<PathBuf>,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Generate shell completion script
    #[arg(long, value_name = "SHELL")]
    completion: Option<Shell>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Parser, Debug)]
enum Commands {
    /// Dictionary management
    Dict {
        #[command(subcommand)]
        action: DictCommands,
    },
}

#[derive(Parser, Debug)]
enum DictCommands {
    /// List installed dictionaries
    List,
    /// Download a dictionary
    Download {
        /// Language code (e.g., en_US, en_GB)
        language: String,
    },
    /// Update all dictionaries
    Update,
    /// Show dictionary info
    Info {
        /// Language code
        language: String,
    },
}

/// Where a piece of text came from and where changes go back to.
enum Source {
    File(PathBuf),
    Inline(String),
}

impl Source {
    fn label(&self) -> String {
        match self {
            Source::File(path) => path.display().to_string(),
            Source::Inline(_) => "<text>".to_string(),
        }
    }

    fn read(&self) -> Result<String> {
        match self {
            Source::File(path) => fs::read_to_string(path)
                .with_context(|| format!("Failed to read file: {}", path.display())),
            Source::Inline(text) => Ok(text.clone()),
        }
    }

    fn write(&self, content: &str) -> Result<()> {
        match self {
            Source::File(path) => fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path.display())),
            Source::Inline(_) => {
                println!("{}", content);
                Ok(())
            }
        }
    }
}

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    let mut builder = Builder::new();
    builder
        .filter_level(level)
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()));
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    builder.init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Some(shell) = cli.completion {
        let mut cmd = Cli::command();
        generate(shell, &mut cmd, "spellfix", &mut io::stdout());
        return Ok(());
    }

    if let Some(command) = cli.command {
        return handle_command(command);
    }

    let sources: Vec<Source> = match &cli.text {
        Some(text) => vec![Source::Inline(text.clone())],
        None => cli.files.iter().cloned().map(Source::File).collect(),
    };
    if sources.is_empty() {
        anyhow::bail!("No files specified. Use --help for usage information.");
    }

    let config = Config::load(Overrides {
        language: cli.language.clone(),
        dictionary: cli.dictionary.clone(),
        personal_dictionary: cli.personal_dict.clone(),
    })?;
    let mut checker = SpellChecker::new(&config)?;
    let colored = !cli.no_color;

    let mut total_errors = 0;
    let mut total_fixed = 0;

    for source in &sources {
        if let Source::File(path) = source {
            if !path.exists() {
                eprintln!("Error: File not found: {}", path.display());
                continue;
            }
        }
        let content = source.read()?;

        if !cli.fix {
            let result = checker.check(&content)?;
            output::print_errors(&source.label(), &result, colored, &cli.format)?;
            total_errors += result.error_count;
        } else if cli.interactive {
            let radius = checker.context_radius();
            let mut session =
                Session::new(checker.dictionary_mut(), content.clone(), radius, colored);
            let outcome = session.run()?;
            let fixed = session.corrections();
            let text = session.into_text();

            if text != content {
                source.write(&text)?;
            }
            total_fixed += fixed;
            if outcome == SessionOutcome::Quit {
                break;
            }
        } else {
            let (text, fixed) = checker.fix_auto(&content)?;
            if fixed > 0 {
                source.write(&text)?;
            }
            total_fixed += fixed;
        }
    }

    if cli.fix {
        output::print_fix_summary(total_fixed, sources.len(), colored);
    } else if cli.format == OutputFormat::Text {
        output::print_check_summary(total_errors, sources.len(), colored);
    }

    if total_errors > 0 && !cli.no_fail && !cli.fix {
        std::process::exit(1);
    }

    Ok(())
}

fn handle_command(command: Commands) -> Result<()> {
    match command {
        Commands::Dict { action } => match action {
            DictCommands::List => dict::manager::list_dictionaries()?,
            DictCommands::Download { language } => dict::manager::download_dictionary(&language)?,
            DictCommands::Update => dict::manager::update_dictionaries()?,
            DictCommands::Info { language } => dict::manager::show_info(&language)?,
        },
    }
    Ok(())
}
