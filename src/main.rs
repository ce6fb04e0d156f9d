/*!
Main binary for jtree.
*/

use anyhow::{Context, Result};
use clap::{ArgAction, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use log::{debug, info};
use std::io::stdout;
use std::io::{self};
use std::{
    fs::{self},
    io::{IsTerminal, Read},
    path::PathBuf,
};

use jtree::{Lexer, commands, parser::DEFAULT_MAX_DEPTH, utils};

/// Upper bound for `--max-depth`; deeper recursion risks overflowing the
/// main thread's stack.
const MAX_DEPTH_CEILING: usize = 1024;

/// Parse a JSON document and print the resulting tree.
#[derive(Parser)]
#[command(name = "jt", version, about, long_about = None, disable_help_subcommand = true)]
struct Args {
    /// Optional subcommands
    #[command(subcommand)]
    command: Option<Commands>,
    #[arg(value_name = "FILE")]
    /// Optional path to JSON file. If omitted, reads from STDIN
    input: Option<PathBuf>,
    /// Do not pretty-print the output, instead use compact
    #[arg(long, action = ArgAction::SetTrue)]
    compact: bool,
    /// Print the token stream instead of the parsed tree
    #[arg(long, action = ArgAction::SetTrue)]
    tokens: bool,
    /// Display depth of the input document
    #[arg(long, action = ArgAction::SetTrue)]
    depth: bool,
    /// Output format for the parsed tree
    #[arg(long, value_enum, default_value_t = Format::Json)]
    format: Format,
    /// Maximum nesting depth of objects and arrays (at most 1024)
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH, value_parser = parse_max_depth)]
    max_depth: usize,
    /// When to colorize output
    #[arg(long, value_enum, default_value_t = ColorChoice::Auto)]
    color: ColorChoice,
    #[command(flatten)]
    verbosity: Verbosity<WarnLevel>,
}

/// Available subcommands for `jt`
#[derive(Subcommand)]
enum Commands {
    #[command(subcommand)]
    /// Generate additional documentation and/or completions
    Generate(GenerateCommand),
}

/// Generate shell completions and man page
#[derive(Subcommand)]
enum GenerateCommand {
    /// Generate shell completions for the given shell to stdout.
    Shell { shell: clap_complete::Shell },
    /// Generate a man page for jt to output directory if specified, else
    /// the current directory.
    Man {
        /// The output directory to write the man pages.
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Json,
    Yaml,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ColorChoice {
    Auto,
    Always,
    Never,
}

/// Entry point for main binary.
///
/// Reads the document from FILE or piped STDIN, parses it, and prints the
/// tree (or token stream) to STDOUT. Parse errors are reported with their
/// line and offset and exit with a non-zero status.
fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(args.verbosity.log_level_filter())
        .init();

    match args.command {
        Some(Commands::Generate(cmd)) => match cmd {
            GenerateCommand::Shell { shell } => {
                let mut cmd = Args::command();
                commands::generate::write_completions(
                    shell,
                    &mut cmd,
                    &mut stdout().lock(),
                );
            }
            GenerateCommand::Man { output_dir } => {
                let written = commands::generate::generate_man_pages(
                    &Args::command(),
                    output_dir,
                )?;
                for path in written {
                    println!("Generated: {}", path.display());
                }
            }
        },
        None => {
            match args.color {
                ColorChoice::Always => colored::control::set_override(true),
                ColorChoice::Never => colored::control::set_override(false),
                ColorChoice::Auto if !io::stdout().is_terminal() => {
                    colored::control::set_override(false);
                }
                ColorChoice::Auto => {}
            }

            let input_content = if let Some(path) = &args.input {
                fs::read_to_string(path).with_context(|| {
                    format!("Failed to read file {}", path.display())
                })?
            } else {
                if io::stdin().is_terminal() {
                    // No piped input and no file specified
                    let mut cmd = Args::command();
                    return Ok(cmd.print_help()?);
                }
                let mut buffer = String::new();
                io::stdin().read_to_string(&mut buffer)?;
                buffer
            };
            debug!("read {} bytes of input", input_content.len());

            if args.tokens {
                return utils::write_tokens(
                    &mut stdout().lock(),
                    Lexer::new(&input_content),
                );
            }

            let program = jtree::Parser::new(Lexer::new(&input_content))
                .with_max_depth(args.max_depth)
                .parse_program()
                .with_context(|| "Failed to parse JSON")?;
            let root = program.root_value;
            info!("parsed {} of depth {}", root.kind_name(), root.depth());

            if args.depth {
                println!("Depth: {}", root.depth());
            }

            match args.format {
                Format::Json => utils::write_colored_value(
                    &mut stdout().lock(),
                    &root,
                    !args.compact,
                )?,
                Format::Yaml => print!("{}", render_yaml(&root)?),
            }
        }
    }

    Ok(())
}

/// Parse `--max-depth`, rejecting values above [`MAX_DEPTH_CEILING`].
fn parse_max_depth(s: &str) -> Result<usize, String> {
    let depth: usize = s.parse().map_err(|e| format!("{e}"))?;
    if depth > MAX_DEPTH_CEILING {
        return Err(format!(
            "{depth} exceeds the maximum of {MAX_DEPTH_CEILING}"
        ));
    }
    Ok(depth)
}

#[cfg(feature = "yaml")]
fn render_yaml(root: &jtree::Value) -> Result<String> {
    serde_yaml::to_string(root).context("Failed to render YAML")
}

#[cfg(not(feature = "yaml"))]
fn render_yaml(_root: &jtree::Value) -> Result<String> {
    anyhow::bail!("YAML output requires the `yaml` feature")
}
