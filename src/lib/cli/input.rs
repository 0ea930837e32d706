use clap::{Parser, Subcommand};

use crate::utils::constants::DEFAULT_CONFIG_FILE;
use crate::utils::template::resources::PROGRAM_NAME;

/// [`CliArgs`] is the command line arguments parser
///
/// #Test
/// ```rust
/// use clap::Parser;
/// use argbind::cli::input::{CliArgs, Command};
///
/// let parser = CliArgs::parse_from(["", "-v", "describe"]);
/// assert_eq!(1, parser.verbose);
/// assert_eq!(parser.command, Command::Describe);
/// assert_eq!(parser.config, "argbind.toml");
///
/// let parser = CliArgs::parse_from(["", "--config", "tool.toml", "parse", "--", "-s", "10"]);
/// assert_eq!(parser.config, "tool.toml");
/// assert_eq!(
///     parser.command,
///     Command::Parse { tokens: vec![String::from("-s"), String::from("10")] }
/// );
///
/// // Create a new template configuration file
/// let parser = CliArgs::parse_from(["", "new", "--name", "image-tool"]);
/// assert_eq!(parser.command, Command::New { name: String::from("image-tool") });
/// ```
#[derive(Parser, Debug)]
#[command(name = "argbind")]
#[command(author = "Zero Day Code")]
#[command(version, propagate_version = true)]
#[command(
    about = "argbind resolves command lines against declared arguments",
    long_about = "Declares the arguments of a program on a TOML file, parses command lines against them and prints the resolved values"
)]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, action = clap::ArgAction::Count, help = "argbind maximum allowed verbosity level is: '-v'")]
    pub verbose: u8,

    #[arg(
        short,
        long,
        default_value = DEFAULT_CONFIG_FILE,
        help = "The configuration file that declares the arguments"
    )]
    pub config: String,

    #[arg(short, long, help = "Directory where the configuration file lives")]
    pub root: Option<String>,
}

/// [`Command`] -  The core enum commands
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Parses the tokens after `--` against the declared arguments and prints their values
    Parse {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        tokens: Vec<String>,
    },
    /// Lists the declared arguments
    Describe,
    /// Writes a new template configuration file
    New {
        #[arg(long, default_value = PROGRAM_NAME, help = "The name of the program")]
        name: String,
    },
}
