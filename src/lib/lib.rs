pub mod binding;
pub mod cell;
pub mod cli;
pub mod config_file;
pub mod error;
pub mod parser;
pub mod utils;

/// The entry point for the execution of the program.
///
/// This module existence is motivated to let us run
/// integration tests for the whole operations of the program
/// without having to do fancy work about checking the
/// data sent to stdout/stderr
pub mod worker {
    use std::path::{Path, PathBuf};
    use std::{fs, time::Instant};

    use color_eyre::{eyre::Context, Result};

    use crate::utils::constants::error_messages;
    use crate::{
        cli::input::{CliArgs, Command},
        config_file::{self, ArgbindConfigFile},
        utils::{
            self,
            reader::{build_parser, find_config_file},
            render,
            template::create_templated_config,
        },
    };

    /// The main work of the project. Runs the task inputted in the CLI, and returns
    /// what should be shown to the user, if anything
    pub fn run_argbind(cli_args: &CliArgs, base_path: &Path) -> Result<Option<String>> {
        let abs_root = determine_absolute_path_of_the_root(cli_args, base_path)?;

        // Template creation doesn't need any previous configuration file
        if let Command::New { ref name } = cli_args.command {
            let created = create_templated_config(&abs_root, &cli_args.config, name)?;
            return Ok(Some(format!("Created {}", created.display())));
        }

        let cfg_path = find_config_file(&abs_root, &cli_args.config)?;
        log::debug!(
            "Launching an argbind work event for the configuration file: {:?}",
            cfg_path
        );
        let raw_file = fs::read_to_string(&cfg_path)
            .with_context(|| format!("{}: {:?}", error_messages::READ_CFG_FILE, cfg_path))?;

        let config: ArgbindConfigFile<'_> = config_file::argbind_cfg_from_file(raw_file.as_str())
            .with_context(|| error_messages::PARSE_CFG_FILE)?;

        do_main_work_based_on_cli_input(cli_args, &config).map(Some)
    }

    fn do_main_work_based_on_cli_input(
        cli_args: &CliArgs,
        config: &ArgbindConfigFile<'_>,
    ) -> Result<String> {
        match cli_args.command {
            Command::Parse { ref tokens } => parse_command_line(config, tokens),
            Command::Describe => Ok(render::describe_arguments(config)),
            Command::New { .. } => unreachable!("templates are created before loading any config"),
        }
    }

    /// Resolves the given tokens against the declared arguments and renders the
    /// values as a JSON object
    fn parse_command_line(config: &ArgbindConfigFile<'_>, tokens: &[String]) -> Result<String> {
        let parse_ts = Instant::now();

        let mut program = build_parser(config).with_context(|| error_messages::BUILD_PARSER)?;
        let argv =
            std::iter::once(program.program_name().to_string()).chain(tokens.iter().cloned());
        program
            .parse_args(argv)
            .with_context(|| error_messages::PARSE_COMMAND_LINE)?;

        log::debug!(
            "argbind took a total of {:?} ms on resolving the command line",
            parse_ts.elapsed().as_millis()
        );

        let values = render::resolved_values(config, &program)?;
        serde_json::to_string_pretty(&values).with_context(|| error_messages::RENDER_VALUES)
    }

    /// Resolves the full path of the directory where the configuration file lives. If the
    /// `--root` [`CliArgs`] arg is present, it will be used (relative to *base_path*),
    /// otherwise *base_path* is the root
    fn determine_absolute_path_of_the_root(
        cli_args: &CliArgs,
        base_path: &Path,
    ) -> Result<PathBuf> {
        let root = cli_args
            .root
            .as_deref()
            .map(|root| base_path.join(root))
            .unwrap_or_else(|| base_path.to_path_buf());

        utils::fs::get_absolute_path(&root)
            .with_context(|| error_messages::FAILURE_GATHERING_ROOT_ABS_PATH)
    }

    #[cfg(test)]
    mod tests {
        use clap::Parser;
        use color_eyre::Result;
        use tempfile::tempdir;

        use crate::cli::input::CliArgs;
        use crate::error::ArgError;

        use super::run_argbind;

        #[test]
        fn test_new_then_describe() -> Result<()> {
            let temp = tempdir()?;

            let created = run_argbind(
                &CliArgs::parse_from(["", "new", "--name", "demo"]),
                temp.path(),
            )?;
            assert!(created.is_some());
            assert!(temp.path().join("argbind.toml").exists());

            let described = run_argbind(&CliArgs::parse_from(["", "describe"]), temp.path())?;
            assert!(described.is_some_and(|d| d.starts_with("demo")));
            Ok(())
        }

        #[test]
        fn test_parse_prints_json() -> Result<()> {
            let temp = tempdir()?;
            run_argbind(&CliArgs::parse_from(["", "new"]), temp.path())?;

            let output = run_argbind(
                &CliArgs::parse_from(["", "parse", "--", "fez", "-s", "320", "98"]),
                temp.path(),
            )?
            .unwrap_or_default();
            let json: serde_json::Value = serde_json::from_str(&output)?;

            assert_eq!(json["input"], "bar");
            assert_eq!(json["-s"], serde_json::json!([320, 98]));
            assert_eq!(json["-r"], serde_json::Value::Null);
            assert_eq!(json["-v"], false);
            Ok(())
        }

        #[test]
        fn test_parse_failure_keeps_the_argument_error() -> Result<()> {
            let temp = tempdir()?;
            run_argbind(&CliArgs::parse_from(["", "new"]), temp.path())?;

            let err = run_argbind(
                &CliArgs::parse_from(["", "parse", "--", "--ratio", "wide"]),
                temp.path(),
            )
            .unwrap_err();

            assert!(matches!(
                err.downcast_ref::<ArgError>(),
                Some(ArgError::Conversion { token, .. }) if token == "wide"
            ));
            Ok(())
        }

        #[test]
        fn test_missing_config_file() {
            let temp = tempdir().unwrap();
            assert!(run_argbind(&CliArgs::parse_from(["", "describe"]), temp.path()).is_err());
        }

        #[test]
        fn test_root_is_relative_to_the_base_path() -> Result<()> {
            let temp = tempdir()?;
            run_argbind(&CliArgs::parse_from(["", "--root", "nested", "new"]), temp.path())?;
            assert!(temp.path().join("nested").join("argbind.toml").exists());
            Ok(())
        }
    }
}
