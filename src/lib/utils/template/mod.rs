pub mod resources;

use crate::utils;
use crate::utils::constants::error_messages;
use color_eyre::eyre::bail;
use color_eyre::Result;
use std::path::{Path, PathBuf};

/// Generates a new configuration file declaring a few example arguments for
/// a program named `program_name`, at `base_path`.
///
/// Declared arguments of the template:
///    - `input`: a positional with a closed set of choices, falling back to `bar`
///    - `-s, --size`: two integers
///    - `-r, --ratio`: a float without default
///    - `-v, --verbose`: a flag
///
/// Fails if there's already a configuration file with the same name there
pub fn create_templated_config(
    base_path: &Path,
    config_file_name: &str,
    program_name: &str,
) -> Result<PathBuf> {
    let config_path = base_path.join(config_file_name);
    if config_path.exists() {
        bail!("{}: {:?}", error_messages::CONFIG_FILE_ALREADY_EXISTS, config_path);
    }

    utils::fs::create_directory(base_path)?;

    let template = resources::CONFIG_FILE.replace("<program_name>", program_name);
    utils::fs::create_file(base_path, config_file_name, template.as_bytes())?;

    log::info!("Created the configuration file {config_path:?}");
    Ok(config_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config_file;
    use tempfile::tempdir;

    #[test]
    fn test_created_config_is_parseable() -> Result<()> {
        let temp = tempdir()?;
        let path = create_templated_config(temp.path(), "argbind.toml", "resize")?;

        let raw = std::fs::read_to_string(path)?;
        let config = config_file::argbind_cfg_from_file(&raw)?;
        assert_eq!(config.program.name, "resize");
        assert_eq!(config.arguments.len(), 4);
        Ok(())
    }

    #[test]
    fn test_existing_config_is_not_overwritten() -> Result<()> {
        let temp = tempdir()?;
        create_templated_config(temp.path(), "argbind.toml", "first")?;
        assert!(create_templated_config(temp.path(), "argbind.toml", "second").is_err());

        let raw = std::fs::read_to_string(temp.path().join("argbind.toml"))?;
        assert!(raw.contains("first"));
        Ok(())
    }
}
