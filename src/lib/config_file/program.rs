//! Metadata about the program whose arguments are declared
use serde::*;

/// [`ProgramAttribute`] - Metadata about the user's program
/// * `name` - The name of the program, the first token of every parsed command line
/// * `description` - Free text describing the program
///
/// ### Tests
///
/// ```rust
/// use argbind::config_file::program::ProgramAttribute;
///
/// const CONFIG_FILE_MOCK: &str = r#"
///     #[program]
///     name = 'image-tool'
///     description = 'Resizes images'
///"#;
///
/// let config: ProgramAttribute = toml::from_str(CONFIG_FILE_MOCK)
///    .expect("A failure happened parsing the argbind toml file");
///
/// assert_eq!(config.name, "image-tool");
/// assert_eq!(config.description, Some("Resizes images"));
/// ```
///
/// > Note: TOML table are toml commented (#) to allow us to parse
/// the inner attributes as the direct type that they belongs to.
///
/// For a test over a real example, please look at the
/// [`crate::config_file::ArgbindConfigFile`] doc-test
#[derive(Serialize, Deserialize, Debug, PartialEq, Eq, Default)]
#[serde(deny_unknown_fields)]
pub struct ProgramAttribute<'a> {
    pub name: &'a str,
    pub description: Option<&'a str>,
}
