//! root file for the crate where the datastructures that holds the TOML
//! parsed data lives.
pub mod argument;
pub mod program;

use std::fmt::Debug;

use serde::{Deserialize, Serialize};

use self::{argument::ArgumentAttribute, program::ProgramAttribute};

/// ```rust
/// use argbind::config_file::{
///     ArgbindConfigFile,
///     argument::{ArgumentAttribute, ValueKind},
/// };
///
/// const CONFIG_FILE_MOCK: &str = r#"
///     [program]
///     name = 'image-tool'
///
///     [[arguments]]
///     names = ['input']
///
///     [[arguments]]
///     names = ['-s', '--size']
///     kind = 'int'
///     nargs = 2
///
///     [[arguments]]
///     names = ['-v', '--verbose']
///     flag = true
/// "#;
///
/// let config: ArgbindConfigFile = toml::from_str(CONFIG_FILE_MOCK)
///     .expect("A failure happened parsing the argbind toml file");
///
/// assert_eq!(config.program.name, "image-tool");
///
/// let arguments: &[ArgumentAttribute<'_>] = &config.arguments;
/// assert_eq!(arguments.len(), 3);
///
/// assert_eq!(arguments[0].names, vec!["input"]);
/// assert_eq!(arguments[0].kind.unwrap_or_default(), ValueKind::String);
///
/// assert_eq!(arguments[1].kind, Some(ValueKind::Int));
/// assert_eq!(arguments[1].nargs, Some(2));
///
/// assert_eq!(arguments[2].flag, Some(true));
/// ```
/// The [`ArgbindConfigFile`] is the type that holds
/// the whole hierarchy of argbind config file attributes
/// and properties
#[derive(Serialize, Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct ArgbindConfigFile<'a> {
    #[serde(borrow)]
    pub program: ProgramAttribute<'a>,
    #[serde(borrow, default)]
    pub arguments: Vec<ArgumentAttribute<'a>>,
}

pub fn argbind_cfg_from_file(cfg: &'_ str) -> Result<ArgbindConfigFile<'_>, toml::de::Error> {
    <ArgbindConfigFile>::deserialize(&mut toml::Deserializer::new(cfg))
}
