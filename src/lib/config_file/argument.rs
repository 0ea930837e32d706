//! Type for holding the declaration details of every argument

use serde::{Deserialize, Serialize};

/// [`ArgumentAttribute`] - The declaration of one command line argument
/// * `names` - The names of the argument. Names starting with `-` declare an
///   optional argument, otherwise it's a positional one
/// * `kind` - The type of the values (string by default)
/// * `default` - Raw text for the default value, converted with `kind`
/// * `nargs` - How many tokens follow the argument (one by default)
/// * `required` - Whether an optional argument must appear
/// * `flag` - A boolean switch without tokens
/// * `choices` - Accepted values for string arguments
/// * `fallback` - Stored instead of a value out of `choices`. Without it, such a
///   value is an error
///
/// ### Tests
///
/// ```rust
/// use argbind::config_file::argument::{ArgumentAttribute, ValueKind};
///
/// const CONFIG_FILE_MOCK: &str = r#"
///     #[[arguments]]
///     names = ['-m', '--mode']
///     kind = 'str'
///     default = 'bar'
///     choices = ['foo', 'bar', 'baz']
///     fallback = 'bar'
/// "#;
///
/// let config: ArgumentAttribute = toml::from_str(CONFIG_FILE_MOCK)
///    .expect("A failure happened parsing the argbind toml file");
///
/// assert_eq!(config.names, vec!["-m", "--mode"]);
/// assert_eq!(config.kind, Some(ValueKind::String));
/// assert_eq!(config.default, Some("bar"));
/// assert_eq!(config.choices, Some(vec!["foo", "bar", "baz"]));
/// assert_eq!(config.fallback, Some("bar"));
/// assert_eq!(config.nargs, None);
/// assert_eq!(config.flag, None);
/// ```
/// > Note: TOML table are toml commented (#) to allow us to parse
/// the inner attributes as the direct type that they belongs to.
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ArgumentAttribute<'a> {
    #[serde(borrow)]
    pub names: Vec<&'a str>,
    pub kind: Option<ValueKind>,
    pub default: Option<&'a str>,
    pub nargs: Option<usize>,
    pub required: Option<bool>,
    pub flag: Option<bool>,
    #[serde(borrow)]
    pub choices: Option<Vec<&'a str>>,
    pub fallback: Option<&'a str>,
}

/// The types that the values of a declared argument may take
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize, Default, Copy, Clone)]
pub enum ValueKind {
    #[default]
    #[serde(alias = "String", alias = "string", alias = "str", alias = "text")]
    String,
    #[serde(alias = "Int", alias = "int", alias = "integer", alias = "i64")]
    Int,
    #[serde(alias = "Float", alias = "float", alias = "f64", alias = "number")]
    Float,
    #[serde(alias = "Bool", alias = "bool", alias = "boolean")]
    Bool,
}

impl ValueKind {
    pub fn as_str(&self) -> &'static str {
        match *self {
            ValueKind::String => "string",
            ValueKind::Int => "int",
            ValueKind::Float => "float",
            ValueKind::Bool => "bool",
        }
    }
}
