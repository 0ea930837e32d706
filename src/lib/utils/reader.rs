use std::any::type_name;
use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use color_eyre::{
    eyre::{bail, eyre, Context},
    Result,
};

use crate::config_file::argument::{ArgumentAttribute, ValueKind};
use crate::config_file::ArgbindConfigFile;
use crate::error::ArgError;
use crate::parser::{Argument, ArgumentParser};
use crate::utils::constants::{debug_messages, error_messages};

/// Checks for the existence of the configuration file named `file_name` under
/// `base_path`, and returns its full path.
///
/// This function fails if there's no such file
pub fn find_config_file(base_path: &Path, file_name: &str) -> Result<PathBuf> {
    log::debug!("Searching for the argbind configuration file {file_name:?}...");
    let path = base_path.join(file_name);

    if path.is_file() {
        Ok(path)
    } else {
        Err(eyre!("No configuration file found at {path:?}"))
    }
}

/// Maps the declarations of a [`ArgbindConfigFile`] into an [`ArgumentParser`]
/// ready to parse command lines
pub fn build_parser<'a>(config: &ArgbindConfigFile<'a>) -> Result<ArgumentParser<'a>> {
    log::debug!("{}", debug_messages::MAPPING_CFG_TO_PARSER);
    let mut program = ArgumentParser::new(config.program.name);

    for attribute in &config.arguments {
        declare_argument(&mut program, attribute).with_context(|| {
            format!("{}: {:?}", error_messages::BUILD_PARSER, attribute.names)
        })?;
    }

    Ok(program)
}

fn declare_argument<'a>(
    program: &mut ArgumentParser<'a>,
    attribute: &ArgumentAttribute<'a>,
) -> Result<()> {
    let kind = attribute.kind.unwrap_or_default();

    if attribute.choices.is_some() && kind != ValueKind::String {
        bail!(error_messages::CHOICES_ON_NON_STRING);
    }
    if attribute.fallback.is_some() && attribute.choices.is_none() {
        bail!(error_messages::FALLBACK_WITHOUT_CHOICES);
    }
    if attribute.flag.unwrap_or_default()
        && (attribute.kind.is_some()
            || attribute.default.is_some()
            || attribute.nargs.is_some()
            || attribute.choices.is_some())
    {
        bail!(error_messages::FLAG_WITH_VALUE_ATTRIBUTES);
    }

    let argument = program.add_argument(attribute.names.clone())?;

    if attribute.flag.unwrap_or_default() {
        argument.flag();
    } else {
        let nargs = attribute.nargs.unwrap_or(1);
        argument.nargs(nargs);
        declare_value_type(argument, kind);

        if let Some(raw) = attribute.default {
            declare_default(argument, kind, nargs, raw)?;
        }
    }

    if attribute.required.unwrap_or_default() {
        argument.required();
    }

    if let Some(choices) = attribute.choices.clone() {
        match attribute.fallback {
            Some(fallback) => {
                argument.bind_action((choices, fallback), choose_or_fallback);
            }
            None => {
                argument.try_action(move |token: &str| choose_strictly(&choices, token));
            }
        }
    }

    Ok(())
}

fn declare_value_type(argument: &mut Argument<'_>, kind: ValueKind) {
    match kind {
        ValueKind::String => argument.value_type::<String>(),
        ValueKind::Int => argument.value_type::<i64>(),
        ValueKind::Float => argument.value_type::<f64>(),
        ValueKind::Bool => argument.value_type::<bool>(),
    };
}

/// The default value is raw text converted with the same rules as the command line
/// tokens. Arguments taking several tokens split it on whitespace
fn declare_default(
    argument: &mut Argument<'_>,
    kind: ValueKind,
    nargs: usize,
    raw: &str,
) -> Result<(), ArgError> {
    fn store<T>(argument: &mut Argument<'_>, nargs: usize, raw: &str) -> Result<(), ArgError>
    where
        T: FromStr + Clone + 'static,
        T::Err: Display,
    {
        if nargs > 1 {
            let values = raw
                .split_whitespace()
                .map(|token| convert_default::<T>(argument.name(), token))
                .collect::<Result<Vec<T>, _>>()?;
            argument.default_value(values);
        } else {
            let value = convert_default::<T>(argument.name(), raw)?;
            argument.default_value(value);
        }
        Ok(())
    }

    match kind {
        ValueKind::String => store::<String>(argument, nargs, raw),
        ValueKind::Int => store::<i64>(argument, nargs, raw),
        ValueKind::Float => store::<f64>(argument, nargs, raw),
        ValueKind::Bool => store::<bool>(argument, nargs, raw),
    }
}

fn convert_default<T>(argument: &str, token: &str) -> Result<T, ArgError>
where
    T: FromStr,
    T::Err: Display,
{
    token.parse::<T>().map_err(|e| ArgError::Conversion {
        argument: argument.to_string(),
        token: token.to_string(),
        type_name: type_name::<T>(),
        reason: e.to_string(),
    })
}

/// Keeps the token if it's one of the `choices`, otherwise stores the `fallback`
pub fn choose_or_fallback(choices: Vec<&str>, fallback: &str, token: &str) -> String {
    if choices.contains(&token) {
        token.to_string()
    } else {
        fallback.to_string()
    }
}

pub fn choose_strictly(choices: &[&str], token: &str) -> Result<String, String> {
    if choices.contains(&token) {
        Ok(token.to_string())
    } else {
        Err(format!("'{token}' is not one of {choices:?}"))
    }
}
