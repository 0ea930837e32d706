//! Presentation of the declared arguments and of their resolved values

use color_eyre::Result;
use indexmap::IndexMap;
use serde_json::Value as JsonValue;

use crate::config_file::argument::{ArgumentAttribute, ValueKind};
use crate::config_file::ArgbindConfigFile;
use crate::parser::ArgumentParser;

/// Reads back the value of every declared argument, in declaration order. Arguments
/// without value are `null`
pub fn resolved_values(
    config: &ArgbindConfigFile<'_>,
    program: &ArgumentParser<'_>,
) -> Result<IndexMap<String, JsonValue>> {
    let mut values = IndexMap::with_capacity(config.arguments.len());

    for attribute in &config.arguments {
        let Some(name) = attribute.names.first() else {
            continue;
        };
        values.insert(name.to_string(), resolved_value(attribute, name, program)?);
    }

    Ok(values)
}

fn resolved_value(
    attribute: &ArgumentAttribute<'_>,
    name: &str,
    program: &ArgumentParser<'_>,
) -> Result<JsonValue> {
    if attribute.flag.unwrap_or_default() {
        return Ok(to_json(program.present::<bool>(name)?));
    }

    let collected = attribute.nargs.unwrap_or(1) > 1;
    let value = match (attribute.kind.unwrap_or_default(), collected) {
        (ValueKind::String, false) => to_json(program.present::<String>(name)?),
        (ValueKind::String, true) => to_json(program.present::<Vec<String>>(name)?),
        (ValueKind::Int, false) => to_json(program.present::<i64>(name)?),
        (ValueKind::Int, true) => to_json(program.present::<Vec<i64>>(name)?),
        (ValueKind::Float, false) => to_json(program.present::<f64>(name)?),
        (ValueKind::Float, true) => to_json(program.present::<Vec<f64>>(name)?),
        (ValueKind::Bool, false) => to_json(program.present::<bool>(name)?),
        (ValueKind::Bool, true) => to_json(program.present::<Vec<bool>>(name)?),
    };

    Ok(value)
}

fn to_json<T: Into<JsonValue>>(value: Option<T>) -> JsonValue {
    value.map_or(JsonValue::Null, Into::into)
}

/// One line per declared argument: names, kind, arity, and default if any
pub fn describe_arguments(config: &ArgbindConfigFile<'_>) -> String {
    let mut lines = vec![match config.program.description {
        Some(description) => format!("{}: {description}", config.program.name),
        None => config.program.name.to_string(),
    }];

    for attribute in &config.arguments {
        let kind = if attribute.flag.unwrap_or_default() {
            "flag"
        } else {
            attribute.kind.unwrap_or_default().as_str()
        };

        let mut line = format!(
            "    {:<24} {:<6} nargs={}",
            attribute.names.join(", "),
            kind,
            attribute.nargs.unwrap_or(1)
        );
        if let Some(default) = attribute.default {
            line.push_str(&format!(" default={default:?}"));
        }
        if attribute.required.unwrap_or_default() {
            line.push_str(" required");
        }
        if let Some(choices) = &attribute.choices {
            line.push_str(&format!(" choices={choices:?}"));
        }
        lines.push(line);
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config_file;
    use crate::utils::reader::build_parser;

    const CONFIG: &str = r#"
        [program]
        name = 'demo'
        description = 'Demo program'

        [[arguments]]
        names = ['input']
        default = 'a.txt'

        [[arguments]]
        names = ['--size']
        kind = 'int'
        nargs = 2

        [[arguments]]
        names = ['--ratio']
        kind = 'float'

        [[arguments]]
        names = ['-v']
        flag = true
    "#;

    #[test]
    fn test_resolved_values_in_declaration_order() -> Result<()> {
        let config = config_file::argbind_cfg_from_file(CONFIG)?;
        let mut program = build_parser(&config)?;
        program.parse_args(["demo", "--size", "320", "98", "-v"])?;

        let values = resolved_values(&config, &program)?;
        let keys: Vec<&str> = values.keys().map(String::as_str).collect();
        assert_eq!(keys, ["input", "--size", "--ratio", "-v"]);

        assert_eq!(values["input"], JsonValue::from("a.txt"));
        assert_eq!(values["--size"], serde_json::json!([320, 98]));
        assert_eq!(values["--ratio"], JsonValue::Null);
        assert_eq!(values["-v"], JsonValue::Bool(true));
        Ok(())
    }

    #[test]
    fn test_describe_arguments() -> Result<()> {
        let config = config_file::argbind_cfg_from_file(CONFIG)?;
        let description = describe_arguments(&config);

        let mut lines = description.lines();
        assert_eq!(lines.next(), Some("demo: Demo program"));
        assert!(description.contains("--size"));
        assert!(description.contains("default=\"a.txt\""));
        assert!(description.contains("flag"));
        Ok(())
    }
}
