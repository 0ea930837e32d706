//! The declared configuration of one argument, and the procedure that decides
//! what ends up stored on its [`TypedValueCell`] once its raw tokens arrive.

pub mod action;
pub mod bound;

use std::any::Any;
use std::fmt::{self, Debug, Display};
use std::str::FromStr;

use crate::cell::{TypedValueCell, Value};
use crate::error::{ArgError, BoxError};

use self::action::ActionKind;
pub use self::bound::PrefixedCallable;

/// What [`ArgumentBinding::resolve`] did with the cell of the argument
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The cell now holds the outcome of the conversion or of the action
    Replaced,
    /// The cell holds exactly what it held before
    Kept,
}

/// Default value, action and arity of a declared argument
pub struct ArgumentBinding<'a> {
    name: String,
    default: Option<Value>,
    implicit: Option<Value>,
    action: ActionKind<'a>,
    nargs: usize,
}

impl<'a> ArgumentBinding<'a> {
    /// A binding without default whose tokens are stored as [`String`]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default: None,
            implicit: None,
            action: ActionKind::parse_as::<String>(),
            nargs: 1,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_default<T: Any>(&mut self, value: T) -> &mut Self {
        self.default = Some(Value::new(value));
        self
    }

    pub fn default(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    /// Value stored when the argument shows up with no tokens at all
    pub fn set_implicit<T: Any>(&mut self, value: T) -> &mut Self {
        self.implicit = Some(Value::new(value));
        self
    }

    /// Number of raw tokens that follow the argument on the command line
    pub fn set_nargs(&mut self, nargs: usize) -> &mut Self {
        self.nargs = nargs;
        self
    }

    pub fn nargs(&self) -> usize {
        self.nargs
    }

    /// Declares the type the raw tokens are parsed into when no action is attached.
    /// Ignored once an action is set
    pub fn set_value_type<T>(&mut self) -> &mut Self
    where
        T: FromStr + Any,
        T::Err: Display,
    {
        if let ActionKind::DefaultConversion(_) = self.action {
            self.action = ActionKind::parse_as::<T>();
        }
        self
    }

    /// Attaches an action, replacing any previous one. A callable returning `()` is
    /// a side effecting action, any other return type makes it a converting one
    pub fn set_action<F, R>(&mut self, mut action: F) -> &mut Self
    where
        F: FnMut(&str) -> R + 'a,
        R: Any,
    {
        self.replace_action(ActionKind::from_fn(move |token: &str| Ok(action(token))))
    }

    /// Same as [`ArgumentBinding::set_action`] for callables that may fail
    pub fn set_fallible_action<F, R, E>(&mut self, mut action: F) -> &mut Self
    where
        F: FnMut(&str) -> Result<R, E> + 'a,
        R: Any,
        E: Into<BoxError> + 'a,
    {
        self.replace_action(ActionKind::from_fn(move |token: &str| {
            action(token).map_err(Into::into)
        }))
    }

    fn replace_action(&mut self, action: ActionKind<'a>) -> &mut Self {
        if !matches!(self.action, ActionKind::DefaultConversion(_)) {
            log::debug!("Replacing the {} of '{}'", self.action.describe(), self.name);
        }
        self.action = action;
        self
    }

    pub fn action_kind(&self) -> &ActionKind<'a> {
        &self.action
    }

    /// Loads the default value (or nothing) into `cell`. Runs at the start of every
    /// parse, so no outcome of a previous parse survives
    pub fn prime(&self, cell: &mut TypedValueCell) {
        match &self.default {
            Some(default) => cell.store_value(default.clone()),
            None => cell.clear(),
        }
    }

    /// Decides the stored value of the argument from the raw tokens that were
    /// attributed to it.
    ///
    /// - Arity zero: the implicit value (if any) is stored, and an attached action
    ///   runs once over an empty token.
    /// - No action: the tokens are converted to the declared value type.
    /// - Converting action: its outcome is stored.
    /// - Side effecting action: it runs, and the cell is left untouched.
    ///
    /// With arity greater than one the conversion or the action is applied to each
    /// token and a `Vec` of the outcomes is stored.
    pub fn resolve(
        &mut self,
        tokens: &[String],
        cell: &mut TypedValueCell,
    ) -> Result<Resolution, ArgError> {
        log::debug!(
            "Resolving '{}' through its {} with {:?}",
            self.name,
            self.action.describe(),
            tokens
        );

        if self.nargs == 0 {
            return self.resolve_flag(cell);
        }

        let collect = self.nargs > 1;
        match &mut self.action {
            ActionKind::DefaultConversion(action) | ActionKind::Converting(action) => {
                let value = action
                    .invoke(tokens, collect)
                    .map_err(|e| e.for_argument(&self.name))?;
                cell.store_value(value);
                Ok(Resolution::Replaced)
            }
            ActionKind::SideEffecting(action) => {
                action
                    .invoke(tokens, collect)
                    .map_err(|e| e.for_argument(&self.name))?;
                Ok(Resolution::Kept)
            }
        }
    }

    fn resolve_flag(&mut self, cell: &mut TypedValueCell) -> Result<Resolution, ArgError> {
        let no_token = [String::new()];
        let mut resolution = Resolution::Kept;

        if let Some(implicit) = &self.implicit {
            cell.store_value(implicit.clone());
            resolution = Resolution::Replaced;
        }

        match &mut self.action {
            ActionKind::DefaultConversion(_) => Ok(resolution),
            ActionKind::Converting(action) => {
                let value = action
                    .invoke(&no_token, false)
                    .map_err(|e| e.for_argument(&self.name))?;
                cell.store_value(value);
                Ok(Resolution::Replaced)
            }
            ActionKind::SideEffecting(action) => {
                action
                    .invoke(&no_token, false)
                    .map_err(|e| e.for_argument(&self.name))?;
                Ok(resolution)
            }
        }
    }
}

impl Debug for ArgumentBinding<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArgumentBinding")
            .field("name", &self.name)
            .field("default", &self.default)
            .field("implicit", &self.implicit)
            .field("action", &self.action.describe())
            .field("nargs", &self.nargs)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn tokens(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|t| t.to_string()).collect()
    }

    fn choose_or_fallback(choices: &[&str], fallback: &str, token: &str) -> String {
        if choices.contains(&token) {
            token.to_string()
        } else {
            fallback.to_string()
        }
    }

    #[test]
    fn test_default_conversion_replaces_the_default() -> Result<(), ArgError> {
        let mut binding = ArgumentBinding::new("--count");
        binding.set_default(1_i64).set_value_type::<i64>();

        let mut cell = TypedValueCell::empty();
        binding.prime(&mut cell);
        assert_eq!(cell.retrieve::<i64>(), Ok(1));

        assert_eq!(
            binding.resolve(&tokens(&["12"]), &mut cell)?,
            Resolution::Replaced
        );
        assert_eq!(cell.retrieve::<i64>(), Ok(12));

        Ok(())
    }

    #[test]
    fn test_default_conversion_failure_propagates() {
        let mut binding = ArgumentBinding::new("--count");
        binding.set_default(1_i64).set_value_type::<i64>();

        let mut cell = TypedValueCell::empty();
        binding.prime(&mut cell);

        let err = binding
            .resolve(&tokens(&["twelve"]), &mut cell)
            .unwrap_err();
        assert!(matches!(err, ArgError::Conversion { ref token, .. } if token == "twelve"));
        // The failed resolution doesn't touch the cell
        assert_eq!(cell.retrieve::<i64>(), Ok(1));
    }

    #[test]
    fn test_converting_action_with_captured_choices() -> Result<(), ArgError> {
        let choices = vec!["foo", "bar", "baz"];
        let mut binding = ArgumentBinding::new("input");
        binding
            .set_default("bar")
            .set_action(move |t: &str| choose_or_fallback(&choices, "bar", t));

        let mut cell = TypedValueCell::empty();
        binding.prime(&mut cell);
        binding.resolve(&tokens(&["fez"]), &mut cell)?;
        assert_eq!(cell.retrieve::<String>(), Ok(String::from("bar")));

        binding.resolve(&tokens(&["baz"]), &mut cell)?;
        assert_eq!(cell.retrieve::<String>(), Ok(String::from("baz")));

        Ok(())
    }

    #[test]
    fn test_side_effecting_action_keeps_the_default() -> Result<(), ArgError> {
        let pressed = Cell::new(false);
        let mut binding = ArgumentBinding::new("button");
        binding.set_default(42_i32).set_action(|_: &str| pressed.set(true));

        let mut cell = TypedValueCell::empty();
        binding.prime(&mut cell);
        assert_eq!(
            binding.resolve(&tokens(&["ignored"]), &mut cell)?,
            Resolution::Kept
        );

        assert!(pressed.get());
        assert_eq!(cell.retrieve::<i32>(), Ok(42));

        Ok(())
    }

    #[test]
    fn test_side_effecting_action_without_default_leaves_the_cell_empty() -> Result<(), ArgError>
    {
        let mut seen = Vec::new();
        {
            let mut binding = ArgumentBinding::new("file");
            binding
                .set_nargs(2)
                .set_action(|t: &str| seen.push(t.to_string()));

            let mut cell = TypedValueCell::empty();
            binding.prime(&mut cell);
            binding.resolve(&tokens(&["a.txt", "b.txt"]), &mut cell)?;
            assert!(cell.is_empty());
        }
        assert_eq!(seen, ["a.txt", "b.txt"]);

        Ok(())
    }

    #[test]
    fn test_action_result_may_change_the_stored_type() -> Result<(), ArgError> {
        let mut binding = ArgumentBinding::new("--level");
        binding.set_default("low").set_action(|t: &str| t.len());

        let mut cell = TypedValueCell::empty();
        binding.prime(&mut cell);
        binding.resolve(&tokens(&["high"]), &mut cell)?;

        assert_eq!(cell.retrieve::<usize>(), Ok(4));
        assert!(matches!(
            cell.retrieve::<String>(),
            Err(crate::cell::CellError::TypeMismatch { .. })
        ));

        Ok(())
    }

    #[test]
    fn test_fallible_action_failure_propagates() {
        let mut binding = ArgumentBinding::new("--port");
        binding.set_fallible_action(|t: &str| t.parse::<u16>());

        let mut cell = TypedValueCell::empty();
        let err = binding.resolve(&tokens(&["99999"]), &mut cell).unwrap_err();

        assert!(matches!(err, ArgError::Action { ref argument, .. } if argument == "--port"));
        assert!(cell.is_empty());
    }

    #[test]
    fn test_collected_values() -> Result<(), ArgError> {
        let mut binding = ArgumentBinding::new("--point");
        binding.set_nargs(3).set_value_type::<f64>();

        let mut cell = TypedValueCell::empty();
        binding.resolve(&tokens(&["1", "2.5", "-3"]), &mut cell)?;
        assert_eq!(cell.retrieve::<Vec<f64>>(), Ok(vec![1.0, 2.5, -3.0]));

        Ok(())
    }

    #[test]
    fn test_flag_stores_the_implicit_value() -> Result<(), ArgError> {
        let mut binding = ArgumentBinding::new("--verbose");
        binding
            .set_default(false)
            .set_implicit(true)
            .set_nargs(0);

        let mut cell = TypedValueCell::empty();
        binding.prime(&mut cell);
        assert_eq!(cell.retrieve::<bool>(), Ok(false));

        binding.resolve(&[], &mut cell)?;
        assert_eq!(cell.retrieve::<bool>(), Ok(true));

        Ok(())
    }

    #[test]
    fn test_prime_discards_previous_outcomes() -> Result<(), ArgError> {
        let mut binding = ArgumentBinding::new("--name");
        let mut cell = TypedValueCell::empty();

        binding.resolve(&tokens(&["first"]), &mut cell)?;
        assert_eq!(cell.retrieve::<String>(), Ok(String::from("first")));

        binding.prime(&mut cell);
        assert!(cell.is_empty());

        Ok(())
    }

    #[test]
    fn test_value_type_does_not_override_an_action() -> Result<(), ArgError> {
        let mut binding = ArgumentBinding::new("--size");
        binding
            .set_action(|t: &str| t.to_uppercase())
            .set_value_type::<i32>();

        let mut cell = TypedValueCell::empty();
        binding.resolve(&tokens(&["xl"]), &mut cell)?;
        assert_eq!(cell.retrieve::<String>(), Ok(String::from("XL")));

        Ok(())
    }
}
