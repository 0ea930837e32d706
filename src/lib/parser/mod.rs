//! A small front-end that matches the raw command line tokens against the
//! declared arguments and drives the resolution of their bindings.
//!
//! Positional arguments take the tokens in declaration order, optional ones
//! (any name starting with `-`) are matched by name, either as `--name value`
//! or as `--name=value`.

use std::any::Any;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt::Display;
use std::str::FromStr;

use indexmap::IndexMap;

use crate::binding::{bound, ArgumentBinding, PrefixedCallable};
use crate::cell::{CellError, TypedValueCell};
use crate::error::{ArgError, BoxError};

/// The names an argument is declared with. The first one identifies it
pub trait ArgumentNames {
    fn into_names(self) -> Vec<String>;
}

impl ArgumentNames for &str {
    fn into_names(self) -> Vec<String> {
        vec![self.to_string()]
    }
}

impl ArgumentNames for String {
    fn into_names(self) -> Vec<String> {
        vec![self]
    }
}

impl<const N: usize> ArgumentNames for [&str; N] {
    fn into_names(self) -> Vec<String> {
        self.iter().map(|name| name.to_string()).collect()
    }
}

impl ArgumentNames for Vec<&str> {
    fn into_names(self) -> Vec<String> {
        self.into_iter().map(String::from).collect()
    }
}

fn is_optional_name(name: &str) -> bool {
    name.starts_with('-')
}

/// Negative numbers are values, not option names
fn looks_like_number(token: &str) -> bool {
    token.parse::<f64>().is_ok()
}

/// A declared argument: its binding, its cell and whether it showed up on the last parse
#[derive(Debug)]
pub struct Argument<'a> {
    names: Vec<String>,
    binding: ArgumentBinding<'a>,
    cell: TypedValueCell,
    required: bool,
    used: bool,
}

impl<'a> Argument<'a> {
    fn new(names: Vec<String>) -> Self {
        let primary = names.first().cloned().unwrap_or_default();
        let required = !is_optional_name(&primary);

        Self {
            binding: ArgumentBinding::new(primary),
            cell: TypedValueCell::empty(),
            names,
            required,
            used: false,
        }
    }

    pub fn name(&self) -> &str {
        self.binding.name()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn is_positional(&self) -> bool {
        !is_optional_name(self.name())
    }

    pub fn binding(&self) -> &ArgumentBinding<'a> {
        &self.binding
    }

    pub fn cell(&self) -> &TypedValueCell {
        &self.cell
    }

    /// Value kept when the argument doesn't appear on the command line. An argument
    /// with default is never reported as missing
    pub fn default_value<T: Any>(&mut self, value: T) -> &mut Self {
        self.binding.set_default(value);
        self.binding.prime(&mut self.cell);
        self
    }

    pub fn implicit_value<T: Any>(&mut self, value: T) -> &mut Self {
        self.binding.set_implicit(value);
        self
    }

    /// A boolean switch: no tokens, `false` unless present
    pub fn flag(&mut self) -> &mut Self {
        self.nargs(0).implicit_value(true).default_value(false)
    }

    pub fn nargs(&mut self, nargs: usize) -> &mut Self {
        self.binding.set_nargs(nargs);
        self
    }

    pub fn required(&mut self) -> &mut Self {
        self.required = true;
        self
    }

    /// Type the raw tokens are parsed into when no action is attached. [`String`]
    /// by default
    pub fn value_type<T>(&mut self) -> &mut Self
    where
        T: FromStr + Any,
        T::Err: Display,
    {
        self.binding.set_value_type::<T>();
        self
    }

    /// Attaches a converting action, or a side effecting one if it returns `()`.
    /// Callables returning a [`Result`] belong to [`Argument::try_action`], otherwise
    /// the `Result` itself is what gets stored
    pub fn action<F, R>(&mut self, action: F) -> &mut Self
    where
        F: FnMut(&str) -> R + 'a,
        R: Any,
    {
        self.binding.set_action(action);
        self
    }

    /// Attaches a callable that may fail. An `Err` aborts the parse as an
    /// [`ArgError::Action`], and an `Ok(())` makes it a side effecting action
    pub fn try_action<F, R, E>(&mut self, action: F) -> &mut Self
    where
        F: FnMut(&str) -> Result<R, E> + 'a,
        R: Any,
        E: Into<BoxError> + 'a,
    {
        self.binding.set_fallible_action(action);
        self
    }

    /// Attaches `callable` with `prefix` bound by value as its leading arguments.
    /// The raw token is passed as the last one
    pub fn bind_action<P, F, R>(&mut self, prefix: P, callable: F) -> &mut Self
    where
        P: 'a,
        F: PrefixedCallable<P, R> + 'a,
        R: Any,
    {
        self.action(bound::prefixed(prefix, callable))
    }

    /// Attaches `method` invoked over an object borrowed from the caller. The mutations
    /// are visible through the object once the parser is gone
    pub fn bind_mut<T, F, R>(&mut self, object: &'a mut T, method: F) -> &mut Self
    where
        T: ?Sized,
        F: FnMut(&mut T, &str) -> R + 'a,
        R: Any,
    {
        self.action(bound::by_mut(object, method))
    }

    pub fn bind_shared<T, F, R>(&mut self, object: &'a RefCell<T>, method: F) -> &mut Self
    where
        T: ?Sized,
        F: FnMut(&mut T, &str) -> R + 'a,
        R: Any,
    {
        self.action(bound::by_shared(object, method))
    }

    /// Attaches `method` invoked over a fresh copy of `object` on every occurrence
    pub fn bind_owned<T, F, R>(&mut self, object: T, method: F) -> &mut Self
    where
        T: Clone + 'a,
        F: FnMut(&mut T, &str) -> R + 'a,
        R: Any,
    {
        self.action(bound::by_value(object, method))
    }

    pub fn try_bind_action<P, F, R, E>(&mut self, prefix: P, callable: F) -> &mut Self
    where
        P: 'a,
        F: PrefixedCallable<P, Result<R, E>> + 'a,
        R: Any,
        E: Into<BoxError> + 'a,
    {
        self.try_action(bound::prefixed(prefix, callable))
    }

    /// Fallible counterpart of [`Argument::bind_mut`]
    pub fn try_bind_mut<T, F, R, E>(&mut self, object: &'a mut T, method: F) -> &mut Self
    where
        T: ?Sized,
        F: FnMut(&mut T, &str) -> Result<R, E> + 'a,
        R: Any,
        E: Into<BoxError> + 'a,
    {
        self.try_action(bound::by_mut(object, method))
    }

    pub fn try_bind_shared<T, F, R, E>(&mut self, object: &'a RefCell<T>, method: F) -> &mut Self
    where
        T: ?Sized,
        F: FnMut(&mut T, &str) -> Result<R, E> + 'a,
        R: Any,
        E: Into<BoxError> + 'a,
    {
        self.try_action(bound::by_shared(object, method))
    }

    pub fn try_bind_owned<T, F, R, E>(&mut self, object: T, method: F) -> &mut Self
    where
        T: Clone + 'a,
        F: FnMut(&mut T, &str) -> Result<R, E> + 'a,
        R: Any,
        E: Into<BoxError> + 'a,
    {
        self.try_action(bound::by_value(object, method))
    }

    pub fn is_used(&self) -> bool {
        self.used
    }

    fn reset(&mut self) {
        self.used = false;
        self.binding.prime(&mut self.cell);
    }

    fn consume(&mut self, tokens: &[String]) -> Result<(), ArgError> {
        self.used = true;
        self.binding.resolve(tokens, &mut self.cell).map(|_| ())
    }

    fn lift(&self, error: CellError) -> ArgError {
        let argument = self.name().to_string();
        match error {
            CellError::TypeMismatch { stored, requested } => ArgError::TypeMismatch {
                argument,
                stored,
                requested,
            },
            CellError::Empty => ArgError::EmptyValue { argument },
        }
    }
}

/// The collection of the declared arguments of a program
///
/// ```rust
/// use argbind::parser::ArgumentParser;
///
/// let mut program = ArgumentParser::new("resize");
/// program.add_argument("input").unwrap();
/// program
///     .add_argument(["-w", "--width"])
///     .unwrap()
///     .value_type::<u32>()
///     .default_value(640_u32);
///
/// program.parse_args(["resize", "cat.png", "--width", "320"]).unwrap();
///
/// assert_eq!(program.get::<String>("input").unwrap(), "cat.png");
/// assert_eq!(program.get::<u32>("-w").unwrap(), 320);
/// ```
#[derive(Debug)]
pub struct ArgumentParser<'a> {
    program_name: String,
    arguments: IndexMap<String, Argument<'a>>,
    aliases: HashMap<String, String>,
}

impl<'a> ArgumentParser<'a> {
    pub fn new(program_name: impl Into<String>) -> Self {
        Self {
            program_name: program_name.into(),
            arguments: IndexMap::new(),
            aliases: HashMap::new(),
        }
    }

    pub fn program_name(&self) -> &str {
        &self.program_name
    }

    /// Declares a new argument. Fails if any of its names is empty or already taken,
    /// or if positional and optional names are mixed
    pub fn add_argument(
        &mut self,
        names: impl ArgumentNames,
    ) -> Result<&mut Argument<'a>, ArgError> {
        let names = names.into_names();
        let primary = match names.first() {
            Some(primary) => primary.clone(),
            None => return Err(ArgError::InvalidName { name: String::new() }),
        };

        let optional = is_optional_name(&primary);
        if let Some(invalid) = names
            .iter()
            .find(|name| name.is_empty() || is_optional_name(name) != optional)
        {
            return Err(ArgError::InvalidName {
                name: invalid.clone(),
            });
        }

        if let Some(taken) = names.iter().find(|name| self.aliases.contains_key(*name)) {
            return Err(ArgError::DuplicateName {
                name: taken.clone(),
            });
        }

        for name in &names {
            self.aliases.insert(name.clone(), primary.clone());
        }

        log::trace!("Declaring the argument {names:?}");
        Ok(self
            .arguments
            .entry(primary)
            .or_insert_with(|| Argument::new(names)))
    }

    pub fn arguments(&self) -> impl Iterator<Item = &Argument<'a>> {
        self.arguments.values()
    }

    pub fn argument(&self, name: &str) -> Result<&Argument<'a>, ArgError> {
        self.aliases
            .get(name)
            .and_then(|primary| self.arguments.get(primary))
            .ok_or_else(|| ArgError::NoSuchArgument {
                name: name.to_string(),
            })
    }

    fn index_of(&self, name: &str) -> Option<usize> {
        self.aliases
            .get(name)
            .and_then(|primary| self.arguments.get_index_of(primary))
    }

    /// Parses a full command line, being the first token the name of the program.
    ///
    /// Every argument starts over from its default value, so a parser may be
    /// reused for several command lines.
    pub fn parse_args<I, S>(&mut self, argv: I) -> Result<(), ArgError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let tokens: Vec<String> = argv
            .into_iter()
            .skip(1)
            .map(|token| token.as_ref().to_string())
            .collect();

        self.arguments.values_mut().for_each(Argument::reset);

        let positionals: Vec<usize> = self
            .arguments
            .values()
            .enumerate()
            .filter(|(_, argument)| argument.is_positional())
            .map(|(index, _)| index)
            .collect();
        let mut next_positional = positionals.into_iter();

        let mut cursor = 0;
        while cursor < tokens.len() {
            let token = &tokens[cursor];

            if is_optional_name(token) && token.len() > 1 && !looks_like_number(token) {
                cursor = self.consume_optional(&tokens, cursor)?;
                continue;
            }

            let index = next_positional
                .next()
                .ok_or_else(|| ArgError::UnexpectedPositional {
                    token: token.clone(),
                })?;
            cursor = self.consume_values(index, &tokens, cursor)?;
        }

        self.check_required()
    }

    fn consume_optional(&mut self, tokens: &[String], cursor: usize) -> Result<usize, ArgError> {
        let token = &tokens[cursor];

        if let Some(index) = self.index_of(token) {
            return self.consume_values(index, tokens, cursor + 1);
        }

        // --name=value
        if let Some((name, value)) = token.split_once('=') {
            if let Some(index) = self.index_of(name) {
                let (_, argument) = self
                    .arguments
                    .get_index_mut(index)
                    .ok_or_else(|| ArgError::UnknownArgument {
                        token: token.clone(),
                    })?;
                if argument.binding.nargs() == 1 {
                    log::trace!("Matched '{}' with an assigned value", argument.name());
                    argument.consume(&[value.to_string()])?;
                    return Ok(cursor + 1);
                }
            }
        }

        Err(ArgError::UnknownArgument {
            token: token.clone(),
        })
    }

    /// Hands the tokens starting at `start` to the argument at `index`, and returns the
    /// position of the first token that wasn't consumed
    fn consume_values(
        &mut self,
        index: usize,
        tokens: &[String],
        start: usize,
    ) -> Result<usize, ArgError> {
        let (_, argument) = self
            .arguments
            .get_index_mut(index)
            .ok_or_else(|| ArgError::NoSuchArgument {
                name: format!("#{index}"),
            })?;

        let nargs = argument.binding.nargs();
        let end = start + nargs;
        if end > tokens.len() {
            return Err(ArgError::MissingValues {
                argument: argument.name().to_string(),
                expected: nargs,
                provided: tokens.len().saturating_sub(start),
            });
        }

        log::trace!(
            "Matched '{}' with {:?}",
            argument.name(),
            &tokens[start..end]
        );
        argument.consume(&tokens[start..end])?;
        Ok(end)
    }

    fn check_required(&self) -> Result<(), ArgError> {
        match self.arguments.values().find(|argument| {
            argument.required && !argument.used && argument.binding.default().is_none()
        }) {
            Some(missing) => Err(ArgError::MissingRequired {
                argument: missing.name().to_string(),
            }),
            None => Ok(()),
        }
    }

    /// Retrieves the value of the argument named `name` (any of its names) as a `T`
    pub fn get<T: Any + Clone>(&self, name: &str) -> Result<T, ArgError> {
        let argument = self.argument(name)?;
        argument
            .cell
            .retrieve::<T>()
            .map_err(|e| argument.lift(e))
    }

    /// Like [`ArgumentParser::get`], but an argument without value is `None`
    pub fn present<T: Any + Clone>(&self, name: &str) -> Result<Option<T>, ArgError> {
        let argument = self.argument(name)?;
        match argument.cell.retrieve::<T>() {
            Ok(value) => Ok(Some(value)),
            Err(CellError::Empty) => Ok(None),
            Err(e) => Err(argument.lift(e)),
        }
    }

    /// Whether the argument appeared on the last parsed command line
    pub fn is_used(&self, name: &str) -> Result<bool, ArgError> {
        self.argument(name).map(Argument::is_used)
    }
}
