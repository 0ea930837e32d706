//! The callables that may be attached to an argument, behind a single
//! object safe interface

use std::any::{type_name, Any, TypeId};
use std::fmt::Display;
use std::marker::PhantomData;
use std::str::FromStr;

use thiserror::Error;

use crate::cell::Value;
use crate::error::{ArgError, BoxError};

/// Why an [`Action`] couldn't produce its outcome. It doesn't know the name of the
/// argument, the binding attaches it when lifting the failure into an [`ArgError`]
#[derive(Debug, Error)]
pub enum InvokeError {
    #[error("cannot convert '{token}' to {type_name}: {reason}")]
    Conversion {
        token: String,
        type_name: &'static str,
        reason: String,
    },
    #[error(transparent)]
    Failed(BoxError),
}

impl InvokeError {
    pub fn for_argument(self, argument: &str) -> ArgError {
        match self {
            InvokeError::Conversion {
                token,
                type_name,
                reason,
            } => ArgError::Conversion {
                argument: argument.to_string(),
                token,
                type_name,
                reason,
            },
            InvokeError::Failed(source) => ArgError::Action {
                argument: argument.to_string(),
                source,
            },
        }
    }
}

/// Anything that turns the raw tokens of an argument into a value.
///
/// `collect` is set when the arity of the argument is greater than one: the
/// callable is applied to each token in order and the results are gathered
/// on a [`Vec`]. Otherwise it's applied to the first token only.
pub trait Action {
    fn invoke(&mut self, tokens: &[String], collect: bool) -> Result<Value, InvokeError>;
}

/// The three ways an argument may turn its tokens into its stored value
pub enum ActionKind<'a> {
    /// No user action. The token is parsed as the declared value type
    DefaultConversion(Box<dyn Action + 'a>),
    /// The outcome of the action replaces the stored value
    Converting(Box<dyn Action + 'a>),
    /// The action runs only for its side effects, the stored value stays as it was
    SideEffecting(Box<dyn Action + 'a>),
}

impl<'a> ActionKind<'a> {
    /// Default conversion to `T` through its [`FromStr`] implementation
    pub fn parse_as<T>() -> Self
    where
        T: FromStr + Any,
        T::Err: Display,
    {
        ActionKind::DefaultConversion(Box::new(ParseAs::<T>(PhantomData)))
    }

    /// Wraps a fallible callable. Callables returning `()` are classified as side effecting
    pub fn from_fn<F, R>(callable: F) -> Self
    where
        F: FnMut(&str) -> Result<R, BoxError> + 'a,
        R: Any,
    {
        let action = Box::new(FnAction {
            callable,
            _output: PhantomData,
        });

        if TypeId::of::<R>() == TypeId::of::<()>() {
            ActionKind::SideEffecting(action)
        } else {
            ActionKind::Converting(action)
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            ActionKind::DefaultConversion(_) => "default conversion",
            ActionKind::Converting(_) => "converting action",
            ActionKind::SideEffecting(_) => "side effecting action",
        }
    }
}

fn first_token(tokens: &[String]) -> &str {
    tokens.first().map(String::as_str).unwrap_or_default()
}

/// Default conversion through [`FromStr`]
struct ParseAs<T>(PhantomData<fn() -> T>);

impl<T> ParseAs<T>
where
    T: FromStr,
    T::Err: Display,
{
    fn convert(token: &str) -> Result<T, InvokeError> {
        token.parse::<T>().map_err(|e| InvokeError::Conversion {
            token: token.to_string(),
            type_name: type_name::<T>(),
            reason: e.to_string(),
        })
    }
}

impl<T> Action for ParseAs<T>
where
    T: FromStr + Any,
    T::Err: Display,
{
    fn invoke(&mut self, tokens: &[String], collect: bool) -> Result<Value, InvokeError> {
        if collect {
            let values = tokens
                .iter()
                .map(|token| Self::convert(token))
                .collect::<Result<Vec<T>, _>>()?;
            Ok(Value::new(values))
        } else {
            Self::convert(first_token(tokens)).map(Value::new)
        }
    }
}

/// An user provided callable
struct FnAction<F, R> {
    callable: F,
    _output: PhantomData<fn() -> R>,
}

impl<F, R> Action for FnAction<F, R>
where
    F: FnMut(&str) -> Result<R, BoxError>,
    R: Any,
{
    fn invoke(&mut self, tokens: &[String], collect: bool) -> Result<Value, InvokeError> {
        if collect {
            let mut values = Vec::with_capacity(tokens.len());
            for token in tokens {
                values.push((self.callable)(token).map_err(InvokeError::Failed)?);
            }
            Ok(Value::new(values))
        } else {
            (self.callable)(first_token(tokens))
                .map(Value::new)
                .map_err(InvokeError::Failed)
        }
    }
}
