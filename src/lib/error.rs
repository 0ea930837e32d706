//! The failures that the declaration, the parsing and the retrieval of the
//! command line arguments may report

use thiserror::Error;

/// Boxed error returned by the fallible actions
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Every failure of the library is one of these. All of them carry the name of the
/// argument involved, so the caller is able to report which one was wrong
#[derive(Debug, Error)]
pub enum ArgError {
    /// The raw text couldn't be converted to the declared value type
    #[error("argument '{argument}': cannot convert '{token}' to {type_name}: {reason}")]
    Conversion {
        argument: String,
        token: String,
        type_name: &'static str,
        reason: String,
    },

    /// The stored value is of another type than the requested one
    #[error("argument '{argument}': stored value is a {stored}, but a {requested} was requested")]
    TypeMismatch {
        argument: String,
        stored: &'static str,
        requested: &'static str,
    },

    /// Retrieval over an argument without default that was never resolved
    #[error("argument '{argument}' has no value")]
    EmptyValue { argument: String },

    /// An user action reported a failure
    #[error("argument '{argument}': action failed")]
    Action {
        argument: String,
        #[source]
        source: BoxError,
    },

    #[error("no argument named '{name}' was declared")]
    NoSuchArgument { name: String },

    #[error("'{name}' is not a valid argument name")]
    InvalidName { name: String },

    #[error("the name '{name}' is already declared")]
    DuplicateName { name: String },

    #[error("unknown argument: {token}")]
    UnknownArgument { token: String },

    #[error("argument '{argument}': expected {expected} value(s), {provided} provided")]
    MissingValues {
        argument: String,
        expected: usize,
        provided: usize,
    },

    #[error("unexpected positional value: {token}")]
    UnexpectedPositional { token: String },

    #[error("argument '{argument}' is required")]
    MissingRequired { argument: String },
}

impl ArgError {
    /// The name of the argument that originated the failure, if it is related with any
    pub fn argument(&self) -> Option<&str> {
        match self {
            ArgError::Conversion { argument, .. }
            | ArgError::TypeMismatch { argument, .. }
            | ArgError::EmptyValue { argument }
            | ArgError::Action { argument, .. }
            | ArgError::MissingValues { argument, .. }
            | ArgError::MissingRequired { argument } => Some(argument.as_str()),
            ArgError::NoSuchArgument { name }
            | ArgError::InvalidName { name }
            | ArgError::DuplicateName { name } => Some(name.as_str()),
            ArgError::UnknownArgument { .. } | ArgError::UnexpectedPositional { .. } => None,
        }
    }
}
