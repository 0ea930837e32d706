//! Type erased storage for the resolved value of one argument.
//!
//! A [`Value`] keeps the identity of the concrete type it was built from next
//! to the erased data, and every read compares that identity before handing
//! the data back, so a wrong request surfaces as a [`CellError::TypeMismatch`]
//! instead of a reinterpreted value.

use std::any::{type_name, Any, TypeId};
use std::fmt::{self, Debug};
use std::rc::Rc;

use thiserror::Error;

/// Failures of the typed reads over a [`TypedValueCell`]
#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
pub enum CellError {
    #[error("stored value is a {stored}, but a {requested} was requested")]
    TypeMismatch {
        stored: &'static str,
        requested: &'static str,
    },
    #[error("nothing was stored")]
    Empty,
}

/// An erased value tagged with the identity of its concrete type
#[derive(Clone)]
pub struct Value {
    type_id: TypeId,
    type_name: &'static str,
    data: Rc<dyn Any>,
}

impl Value {
    pub fn new<T: Any>(value: T) -> Self {
        Self {
            type_id: TypeId::of::<T>(),
            type_name: type_name::<T>(),
            data: Rc::new(value),
        }
    }

    /// Readable name of the stored type, for diagnostics only
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn is<T: Any>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }

    /// Borrows the stored data as a `T`, if and only if `T` is the stored type
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        if self.is::<T>() {
            self.data.downcast_ref::<T>()
        } else {
            None
        }
    }

    /// Explicitly allowed widenings. A `&'static str` literal declared as default
    /// value is readable as a [`String`]
    fn widen<T: Any>(&self) -> Option<T> {
        let literal = self.downcast_ref::<&'static str>()?;
        let widened: Box<dyn Any> = Box::new(literal.to_string());
        widened.downcast::<T>().ok().map(|boxed| *boxed)
    }
}

impl Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Value")
            .field("type", &self.type_name)
            .finish_non_exhaustive()
    }
}

/// The per argument slot that remembers the concrete type of whatever value
/// was stored last
///
/// ```rust
/// use argbind::cell::{CellError, TypedValueCell};
///
/// let mut cell = TypedValueCell::empty();
/// assert_eq!(cell.retrieve::<i32>(), Err(CellError::Empty));
///
/// cell.store(42_i32);
/// assert_eq!(cell.retrieve::<i32>(), Ok(42));
/// assert!(matches!(
///     cell.retrieve::<u8>(),
///     Err(CellError::TypeMismatch { stored: "i32", requested: "u8" })
/// ));
/// ```
#[derive(Debug, Default, Clone)]
pub struct TypedValueCell {
    slot: Option<Value>,
}

impl TypedValueCell {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Records `value` together with the identity of `T`, replacing any previous content
    pub fn store<T: Any>(&mut self, value: T) {
        self.slot = Some(Value::new(value));
    }

    pub fn store_value(&mut self, value: Value) {
        self.slot = Some(value);
    }

    /// Returns a copy of the stored value as a `T`.
    ///
    /// Fails with [`CellError::Empty`] when nothing was ever stored, and with
    /// [`CellError::TypeMismatch`] when `T` isn't the stored type (nor an allowed
    /// widening of it)
    pub fn retrieve<T: Any + Clone>(&self) -> Result<T, CellError> {
        let value = self.slot.as_ref().ok_or(CellError::Empty)?;

        if let Some(stored) = value.downcast_ref::<T>() {
            return Ok(stored.clone());
        }

        value.widen::<T>().ok_or(CellError::TypeMismatch {
            stored: value.type_name(),
            requested: type_name::<T>(),
        })
    }

    /// Borrows the stored value. Unlike [`TypedValueCell::retrieve`], no widening applies
    pub fn retrieve_ref<T: Any>(&self) -> Result<&T, CellError> {
        let value = self.slot.as_ref().ok_or(CellError::Empty)?;
        value.downcast_ref::<T>().ok_or(CellError::TypeMismatch {
            stored: value.type_name(),
            requested: type_name::<T>(),
        })
    }

    pub fn value(&self) -> Option<&Value> {
        self.slot.as_ref()
    }

    pub fn stored_type_name(&self) -> Option<&'static str> {
        self.slot.as_ref().map(Value::type_name)
    }

    pub fn is_empty(&self) -> bool {
        self.slot.is_none()
    }

    pub fn clear(&mut self) {
        self.slot = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Geometry {
        w: i32,
        h: i32,
    }

    #[test]
    fn test_store_and_retrieve_custom_type() {
        let mut cell = TypedValueCell::empty();
        cell.store(Geometry { w: 3, h: 4 });

        assert_eq!(cell.retrieve::<Geometry>(), Ok(Geometry { w: 3, h: 4 }));
        // Reads are side effect free
        assert_eq!(cell.retrieve::<Geometry>(), Ok(Geometry { w: 3, h: 4 }));
        assert_eq!(cell.retrieve_ref::<Geometry>().map(|g| g.h), Ok(4));
    }

    #[test]
    fn test_mismatched_type_is_rejected() {
        let mut cell = TypedValueCell::empty();
        cell.store(String::from("320x98"));

        let err = cell.retrieve::<Geometry>().unwrap_err();
        assert_eq!(
            err,
            CellError::TypeMismatch {
                stored: type_name::<String>(),
                requested: type_name::<Geometry>(),
            }
        );
        assert!(cell.retrieve_ref::<&str>().is_err());
    }

    #[test]
    fn test_same_layout_types_are_not_coerced() {
        let mut cell = TypedValueCell::empty();
        cell.store(7_u32);

        assert!(matches!(
            cell.retrieve::<i32>(),
            Err(CellError::TypeMismatch { .. })
        ));
        assert!(matches!(
            cell.retrieve::<f32>(),
            Err(CellError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_empty_cell() {
        let mut cell = TypedValueCell::empty();
        assert!(cell.is_empty());
        assert_eq!(cell.retrieve::<String>(), Err(CellError::Empty));
        assert_eq!(cell.stored_type_name(), None);

        cell.store(1_u8);
        cell.clear();
        assert_eq!(cell.retrieve::<u8>(), Err(CellError::Empty));
    }

    #[test]
    fn test_overwrite_updates_the_type_tag() {
        let mut cell = TypedValueCell::empty();
        cell.store(42_i32);
        cell.store(Geometry { w: 1, h: 1 });

        assert_eq!(cell.stored_type_name(), Some(type_name::<Geometry>()));
        assert!(cell.retrieve::<i32>().is_err());
    }

    #[test]
    fn test_str_literal_widens_to_string() {
        let mut cell = TypedValueCell::empty();
        cell.store("bar");

        assert_eq!(cell.retrieve::<String>(), Ok(String::from("bar")));
        assert_eq!(cell.retrieve::<&str>(), Ok("bar"));
        // The widening is only available on owned reads
        assert!(cell.retrieve_ref::<String>().is_err());
    }
}
