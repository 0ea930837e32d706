//! Composition of callables with arguments captured at declaration time.
//!
//! Every function here returns a plain `FnMut(&str) -> R`, ready to be attached
//! as an action: the captured arguments are supplied first and the raw token of
//! the command line is appended as the trailing one.

use std::cell::RefCell;

/// A callable accepting the values of `Prefix` followed by one raw token.
///
/// Implemented for any `FnMut(A, .., &str) -> R` with up to four leading
/// parameters, all of them [`Clone`]. The prefix is cloned on every call, so a
/// bound callable never accumulates state between invocations.
pub trait PrefixedCallable<Prefix, R> {
    fn call_with(&mut self, prefix: &Prefix, token: &str) -> R;
}

macro_rules! impl_prefixed_callable {
    ($($arg:ident),+) => {
        impl<F, R, $($arg),+> PrefixedCallable<($($arg,)+), R> for F
        where
            F: FnMut($($arg,)+ &str) -> R,
            $($arg: Clone,)+
        {
            #[allow(non_snake_case)]
            fn call_with(&mut self, prefix: &($($arg,)+), token: &str) -> R {
                let ($($arg,)+) = prefix.clone();
                self($($arg,)+ token)
            }
        }
    };
}

impl_prefixed_callable!(A);
impl_prefixed_callable!(A, B);
impl_prefixed_callable!(A, B, C);
impl_prefixed_callable!(A, B, C, D);

/// Captures `prefix` by value in front of `callable`
///
/// ```rust
/// use argbind::binding::bound;
///
/// fn area(w: u32, h: u32, unit: &str) -> String {
///     format!("{}{unit}", w * h)
/// }
///
/// let mut action = bound::prefixed((4, 5), area);
/// assert_eq!(action("px"), "20px");
/// assert_eq!(action("pt"), "20pt");
/// ```
pub fn prefixed<P, F, R>(prefix: P, mut callable: F) -> impl FnMut(&str) -> R
where
    F: PrefixedCallable<P, R>,
{
    move |token: &str| callable.call_with(&prefix, token)
}

/// Invokes `method` over an object owned by the caller. The object is borrowed
/// for as long as the returned callable lives, and it's only touched when the
/// callable is invoked
pub fn by_mut<'a, T, F, R>(object: &'a mut T, mut method: F) -> impl FnMut(&str) -> R + 'a
where
    T: ?Sized,
    F: FnMut(&mut T, &str) -> R + 'a,
{
    move |token: &str| method(&mut *object, token)
}

/// Like [`by_mut`], but through a shared [`RefCell`], so the caller may inspect the
/// object while the callable is still alive
pub fn by_shared<'a, T, F, R>(object: &'a RefCell<T>, mut method: F) -> impl FnMut(&str) -> R + 'a
where
    T: ?Sized,
    F: FnMut(&mut T, &str) -> R + 'a,
{
    move |token: &str| method(&mut *object.borrow_mut(), token)
}

/// Invokes `method` over a fresh copy of `object` on every call
pub fn by_value<T, F, R>(object: T, mut method: F) -> impl FnMut(&str) -> R
where
    T: Clone,
    F: FnMut(&mut T, &str) -> R,
{
    move |token: &str| method(&mut object.clone(), token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, Clone, PartialEq)]
    struct Counter {
        hits: u32,
        last: String,
    }

    impl Counter {
        fn hit(&mut self, token: &str) -> u32 {
            self.hits += 1;
            self.last = token.to_string();
            self.hits
        }
    }

    fn join(a: &'static str, b: char, c: u8, token: &str) -> String {
        format!("{a}{b}{c}{token}")
    }

    #[test]
    fn test_prefix_goes_first() {
        let mut action = prefixed(("x", '-', 7), join);
        assert_eq!(action("y"), "x-7y");
    }

    #[test]
    fn test_by_value_prefix_does_not_accumulate() {
        let mut action = prefixed((Counter::default(),), |mut c: Counter, t: &str| c.hit(t));
        assert_eq!(action("a"), 1);
        assert_eq!(action("b"), 1);

        let mut owned = by_value(Counter::default(), Counter::hit);
        assert_eq!(owned("a"), 1);
        assert_eq!(owned("b"), 1);
    }

    #[test]
    fn test_by_mut_mutates_the_referenced_object() {
        let mut counter = Counter::default();
        {
            let mut action = by_mut(&mut counter, Counter::hit);
            action("first");
            action("second");
        }

        assert_eq!(counter.hits, 2);
        assert_eq!(counter.last, "second");
    }

    #[test]
    fn test_by_mut_without_invocation_leaves_the_object_untouched() {
        let mut counter = Counter::default();
        {
            let _action = by_mut(&mut counter, Counter::hit);
        }
        assert_eq!(counter, Counter::default());
    }

    #[test]
    fn test_by_shared_is_observable_while_alive() {
        let counter = RefCell::new(Counter::default());
        let mut action = by_shared(&counter, Counter::hit);

        action("one");
        assert_eq!(counter.borrow().hits, 1);
        action("two");
        assert_eq!(counter.borrow().last, "two");
    }
}
