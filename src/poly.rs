//! The polymorphic value: one owned, boxed concept object with value
//! semantics.
//!
//! `Poly<dyn Concept>` is what every public handle in this crate stores. It
//! is never empty: the only constructor takes an already boxed model, cloning
//! goes through [`Prototype`], moving is a plain Rust move (the source binding
//! becomes unusable at compile time) and dropping releases the model exactly
//! once.

use std::fmt;

use crate::prototype::Prototype;

pub struct Poly<C: ?Sized> {
    inner: Box<C>,
}

impl<C: ?Sized> Poly<C> {
    pub fn from_boxed(inner: Box<C>) -> Self {
        Poly { inner }
    }

    pub(crate) fn get(&self) -> &C {
        &self.inner
    }

    pub(crate) fn get_mut(&mut self) -> &mut C {
        &mut self.inner
    }
}

impl<C: ?Sized + Prototype> Clone for Poly<C> {
    fn clone(&self) -> Self {
        tracing::trace!(concept = std::any::type_name::<C>(), "prototype clone");
        Poly {
            inner: self.get().prototype(),
        }
    }
}

impl<C: ?Sized> fmt::Debug for Poly<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Poly")
            .field("concept", &std::any::type_name::<C>())
            .finish_non_exhaustive()
    }
}
