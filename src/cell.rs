//! Erased storage cell with a hand-built dispatch table.
//!
//! [`ErasedCell`] owns one heap value of a type it no longer knows. What it
//! keeps instead is three function pointers generated for that type when the
//! cell was built: one to run the bound operation, one to clone the storage
//! and one to release it. No trait object is involved; the table *is* the
//! vtable.
//!
//! Unsafe internals, safe API: the storage pointer and the three functions
//! are only ever created together in [`ErasedCell::new`] and never rebound,
//! so every call site passes storage of the type the function was
//! monomorphised for.

use std::fmt;
use std::ptr::NonNull;

// ============================================================================
// Typed payload and the functions that act on it
// ============================================================================

/// The value together with the operation bound to it at erasure time.
#[derive(Clone)]
struct Bound<T, F> {
    value: T,
    op: F,
}

unsafe fn invoke_bound<T, F, R>(storage: NonNull<()>) -> R
where
    F: Fn(&T) -> R,
{
    // SAFETY: `storage` came from `ErasedCell::new::<T, F>` and is still live.
    let bound = &*storage.cast::<Bound<T, F>>().as_ptr();
    (bound.op)(&bound.value)
}

unsafe fn clone_bound<T: Clone, F: Clone>(storage: NonNull<()>) -> NonNull<()> {
    // SAFETY: same provenance as in `invoke_bound`; the copy gets its own box.
    let bound = &*storage.cast::<Bound<T, F>>().as_ptr();
    NonNull::from(Box::leak(Box::new(bound.clone()))).cast()
}

unsafe fn destroy_bound<T, F>(storage: NonNull<()>) {
    // SAFETY: the pointer was produced by `Box::leak` for a `Bound<T, F>` and
    // is released exactly once, from `Drop for ErasedCell`.
    drop(Box::from_raw(storage.cast::<Bound<T, F>>().as_ptr()));
}

// ============================================================================
// The cell
// ============================================================================

pub struct ErasedCell<R> {
    storage: NonNull<()>,
    invoke_fn: unsafe fn(NonNull<()>) -> R,
    clone_fn: unsafe fn(NonNull<()>) -> NonNull<()>,
    destroy_fn: unsafe fn(NonNull<()>),
    type_name: &'static str,
}

impl<R> ErasedCell<R> {
    /// Moves `value` into fresh storage and binds `op` to it.
    ///
    /// This is the only place the concrete types are named. `'static` keeps
    /// borrowed data out of the cell, since the cell outlives any lifetime it
    /// could otherwise track.
    pub fn new<T, F>(value: T, op: F) -> Self
    where
        T: Clone + 'static,
        F: Fn(&T) -> R + Clone + 'static,
    {
        let type_name = std::any::type_name::<T>();
        tracing::trace!(erased = type_name, "erasing value into cell");

        let bound = Box::new(Bound { value, op });
        ErasedCell {
            storage: NonNull::from(Box::leak(bound)).cast(),
            invoke_fn: invoke_bound::<T, F, R>,
            clone_fn: clone_bound::<T, F>,
            destroy_fn: destroy_bound::<T, F>,
            type_name,
        }
    }

    /// Applies the bound operation to the owned value.
    pub fn invoke(&self) -> R {
        // SAFETY: `storage` and `invoke_fn` were created together in `new` (or
        // copied together in `clone`) and the storage is live while `self` is.
        unsafe { (self.invoke_fn)(self.storage) }
    }
}

impl<R> Clone for ErasedCell<R> {
    fn clone(&self) -> Self {
        tracing::trace!(erased = self.type_name, "cloning cell storage");
        ErasedCell {
            // SAFETY: see `invoke`.
            storage: unsafe { (self.clone_fn)(self.storage) },
            invoke_fn: self.invoke_fn,
            clone_fn: self.clone_fn,
            destroy_fn: self.destroy_fn,
            type_name: self.type_name,
        }
    }
}

impl<R> Drop for ErasedCell<R> {
    fn drop(&mut self) {
        tracing::trace!(erased = self.type_name, "destroying cell storage");
        // SAFETY: `drop` runs once per cell and every cell owns its storage
        // exclusively; clones hold separate allocations.
        unsafe { (self.destroy_fn)(self.storage) }
    }
}

impl<R> fmt::Debug for ErasedCell<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErasedCell").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[derive(Clone)]
    struct Probe {
        value: f64,
        drops: Rc<Cell<usize>>,
    }

    impl Probe {
        fn new(value: f64, drops: &Rc<Cell<usize>>) -> Self {
            Probe {
                value,
                drops: Rc::clone(drops),
            }
        }
    }

    impl Drop for Probe {
        fn drop(&mut self) {
            self.drops.set(self.drops.get() + 1);
        }
    }

    fn doubled(probe: &Probe) -> f64 {
        probe.value * 2.0
    }

    #[test]
    fn test_invoke_uses_bound_operation() {
        let cell = ErasedCell::new(21.0_f64, |v: &f64| v * 2.0);
        assert_eq!(cell.invoke(), 42.0);
        assert_eq!(cell.invoke(), 42.0);
    }

    #[test]
    fn test_capturing_operation() {
        let rate = 5.0;
        let cell = ErasedCell::new(3.0_f64, move |side: &f64| rate * side * side);
        assert_eq!(cell.invoke(), 45.0);
    }

    #[test]
    fn test_non_copy_result() {
        let cell = ErasedCell::new(String::from("dolly"), |name: &String| format!("{name}: baa"));
        assert_eq!(cell.clone().invoke(), "dolly: baa");
    }

    #[test]
    fn test_destroy_runs_exactly_once() {
        let drops = Rc::new(Cell::new(0));
        {
            let cell = ErasedCell::new(Probe::new(1.0, &drops), doubled);
            assert_eq!(cell.invoke(), 2.0);
            // Moving the probe into the cell must not drop it.
            assert_eq!(drops.get(), 0);
        }
        assert_eq!(drops.get(), 1);
    }

    #[test]
    fn test_move_does_not_double_release() {
        let drops = Rc::new(Cell::new(0));
        let first = ErasedCell::new(Probe::new(1.0, &drops), doubled);
        let second = first;
        let cells = vec![second];
        assert_eq!(drops.get(), 0);
        drop(cells);
        assert_eq!(drops.get(), 1);
    }

    #[test]
    fn test_clone_owns_separate_storage() {
        let drops = Rc::new(Cell::new(0));
        let original = ErasedCell::new(Probe::new(4.0, &drops), doubled);
        let copy = original.clone();

        drop(original);
        assert_eq!(drops.get(), 1);
        assert_eq!(copy.invoke(), 8.0);

        drop(copy);
        assert_eq!(drops.get(), 2);
    }

    #[test]
    fn test_zero_sized_payload() {
        #[derive(Clone)]
        struct Unit;

        let cell = ErasedCell::new(Unit, |_: &Unit| 7_u8);
        let copy = cell.clone();
        assert_eq!(cell.invoke(), 7);
        assert_eq!(copy.invoke(), 7);
    }

    #[test]
    fn test_debug_hides_payload() {
        let cell = ErasedCell::new(1_u32, |v: &u32| *v);
        assert_eq!(format!("{cell:?}"), "ErasedCell { .. }");
    }
}
