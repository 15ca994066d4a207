//! Erased callables with value semantics.
//!
//! `Function<Args, R>` stores any free function, closure or function object
//! callable with `Args` (a tuple) and returning `R`. Unlike `Box<dyn FnMut>`
//! it can be cloned; each clone carries its own copy of the callable's state.

use std::fmt;

use crate::poly::Poly;
use crate::prototype::Prototype;

// ============================================================================
// Capability: callable with a tuple of arguments
// ============================================================================

pub trait Callable<Args> {
    type Output;

    fn call(&mut self, args: Args) -> Self::Output;
}

macro_rules! impl_callable {
    ($($arg:ident $value:ident),*) => {
        impl<Func, Ret, $($arg,)*> Callable<($($arg,)*)> for Func
        where
            Func: FnMut($($arg),*) -> Ret,
        {
            type Output = Ret;

            fn call(&mut self, ($($value,)*): ($($arg,)*)) -> Ret {
                self($($value),*)
            }
        }
    };
}

impl_callable!();
impl_callable!(A a);
impl_callable!(A a, B b);
impl_callable!(A a, B b, C c);

// ============================================================================
// Erased handle
// ============================================================================

trait CallableConcept<Args, R> {
    fn invoke(&mut self, args: Args) -> R;
    fn clone_model(&self) -> Box<dyn CallableConcept<Args, R>>;
}

impl<Args: 'static, R: 'static> Prototype for dyn CallableConcept<Args, R> {
    fn prototype(&self) -> Box<Self> {
        self.clone_model()
    }
}

#[derive(Clone)]
struct CallableModel<F>(F);

impl<F, Args, R> CallableConcept<Args, R> for CallableModel<F>
where
    F: Callable<Args, Output = R> + Clone + 'static,
    Args: 'static,
    R: 'static,
{
    fn invoke(&mut self, args: Args) -> R {
        self.0.call(args)
    }

    fn clone_model(&self) -> Box<dyn CallableConcept<Args, R>> {
        Box::new(self.clone())
    }
}

/// An owned receiver paired with one of its methods.
struct BoundMethod<T, Args, R> {
    object: T,
    method: fn(&T, Args) -> R,
}

impl<T: Clone, Args, R> Clone for BoundMethod<T, Args, R> {
    fn clone(&self) -> Self {
        BoundMethod {
            object: self.object.clone(),
            method: self.method,
        }
    }
}

impl<T, Args, R> Callable<Args> for BoundMethod<T, Args, R> {
    type Output = R;

    fn call(&mut self, args: Args) -> R {
        (self.method)(&self.object, args)
    }
}

struct BoundMethodMut<T, Args, R> {
    object: T,
    method: fn(&mut T, Args) -> R,
}

impl<T: Clone, Args, R> Clone for BoundMethodMut<T, Args, R> {
    fn clone(&self) -> Self {
        BoundMethodMut {
            object: self.object.clone(),
            method: self.method,
        }
    }
}

impl<T, Args, R> Callable<Args> for BoundMethodMut<T, Args, R> {
    type Output = R;

    fn call(&mut self, args: Args) -> R {
        (self.method)(&mut self.object, args)
    }
}

pub struct Function<Args, R> {
    inner: Poly<dyn CallableConcept<Args, R>>,
}

impl<Args: 'static, R: 'static> Function<Args, R> {
    pub fn new<F>(callable: F) -> Self
    where
        F: Callable<Args, Output = R> + Clone + 'static,
    {
        tracing::trace!(erased = std::any::type_name::<F>(), "erasing callable");
        let model: Box<dyn CallableConcept<Args, R>> = Box::new(CallableModel(callable));
        Function {
            inner: Poly::from_boxed(model),
        }
    }

    /// Binds `method` to an owned `object`. The method receives the call's
    /// argument tuple as its second parameter.
    pub fn from_method<T: Clone + 'static>(object: T, method: fn(&T, Args) -> R) -> Self {
        Self::new(BoundMethod { object, method })
    }

    /// Like [`Function::from_method`] for methods that mutate their receiver.
    /// The receiver is part of the erased state and is cloned with it.
    pub fn from_method_mut<T: Clone + 'static>(object: T, method: fn(&mut T, Args) -> R) -> Self {
        Self::new(BoundMethodMut { object, method })
    }

    pub fn call(&mut self, args: Args) -> R {
        self.inner.get_mut().invoke(args)
    }
}

impl<Args: 'static, R: 'static> Clone for Function<Args, R> {
    fn clone(&self) -> Self {
        Function {
            inner: self.inner.clone(),
        }
    }
}

impl<Args, R> fmt::Debug for Function<Args, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
            .field("signature", &std::any::type_name::<fn(Args) -> R>())
            .finish_non_exhaustive()
    }
}
