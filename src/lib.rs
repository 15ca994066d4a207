//! # Value-semantic type erasure
//!
//! Handles that hold *any* concrete type providing one narrow capability,
//! copy like ordinary values and never require the concrete types to share a
//! base trait object.
//!
//! ## Building blocks
//! - [`capability`]: the contracts (`Evaluate`, `Priced`, `HasArea`)
//! - [`prototype`]: cloning an erased value without naming its type
//! - [`poly`]: the owning, cloneable box every handle is built on
//! - [`cell`]: the same idea with a hand-built dispatch table
//!
//! ## Handles and composites
//! - [`expr`]: `Expression` plus addition/multiplication/subtraction/division trees
//! - [`item`]: `Item` with `Discounted`/`Taxed` decorators and `Bundle`
//! - [`shape`]: `Figure` with the `Polygon` composite, plus `Shape` and
//!   `DispatchShape`, shapes bound to cost strategies
//! - [`function`]: `Function<Args, R>`, a cloneable erased callable
//!
//! Composites implement the capability they aggregate, so they can be erased
//! and nested again:
//!
//! ```
//! use value_erasure::capability::Evaluate;
//! use value_erasure::expr::Value;
//! use value_erasure::sum;
//!
//! let eight = sum![Value::new(1.0), Value::new(3.0), Value::new(4.0)];
//! let sixteen = eight * Value::new(4.0) / Value::new(2.0);
//! assert_eq!(sixteen.evaluate(), 16.0);
//! ```

pub mod capability;
pub mod cell;
pub mod config;
pub mod error;
pub mod expr;
pub mod function;
pub mod item;
pub mod poly;
pub mod prototype;
pub mod shape;

pub use capability::{Evaluate, HasArea, Money, Priced};
pub use error::{ErasureError, Result};
pub use expr::Expression;
pub use function::Function;
pub use item::Item;
pub use shape::{DispatchShape, Figure, Shape};
