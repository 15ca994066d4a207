//! Capability contracts.
//!
//! A capability is the narrow operation a concrete type has to provide to be
//! erased behind one of the crate's handles. Concrete types never learn about
//! the handles; they only implement the trait (and `Clone`, which the
//! prototype protocol captures at erasure time).

pub type Money = f64;

/// Anything that evaluates to a number.
pub trait Evaluate {
    fn evaluate(&self) -> f64;
}

/// Anything that has a price.
pub trait Priced {
    fn price(&self) -> Money;
}

/// Geometric area, consumed by cost strategies.
pub trait HasArea {
    fn area(&self) -> f64;
}
