//! Expression trees built from erased operands.
//!
//! [`Expression`] erases anything that implements [`Evaluate`]. The
//! aggregates ([`Addition`], [`Multiplication`], [`Subtraction`],
//! [`Division`]) hold ordered lists of `Expression` and implement `Evaluate`
//! themselves, so any aggregate can be erased again and nested inside
//! another one to arbitrary depth.
//!
//! Cloning an `Expression` or an aggregate copies every operand below it:
//! the cost is O(size of the subtree).

use std::fmt;
use std::ops::{Add, Div, Mul, Sub};

use crate::capability::Evaluate;
use crate::error::{ErasureError, Result};
use crate::poly::Poly;
use crate::prototype::Prototype;

// ============================================================================
// Erased handle
// ============================================================================

trait ExprConcept {
    fn evaluate(&self) -> f64;
    fn clone_model(&self) -> Box<dyn ExprConcept>;
}

impl Prototype for dyn ExprConcept {
    fn prototype(&self) -> Box<Self> {
        self.clone_model()
    }
}

#[derive(Clone)]
struct ExprModel<E>(E);

impl<E: Evaluate + Clone + 'static> ExprConcept for ExprModel<E> {
    fn evaluate(&self) -> f64 {
        self.0.evaluate()
    }

    fn clone_model(&self) -> Box<dyn ExprConcept> {
        Box::new(self.clone())
    }
}

/// A value-semantic handle to any expression.
#[derive(Clone)]
pub struct Expression {
    inner: Poly<dyn ExprConcept>,
}

impl Expression {
    pub fn new<E: Evaluate + Clone + 'static>(expression: E) -> Self {
        tracing::trace!(erased = std::any::type_name::<E>(), "erasing expression");
        let model: Box<dyn ExprConcept> = Box::new(ExprModel(expression));
        Expression {
            inner: Poly::from_boxed(model),
        }
    }

    pub fn evaluate(&self) -> f64 {
        self.inner.get().evaluate()
    }
}

impl<E: Evaluate + Clone + 'static> From<E> for Expression {
    fn from(expression: E) -> Self {
        Expression::new(expression)
    }
}

impl fmt::Debug for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Expression").field(&self.evaluate()).finish()
    }
}

// ============================================================================
// Leaf
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Value {
    value: f64,
}

impl Value {
    pub fn new(value: f64) -> Self {
        Value { value }
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::new(value)
    }
}

impl Evaluate for Value {
    fn evaluate(&self) -> f64 {
        self.value
    }
}

// ============================================================================
// Aggregates
// ============================================================================

/// Left fold seeded with the first operand.
fn fold_from_first(operands: &[Expression], combine: fn(f64, f64) -> f64) -> f64 {
    let mut values = operands.iter().map(Expression::evaluate);
    // Constructors reject empty operand lists, so a seed is always present.
    let seed = values.next().unwrap_or(f64::NAN);
    values.fold(seed, combine)
}

fn non_empty(kind: &'static str, operands: Vec<Expression>) -> Result<Vec<Expression>> {
    if operands.is_empty() {
        tracing::debug!(kind, "rejected aggregate without operands");
        return Err(ErasureError::empty_aggregate(kind));
    }
    Ok(operands)
}

/// Sum of its operands. An empty addition evaluates to `0.0`.
#[derive(Debug, Clone, Default)]
pub struct Addition {
    operands: Vec<Expression>,
}

impl Addition {
    pub fn new(operands: impl IntoIterator<Item = Expression>) -> Self {
        Addition {
            operands: operands.into_iter().collect(),
        }
    }

    fn pair(lhs: Expression, rhs: Expression) -> Self {
        Addition {
            operands: vec![lhs, rhs],
        }
    }
}

impl Evaluate for Addition {
    fn evaluate(&self) -> f64 {
        self.operands.iter().map(Expression::evaluate).sum()
    }
}

/// Product of its operands. An empty multiplication evaluates to `1.0`.
#[derive(Debug, Clone, Default)]
pub struct Multiplication {
    operands: Vec<Expression>,
}

impl Multiplication {
    pub fn new(operands: impl IntoIterator<Item = Expression>) -> Self {
        Multiplication {
            operands: operands.into_iter().collect(),
        }
    }

    fn pair(lhs: Expression, rhs: Expression) -> Self {
        Multiplication {
            operands: vec![lhs, rhs],
        }
    }
}

impl Evaluate for Multiplication {
    fn evaluate(&self) -> f64 {
        self.operands.iter().map(Expression::evaluate).product()
    }
}

/// First operand minus every following operand, in order.
#[derive(Debug, Clone)]
pub struct Subtraction {
    operands: Vec<Expression>,
}

impl Subtraction {
    /// Fails with [`ErasureError::EmptyAggregate`] when `operands` is empty;
    /// a subtraction has no neutral seed.
    pub fn new(operands: impl IntoIterator<Item = Expression>) -> Result<Self> {
        let operands = non_empty("Subtraction", operands.into_iter().collect())?;
        Ok(Subtraction { operands })
    }

    fn pair(lhs: Expression, rhs: Expression) -> Self {
        Subtraction {
            operands: vec![lhs, rhs],
        }
    }
}

impl Evaluate for Subtraction {
    fn evaluate(&self) -> f64 {
        fold_from_first(&self.operands, |acc, value| acc - value)
    }
}

/// First operand divided by every following operand, in order.
#[derive(Debug, Clone)]
pub struct Division {
    operands: Vec<Expression>,
}

impl Division {
    /// Fails with [`ErasureError::EmptyAggregate`] when `operands` is empty.
    pub fn new(operands: impl IntoIterator<Item = Expression>) -> Result<Self> {
        let operands = non_empty("Division", operands.into_iter().collect())?;
        Ok(Division { operands })
    }

    fn pair(lhs: Expression, rhs: Expression) -> Self {
        Division {
            operands: vec![lhs, rhs],
        }
    }
}

impl Evaluate for Division {
    fn evaluate(&self) -> f64 {
        fold_from_first(&self.operands, |acc, value| acc / value)
    }
}

// Shared accessors. Operands can be replaced or appended but never removed,
// which keeps Subtraction and Division non-empty.
macro_rules! impl_operands {
    ($($aggregate:ty),+ $(,)?) => {
        $(
            impl $aggregate {
                pub fn operands(&self) -> &[Expression] {
                    &self.operands
                }

                pub fn operands_mut(&mut self) -> &mut [Expression] {
                    &mut self.operands
                }

                pub fn push(&mut self, operand: impl Into<Expression>) {
                    self.operands.push(operand.into());
                }

                pub fn len(&self) -> usize {
                    self.operands.len()
                }

                pub fn is_empty(&self) -> bool {
                    self.operands.is_empty()
                }
            }
        )+
    };
}

impl_operands!(Addition, Multiplication, Subtraction, Division);

// ============================================================================
// Operators
// ============================================================================

// `lhs op rhs` erases both sides into a two-operand aggregate.
macro_rules! impl_arithmetic {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl<R: Into<Expression>> Add<R> for $ty {
                type Output = Addition;

                fn add(self, rhs: R) -> Addition {
                    Addition::pair(self.into(), rhs.into())
                }
            }

            impl<R: Into<Expression>> Sub<R> for $ty {
                type Output = Subtraction;

                fn sub(self, rhs: R) -> Subtraction {
                    Subtraction::pair(self.into(), rhs.into())
                }
            }

            impl<R: Into<Expression>> Mul<R> for $ty {
                type Output = Multiplication;

                fn mul(self, rhs: R) -> Multiplication {
                    Multiplication::pair(self.into(), rhs.into())
                }
            }

            impl<R: Into<Expression>> Div<R> for $ty {
                type Output = Division;

                fn div(self, rhs: R) -> Division {
                    Division::pair(self.into(), rhs.into())
                }
            }
        )+
    };
}

impl_arithmetic!(Expression, Value, Addition, Multiplication, Subtraction, Division);

// ============================================================================
// Variadic construction
// ============================================================================

/// Builds an [`Addition`](crate::expr::Addition) from any number of
/// expressions, erasing each one.
///
/// ```
/// use value_erasure::expr::Value;
/// use value_erasure::sum;
///
/// let eight = sum![Value::new(1.0), Value::new(3.0), Value::new(4.0)];
/// assert_eq!(value_erasure::capability::Evaluate::evaluate(&eight), 8.0);
/// ```
#[macro_export]
macro_rules! sum {
    ($($operand:expr),* $(,)?) => {
        $crate::expr::Addition::new(::std::vec![$($crate::expr::Expression::from($operand)),*])
    };
}

/// Builds a [`Multiplication`](crate::expr::Multiplication) from any number
/// of expressions.
#[macro_export]
macro_rules! product {
    ($($operand:expr),* $(,)?) => {
        $crate::expr::Multiplication::new(
            ::std::vec![$($crate::expr::Expression::from($operand)),*]
        )
    };
}

/// Builds a [`Subtraction`](crate::expr::Subtraction); evaluates to a
/// `Result` because an empty subtraction is rejected.
#[macro_export]
macro_rules! difference {
    ($($operand:expr),* $(,)?) => {
        $crate::expr::Subtraction::new(::std::vec![$($crate::expr::Expression::from($operand)),*])
    };
}

/// Builds a [`Division`](crate::expr::Division); evaluates to a `Result`.
#[macro_export]
macro_rules! quotient {
    ($($operand:expr),* $(,)?) => {
        $crate::expr::Division::new(::std::vec![$($crate::expr::Expression::from($operand)),*])
    };
}
