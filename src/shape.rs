//! Shapes: an erased area handle with a polygon composite, and shapes priced
//! by an injected cost strategy, erased two ways.
//!
//! [`Figure`] erases anything with an area. A [`Polygon`] is an ordered list
//! of figures and has an area itself, so polygons nest inside polygons.
//!
//! [`Shape`] uses a boxed concept object (one vtable per shape/strategy
//! pair, generated by the compiler). [`DispatchShape`] stores the same pair in
//! an [`ErasedCell`] whose function table is built by hand. Both give the same
//! cost for the same inputs. The leaves never learn about strategies or
//! erasure.

use std::f64::consts::PI;
use std::fmt;

use crate::capability::HasArea;
use crate::cell::ErasedCell;
use crate::error::{ErasureError, Result};
use crate::poly::Poly;
use crate::prototype::Prototype;

// ============================================================================
// Leaf shapes
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    radius: f64,
}

impl Circle {
    pub fn new(radius: f64) -> Self {
        Circle { radius }
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }
}

impl HasArea for Circle {
    fn area(&self) -> f64 {
        PI * self.radius * self.radius
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Square {
    side: f64,
}

impl Square {
    pub fn new(side: f64) -> Self {
        Square { side }
    }

    pub fn side(&self) -> f64 {
        self.side
    }
}

impl HasArea for Square {
    fn area(&self) -> f64 {
        self.side * self.side
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EquilateralTriangle {
    side: f64,
}

impl EquilateralTriangle {
    pub fn new(side: f64) -> Self {
        EquilateralTriangle { side }
    }

    pub fn side(&self) -> f64 {
        self.side
    }
}

impl HasArea for EquilateralTriangle {
    fn area(&self) -> f64 {
        3.0_f64.sqrt() / 4.0 * self.side * self.side
    }
}

// ============================================================================
// Area erasure and the polygon composite
// ============================================================================

trait AreaConcept {
    fn area(&self) -> f64;
    fn clone_model(&self) -> Box<dyn AreaConcept>;
}

impl Prototype for dyn AreaConcept {
    fn prototype(&self) -> Box<Self> {
        self.clone_model()
    }
}

#[derive(Clone)]
struct AreaModel<S>(S);

impl<S: HasArea + Clone + 'static> AreaConcept for AreaModel<S> {
    fn area(&self) -> f64 {
        self.0.area()
    }

    fn clone_model(&self) -> Box<dyn AreaConcept> {
        Box::new(self.clone())
    }
}

/// Any area-bearing value, held by value.
#[derive(Clone)]
pub struct Figure {
    inner: Poly<dyn AreaConcept>,
}

impl Figure {
    pub fn new<S: HasArea + Clone + 'static>(shape: S) -> Self {
        tracing::trace!(erased = std::any::type_name::<S>(), "erasing figure");
        let model: Box<dyn AreaConcept> = Box::new(AreaModel(shape));
        Figure {
            inner: Poly::from_boxed(model),
        }
    }

    pub fn area(&self) -> f64 {
        self.inner.get().area()
    }
}

impl<S: HasArea + Clone + 'static> From<S> for Figure {
    fn from(shape: S) -> Self {
        Figure::new(shape)
    }
}

impl fmt::Debug for Figure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Figure").field("area", &self.area()).finish()
    }
}

/// Compound shape whose area is the sum of its parts. An empty polygon has
/// area `0.0`.
#[derive(Debug, Clone, Default)]
pub struct Polygon {
    shapes: Vec<Figure>,
}

impl Polygon {
    pub fn new(shapes: impl IntoIterator<Item = Figure>) -> Self {
        Polygon {
            shapes: shapes.into_iter().collect(),
        }
    }

    pub fn with(mut self, shape: impl Into<Figure>) -> Self {
        self.push(shape);
        self
    }

    pub fn push(&mut self, shape: impl Into<Figure>) {
        self.shapes.push(shape.into());
    }

    pub fn shapes(&self) -> &[Figure] {
        &self.shapes
    }

    pub fn shapes_mut(&mut self) -> &mut [Figure] {
        &mut self.shapes
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}

impl HasArea for Polygon {
    fn area(&self) -> f64 {
        self.shapes.iter().map(Figure::area).sum()
    }
}

/// Builds a [`Polygon`](crate::shape::Polygon) from any number of
/// area-bearing values, erasing each one.
#[macro_export]
macro_rules! polygon {
    ($($shape:expr),* $(,)?) => {
        $crate::shape::Polygon::new(::std::vec![$($crate::shape::Figure::from($shape)),*])
    };
}

// ============================================================================
// Cost strategies
// ============================================================================

pub trait CostStrategy {
    fn cost<S: HasArea>(&self, shape: &S) -> f64;
}

/// Flat price per unit of area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialCost {
    rate: f64,
}

impl MaterialCost {
    pub const ALUMINUM_RATE: f64 = 2.0;
    pub const STEEL_RATE: f64 = 5.0;

    pub fn new(rate: f64) -> Result<Self> {
        if !rate.is_finite() || rate < 0.0 {
            tracing::debug!(rate, "rejected cost rate");
            return Err(ErasureError::InvalidCostRate(rate));
        }
        Ok(MaterialCost { rate })
    }

    pub fn aluminum() -> Self {
        MaterialCost {
            rate: Self::ALUMINUM_RATE,
        }
    }

    pub fn steel() -> Self {
        MaterialCost {
            rate: Self::STEEL_RATE,
        }
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }
}

impl CostStrategy for MaterialCost {
    fn cost<S: HasArea>(&self, shape: &S) -> f64 {
        self.rate * shape.area()
    }
}

// ============================================================================
// Concept/model erasure
// ============================================================================

trait ShapeConcept {
    fn cost(&self) -> f64;
    fn clone_model(&self) -> Box<dyn ShapeConcept>;
}

impl Prototype for dyn ShapeConcept {
    fn prototype(&self) -> Box<Self> {
        self.clone_model()
    }
}

#[derive(Clone)]
struct ShapeModel<S, F> {
    shape: S,
    cost: F,
}

impl<S, F> ShapeConcept for ShapeModel<S, F>
where
    S: Clone + 'static,
    F: Fn(&S) -> f64 + Clone + 'static,
{
    fn cost(&self) -> f64 {
        (self.cost)(&self.shape)
    }

    fn clone_model(&self) -> Box<dyn ShapeConcept> {
        Box::new(self.clone())
    }
}

/// A shape bound to its cost strategy.
#[derive(Clone)]
pub struct Shape {
    inner: Poly<dyn ShapeConcept>,
}

impl Shape {
    pub fn new<S, C>(shape: S, strategy: C) -> Self
    where
        S: HasArea + Clone + 'static,
        C: CostStrategy + Clone + 'static,
    {
        Self::from_fn(shape, move |shape: &S| strategy.cost(shape))
    }

    /// Binds `shape` to a plain cost function instead of a [`CostStrategy`].
    pub fn from_fn<S, F>(shape: S, cost: F) -> Self
    where
        S: Clone + 'static,
        F: Fn(&S) -> f64 + Clone + 'static,
    {
        tracing::trace!(
            shape = std::any::type_name::<S>(),
            cost = std::any::type_name::<F>(),
            "erasing shape"
        );
        let model: Box<dyn ShapeConcept> = Box::new(ShapeModel { shape, cost });
        Shape {
            inner: Poly::from_boxed(model),
        }
    }

    pub fn cost(&self) -> f64 {
        self.inner.get().cost()
    }
}

impl fmt::Debug for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Shape").field("cost", &self.cost()).finish()
    }
}

// ============================================================================
// Manual dispatch erasure
// ============================================================================

/// Same contract as [`Shape`], stored in an [`ErasedCell`].
#[derive(Clone)]
pub struct DispatchShape {
    cell: ErasedCell<f64>,
}

impl DispatchShape {
    pub fn new<S, C>(shape: S, strategy: C) -> Self
    where
        S: HasArea + Clone + 'static,
        C: CostStrategy + Clone + 'static,
    {
        Self::from_fn(shape, move |shape: &S| strategy.cost(shape))
    }

    pub fn from_fn<S, F>(shape: S, cost: F) -> Self
    where
        S: Clone + 'static,
        F: Fn(&S) -> f64 + Clone + 'static,
    {
        DispatchShape {
            cell: ErasedCell::new(shape, cost),
        }
    }

    pub fn cost(&self) -> f64 {
        self.cell.invoke()
    }
}

impl fmt::Debug for DispatchShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DispatchShape").field("cost", &self.cost()).finish()
    }
}

// ============================================================================
// Client aggregation
// ============================================================================

pub fn total_cost(shapes: &[Shape]) -> f64 {
    shapes.iter().map(Shape::cost).sum()
}

pub fn total_dispatch_cost(shapes: &[DispatchShape]) -> f64 {
    shapes.iter().map(DispatchShape::cost).sum()
}
