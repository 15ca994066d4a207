use std::f64::consts::PI;

use value_erasure::expr::{Addition, Division, Multiplication, Subtraction, Value};
use value_erasure::item::{Book, Bundle, Discounted, Taxed};
use value_erasure::shape::{
    total_cost, total_dispatch_cost, Circle, EquilateralTriangle, MaterialCost, Polygon, Square,
};
use value_erasure::{polygon, product, sum};
use value_erasure::{
    DispatchShape, ErasureError, Evaluate, Expression, Figure, HasArea, Item, Priced, Shape,
};

fn close(lhs: f64, rhs: f64, tolerance: f64) -> bool {
    (lhs - rhs).abs() < tolerance
}

#[test]
fn test_shape_costs_across_materials() {
    let shapes = vec![
        Shape::new(Circle::new(2.5), MaterialCost::aluminum()),
        Shape::new(Square::new(3.0), MaterialCost::steel()),
    ];
    let expected = 2.0 * (PI * 2.5 * 2.5) + 5.0 * (3.0 * 3.0);
    assert!(close(total_cost(&shapes), expected, 1e-9));
    assert!(close(total_cost(&shapes), 84.27, 0.01));

    let dispatch = vec![
        DispatchShape::new(Circle::new(2.5), MaterialCost::aluminum()),
        DispatchShape::new(Square::new(3.0), MaterialCost::steel()),
    ];
    assert_eq!(total_dispatch_cost(&dispatch), total_cost(&shapes));
}

#[test]
fn test_polygon_containing_a_polygon() {
    let triangle = EquilateralTriangle::new(3.0);
    let square = Square::new(3.0);
    let pentagon = polygon![triangle, square];
    let outer = polygon![pentagon, square];

    let expected = 3.0_f64.sqrt() / 4.0 * 9.0 + 9.0 + 9.0;
    assert!(close(outer.area(), expected, 1e-9));
    assert!(close(outer.area(), 21.897, 1e-3));

    let shapes: Vec<Figure> = vec![Figure::new(outer.clone()), Figure::new(Circle::new(1.0))];
    let total: f64 = shapes.iter().map(Figure::area).sum();
    assert!(close(total, expected + PI, 1e-9));
}

#[test]
fn test_polygon_clone_leaves_source_unchanged() {
    let source = Polygon::new(vec![
        Figure::new(polygon![Square::new(1.0), Square::new(1.0)]),
        Figure::new(Square::new(3.0)),
    ]);
    let mut copy = source.clone();
    copy.shapes_mut()[1] = Figure::new(Square::new(0.0));

    assert_eq!(copy.area(), 2.0);
    assert_eq!(source.area(), 11.0);
}

#[test]
fn test_calculator_through_erased_aggregates() {
    let eight = Addition::new(vec![
        Expression::new(Value::new(1.0)),
        Expression::new(Value::new(3.0)),
        Expression::new(Value::new(4.0)),
    ]);
    assert_eq!(eight.evaluate(), 8.0);

    let thirty_two = Multiplication::new(vec![
        Expression::new(eight),
        Expression::new(Value::new(4.0)),
    ]);
    assert_eq!(thirty_two.evaluate(), 32.0);

    let sixteen = Division::new(vec![
        Expression::new(thirty_two),
        Expression::new(Value::new(2.0)),
    ])
    .unwrap();
    assert_eq!(sixteen.evaluate(), 16.0);
}

#[test]
fn test_clone_of_composite_is_independent() {
    let original = sum![Value::new(1.0), Value::new(2.0)];
    let mut copy = original.clone();

    copy.operands_mut()[1] = Expression::new(Value::new(40.0));
    assert_eq!(copy.evaluate(), 41.0);
    assert_eq!(original.evaluate(), 3.0);

    let items = Bundle::default()
        .with(Book::new("a", 10.0))
        .with(Book::new("b", 20.0));
    let mut repriced = items.clone();
    repriced.items_mut()[0] = Item::new(Book::new("a", 0.0));
    assert_eq!(repriced.price(), 20.0);
    assert_eq!(items.price(), 30.0);
}

#[test]
fn test_nesting_composites_of_composites() {
    // depth 4: each level holds only other aggregates
    let level_one = || sum![Value::new(1.0), Value::new(1.0)];
    let level_two = || product![level_one(), level_one()];
    let level_three = || sum![level_two(), level_two(), level_two()];
    let level_four = Subtraction::new(vec![
        Expression::new(level_three()),
        Expression::new(level_three()),
        Expression::new(level_two()),
    ])
    .unwrap();

    assert_eq!(level_one().evaluate(), 2.0);
    assert_eq!(level_two().evaluate(), 4.0);
    assert_eq!(level_three().evaluate(), 12.0);
    assert_eq!(level_four.evaluate(), -4.0);
    assert_eq!(Expression::new(level_four.clone()).evaluate(), level_four.evaluate());
}

#[test]
fn test_decorated_bundle_nesting() {
    let inner = Bundle::default()
        .with(Book::new("a", 10.0))
        .with(Taxed::new(0.5, Book::new("b", 10.0)).unwrap());
    let outer = Bundle::default()
        .with(Discounted::new(0.5, inner).unwrap())
        .with(Book::new("c", 5.0));
    assert_eq!(Item::new(outer).price(), 17.5);
}

#[test]
fn test_invalid_arguments_fail_at_construction() {
    assert_eq!(
        Discounted::new(1.2, Book::new("a", 1.0)).unwrap_err(),
        ErasureError::InvalidDiscount(1.2)
    );
    assert_eq!(
        Taxed::new(-0.2, Book::new("a", 1.0)).unwrap_err(),
        ErasureError::InvalidTaxRate(-0.2)
    );
    assert!(matches!(
        Division::new(Vec::new()),
        Err(ErasureError::EmptyAggregate { kind: "Division" })
    ));
}
