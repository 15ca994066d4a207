use std::env;
use std::path::Path;
use std::process::ExitCode;

use colored::Colorize;
use tracing_subscriber::EnvFilter;
use value_erasure::config::PricingConfig;
use value_erasure::expr::Value;
use value_erasure::function::Function;
use value_erasure::item::{Book, Bundle, Discounted, Taxed};
use value_erasure::shape::{total_cost, total_dispatch_cost, Circle, EquilateralTriangle, Square};
use value_erasure::{polygon, sum, DispatchShape, Evaluate, HasArea, Item, Result, Shape};

fn shapes(config: &PricingConfig) -> Result<()> {
    println!("{}", "=== Shapes priced by material ===".bold());
    let aluminum = config.aluminum()?;
    let steel = config.steel()?;

    let shapes = vec![
        Shape::new(Circle::new(2.5), aluminum),
        Shape::new(Square::new(3.0), steel),
        Shape::new(Circle::new(4.0), steel),
    ];
    let dispatch = vec![
        DispatchShape::new(Circle::new(2.5), aluminum),
        DispatchShape::new(Square::new(3.0), steel),
        DispatchShape::new(Circle::new(4.0), steel),
    ];

    for shape in &shapes {
        println!("  {shape:?}");
    }
    println!("  concept dispatch total: {:.2}", total_cost(&shapes));
    println!("  manual dispatch total:  {:.2}", total_dispatch_cost(&dispatch));
    Ok(())
}

fn polygons(config: &PricingConfig) -> Result<()> {
    println!("\n{}", "=== Composite polygons ===".bold());
    let square = Square::new(3.0);
    let pentagon = polygon![EquilateralTriangle::new(3.0), square];
    let outer = polygon![pentagon.clone(), square];
    println!("  triangle + square            = {:.3}", pentagon.area());
    println!("  (triangle + square) + square = {:.3}", outer.area());
    println!("  in steel: {:.2}", Shape::new(outer, config.steel()?).cost());
    Ok(())
}

fn expressions() {
    println!("\n{}", "=== Expression tree ===".bold());
    let eight = sum![Value::new(1.0), Value::new(3.0), Value::new(4.0)];
    let thirty_two = eight.clone() * Value::new(4.0);
    let sixteen = thirty_two.clone() / Value::new(2.0);
    println!("  1 + 3 + 4       = {}", eight.evaluate());
    println!("  (1 + 3 + 4) * 4 = {}", thirty_two.evaluate());
    println!("  ... / 2         = {}", sixteen.evaluate());
}

fn prices() -> Result<()> {
    println!("\n{}", "=== Decorated prices ===".bold());
    let book = Book::new("Effective C++", 100.0);
    let effective = Item::new(Taxed::new(0.2, Discounted::new(0.2, book.clone())?)?);
    println!("  {} taxed and discounted: {:.2}", book.title(), effective.price());

    let bundle = Bundle::default()
        .with(effective.clone())
        .with(Book::new("Design Patterns", 55.0));
    let sale = Discounted::new(0.1, bundle)?;
    println!("  bundle on sale: {:.2}", Item::new(sale).price());
    Ok(())
}

fn callables() {
    println!("\n{}", "=== Erased callables ===".bold());
    let mut operations: Vec<Function<(i32, i32), f64>> = vec![
        Function::new(|lhs: i32, rhs: i32| f64::from(lhs) / f64::from(rhs)),
        Function::new(|lhs: i32, rhs: i32| f64::from(lhs * rhs)),
    ];
    for operation in operations.iter_mut() {
        println!("  f(6, 3) = {}", operation.call((6, 3)));
    }
}

fn run() -> Result<()> {
    let config = match env::args().nth(1) {
        Some(path) => PricingConfig::load(Path::new(&path))?,
        None => PricingConfig::default(),
    };

    shapes(&config)?;
    polygons(&config)?;
    expressions();
    prices()?;
    callables();
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{} {err}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}
