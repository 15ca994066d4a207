//! Priced items: an erased price handle, runtime decorators and a bundle
//! composite.
//!
//! Decorators ([`Discounted`], [`Taxed`]) wrap exactly one [`Item`] and are
//! `Priced` themselves, so they stack in any order and any number. A
//! [`Bundle`] holds an ordered list of items and can be decorated as a whole
//! or placed inside another bundle.

use std::fmt;

use crate::capability::{Money, Priced};
use crate::error::{ErasureError, Result};
use crate::poly::Poly;
use crate::prototype::Prototype;

trait PriceConcept {
    fn price(&self) -> Money;
    fn clone_model(&self) -> Box<dyn PriceConcept>;
}

impl Prototype for dyn PriceConcept {
    fn prototype(&self) -> Box<Self> {
        self.clone_model()
    }
}

#[derive(Clone)]
struct PriceModel<P>(P);

impl<P: Priced + Clone + 'static> PriceConcept for PriceModel<P> {
    fn price(&self) -> Money {
        self.0.price()
    }

    fn clone_model(&self) -> Box<dyn PriceConcept> {
        Box::new(self.clone())
    }
}

/// Anything with a price, held by value.
#[derive(Clone)]
pub struct Item {
    inner: Poly<dyn PriceConcept>,
}

impl Item {
    pub fn new<P: Priced + Clone + 'static>(item: P) -> Self {
        tracing::trace!(erased = std::any::type_name::<P>(), "erasing item");
        let model: Box<dyn PriceConcept> = Box::new(PriceModel(item));
        Item {
            inner: Poly::from_boxed(model),
        }
    }

    pub fn price(&self) -> Money {
        self.inner.get().price()
    }
}

impl<P: Priced + Clone + 'static> From<P> for Item {
    fn from(item: P) -> Self {
        Item::new(item)
    }
}

impl fmt::Debug for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Item").field("price", &self.price()).finish()
    }
}

// ============================================================================
// Leaf
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct Book {
    title: String,
    price: Money,
}

impl Book {
    pub fn new(title: impl Into<String>, price: Money) -> Self {
        Book {
            title: title.into(),
            price,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }
}

impl Priced for Book {
    fn price(&self) -> Money {
        self.price
    }
}

// ============================================================================
// Decorators
// ============================================================================

#[derive(Debug, Clone)]
pub struct Discounted {
    factor: f64,
    item: Item,
}

impl Discounted {
    /// `discount` is a fraction in `[0, 1]`; anything else, including NaN, is
    /// rejected and `item` is released with the error.
    pub fn new(discount: f64, item: impl Into<Item>) -> Result<Self> {
        let item = item.into();
        if !(0.0..=1.0).contains(&discount) {
            tracing::debug!(discount, "rejected discount");
            return Err(ErasureError::InvalidDiscount(discount));
        }
        Ok(Discounted {
            factor: 1.0 - discount,
            item,
        })
    }

    pub fn inner(&self) -> &Item {
        &self.item
    }
}

impl Priced for Discounted {
    fn price(&self) -> Money {
        self.item.price() * self.factor
    }
}

#[derive(Debug, Clone)]
pub struct Taxed {
    factor: f64,
    item: Item,
}

impl Taxed {
    /// `tax_rate` must be finite and non-negative.
    pub fn new(tax_rate: f64, item: impl Into<Item>) -> Result<Self> {
        let item = item.into();
        if !tax_rate.is_finite() || tax_rate < 0.0 {
            tracing::debug!(tax_rate, "rejected tax rate");
            return Err(ErasureError::InvalidTaxRate(tax_rate));
        }
        Ok(Taxed {
            factor: 1.0 + tax_rate,
            item,
        })
    }

    pub fn inner(&self) -> &Item {
        &self.item
    }
}

impl Priced for Taxed {
    fn price(&self) -> Money {
        self.item.price() * self.factor
    }
}

// ============================================================================
// Composite
// ============================================================================

/// Ordered group of items priced as their sum. Cloning copies every item in
/// the bundle, nested bundles included.
#[derive(Debug, Clone, Default)]
pub struct Bundle {
    items: Vec<Item>,
}

impl Bundle {
    pub fn new(items: impl IntoIterator<Item = Item>) -> Self {
        Bundle {
            items: items.into_iter().collect(),
        }
    }

    pub fn with(mut self, item: impl Into<Item>) -> Self {
        self.push(item);
        self
    }

    pub fn push(&mut self, item: impl Into<Item>) {
        self.items.push(item.into());
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn items_mut(&mut self) -> &mut [Item] {
        &mut self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl Priced for Bundle {
    fn price(&self) -> Money {
        self.items.iter().map(Item::price).sum()
    }
}
