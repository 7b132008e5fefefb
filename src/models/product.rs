use crate::error::{Result, SmartFarmError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: u32,
    pub name: &'static str,
    pub price: f64,
}

pub const PRODUCTS: &[Product] = &[
    Product {
        id: 1,
        name: "Organic Fertilizer",
        price: 29.99,
    },
    Product {
        id: 2,
        name: "Garden Tools Set",
        price: 49.99,
    },
    Product {
        id: 3,
        name: "Premium Seeds Pack",
        price: 19.99,
    },
];

pub fn find_product(id: u32) -> Option<&'static Product> {
    PRODUCTS.iter().find(|p| p.id == id)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: u32,
    pub quantity: u32,
}

impl CartLine {
    pub fn product(&self) -> Option<&'static Product> {
        find_product(self.product_id)
    }

    pub fn subtotal(&self) -> f64 {
        self.product()
            .map(|p| p.price * f64::from(self.quantity))
            .unwrap_or(0.0)
    }
}

/// Shopping cart. Lines keep the order products were first added.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn from_lines(lines: Vec<CartLine>) -> Self {
        Self {
            lines: lines.into_iter().filter(|l| l.quantity > 0).collect(),
        }
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn add(&mut self, product_id: u32) -> Result<&CartLine> {
        if find_product(product_id).is_none() {
            return Err(SmartFarmError::NotFound(format!("product {}", product_id)));
        }

        let idx = match self.lines.iter().position(|l| l.product_id == product_id) {
            Some(idx) => {
                self.lines[idx].quantity += 1;
                idx
            }
            None => {
                self.lines.push(CartLine {
                    product_id,
                    quantity: 1,
                });
                self.lines.len() - 1
            }
        };
        Ok(&self.lines[idx])
    }

    /// Removes one unit. Returns the remaining quantity for that product.
    pub fn remove_one(&mut self, product_id: u32) -> Result<u32> {
        let idx = self
            .lines
            .iter()
            .position(|l| l.product_id == product_id)
            .ok_or_else(|| SmartFarmError::NotFound(format!("product {} in cart", product_id)))?;

        self.lines[idx].quantity -= 1;
        let remaining = self.lines[idx].quantity;
        if remaining == 0 {
            self.lines.remove(idx);
        }
        Ok(remaining)
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    pub fn total(&self) -> f64 {
        self.lines.iter().map(CartLine::subtotal).sum()
    }

    pub fn quantity_of(&self, product_id: u32) -> u32 {
        self.lines
            .iter()
            .find(|l| l.product_id == product_id)
            .map(|l| l.quantity)
            .unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_increments_quantity() {
        let mut cart = Cart::default();
        cart.add(1).unwrap();
        cart.add(3).unwrap();
        let line = cart.add(1).unwrap();
        assert_eq!(line.quantity, 2);
        assert_eq!(cart.item_count(), 3);
        assert_eq!(cart.lines()[0].product_id, 1);
        assert_eq!(cart.lines()[1].product_id, 3);
    }

    #[test]
    fn add_unknown_product_fails() {
        let mut cart = Cart::default();
        assert!(matches!(cart.add(99), Err(SmartFarmError::NotFound(_))));
        assert!(cart.is_empty());
    }

    #[test]
    fn remove_one_drops_line_at_zero() {
        let mut cart = Cart::default();
        cart.add(2).unwrap();
        cart.add(2).unwrap();
        assert_eq!(cart.remove_one(2).unwrap(), 1);
        assert_eq!(cart.remove_one(2).unwrap(), 0);
        assert!(cart.is_empty());
        assert!(cart.remove_one(2).is_err());
    }

    #[test]
    fn total_sums_subtotals() {
        let mut cart = Cart::default();
        cart.add(1).unwrap();
        cart.add(1).unwrap();
        cart.add(3).unwrap();
        let expected = 29.99 * 2.0 + 19.99;
        assert!((cart.total() - expected).abs() < 1e-9);
    }

    #[test]
    fn from_lines_skips_empty_lines() {
        let cart = Cart::from_lines(vec![
            CartLine {
                product_id: 1,
                quantity: 0,
            },
            CartLine {
                product_id: 2,
                quantity: 4,
            },
        ]);
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.quantity_of(2), 4);
        assert_eq!(cart.quantity_of(1), 0);
    }
}
