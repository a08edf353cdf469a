use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

/// An amount in whole Vietnamese đồng.
///
/// Displayed the way the storefront shows prices: dot-grouped thousands and
/// the đồng sign, e.g. `500.000 ₫`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Price(pub u64);

impl Price {
    pub const ZERO: Price = Price(0);
}

impl Add for Price {
    type Output = Price;

    fn add(self, rhs: Price) -> Price {
        Price(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Price {
    fn add_assign(&mut self, rhs: Price) {
        *self = *self + rhs;
    }
}

impl Sum for Price {
    fn sum<I: Iterator<Item = Price>>(iter: I) -> Price {
        iter.fold(Price::ZERO, Add::add)
    }
}

impl Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let digits = self.0.to_string();
        let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                grouped.push('.');
            }
            grouped.push(c);
        }
        write!(f, "{grouped} ₫")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_groups_thousands() {
        assert_eq!(Price(0).to_string(), "0 ₫");
        assert_eq!(Price(999).to_string(), "999 ₫");
        assert_eq!(Price(500_000).to_string(), "500.000 ₫");
        assert_eq!(Price(12_345_678).to_string(), "12.345.678 ₫");
    }

    #[test]
    fn test_sum_of_prices() {
        let total: Price = [Price(100), Price(250)].into_iter().sum();
        assert_eq!(total, Price(350));
        assert_eq!(Price(u64::MAX) + Price(1), Price(u64::MAX));
    }
}
