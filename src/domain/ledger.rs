use tracing::debug;

use super::Money;

/// Running total of rental revenue for the current session.
/// Not persisted: every process starts from zero.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    revenue: Money,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a rental payment. Callers pass non-negative amounts only.
    pub fn credit(&mut self, amount: Money) {
        debug_assert!(!amount.is_negative(), "ledger credit must not be negative");
        self.revenue += amount;
        debug!(%amount, balance = %self.revenue, "ledger credited");
    }

    pub fn balance(&self) -> Money {
        self.revenue
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_balance_starts_at_zero() {
        assert_eq!(Ledger::new().balance(), Money::ZERO);
    }

    #[test]
    fn test_balance_is_sum_of_credits() {
        let prices = [
            Money::from_units(900),
            Money::from_units(1100),
            Money::from_cents(40050),
        ];

        let mut ledger = Ledger::new();
        for price in prices {
            ledger.credit(price);
        }

        let expected: Money = prices.into_iter().sum();
        assert_eq!(ledger.balance(), expected);
        assert_eq!(ledger.balance().to_string(), "2400.50");
    }

    #[test]
    fn test_zero_credit_is_allowed() {
        let mut ledger = Ledger::new();
        ledger.credit(Money::ZERO);
        assert_eq!(ledger.balance(), Money::ZERO);
    }
}
