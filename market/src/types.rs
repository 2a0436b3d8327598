use std::fmt;

/// On-chain pair identity; together the two fields form the price-feed lookup key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PairKey {
    pub chain: String,
    pub address: String,
}

impl PairKey {
    pub fn new(chain: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            chain: chain.into(),
            address: address.into(),
        }
    }

    /// Returns "chain/address", the same path segment the feed uses.
    pub fn id(&self) -> String {
        format!("{}/{}", self.chain, self.address)
    }
}

impl fmt::Display for PairKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.chain, self.address)
    }
}

/// A (price, valuation) pair at one point in time.
///
/// `cap_millions` is the fully diluted valuation in millions of USD,
/// already rounded to 3 decimals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quote {
    pub price: f64,
    pub cap_millions: f64,
}

impl Quote {
    pub fn new(price: f64, cap_millions: f64) -> Self {
        Self {
            price,
            cap_millions,
        }
    }
}

/// Relative move from `base` to `current`, in percent.
///
/// A zero base has no meaningful ratio and yields 0.
pub fn percent_change(base: f64, current: f64) -> f64 {
    if base == 0.0 {
        return 0.0;
    }
    (current - base) / base * 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pair_id_joins_chain_and_address() {
        let key = PairKey::new("bsc", "0xABC");
        assert_eq!(key.id(), "bsc/0xABC");
        assert_eq!(key.to_string(), key.id());
    }

    #[test]
    fn percent_change_is_signed() {
        assert!((percent_change(1.0, 1.05) - 5.0).abs() < 1e-9);
        assert!((percent_change(2.0, 1.0) + 50.0).abs() < 1e-9);
        assert_eq!(percent_change(3.0, 3.0), 0.0);
    }

    #[test]
    fn percent_change_from_zero_base_is_zero() {
        assert_eq!(percent_change(0.0, 10.0), 0.0);
    }
}
