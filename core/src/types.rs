//! Shared primitive types used across the pipeline.

use chrono::NaiveDate;

/// Unique, positive customer identifier. Assigned sequentially from 1.
pub type CustomerId = u32;

/// A calendar date. Serialized as `YYYY-MM-DD`.
pub type Date = NaiveDate;

/// A currency amount in dollars.
pub type Money = f64;

/// Default cost threshold separating yellow from red.
pub const DEFAULT_COST_THRESHOLD: Money = 75.0;

/// Default master seed.
pub const DEFAULT_SEED: u64 = 12;

/// Round to cents, half away from zero.
pub fn round_cents(amount: Money) -> Money {
    (amount * 100.0).round() / 100.0
}
