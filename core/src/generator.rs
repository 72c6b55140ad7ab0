//! Synthetic customer population.
//!
//! Draws are bounded and uniform: a device price from the configured
//! set, a pivot date somewhere in the configured year, an approval date
//! on/after the pivot, and a delinquency streak gated by a single
//! Bernoulli trial. There is no attempt at statistical realism.

use crate::{
    config::ThermostatConfig,
    error::{ThermostatError, ThermostatResult},
    rng::{RngBank, StreamRng, StreamSlot},
    types::{round_cents, CustomerId, Date, Money},
};
use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerRecord {
    pub customer_id: CustomerId,
    /// Opaque reference date.
    pub pivot_date: Date,
    pub approved_at: Date,
    pub days_delinquent: u32,
    pub monthly_recurring_revenue: Money,
    pub device_value: Money,
}

impl CustomerRecord {
    pub fn is_delinquent(&self) -> bool {
        self.days_delinquent > 0
    }
}

pub struct DataGenerator {
    config: ThermostatConfig,
    month_starts: Vec<NaiveDate>,
    month_lengths: Vec<u32>,
}

impl DataGenerator {
    pub fn new(config: ThermostatConfig) -> ThermostatResult<Self> {
        config.validate()?;
        let year = config.year;
        let month_starts = (1..=12)
            .map(|m| NaiveDate::from_ymd_opt(year, m, 1))
            .collect::<Option<Vec<_>>>()
            .ok_or_else(|| ThermostatError::InvalidConfig(format!("year {year} is out of range")))?;
        let month_lengths = month_starts
            .iter()
            .map(|start| {
                let next = start.month() % 12 + 1;
                match NaiveDate::from_ymd_opt(year, next, 1) {
                    Some(n) if next != 1 => (n - *start).num_days() as u32,
                    _ => 31, // December
                }
            })
            .collect();
        Ok(Self {
            config,
            month_starts,
            month_lengths,
        })
    }

    /// Generate `count` customers from the configured seed.
    /// The same config and count always yield the same records.
    pub fn generate(&self, count: usize) -> Vec<CustomerRecord> {
        let bank = RngBank::new(self.config.seed);
        let mut dates_rng = bank.for_stream(StreamSlot::Dates);
        let mut delinquency_rng = bank.for_stream(StreamSlot::Delinquency);
        let mut devices_rng = bank.for_stream(StreamSlot::Devices);

        let mut customers = Vec::with_capacity(count);
        for i in 0..count {
            let (pivot_date, approved_at) = self.draw_dates(&mut dates_rng);

            // The streak is drawn for every customer so the stream stays
            // aligned regardless of the Bernoulli outcome.
            let delinquent = delinquency_rng.chance(self.config.delinquency_probability);
            let streak = delinquency_rng.next_u32_between(0, self.config.max_days_delinquent);
            let days_delinquent = if delinquent { streak } else { 0 };

            let device_value = *devices_rng.pick(&self.config.device_prices);
            let monthly_recurring_revenue =
                round_cents(device_value / f64::from(self.config.months_per_device));

            let record = CustomerRecord {
                customer_id: (i + 1) as CustomerId,
                pivot_date,
                approved_at,
                days_delinquent,
                monthly_recurring_revenue,
                device_value,
            };
            log::debug!("generator: {record:?}");
            customers.push(record);
        }

        let delinquent = customers.iter().filter(|c| c.is_delinquent()).count();
        log::info!(
            "generator: generated {} customers ({delinquent} delinquent, seed={})",
            customers.len(),
            self.config.seed
        );
        customers
    }

    fn draw_dates(&self, rng: &mut StreamRng) -> (Date, Date) {
        let pivot_month = rng.next_u32_between(1, 12);
        let pivot_day = rng.next_u32_between(1, self.month_length(pivot_month));

        let approved_month = rng.next_u32_between(pivot_month, 12);
        let approved_len = self.month_length(approved_month);
        let approved_day = rng.next_u32_between(pivot_day.min(approved_len), approved_len);

        (
            self.date(pivot_month, pivot_day),
            self.date(approved_month, approved_day),
        )
    }

    fn month_length(&self, month: u32) -> u32 {
        self.month_lengths[(month - 1) as usize]
    }

    fn date(&self, month: u32, day: u32) -> Date {
        self.month_starts[(month - 1) as usize] + Days::new(u64::from(day - 1))
    }
}

/// Generate `count` customers with the default configuration (seed 12).
pub fn generate(count: usize) -> Vec<CustomerRecord> {
    DataGenerator::new(ThermostatConfig::default())
        .expect("default config validates")
        .generate(count)
}

/// Generate `count` customers with an explicit configuration.
pub fn generate_with(config: &ThermostatConfig, count: usize) -> ThermostatResult<Vec<CustomerRecord>> {
    Ok(DataGenerator::new(config.clone())?.generate(count))
}
