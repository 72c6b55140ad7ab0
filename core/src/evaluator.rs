//! The delinquency thermostat.
//!
//! Every customer is tagged from the money their delinquency has cost
//! so far: nothing owed is green, anything above the threshold is red,
//! and everything in between is yellow.

use crate::{
    error::{ThermostatError, ThermostatResult},
    generator::CustomerRecord,
    types::{round_cents, Money, DEFAULT_COST_THRESHOLD},
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Divisor turning monthly recurring revenue into daily revenue.
pub const DAYS_PER_MONTH: f64 = 31.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskTag {
    Green,
    Yellow,
    Red,
}

impl RiskTag {
    pub const ALL: [RiskTag; 3] = [RiskTag::Green, RiskTag::Yellow, RiskTag::Red];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Green => "green",
            Self::Yellow => "yellow",
            Self::Red => "red",
        }
    }

    /// Fill color used by every chart.
    pub fn color(&self) -> &'static str {
        self.as_str()
    }

    /// Legend label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Green => "No Impact",
            Self::Yellow => "Medium Impact",
            Self::Red => "High Impact",
        }
    }
}

impl fmt::Display for RiskTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A customer record plus the three derived thermostat fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluatedRecord {
    #[serde(flatten)]
    pub record: CustomerRecord,
    pub daily_recurring_revenue: Money,
    pub cost_to_business: Money,
    pub risk_tag: RiskTag,
}

/// Classify a cost. Total over all non-negative costs.
pub fn classify(cost: Money, threshold: Money) -> RiskTag {
    if cost == 0.0 {
        RiskTag::Green
    } else if cost <= threshold {
        RiskTag::Yellow
    } else {
        RiskTag::Red
    }
}

/// Evaluate one record against `threshold`.
pub fn evaluate_record(record: &CustomerRecord, threshold: Money) -> ThermostatResult<EvaluatedRecord> {
    let mrr = record.monthly_recurring_revenue;
    if !mrr.is_finite() || mrr < 0.0 {
        return Err(ThermostatError::InvalidRecord {
            customer_id: record.customer_id,
            reason: format!("monthly_recurring_revenue {mrr} must be finite and >= 0"),
        });
    }

    let daily_recurring_revenue = round_cents(mrr / DAYS_PER_MONTH);
    let cost_to_business = daily_recurring_revenue * f64::from(record.days_delinquent);
    if !daily_recurring_revenue.is_finite() || !cost_to_business.is_finite() {
        return Err(ThermostatError::InvalidRecord {
            customer_id: record.customer_id,
            reason: format!("monthly_recurring_revenue {mrr} overflows the derived amounts"),
        });
    }
    Ok(EvaluatedRecord {
        record: record.clone(),
        daily_recurring_revenue,
        cost_to_business,
        risk_tag: classify(cost_to_business, threshold),
    })
}

/// Evaluate every record. The first invalid record aborts the call.
pub fn evaluate(records: &[CustomerRecord], threshold: Money) -> ThermostatResult<Vec<EvaluatedRecord>> {
    if !threshold.is_finite() || threshold < 0.0 {
        return Err(ThermostatError::InvalidThreshold(threshold));
    }
    let evaluated = records
        .iter()
        .map(|r| evaluate_record(r, threshold))
        .collect::<ThermostatResult<Vec<_>>>()?;

    let red = evaluated.iter().filter(|e| e.risk_tag == RiskTag::Red).count();
    log::info!(
        "evaluator: evaluated {} customers at threshold {threshold} ({red} red)",
        evaluated.len()
    );
    Ok(evaluated)
}

/// Evaluate with the default threshold of 75.
pub fn evaluate_default(records: &[CustomerRecord]) -> ThermostatResult<Vec<EvaluatedRecord>> {
    evaluate(records, DEFAULT_COST_THRESHOLD)
}

/// Number of customers per tag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskDistribution {
    pub green: usize,
    pub yellow: usize,
    pub red: usize,
}

impl RiskDistribution {
    pub fn from_records(records: &[EvaluatedRecord]) -> Self {
        let mut dist = Self::default();
        for r in records {
            match r.risk_tag {
                RiskTag::Green => dist.green += 1,
                RiskTag::Yellow => dist.yellow += 1,
                RiskTag::Red => dist.red += 1,
            }
        }
        dist
    }

    pub fn count(&self, tag: RiskTag) -> usize {
        match tag {
            RiskTag::Green => self.green,
            RiskTag::Yellow => self.yellow,
            RiskTag::Red => self.red,
        }
    }

    pub fn total(&self) -> usize {
        self.green + self.yellow + self.red
    }

    /// Tags with at least one customer, most frequent first.
    /// Ties keep green, yellow, red order.
    pub fn present(&self) -> Vec<(RiskTag, usize)> {
        let mut present: Vec<(RiskTag, usize)> = RiskTag::ALL
            .iter()
            .map(|t| (*t, self.count(*t)))
            .filter(|(_, n)| *n > 0)
            .collect();
        // Stable sort keeps tag order among equal counts.
        present.sort_by(|a, b| b.1.cmp(&a.1));
        present
    }
}

/// Portfolio-level view of an evaluated population.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactSummary {
    pub total_customers: usize,
    pub delinquent_customers: usize,
    pub distribution: RiskDistribution,
    pub total_cost_to_business: Money,
    pub max_cost_to_business: Money,
}

impl ImpactSummary {
    pub fn from_records(records: &[EvaluatedRecord]) -> Self {
        Self {
            total_customers: records.len(),
            delinquent_customers: records.iter().filter(|r| r.record.is_delinquent()).count(),
            distribution: RiskDistribution::from_records(records),
            total_cost_to_business: round_cents(records.iter().map(|r| r.cost_to_business).sum()),
            max_cost_to_business: records
                .iter()
                .map(|r| r.cost_to_business)
                .fold(0.0, f64::max),
        }
    }
}
