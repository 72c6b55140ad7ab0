//! Delinquency thermostat: synthetic customer generation, cost-to-business
//! risk tagging and the two summary charts.

pub mod chart;
pub mod config;
pub mod error;
pub mod evaluator;
pub mod generator;
pub mod rng;
pub mod types;

pub use chart::{render_bar, render_pie, Figure};
pub use config::ThermostatConfig;
pub use error::{ThermostatError, ThermostatResult};
pub use evaluator::{classify, evaluate, EvaluatedRecord, ImpactSummary, RiskDistribution, RiskTag};
pub use generator::{generate, generate_with, CustomerRecord, DataGenerator};
