//! thermostat-runner: headless driver for the delinquency thermostat.
//!
//! Usage:
//!   thermostat-runner --seed 12 --customers 20 --threshold 75 --out-dir ./out
//!   thermostat-runner --config thermostat.json --json

use anyhow::Result;
use std::env;
use std::path::Path;
use thermostat_core::{
    chart::{render_bar, render_pie},
    config::ThermostatConfig,
    evaluator::{evaluate, EvaluatedRecord, ImpactSummary, RiskTag},
    generator::DataGenerator,
};

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let mut config = match flag_value(&args, "--config") {
        Some(path) => ThermostatConfig::load(path)?,
        None => ThermostatConfig::default(),
    };
    config.seed = parse_arg(&args, "--seed", config.seed);
    config.num_customers = parse_arg(&args, "--customers", config.num_customers);
    config.cost_threshold = parse_arg(&args, "--threshold", config.cost_threshold);
    let out_dir = flag_value(&args, "--out-dir").unwrap_or("./out");
    let json_mode = args.iter().any(|a| a == "--json");

    if !json_mode {
        println!("Delinquency thermostat runner");
        println!("  seed:       {}", config.seed);
        println!("  customers:  {}", config.num_customers);
        println!("  threshold:  {}", config.cost_threshold);
        println!("  out_dir:    {out_dir}");
        println!();
    }

    let generator = DataGenerator::new(config.clone())?;
    let customers = generator.generate(config.num_customers);
    let evaluated = evaluate(&customers, config.cost_threshold)?;

    std::fs::create_dir_all(out_dir)?;
    let bar_path = Path::new(out_dir).join("impact_bar.svg");
    let pie_path = Path::new(out_dir).join("impact_pie.svg");
    render_bar(&evaluated).save(&bar_path)?;
    render_pie(&evaluated).save(&pie_path)?;

    if json_mode {
        println!("{}", serde_json::to_string_pretty(&evaluated)?);
    } else {
        print_table(&evaluated);
        print_summary(&ImpactSummary::from_records(&evaluated));
        println!("  bar chart:  {}", bar_path.display());
        println!("  pie chart:  {}", pie_path.display());
    }

    Ok(())
}

fn print_table(evaluated: &[EvaluatedRecord]) {
    println!(
        "{:>4}  {:<10}  {:<10}  {:>5}  {:>8}  {:>6}  {:>8}  tag",
        "id", "pivot", "approved", "days", "mrr", "daily", "cost"
    );
    for e in evaluated {
        let r = &e.record;
        println!(
            "{:>4}  {:<10}  {:<10}  {:>5}  {:>8.2}  {:>6.2}  {:>8.2}  {}",
            r.customer_id,
            r.pivot_date,
            r.approved_at,
            r.days_delinquent,
            r.monthly_recurring_revenue,
            e.daily_recurring_revenue,
            e.cost_to_business,
            e.risk_tag
        );
    }
    println!();
}

fn print_summary(summary: &ImpactSummary) {
    println!("=== IMPACT SUMMARY ===");
    println!("  customers:        {}", summary.total_customers);
    println!("  delinquent:       {}", summary.delinquent_customers);
    for tag in RiskTag::ALL {
        println!(
            "  {:<16}  {}",
            format!("{}:", tag.label().to_lowercase()),
            summary.distribution.count(tag)
        );
    }
    println!("  total cost:       ${:.2}", summary.total_cost_to_business);
    println!("  max cost:         ${:.2}", summary.max_cost_to_business);
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    match flag_value(args, flag) {
        Some(raw) => raw.parse().unwrap_or_else(|_| {
            log::warn!("ignoring unparseable {flag} value {raw:?}");
            default
        }),
        None => default,
    }
}
