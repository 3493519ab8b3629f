//! Fire brigade: three fire cars answering eight fires over two days.
//!
//! Houses start calm (satisfied) and catch fire once each, at random
//! times injected as seed events. A fire is extinguished in two hours.
//!
//! Run with:
//!   cargo run --example fire_brigade
//!   RUST_LOG=queuesim_engine=trace cargo run --example fire_brigade

use std::error::Error;

use queuesim_core::{Fixed, Requester, Resource};
use queuesim_engine::{random_requests, Dispatcher, RunConfig, SimConfig};
use tracing_subscriber::EnvFilter;

// ─── Parameters (hours) ─────────────────────────────────────────

const INTERVAL: f64 = 48.0;
const EXTINCTION_TIME: f64 = 2.0;
const HOUSES: usize = 8;
const SEED: u64 = 2024;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // ─── Population ─────────────────────────────────────────────

    let cars = ["car1", "car2", "car3"]
        .into_iter()
        .map(|name| Resource::new(name, Fixed(EXTINCTION_TIME)))
        .collect();
    let names: Vec<String> = (1..=HOUSES).map(|i| format!("house{i}")).collect();
    let houses = names.iter().map(|n| Requester::one_shot(n.as_str())).collect();

    let mut sim = Dispatcher::new(SimConfig {
        free: cars,
        satisfied: houses,
        ..SimConfig::default()
    })?;

    // ─── Fires ──────────────────────────────────────────────────

    let fires = random_requests(names, INTERVAL, SEED);
    for fire in fires.iter() {
        tracing::info!(house = %fire.subject(), t = fire.time(), "fire scheduled");
    }

    let report = sim.run(RunConfig::until(INTERVAL).with_seeds(fires))?;

    print!("{}", sim.timeline());
    println!();
    println!(
        "stopped: {:?} at t={:.3}; deferrals: {}, accumulated delay: {:.3} h",
        report.stop, report.clock, report.metrics.deferrals, report.metrics.deferral_delay
    );
    Ok(())
}
