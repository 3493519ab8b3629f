//! Pub night: one barmaid serving three drinkers for two hours.
//!
//! Demonstrates:
//!   1. Jittered service and think times
//!   2. Requesters that come back for more after their think time
//!   3. Printing the rendered timeline as a table
//!
//! Run with:
//!   cargo run --example pub_night
//!   RUST_LOG=queuesim_engine=debug cargo run --example pub_night

use std::error::Error;

use queuesim_core::{Requester, Resource};
use queuesim_engine::{Dispatcher, Jittered, RunConfig, SimConfig};
use tracing_subscriber::EnvFilter;

// ─── Parameters (minutes) ───────────────────────────────────────

const CLOSING_TIME: f64 = 120.0;
const SERVING_TIME: f64 = 2.0;
const JITTER: f64 = 1.0;
const DRINKERS: [(&str, f64); 3] = [("peter", 15.0), ("paul", 20.0), ("harry", 30.0)];

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // ─── Population ─────────────────────────────────────────────
    // Everybody is thirsty at opening time.

    let elke = Resource::new("elke", Jittered::new(SERVING_TIME, JITTER, 1));
    let drinkers = DRINKERS
        .iter()
        .zip(2u64..)
        .map(|(&(name, drinking), seed)| Requester::new(name, Jittered::new(drinking, JITTER, seed)))
        .collect();

    let mut sim = Dispatcher::new(SimConfig {
        free: vec![elke],
        waiting: drinkers,
        ..SimConfig::default()
    })?;

    // ─── Run ────────────────────────────────────────────────────

    let report = sim.run(RunConfig::until(CLOSING_TIME))?;

    print!("{}", sim.timeline());
    println!();
    println!(
        "stopped: {:?} after {} events at t={:.3}",
        report.stop, report.steps, report.clock
    );
    println!(
        "deferrals: {}, accumulated waiting: {:.3} min",
        report.metrics.deferrals, report.metrics.deferral_delay
    );
    Ok(())
}
