use std::time::Instant;

use crate::configuration::config::BodyConfig;
use crate::simulation::engine::Engine;
use crate::simulation::params::Parameters;
use crate::simulation::scenario::Scenario;

/// Helper to build a deterministic, widely spaced cloud of size `n`
/// (spacing well above the contact distance so nothing merges while timing)
fn make_bodies(n: usize) -> Vec<BodyConfig> {
    let side = (n as f64).sqrt().ceil() as usize;
    (0..n)
        .map(|i| {
            let i_f = i as f64;
            BodyConfig {
                x: [(i % side) as f64 * 50.0 + (i_f * 0.37).sin(), (i / side) as f64 * 50.0 + (i_f * 0.13).cos()],
                v: [0.0, 0.0],
                m: 1.0 + (i % 7) as f64,
                color: None,
            }
        })
        .collect()
}

/// Time `Scenario::step` for a range of n
/// Paste output directly into a spreadsheet to graph
pub fn bench_step() -> anyhow::Result<()> {
    println!("N,step_ms,merges");

    for n in (200..=3200).step_by(200) {
        // Small n: average over a few steps to smooth noise
        let steps = if n <= 800 { 10 } else { 2 };

        let mut scenario = Scenario::from_bodies(Engine::default(), Parameters::default(), &make_bodies(n), None)?;

        // Warm up
        scenario.step()?;

        let mut merges = 0;
        let t0 = Instant::now();
        for _ in 0..steps {
            merges += scenario.step()?.merges.len();
        }
        let ms = t0.elapsed().as_secs_f64() * 1000.0 / steps as f64;

        println!("{},{:.6},{}", n, ms, merges);
    }

    Ok(())
}
