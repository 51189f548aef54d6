use anyhow::Context;
use diffray_lib::{run_all, Mesh, SimulationConfig};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mesh = Mesh::reference_plate(2.0).context("building the flat reference plate")?;

    let config = SimulationConfig {
        frequencies: vec![250.0, 500.0, 1000.0, 2000.0, 4000.0],
        source_power: 1.0,
        num_collectors: 37,
        num_rays_squared: 60,
        ..SimulationConfig::default()
    };

    let report = run_all(&config, &mesh).context("running the simulation")?;

    for (frequency, coefficient) in report.diffusion.iter() {
        log::info!("{:>6.0} Hz -> diffusion coefficient {:.3}", frequency, coefficient);
    }
    if let Some(warning) = report.tracker_warning {
        log::warn!("tracker reported a non-fatal failure: {}", warning);
    }

    Ok(())
}
