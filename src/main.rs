use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use charge_field::io::read_charge;
use charge_field::render::{render_figure, FigureOptions};
use charge_field::simulation::SimulationConfig;
use log::info;

const DEFAULT_OUTPUT: &str = "electric_field.svg";

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let output = std::env::args_os()
        .nth(1)
        .map_or_else(|| PathBuf::from(DEFAULT_OUTPUT), PathBuf::from);

    let stdin = io::stdin();
    let third = read_charge(&mut stdin.lock(), &mut io::stdout()).context("reading the third charge")?;
    info!("third charge q = {} at ({}, {})", third.charge, third.x(), third.y());

    let config = SimulationConfig::reference("point charges");
    let run = config.run(&[third]).context("evaluating the electric field")?;

    render_figure(&output, &run.grid, &run.field, &run.charges, &FigureOptions::default())
        .with_context(|| format!("rendering {}", output.display()))?;
    println!("Figure written to {}", output.display());
    Ok(())
}
