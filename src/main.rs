use anyhow::{Result, anyhow};
use ichart::config::ChartConfig;
use ichart::render::BitmapSurface;
use log::info;
use std::env;

fn main() -> Result<()> {
    // Initialize logger with default info level if RUST_LOG not set
    if env::var("RUST_LOG").is_err() {
        unsafe {
            env::set_var("RUST_LOG", "info");
        }
    }
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let print_plan = args.iter().any(|arg| arg == "--plan");
    let config_file = args
        .iter()
        .find(|arg| !arg.starts_with("--"))
        .ok_or_else(|| anyhow!("Usage: ichart <config.json> [--plan]"))?;

    info!("Loading chart configuration from: {}", config_file);
    let config = ChartConfig::load_from_file(config_file)?;

    let (width, height) = (config.output.width, config.output.height);
    let snapshot = config.build_snapshot(move || BitmapSurface::new(width, height))?;
    info!(
        "{} points beyond the action limits, {} flagged by the rule engine",
        snapshot.model().points_beyond_action_limits().len(),
        snapshot.registry().signals().flagged_count()
    );
    let mut facade = snapshot.into_facade();

    if print_plan {
        println!("{}", serde_json::to_string_pretty(&facade.plan())?);
        return Ok(());
    }

    facade.render();
    let written = facade.export(&config.output.path)?;
    info!("Chart written to {}", written.display());

    Ok(())
}
