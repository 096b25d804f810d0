use anyhow::Result;
use clap::Parser;
use hourglass_core::metrics::init_logging;
use hourglass_lib::app::App;
use hourglass_lib::model::config::AppConfig;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Granular flow through a 2D silo", long_about = None)]
struct Args {
    /// Custom config file path
    #[arg(short, long, default_value = "hourglass.toml")]
    config: PathBuf,

    /// Simulated seconds, overrides the config file
    #[arg(short, long)]
    duration: Option<f64>,

    /// RNG seed, overrides the config file
    #[arg(short, long)]
    seed: Option<u64>,

    /// Ovito trajectory output path
    #[arg(long)]
    ovito: Option<PathBuf>,

    /// Kinetic energy and flow log output path
    #[arg(long)]
    physics: Option<PathBuf>,

    /// Run without writing any output
    #[arg(long)]
    no_output: bool,
}

impl Args {
    fn apply(&self, config: &mut AppConfig) {
        if let Some(duration) = self.duration {
            config.simulation.duration = duration;
        }
        if self.seed.is_some() {
            config.simulation.seed = self.seed;
        }
        if let Some(path) = &self.ovito {
            config.output.ovito_path = path.clone();
        }
        if let Some(path) = &self.physics {
            config.output.physics_path = path.clone();
        }
    }
}

fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();

    let mut config = AppConfig::load(&args.config)?;
    args.apply(&mut config);
    config.validate()?;

    tracing::info!(config = %args.config.display(), "Hourglass starting");
    let mut app = App::new(config)?;
    let states = app.run()?;

    if args.no_output {
        tracing::info!("Output disabled, skipping save");
    } else {
        app.save(&states)?;
    }
    tracing::info!("Done");
    Ok(())
}
