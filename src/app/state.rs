use crate::model::config::AppConfig;
use crate::model::silo::Silo;
use hourglass_core::metrics::Metrics;
use hourglass_io::{OvitoSaver, PhysicsSaver};

/// Headless runner: steps a silo to completion and writes its outputs.
pub struct App {
    pub config: AppConfig,
    pub silo: Silo,
    pub metrics: Metrics,
    pub ovito: OvitoSaver,
    pub physics: PhysicsSaver,
}

impl App {
    pub fn new(config: AppConfig) -> anyhow::Result<Self> {
        let silo = Silo::new(config.clone())?;
        let metrics = Metrics::new(config.output.log_interval);
        Ok(Self {
            config,
            silo,
            metrics,
            ovito: OvitoSaver,
            physics: PhysicsSaver,
        })
    }
}
