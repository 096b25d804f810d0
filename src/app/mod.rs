pub mod state;

pub use state::App;

use anyhow::Result;
use hourglass_data::SiloState;
use hourglass_io::{write_json_file, RunSummary, StateSaver};

impl App {
    /// Runs the silo from a fresh start until its duration elapses.
    ///
    /// A state is recorded at step 0, every `sample_interval` steps, and at
    /// the last step. Each recorded `new_outside` covers every step since the
    /// previous record.
    pub fn run(&mut self) -> Result<Vec<SiloState>> {
        self.silo.restart()?;
        let interval = self.config.output.sample_interval;
        let mut states = vec![self.silo.snapshot()];
        let mut window = 0u64;

        tracing::info!(
            particles = self.silo.particles.len(),
            duration = self.config.simulation.duration,
            time_step = self.silo.time_step(),
            "Starting simulation"
        );

        while !self.silo.should_stop() {
            self.silo.update()?;
            window += self.silo.new_outside();
            self.metrics.record_step(
                self.silo.time(),
                self.silo.kinetic_energy(),
                self.silo.total_exited(),
                self.silo.total_respawned(),
            );
            if self.silo.step() % interval == 0 {
                states.push(SiloState {
                    new_outside: window,
                    ..self.silo.snapshot()
                });
                window = 0;
            }
        }
        if self.silo.step() % interval != 0 {
            states.push(SiloState {
                new_outside: window,
                ..self.silo.snapshot()
            });
        }

        tracing::info!(
            steps = self.silo.step(),
            exited = self.silo.total_exited(),
            respawned = self.silo.total_respawned(),
            states = states.len(),
            elapsed_ms = self.metrics.elapsed().as_millis() as u64,
            "Finished simulation"
        );
        Ok(states)
    }

    /// Aggregate figures for the run so far.
    pub fn summary(&self, states: &[SiloState]) -> RunSummary {
        RunSummary {
            fingerprint: self.config.fingerprint(),
            seed: self.config.simulation.seed,
            steps: self.silo.step(),
            simulated_time: self.silo.time(),
            time_step: self.silo.time_step(),
            particles: self.silo.particles.len(),
            total_exited: self.silo.total_exited(),
            total_respawned: self.silo.total_respawned(),
            final_kinetic_energy: self.silo.kinetic_energy(),
            recorded_states: states.len(),
            wall_clock_seconds: self.metrics.elapsed().as_secs_f64(),
        }
    }

    /// Writes the trajectory, the physics log and, if configured, the summary.
    pub fn save(&self, states: &[SiloState]) -> Result<()> {
        let output = &self.config.output;
        self.ovito.save(&output.ovito_path, states)?;
        self.physics.save(&output.physics_path, states)?;
        if let Some(path) = &output.summary_path {
            write_json_file(&self.summary(states), path)?;
            tracing::info!(path = %path.display(), "Summary saved");
        }
        Ok(())
    }
}
