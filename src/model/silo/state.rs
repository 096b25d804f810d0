use crate::model::config::AppConfig;
use crate::model::silo::Silo;
use hourglass_data::{SiloState, Wall};

impl Silo {
    /// Immutable capture of the current step.
    ///
    /// Particles are included every `frame_interval` steps.
    pub fn snapshot(&self) -> SiloState {
        let [top, left, right, bottom_left, bottom_right] = &self.walls;
        let particles = (self.step % self.config.simulation.frame_interval == 0)
            .then(|| self.particles.iter().map(|p| p.state()).collect());
        SiloState {
            step: self.step,
            time: self.time,
            top_wall: top.state(),
            left_wall: left.state(),
            right_wall: right.state(),
            bottom_left_wall: bottom_left.state(),
            bottom_right_wall: bottom_right.state(),
            particles,
            kinetic_energy: self.kinetic_energy,
            new_outside: self.new_outside,
        }
    }

    /// Validated configuration the silo was built from.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn walls(&self) -> &[Wall; 5] {
        &self.walls
    }

    pub fn step(&self) -> u64 {
        self.step
    }

    /// Elapsed simulated time in seconds.
    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn time_step(&self) -> f64 {
        self.time_step
    }

    /// Total kinetic energy after the last step.
    pub fn kinetic_energy(&self) -> f64 {
        self.kinetic_energy
    }

    /// Exits counted during the last step.
    pub fn new_outside(&self) -> u64 {
        self.new_outside
    }

    pub fn total_exited(&self) -> u64 {
        self.total_exited
    }

    pub fn total_respawned(&self) -> u64 {
        self.total_respawned
    }

    /// Particles that crossed the outlet and are still waiting to be recycled.
    pub fn outside(&self) -> u64 {
        self.total_exited - self.total_respawned
    }

    pub fn total_mass(&self) -> f64 {
        self.particles.iter().map(|p| p.mass()).sum()
    }

    pub fn is_clean(&self) -> bool {
        self.clean
    }
}
