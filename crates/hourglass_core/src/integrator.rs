//! Beeman predictor-corrector integration.
//!
//! One call to [`BeemanIntegrator::update`] advances every particle by one
//! time step:
//!
//! 1. x(t+Δt) = x + v·Δt + (2/3)·a·Δt² − (1/6)·a_prev·Δt²
//! 2. v_p(t+Δt) = v + (3/2)·a·Δt − (1/2)·a_prev·Δt
//! 3. a(t+Δt) from contact forces evaluated at the predicted x and v_p of the
//!    particle, its overlap neighbours and the walls, plus gravity
//! 4. v(t+Δt) = v + (1/3)·a(t+Δt)·Δt + (5/6)·a·Δt − (1/6)·a_prev·Δt
//!
//! Results are computed from the state committed at the start of the step and
//! written back as one batch.

use crate::contact::{ContactBody, ContactForceCalculator};
use crate::error::{Result, SimError};
use crate::neighbors::{collect_indexed, grid_neighbor_sets, max_radius, naive_neighbor_sets};
use crate::spatial_hash::SpatialHash;
use hourglass_data::{Particle, Vec2, Wall};

/// How overlap neighbours are found each step.
#[derive(Debug, Clone)]
pub enum NeighborSearch {
    Naive,
    Grid { min: Vec2, max: Vec2 },
}

#[derive(Debug, Clone, Copy)]
struct IntegrationResult {
    position: Vec2,
    velocity: Vec2,
    acceleration: Vec2,
}

pub struct BeemanIntegrator {
    time_step: f64,
    gravity: Vec2,
    calculator: ContactForceCalculator,
    previous_accelerations: Vec<Vec2>,
    search: NeighborSearch,
    grid: Option<SpatialHash>,
    max_radius: f64,
    parallel: bool,
}

impl BeemanIntegrator {
    /// Creates an integrator and registers `particles` with a previous
    /// acceleration equal to gravity.
    pub fn new(
        particles: &[Particle],
        time_step: f64,
        gravity: Vec2,
        calculator: ContactForceCalculator,
        search: NeighborSearch,
        parallel: bool,
    ) -> Result<Self> {
        if !time_step.is_finite() || time_step <= 0.0 {
            return Err(SimError::invalid("time step must be finite and > 0"));
        }
        let mut integrator = Self {
            time_step,
            gravity,
            calculator,
            previous_accelerations: Vec::new(),
            search,
            grid: None,
            max_radius: 0.0,
            parallel,
        };
        integrator.set_new_particles(particles);
        Ok(integrator)
    }

    pub fn time_step(&self) -> f64 {
        self.time_step
    }

    pub fn gravity(&self) -> Vec2 {
        self.gravity
    }

    pub fn previous_acceleration(&self, index: usize) -> Option<Vec2> {
        self.previous_accelerations.get(index).copied()
    }

    /// Replaces the registered population; every history entry becomes gravity.
    pub fn set_new_particles(&mut self, particles: &[Particle]) {
        self.previous_accelerations = vec![self.gravity; particles.len()];
        self.max_radius = max_radius(particles);
        self.grid = match &self.search {
            NeighborSearch::Grid { min, max } if self.max_radius > 0.0 => {
                Some(SpatialHash::new(2.0 * self.max_radius, *min, *max))
            }
            _ => None,
        };
    }

    /// Resets the history of particles that were teleported by the respawn pass.
    pub fn report_respawned(&mut self, indices: &[usize]) -> Result<()> {
        for &index in indices {
            let slot = self
                .previous_accelerations
                .get_mut(index)
                .ok_or(SimError::MissingHistory { index })?;
            *slot = self.gravity;
        }
        Ok(())
    }

    #[inline]
    fn history(&self, index: usize) -> Result<Vec2> {
        self.previous_acceleration(index)
            .ok_or(SimError::MissingHistory { index })
    }

    /// Predicted position after one step.
    pub fn next_position(&self, index: usize, particle: &Particle) -> Result<Vec2> {
        let previous = self.history(index)?;
        let dt = self.time_step;
        Ok(particle.position
            + particle.velocity * dt
            + particle.acceleration * ((2.0 / 3.0) * dt * dt)
            - previous * ((1.0 / 6.0) * dt * dt))
    }

    /// Predicted velocity used only to evaluate contact forces.
    pub fn predict_velocity(&self, index: usize, particle: &Particle) -> Result<Vec2> {
        let previous = self.history(index)?;
        let dt = self.time_step;
        Ok(particle.velocity + particle.acceleration * (1.5 * dt) - previous * (0.5 * dt))
    }

    /// Corrected velocity once the new acceleration is known.
    pub fn correct_velocity(
        &self,
        index: usize,
        particle: &Particle,
        next_acceleration: &Vec2,
    ) -> Result<Vec2> {
        let previous = self.history(index)?;
        let dt = self.time_step;
        Ok(particle.velocity + next_acceleration * (dt / 3.0)
            + particle.acceleration * ((5.0 / 6.0) * dt)
            - previous * (dt / 6.0))
    }

    /// Overlap neighbour sets at the current positions.
    pub fn neighbor_sets(&mut self, particles: &[Particle]) -> Vec<Vec<usize>> {
        match self.grid.as_mut() {
            Some(grid) => grid_neighbor_sets(particles, grid, self.max_radius, self.parallel),
            None => naive_neighbor_sets(particles, self.parallel),
        }
    }

    /// Advances every particle by one time step.
    ///
    /// # Errors
    /// `SimError::MissingHistory` if a particle was never registered.
    pub fn update(&mut self, particles: &mut [Particle], walls: &[Wall]) -> Result<()> {
        if particles.len() > self.previous_accelerations.len() {
            return Err(SimError::MissingHistory {
                index: self.previous_accelerations.len(),
            });
        }

        let neighborhoods = self.neighbor_sets(particles);

        let shared: &[Particle] = particles;
        let predicted: Vec<ContactBody> = collect_indexed(shared.len(), self.parallel, |i| {
            let p = &shared[i];
            Ok(ContactBody::new(
                p.radius(),
                self.next_position(i, p)?,
                self.predict_velocity(i, p)?,
            ))
        })
        .into_iter()
        .collect::<Result<_>>()?;

        let results: Vec<IntegrationResult> =
            collect_indexed(shared.len(), self.parallel, |i| {
                self.integrate_one(i, &shared[i], &neighborhoods[i], &predicted, walls)
            })
            .into_iter()
            .collect::<Result<_>>()?;

        let current: Vec<Vec2> = shared.iter().map(|p| p.acceleration).collect();
        for (particle, result) in particles.iter_mut().zip(results) {
            particle.position = result.position;
            particle.velocity = result.velocity;
            particle.acceleration = result.acceleration;
        }
        self.previous_accelerations[..current.len()].copy_from_slice(&current);
        Ok(())
    }

    fn integrate_one(
        &self,
        index: usize,
        particle: &Particle,
        neighbors: &[usize],
        predicted: &[ContactBody],
        walls: &[Wall],
    ) -> Result<IntegrationResult> {
        let me = &predicted[index];
        let from_particles = neighbors
            .iter()
            .map(|&j| self.calculator.between_particles(me, &predicted[j]));
        let from_walls = walls
            .iter()
            .map(|wall| self.calculator.between_particle_and_wall(me, wall));
        let contact: Vec2 = from_particles.chain(from_walls).fold(Vec2::zeros(), |acc, f| acc + f);

        let total = contact + self.gravity * particle.mass();
        let acceleration = total / particle.mass();
        Ok(IntegrationResult {
            position: me.position,
            velocity: self.correct_velocity(index, particle, &acceleration)?,
            acceleration,
        })
    }
}
