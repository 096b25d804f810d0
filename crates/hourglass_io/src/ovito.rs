//! Extended-XYZ style trajectory for Ovito.
//!
//! Each frame is the line count, the frame index, then one line per particle
//! (`x y vx vy radius 1 1 1`) followed by both endpoints of every wall
//! (`x y 0 0 0.005 1 0 0`) in the order left, right, bottom-left,
//! bottom-right, top.

use crate::error::Result;
use crate::saver::StateSaver;
use hourglass_data::{ParticleState, SiloState, WallState};
use std::io::Write;

/// Radius used to draw wall endpoints.
const WALL_MARKER_RADIUS: f64 = 0.005;

#[derive(Debug, Default, Clone, Copy)]
pub struct OvitoSaver;

impl OvitoSaver {
    fn write_frame<W: Write>(
        writer: &mut W,
        frame: usize,
        state: &SiloState,
        particles: &[ParticleState],
    ) -> Result<()> {
        let walls = state.walls();
        writeln!(writer, "{}", particles.len() + 2 * walls.len())?;
        writeln!(writer, "{frame}")?;
        for p in particles {
            writeln!(
                writer,
                "{} {} {} {} {} 1 1 1",
                p.position.x, p.position.y, p.velocity.x, p.velocity.y, p.radius
            )?;
        }
        for wall in walls {
            Self::write_wall(writer, wall)?;
        }
        Ok(())
    }

    fn write_wall<W: Write>(writer: &mut W, wall: &WallState) -> Result<()> {
        for point in [&wall.initial_point, &wall.final_point] {
            writeln!(
                writer,
                "{} {} 0 0 {} 1 0 0",
                point.x, point.y, WALL_MARKER_RADIUS
            )?;
        }
        Ok(())
    }
}

impl StateSaver for OvitoSaver {
    fn name(&self) -> &'static str {
        "ovito"
    }

    /// States without particles are skipped; frames are numbered from 0.
    fn write_states<W: Write>(&self, writer: &mut W, states: &[SiloState]) -> Result<()> {
        let frames = states
            .iter()
            .filter_map(|s| s.particles.as_deref().map(|p| (s, p)));
        for (frame, (state, particles)) in frames.enumerate() {
            Self::write_frame(writer, frame, state, particles)?;
        }
        Ok(())
    }
}
