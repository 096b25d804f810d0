//! Kinetic energy and flow log.

use crate::error::Result;
use crate::saver::StateSaver;
use hourglass_data::SiloState;
use std::io::Write;

/// Writes `kineticEnergy = [...];` and `flow = [...];`, one sample per state.
#[derive(Debug, Default, Clone, Copy)]
pub struct PhysicsSaver;

fn join<T: ToString>(values: impl Iterator<Item = T>) -> String {
    values.map(|v| v.to_string()).collect::<Vec<_>>().join(", ")
}

impl StateSaver for PhysicsSaver {
    fn name(&self) -> &'static str {
        "physics"
    }

    fn write_states<W: Write>(&self, writer: &mut W, states: &[SiloState]) -> Result<()> {
        writeln!(
            writer,
            "kineticEnergy = [{}];",
            join(states.iter().map(|s| s.kinetic_energy))
        )?;
        writeln!(
            writer,
            "flow = [{}];",
            join(states.iter().map(|s| s.new_outside))
        )?;
        Ok(())
    }
}
