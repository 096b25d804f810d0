//! Common plumbing for the output writers.

use crate::error::{IoError, Result};
use hourglass_data::SiloState;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// A writer that serializes a sequence of snapshots into one file.
pub trait StateSaver {
    /// Short name used in log lines.
    fn name(&self) -> &'static str;

    /// Writes `states` to `writer`.
    fn write_states<W: Write>(&self, writer: &mut W, states: &[SiloState]) -> Result<()>;

    /// Writes `states` to `path`, creating parent directories as needed.
    fn save(&self, path: &Path, states: &[SiloState]) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                IoError::FileSystem(e).with_context(format!("creating {}", parent.display()))
            })?;
        }
        let file = File::create(path).map_err(|e| {
            IoError::FileSystem(e).with_context(format!("creating {}", path.display()))
        })?;
        let mut writer = BufWriter::new(file);
        self.write_states(&mut writer, states)
            .map_err(|e| e.with_context(format!("writing {}", path.display())))?;
        writer.flush()?;
        tracing::info!(
            saver = self.name(),
            path = %path.display(),
            states = states.len(),
            "Output saved"
        );
        Ok(())
    }
}
