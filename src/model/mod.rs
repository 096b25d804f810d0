pub mod config {
    pub use hourglass_core::config::*;
}
pub mod state {
    pub use hourglass_data::*;
}
pub mod silo;

pub use silo::Silo;
