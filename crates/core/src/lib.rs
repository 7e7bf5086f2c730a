pub mod config;
pub mod error;
pub mod pcb;

pub use config::Config;
pub use error::*;
pub use pcb::*;
