#![forbid(unsafe_code)]
//! Shared vocabulary for the cekilis crates: the error taxonomy, the clock
//! port and configuration path resolution.

mod errors;
pub mod paths;
pub mod ports;

pub use errors::{Error, ErrorCode, ErrorContext, ExitCode, MachineError, Result, ResultExt};
pub use paths::{resolve_cekilis_config_path, ConfigPathScope};
pub use ports::{ClockPort, FixedClock, SystemClock};

pub const CRATE_NAME: &str = "cekilis-core";

pub const ENV_CEKILIS_LOG_LEVEL: &str = "CEKILIS_LOG_LEVEL";
pub const ENV_CEKILIS_LOG_JSON: &str = "CEKILIS_LOG_JSON";
pub const ENV_CEKILIS_CONFIG: &str = "CEKILIS_CONFIG";
