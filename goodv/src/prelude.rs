// goodv-rs/goodv/src/prelude.rs

pub use crate::error::{Error, Result};
pub use crate::protocol::Command;
pub use crate::tag::{Connected, Disconnected, Tag};
pub use crate::tag::{Region, StageOfLife, Telemetry};
pub use crate::transport::{MockTransport, TagTransport};
pub use crate::types::{SessionState, TagId, Variant, VariantKind};

// Re-export small utilities for convenience
pub use crate::utils::{bytes_to_hex, bytes_to_hex_spaced, parse_hex};
