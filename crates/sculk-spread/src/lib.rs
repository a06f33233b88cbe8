//! Charge-propagation simulation: cursors carrying charge outward from a
//! source through a block grid, bounded in count and merged when colocated.

pub mod behaviour;
pub mod config;
pub mod cursor;
pub mod patch;
pub mod spreader;
pub mod world;

#[cfg(test)]
mod test_world;

pub use behaviour::{BehaviourRegistry, DefaultBehaviour, SculkBehaviour};
pub use config::{load_config_from_str, ConfigError, SpreaderConfig};
pub use cursor::ChargeCursor;
pub use patch::{place_patch, SculkPatchConfig};
pub use spreader::Spreader;
pub use world::{SpreadEvent, SpreadWorld};
