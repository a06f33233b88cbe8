//! Binary persistence of a spreader's cursor list.

pub mod compat;
pub mod error;
pub mod format;
pub mod load;
pub mod save;

pub use error::PersistError;
pub use format::SaveHeader;
pub use load::{load, LoadReport};
pub use save::save;
