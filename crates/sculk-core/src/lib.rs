pub mod block;
pub mod constants;
pub mod direction;
pub mod error;
pub mod faces;
pub mod math;
pub mod types;

pub use block::{BlockKind, BlockState, SubstrateTag};
pub use direction::Direction;
pub use error::SculkError;
pub use faces::FaceSet;
pub use types::BlockPos;
