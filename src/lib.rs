pub mod bits;
pub mod buffer;
pub mod candidates;
pub mod codec;
pub mod compare;
pub mod error;
pub mod rank;
pub mod value;

pub use compare::{bloom_compare, Arity, CompareConfig, Comparator};
pub use value::Value;

pub type ChunkElement = u64;
pub type BinaryChunk = wide::u64x4;
