// Bit-level operations on raw filter bytes

mod popcount;
pub use popcount::popcount;

mod intersect;
pub use intersect::and_in_place;
