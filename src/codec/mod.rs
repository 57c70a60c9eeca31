// Base64 text <-> bit buffer conversion

mod decode;
pub use decode::{decode, DecodeMode, Decoder};

mod encode;
pub use encode::{encode, encode_chunks, CHUNK_BYTES};
