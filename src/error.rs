// Error types for decoding, comparing and loading bloom filters

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("token length {0} is not a multiple of 4")]
    Misaligned(usize),

    #[error("invalid base64 character {byte:#04x} at position {position}")]
    InvalidCharacter { position: usize, byte: u8 },

    #[error("padding character at position {0} is not part of the trailing padding")]
    MisplacedPadding(usize),

    #[error("token ends with {0} padding characters, at most 2 are allowed")]
    ExcessPadding(usize),

    #[error("token of length {len} with {padding} padding characters has no valid length")]
    NegativeLength { len: usize, padding: usize },
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum CompareError {
    #[error("invalid arguments: {0}")]
    ArgumentShape(String),

    #[error("invalid argument {index}: expected string, got {found}")]
    ArgumentType { index: usize, found: &'static str },

    #[error("invalid argument: {0}")]
    Decode(#[from] DecodeError),

    #[error("bloom filters are different lengths ({left} and {right} bytes)")]
    LengthMismatch { left: usize, right: usize },
}

#[derive(thiserror::Error, Debug)]
pub enum CandidateError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("candidate on row {row} has no filter chunks")]
    MissingChunks { row: usize },
}
