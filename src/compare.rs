use tracing::{debug, error};

use crate::codec::{DecodeMode, Decoder};
use crate::error::CompareError;
use crate::value::Value;

/// How many operands a single call accepts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Arity {
    /// Any even number of operands, scored pairwise and summed.
    #[default]
    Pairs,
    /// Exactly two operands.
    SinglePair,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CompareConfig {
    pub arity: Arity,
    pub decode_mode: DecodeMode,
}

/// Scores how many bits two or more encoded bloom filters have in common.
///
/// Holds no per-call state, so one comparator can be shared across threads.
#[derive(Clone, Default)]
pub struct Comparator {
    config: CompareConfig,
    decoder: Decoder,
}

impl Comparator {
    pub fn new(config: CompareConfig) -> Self {
        Self {
            config,
            decoder: Decoder::new(config.decode_mode),
        }
    }

    pub fn config(&self) -> CompareConfig {
        self.config
    }

    /// Sum of the intersection popcounts of consecutive argument pairs.
    ///
    /// The argument count and every argument type are checked before anything
    /// is decoded. Any failure discards the pairs already scored.
    pub fn compare(&self, arguments: &[Value]) -> Result<u64, CompareError> {
        self.check_shape(arguments.len())?;
        let tokens = arguments
            .iter()
            .enumerate()
            .map(|(index, value)| {
                value.as_str().ok_or(CompareError::ArgumentType {
                    index,
                    found: value.type_name(),
                })
            })
            .collect::<Result<Vec<&str>, _>>()?;

        self.score_pairs(tokens.chunks_exact(2).map(|pair| (pair[0], pair[1])))
    }

    /// Intersection popcount of a single pair of tokens.
    pub fn compare_tokens(&self, left: &str, right: &str) -> Result<u64, CompareError> {
        let mut left = self.decoder.decode(left)?;
        let right = self.decoder.decode(right)?;
        left.intersect(&right)?;
        Ok(left.count_ones())
    }

    /// Compare two filters published as lists of chunks. Chunk `i` of one
    /// filter is paired with chunk `i` of the other.
    pub fn compare_chunked<Q, C>(&self, query: &[Q], candidate: &[C]) -> Result<u64, CompareError>
    where
        Q: AsRef<str>,
        C: AsRef<str>,
    {
        if query.len() != candidate.len() {
            return Err(CompareError::ArgumentShape(format!(
                "filters have {} and {} chunks",
                query.len(),
                candidate.len()
            )));
        }
        self.check_shape(query.len() * 2)?;
        self.score_pairs(
            query
                .iter()
                .zip(candidate)
                .map(|(q, c)| (q.as_ref(), c.as_ref())),
        )
    }

    /// Host-facing entry point: an integer on success, an error marker otherwise.
    /// The reason for a failure only goes to the log.
    pub fn evaluate(&self, arguments: &[Value]) -> Value {
        match self.compare(arguments) {
            Ok(score) => match i64::try_from(score) {
                Ok(score) => Value::Integer(score),
                Err(_) => {
                    error!("ERROR: score {} does not fit in an integer", score);
                    Value::Error
                }
            },
            Err(e) => {
                error!("ERROR: {}", e);
                Value::Error
            }
        }
    }

    fn score_pairs<'a>(
        &self,
        pairs: impl Iterator<Item = (&'a str, &'a str)>,
    ) -> Result<u64, CompareError> {
        let mut total = 0;
        for (index, (left, right)) in pairs.enumerate() {
            let count = self.compare_tokens(left, right)?;
            debug!(pair = index, count, "scored pair");
            total += count;
        }
        Ok(total)
    }

    fn check_shape(&self, count: usize) -> Result<(), CompareError> {
        match self.config.arity {
            Arity::Pairs if count == 0 || count % 2 != 0 => Err(CompareError::ArgumentShape(
                format!("must be an even number of at least 2, got {}", count),
            )),
            Arity::SinglePair if count != 2 => Err(CompareError::ArgumentShape(format!(
                "expected exactly 2, got {}",
                count
            ))),
            _ => Ok(()),
        }
    }
}

/// Compare with the default configuration: any even number of strictly
/// decoded operands.
pub fn bloom_compare(arguments: &[Value]) -> Value {
    Comparator::default().evaluate(arguments)
}
