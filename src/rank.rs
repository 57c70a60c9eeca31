use rayon::prelude::*;
use tracing::{debug, warn};

use crate::candidates::Candidate;
use crate::compare::Comparator;
use crate::error::CompareError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ranked {
    pub id: String,
    pub score: u64,
}

#[derive(Debug, Default)]
pub struct Ranking {
    // Best match first
    pub ranked: Vec<Ranked>,
    // Candidates whose filters could not be compared with the query
    pub rejected: Vec<(String, CompareError)>,
}

// Score every candidate against the query filter in parallel and keep those
// scoring at least `min_score`, best first. Ties are ordered by id.
pub fn rank<S: AsRef<str> + Sync>(
    comparator: &Comparator,
    query: &[S],
    candidates: &[Candidate],
    min_score: u64,
) -> Ranking {
    let scored: Vec<(&Candidate, Result<u64, CompareError>)> = candidates
        .par_iter()
        .map(|candidate| {
            let result = comparator.compare_chunked(query, candidate.chunks.as_slice());
            (candidate, result)
        })
        .collect();

    let mut ranking = Ranking::default();
    for (candidate, result) in scored {
        match result {
            Ok(score) if score >= min_score => {
                debug!(id = %candidate.id, score, "candidate kept");
                ranking.ranked.push(Ranked {
                    id: candidate.id.clone(),
                    score,
                });
            }
            Ok(score) => debug!(id = %candidate.id, score, "candidate below threshold"),
            Err(e) => {
                warn!("skipping candidate {}: {}", candidate.id, e);
                ranking.rejected.push((candidate.id.clone(), e));
            }
        }
    }

    ranking
        .ranked
        .sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.id.cmp(&b.id)));
    ranking
}
