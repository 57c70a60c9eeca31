use std::path::Path;

use crate::error::CandidateError;

// A record whose published bloom filter can be scored against a query
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Candidate {
    pub id: String,
    // Base64 chunks of the filter, in publication order
    pub chunks: Vec<String>,
}

// Load candidates from a csv file.
// The expected format is:
// - No headers
// - One candidate per row
// - Each row starts with the candidate id
// - The rest of the row holds the filter's base64 chunks, at least one
pub fn load_candidates(path: impl AsRef<Path>) -> Result<Vec<Candidate>, CandidateError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        // Filters of different sizes span different numbers of chunks
        .flexible(true)
        .from_path(path)?;

    reader
        .records()
        .enumerate()
        .map(|(row, result)| {
            let record = result?;
            let mut fields = record.iter();
            let id = fields.next().unwrap_or_default().to_string();
            let chunks: Vec<String> = fields.map(str::to_string).collect();
            if chunks.is_empty() {
                return Err(CandidateError::MissingChunks { row });
            }
            Ok(Candidate { id, chunks })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_temp(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("{}-{}.csv", name, std::process::id()));
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_load_candidates() {
        let path = write_temp("candidates", "cache-a,/w==\ncache-b,AA==,/w==\n");
        let candidates = load_candidates(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(
            candidates,
            vec![
                Candidate {
                    id: "cache-a".to_string(),
                    chunks: vec!["/w==".to_string()],
                },
                Candidate {
                    id: "cache-b".to_string(),
                    chunks: vec!["AA==".to_string(), "/w==".to_string()],
                },
            ]
        );
    }

    #[test]
    fn test_row_without_chunks() {
        let path = write_temp("candidates-missing", "cache-a,/w==\ncache-b\n");
        let result = load_candidates(&path);
        fs::remove_file(&path).unwrap();

        assert!(matches!(result, Err(CandidateError::MissingChunks { row: 1 })));
    }

    #[test]
    fn test_missing_file() {
        let path = std::env::temp_dir().join("bloom-compare-no-such-file.csv");
        assert!(matches!(load_candidates(path), Err(CandidateError::Csv(_))));
    }
}
