use std::sync::atomic::{AtomicUsize, Ordering};

use super::error::IndexError;
use super::model::{squared_l2, SearchHit};
use super::SetIndex;

/// In-memory index for tests: exact squared-L2 over explicit entries, with
/// a call counter for interaction assertions.
pub struct MockSetIndex {
    entries: Vec<(String, Vec<f32>)>,
    dim: usize,
    calls: AtomicUsize,
}

impl MockSetIndex {
    /// Empty mock index of the given dimensionality.
    pub fn new(dim: usize) -> Self {
        Self {
            entries: Vec::new(),
            dim,
            calls: AtomicUsize::new(0),
        }
    }

    /// Appends a reference vector labeled with `set_id`.
    ///
    /// # Panics
    /// Panics if the vector dimensionality disagrees (test misuse).
    pub fn with_entry(mut self, set_id: &str, vector: Vec<f32>) -> Self {
        assert_eq!(vector.len(), self.dim, "mock entry dimension mismatch");
        self.entries.push((set_id.to_string(), vector));
        self
    }

    /// Number of `search` invocations so far.
    pub fn search_calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl SetIndex for MockSetIndex {
    fn dim(&self) -> usize {
        self.dim
    }

    fn rows(&self) -> usize {
        self.entries.len()
    }

    fn search(&self, queries: &[Vec<f32>], k: usize) -> Result<Vec<Vec<SearchHit>>, IndexError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        queries
            .iter()
            .map(|query| {
                if query.len() != self.dim {
                    return Err(IndexError::InvalidQueryDimension {
                        expected: self.dim,
                        actual: query.len(),
                    });
                }
                let mut hits: Vec<SearchHit> = self
                    .entries
                    .iter()
                    .enumerate()
                    .map(|(row, (_, vector))| SearchHit {
                        distance: squared_l2(query, vector),
                        row,
                    })
                    .collect();
                hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
                hits.truncate(k);
                Ok(hits)
            })
            .collect()
    }

    fn set_id(&self, row: usize) -> Option<&str> {
        self.entries.get(row).map(|(set_id, _)| set_id.as_str())
    }
}
