use serde::{Deserialize, Serialize};

/// One metadata row of the parallel table: which set the indexed reference
/// crop belongs to. Builder scripts may attach extra fields; they are
/// ignored here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetRecord {
    /// Set identifier (e.g. `"base1"`, `"neo4"`, `"mh2"`).
    pub set_id: String,
}

/// A single nearest-neighbor hit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchHit {
    /// Squared Euclidean distance to the query (unit vectors: 0..=4).
    pub distance: f32,
    /// Row into the metadata table.
    pub row: usize,
}

/// Squared Euclidean distance between two equal-length vectors.
pub fn squared_l2(a: &[f32], b: &[f32]) -> f32 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_squared_l2_identical() {
        let v = vec![0.6, 0.8];
        assert_eq!(squared_l2(&v, &v), 0.0);
    }

    #[test]
    fn test_squared_l2_opposite_unit_vectors() {
        let a = vec![1.0, 0.0];
        let b = vec![-1.0, 0.0];
        assert_eq!(squared_l2(&a, &b), 4.0);
    }

    #[test]
    fn test_set_record_parses_with_extra_fields() {
        let record: SetRecord =
            serde_json::from_str(r#"{"set_id": "base1", "name": "Base Set"}"#).unwrap();
        assert_eq!(record.set_id, "base1");
    }
}
