use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use memmap2::Mmap;
use tracing::info;

use crate::game::Game;

use super::error::IndexError;
use super::model::{SearchHit, SetRecord};
use super::SetIndex;

/// Exact squared-L2 index over a memory-mapped vector bank.
///
/// Loads `{game}.vec` (row-major little-endian f32) and `{game}_meta.json`
/// (one record per row) from an index directory. Read-only after load; safe
/// to share across threads behind a reference.
pub struct FlatIndex {
    bank: Mmap,
    dim: usize,
    rows: usize,
    meta: Vec<SetRecord>,
    path: PathBuf,
}

impl std::fmt::Debug for FlatIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlatIndex")
            .field("path", &self.path)
            .field("rows", &self.rows)
            .field("dim", &self.dim)
            .finish()
    }
}

impl FlatIndex {
    /// Loads the vector bank and metadata table for `game` from `dir`.
    ///
    /// The dimension is derived from the bank size and row count; every
    /// inconsistency is a distinct [`IndexError`].
    pub fn load(dir: &Path, game: Game) -> Result<Self, IndexError> {
        let bank_path = dir.join(format!("{}.vec", game.as_str()));
        let meta_path = dir.join(format!("{}_meta.json", game.as_str()));

        let file = File::open(&bank_path).map_err(|source| IndexError::Io {
            path: bank_path.clone(),
            source,
        })?;
        // SAFETY: the bank file is written once by the index builder and
        // treated as immutable for the process lifetime.
        let bank = unsafe { Mmap::map(&file) }.map_err(|source| IndexError::Io {
            path: bank_path.clone(),
            source,
        })?;

        if bank.is_empty() {
            return Err(IndexError::EmptyBank { path: bank_path });
        }
        if bank.len() % 4 != 0 {
            return Err(IndexError::MisalignedBank {
                len: bank.len(),
                path: bank_path,
            });
        }

        let meta_file = File::open(&meta_path).map_err(|source| IndexError::Io {
            path: meta_path.clone(),
            source,
        })?;
        let meta: Vec<SetRecord> = serde_json::from_reader(BufReader::new(meta_file))
            .map_err(|source| IndexError::MetaParse {
                path: meta_path.clone(),
                source,
            })?;

        if meta.is_empty() {
            return Err(IndexError::EmptyMeta { path: meta_path });
        }

        let floats = bank.len() / 4;
        let rows = meta.len();
        if floats % rows != 0 {
            return Err(IndexError::SizeIndivisible { floats, rows });
        }
        let dim = floats / rows;

        info!(
            game = %game,
            rows,
            dim,
            path = %bank_path.display(),
            "flat index loaded"
        );

        Ok(Self {
            bank,
            dim,
            rows,
            meta,
            path: bank_path,
        })
    }

    /// Squared L2 distance between `query` and the stored row, reading the
    /// bank in place.
    fn row_distance(&self, query: &[f32], row: usize) -> f32 {
        let start = row * self.dim * 4;
        let bytes = &self.bank[start..start + self.dim * 4];
        bytes
            .chunks_exact(4)
            .zip(query.iter())
            .map(|(chunk, &q)| {
                let v = f32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
                let d = v - q;
                d * d
            })
            .sum()
    }
}

impl SetIndex for FlatIndex {
    fn dim(&self) -> usize {
        self.dim
    }

    fn rows(&self) -> usize {
        self.rows
    }

    fn search(&self, queries: &[Vec<f32>], k: usize) -> Result<Vec<Vec<SearchHit>>, IndexError> {
        queries
            .iter()
            .map(|query| {
                if query.len() != self.dim {
                    return Err(IndexError::InvalidQueryDimension {
                        expected: self.dim,
                        actual: query.len(),
                    });
                }

                let mut hits: Vec<SearchHit> = (0..self.rows)
                    .map(|row| SearchHit {
                        distance: self.row_distance(query, row),
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
        self.meta.get(row).map(|r| r.set_id.as_str())
    }
}
