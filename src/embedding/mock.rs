use std::sync::atomic::{AtomicUsize, Ordering};

use image::RgbImage;

use super::{EmbeddingError, ImageEmbedder};

/// Deterministic embedder for tests.
///
/// Vectors are derived from simple pixel statistics, so identical crops
/// embed identically and different crops almost always differ. Tracks how
/// many times [`embed`](ImageEmbedder::embed) was invoked for interaction
/// assertions.
pub struct MockEmbedder {
    dim: usize,
    calls: AtomicUsize,
}

impl MockEmbedder {
    /// Mock embedder producing unit vectors of the given dimensionality.
    pub fn new(dim: usize) -> Self {
        Self {
            dim,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of `embed` invocations so far.
    pub fn embed_calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn seed_for(crop: &RgbImage) -> u64 {
        let (w, h) = crop.dimensions();
        let mut seed = 0xcbf29ce484222325u64 ^ ((w as u64) << 32 | h as u64);
        // Sample a bounded number of pixels so huge crops stay cheap.
        for (i, pixel) in crop.pixels().enumerate().step_by(97).take(256) {
            let v = pixel[0] as u64 | (pixel[1] as u64) << 8 | (pixel[2] as u64) << 16;
            seed = (seed ^ (v.wrapping_add(i as u64))).wrapping_mul(0x100000001b3);
        }
        seed
    }
}

impl ImageEmbedder for MockEmbedder {
    fn dim(&self) -> usize {
        self.dim
    }

    fn embed(&self, crops: &[RgbImage]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let vectors = crops
            .iter()
            .map(|crop| {
                let mut state = Self::seed_for(crop);
                let mut v: Vec<f32> = (0..self.dim)
                    .map(|_| {
                        // xorshift64
                        state ^= state << 13;
                        state ^= state >> 7;
                        state ^= state << 17;
                        (state >> 40) as f32 / (1u64 << 24) as f32 - 0.5
                    })
                    .collect();
                let norm: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
                if norm > 0.0 {
                    for x in &mut v {
                        *x /= norm;
                    }
                }
                v
            })
            .collect();

        Ok(vectors)
    }
}
