//! Injectable randomness for obstacle generation

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// A source of uniform floats in [0, 1)
pub trait RandomSource {
    fn next_f32(&mut self) -> f32;
}

/// Seeded PCG source; the same seed reproduces the same session
#[derive(Debug, Clone)]
pub struct PcgSource {
    rng: Pcg32,
}

impl PcgSource {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }
}

impl RandomSource for PcgSource {
    fn next_f32(&mut self) -> f32 {
        self.rng.random::<f32>()
    }
}

/// Replays a fixed list of values, cycling when exhausted
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    values: Vec<f32>,
    cursor: usize,
}

impl ScriptedSource {
    /// Values are clamped into [0, 1) so the contract holds for any script
    pub fn new(values: impl Into<Vec<f32>>) -> Self {
        let values = values
            .into()
            .into_iter()
            .map(|v| v.clamp(0.0, 1.0 - f32::EPSILON))
            .collect();
        Self { values, cursor: 0 }
    }
}

impl RandomSource for ScriptedSource {
    fn next_f32(&mut self) -> f32 {
        if self.values.is_empty() {
            return 0.0;
        }
        let v = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        v
    }
}
