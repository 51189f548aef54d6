use std::collections::BTreeMap;

use crate::geometry::EnergyCollector;
use crate::Float;

// keyed by bit pattern for the same reason EnergyCollector keys its time axis that way:
// frequencies are user-supplied floats, not integers
#[derive(Debug, Clone, Default)]
pub struct DiffusionResult {
    coefficients: BTreeMap<u32, Float>,
}

impl DiffusionResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, frequency: Float, coefficient: Float) {
        self.coefficients.insert(frequency.to_bits(), coefficient);
    }

    pub fn get(&self, frequency: Float) -> Option<Float> {
        self.coefficients.get(&frequency.to_bits()).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.coefficients.is_empty()
    }

    pub fn len(&self) -> usize {
        self.coefficients.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Float, Float)> + '_ {
        self.coefficients
            .iter()
            .map(|(&bits, &d)| (Float::from_bits(bits), d))
    }

    pub fn coefficient_for(collectors: &[EnergyCollector]) -> Float {
        let energies: Vec<Float> = collectors.iter().map(|c| c.total_energy()).collect();
        let k = energies.len() as Float;
        let sum: Float = energies.iter().sum();
        let sum_sq: Float = energies.iter().map(|e| e * e).sum();
        if sum_sq <= 0.0 || k <= 1.0 {
            return 0.0;
        }
        let d = (sum * sum - sum_sq) / ((k - 1.0) * sum_sq);
        d.clamp(0.0, 1.0)
    }

    pub fn normalize_against(&self, reference: &Self) -> Self {
        let mut result = Self::new();
        for (frequency, d) in self.iter() {
            if let Some(d_reference) = reference.get(frequency) {
                result.insert(frequency, d - d_reference);
            }
        }
        result
    }
}
