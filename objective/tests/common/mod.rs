#![allow(dead_code)]

use objective::{
    LearningPrinciple,
    data::{DNA_SIZE, DataSet, Sequence, WeightedData},
    function::GenDisMixFunction,
    prior::LogPrior,
    scoring::{Pwm, ScoringFunction},
};
use rand::{Rng, SeedableRng, rngs::StdRng};

pub const ALPHABET: usize = DNA_SIZE;

pub fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

/// Random sequences of length `len` with weights in `[0.5, 2)`.
pub fn random_data(rng: &mut StdRng, per_class: &[usize], len: usize) -> WeightedData {
    let mut sets = Vec::new();
    let mut weights = Vec::new();

    for &n in per_class {
        let sequences = (0..n)
            .map(|_| {
                let symbols: Vec<u8> = (0..len).map(|_| rng.random_range(0..ALPHABET as u8)).collect();
                Sequence::new(symbols)
            })
            .collect();
        sets.push(DataSet::new(sequences));
        weights.push((0..n).map(|_| rng.random_range(0.5..2.)).collect());
    }

    WeightedData::new(sets, weights).unwrap()
}

/// One pwm per class with parameters drawn from `[-1, 1)`.
pub fn random_pwms(rng: &mut StdRng, classes: usize, len: usize, ess: f64) -> Vec<Box<dyn ScoringFunction>> {
    (0..classes)
        .map(|_| {
            let mut pwm = Pwm::new(len, ALPHABET, ess).unwrap();
            let params: Vec<f64> = (0..len * ALPHABET).map(|_| rng.random_range(-1.0..1.)).collect();
            pwm.set_params(&params).unwrap();
            Box::new(pwm) as Box<dyn ScoringFunction>
        })
        .collect()
}

pub fn random_params(rng: &mut StdRng, dimension: usize) -> Vec<f64> {
    (0..dimension).map(|_| rng.random_range(-1.0..1.)).collect()
}

pub fn function(
    threads: usize,
    scores: Vec<Box<dyn ScoringFunction>>,
    data: WeightedData,
    prior: Box<dyn LogPrior>,
    principle: LearningPrinciple,
    normalize: bool,
    free_params: bool,
) -> GenDisMixFunction {
    GenDisMixFunction::new(threads, scores, data, prior, principle, normalize, free_params).unwrap()
}
