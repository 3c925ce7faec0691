mod common;

use common::{function, random_data, random_params, random_pwms, seeded_rng};
use objective::{
    InitKind, LearningPrinciple,
    data::{DataSet, WeightedData},
    function::{DifferentiableFunction, OptimizableFunction},
    prior::{CompositePrior, NoPrior},
    scoring::{Pwm, ScoringFunction},
};

#[test]
fn zeros() {
    let mut rng = seeded_rng();
    let function = function(
        2,
        random_pwms(&mut rng, 2, 3, 0.),
        random_data(&mut rng, &[3, 3], 3),
        Box::new(NoPrior),
        LearningPrinciple::MAXIMUM_LIKELIHOOD,
        true,
        true,
    );

    let params = function.parameters(InitKind::Zeros).unwrap();

    assert_eq!(params, vec![0.; function.dimension()]);
}

#[test]
fn last_returns_the_evaluated_parameters() {
    let mut rng = seeded_rng();
    let mut function = function(
        3,
        random_pwms(&mut rng, 3, 2, 1.),
        random_data(&mut rng, &[4, 2, 5], 2),
        Box::new(CompositePrior),
        LearningPrinciple::MAXIMUM_SUPERVISED_POSTERIOR,
        false,
        true,
    );
    let params = random_params(&mut rng, function.dimension());

    function.evaluate(&params).unwrap();

    assert_eq!(function.parameters(InitKind::Last).unwrap(), params);
}

#[test]
fn plugin_class_parameters() {
    // Class sizes 2 and 6 with unit weights.
    let data = WeightedData::uniform(vec![
        DataSet::from_dna(["AC", "GT"]).unwrap(),
        DataSet::from_dna(["AA", "CC", "GG", "TT", "AT", "TA"]).unwrap(),
    ])
    .unwrap();
    let scores: Vec<Box<dyn ScoringFunction>> = vec![
        Box::new(Pwm::new(2, 4, 2.).unwrap()),
        Box::new(Pwm::new(2, 4, 2.).unwrap()),
    ];

    let all_free = function(
        1,
        scores.clone(),
        data.clone(),
        Box::new(CompositePrior),
        LearningPrinciple::MAXIMUM_A_POSTERIORI,
        true,
        false,
    );
    let params = all_free.parameters(InitKind::Plugin).unwrap();

    // fractions (2 + 2) / 12 and (6 + 2) / 12, uniform pwms have ln Z = 2 ln 4
    let log_norm = 2. * 4f64.ln();
    let first = (4f64 / 12.).ln() - log_norm;
    let second = (8f64 / 12.).ln() - log_norm;
    assert!((params[0] - first).abs() < 1e-12);
    assert!((params[1] - second).abs() < 1e-12);
    assert!(params[2..].iter().all(|&p| p == 0.));

    let eliminated = function(
        1,
        scores,
        data,
        Box::new(CompositePrior),
        LearningPrinciple::MAXIMUM_A_POSTERIORI,
        true,
        true,
    );
    let params = eliminated.parameters(InitKind::Plugin).unwrap();

    // The stored and the eliminated log-weights are centred around zero.
    assert_eq!(params.len(), 1 + 16);
    assert!((params[0] - (first - second) / 2.).abs() < 1e-12);
}

fn plugin_probabilities(free_params: bool) -> Vec<f64> {
    let data = WeightedData::new(
        vec![
            DataSet::from_dna(["AC", "GT", "CA"]).unwrap(),
            DataSet::from_dna(["TT"]).unwrap(),
            DataSet::from_dna(["AG", "GA"]).unwrap(),
        ],
        vec![vec![1., 1., 1.], vec![1.], vec![0.5, 1.5]],
    )
    .unwrap();
    let scores: Vec<Box<dyn ScoringFunction>> = (0..3)
        .map(|_| Box::new(Pwm::new(2, 4, 0.).unwrap()) as Box<dyn ScoringFunction>)
        .collect();

    let mut function = function(
        2,
        scores,
        data,
        Box::new(NoPrior),
        LearningPrinciple::MAXIMUM_LIKELIHOOD,
        false,
        free_params,
    );
    let params = function.parameters(InitKind::Plugin).unwrap();
    function.set_params(&params).unwrap();

    function.class_weights().probabilities()
}

#[test]
fn plugin_weights_are_the_class_fractions_in_both_layouts() {
    let all_free = plugin_probabilities(false);
    let eliminated = plugin_probabilities(true);

    for ((a, b), want) in all_free.iter().zip(&eliminated).zip([0.5, 1. / 6., 1. / 3.]) {
        assert!((a - want).abs() < 1e-12);
        assert!((b - want).abs() < 1e-12);
    }
}

#[test]
fn add_term_moves_the_eliminated_class_by_the_term() {
    let mut rng = seeded_rng();
    let mut function = function(
        1,
        random_pwms(&mut rng, 3, 2, 1.),
        random_data(&mut rng, &[2, 2, 2], 2),
        Box::new(NoPrior),
        LearningPrinciple::MAXIMUM_LIKELIHOOD,
        false,
        true,
    );
    let params = random_params(&mut rng, function.dimension());
    function.set_params(&params).unwrap();

    let before = function.class_weights().log_clazz().to_vec();
    function.add_term_to_class_parameter(2, 0.8).unwrap();
    let after = function.class_weights().log_clazz();

    for class in 0..2 {
        let moved = (after[2] - after[class]) - (before[2] - before[class]);
        assert!((moved - 0.8).abs() < 1e-12);
    }
}

#[test]
fn plugin_is_idempotent() {
    let mut rng = seeded_rng();
    let mut function = function(
        2,
        random_pwms(&mut rng, 2, 3, 4.),
        random_data(&mut rng, &[5, 8], 3),
        Box::new(CompositePrior),
        LearningPrinciple::MAXIMUM_A_POSTERIORI,
        true,
        true,
    );

    let first = function.parameters(InitKind::Plugin).unwrap();
    let second = function.parameters(InitKind::Plugin).unwrap();
    assert_eq!(first, second);

    function.evaluate(&first).unwrap();
    assert_eq!(function.parameters(InitKind::Plugin).unwrap(), first);
}

#[test]
fn data_warm_start_gives_normalized_models() {
    let mut rng = seeded_rng();
    let mut function = function(
        2,
        random_pwms(&mut rng, 2, 3, 4.),
        random_data(&mut rng, &[6, 6], 3),
        Box::new(NoPrior),
        LearningPrinciple::MAXIMUM_LIKELIHOOD,
        true,
        false,
    );

    function.initialize_functions().unwrap();
    let params = function.parameters(InitKind::Plugin).unwrap();

    // Normalized models make the plug-in class weights the class fractions.
    let sums = function.data().sums().to_vec();
    let probs: Vec<f64> = params[..2].iter().map(|p| p.exp()).collect();
    assert!((probs[0] - (sums[0] + 4.) / (sums[2] + 8.)).abs() < 1e-12);
    assert!((probs[0] + probs[1] - 1.).abs() < 1e-12);
    assert!(function.evaluate(&params).unwrap().is_finite());
}

#[test]
fn unknown_policy_name() {
    assert!("warm".parse::<InitKind>().is_err());
}
