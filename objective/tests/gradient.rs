mod common;

use common::{function, random_data, random_params, random_pwms, seeded_rng};
use objective::{
    LearningPrinciple,
    function::{DifferentiableFunction, GenDisMixFunction},
    prior::{CompositePrior, GaussianPrior, LogPrior, NoPrior},
};

fn assert_gradient_matches(function: &mut GenDisMixFunction, params: &[f64], label: &str) {
    let grad = function.gradient(params).unwrap();
    let h = 1e-5;

    for i in 0..params.len() {
        let mut up = params.to_vec();
        let mut down = params.to_vec();
        up[i] += h;
        down[i] -= h;

        let numeric = (function.evaluate(&up).unwrap() - function.evaluate(&down).unwrap()) / (2. * h);

        assert!(
            (numeric - grad[i]).abs() < 1e-6 * grad[i].abs().max(1.),
            "{label} index {i}: numeric {numeric} analytic {}",
            grad[i]
        );
    }
}

fn principles() -> Vec<(&'static str, LearningPrinciple)> {
    vec![
        ("ml", LearningPrinciple::MAXIMUM_LIKELIHOOD),
        ("map", LearningPrinciple::MAXIMUM_A_POSTERIORI),
        ("mcl", LearningPrinciple::MAXIMUM_CONDITIONAL_LIKELIHOOD),
        ("msp", LearningPrinciple::MAXIMUM_SUPERVISED_POSTERIOR),
        ("mix", LearningPrinciple::gen_dis_mix(0.3, 0.5, 0.2).unwrap()),
    ]
}

fn none() -> Box<dyn LogPrior> {
    Box::new(NoPrior)
}

fn gaussian() -> Box<dyn LogPrior> {
    Box::new(GaussianPrior::new(3.).unwrap())
}

fn composite() -> Box<dyn LogPrior> {
    Box::new(CompositePrior)
}

type PriorFactory = fn() -> Box<dyn LogPrior>;

fn priors() -> Vec<(&'static str, PriorFactory)> {
    vec![
        ("none", none as PriorFactory),
        ("gaussian", gaussian as PriorFactory),
        ("composite", composite as PriorFactory),
    ]
}

#[test]
fn every_principle_layout_and_prior() {
    let mut rng = seeded_rng();
    let data = random_data(&mut rng, &[5, 4, 6], 3);
    let scores = random_pwms(&mut rng, 3, 3, 4.);

    for (principle_name, principle) in principles() {
        for (prior_name, prior) in priors() {
            for free_params in [false, true] {
                for normalize in [false, true] {
                    let mut function = function(
                        2,
                        scores.clone(),
                        data.clone(),
                        prior(),
                        principle,
                        normalize,
                        free_params,
                    );
                    let params = random_params(&mut rng, function.dimension());
                    let label = format!(
                        "{principle_name}/{prior_name} free={free_params} normalize={normalize}"
                    );

                    assert_gradient_matches(&mut function, &params, &label);
                }
            }
        }
    }
}

#[test]
fn single_class_likelihood() {
    let mut rng = seeded_rng();
    let data = random_data(&mut rng, &[6], 4);
    let scores = random_pwms(&mut rng, 1, 4, 1.);

    for free_params in [false, true] {
        let mut function = function(
            3,
            scores.clone(),
            data.clone(),
            Box::new(CompositePrior),
            LearningPrinciple::MAXIMUM_A_POSTERIORI,
            true,
            free_params,
        );
        let params = random_params(&mut rng, function.dimension());

        assert_gradient_matches(&mut function, &params, &format!("free={free_params}"));
    }
}

#[test]
fn skipped_terms_have_no_gradient() {
    let mut rng = seeded_rng();
    let data = random_data(&mut rng, &[4, 4], 3);
    let scores = random_pwms(&mut rng, 2, 3, 0.);

    let mut function = function(
        2,
        scores,
        data,
        Box::new(GaussianPrior::new(1.).unwrap()),
        LearningPrinciple::MAXIMUM_LIKELIHOOD,
        false,
        false,
    );
    let params = random_params(&mut rng, function.dimension());
    let mut shifted = params.clone();
    shifted[0] += 1.;
    shifted[1] += 1.;

    // The likelihood only depends on the class weights after normalization.
    let a = function.evaluate(&params).unwrap();
    let b = function.evaluate(&shifted).unwrap();
    assert!((a - b).abs() < 1e-9);

    let grad = function.gradient(&params).unwrap();
    assert!((grad[0] + grad[1]).abs() < 1e-9);
}
