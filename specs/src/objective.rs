use serde::{Deserialize, Serialize};

/// The specification for a class' scoring function.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreSpec {
    Pwm {
        length: usize,
        alphabet_size: usize,
        ess: f64,
    },
    Uniform {
        length: usize,
        alphabet_size: usize,
    },
}

/// The specification for the weights of the composite objective.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrincipleSpec {
    MaximumLikelihood,
    MaximumAPosteriori,
    MaximumConditionalLikelihood,
    MaximumSupervisedPosterior,
    GenDisMix {
        conditional_likelihood: f64,
        likelihood: f64,
        prior: f64,
    },
}

/// The specification for the `LogPrior` trait.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriorSpec {
    #[default]
    None,
    Gaussian {
        variance: f64,
    },
    Composite,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_variants_are_plain_strings() {
        let spec: PrincipleSpec = serde_json::from_str(r#""maximum_likelihood""#).unwrap();
        assert!(matches!(spec, PrincipleSpec::MaximumLikelihood));

        let spec: PriorSpec = serde_json::from_str(r#""composite""#).unwrap();
        assert!(matches!(spec, PriorSpec::Composite));
    }

    #[test]
    fn gen_dis_mix_weights() {
        let json = r#"{ "gen_dis_mix": { "conditional_likelihood": 0.5, "likelihood": 0.25, "prior": 0.25 } }"#;
        let spec: PrincipleSpec = serde_json::from_str(json).unwrap();

        let PrincipleSpec::GenDisMix { likelihood, .. } = spec else {
            panic!("expected gen_dis_mix, got {spec:?}");
        };
        assert_eq!(likelihood, 0.25);
    }

    #[test]
    fn unknown_score_is_rejected() {
        let res = serde_json::from_str::<ScoreSpec>(r#"{ "hmm": { "states": 3 } }"#);
        assert!(res.is_err());
    }
}
