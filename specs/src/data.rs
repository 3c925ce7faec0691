use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// The specification for one class' weighted data.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSpec {
    /// A text file with one sequence per line.
    Local {
        path: PathBuf,
        #[serde(default)]
        weights: Option<Vec<f64>>,
    },
    Inline {
        sequences: Vec<String>,
        #[serde(default)]
        weights: Option<Vec<f64>>,
    },
}

impl DataSpec {
    /// Returns the explicit sequence weights, `None` means every sequence weighs `1`.
    pub fn weights(&self) -> Option<&[f64]> {
        match self {
            DataSpec::Local { weights, .. } | DataSpec::Inline { weights, .. } => {
                weights.as_deref()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inline_without_weights() {
        let json = r#"{ "inline": { "sequences": ["ACGT", "AAAA"] } }"#;
        let spec: DataSpec = serde_json::from_str(json).unwrap();

        let DataSpec::Inline { sequences, .. } = &spec else {
            panic!("expected inline data, got {spec:?}");
        };

        assert_eq!(sequences.len(), 2);
        assert!(spec.weights().is_none());
    }

    #[test]
    fn local_with_weights() {
        let json = r#"{ "local": { "path": "fg.txt", "weights": [1.0, 0.5] } }"#;
        let spec: DataSpec = serde_json::from_str(json).unwrap();

        assert_eq!(spec.weights(), Some(&[1.0, 0.5][..]));
    }
}
