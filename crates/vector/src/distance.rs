//! Distance metrics for exact nearest-neighbor search.
//!
//! Every metric returns a distance where **lower is more similar**.

use jurisai_common::JurisError;
use ndarray::ArrayView1;
use serde::{Deserialize, Serialize};

/// Distance metric used by a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DistanceMetric {
    /// Squared Euclidean distance (L2²). Range: \[0, ∞).
    L2,
    /// Cosine distance: `1 - cosine_similarity`. Range: \[0, 2\].
    Cosine,
    /// Inner-product distance: `1 - dot(a, b)`.
    Ip,
}

impl DistanceMetric {
    /// Distance between two vectors of equal length.
    pub fn distance(&self, a: &[f32], b: &[f32]) -> f32 {
        let a = ArrayView1::from(a);
        let b = ArrayView1::from(b);

        match self {
            DistanceMetric::L2 => {
                let diff = &a - &b;
                diff.dot(&diff)
            }
            DistanceMetric::Cosine => {
                let norms = a.dot(&a).sqrt() * b.dot(&b).sqrt();
                if norms == 0.0 {
                    // A zero vector is equally far from everything
                    1.0
                } else {
                    1.0 - a.dot(&b) / norms
                }
            }
            DistanceMetric::Ip => 1.0 - a.dot(&b),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DistanceMetric::L2 => "l2",
            DistanceMetric::Cosine => "cosine",
            DistanceMetric::Ip => "ip",
        }
    }
}

impl Default for DistanceMetric {
    fn default() -> Self {
        Self::L2
    }
}

impl std::str::FromStr for DistanceMetric {
    type Err = JurisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "l2" => Ok(Self::L2),
            "cosine" => Ok(Self::Cosine),
            "ip" => Ok(Self::Ip),
            other => Err(JurisError::config(format!("Unknown distance metric: {}", other))),
        }
    }
}

impl std::fmt::Display for DistanceMetric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
