//! Operator configuration for rule evaluation and defuzzification
//!
//! The engine defaults to Zadeh semantics (min/max) with centroid
//! defuzzification; the alternatives here cover the common Mamdani
//! variants without changing the pipeline.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::membership::Degree;

/// Operator combining the branches of a fuzzy AND
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Conjunction {
    /// Zadeh minimum
    #[default]
    Min,
    /// Algebraic product
    Product,
}

impl Conjunction {
    /// Apply the conjunction to two degrees
    pub fn apply(self, a: Degree, b: Degree) -> Degree {
        match self {
            Conjunction::Min => a.and(b),
            Conjunction::Product => a.product(b),
        }
    }
}

impl FromStr for Conjunction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "min" | "minimum" => Ok(Conjunction::Min),
            "product" | "prod" => Ok(Conjunction::Product),
            other => Err(format!("unknown conjunction '{}'", other)),
        }
    }
}

/// Operator combining the branches of a fuzzy OR
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Disjunction {
    /// Zadeh maximum
    #[default]
    Max,
    /// Probabilistic sum `a + b - a*b`
    ProbabilisticSum,
}

impl Disjunction {
    /// Apply the disjunction to two degrees
    pub fn apply(self, a: Degree, b: Degree) -> Degree {
        match self {
            Disjunction::Max => a.or(b),
            Disjunction::ProbabilisticSum => a.probabilistic_sum(b),
        }
    }
}

impl FromStr for Disjunction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "max" | "maximum" => Ok(Disjunction::Max),
            "probabilistic_sum" | "probor" => Ok(Disjunction::ProbabilisticSum),
            other => Err(format!("unknown disjunction '{}'", other)),
        }
    }
}

/// Method converting an aggregated output curve into one crisp value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Defuzzifier {
    /// Center of gravity
    #[default]
    Centroid,
    /// Sample splitting the curve's area in half
    Bisector,
    /// Mean of the samples where the curve is maximal
    MeanOfMaximum,
}

impl Defuzzifier {
    /// Defuzzify an aggregated curve sampled at `samples`.
    ///
    /// Returns `None` when the curve is identically zero; the caller
    /// decides what a fired-nothing output means.
    pub fn defuzzify(self, samples: &[f64], aggregate: &[f64]) -> Option<f64> {
        debug_assert_eq!(samples.len(), aggregate.len());

        match self {
            Defuzzifier::Centroid => {
                let mut numerator = 0.0;
                let mut denominator = 0.0;
                for (y, m) in samples.iter().zip(aggregate) {
                    numerator += y * m;
                    denominator += m;
                }
                if denominator > 0.0 {
                    Some(numerator / denominator)
                } else {
                    None
                }
            }
            Defuzzifier::Bisector => {
                let total: f64 = aggregate.iter().sum();
                if total <= 0.0 {
                    return None;
                }
                let half = total / 2.0;
                let mut cumulative = 0.0;
                for (y, m) in samples.iter().zip(aggregate) {
                    cumulative += m;
                    if cumulative >= half {
                        return Some(*y);
                    }
                }
                samples.last().copied()
            }
            Defuzzifier::MeanOfMaximum => {
                let peak = aggregate.iter().copied().fold(0.0, f64::max);
                if peak <= 0.0 {
                    return None;
                }
                let mut count = 0usize;
                let mut sum = 0.0;
                for (y, m) in samples.iter().zip(aggregate) {
                    if *m == peak {
                        count += 1;
                        sum += y;
                    }
                }
                Some(sum / count as f64)
            }
        }
    }
}

impl FromStr for Defuzzifier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "centroid" | "cog" => Ok(Defuzzifier::Centroid),
            "bisector" | "boa" => Ok(Defuzzifier::Bisector),
            "mean_of_maximum" | "mom" => Ok(Defuzzifier::MeanOfMaximum),
            other => Err(format!("unknown defuzzifier '{}'", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conjunctions() {
        let a = Degree::new(0.6);
        let b = Degree::new(0.4);

        assert_eq!(Conjunction::Min.apply(a, b).value(), 0.4);
        assert!((Conjunction::Product.apply(a, b).value() - 0.24).abs() < 1e-12);
    }

    #[test]
    fn test_disjunctions() {
        let a = Degree::new(0.6);
        let b = Degree::new(0.4);

        assert_eq!(Disjunction::Max.apply(a, b).value(), 0.6);
        assert!((Disjunction::ProbabilisticSum.apply(a, b).value() - 0.76).abs() < 1e-12);
    }

    #[test]
    fn test_centroid_symmetric_triangle() {
        // triangle peaked at 50, sampled on an integer grid
        let samples: Vec<f64> = (0..=100).map(f64::from).collect();
        let aggregate: Vec<f64> = samples
            .iter()
            .map(|&y| {
                if y < 30.0 || y > 70.0 {
                    0.0
                } else if y <= 50.0 {
                    (y - 30.0) / 20.0
                } else {
                    (70.0 - y) / 20.0
                }
            })
            .collect();

        let crisp = Defuzzifier::Centroid.defuzzify(&samples, &aggregate).unwrap();
        assert!((crisp - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_curve_is_none() {
        let samples: Vec<f64> = (0..=10).map(f64::from).collect();
        let zeros = vec![0.0; samples.len()];

        assert_eq!(Defuzzifier::Centroid.defuzzify(&samples, &zeros), None);
        assert_eq!(Defuzzifier::Bisector.defuzzify(&samples, &zeros), None);
        assert_eq!(Defuzzifier::MeanOfMaximum.defuzzify(&samples, &zeros), None);
    }

    #[test]
    fn test_mean_of_maximum_plateau() {
        let samples: Vec<f64> = (0..=10).map(f64::from).collect();
        let mut aggregate = vec![0.0; samples.len()];
        aggregate[4] = 1.0;
        aggregate[5] = 1.0;
        aggregate[6] = 1.0;

        let crisp = Defuzzifier::MeanOfMaximum.defuzzify(&samples, &aggregate).unwrap();
        assert!((crisp - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_bisector_symmetric() {
        let samples: Vec<f64> = (0..=10).map(f64::from).collect();
        let aggregate = vec![1.0; samples.len()];

        let crisp = Defuzzifier::Bisector.defuzzify(&samples, &aggregate).unwrap();
        // cumulative crosses half the area near the middle of the grid
        assert!((4.0..=6.0).contains(&crisp));
    }

    #[test]
    fn test_from_str() {
        assert_eq!("min".parse::<Conjunction>().unwrap(), Conjunction::Min);
        assert_eq!("product".parse::<Conjunction>().unwrap(), Conjunction::Product);
        assert_eq!("max".parse::<Disjunction>().unwrap(), Disjunction::Max);
        assert_eq!(
            "probabilistic_sum".parse::<Disjunction>().unwrap(),
            Disjunction::ProbabilisticSum
        );
        assert_eq!("centroid".parse::<Defuzzifier>().unwrap(), Defuzzifier::Centroid);
        assert!("plurality".parse::<Defuzzifier>().is_err());
    }
}
