//! Mamdani fuzzy inference engine
//!
//! A small library for building and evaluating Mamdani-style fuzzy
//! inference systems:
//!
//! - Linguistic variables over sampled universes of discourse
//! - Triangular and trapezoidal membership functions, validated at
//!   construction and evaluable at any real input
//! - Rules with AND/OR/NOT antecedent trees and weighted consequents
//! - Min-implication, pointwise-max aggregation, centroid defuzzification
//! - An explicit no-rule-fired state instead of invented defaults
//!
//! The engine is read-only once built; each evaluation owns its own
//! context, so one engine can serve concurrent callers.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::collections::HashMap;
//! use mamdani::{
//!     Consequent, Expr, InferenceEngine, LinguisticVariable, MembershipFunction,
//!     Role, Rule, Universe,
//! };
//!
//! let mut service = LinguisticVariable::new(
//!     "service",
//!     Role::Input,
//!     Universe::new(0.0, 10.0, 0.1)?,
//! );
//! service.add_term("poor", MembershipFunction::triangular(0.0, 0.0, 5.0)?)?;
//! service.add_term("great", MembershipFunction::triangular(5.0, 10.0, 10.0)?)?;
//!
//! let mut tip = LinguisticVariable::new(
//!     "tip",
//!     Role::Output,
//!     Universe::new(0.0, 25.0, 0.5)?,
//! );
//! tip.add_term("small", MembershipFunction::triangular(0.0, 5.0, 10.0)?)?;
//! tip.add_term("generous", MembershipFunction::triangular(15.0, 20.0, 25.0)?)?;
//!
//! let engine = InferenceEngine::builder()
//!     .variable(service)?
//!     .variable(tip)?
//!     .rule(Rule::new(Expr::term("service", "poor"), Consequent::new("tip", "small")))
//!     .rule(Rule::new(Expr::term("service", "great"), Consequent::new("tip", "generous")))
//!     .build()?;
//!
//! let mut inputs = HashMap::new();
//! inputs.insert("service".to_string(), 8.0);
//! let outputs = engine.evaluate(&inputs)?;
//! println!("tip: {:.1}%", outputs.crisp("tip")?);
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod membership;
pub mod ops;
pub mod rule;
pub mod universe;
pub mod variable;

// Re-export configuration types
pub use config::{AppConfig, EngineSection, RiskCategory, ThresholdSection};

// Re-export engine types
pub use engine::{
    EngineBuilder, EngineOptions, EvaluationContext, InferenceEngine, OutputValue, Outputs,
    RuleActivation,
};

// Re-export error types
pub use error::{ErrorCode, FisError, FisResult};

// Re-export membership types
pub use membership::{Degree, MembershipFunction};

// Re-export operator types
pub use ops::{Conjunction, Defuzzifier, Disjunction};

// Re-export rule types
pub use rule::{Consequent, Expr, Rule};

// Re-export variable types
pub use universe::Universe;
pub use variable::{LinguisticVariable, Role};
