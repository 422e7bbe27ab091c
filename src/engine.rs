//! The inference engine: build-time validation and the
//! fuzzify / fire / implicate / aggregate / defuzzify pipeline
//!
//! An engine is assembled once through [`EngineBuilder`] and is read-only
//! afterwards; every `evaluate` call owns its own [`EvaluationContext`],
//! so a shared engine can serve concurrent callers.

use std::collections::HashMap;

use indexmap::IndexMap;
use serde::Serialize;

use crate::error::{FisError, FisResult};
use crate::membership::Degree;
use crate::ops::{Conjunction, Defuzzifier, Disjunction};
use crate::rule::{Expr, Rule};
use crate::variable::{LinguisticVariable, Role};

// ============================================================================
// Options and builder
// ============================================================================

/// Operator configuration for an engine
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EngineOptions {
    /// Fuzzy AND operator
    pub conjunction: Conjunction,
    /// Fuzzy OR operator
    pub disjunction: Disjunction,
    /// Defuzzification method
    pub defuzzifier: Defuzzifier,
}

/// Builder assembling variables and rules into an [`InferenceEngine`].
///
/// Duplicate variable names are rejected as they are added; rules are
/// checked against the declared variables and terms at [`build`](Self::build)
/// time, so a malformed rule base fails at setup rather than on the first
/// request.
#[derive(Debug, Default)]
pub struct EngineBuilder {
    variables: IndexMap<String, LinguisticVariable>,
    rules: Vec<Rule>,
    options: EngineOptions,
}

impl EngineBuilder {
    /// Create an empty builder with default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the operator configuration
    pub fn options(mut self, options: EngineOptions) -> Self {
        self.options = options;
        self
    }

    /// Register a linguistic variable
    pub fn variable(mut self, variable: LinguisticVariable) -> FisResult<Self> {
        if self.variables.contains_key(variable.name()) {
            return Err(FisError::duplicate_variable(variable.name()));
        }
        self.variables.insert(variable.name().to_string(), variable);
        Ok(self)
    }

    /// Append a rule; validated at build time
    pub fn rule(mut self, rule: Rule) -> Self {
        self.rules.push(rule);
        self
    }

    /// Validate the rule base and produce the engine
    pub fn build(self) -> FisResult<InferenceEngine> {
        for rule in &self.rules {
            for (var_name, term_name) in rule.antecedent.leaves() {
                let variable = self
                    .variables
                    .get(var_name)
                    .ok_or_else(|| FisError::unknown_variable(var_name))?;
                if variable.role() != Role::Input {
                    return Err(FisError::invalid_definition(format!(
                        "antecedent references '{}', which is not an input variable",
                        var_name
                    )));
                }
                variable.term(term_name)?;
            }

            if rule.consequents.is_empty() {
                return Err(FisError::invalid_definition("rule has no consequents"));
            }
            for consequent in &rule.consequents {
                let variable = self
                    .variables
                    .get(&consequent.variable)
                    .ok_or_else(|| FisError::unknown_variable(&consequent.variable))?;
                if variable.role() != Role::Output {
                    return Err(FisError::invalid_definition(format!(
                        "consequent targets '{}', which is not an output variable",
                        consequent.variable
                    )));
                }
                variable.term(&consequent.term)?;
            }
        }

        Ok(InferenceEngine {
            variables: self.variables,
            rules: self.rules,
            options: self.options,
        })
    }
}

// ============================================================================
// Evaluation context
// ============================================================================

/// Per-call evaluation state: the crisp inputs plus a memo of term degrees
/// already computed for them.
///
/// A context is created for one request and discarded afterwards; it is
/// never shared between evaluations.
pub struct EvaluationContext<'a> {
    variables: &'a IndexMap<String, LinguisticVariable>,
    inputs: &'a HashMap<String, f64>,
    conjunction: Conjunction,
    disjunction: Disjunction,
    memo: HashMap<(String, String), Degree>,
}

impl<'a> EvaluationContext<'a> {
    fn new(
        variables: &'a IndexMap<String, LinguisticVariable>,
        inputs: &'a HashMap<String, f64>,
        options: EngineOptions,
    ) -> Self {
        Self {
            variables,
            inputs,
            conjunction: options.conjunction,
            disjunction: options.disjunction,
            memo: HashMap::new(),
        }
    }

    /// Membership degree of the named variable's crisp input in `term`,
    /// memoized for the lifetime of this context
    pub fn term_degree(&mut self, variable: &str, term: &str) -> FisResult<Degree> {
        let key = (variable.to_string(), term.to_string());
        if let Some(&degree) = self.memo.get(&key) {
            return Ok(degree);
        }

        let var = self
            .variables
            .get(variable)
            .ok_or_else(|| FisError::unknown_variable(variable))?;
        let crisp = *self
            .inputs
            .get(variable)
            .ok_or_else(|| FisError::missing_input(variable))?;
        let degree = var.term_degree(term, crisp)?;

        self.memo.insert(key, degree);
        Ok(degree)
    }

    /// Evaluate an expression tree against this context.
    ///
    /// Both branches of every connective are always evaluated; there is no
    /// short-circuiting, so missing inputs surface regardless of the other
    /// branch's degree.
    pub fn evaluate(&mut self, expr: &Expr) -> FisResult<Degree> {
        match expr {
            Expr::Term { variable, term } => self.term_degree(variable, term),
            Expr::And(left, right) => {
                let l = self.evaluate(left)?;
                let r = self.evaluate(right)?;
                Ok(self.conjunction.apply(l, r))
            }
            Expr::Or(left, right) => {
                let l = self.evaluate(left)?;
                let r = self.evaluate(right)?;
                Ok(self.disjunction.apply(l, r))
            }
            Expr::Not(inner) => Ok(self.evaluate(inner)?.not()),
        }
    }
}

// ============================================================================
// Outputs
// ============================================================================

/// Firing strength of one enabled rule, recorded in rule order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RuleActivation {
    /// Position of the rule in the engine's rule list
    pub index: usize,
    /// The rule's diagnostic label, if any
    pub label: Option<String>,
    /// Antecedent truth degree for this request
    pub strength: f64,
}

/// Resolution of one output variable
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "status", content = "value", rename_all = "snake_case")]
pub enum OutputValue {
    /// Defuzzified crisp value
    Crisp(f64),
    /// Every contribution to this output was zero; there is nothing to
    /// defuzzify and no default is invented
    NoRuleFired,
}

/// Result of one evaluation request
#[derive(Debug, Clone, Serialize)]
pub struct Outputs {
    values: IndexMap<String, OutputValue>,
    activations: Vec<RuleActivation>,
}

impl Outputs {
    /// Resolution of the named output; `None` if no rule references it
    pub fn value(&self, variable: &str) -> Option<&OutputValue> {
        self.values.get(variable)
    }

    /// Crisp value of the named output, or an error for an unreferenced
    /// output (`UnknownVariable`) or a zero aggregate (`NoRuleFired`)
    pub fn crisp(&self, variable: &str) -> FisResult<f64> {
        match self.values.get(variable) {
            Some(OutputValue::Crisp(value)) => Ok(*value),
            Some(OutputValue::NoRuleFired) => Err(FisError::no_rule_fired(variable)),
            None => Err(FisError::unknown_variable(variable)
                .with_hint("no rule in the engine targets this output")),
        }
    }

    /// Iterate over `(output variable, resolution)` pairs in rule-base order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &OutputValue)> {
        self.values.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Firing strengths of every enabled rule, in rule order
    pub fn activations(&self) -> &[RuleActivation] {
        &self.activations
    }

    /// Number of resolved output variables
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no output variable was referenced by any rule
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

// ============================================================================
// Engine
// ============================================================================

/// A validated, immutable fuzzy inference engine.
///
/// Holds the linguistic variables and the ordered rule base; evaluation
/// allocates per-call state only, so `&InferenceEngine` can be shared
/// across threads.
#[derive(Debug)]
pub struct InferenceEngine {
    variables: IndexMap<String, LinguisticVariable>,
    rules: Vec<Rule>,
    options: EngineOptions,
}

impl InferenceEngine {
    /// Start building an engine
    pub fn builder() -> EngineBuilder {
        EngineBuilder::new()
    }

    /// Look up a declared variable
    pub fn variable(&self, name: &str) -> FisResult<&LinguisticVariable> {
        self.variables
            .get(name)
            .ok_or_else(|| FisError::unknown_variable(name))
    }

    /// Declared variables in registration order
    pub fn variables(&self) -> impl Iterator<Item = &LinguisticVariable> {
        self.variables.values()
    }

    /// The ordered rule base
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Operator configuration
    pub fn options(&self) -> EngineOptions {
        self.options
    }

    /// Create a fresh evaluation context for one request
    pub fn context<'a>(&'a self, inputs: &'a HashMap<String, f64>) -> EvaluationContext<'a> {
        EvaluationContext::new(&self.variables, inputs, self.options)
    }

    /// Evaluate crisp inputs into crisp outputs.
    ///
    /// Every enabled rule is fired (zero-strength rules included, for
    /// auditability), consequent terms are clipped at
    /// `min(strength * weight, 1)`, contributions per output variable are
    /// combined by pointwise maximum over the output universe, and each
    /// aggregate is defuzzified. An output whose aggregate is identically
    /// zero resolves to [`OutputValue::NoRuleFired`]; outputs referenced by
    /// no rule are absent from the result.
    pub fn evaluate(&self, inputs: &HashMap<String, f64>) -> FisResult<Outputs> {
        let mut ctx = self.context(inputs);
        let mut activations = Vec::with_capacity(self.rules.len());
        let mut aggregates: IndexMap<String, Vec<f64>> = IndexMap::new();

        for (index, rule) in self.rules.iter().enumerate() {
            if !rule.enabled {
                continue;
            }

            let strength = ctx.evaluate(&rule.antecedent)?;
            activations.push(RuleActivation {
                index,
                label: rule.label.clone(),
                strength: strength.value(),
            });

            for consequent in &rule.consequents {
                let variable = self
                    .variables
                    .get(&consequent.variable)
                    .ok_or_else(|| FisError::unknown_variable(&consequent.variable))?;
                let membership = variable.term(&consequent.term)?;
                let level = (strength.value() * consequent.weight).min(1.0);

                let samples = variable.universe().samples();
                let aggregate = aggregates
                    .entry(consequent.variable.clone())
                    .or_insert_with(|| vec![0.0; samples.len()]);

                for (slot, &y) in aggregate.iter_mut().zip(samples) {
                    let clipped = level.min(membership.evaluate(y).value());
                    if clipped > *slot {
                        *slot = clipped;
                    }
                }
            }
        }

        let mut values = IndexMap::with_capacity(aggregates.len());
        for (name, aggregate) in &aggregates {
            let variable = self
                .variables
                .get(name)
                .ok_or_else(|| FisError::unknown_variable(name))?;
            let resolved = match self
                .options
                .defuzzifier
                .defuzzify(variable.universe().samples(), aggregate)
            {
                Some(crisp) => OutputValue::Crisp(crisp),
                None => OutputValue::NoRuleFired,
            };
            values.insert(name.clone(), resolved);
        }

        Ok(Outputs { values, activations })
    }
}

// ============================================================================
// Tests
// ============================================================================
