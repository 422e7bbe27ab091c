//! Linguistic variables and their term registries

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{FisError, FisResult};
use crate::membership::{Degree, MembershipFunction};
use crate::universe::Universe;

/// Whether a variable is read from the request or produced by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Input,
    Output,
}

/// A named variable owning a universe and a set of named terms.
///
/// Terms are kept in insertion order so diagnostics and fuzzification
/// results are reproducible. Inserting a term under an existing name is an
/// error, never a silent overwrite. Lookups do not clamp the crisp value
/// to the universe; membership functions are total over the reals and
/// range-checking raw inputs is the caller's concern.
#[derive(Debug, Clone)]
pub struct LinguisticVariable {
    name: String,
    role: Role,
    universe: Universe,
    terms: IndexMap<String, MembershipFunction>,
}

impl LinguisticVariable {
    /// Create a variable with no terms yet
    pub fn new(name: impl Into<String>, role: Role, universe: Universe) -> Self {
        Self {
            name: name.into(),
            role,
            universe,
            terms: IndexMap::new(),
        }
    }

    /// Variable name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Input or output role
    pub fn role(&self) -> Role {
        self.role
    }

    /// The universe this variable and its terms range over
    pub fn universe(&self) -> &Universe {
        &self.universe
    }

    /// Register a term; fails if the name is already present
    pub fn add_term(
        &mut self,
        name: impl Into<String>,
        membership: MembershipFunction,
    ) -> FisResult<()> {
        let term_name = name.into();
        if self.terms.contains_key(&term_name) {
            return Err(FisError::duplicate_term(&self.name, &term_name));
        }
        self.terms.insert(term_name, membership);
        Ok(())
    }

    /// Look up a term's membership function
    pub fn term(&self, name: &str) -> FisResult<&MembershipFunction> {
        self.terms
            .get(name)
            .ok_or_else(|| FisError::unknown_term(&self.name, name))
    }

    /// Whether a term with this name exists
    pub fn has_term(&self, name: &str) -> bool {
        self.terms.contains_key(name)
    }

    /// Membership degree of `crisp_value` in the named term
    pub fn term_degree(&self, term_name: &str, crisp_value: f64) -> FisResult<Degree> {
        Ok(self.term(term_name)?.evaluate(crisp_value))
    }

    /// Membership of a crisp value in every term, in insertion order
    pub fn fuzzify(&self, crisp_value: f64) -> IndexMap<String, Degree> {
        self.terms
            .iter()
            .map(|(name, mf)| (name.clone(), mf.evaluate(crisp_value)))
            .collect()
    }

    /// Term names in insertion order
    pub fn term_names(&self) -> impl Iterator<Item = &str> {
        self.terms.keys().map(String::as_str)
    }

    /// Number of registered terms
    pub fn term_count(&self) -> usize {
        self.terms.len()
    }
}
