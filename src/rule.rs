//! Fuzzy rules: antecedent expression trees and weighted consequents
//!
//! An antecedent is a tree of `Term` leaves combined with AND/OR/NOT; a
//! rule attaches one or more `(output variable, term, weight)` consequents
//! to it. Rules are plain data - evaluation lives with the engine's
//! per-call context.

/// A fuzzy expression over `(variable, term)` leaves
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Membership of a variable's crisp input in one of its terms
    Term { variable: String, term: String },
    /// Fuzzy AND of both branches
    And(Box<Expr>, Box<Expr>),
    /// Fuzzy OR of both branches
    Or(Box<Expr>, Box<Expr>),
    /// Fuzzy complement
    Not(Box<Expr>),
}

impl Expr {
    /// Leaf expression: `variable IS term`
    pub fn term(variable: impl Into<String>, term: impl Into<String>) -> Self {
        Expr::Term {
            variable: variable.into(),
            term: term.into(),
        }
    }

    /// Combine with another expression under fuzzy AND
    pub fn and(self, rhs: Expr) -> Self {
        Expr::And(Box::new(self), Box::new(rhs))
    }

    /// Combine with another expression under fuzzy OR
    pub fn or(self, rhs: Expr) -> Self {
        Expr::Or(Box::new(self), Box::new(rhs))
    }

    /// Fuzzy complement of this expression
    pub fn not(self) -> Self {
        Expr::Not(Box::new(self))
    }

    /// All `(variable, term)` leaves in the tree, left to right
    pub fn leaves(&self) -> Vec<(&str, &str)> {
        fn walk<'e>(expr: &'e Expr, out: &mut Vec<(&'e str, &'e str)>) {
            match expr {
                Expr::Term { variable, term } => out.push((variable, term)),
                Expr::And(left, right) | Expr::Or(left, right) => {
                    walk(left, out);
                    walk(right, out);
                }
                Expr::Not(inner) => walk(inner, out),
            }
        }

        let mut leaves = Vec::new();
        walk(self, &mut leaves);
        leaves
    }
}

/// One `(output variable, output term, weight)` assignment of a rule
#[derive(Debug, Clone, PartialEq)]
pub struct Consequent {
    /// Output variable name
    pub variable: String,
    /// Term of the output variable
    pub term: String,
    /// Scales the firing strength before implication; defaults to 1.0
    pub weight: f64,
}

impl Consequent {
    /// Create a consequent with weight 1.0
    pub fn new(variable: impl Into<String>, term: impl Into<String>) -> Self {
        Self {
            variable: variable.into(),
            term: term.into(),
            weight: 1.0,
        }
    }

    /// Set the weight; negative values are raised to zero
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight.max(0.0);
        self
    }
}

/// A fuzzy rule
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    /// Optional label shown in activation diagnostics
    pub label: Option<String>,
    /// Antecedent expression
    pub antecedent: Expr,
    /// Consequent assignments
    pub consequents: Vec<Consequent>,
    /// Disabled rules are skipped entirely during evaluation
    pub enabled: bool,
}

impl Rule {
    /// Create an enabled rule with a single consequent
    pub fn new(antecedent: Expr, consequent: Consequent) -> Self {
        Self {
            label: None,
            antecedent,
            consequents: vec![consequent],
            enabled: true,
        }
    }

    /// Attach an additional consequent
    pub fn with_consequent(mut self, consequent: Consequent) -> Self {
        self.consequents.push(consequent);
        self
    }

    /// Attach a diagnostic label
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Mark the rule disabled
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}
