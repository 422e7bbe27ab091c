//! Structured error handling for the inference engine
//!
//! Provides a unified error type with:
//! - Error codes for programmatic handling
//! - Structured, JSON-friendly error values
//! - A setup/request split: setup errors abort engine construction,
//!   request errors are scoped to a single evaluation
//!
//! # Error categories
//!
//! - `InvalidDefinition` - malformed membership functions, universes, rules
//! - `DuplicateVariable` / `DuplicateTerm` - name collisions at setup
//! - `UnknownVariable` / `UnknownTerm` - references to undeclared names
//! - `MissingInput` - a rule references an input with no crisp value
//! - `NoRuleFired` - an output's aggregated curve is identically zero
//! - `InvalidConfig` - configuration file/environment problems

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// Error Codes
// ============================================================================

/// Unique error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Setup errors (1xx) - fatal to engine construction
    /// Malformed definition (control points, universe bounds, rule shape)
    InvalidDefinition = 100,
    /// Variable name already registered
    DuplicateVariable = 101,
    /// Term name already present on a variable
    DuplicateTerm = 102,
    /// Reference to an undeclared variable
    UnknownVariable = 103,
    /// Reference to an undeclared term
    UnknownTerm = 104,
    /// Configuration file or environment problem
    InvalidConfig = 105,

    // Request errors (2xx) - scoped to one evaluation
    /// An input variable referenced by a rule has no crisp value
    MissingInput = 200,
    /// No rule produced any activation for an output variable
    NoRuleFired = 201,
}

impl ErrorCode {
    /// Get the numeric code value
    pub fn code(&self) -> u32 {
        *self as u32
    }

    /// Get a short description of the error code
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::InvalidDefinition => "Invalid definition",
            ErrorCode::DuplicateVariable => "Duplicate variable",
            ErrorCode::DuplicateTerm => "Duplicate term",
            ErrorCode::UnknownVariable => "Unknown variable",
            ErrorCode::UnknownTerm => "Unknown term",
            ErrorCode::InvalidConfig => "Invalid configuration",
            ErrorCode::MissingInput => "Missing input",
            ErrorCode::NoRuleFired => "No rule fired",
        }
    }

    /// Whether this error aborts engine construction
    pub fn is_setup(&self) -> bool {
        self.code() < 200
    }

    /// Whether this error is scoped to a single evaluation request
    pub fn is_request(&self) -> bool {
        !self.is_setup()
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}

// ============================================================================
// Main Error Type
// ============================================================================

/// The main error type for the inference engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FisError {
    /// Error code for programmatic handling
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Additional context fields
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub context: HashMap<String, String>,
    /// Hint for resolving the error
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl FisError {
    /// Create a new error with a code and message
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            context: HashMap::new(),
            hint: None,
        }
    }

    // ========================================================================
    // Factory methods for the error taxonomy
    // ========================================================================

    /// Create an invalid-definition error
    pub fn invalid_definition(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidDefinition, message)
    }

    /// Create a duplicate-variable error
    pub fn duplicate_variable(name: &str) -> Self {
        Self::new(
            ErrorCode::DuplicateVariable,
            format!("variable '{}' is already registered", name),
        )
        .with_context("variable", name)
    }

    /// Create a duplicate-term error
    pub fn duplicate_term(variable: &str, term: &str) -> Self {
        Self::new(
            ErrorCode::DuplicateTerm,
            format!("variable '{}' already has a term '{}'", variable, term),
        )
        .with_context("variable", variable)
        .with_context("term", term)
    }

    /// Create an unknown-variable error
    pub fn unknown_variable(name: &str) -> Self {
        Self::new(
            ErrorCode::UnknownVariable,
            format!("variable '{}' is not declared", name),
        )
        .with_context("variable", name)
    }

    /// Create an unknown-term error
    pub fn unknown_term(variable: &str, term: &str) -> Self {
        Self::new(
            ErrorCode::UnknownTerm,
            format!("variable '{}' has no term '{}'", variable, term),
        )
        .with_context("variable", variable)
        .with_context("term", term)
    }

    /// Create an invalid-config error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidConfig, message)
    }

    /// Create a missing-input error
    pub fn missing_input(variable: &str) -> Self {
        Self::new(
            ErrorCode::MissingInput,
            format!("no crisp value supplied for input variable '{}'", variable),
        )
        .with_context("variable", variable)
    }

    /// Create a no-rule-fired error
    pub fn no_rule_fired(variable: &str) -> Self {
        Self::new(
            ErrorCode::NoRuleFired,
            format!(
                "aggregated output for '{}' is identically zero, nothing to defuzzify",
                variable
            ),
        )
        .with_context("variable", variable)
        .with_hint("add a fallback rule covering the full input space if a default is wanted")
    }

    // ========================================================================
    // Builder methods
    // ========================================================================

    /// Add a context field to the error
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Add a hint for resolving the error
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Whether this error aborts engine construction
    pub fn is_setup_error(&self) -> bool {
        self.code.is_setup()
    }

    /// Whether this error is scoped to a single evaluation request
    pub fn is_request_error(&self) -> bool {
        self.code.is_request()
    }

    /// Convert to JSON string
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| {
            format!(r#"{{"code":{},"message":"{}"}}"#, self.code.code(), self.message)
        })
    }
}

impl fmt::Display for FisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code.code(), self.message)?;

        if let Some(ref hint) = self.hint {
            write!(f, " (hint: {})", hint)?;
        }

        Ok(())
    }
}

impl std::error::Error for FisError {}

/// A Result type using FisError
pub type FisResult<T> = Result<T, FisError>;

// ============================================================================
// Tests
// ============================================================================
