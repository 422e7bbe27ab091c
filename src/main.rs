//! Credit-risk assessment demo
//!
//! Command-line front end for the inference engine: builds the
//! credit-risk rule base, shapes the raw inputs the way the engine
//! expects them, and renders the crisp risk score as a category.

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;

use mamdani::{
    AppConfig, Consequent, EngineOptions, ErrorCode, Expr, FisResult, InferenceEngine,
    LinguisticVariable, MembershipFunction, Role, Rule, Universe,
};

#[derive(Parser)]
#[command(name = "mamdani")]
#[command(version = "0.1.0")]
#[command(about = "Fuzzy credit-risk assessment", long_about = None)]
struct Cli {
    /// Credit history score, 0 (worst) to 10 (best)
    #[arg(long)]
    history: f64,

    /// Monthly income, 0 to 10000
    #[arg(long)]
    income: f64,

    /// Outstanding debt, absolute amount in the same currency as income
    #[arg(long)]
    debt: f64,

    /// Applicant age; adds the age variable and its rules to the rule base
    #[arg(long)]
    age: Option<f64>,

    /// Append a weak catch-all rule so some risk score is always produced
    #[arg(long)]
    fallback: bool,

    /// Configuration file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// Print rule activations
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = AppConfig::load(cli.config.as_deref()).context("loading configuration")?;

    if !(0.0..=10.0).contains(&cli.history) {
        bail!("credit history must be within 0 to 10, got {}", cli.history);
    }
    if !(cli.income > 0.0 && cli.income <= 10_000.0) {
        bail!("monthly income must be within 0 (exclusive) to 10000, got {}", cli.income);
    }
    if cli.debt < 0.0 {
        bail!("debt cannot be negative, got {}", cli.debt);
    }
    if let Some(age) = cli.age {
        if !(18.0..=100.0).contains(&age) {
            bail!("age must be within 18 to 100, got {}", age);
        }
    }

    let debt_ratio = shape_debt_ratio(cli.debt, cli.income);

    let engine = build_engine(config.engine_options(), cli.age.is_some(), cli.fallback)
        .context("building the credit-risk engine")?;

    let mut inputs = HashMap::new();
    inputs.insert("credit_history".to_string(), cli.history);
    inputs.insert("monthly_income".to_string(), cli.income);
    inputs.insert("debt_ratio".to_string(), debt_ratio);
    if let Some(age) = cli.age {
        inputs.insert("age".to_string(), age);
    }

    let outputs = engine.evaluate(&inputs).context("evaluating the rule base")?;

    if cli.verbose {
        eprintln!("debt ratio: {:.1}% of income", debt_ratio);
        for activation in outputs.activations() {
            let label = activation.label.as_deref().unwrap_or("unlabeled");
            eprintln!("rule {:>2} ({}): strength {:.3}", activation.index, label, activation.strength);
        }
    }

    let score = match outputs.crisp("risk") {
        Ok(score) => score,
        Err(err) if err.code == ErrorCode::NoRuleFired => {
            bail!("{}; re-run with --fallback to always produce a score", err);
        }
        Err(err) => return Err(err.into()),
    };
    let category = config.thresholds.categorize(score);

    if cli.json {
        let result = serde_json::json!({
            "risk": score,
            "category": category.to_string(),
            "debt_ratio": debt_ratio,
            "activations": outputs.activations(),
        });
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("risk score: {:.2}", score);
        println!("category:   {}", category);
    }

    Ok(())
}

/// Debt as a percentage of income, clamped to the declared universe.
///
/// The engine never clamps inputs; shaping the raw amounts into the
/// variable's domain happens here, before the request.
fn shape_debt_ratio(debt: f64, income: f64) -> f64 {
    (debt / income * 100.0).clamp(0.0, 100.0)
}

/// Build the credit-risk rule base.
///
/// The variable set and rule set are data: the optional age variable and
/// the catch-all fallback rule are setup-time additions, not separate
/// code paths.
fn build_engine(options: EngineOptions, with_age: bool, with_fallback: bool) -> FisResult<InferenceEngine> {
    let tri = MembershipFunction::triangular;
    let trap = MembershipFunction::trapezoidal;

    let mut credit = LinguisticVariable::new(
        "credit_history",
        Role::Input,
        Universe::new(0.0, 10.0, 1.0)?,
    );
    credit.add_term("poor", trap(0.0, 0.0, 2.0, 4.0)?)?;
    credit.add_term("fair", tri(3.0, 5.0, 7.0)?)?;
    credit.add_term("good", tri(6.0, 8.0, 10.0)?)?;
    credit.add_term("excellent", trap(8.0, 9.0, 10.0, 10.0)?)?;

    let mut income = LinguisticVariable::new(
        "monthly_income",
        Role::Input,
        Universe::new(0.0, 10_000.0, 1.0)?,
    );
    income.add_term("low", trap(0.0, 0.0, 2000.0, 4000.0)?)?;
    income.add_term("medium", tri(3000.0, 5000.0, 7000.0)?)?;
    income.add_term("high", trap(6000.0, 8000.0, 10_000.0, 10_000.0)?)?;

    let mut debt = LinguisticVariable::new(
        "debt_ratio",
        Role::Input,
        Universe::new(0.0, 100.0, 1.0)?,
    );
    debt.add_term("low", trap(0.0, 0.0, 20.0, 40.0)?)?;
    debt.add_term("moderate", tri(30.0, 50.0, 70.0)?)?;
    debt.add_term("high", trap(60.0, 80.0, 100.0, 100.0)?)?;

    let mut risk = LinguisticVariable::new(
        "risk",
        Role::Output,
        Universe::new(0.0, 100.0, 1.0)?,
    );
    risk.add_term("low", trap(0.0, 0.0, 20.0, 40.0)?)?;
    risk.add_term("moderate", tri(30.0, 50.0, 70.0)?)?;
    risk.add_term("high", trap(60.0, 80.0, 100.0, 100.0)?)?;

    let mut builder = InferenceEngine::builder()
        .options(options)
        .variable(credit)?
        .variable(income)?
        .variable(debt)?
        .variable(risk)?
        .rule(
            Rule::new(
                Expr::term("credit_history", "excellent").and(Expr::term("debt_ratio", "low")),
                Consequent::new("risk", "low"),
            )
            .with_label("excellent-history"),
        )
        .rule(
            Rule::new(
                Expr::term("credit_history", "poor").and(Expr::term("debt_ratio", "high")),
                Consequent::new("risk", "high"),
            )
            .with_label("poor-history"),
        )
        .rule(
            Rule::new(
                Expr::term("credit_history", "good")
                    .and(Expr::term("monthly_income", "medium"))
                    .and(Expr::term("debt_ratio", "moderate")),
                Consequent::new("risk", "moderate"),
            )
            .with_label("good-history"),
        )
        .rule(
            Rule::new(
                Expr::term("credit_history", "fair").and(Expr::term("debt_ratio", "moderate")),
                Consequent::new("risk", "moderate"),
            )
            .with_label("fair-history"),
        );

    if with_age {
        let mut age = LinguisticVariable::new(
            "age",
            Role::Input,
            Universe::new(18.0, 100.0, 1.0)?,
        );
        age.add_term("young", trap(18.0, 18.0, 25.0, 35.0)?)?;
        age.add_term("middle", tri(30.0, 45.0, 60.0)?)?;
        age.add_term("senior", trap(55.0, 65.0, 100.0, 100.0)?)?;

        builder = builder
            .variable(age)?
            .rule(
                Rule::new(
                    Expr::term("age", "young").and(Expr::term("debt_ratio", "high")),
                    Consequent::new("risk", "high"),
                )
                .with_label("young-indebted"),
            )
            .rule(
                Rule::new(
                    Expr::term("age", "senior").and(Expr::term("credit_history", "poor")),
                    Consequent::new("risk", "high"),
                )
                .with_label("senior-poor-history"),
            );
    }

    if with_fallback {
        builder = builder.rule(
            Rule::new(
                Expr::term("credit_history", "excellent")
                    .or(Expr::term("credit_history", "good"))
                    .not()
                    .or(Expr::term("debt_ratio", "high")),
                Consequent::new("risk", "moderate").with_weight(0.2),
            )
            .with_label("fallback"),
        );
    }

    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use mamdani::ThresholdSection;

    #[test]
    fn test_base_engine_shape() {
        let engine = build_engine(EngineOptions::default(), false, false).unwrap();
        assert_eq!(engine.rules().len(), 4);
        assert_eq!(engine.variables().count(), 4);
    }

    #[test]
    fn test_extended_engine_shape() {
        let engine = build_engine(EngineOptions::default(), true, true).unwrap();
        assert_eq!(engine.rules().len(), 7);
        assert_eq!(engine.variables().count(), 5);
    }

    #[test]
    fn test_default_scenario_is_moderate() {
        // the original script's example: history 6, income 5000, debt 50%
        let engine = build_engine(EngineOptions::default(), false, false).unwrap();
        let mut inputs = HashMap::new();
        inputs.insert("credit_history".to_string(), 6.0);
        inputs.insert("monthly_income".to_string(), 5000.0);
        inputs.insert("debt_ratio".to_string(), 50.0);

        let outputs = engine.evaluate(&inputs).unwrap();
        let score = outputs.crisp("risk").unwrap();
        let category = ThresholdSection::default().categorize(score);

        assert_eq!(category.to_string(), "Moderate");
    }

    #[test]
    fn test_fallback_always_produces_a_score() {
        // inputs that fire none of the four base rules
        let mut inputs = HashMap::new();
        inputs.insert("credit_history".to_string(), 5.0);
        inputs.insert("monthly_income".to_string(), 5000.0);
        inputs.insert("debt_ratio".to_string(), 10.0);

        let bare = build_engine(EngineOptions::default(), false, false).unwrap();
        assert!(bare.evaluate(&inputs).unwrap().crisp("risk").is_err());

        let with_fallback = build_engine(EngineOptions::default(), false, true).unwrap();
        assert!(with_fallback.evaluate(&inputs).unwrap().crisp("risk").is_ok());
    }

    #[test]
    fn test_age_rules_raise_risk_for_young_debtors() {
        let engine = build_engine(EngineOptions::default(), true, false).unwrap();
        let mut inputs = HashMap::new();
        inputs.insert("credit_history".to_string(), 5.0);
        inputs.insert("monthly_income".to_string(), 5000.0);
        inputs.insert("debt_ratio".to_string(), 95.0);
        inputs.insert("age".to_string(), 22.0);

        let outputs = engine.evaluate(&inputs).unwrap();
        let score = outputs.crisp("risk").unwrap();

        assert!(score >= 60.0, "score = {}", score);
    }

    #[test]
    fn test_shape_debt_ratio() {
        assert_eq!(shape_debt_ratio(2500.0, 5000.0), 50.0);
        assert_eq!(shape_debt_ratio(0.0, 5000.0), 0.0);
        // more debt than income clamps to the top of the universe
        assert_eq!(shape_debt_ratio(20_000.0, 5000.0), 100.0);
    }
}
