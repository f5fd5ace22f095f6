use good_lp::{Constraint as LpConstraint, Expression, ProblemVariables, Variable, variable, variables};
use log::debug;
use serde::Deserialize;

use crate::error::Result;
use crate::problem::{ConstraintOp, ProblemSpec, Sense};

/// How auxiliary terms enter the objective.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum AuxSign {
    /// `objective - sum(coefficient * s)`: slack is penalized.
    #[default]
    Subtract,
    /// `objective + sum(coefficient * s)`: slack is rewarded.
    Add,
}

impl AuxSign {
    fn factor(self) -> f64 {
        match self {
            AuxSign::Subtract => -1.0,
            AuxSign::Add => 1.0,
        }
    }
}

/// An assembled model, not yet handed to a solver.
pub struct Model {
    pub(crate) variables: ProblemVariables,
    pub(crate) sense: Sense,
    pub(crate) objective: Expression,
    pub(crate) constraints: Vec<LpConstraint>,
    pub(crate) handles: Vec<Variable>,
    pub(crate) names: Vec<String>,
}

impl Model {
    pub fn variable_count(&self) -> usize {
        self.handles.len()
    }

    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }

    /// Variable names in declaration order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn sense(&self) -> Sense {
        self.sense
    }
}

/// Translates a [`ProblemSpec`] into `good_lp` variables, objective and constraints.
#[derive(Debug, Clone, Copy, Default)]
pub struct ModelBuilder {
    aux_sign: AuxSign,
}

impl ModelBuilder {
    pub fn new(aux_sign: AuxSign) -> Self {
        ModelBuilder { aux_sign }
    }

    pub fn build(&self, spec: &ProblemSpec) -> Result<Model> {
        spec.validate()?;

        let (variables, decision, auxiliary) = init_variables(spec);
        let objective = create_objective_function(spec, &decision, &auxiliary, self.aux_sign);

        let mut constraints = create_linear_constraints(spec, &decision);
        constraints.extend(create_demand_equalities(spec, &decision, &auxiliary));

        debug!(
            "built {:?} model with {} variables and {} constraints",
            spec.sense,
            decision.len() + auxiliary.len(),
            constraints.len()
        );

        Ok(Model {
            variables,
            sense: spec.sense,
            objective,
            constraints,
            handles: decision.into_iter().chain(auxiliary).collect(),
            names: spec.names(),
        })
    }
}

fn init_variables(spec: &ProblemSpec) -> (ProblemVariables, Vec<Variable>, Vec<Variable>) {
    let mut problem_vars = variables!();

    let decision = spec
        .variables
        .iter()
        .map(|x| problem_vars.add(variable().min(0).name(x.name.clone())))
        .collect();
    let auxiliary = spec
        .auxiliary
        .iter()
        .map(|s| problem_vars.add(variable().min(0).name(s.name.clone())))
        .collect();

    (problem_vars, decision, auxiliary)
}

fn linear_sum(coefficients: impl IntoIterator<Item = f64>, vars: &[Variable]) -> Expression {
    coefficients
        .into_iter()
        .zip(vars)
        .fold(Expression::from(0.0), |sum, (coefficient, &var)| {
            sum + var * coefficient
        })
}

fn create_objective_function(
    spec: &ProblemSpec,
    decision: &[Variable],
    auxiliary: &[Variable],
    aux_sign: AuxSign,
) -> Expression {
    let decision_terms = linear_sum(spec.variables.iter().map(|x| x.coefficient), decision);
    let aux_terms = linear_sum(
        spec.auxiliary.iter().map(|s| s.coefficient * aux_sign.factor()),
        auxiliary,
    );
    decision_terms + aux_terms
}

fn create_linear_constraints(spec: &ProblemSpec, decision: &[Variable]) -> Vec<LpConstraint> {
    spec.constraints
        .iter()
        .map(|c| {
            let lhs = linear_sum(c.coefficients.iter().copied(), decision);
            match c.operator {
                ConstraintOp::LessOrEqual => lhs.leq(c.rhs),
                ConstraintOp::Equal => lhs.eq(c.rhs),
                ConstraintOp::GreaterOrEqual => lhs.geq(c.rhs),
            }
        })
        .collect()
}

/// `x<i> + s<i> == demand` for every auxiliary that carries a demand.
fn create_demand_equalities(
    spec: &ProblemSpec,
    decision: &[Variable],
    auxiliary: &[Variable],
) -> Vec<LpConstraint> {
    spec.demand_equalities()
        .map(|(i, demand)| (decision[i] + auxiliary[i]).eq(demand))
        .collect()
}
