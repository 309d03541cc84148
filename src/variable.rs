//! Variables: discrete, categorical, with `k >= 2` states. Continuous variables are a
//! Non-goal (spec §1) so there is no `Domain` enum here, unlike the teacher's
//! `radiate-pgm::Domain { Discrete(usize), Real }` — this crate only ever builds the
//! `Discrete` arm, so the variant is collapsed into a plain `num_states` field.

use crate::error::{FactorFlowError, Result};

/// A single discrete variable: an id-free description consumed by `VariableGroup`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Variable {
    pub name: Option<String>,
    pub num_states: usize,
}

impl Variable {
    pub fn new(num_states: usize) -> Self {
        Self {
            name: None,
            num_states,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

impl From<usize> for Variable {
    fn from(num_states: usize) -> Self {
        Variable::new(num_states)
    }
}

/// A homogeneous batch of variables sharing a cardinality, the unit the external
/// collaborator layer (spec §6) hands to `compile`.
#[derive(Clone, Debug)]
pub struct VariableGroup {
    pub name: String,
    pub variables: Vec<Variable>,
}

impl VariableGroup {
    pub fn new(name: impl Into<String>, variables: Vec<Variable>) -> Result<Self> {
        if variables.is_empty() {
            return Err(FactorFlowError::shape("variable group must be non-empty"));
        }
        if variables.iter().any(|v| v.num_states < 2) {
            return Err(FactorFlowError::shape(
                "every variable must carry k >= 2 states",
            ));
        }
        Ok(Self {
            name: name.into(),
            variables,
        })
    }

    pub fn uniform(name: impl Into<String>, num_states: usize, count: usize) -> Result<Self> {
        Self::new(name, vec![Variable::new(num_states); count])
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}
