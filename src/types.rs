use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

pub const VARIABLE_COUNT: usize = 3;

/// The three generative parameters, in report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Variable {
    Money,
    Norm,
    Gasp,
}

impl Variable {
    pub fn index(self) -> usize {
        match self {
            Variable::Money => 0,
            Variable::Norm => 1,
            Variable::Gasp => 2,
        }
    }

    /// Weight used in place of the inferred probability in uniform mode.
    /// The inference step emits 6 money, 5 norm and 4 gasp candidates.
    pub fn uniform_weight(self) -> f64 {
        match self {
            Variable::Money => 1.0 / 6.0,
            Variable::Norm => 1.0 / 5.0,
            Variable::Gasp => 1.0 / 4.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GroundTruth {
    pub money_coefficient: f64,
    pub tipping_norm: i64,
    pub gasp_score: i64,
}

impl GroundTruth {
    pub fn value(&self, variable: Variable) -> f64 {
        match variable {
            Variable::Money => self.money_coefficient,
            Variable::Norm => self.tipping_norm as f64,
            Variable::Gasp => self.gasp_score as f64,
        }
    }
}

/// One line of a posterior block.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub value: f64,
    pub probability: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Posterior {
    pub money: Vec<Candidate>,
    pub norm: Vec<Candidate>,
    pub gasp: Vec<Candidate>,
}

impl Posterior {
    pub fn candidates(&self, variable: Variable) -> &[Candidate] {
        match variable {
            Variable::Money => &self.money,
            Variable::Norm => &self.norm,
            Variable::Gasp => &self.gasp,
        }
    }

    pub(crate) fn candidates_mut(&mut self, variable: Variable) -> &mut Vec<Candidate> {
        match variable {
            Variable::Money => &mut self.money,
            Variable::Norm => &mut self.norm,
            Variable::Gasp => &mut self.gasp,
        }
    }
}
