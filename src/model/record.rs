use std::fmt;

/// Number of outcome metrics carried by the score node.
pub const OUTCOME_WIDTH: usize = 6;

/// Dataset columns that make up the outcome vector, in feature order.
pub const OUTCOME_COLUMNS: [&str; OUTCOME_WIDTH] = [
    "CSS",
    "Synergy_ZIP",
    "Synergy_Bliss",
    "Synergy_Loewe",
    "Synergy_HSA",
    "Y",
];

/// One dataset row: a drug pair and its measured outcome metrics.
#[derive(Debug, Clone, PartialEq)]
pub struct PairRecord {
    pub row: usize,
    pub drug1: String,
    pub drug2: String,
    pub outcome: Vec<f32>,
}

impl PairRecord {
    pub fn new(
        row: usize,
        drug1: impl Into<String>,
        drug2: impl Into<String>,
        outcome: impl Into<Vec<f32>>,
    ) -> Self {
        Self {
            row,
            drug1: drug1.into(),
            drug2: drug2.into(),
            outcome: outcome.into(),
        }
    }

    pub fn smiles(&self, slot: DrugSlot) -> &str {
        match slot {
            DrugSlot::First => &self.drug1,
            DrugSlot::Second => &self.drug2,
        }
    }
}

/// Which molecule of a pair a value refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrugSlot {
    First,
    Second,
}

impl fmt::Display for DrugSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrugSlot::First => write!(f, "Drug1"),
            DrugSlot::Second => write!(f, "Drug2"),
        }
    }
}
