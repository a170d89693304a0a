use std::fmt;

/// A typed atom selection, rendered to the engine's selection language on demand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    All,
    /// A selection previously stored in the scene under this name.
    Named(String),
    Hetatm,
    Chain(String),
    ResidueName(String),
    Not(Box<Selection>),
    And(Box<Selection>, Box<Selection>),
}

impl Selection {
    pub fn named(name: impl Into<String>) -> Self {
        Selection::Named(name.into())
    }

    pub fn chain(id: impl Into<String>) -> Self {
        Selection::Chain(id.into())
    }

    pub fn residue_name(resn: impl Into<String>) -> Self {
        Selection::ResidueName(resn.into())
    }

    pub fn polymer() -> Self {
        Selection::Hetatm.not()
    }

    pub fn solvent() -> Self {
        Selection::residue_name("HOH")
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(self) -> Self {
        Selection::Not(Box::new(self))
    }

    pub fn and(self, other: Selection) -> Self {
        Selection::And(Box::new(self), Box::new(other))
    }

    fn is_atomic(&self) -> bool {
        !matches!(self, Selection::And(..))
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::All => write!(f, "all"),
            Selection::Named(name) => write!(f, "{}", name),
            Selection::Hetatm => write!(f, "hetatm"),
            // Chainless structures report a blank id, which PyMOL only matches quoted.
            Selection::Chain(id) if id.trim().is_empty() => write!(f, "chain ''"),
            Selection::Chain(id) => write!(f, "chain {}", id),
            Selection::ResidueName(resn) => write!(f, "resn {}", resn),
            Selection::Not(inner) if inner.is_atomic() => write!(f, "not {}", inner),
            Selection::Not(inner) => write!(f, "not ({})", inner),
            Selection::And(lhs, rhs) => write!(f, "{} and {}", lhs, rhs),
        }
    }
}
