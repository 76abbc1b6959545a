use thiserror::Error;

/// Lookup failures against a [`crate::ConditionCatalog`].
///
/// These are the only typed errors in the engine; numeric input is always
/// clamped rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("unknown condition '{name}' (available: {available})")]
    UnknownCondition { name: String, available: String },

    #[error("no medication preset for condition '{0}'")]
    NoMedication(String),
}
