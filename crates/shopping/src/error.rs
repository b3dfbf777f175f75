/// Input the consolidation engine refuses to work with.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("family id is required")]
    MissingFamily,

    #[error("family {0} does not exist")]
    UnknownFamily(String),

    #[error("at least one meal id is required")]
    NoMeals,

    #[error("{kind} {id} does not belong to family {family_id}")]
    CrossFamily {
        kind: &'static str,
        id: String,
        family_id: String,
    },
}

impl From<ValidationError> for famplan_shared::Error {
    fn from(value: ValidationError) -> Self {
        Self::User(value.to_string())
    }
}
