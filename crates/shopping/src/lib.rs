pub mod aggregation;
pub mod ambiguous;
pub mod categorization;
pub mod command;
pub mod engine;
pub mod error;
pub mod fraction_utils;
pub mod normalize;
pub mod parser;
#[cfg(feature = "full")]
pub mod query;
pub mod store;
pub mod units;

pub use categorization::{Category, categorize};
pub use command::{Command, CreateListInput, GenerateInput};
pub use engine::{
    ConsolidationInput, PartialResolutionWarning, ShoppingListItemDraft, ShoppingListProposal,
    SkipReason, SkipReport, SkipTarget, UnitConflict, generate_shopping_list,
};
pub use error::ValidationError;
pub use normalize::normalize_name;
pub use parser::{ParsedIngredient, parse_ingredient};
#[cfg(feature = "full")]
pub use query::SqliteStore;
pub use store::Store;
