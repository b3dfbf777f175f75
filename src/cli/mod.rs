mod generate;
mod import;
mod migrate;
mod serve;

pub use generate::generate;
pub use import::{Fixture, import};
pub use migrate::{migrate, reset};
pub use serve::serve;
