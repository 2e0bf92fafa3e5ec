//! CLI command implementations.

pub mod add;
pub mod import;
pub mod price;
pub mod rules;

pub use add::AddCommand;
pub use import::ImportCommand;
pub use price::PriceCommand;
