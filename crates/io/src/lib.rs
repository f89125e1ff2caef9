// Source adapters

pub mod database;
pub mod sheet;

pub use database::SqliteSource;
pub use sheet::SheetFetcher;
