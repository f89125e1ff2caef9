// Configuration loading

pub mod settings;

pub use settings::{DatabaseSettings, Settings, SettingsError, SheetSettings};
