// Configuration loading

pub mod keys;
pub mod settings;

pub use keys::{get_tba_key, KeyLookup, KeySource};
pub use settings::Settings;
