pub mod settings;

pub use settings::{CacheSettings, HubSpotSettings, ServerSettings, Settings};
