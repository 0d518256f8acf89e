pub mod cache;
pub mod hubspot;

pub use cache::{credentials_cache_key, state_cache_key, IntegrationCache};
pub use hubspot::{HubSpotClient, COMPANY_ITEM_TYPE};
