pub mod health;
pub mod integrations;

pub use health::health_check;
pub use integrations::{
    authorize_hubspot, get_hubspot_credentials, load_hubspot_items, oauth2callback_hubspot,
};
