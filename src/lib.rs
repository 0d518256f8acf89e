// HubSpot connector library
// Exposes modules for use in tests and binaries

pub mod config;
pub mod models;
pub mod services;
pub mod utils;

// AppState is defined here to be shared
#[derive(Clone)]
pub struct AppState {
    pub settings: config::Settings,
    pub cache: services::IntegrationCache,
    pub hubspot: services::HubSpotClient,
}
