use tracing::{debug, error, info, warn};

pub fn log_request_received(endpoint: &str, method: &str) {
    info!("Request received: {} {}", method, endpoint);
}

pub fn log_request_processed(endpoint: &str, status: u16, duration_ms: u64) {
    info!(
        "Request processed: {} - Status: {} - Duration: {}ms",
        endpoint, status, duration_ms
    );
}

pub fn log_oauth_flow_started(org_id: &str, user_id: &str) {
    info!("OAuth2 flow started for org: {} - user: {}", org_id, user_id);
}

pub fn log_oauth_callback_received() {
    info!("OAuth2 callback received");
}

pub fn log_credentials_stored(org_id: &str, user_id: &str) {
    info!("Credentials cached for org: {} - user: {}", org_id, user_id);
}

pub fn log_hubspot_api_error(endpoint: &str, status: Option<u16>, error: &str) {
    error!(
        "HubSpot API error: {} - Status: {:?} - Error: {}",
        endpoint, status, error
    );
}

pub fn log_config_loaded(env: &str) {
    info!("Configuration loaded successfully for environment: {}", env);
}

pub fn log_server_startup(port: u16) {
    info!("🚀 HubSpot connector server starting on port {}", port);
}

pub fn log_server_ready(port: u16) {
    info!("✅ Server ready and listening on http://0.0.0.0:{}", port);
}

pub fn log_health_check() {
    debug!("Health check requested");
}

pub fn log_info(message: &str) {
    info!("{}", message);
}

pub fn log_error(message: &str) {
    error!("{}", message);
}

pub fn log_warning(message: &str) {
    warn!("{}", message);
}
