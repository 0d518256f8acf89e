//! HTTP handlers for the HubSpot OAuth2 flow and item listing

use axum::extract::{Form, Query, State};
use axum::response::{Html, Json};
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

use hubspot_connector::models::{IntegrationItem, OAuthState};
use hubspot_connector::services::{credentials_cache_key, state_cache_key};
use hubspot_connector::utils::logging::*;
use hubspot_connector::utils::{AppError, AppResult};
use hubspot_connector::AppState;

/// Caller identity carried by the frontend on every integration request
#[derive(Debug, Deserialize)]
pub struct IdentityForm {
    pub user_id: String,
    pub org_id: String,
}

/// Query parameters HubSpot sends to the redirect URI
#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    code: Option<String>,
    state: Option<String>,
    error: Option<String>,
    error_description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CredentialsForm {
    pub credentials: String,
}

// Minimal page returned to the popup window once the flow completes
const CLOSE_WINDOW_PAGE: &str = r#"<html>
    <script>
        window.close();
    </script>
</html>
"#;

/// POST /integrations/hubspot/authorize
///
/// Generates a nonce-bearing state token, caches it under the caller's
/// identity, and returns the HubSpot authorization URL with the encoded
/// state appended. The cache write is the only side effect.
pub async fn authorize_hubspot(
    State(state): State<Arc<AppState>>,
    Form(identity): Form<IdentityForm>,
) -> AppResult<Json<String>> {
    log_request_received("/integrations/hubspot/authorize", "POST");
    log_oauth_flow_started(&identity.org_id, &identity.user_id);

    let oauth_state = OAuthState::new(&identity.user_id, &identity.org_id);
    let encoded = oauth_state.encode()?;

    state
        .cache
        .set(
            &state_cache_key(&identity.org_id, &identity.user_id),
            &encoded,
            state.settings.cache.state_ttl_secs,
        )
        .await;

    Ok(Json(state.hubspot.authorization_url(&encoded)))
}

/// GET /integrations/hubspot/oauth2callback
///
/// Validates the returned state against the cached nonce, exchanges the
/// code for a token, parks the token blob for single-use pickup, and
/// closes the browser popup.
pub async fn oauth2callback_hubspot(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CallbackParams>,
) -> AppResult<Html<&'static str>> {
    log_oauth_callback_received();

    if let Some(error) = params.error {
        let detail = params.error_description.unwrap_or(error);
        log_warning(&format!("OAuth2 callback carried an error: {}", detail));
        return Err(AppError::ValidationError(detail));
    }

    let encoded_state = params
        .state
        .ok_or_else(|| AppError::ValidationError("Missing state parameter.".to_string()))?;
    let returned = OAuthState::decode(&encoded_state)?;

    let state_key = state_cache_key(&returned.org_id, &returned.user_id);
    let saved = state
        .cache
        .get(&state_key)
        .await
        .ok_or_else(|| AppError::ValidationError("State not found in cache.".to_string()))?;
    let saved_state = OAuthState::decode(&saved)?;

    if returned.state != saved_state.state {
        return Err(AppError::ValidationError("State does not match.".to_string()));
    }

    let code = params
        .code
        .ok_or_else(|| AppError::ValidationError("Missing code parameter.".to_string()))?;

    let blob = state.hubspot.exchange_code(&code).await?;

    state.cache.delete(&state_key).await;
    state
        .cache
        .set(
            &credentials_cache_key(&returned.org_id, &returned.user_id),
            &blob.to_string(),
            state.settings.cache.credentials_ttl_secs,
        )
        .await;
    log_credentials_stored(&returned.org_id, &returned.user_id);

    Ok(Html(CLOSE_WINDOW_PAGE))
}

/// POST /integrations/hubspot/credentials
///
/// Hands the parked token blob to the caller and deletes it: the blob is
/// readable at most once after the callback wrote it.
pub async fn get_hubspot_credentials(
    State(state): State<Arc<AppState>>,
    Form(identity): Form<IdentityForm>,
) -> AppResult<Json<Value>> {
    log_request_received("/integrations/hubspot/credentials", "POST");

    let key = credentials_cache_key(&identity.org_id, &identity.user_id);
    let raw = state
        .cache
        .get(&key)
        .await
        .ok_or_else(|| AppError::NotFound("No credentials found.".to_string()))?;

    let credentials: Value = serde_json::from_str(&raw)
        .map_err(|_| AppError::ValidationError("Invalid credentials format.".to_string()))?;

    state.cache.delete(&key).await;

    Ok(Json(credentials))
}

/// POST /integrations/hubspot/load
///
/// Lists CRM company records with the supplied credentials, mapped into
/// the normalized item shape.
pub async fn load_hubspot_items(
    State(state): State<Arc<AppState>>,
    Form(payload): Form<CredentialsForm>,
) -> AppResult<Json<Vec<IntegrationItem>>> {
    log_request_received("/integrations/hubspot/load", "POST");

    let credentials: Value = serde_json::from_str(&payload.credentials)
        .map_err(|_| AppError::ValidationError("Invalid credentials format.".to_string()))?;

    let access_token = credentials
        .get("access_token")
        .and_then(Value::as_str)
        .ok_or_else(|| {
            AppError::ValidationError("Missing access_token in credentials.".to_string())
        })?;

    let items = state.hubspot.list_companies(access_token).await?;

    Ok(Json(items))
}
