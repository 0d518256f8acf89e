//! HTTP client for the HubSpot OAuth2 and CRM APIs

use reqwest::Client as HttpClient;
use serde_json::Value;
use std::time::Duration;

use crate::config::HubSpotSettings;
use crate::models::IntegrationItem;
use crate::utils::logging::*;
use crate::utils::{AppError, AppResult};

/// Item-type tag applied to every mapped company record
pub const COMPANY_ITEM_TYPE: &str = "hubspot_company";

/// Client for the HubSpot OAuth2 token endpoint and CRM object API
///
/// # Timeouts
///
/// - Total: 30s
/// - Connect: 5s
#[derive(Debug, Clone)]
pub struct HubSpotClient {
    http_client: HttpClient,
    settings: HubSpotSettings,
}

impl HubSpotClient {
    pub fn new(settings: HubSpotSettings) -> AppResult<Self> {
        let http_client = HttpClient::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(5))
            .build()
            .map_err(|e| AppError::ConfigError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            settings,
        })
    }

    /// Builds the authorization URL the browser is sent to, with the
    /// encoded state appended
    pub fn authorization_url(&self, encoded_state: &str) -> String {
        format!(
            "{}?client_id={}&scope={}&redirect_uri={}&state={}",
            self.settings.authorize_url,
            urlencoding::encode(&self.settings.client_id),
            urlencoding::encode(&self.settings.scopes),
            urlencoding::encode(&self.settings.redirect_uri),
            urlencoding::encode(encoded_state),
        )
    }

    /// Exchanges an authorization code for the provider's token response.
    ///
    /// The response blob is treated as opaque JSON and handed back as-is.
    /// Upstream HTTP failures are forwarded with their original status and
    /// body.
    pub async fn exchange_code(&self, code: &str) -> AppResult<Value> {
        let form = [
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", self.settings.redirect_uri.as_str()),
            ("client_id", self.settings.client_id.as_str()),
            ("client_secret", self.settings.client_secret.as_str()),
        ];

        let response = self
            .http_client
            .post(&self.settings.token_url)
            .header("Accept", "application/json")
            .form(&form)
            .send()
            .await
            .map_err(|e| {
                AppError::HubSpotApi(format!("Failed to reach HubSpot token endpoint: {}", e))
            })?;

        let status = response.status();

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            log_hubspot_api_error("oauth/token", Some(status.as_u16()), &body);
            return Err(AppError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let blob: Value = response.json().await.map_err(|e| {
            AppError::HubSpotApi(format!("Failed to parse token response: {}", e))
        })?;

        Ok(blob)
    }

    /// Fetches every company record, following the collection's paging
    /// protocol: a page that carries a `limit` field asks for another
    /// request with that limit; a page without one ends the listing. An
    /// empty `results` array also terminates, so a provider that always
    /// echoes `limit` cannot loop us forever.
    pub async fn fetch_companies(&self, access_token: &str) -> AppResult<Vec<Value>> {
        let url = format!("{}/crm/v3/objects/companies", self.settings.api_base_url);

        let mut aggregated = Vec::new();
        let mut limit: Option<u64> = None;

        loop {
            let mut request = self.http_client.get(&url).bearer_auth(access_token);
            if let Some(limit) = limit {
                request = request.query(&[("limit", limit)]);
            }

            let response = request.send().await.map_err(|e| {
                AppError::HubSpotApi(format!("Failed to reach HubSpot CRM API: {}", e))
            })?;

            let status = response.status();

            if !status.is_success() {
                let body = response
                    .text()
                    .await
                    .unwrap_or_else(|_| "Unknown error".to_string());
                log_hubspot_api_error(
                    "/crm/v3/objects/companies",
                    Some(status.as_u16()),
                    &body,
                );
                return Err(AppError::HubSpotApi(format!(
                    "Company listing failed [{}]: {}",
                    status, body
                )));
            }

            let page: Value = response.json().await.map_err(|e| {
                AppError::HubSpotApi(format!("Failed to parse company page: {}", e))
            })?;

            let results = page
                .get("results")
                .and_then(Value::as_array)
                .cloned()
                .unwrap_or_default();
            let page_was_empty = results.is_empty();

            aggregated.extend(results);

            limit = page.get("limit").and_then(Value::as_u64);
            if limit.is_none() || page_was_empty {
                break;
            }
        }

        Ok(aggregated)
    }

    /// Lists company records mapped into the normalized item shape
    pub async fn list_companies(&self, access_token: &str) -> AppResult<Vec<IntegrationItem>> {
        let records = self.fetch_companies(access_token).await?;

        let items = records
            .iter()
            .map(|record| IntegrationItem::from_record(record, COMPANY_ITEM_TYPE, None, None))
            .collect::<Vec<_>>();

        log_info(&format!("Listed {} HubSpot companies", items.len()));

        Ok(items)
    }
}
