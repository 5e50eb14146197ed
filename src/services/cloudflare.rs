//! Cloudflare DNS provider client.
//!
//! Thin wrapper over the v4 API's zone DNS record operations: list by name,
//! create, delete by id. Credentials, zone and timeout come from `DnsConfig`
//! at construction; nothing is read from ambient state afterwards.

use async_trait::async_trait;
use serde::Deserialize;

use crate::config::dns::DnsConfig;
use crate::error::{AppError, Result};
use crate::services::provider::{CreateRecordRequest, DnsProvider, ProviderRecord};

// ============================================================================
// Cloudflare API response envelope
// ============================================================================

#[derive(Deserialize)]
struct CfResponse<T> {
    success: bool,
    #[serde(default)]
    errors: Vec<CfApiError>,
    result: Option<T>,
}

#[derive(Deserialize)]
struct CfApiError {
    #[allow(dead_code)]
    code: i64,
    message: String,
}

impl<T> CfResponse<T> {
    fn into_result(self, context: &str) -> Result<T> {
        if !self.success {
            let msg = self
                .errors
                .first()
                .map(|e| e.message.as_str())
                .unwrap_or("unknown error");
            return Err(AppError::Upstream(format!(
                "Cloudflare API error ({}): {}",
                context, msg
            )));
        }
        self.result.ok_or_else(|| {
            AppError::Upstream(format!(
                "Cloudflare API returned no result for: {}",
                context
            ))
        })
    }
}

// ============================================================================
// Client
// ============================================================================

pub struct CloudflareProvider {
    http: reqwest::Client,
    api_base: String,
    api_token: String,
    zone_id: String,
}

impl CloudflareProvider {
    pub fn new(config: &DnsConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            api_base: config.api_base.clone(),
            api_token: config.api_token.clone(),
            zone_id: config.zone_id.clone(),
        })
    }

    fn records_url(&self) -> String {
        format!("{}/zones/{}/dns_records", self.api_base, self.zone_id)
    }

    fn auth_header(&self) -> String {
        format!("Bearer {}", self.api_token)
    }
}

#[async_trait]
impl DnsProvider for CloudflareProvider {
    async fn find_records(&self, fqdn: &str) -> Result<Vec<ProviderRecord>> {
        let url = format!("{}?name={}", self.records_url(), urlencoding::encode(fqdn));
        let resp = self
            .http
            .get(url)
            .header("Authorization", self.auth_header())
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("Cloudflare request failed: {}", e)))?;

        let cf: CfResponse<Vec<ProviderRecord>> = resp
            .json()
            .await
            .map_err(|e| AppError::Upstream(format!("Cloudflare response parse failed: {}", e)))?;

        cf.into_result("list DNS records")
    }

    async fn create_record(&self, req: &CreateRecordRequest) -> Result<ProviderRecord> {
        let resp = self
            .http
            .post(self.records_url())
            .header("Authorization", self.auth_header())
            .json(&serde_json::json!({
                "type": req.record_type.as_str(),
                "name": req.fqdn,
                "content": req.content,
                "ttl": req.ttl,
                "proxied": req.proxied,
            }))
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("Cloudflare request failed: {}", e)))?;

        let cf: CfResponse<ProviderRecord> = resp
            .json()
            .await
            .map_err(|e| AppError::Upstream(format!("Cloudflare response parse failed: {}", e)))?;

        cf.into_result("create DNS record")
    }

    async fn delete_record(&self, record_id: &str) -> Result<()> {
        let resp = self
            .http
            .delete(format!("{}/{}", self.records_url(), record_id))
            .header("Authorization", self.auth_header())
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("Cloudflare request failed: {}", e)))?;

        let cf: CfResponse<serde_json::Value> = resp
            .json()
            .await
            .map_err(|e| AppError::Upstream(format!("Cloudflare response parse failed: {}", e)))?;

        cf.into_result("delete DNS record")?;
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn into_result_success() {
        let resp = CfResponse {
            success: true,
            errors: vec![],
            result: Some(42),
        };
        assert_eq!(resp.into_result("test").unwrap(), 42);
    }

    #[test]
    fn into_result_surfaces_provider_message() {
        let resp: CfResponse<i64> = CfResponse {
            success: false,
            errors: vec![CfApiError {
                code: 81057,
                message: "Record already exists.".to_string(),
            }],
            result: None,
        };
        let err = resp.into_result("create DNS record").unwrap_err();
        assert!(err.to_string().contains("Record already exists."));
        assert!(err.to_string().contains("create DNS record"));
    }

    #[test]
    fn into_result_failure_without_errors() {
        let resp: CfResponse<i64> = CfResponse {
            success: false,
            errors: vec![],
            result: None,
        };
        let err = resp.into_result("test").unwrap_err();
        assert!(err.to_string().contains("unknown error"));
    }

    #[test]
    fn into_result_success_without_result() {
        let resp: CfResponse<i64> = CfResponse {
            success: true,
            errors: vec![],
            result: None,
        };
        assert!(resp.into_result("test").is_err());
    }

    #[test]
    fn envelope_deserializes_record_list() {
        let body = r#"{
            "success": true,
            "errors": [],
            "result": [
                {"id": "cf123", "type": "A", "name": "api.example.com", "content": "1.2.3.4", "ttl": 3600}
            ]
        }"#;
        let cf: CfResponse<Vec<ProviderRecord>> = serde_json::from_str(body).unwrap();
        let records = cf.into_result("list DNS records").unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "cf123");
        assert_eq!(records[0].record_type, "A");
    }
}
