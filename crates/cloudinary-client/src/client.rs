//! HTTP client for the Cloudinary upload API.

use crate::config::CloudinaryConfig;
use crate::error::ObjectStoreError;
use crate::signature::api_sign_request;
use crate::store::{ObjectStore, UploadResult};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use std::path::Path;
use tracing::{info, instrument, warn};

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorMessage,
}

#[derive(Debug, Deserialize)]
struct ApiErrorMessage {
    message: String,
}

#[derive(Debug, Deserialize)]
struct DestroyResponse {
    result: String,
}

/// Cloudinary client. Cheap to clone; one instance is shared by every pipeline run.
#[derive(Clone, Debug)]
pub struct CloudinaryClient {
    http: reqwest::Client,
    config: CloudinaryConfig,
}

impl CloudinaryClient {
    pub fn new(config: CloudinaryConfig) -> Result<Self, ObjectStoreError> {
        if config.cloud_name.is_empty() || config.api_key.is_empty() || config.api_secret.is_empty()
        {
            return Err(ObjectStoreError::Config(
                "cloud name, API key and API secret are required".to_string(),
            ));
        }
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &CloudinaryConfig {
        &self.config
    }

    /// Signed parameters for a request: `timestamp` is added, then `api_key` and `signature`.
    fn signed_params(&self, params: &[(&str, &str)]) -> Vec<(String, String)> {
        let timestamp = chrono::Utc::now().timestamp().to_string();
        let mut to_sign: Vec<(&str, &str)> = params.to_vec();
        to_sign.push(("timestamp", &timestamp));
        let signature = api_sign_request(&to_sign, &self.config.api_secret);

        let mut signed: Vec<(String, String)> = to_sign
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        signed.push(("api_key".to_string(), self.config.api_key.clone()));
        signed.push(("signature".to_string(), signature));
        signed
    }

    /// Turns a non-2xx response into [`ObjectStoreError::Api`], keeping Cloudinary's message.
    async fn check_status(response: reqwest::Response) -> Result<String, ObjectStoreError> {
        let status = response.status();
        let body = response.text().await?;
        if status.is_success() {
            return Ok(body);
        }
        let message = serde_json::from_str::<ApiErrorBody>(&body)
            .map(|b| b.error.message)
            .unwrap_or(body);
        Err(ObjectStoreError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl ObjectStore for CloudinaryClient {
    #[instrument(skip(self, local_path))]
    async fn upload(
        &self,
        local_path: &Path,
        folder: &str,
        public_id: &str,
    ) -> Result<UploadResult, ObjectStoreError> {
        let bytes = tokio::fs::read(local_path).await?;
        let file_name = local_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload.jpg".to_string());
        let size = bytes.len();

        let mut form = Form::new().part("file", Part::bytes(bytes).file_name(file_name));
        for (key, value) in self.signed_params(&[("folder", folder), ("public_id", public_id)]) {
            form = form.text(key, value);
        }

        info!(
            cloud_name = %self.config.cloud_name,
            size,
            "Uploading to Cloudinary"
        );

        let response = self
            .http
            .post(self.config.endpoint("upload"))
            .multipart(form)
            .send()
            .await?;
        let body = Self::check_status(response).await?;
        let result: UploadResult = serde_json::from_str(&body)
            .map_err(|e| ObjectStoreError::InvalidResponse(e.to_string()))?;

        match &result.secure_url {
            Some(url) => info!(secure_url = %url, "Uploaded to Cloudinary"),
            None => warn!("Cloudinary response carried no secure_url"),
        }
        Ok(result)
    }

    #[instrument(skip(self))]
    async fn destroy(&self, public_id: &str) -> Result<(), ObjectStoreError> {
        let params = self.signed_params(&[("public_id", public_id)]);
        let response = self
            .http
            .post(self.config.endpoint("destroy"))
            .form(&params)
            .send()
            .await?;
        let body = Self::check_status(response).await?;
        let destroyed: DestroyResponse = serde_json::from_str(&body)
            .map_err(|e| ObjectStoreError::InvalidResponse(e.to_string()))?;

        if destroyed.result == "ok" {
            info!("Destroyed Cloudinary asset");
            Ok(())
        } else {
            Err(ObjectStoreError::DestroyRejected(destroyed.result))
        }
    }
}
