//! reqwest-backed gateway to the benchmark backend.

use async_trait::async_trait;
use optbench_core::{
    AlgorithmDescriptor, FitnessFunctionDescriptor, MultiAlgorithmTestRequest, PluginBundle,
    SingleAlgorithmTestRequest,
};
use reqwest::multipart::{Form, Part};
use reqwest::{Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::GatewayConfig;
use crate::error::{GatewayError, GatewayResult};
use crate::gateway::{BackendGateway, RunCommand};

/// HTTP client for the backend's REST API.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    base_url: Url,
    http_client: reqwest::Client,
}

impl HttpGateway {
    pub fn new(config: &GatewayConfig) -> GatewayResult<Self> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| GatewayError::InvalidBaseUrl(format!("{}: {e}", config.base_url)))?;
        if base_url.cannot_be_a_base() {
            return Err(GatewayError::InvalidBaseUrl(config.base_url.clone()));
        }

        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("optbench/", env!("CARGO_PKG_VERSION")))
            .danger_accept_invalid_certs(config.accept_invalid_certs);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(HttpGateway {
            base_url,
            http_client: builder.build()?,
        })
    }

    /// Gateway configured from `OPTBENCH_*` environment variables
    pub fn from_env() -> GatewayResult<Self> {
        Self::new(&GatewayConfig::from_env())
    }

    /// Append percent-encoded path segments to the base URL.
    fn endpoint(&self, segments: &[&str]) -> GatewayResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| GatewayError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> GatewayResult<T> {
        let url = self.endpoint(segments)?;
        debug!(%url, "GET");
        let response = check_status(self.http_client.get(url).send().await?).await?;
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }

    async fn get_text(&self, segments: &[&str]) -> GatewayResult<String> {
        let url = self.endpoint(segments)?;
        debug!(%url, "GET");
        let response = check_status(self.http_client.get(url).send().await?).await?;
        Ok(response.text().await?)
    }

    async fn post_json<B: serde::Serialize + Sync>(
        &self,
        segments: &[&str],
        body: &B,
    ) -> GatewayResult<String> {
        let url = self.endpoint(segments)?;
        debug!(%url, "POST");
        let response = check_status(self.http_client.post(url).json(body).send().await?).await?;
        Ok(response.text().await?)
    }

    async fn delete(&self, segments: &[&str]) -> GatewayResult<()> {
        let url = self.endpoint(segments)?;
        debug!(%url, "DELETE");
        check_status(self.http_client.delete(url).send().await?).await?;
        Ok(())
    }
}

/// Turn any non-2xx response into [`GatewayError::Status`].
async fn check_status(response: Response) -> GatewayResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(GatewayError::Status {
        status: status.as_u16(),
        body,
    })
}

#[async_trait]
impl BackendGateway for HttpGateway {
    async fn algorithms(&self) -> GatewayResult<Vec<AlgorithmDescriptor>> {
        self.get_json(&["algorithms"]).await
    }

    async fn fitness_functions(&self) -> GatewayResult<Vec<FitnessFunctionDescriptor>> {
        self.get_json(&["testfunctions"]).await
    }

    async fn submit_single(&self, request: &SingleAlgorithmTestRequest) -> GatewayResult<String> {
        self.post_json(
            &["calculationprocessor", "onealgorithmmanyfunctions"],
            request,
        )
        .await
    }

    async fn submit_multi(&self, request: &MultiAlgorithmTestRequest) -> GatewayResult<String> {
        self.post_json(
            &["calculationprocessor", "onefunctionmanyalgorithms"],
            request,
        )
        .await
    }

    async fn run_command(&self, command: RunCommand) -> GatewayResult<String> {
        self.get_text(&["calculationprocessor", command.as_str()])
            .await
    }

    async fn reports(&self) -> GatewayResult<Vec<String>> {
        self.get_json(&["report"]).await
    }

    async fn report_archive(&self, name: &str) -> GatewayResult<Vec<u8>> {
        let url = self.endpoint(&["report", name])?;
        debug!(%url, "GET archive");
        let response = check_status(self.http_client.get(url).send().await?).await?;
        Ok(response.bytes().await?.to_vec())
    }

    async fn delete_report(&self, name: &str) -> GatewayResult<()> {
        self.delete(&["report", name]).await
    }

    async fn plugins(&self) -> GatewayResult<Vec<PluginBundle>> {
        self.get_json(&["dllcontroler"]).await
    }

    async fn upload_plugin(&self, file_name: &str, contents: Vec<u8>) -> GatewayResult<()> {
        let url = self.endpoint(&["dllcontroler"])?;
        debug!(%url, file_name, bytes = contents.len(), "POST multipart");
        let part = Part::bytes(contents).file_name(file_name.to_string());
        let form = Form::new().part("file", part);
        let response =
            check_status(self.http_client.post(url).multipart(form).send().await?).await?;

        // Only a plain 200 counts as an accepted upload.
        let status = response.status();
        if status != StatusCode::OK {
            return Err(GatewayError::Status {
                status: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            });
        }
        Ok(())
    }

    async fn delete_plugin(&self, file_name: &str) -> GatewayResult<()> {
        self.delete(&["dllcontroler", file_name]).await
    }
}
