//! Blocking HTTP implementation of the orchestration API.

use super::types::{Run, RunList, RunRequest, ServiceInfo};
use super::OrchestratorApi;
use crate::error::{DashError, Result};
use reqwest::blocking::{Client, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use url::Url;

/// HTTP client for the orchestration API.
#[derive(Debug, Clone)]
pub struct HttpOrchestrator {
    base_url: Url,
    http: Client,
}

impl HttpOrchestrator {
    /// Create a client for `base_url` (e.g. `http://localhost:8000`).
    ///
    /// `timeout` bounds each request, including blocking submissions that
    /// wait for the run to finish server-side.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let http = Client::builder().timeout(timeout).build()?;
        Self::with_client(base_url, http)
    }

    pub fn with_client(base_url: &str, http: Client) -> Result<Self> {
        Ok(Self {
            base_url: normalize_base_url(base_url)?,
            http,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    fn handle_response<T: DeserializeOwned>(response: Response) -> Result<T> {
        let response = Self::check_status(response)?;
        let body = response.text()?;
        Ok(serde_json::from_str(&body)?)
    }

    fn check_status(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response
            .text()
            .unwrap_or_else(|_| "Unknown error".to_string());
        Err(DashError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

/// Parse a base address so that relative joins keep any path prefix.
fn normalize_base_url(base_url: &str) -> Result<Url> {
    let mut url = Url::parse(base_url.trim())?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(DashError::Config(format!(
            "API URL must use http or https, got '{}'",
            url.scheme()
        )));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

impl OrchestratorApi for HttpOrchestrator {
    fn list_runs(&self) -> Result<Vec<Run>> {
        let response = self.http.get(self.url("runs")?).send()?;
        let list: RunList = Self::handle_response(response)?;
        Ok(list.runs)
    }

    fn submit_run(&self, request: &RunRequest) -> Result<Run> {
        let response = self.http.post(self.url("run")?).json(request).send()?;
        Self::handle_response(response)
    }

    fn run_status(&self, run_id: &str) -> Result<Run> {
        let mut url = self.url("status")?;
        url.path_segments_mut()
            .map_err(|_| DashError::Config("API URL cannot be a base".to_string()))?
            .push(run_id);
        let response = self.http.get(url).send()?;
        Self::handle_response(response)
    }

    fn delete_run(&self, run_id: &str) -> Result<()> {
        let mut url = self.url("runs")?;
        url.path_segments_mut()
            .map_err(|_| DashError::Config("API URL cannot be a base".to_string()))?
            .push(run_id);
        let response = self.http.delete(url).send()?;
        Self::check_status(response)?;
        Ok(())
    }

    fn service_info(&self) -> Result<ServiceInfo> {
        let response = self.http.get(self.base_url.clone()).send()?;
        Self::handle_response(response)
    }
}
