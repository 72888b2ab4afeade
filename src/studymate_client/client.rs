use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::config::{Config, Endpoints};
use crate::types::DashboardError;

use super::api::{CountResponse, OnlineStudentsResponse, PingResponse, StatsResponse};
use super::{CountResource, StudyMateApi};

/// HTTP client for the StudyMate study API.
#[derive(Clone)]
pub struct StudyMateClient {
    http: Client,
    config: Config,
}

impl StudyMateClient {
    /// Prepare an HTTP client against the configured base URL.
    pub fn new(config: &Config) -> Result<Self, DashboardError> {
        let http = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(DashboardError::Http)?;

        Ok(Self {
            http,
            config: config.clone(),
        })
    }

    fn endpoints(&self) -> &Endpoints {
        &self.config.endpoints
    }

    async fn get_json<T>(&self, path: &str) -> Result<T, DashboardError>
    where
        T: DeserializeOwned,
    {
        let url = self.config.endpoint_url(path);
        let response = self
            .http
            .get(url)
            .header("Content-Type", "application/json")
            .send()
            .await
            .map_err(DashboardError::Http)?;

        if !response.status().is_success() {
            return Err(DashboardError::Status {
                path: path.to_string(),
                status: response.status().as_u16(),
            });
        }

        response.json::<T>().await.map_err(DashboardError::Http)
    }

    async fn post_json<T>(&self, path: &str) -> Result<T, DashboardError>
    where
        T: DeserializeOwned,
    {
        let url = self.config.endpoint_url(path);
        let response = self
            .http
            .post(url)
            .header("Content-Type", "application/json")
            .send()
            .await
            .map_err(DashboardError::Http)?;

        if !response.status().is_success() {
            return Err(DashboardError::Status {
                path: path.to_string(),
                status: response.status().as_u16(),
            });
        }

        response.json::<T>().await.map_err(DashboardError::Http)
    }
}

#[async_trait]
impl StudyMateApi for StudyMateClient {
    async fn fetch_stats(&self) -> Result<StatsResponse, DashboardError> {
        self.get_json(&self.endpoints().stats).await
    }

    async fn fetch_online_students(&self) -> Result<OnlineStudentsResponse, DashboardError> {
        self.get_json(&self.endpoints().online).await
    }

    async fn fetch_count(&self, resource: CountResource) -> Result<CountResponse, DashboardError> {
        let path = match resource {
            CountResource::Subjects => &self.endpoints().materias,
            CountResource::Notes => &self.endpoints().notes,
        };
        self.get_json(path).await
    }

    async fn ping(&self) -> Result<PingResponse, DashboardError> {
        self.post_json(&self.endpoints().ping).await
    }
}
