use reqwest::{Method, RequestBuilder};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;
use url::Url;

use crate::config::SuiteConfig;
use crate::error::ContractError;
use crate::model::{Pet, PetStatus, User};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub operation: &'static str,
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ContractError> {
        serde_json::from_str(&self.body).map_err(|source| ContractError::Decode {
            operation: self.operation,
            source,
            body: self.body.clone(),
        })
    }

    pub fn expect_status(self, expected: u16) -> Result<Self, ContractError> {
        self.expect_one_of(&[expected])
    }

    pub fn expect_one_of(self, expected: &[u16]) -> Result<Self, ContractError> {
        if expected.contains(&self.status) {
            return Ok(self);
        }
        let expected = expected
            .iter()
            .map(u16::to_string)
            .collect::<Vec<_>>()
            .join(" or ");
        Err(ContractError::UnexpectedStatus {
            operation: self.operation,
            expected,
            status: self.status,
            body: self.body,
        })
    }
}

/// Thin client over the pet-store API. One method per remote operation;
/// none of them interpret the status code.
#[derive(Debug, Clone)]
pub struct PetstoreClient {
    http: reqwest::Client,
    base: Url,
    timeout: Duration,
}

impl PetstoreClient {
    pub fn new(cfg: &SuiteConfig) -> Result<Self, ContractError> {
        let http = reqwest::Client::builder()
            .build()
            .map_err(|source| ContractError::Transport {
                operation: "build client",
                source,
            })?;
        Ok(PetstoreClient {
            http,
            base: cfg.base_url()?,
            timeout: cfg.request_timeout(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    pub async fn create_pet(&self, pet: &Pet) -> Result<ApiResponse, ContractError> {
        let url = self.endpoint(&["pet"])?;
        self.send("create pet", self.request(Method::POST, url).json(pet))
            .await
    }

    pub async fn get_pet(&self, id: i64) -> Result<ApiResponse, ContractError> {
        let url = self.endpoint(&["pet", &id.to_string()])?;
        self.send("get pet", self.request(Method::GET, url)).await
    }

    pub async fn update_pet(&self, pet: &Pet) -> Result<ApiResponse, ContractError> {
        let url = self.endpoint(&["pet"])?;
        self.send("update pet", self.request(Method::PUT, url).json(pet))
            .await
    }

    // only the given fields are sent
    pub async fn update_pet_with_form(
        &self,
        id: i64,
        name: Option<&str>,
        status: Option<&PetStatus>,
    ) -> Result<ApiResponse, ContractError> {
        let url = self.endpoint(&["pet", &id.to_string()])?;
        let mut form: Vec<(&str, &str)> = Vec::with_capacity(2);
        if let Some(name) = name {
            form.push(("name", name));
        }
        if let Some(status) = status {
            form.push(("status", status.as_str()));
        }
        self.send(
            "update pet with form",
            self.request(Method::POST, url).form(&form),
        )
        .await
    }

    pub async fn delete_pet(&self, id: i64) -> Result<ApiResponse, ContractError> {
        let url = self.endpoint(&["pet", &id.to_string()])?;
        self.send("delete pet", self.request(Method::DELETE, url))
            .await
    }

    pub async fn find_pets_by_status(
        &self,
        status: &PetStatus,
    ) -> Result<ApiResponse, ContractError> {
        let mut url = self.endpoint(&["pet", "findByStatus"])?;
        url.query_pairs_mut().append_pair("status", status.as_str());
        self.send("find pets by status", self.request(Method::GET, url))
            .await
    }

    pub async fn create_user(&self, user: &User) -> Result<ApiResponse, ContractError> {
        let url = self.endpoint(&["user"])?;
        self.send("create user", self.request(Method::POST, url).json(user))
            .await
    }

    pub async fn get_user(&self, username: &str) -> Result<ApiResponse, ContractError> {
        let url = self.endpoint(&["user", username])?;
        self.send("get user", self.request(Method::GET, url)).await
    }

    pub async fn delete_user(&self, username: &str) -> Result<ApiResponse, ContractError> {
        let url = self.endpoint(&["user", username])?;
        self.send("delete user", self.request(Method::DELETE, url))
            .await
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ContractError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| {
                ContractError::Config(format!("base url {} cannot carry a path", self.base))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        debug!(%method, %url, "sending petstore request");
        self.http.request(method, url).timeout(self.timeout)
    }

    async fn send(
        &self,
        operation: &'static str,
        request: RequestBuilder,
    ) -> Result<ApiResponse, ContractError> {
        let response = request
            .send()
            .await
            .map_err(|source| ContractError::Transport { operation, source })?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|source| ContractError::Transport { operation, source })?;
        debug!(operation, status, "petstore responded");

        Ok(ApiResponse {
            operation,
            status,
            body,
        })
    }
}
