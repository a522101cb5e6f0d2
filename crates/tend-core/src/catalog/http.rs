//! reqwest implementation of [`RoutineApi`].

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use url::Url;

use super::api::RoutineApi;
use crate::{
    config::ApiUrl,
    error::{ErrorBody, Result, TendError},
    models::Routine,
    params::{NewRoutine, StepCompletion},
};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for the routine API rooted at a base URL.
#[derive(Debug, Clone)]
pub struct HttpRoutineApi {
    client: Client,
    base: Url,
}

impl HttpRoutineApi {
    /// Creates a client for the API at `base`.
    pub fn new(base: ApiUrl) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("tend/", env!("CARGO_PKG_VERSION")))
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| TendError::network("Failed to build HTTP client", e))?;

        Ok(Self {
            client,
            base: base.into_url(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    /// Resolves `segments` below the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| TendError::Configuration {
                message: format!("API base URL '{}' cannot carry paths", self.base),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, segments: &[&str]) -> Result<RequestBuilder> {
        let url = self.endpoint(segments)?;
        log::debug!("{method} {url}");
        Ok(self.client.request(method, url))
    }

    async fn send(request: RequestBuilder) -> Result<Response> {
        let response = request
            .send()
            .await
            .map_err(|e| TendError::network("Request to routine API failed", e))?;

        if response.status().is_success() {
            Ok(response)
        } else {
            Err(Self::error_from(response).await)
        }
    }

    async fn read<T: DeserializeOwned>(request: RequestBuilder) -> Result<T> {
        Self::send(request)
            .await?
            .json()
            .await
            .map_err(|e| TendError::network("Failed to decode routine API response", e))
    }

    /// Turns an error response into [`TendError::Api`].
    async fn error_from(response: Response) -> TendError {
        let status = response.status();
        let text = response.text().await.unwrap_or_default();

        match serde_json::from_str::<ErrorBody>(&text) {
            Ok(body) => TendError::Api {
                status: status.as_u16(),
                code: body.error,
                message: body.message,
            },
            Err(_) => TendError::Api {
                status: status.as_u16(),
                code: "http_error".to_string(),
                message: status
                    .canonical_reason()
                    .unwrap_or("Unexpected response")
                    .to_string(),
            },
        }
    }
}

impl RoutineApi for HttpRoutineApi {
    async fn list_routines(&self) -> Result<Vec<Routine>> {
        Self::read(self.request(Method::GET, &["routines"])?).await
    }

    async fn create_routine(&self, routine: &NewRoutine) -> Result<Routine> {
        Self::read(self.request(Method::POST, &["routines"])?.json(routine)).await
    }

    async fn replace_routine(&self, id: &str, routine: &NewRoutine) -> Result<Routine> {
        Self::read(self.request(Method::PUT, &["routines", id])?.json(routine)).await
    }

    async fn delete_routine(&self, id: &str) -> Result<()> {
        Self::send(self.request(Method::DELETE, &["routines", id])?).await?;
        Ok(())
    }

    async fn set_step_completion(
        &self,
        routine_id: &str,
        step_id: &str,
        completed: bool,
    ) -> Result<Routine> {
        let request = self
            .request(Method::PATCH, &["routines", routine_id, "steps", step_id])?
            .json(&StepCompletion { completed });
        Self::read(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(base: &str) -> HttpRoutineApi {
        HttpRoutineApi::new(base.parse().unwrap()).unwrap()
    }

    #[test]
    fn test_endpoint_joins_below_base_path() {
        let api = api("http://localhost:5001/api");
        let url = api.endpoint(&["routines", "r1", "steps", "s1"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:5001/api/routines/r1/steps/s1");
    }

    #[test]
    fn test_endpoint_encodes_segments() {
        let api = api("http://localhost:5001/");
        let url = api.endpoint(&["routines", "a/b c"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:5001/routines/a%2Fb%20c");
    }
}
