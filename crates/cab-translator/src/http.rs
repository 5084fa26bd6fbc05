use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::ServiceError;

/// The one network primitive every adapter goes through
#[derive(Clone)]
pub struct HttpClient {
    client: reqwest::Client,
}

impl HttpClient {
    pub fn new(timeout: Duration) -> Result<Self, ServiceError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("cab/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client })
    }

    /// POST a JSON body and decode the JSON reply.
    ///
    /// Send errors and timeouts are `Unreachable`, non-2xx statuses are
    /// `Rejected` with the body kept for diagnosis, and a 2xx body that does
    /// not decode into `T` is `Malformed`.
    pub async fn post_json<B, T>(
        &self,
        url: &str,
        headers: &[(&'static str, String)],
        query: &[(&str, &str)],
        body: &B,
    ) -> Result<T, ServiceError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let mut request = self.client.post(url).query(query).json(body);
        for (name, value) in headers {
            request = request.header(*name, value);
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::debug!("POST {url} rejected: HTTP {status}");
            return Err(ServiceError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes)
            .map_err(|e| ServiceError::Malformed(format!("Failed to parse response: {e}")))
    }
}
