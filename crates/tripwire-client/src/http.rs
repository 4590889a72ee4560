use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};
use tripwire_config::{Trigger, TriggerDocument};
use uuid::Uuid;

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::mutation::MutationClient;

/// [`MutationClient`] backed by the trigger REST API.
///
/// | Call | Request |
/// |---|---|
/// | `create` | `POST {base}/organizations/{org_id}/triggers` |
/// | `update` | `PATCH {base}/triggers/{id}` |
/// | `fetch`  | `GET {base}/triggers/{id}` |
pub struct HttpMutationClient {
  client: Client,
  config: ClientConfig,
}

impl HttpMutationClient {
  pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
    let client = Client::builder().timeout(config.timeout()).build()?;
    Ok(Self { client, config })
  }

  pub fn config(&self) -> &ClientConfig {
    &self.config
  }

  /// Load an existing trigger, conditions and actions included.
  #[instrument(skip(self))]
  pub async fn fetch(&self, trigger_id: Uuid) -> Result<Trigger, ClientError> {
    let url = self.config.endpoint(&format!("/triggers/{}", trigger_id));
    let response = self.authorize(self.client.get(&url)).send().await?;
    decode(response).await
  }

  fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
    match &self.config.api_token {
      Some(token) => request.bearer_auth(token),
      None => request,
    }
  }
}

#[async_trait]
impl MutationClient for HttpMutationClient {
  #[instrument(skip(self, document), fields(name = %document.name))]
  async fn create(
    &self,
    organization_id: Uuid,
    document: &TriggerDocument,
  ) -> Result<Trigger, ClientError> {
    let url = self
      .config
      .endpoint(&format!("/organizations/{}/triggers", organization_id));
    debug!(url = %url, "creating trigger");

    let response = self
      .authorize(self.client.post(&url))
      .json(document)
      .send()
      .await?;
    decode(response).await
  }

  #[instrument(skip(self, document), fields(name = %document.name))]
  async fn update(
    &self,
    trigger_id: Uuid,
    document: &TriggerDocument,
  ) -> Result<Trigger, ClientError> {
    let url = self.config.endpoint(&format!("/triggers/{}", trigger_id));
    debug!(url = %url, "updating trigger");

    let response = self
      .authorize(self.client.patch(&url))
      .json(document)
      .send()
      .await?;
    decode(response).await
  }
}

/// Turn a response into `T`, or into [`ClientError::Api`] on a non-2xx status.
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
  let status = response.status();
  let body = response.text().await?;

  if !status.is_success() {
    let message = error_message(&body).unwrap_or_else(|| {
      status
        .canonical_reason()
        .unwrap_or("Request failed")
        .to_string()
    });
    warn!(status = status.as_u16(), message = %message, "trigger api returned an error");
    return Err(ClientError::Api {
      status: status.as_u16(),
      message,
    });
  }

  Ok(serde_json::from_str(&body)?)
}

/// Pull a human readable message out of an error body, if it has one.
fn error_message(body: &str) -> Option<String> {
  let value: serde_json::Value = serde_json::from_str(body).ok()?;
  ["message", "error"]
    .iter()
    .find_map(|key| value.get(*key).and_then(|v| v.as_str()))
    .filter(|message| !message.is_empty())
    .map(str::to_string)
}
