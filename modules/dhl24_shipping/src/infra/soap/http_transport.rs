use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use tracing::{instrument, warn};
use url::Url;

use crate::config::Dhl24Config;
use crate::contract::model::CarrierResponse;
use crate::domain::ports::{ShipmentTransport, TransportError};
use crate::infra::soap::envelope::render_envelope;

/// SOAP-over-HTTP adapter implementing the ShipmentTransport port.
pub struct HttpSoapTransport {
    client: reqwest::Client,
    endpoint: Url,
    namespace: String,
}

impl HttpSoapTransport {
    pub fn new(client: reqwest::Client, endpoint: Url, namespace: impl Into<String>) -> Self {
        Self {
            client,
            endpoint,
            namespace: namespace.into(),
        }
    }

    /// Endpoint and namespace taken from the gateway configuration.
    pub fn from_config(client: reqwest::Client, config: &Dhl24Config) -> Self {
        Self::new(client, config.endpoint(), config.soap_namespace.clone())
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl ShipmentTransport for HttpSoapTransport {
    #[instrument(
        name = "dhl24.soap.invoke",
        skip_all,
        fields(endpoint = %self.endpoint, operation = %operation)
    )]
    async fn invoke(
        &self,
        operation: &str,
        payload: serde_json::Value,
    ) -> Result<CarrierResponse, TransportError> {
        let envelope = render_envelope(&self.namespace, operation, &payload);

        let response = self
            .client
            .post(self.endpoint.clone())
            .header(CONTENT_TYPE, "text/xml; charset=utf-8")
            .header("SOAPAction", format!("\"{}#{}\"", self.namespace, operation))
            .body(envelope)
            .send()
            .await
            .map_err(|e| TransportError::Request {
                message: e.to_string(),
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| TransportError::Request {
            message: e.to_string(),
        })?;

        if !status.is_success() {
            warn!(status = status.as_u16(), "Carrier rejected the call");
            return Err(TransportError::Fault {
                status: status.as_u16(),
                body,
            });
        }

        Ok(CarrierResponse {
            status: status.as_u16(),
            body,
        })
    }
}
