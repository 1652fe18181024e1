use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::config::Dhl24Config;
use crate::contract::model::{CarrierResponse, Shipment};
use crate::contract::payload::CreateShipmentRequest;
use crate::domain::builder::RequestBuilder;
use crate::domain::error::DomainError;
use crate::domain::ports::{Clock, ShipmentTransport};

/// Remote procedure creating a shipment at the carrier.
pub const CREATE_SHIPMENT: &str = "createShipment";

/// Stateless domain service: builds requests and hands them to the transport.
#[derive(Clone)]
pub struct ShipmentService {
    transport: Arc<dyn ShipmentTransport>,
    clock: Arc<dyn Clock>,
}

impl ShipmentService {
    pub fn new(transport: Arc<dyn ShipmentTransport>, clock: Arc<dyn Clock>) -> Self {
        Self { transport, clock }
    }

    #[instrument(
        name = "dhl24.service.build_request",
        skip_all,
        fields(order = %shipment.order.number)
    )]
    pub fn build_request(
        &self,
        config: &Dhl24Config,
        shipment: &Shipment,
    ) -> Result<CreateShipmentRequest, DomainError> {
        let request = RequestBuilder::new(config, shipment).build(self.clock.now())?;
        debug!(
            shipment_date = %request.shipment.shipment_info.shipment_time.shipment_date,
            cod = request.shipment.shipment_info.special_services.is_some(),
            "Built createShipment request"
        );
        Ok(request)
    }

    #[instrument(
        name = "dhl24.service.create_shipment",
        skip_all,
        fields(order = %shipment.order.number)
    )]
    pub async fn create_shipment(
        &self,
        config: &Dhl24Config,
        shipment: &Shipment,
    ) -> Result<CarrierResponse, DomainError> {
        let request = self.build_request(config, shipment)?;
        let payload =
            serde_json::to_value(&request).map_err(|e| DomainError::encoding(e.to_string()))?;

        info!("Sending shipment to carrier");
        let response = self.transport.invoke(CREATE_SHIPMENT, payload).await?;
        info!(status = response.status, "Carrier accepted createShipment call");
        Ok(response)
    }
}
