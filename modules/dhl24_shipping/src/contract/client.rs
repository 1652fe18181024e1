use std::sync::Arc;

use async_trait::async_trait;

use crate::config::Dhl24Config;
use crate::contract::{
    error::Dhl24Error,
    model::{CarrierResponse, Shipment},
    payload::CreateShipmentRequest,
};

/// Inbound API: select the gateway and the shipment, then create it at the carrier.
///
/// One instance holds one active (gateway, shipment) pair; callers exporting
/// shipments concurrently use one instance each.
#[async_trait]
pub trait WebClient: Send + Sync {
    fn set_shipping_gateway(&mut self, gateway: Arc<Dhl24Config>);

    fn set_shipment(&mut self, shipment: Shipment);

    /// Build the request without sending it.
    fn preview(&self) -> Result<CreateShipmentRequest, Dhl24Error>;

    /// Build the request and send it as `createShipment`.
    async fn create_shipment(&self) -> Result<CarrierResponse, Dhl24Error>;
}
