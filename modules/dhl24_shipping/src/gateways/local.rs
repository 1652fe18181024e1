use async_trait::async_trait;
use std::sync::Arc;

use crate::config::Dhl24Config;
use crate::contract::{
    client::WebClient,
    error::Dhl24Error,
    model::{CarrierResponse, Shipment},
    payload::CreateShipmentRequest,
};
use crate::domain::service::ShipmentService;

/// In-process implementation of the WebClient trait that delegates to the domain service
pub struct Dhl24WebClient {
    service: Arc<ShipmentService>,
    gateway: Option<Arc<Dhl24Config>>,
    shipment: Option<Shipment>,
}

impl Dhl24WebClient {
    pub fn new(service: Arc<ShipmentService>) -> Self {
        Self {
            service,
            gateway: None,
            shipment: None,
        }
    }

    fn active(&self) -> Result<(&Dhl24Config, &Shipment), Dhl24Error> {
        let gateway = self
            .gateway
            .as_deref()
            .ok_or_else(|| Dhl24Error::not_configured("shipping gateway"))?;
        let shipment = self
            .shipment
            .as_ref()
            .ok_or_else(|| Dhl24Error::not_configured("shipment"))?;
        Ok((gateway, shipment))
    }
}

#[async_trait]
impl WebClient for Dhl24WebClient {
    fn set_shipping_gateway(&mut self, gateway: Arc<Dhl24Config>) {
        self.gateway = Some(gateway);
    }

    fn set_shipment(&mut self, shipment: Shipment) {
        self.shipment = Some(shipment);
    }

    fn preview(&self) -> Result<CreateShipmentRequest, Dhl24Error> {
        let (gateway, shipment) = self.active()?;
        self.service
            .build_request(gateway, shipment)
            .map_err(Into::into)
    }

    async fn create_shipment(&self) -> Result<CarrierResponse, Dhl24Error> {
        let (gateway, shipment) = self.active()?;
        self.service
            .create_shipment(gateway, shipment)
            .await
            .map_err(Into::into)
    }
}
