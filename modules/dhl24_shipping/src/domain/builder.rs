use chrono::NaiveDateTime;

use crate::config::Dhl24Config;
use crate::contract::model::{Address, Shipment};
use crate::contract::payload::{
    AddressData, AuthData, Billing, CreateShipmentRequest, Party, PieceDefinition,
    ServiceDefinition, Ship, ShipmentFullData, ShipmentInfo, ShipmentTime, COD_SERVICE,
};
use crate::domain::error::DomainError;
use crate::domain::rules;

/// Only domestic shipments are supported.
const COUNTRY: &str = "PL";

/// Maps one (gateway config, shipment) pair onto the `createShipment` request.
pub struct RequestBuilder<'a> {
    config: &'a Dhl24Config,
    shipment: &'a Shipment,
}

impl<'a> RequestBuilder<'a> {
    pub fn new(config: &'a Dhl24Config, shipment: &'a Shipment) -> Self {
        Self { config, shipment }
    }

    /// Assemble the full request; fails before anything is sent.
    pub fn build(&self, now: NaiveDateTime) -> Result<CreateShipmentRequest, DomainError> {
        Ok(CreateShipmentRequest {
            auth_data: self.auth_data(),
            shipment: ShipmentFullData {
                content: self.content(),
                shipment_info: self.shipment_info(now),
                piece_list: self.piece_list()?,
                ship: self.ship()?,
            },
        })
    }

    pub fn auth_data(&self) -> AuthData {
        AuthData {
            username: rules::auth_username(&self.config.login),
            password: self.config.password.clone(),
        }
    }

    pub fn content(&self) -> String {
        rules::content_description(&self.shipment.order.items)
    }

    pub fn shipment_info(&self, now: NaiveDateTime) -> ShipmentInfo {
        let cfg = self.config;
        ShipmentInfo {
            drop_off_type: cfg.drop_off_type,
            service_type: cfg.service_type,
            label_type: cfg.label_type,
            billing: Billing {
                shipping_payment_type: cfg.shipping_payment_type,
                billing_account_number: cfg.billing_account_number.clone(),
                payment_type: cfg.payment_type,
            },
            shipment_time: ShipmentTime {
                shipment_date: rules::resolve_pickup_date(now, cfg.pickup_breaking_hour),
                shipment_start_hour: cfg.shipment_start_hour.clone(),
                shipment_end_hour: cfg.shipment_end_hour.clone(),
            },
            special_services: self.is_cash_on_delivery().then(|| self.special_services()),
        }
    }

    pub fn is_cash_on_delivery(&self) -> bool {
        rules::is_cash_on_delivery(
            &self.shipment.order.payments,
            &self.config.cod_payment_method_code,
        )
    }

    // NOTE: the collection form travels inside the COD entry, following the
    // carrier's ServiceDefinition. Pending product-owner confirmation together
    // with the receiver street.
    fn special_services(&self) -> Vec<ServiceDefinition> {
        vec![ServiceDefinition {
            service_type: COD_SERVICE.to_string(),
            service_value: rules::format_cod_amount(self.shipment.order.total),
            collect_on_delivery_form: self.config.collect_on_delivery_form,
        }]
    }

    pub fn piece_list(&self) -> Result<Vec<PieceDefinition>, DomainError> {
        let weight = rules::validate_weight(self.shipment.shipping_weight)?;
        Ok(vec![PieceDefinition {
            kind: self.config.package_type,
            weight,
            width: self.config.package_width,
            height: self.config.package_height,
            length: self.config.package_length,
            quantity: 1,
        }])
    }

    pub fn ship(&self) -> Result<Ship, DomainError> {
        Ok(Ship {
            shipper: Party {
                address: self.shipper_address(),
            },
            receiver: Party {
                address: receiver_address(&self.shipment.order.shipping_address)?,
            },
        })
    }

    fn shipper_address(&self) -> AddressData {
        let cfg = self.config;
        AddressData {
            country: COUNTRY.to_string(),
            name: cfg.name.clone(),
            postal_code: rules::normalize_postal_code(&cfg.postal_code),
            city: cfg.city.clone(),
            street: cfg.street.clone(),
            house_number: cfg.house_number.clone(),
            phone_number: Some(cfg.phone_number.clone()),
        }
    }
}

// NOTE: `street` carries the city. Kept as the carrier integration has always
// sent it; pending product-owner confirmation before changing.
fn receiver_address(address: &Address) -> Result<AddressData, DomainError> {
    Ok(AddressData {
        country: COUNTRY.to_string(),
        name: address.full_name.clone(),
        postal_code: rules::normalize_postal_code(&address.postcode),
        city: address.city.clone(),
        street: address.city.clone(),
        house_number: rules::extract_house_number(&address.street)?.to_string(),
        phone_number: address.phone_number.clone(),
    })
}
