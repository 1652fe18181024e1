//! `createShipment` request as the carrier expects it.
//!
//! Field names follow the carrier schema (camelCase). Built fresh for every call.

use chrono::NaiveDate;
use serde::Serialize;

use crate::config::{DropOffType, LabelType, PackageType, PaymentForm, PaymentParty, ServiceType};

const REDACTED: &str = "********";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateShipmentRequest {
    pub auth_data: AuthData,
    pub shipment: ShipmentFullData,
}

impl CreateShipmentRequest {
    /// Copy safe to print or log.
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        copy.auth_data.password = REDACTED.to_string();
        copy
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthData {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipmentFullData {
    pub content: String,
    pub shipment_info: ShipmentInfo,
    pub piece_list: Vec<PieceDefinition>,
    pub ship: Ship,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipmentInfo {
    pub drop_off_type: DropOffType,
    pub service_type: ServiceType,
    pub label_type: LabelType,
    pub billing: Billing,
    pub shipment_time: ShipmentTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special_services: Option<Vec<ServiceDefinition>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Billing {
    pub shipping_payment_type: PaymentParty,
    pub billing_account_number: String,
    pub payment_type: PaymentForm,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipmentTime {
    /// Serialized as YYYY-MM-DD.
    pub shipment_date: NaiveDate,
    pub shipment_start_hour: String,
    pub shipment_end_hour: String,
}

/// Code of the cash-on-delivery special service.
pub const COD_SERVICE: &str = "COD";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDefinition {
    pub service_type: String,
    /// Amount with exactly two decimals, e.g. "149.90".
    pub service_value: String,
    pub collect_on_delivery_form: PaymentForm,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieceDefinition {
    #[serde(rename = "type")]
    pub kind: PackageType,
    pub weight: f64,
    pub width: u32,
    pub height: u32,
    pub length: u32,
    pub quantity: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ship {
    pub shipper: Party,
    pub receiver: Party,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Party {
    pub address: AddressData,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressData {
    pub country: String,
    pub name: String,
    pub postal_code: String,
    pub city: String,
    pub street: String,
    pub house_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
}
