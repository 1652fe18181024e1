use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A shipment of one order, as handed over by the shop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shipment {
    pub order: Order,
    /// Kilograms.
    pub shipping_weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Shop order number, used for log correlation only.
    #[serde(default)]
    pub number: String,
    pub items: Vec<OrderItem>,
    pub shipping_address: Address,
    #[serde(default)]
    pub payments: Vec<Payment>,
    /// Order total in the shop currency (major units).
    pub total: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub product_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    pub method_code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    #[serde(default)]
    pub country_code: String,
    pub postcode: String,
    pub city: String,
    /// "<StreetName> <HouseNumber>"
    pub street: String,
    pub full_name: String,
    #[serde(default)]
    pub phone_number: Option<String>,
}

/// Raw reply of the carrier. Not interpreted here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarrierResponse {
    pub status: u16,
    pub body: String,
}
