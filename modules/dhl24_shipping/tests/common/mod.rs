#![allow(dead_code)]

use std::str::FromStr;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

use dhl24_shipping::config::{
    Dhl24Config, DropOffType, LabelType, PackageType, PaymentForm, PaymentParty, ServiceType,
    DEFAULT_SOAP_NAMESPACE,
};
use dhl24_shipping::contract::model::{Address, CarrierResponse, Order, OrderItem, Payment, Shipment};
use dhl24_shipping::domain::ports::{Clock, ShipmentTransport, TransportError};

pub const COD_METHOD: &str = "cash_on_delivery";

pub fn gateway_config(wsdl: &str) -> Dhl24Config {
    Dhl24Config {
        wsdl: wsdl.parse().unwrap(),
        soap_namespace: DEFAULT_SOAP_NAMESPACE.to_string(),
        login: "shop_api".into(),
        password: "s3cret".into(),
        drop_off_type: DropOffType::RegularPickup,
        service_type: ServiceType::Domestic,
        label_type: LabelType::Blp,
        shipping_payment_type: PaymentParty::Shipper,
        billing_account_number: "6000000".into(),
        payment_type: PaymentForm::BankTransfer,
        shipment_start_hour: "10:00".into(),
        shipment_end_hour: "15:00".into(),
        pickup_breaking_hour: Some(15),
        package_type: PackageType::Package,
        package_width: 20,
        package_height: 10,
        package_length: 30,
        name: "Sklep Sp. z o.o.".into(),
        postal_code: "61-001".into(),
        city: "Poznań".into(),
        street: "Główna".into(),
        house_number: "1".into(),
        phone_number: "600100200".into(),
        cod_payment_method_code: COD_METHOD.into(),
        collect_on_delivery_form: PaymentForm::BankTransfer,
    }
}

pub fn sample_config() -> Dhl24Config {
    gateway_config("https://sandbox.dhl24.com.pl/webapi2?wsdl")
}

/// Weight 1.5, one "Box", paid cash on delivery, total 149.9.
pub fn sample_shipment() -> Shipment {
    Shipment {
        order: Order {
            number: "000000042".into(),
            items: vec![OrderItem {
                product_name: "Box".into(),
            }],
            shipping_address: Address {
                country_code: "PL".into(),
                postcode: "00-950".into(),
                city: "Warsaw".into(),
                street: "Opolska 45".into(),
                full_name: "Jan Kowalski".into(),
                phone_number: Some("123456789".into()),
            },
            payments: vec![Payment {
                method_code: COD_METHOD.into(),
            }],
            total: Decimal::from_str("149.9").unwrap(),
        },
        shipping_weight: 1.5,
    }
}

pub fn at(date: (i32, u32, u32), hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(date.0, date.1, date.2)
        .unwrap()
        .and_hms_opt(hour, minute, 0)
        .unwrap()
}

pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// Records every call and answers with a canned reply.
pub struct RecordingTransport {
    pub calls: Mutex<Vec<(String, serde_json::Value)>>,
    reply: Result<CarrierResponse, TransportError>,
}

impl RecordingTransport {
    pub fn ok(body: &str) -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            reply: Ok(CarrierResponse {
                status: 200,
                body: body.to_string(),
            }),
        })
    }

    pub fn failing(error: TransportError) -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            reply: Err(error),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn last_payload(&self) -> serde_json::Value {
        self.calls.lock().unwrap().last().unwrap().1.clone()
    }
}

#[async_trait]
impl ShipmentTransport for RecordingTransport {
    async fn invoke(
        &self,
        operation: &str,
        payload: serde_json::Value,
    ) -> Result<CarrierResponse, TransportError> {
        self.calls
            .lock()
            .unwrap()
            .push((operation.to_string(), payload));
        self.reply.clone()
    }
}
