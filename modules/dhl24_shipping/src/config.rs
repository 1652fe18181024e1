use anyhow::{bail, Result};
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use url::Url;

/// Namespace of the DHL24 WebAPI v2 service.
pub const DEFAULT_SOAP_NAMESPACE: &str = "https://dhl24.com.pl/webapi2/provider/service.html?ws=1";

/// Shipping gateway configuration for the DHL24 carrier.
///
/// Credentials, billing options and the static shipper profile. Read-only while
/// a request is being built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Dhl24Config {
    /// WSDL address of the carrier service; the SOAP endpoint is derived from it.
    pub wsdl: Url,
    #[serde(default = "default_soap_namespace")]
    pub soap_namespace: String,

    #[serde(deserialize_with = "scalar::text")]
    pub login: String,
    #[serde(deserialize_with = "scalar::text")]
    pub password: String,

    pub drop_off_type: DropOffType,
    pub service_type: ServiceType,
    pub label_type: LabelType,

    pub shipping_payment_type: PaymentParty,
    #[serde(deserialize_with = "scalar::text")]
    pub billing_account_number: String,
    pub payment_type: PaymentForm,

    /// "HH:MM"
    pub shipment_start_hour: String,
    /// "HH:MM"
    pub shipment_end_hour: String,
    /// Orders exported at or after this hour are picked up the next day.
    #[serde(default, deserialize_with = "scalar::opt_number")]
    pub pickup_breaking_hour: Option<u32>,

    pub package_type: PackageType,
    #[serde(deserialize_with = "scalar::number")]
    pub package_width: u32,
    #[serde(deserialize_with = "scalar::number")]
    pub package_height: u32,
    #[serde(deserialize_with = "scalar::number")]
    pub package_length: u32,

    // Shipper profile
    #[serde(deserialize_with = "scalar::text")]
    pub name: String,
    #[serde(deserialize_with = "scalar::text")]
    pub postal_code: String,
    #[serde(deserialize_with = "scalar::text")]
    pub city: String,
    #[serde(deserialize_with = "scalar::text")]
    pub street: String,
    #[serde(deserialize_with = "scalar::text")]
    pub house_number: String,
    #[serde(deserialize_with = "scalar::text")]
    pub phone_number: String,

    /// Orders paid with this payment method are shipped cash on delivery.
    #[serde(deserialize_with = "scalar::text")]
    pub cod_payment_method_code: String,
    pub collect_on_delivery_form: PaymentForm,
}

fn default_soap_namespace() -> String {
    DEFAULT_SOAP_NAMESPACE.to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DropOffType {
    RegularPickup,
    RequestCourier,
}

/// DHL24 product codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ServiceType {
    #[serde(rename = "AH")]
    Domestic,
    #[serde(rename = "09")]
    Domestic09,
    #[serde(rename = "12")]
    Domestic12,
    #[serde(rename = "DW")]
    EveningDelivery,
    #[serde(rename = "SP")]
    ParcelShop,
    #[serde(rename = "EK")]
    Connect,
    #[serde(rename = "PI")]
    International,
    #[serde(rename = "PR")]
    Premium,
    #[serde(rename = "CP")]
    ConnectPlus,
    #[serde(rename = "CM")]
    ConnectPlusPallet,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LabelType {
    #[serde(rename = "LP")]
    Waybill,
    #[serde(rename = "BLP")]
    Blp,
    #[serde(rename = "ZBLP")]
    Zblp,
    #[serde(rename = "ZBLP300")]
    Zblp300,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentParty {
    Shipper,
    Receiver,
    User,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentForm {
    BankTransfer,
    Cash,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PackageType {
    Envelope,
    Package,
    Pallet,
}

impl Dhl24Config {
    /// Range checks serde cannot express.
    pub fn validate(&self) -> Result<()> {
        if self.login.trim().is_empty() {
            bail!("login must not be empty");
        }
        if let Some(hour) = self.pickup_breaking_hour {
            if hour > 23 {
                bail!("pickup_breaking_hour must be within 0..=23, got {}", hour);
            }
        }
        let start = parse_hour("shipment_start_hour", &self.shipment_start_hour)?;
        let end = parse_hour("shipment_end_hour", &self.shipment_end_hour)?;
        if start >= end {
            bail!(
                "shipment_start_hour ({}) must be before shipment_end_hour ({})",
                self.shipment_start_hour,
                self.shipment_end_hour
            );
        }
        for (field, value) in [
            ("package_width", self.package_width),
            ("package_height", self.package_height),
            ("package_length", self.package_length),
        ] {
            if value == 0 {
                bail!("{} must be greater than 0", field);
            }
        }
        if !matches!(self.wsdl.scheme(), "http" | "https") {
            bail!("wsdl must be an http(s) URL, got '{}'", self.wsdl);
        }
        Ok(())
    }

    /// SOAP endpoint: the WSDL address without its query string (`?wsdl`).
    pub fn endpoint(&self) -> Url {
        let mut url = self.wsdl.clone();
        url.set_query(None);
        url.set_fragment(None);
        url
    }
}

fn parse_hour(field: &str, value: &str) -> Result<NaiveTime> {
    match NaiveTime::parse_from_str(value, "%H:%M") {
        Ok(t) => Ok(t),
        Err(_) => bail!("{} must use HH:MM format, got '{}'", field, value),
    }
}

/// Scalars from the module bag. Unquoted YAML turns account and phone numbers
/// into integers; environment overrides arrive as text.
mod scalar {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Scalar {
        Text(String),
        Unsigned(u64),
        Signed(i64),
        Float(f64),
    }

    impl Scalar {
        fn into_text(self) -> String {
            match self {
                Scalar::Text(s) => s,
                Scalar::Unsigned(n) => n.to_string(),
                Scalar::Signed(n) => n.to_string(),
                Scalar::Float(n) => n.to_string(),
            }
        }

        fn into_number<E: Error>(self) -> Result<u32, E> {
            let out_of_range =
                |n: &dyn std::fmt::Display| E::custom(format!("integer {} is out of range", n));
            match self {
                Scalar::Text(s) => s.trim().parse().map_err(|_| {
                    E::custom(format!("expected a non-negative integer, got \"{}\"", s))
                }),
                Scalar::Unsigned(n) => u32::try_from(n).map_err(|_| out_of_range(&n)),
                Scalar::Signed(n) => u32::try_from(n).map_err(|_| out_of_range(&n)),
                Scalar::Float(n) => Err(E::custom(format!("expected an integer, got {}", n))),
            }
        }
    }

    pub fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        Scalar::deserialize(deserializer).map(Scalar::into_text)
    }

    pub fn number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
        Scalar::deserialize(deserializer)?.into_number()
    }

    pub fn opt_number<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<Scalar>::deserialize(deserializer)?
            .map(Scalar::into_number)
            .transpose()
    }
}
