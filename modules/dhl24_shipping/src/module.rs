use std::sync::Arc;

use anyhow::Context;
use runtime::AppConfig;
use tracing::{debug, info};

use crate::config::Dhl24Config;
use crate::contract::client::WebClient;
use crate::domain::ports::{Clock, ShipmentTransport, SystemClock};
use crate::domain::service::ShipmentService;
use crate::gateways::local::Dhl24WebClient;
use crate::infra::soap::HttpSoapTransport;

/// Key of this module's section under `modules` in the app config.
pub const MODULE_NAME: &str = "dhl24";

/// Wired module: validated gateway config plus the domain service.
#[derive(Clone)]
pub struct Dhl24Shipping {
    config: Arc<Dhl24Config>,
    service: Arc<ShipmentService>,
}

impl Dhl24Shipping {
    /// Load `modules.dhl24` and wire the HTTP SOAP transport and system clock.
    pub fn init(app: &AppConfig) -> anyhow::Result<Self> {
        info!("Initializing dhl24 module");

        let config: Dhl24Config = app.module_config(MODULE_NAME)?;
        config
            .validate()
            .context("Invalid dhl24 gateway configuration")?;
        debug!(
            endpoint = %config.endpoint(),
            service_type = ?config.service_type,
            "Loaded dhl24 config"
        );

        let transport = HttpSoapTransport::from_config(reqwest::Client::new(), &config);
        Ok(Self::with_ports(
            config,
            Arc::new(transport),
            Arc::new(SystemClock),
        ))
    }

    /// Wire with explicit ports (tests, alternative transports).
    pub fn with_ports(
        config: Dhl24Config,
        transport: Arc<dyn ShipmentTransport>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            service: Arc::new(ShipmentService::new(transport, clock)),
        }
    }

    pub fn config(&self) -> &Arc<Dhl24Config> {
        &self.config
    }

    /// Fresh web client with the gateway already selected.
    pub fn web_client(&self) -> Dhl24WebClient {
        let mut client = Dhl24WebClient::new(self.service.clone());
        client.set_shipping_gateway(self.config.clone());
        client
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn app_with(section: serde_json::Value) -> AppConfig {
        let mut app = AppConfig::default();
        app.modules.insert(MODULE_NAME.to_string(), section);
        app
    }

    fn section() -> serde_json::Value {
        json!({
            "wsdl": "https://sandbox.dhl24.com.pl/webapi2?wsdl",
            "login": "shop",
            "password": "secret",
            "drop_off_type": "REQUEST_COURIER",
            "service_type": "09",
            "label_type": "LP",
            "shipping_payment_type": "RECEIVER",
            "billing_account_number": "6000000",
            "payment_type": "BANK_TRANSFER",
            "shipment_start_hour": "09:00",
            "shipment_end_hour": "16:00",
            "package_type": "ENVELOPE",
            "package_width": 25,
            "package_height": 2,
            "package_length": 35,
            "name": "Shop",
            "postal_code": "00-001",
            "city": "Warszawa",
            "street": "Prosta",
            "house_number": "5",
            "phone_number": "500000000",
            "cod_payment_method_code": "cod",
            "collect_on_delivery_form": "CASH"
        })
    }

    #[test]
    fn init_loads_and_validates_module_section() {
        let module = Dhl24Shipping::init(&app_with(section())).unwrap();
        assert_eq!(module.config().login, "shop");
        assert_eq!(module.config().pickup_breaking_hour, None);
    }

    #[test]
    fn init_fails_without_section() {
        let err = Dhl24Shipping::init(&AppConfig::default()).err().unwrap();
        assert!(err.to_string().contains("modules.dhl24"));
    }

    #[test]
    fn init_reads_digit_only_env_overrides() {
        figment::Jail::expect_with(|jail| {
            let doc = json!({ "home_dir": "home", "modules": { "dhl24": section() } });
            let yaml = serde_json::to_string_pretty(&doc).map_err(|e| e.to_string())?;
            jail.create_file("config.yaml", &yaml)?;
            jail.set_env("APP__MODULES__DHL24__PASSWORD", "123456");
            jail.set_env("APP__MODULES__DHL24__BILLING_ACCOUNT_NUMBER", "0060000");
            jail.set_env("APP__MODULES__DHL24__PACKAGE_WIDTH", "40");
            jail.set_env("APP__MODULES__DHL24__PICKUP_BREAKING_HOUR", "15");

            let app = AppConfig::load_layered("config.yaml").map_err(|e| e.to_string())?;
            let module = Dhl24Shipping::init(&app).map_err(|e| format!("{e:#}"))?;

            let config = module.config();
            assert_eq!(config.password, "123456");
            assert_eq!(config.billing_account_number, "0060000");
            assert_eq!(config.package_width, 40);
            assert_eq!(config.pickup_breaking_hour, Some(15));
            assert_eq!(config.login, "shop");
            Ok(())
        });
    }

    #[test]
    fn init_fails_on_invalid_ranges() {
        let mut raw = section();
        raw["pickup_breaking_hour"] = json!(30);
        let err = Dhl24Shipping::init(&app_with(raw)).err().unwrap();
        assert!(err.to_string().contains("Invalid dhl24 gateway configuration"));
    }
}
