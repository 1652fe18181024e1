//! Integration tests of the SOAP adapter against a mock carrier endpoint

mod common;

use std::sync::Arc;

use common::{at, gateway_config, sample_shipment, FixedClock};
use dhl24_shipping::contract::client::WebClient;
use dhl24_shipping::contract::error::Dhl24Error;
use dhl24_shipping::domain::ports::{ShipmentTransport, TransportError};
use dhl24_shipping::infra::soap::HttpSoapTransport;
use dhl24_shipping::Dhl24Shipping;
use httpmock::prelude::*;
use serde_json::json;

fn wsdl_for(server: &MockServer) -> String {
    format!("{}/webapi2?wsdl", server.base_url())
}

#[tokio::test]
async fn posts_soap_envelope_to_endpoint_derived_from_wsdl() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/webapi2")
            .header("content-type", "text/xml; charset=utf-8")
            .header_exists("soapaction")
            .body_includes("<ns:createShipment>")
            .body_includes("<username>SHOP_API</username>")
            .body_includes("<houseNumber>45</houseNumber>")
            .body_includes("<pieceList><item>");
        then.status(200).body("<createShipmentResult><shipmentId>1</shipmentId></createShipmentResult>");
    });

    let module = Dhl24Shipping::with_ports(
        gateway_config(&wsdl_for(&server)),
        Arc::new(HttpSoapTransport::from_config(
            reqwest::Client::new(),
            &gateway_config(&wsdl_for(&server)),
        )),
        Arc::new(FixedClock(at((2024, 3, 14), 9, 0))),
    );
    let mut client = module.web_client();
    client.set_shipment(sample_shipment());

    let response = client.create_shipment().await.unwrap();

    mock.assert();
    assert_eq!(response.status, 200);
    assert!(response.body.contains("<shipmentId>1</shipmentId>"));
}

#[tokio::test]
async fn soap_action_names_the_operation() {
    let server = MockServer::start();
    let config = gateway_config(&wsdl_for(&server));
    let expected_action = format!("\"{}#createShipment\"", config.soap_namespace);
    let mock = server.mock(|when, then| {
        when.method(POST).header("soapaction", expected_action.as_str());
        then.status(200).body("ok");
    });

    let transport = HttpSoapTransport::from_config(reqwest::Client::new(), &config);
    let result = transport
        .invoke("createShipment", json!({ "authData": { "username": "X" } }))
        .await;

    mock.assert();
    assert!(result.is_ok());
}

#[tokio::test]
async fn server_error_surfaces_as_fault_with_body() {
    let server = MockServer::start();
    let _mock = server.mock(|when, then| {
        when.method(POST).path("/webapi2");
        then.status(500).body("<faultstring>Brak uprawnień</faultstring>");
    });

    let transport =
        HttpSoapTransport::from_config(reqwest::Client::new(), &gateway_config(&wsdl_for(&server)));
    let result = transport.invoke("createShipment", json!({})).await;

    match result.unwrap_err() {
        TransportError::Fault { status, body } => {
            assert_eq!(status, 500);
            assert!(body.contains("Brak uprawnień"));
        }
        other => panic!("Expected Fault, got {other:?}"),
    }
}

#[tokio::test]
async fn unreachable_endpoint_is_request_error() {
    let transport = HttpSoapTransport::from_config(
        reqwest::Client::new(),
        &gateway_config("http://127.0.0.1:9/webapi2?wsdl"),
    );

    let result = transport.invoke("createShipment", json!({})).await;

    assert!(matches!(result, Err(TransportError::Request { .. })));
}

#[tokio::test]
async fn validation_failure_never_reaches_the_carrier() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST);
        then.status(200);
    });

    let config = gateway_config(&wsdl_for(&server));
    let module = Dhl24Shipping::with_ports(
        config.clone(),
        Arc::new(HttpSoapTransport::from_config(reqwest::Client::new(), &config)),
        Arc::new(FixedClock(at((2024, 3, 14), 9, 0))),
    );
    let mut client = module.web_client();
    let mut shipment = sample_shipment();
    shipment.shipping_weight = -1.0;
    client.set_shipment(shipment);

    let err = client.create_shipment().await.unwrap_err();

    assert!(matches!(err, Dhl24Error::Validation { .. }));
    mock.assert_hits(0);
}
