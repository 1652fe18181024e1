//! SOAP 1.1 envelope rendering for JSON-shaped payloads.
//!
//! Objects become nested elements, arrays become `<item>` sequences (the
//! carrier's `ArrayOf*` types), nulls are omitted.

use serde_json::Value;

const SOAP_ENV_NS: &str = "http://schemas.xmlsoap.org/soap/envelope/";

pub fn render_envelope(namespace: &str, operation: &str, payload: &Value) -> String {
    let mut out = String::with_capacity(2048);
    out.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
    out.push_str(&format!(
        r#"<soapenv:Envelope xmlns:soapenv="{}" xmlns:ns="{}"><soapenv:Body>"#,
        SOAP_ENV_NS,
        escape(namespace)
    ));
    out.push_str(&format!("<ns:{}>", operation));
    write_children(&mut out, payload);
    out.push_str(&format!("</ns:{}>", operation));
    out.push_str("</soapenv:Body></soapenv:Envelope>");
    out
}

fn write_children(out: &mut String, value: &Value) {
    match value {
        Value::Object(fields) => {
            for (name, field) in fields {
                write_element(out, name, field);
            }
        }
        Value::Array(items) => {
            for item in items {
                write_element(out, "item", item);
            }
        }
        scalar => write_scalar(out, scalar),
    }
}

fn write_element(out: &mut String, name: &str, value: &Value) {
    if value.is_null() {
        return;
    }
    out.push('<');
    out.push_str(name);
    out.push('>');
    write_children(out, value);
    out.push_str("</");
    out.push_str(name);
    out.push('>');
}

fn write_scalar(out: &mut String, value: &Value) {
    match value {
        Value::String(s) => out.push_str(&escape(s)),
        Value::Number(n) => out.push_str(&n.to_string()),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        _ => {}
    }
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
