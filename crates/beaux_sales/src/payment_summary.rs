// --- File: crates/beaux_sales/src/payment_summary.rs ---
//! Totals per payment method, read from whatever shape the backend sends:
//! a summary object, a list of `{metodo, monto}` entries, or invoice rows.

use beaux_format::{extract_numeric_value, fold};
use serde::Serialize;
use serde_json::{Map, Value};

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

/// Where a summary may sit inside a larger response.
const SUMMARY_KEYS: &[&str] = &[
    "summary",
    "totals",
    "payment_summary",
    "payment_totals",
    "paymentMethods",
    "payment_methods",
    "metodos_pago",
    "metodosPago",
    "resumen_metodos_pago",
    "resumenPago",
];

const AMOUNT_KEYS: &[&str] = &["total", "monto", "amount", "value", "valor"];
const ENTRY_AMOUNT_KEYS: &[&str] = &["monto", "amount", "total", "value", "valor"];
const ENTRY_METHOD_KEYS: &[&str] = &[
    "metodo",
    "method",
    "metodo_pago",
    "payment_method",
    "paymentMethod",
    "name",
    "nombre",
];

/// Keys that are aggregates or carry no method.
const IGNORED_KEYS: &[&str] = &[
    "total",
    "subtotal",
    "grand_total",
    "sin_pago",
    "none",
    "other",
    "otros",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentBucket {
    Efectivo,
    Transferencia,
    Tarjetas,
    LinkPagos,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct PaymentMethodTotals {
    pub efectivo: f64,
    pub transferencia: f64,
    pub tarjetas: f64,
    pub link_pagos: f64,
}

impl PaymentMethodTotals {
    fn add(&mut self, bucket: PaymentBucket, amount: f64) {
        if !amount.is_finite() {
            return;
        }
        match bucket {
            PaymentBucket::Efectivo => self.efectivo += amount,
            PaymentBucket::Transferencia => self.transferencia += amount,
            PaymentBucket::Tarjetas => self.tarjetas += amount,
            PaymentBucket::LinkPagos => self.link_pagos += amount,
        }
    }

    fn merge(&mut self, other: &PaymentMethodTotals) {
        self.efectivo += other.efectivo;
        self.transferencia += other.transferencia;
        self.tarjetas += other.tarjetas;
        self.link_pagos += other.link_pagos;
    }

    pub fn total(&self) -> f64 {
        self.efectivo + self.transferencia + self.tarjetas + self.link_pagos
    }
}

/// `"Tarjeta Crédito"` becomes `"tarjeta_credito"`.
pub fn normalize_token(raw: &str) -> String {
    let mut token = String::new();
    let mut pending_sep = false;
    for c in fold(raw).chars() {
        if c.is_whitespace() || c == '-' {
            pending_sep = true;
            continue;
        }
        if pending_sep {
            token.push('_');
            pending_sep = false;
        }
        if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' {
            token.push(c);
        }
    }
    token
}

/// Bucket for a payment method name, if it names one.
pub fn classify_method(raw: &str) -> Option<PaymentBucket> {
    let method = normalize_token(raw);
    if method.is_empty() {
        return None;
    }
    let has = |needles: &[&str]| needles.iter().any(|n| method.contains(n));

    if method.contains("efectivo") || method == "cash" || method.starts_with("cash_") {
        Some(PaymentBucket::Efectivo)
    } else if method.contains("transfer") {
        Some(PaymentBucket::Transferencia)
    } else if has(&["link", "paylink", "paymentlink", "payment_link", "addi"]) {
        Some(PaymentBucket::LinkPagos)
    } else if has(&["tarjeta", "card", "credito", "debito", "credit", "debit"]) {
        Some(PaymentBucket::Tarjetas)
    } else {
        None
    }
}

fn amount(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().filter(|n| n.is_finite()).unwrap_or(0.0),
        Value::String(s) => extract_numeric_value(s),
        _ => 0.0,
    }
}

fn is_numeric_like(value: &Value) -> bool {
    match value {
        Value::Number(n) => n.as_f64().is_some_and(f64::is_finite),
        Value::String(s) => s.chars().any(|c| c.is_ascii_digit()),
        _ => false,
    }
}

fn first_present<'a>(map: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|k| map.get(*k))
        .find(|v| !v.is_null())
}

fn from_entries(entries: &[Value]) -> Option<PaymentMethodTotals> {
    let mut totals = PaymentMethodTotals::default();
    let mut matched = false;
    for entry in entries.iter().filter_map(Value::as_object) {
        let Some(bucket) = first_present(entry, ENTRY_METHOD_KEYS)
            .and_then(Value::as_str)
            .and_then(classify_method)
        else {
            continue;
        };
        let Some(value) = first_present(entry, ENTRY_AMOUNT_KEYS).filter(|v| is_numeric_like(v))
        else {
            continue;
        };
        totals.add(bucket, amount(value));
        matched = true;
    }
    matched.then_some(totals)
}

fn from_object(map: &Map<String, Value>) -> Option<PaymentMethodTotals> {
    let mut totals = PaymentMethodTotals::default();
    let mut matched = false;
    for (raw_key, value) in map {
        let key = normalize_token(raw_key);
        if key.is_empty() || IGNORED_KEYS.contains(&key.as_str()) {
            continue;
        }
        let found = match value {
            Value::Array(entries) => from_entries(entries),
            Value::Object(nested) => {
                let keyed = classify_method(&key).and_then(|bucket| {
                    AMOUNT_KEYS.iter().find_map(|k| nested.get(*k)).map(|v| {
                        let mut t = PaymentMethodTotals::default();
                        t.add(bucket, amount(v));
                        t
                    })
                });
                keyed.or_else(|| from_object(nested))
            }
            scalar => classify_method(&key)
                .filter(|_| is_numeric_like(scalar))
                .map(|bucket| {
                    let mut t = PaymentMethodTotals::default();
                    t.add(bucket, amount(scalar));
                    t
                }),
        };
        if let Some(found) = found {
            totals.merge(&found);
            matched = true;
        }
    }
    matched.then_some(totals)
}

/// Totals from a backend summary. The response itself is tried first,
/// then the usual summary keys. `None` when nothing names a method.
pub fn summarize_payment_methods(response: &Value) -> Option<PaymentMethodTotals> {
    let map = response.as_object()?;
    if let Some(totals) = from_object(map) {
        return Some(totals);
    }
    SUMMARY_KEYS.iter().find_map(|key| match map.get(*key)? {
        Value::Object(candidate) => from_object(candidate),
        Value::Array(candidate) => from_entries(candidate),
        _ => None,
    })
}

/// Totals over invoice rows. A row's `desglose_pagos` wins over its
/// `historial_pagos`, which wins over its single `metodo_pago`.
pub fn totals_from_facturas(rows: &[Value]) -> PaymentMethodTotals {
    let mut totals = PaymentMethodTotals::default();
    for row in rows.iter().filter_map(Value::as_object) {
        let breakdown = row
            .get("desglose_pagos")
            .and_then(Value::as_object)
            .and_then(from_object)
            .or_else(|| {
                row.get("historial_pagos")
                    .and_then(Value::as_array)
                    .and_then(|h| from_entries(h))
            });
        if let Some(found) = breakdown {
            totals.merge(&found);
            continue;
        }

        let bucket = first_present(row, &["metodo_pago", "paymentMethod", "method", "metodo"])
            .and_then(Value::as_str)
            .and_then(classify_method);
        if let Some(bucket) = bucket {
            let value = first_present(row, &["total", "monto", "amount", "value"]);
            totals.add(bucket, value.map(amount).unwrap_or(0.0));
        }
    }
    totals
}
