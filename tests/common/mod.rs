#![allow(dead_code)]

use async_trait::async_trait;
use cashbill::domain::payment::{Money, Payment, PaymentCreationRequest};
use cashbill::domain::ports::PaymentLookup;
use cashbill::{Environment, GatewayConfig, Result};
use std::sync::Mutex;

pub const SHOP_ID: &str = "shop1";
pub const SECRET: &str = "topsecret";

/// sha1("Order #1" "10.00" "PLN" "https://x/ok" "d" "https://x/fail" "" "" "pl" "" "topsecret")
pub const ORDER_SIGN: &str = "ffee27feaffc0676448dd67e2ba3429bc1a26d27";
/// sha1("PAY123" "topsecret")
pub const LOOKUP_SIGN: &str = "1fb01e384bae2d3540ce351c7c9360cfd0e1ccb6";
/// sha1("statusChange" "PAY123" "topsecret")
pub const CALLBACK_SIGN: &str = "c9f7a8c636d4beb7c285f1f5f4fad75ecd216f2c";
/// md5("statusChange" "PAY123" "topsecret")
pub const CALLBACK_SIGN_MD5: &str = "936baf48dc43e145644ff7686b51af79";

pub fn config_for(base_url: &str) -> GatewayConfig {
    GatewayConfig::new(Environment::Sandbox, SHOP_ID, SECRET).with_base_url(base_url)
}

pub fn order_request() -> PaymentCreationRequest {
    PaymentCreationRequest {
        title: "Order #1".to_string(),
        amount: Money::new("10.00", "PLN"),
        description: "d".to_string(),
        additional_data: String::new(),
        return_url: "https://x/ok".to_string(),
        negative_return_url: "https://x/fail".to_string(),
        payment_channel: String::new(),
        language_code: "pl".to_string(),
        referer: String::new(),
    }
}

pub fn payment_json(id: &str, status: &str) -> String {
    serde_json::json!({
        "id": id,
        "title": "Order #1",
        "status": status,
        "paymentChannel": "blik",
        "description": "d",
        "additionalData": "",
        "amount": {"amount": "10.00", "currency": "PLN"},
        "requestedAmount": {"amount": "10.00", "currency": "PLN"},
        "personalData": {
            "firstName": "Jan",
            "surname": "Kowalski",
            "email": "jan@example.com",
            "city": "Warszawa",
            "house": "1",
            "flat": "",
            "street": "Prosta",
            "postcode": "00-001",
            "country": "PL"
        }
    })
    .to_string()
}

pub fn payment(id: &str, status: &str) -> Payment {
    serde_json::from_str(&payment_json(id, status)).unwrap()
}

/// A lookup that records which payment IDs were requested.
#[derive(Default)]
pub struct CountingLookup {
    requested: Mutex<Vec<String>>,
}

impl CountingLookup {
    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl PaymentLookup for CountingLookup {
    async fn get_payment(&self, payment_id: &str) -> Result<Payment> {
        self.requested.lock().unwrap().push(payment_id.to_string());
        Ok(payment(payment_id, "PositiveFinish"))
    }
}
