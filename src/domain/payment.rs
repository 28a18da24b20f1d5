use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A monetary value exactly as the gateway writes it.
///
/// The amount stays a decimal string so nothing is lost to floating point;
/// the gateway decides how amounts are formatted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    pub amount: String,
    #[serde(rename = "currency")]
    pub currency_code: String,
}

impl Money {
    pub fn new(amount: impl Into<String>, currency_code: impl Into<String>) -> Self {
        Self {
            amount: amount.into(),
            currency_code: currency_code.into(),
        }
    }

    /// Parses the amount for arithmetic. `None` if the gateway sent something
    /// that is not a plain decimal number.
    pub fn decimal(&self) -> Option<Decimal> {
        Decimal::from_str(self.amount.trim()).ok()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.amount, self.currency_code)
    }
}

/// Lifecycle state of a payment as reported by the gateway.
///
/// `Fraud`, `PositiveFinish` and `NegativeFinish` are terminal: once a payment
/// reaches one of them its status never changes again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentStatus {
    /// Payment initiated, channel not chosen yet.
    PreStart,
    /// Channel chosen, payment not completed yet.
    Start,
    /// The channel refused authorization. The customer may retry.
    NegativeAuthorization,
    /// The customer abandoned the payment.
    Abort,
    /// The channel flagged the payment as fraudulent.
    Fraud,
    /// Accepted by the channel, funds not settled yet.
    PositiveAuthorization,
    /// Funds transfer confirmed.
    PositiveFinish,
    /// Funds transfer refused after authorization.
    NegativeFinish,
}

impl PaymentStatus {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            PaymentStatus::Fraud | PaymentStatus::PositiveFinish | PaymentStatus::NegativeFinish
        )
    }

    /// Whether a payment observed in `self` may legitimately be observed in `next` later.
    pub fn can_transition_to(self, next: PaymentStatus) -> bool {
        self == next || !self.is_terminal()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PaymentStatus::PreStart => "PreStart",
            PaymentStatus::Start => "Start",
            PaymentStatus::NegativeAuthorization => "NegativeAuthorization",
            PaymentStatus::Abort => "Abort",
            PaymentStatus::Fraud => "Fraud",
            PaymentStatus::PositiveAuthorization => "PositiveAuthorization",
            PaymentStatus::PositiveFinish => "PositiveFinish",
            PaymentStatus::NegativeFinish => "NegativeFinish",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Customer data collected by the gateway. Passed through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalData {
    pub first_name: String,
    pub surname: String,
    pub email: String,
    pub city: String,
    pub house: String,
    pub flat: String,
    pub street: String,
    pub postcode: String,
    pub country: String,
}

/// Input for a new payment. Built by the caller and signed once per call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentCreationRequest {
    pub title: String,
    pub amount: Money,
    pub description: String,
    pub additional_data: String,
    pub return_url: String,
    pub negative_return_url: String,
    pub payment_channel: String,
    pub language_code: String,
    pub referer: String,
}

impl PaymentCreationRequest {
    /// A request with only the mandatory fields set; the optional ones are empty,
    /// which is how the gateway expects "not provided".
    pub fn new(title: impl Into<String>, amount: Money, return_url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            amount,
            description: String::new(),
            additional_data: String::new(),
            return_url: return_url.into(),
            negative_return_url: String::new(),
            payment_channel: String::new(),
            language_code: String::new(),
            referer: String::new(),
        }
    }
}

/// What the gateway answers to a payment creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentCreationResult {
    pub id: String,
    /// Where the customer must be sent to complete the payment.
    pub redirect_url: String,
}

/// A snapshot of a payment as held by the gateway.
///
/// Only the gateway changes payments, so this type has getters and no setters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    id: String,
    title: String,
    status: PaymentStatus,
    payment_channel: String,
    description: String,
    additional_data: String,
    amount: Money,
    requested_amount: Money,
    personal_data: PersonalData,
}

impl Payment {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn status(&self) -> PaymentStatus {
        self.status
    }

    pub fn payment_channel(&self) -> &str {
        &self.payment_channel
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn additional_data(&self) -> &str {
        &self.additional_data
    }

    /// The amount actually processed.
    pub fn amount(&self) -> &Money {
        &self.amount
    }

    /// The amount asked for at creation time.
    pub fn requested_amount(&self) -> &Money {
        &self.requested_amount
    }

    pub fn personal_data(&self) -> &PersonalData {
        &self.personal_data
    }

    pub fn is_paid(&self) -> bool {
        self.status == PaymentStatus::PositiveFinish
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// True when the processed amount is not the requested one, e.g. after a
    /// currency conversion. Amounts are compared numerically when both parse.
    pub fn amount_differs(&self) -> bool {
        if self.amount.currency_code != self.requested_amount.currency_code {
            return true;
        }
        match (self.amount.decimal(), self.requested_amount.decimal()) {
            (Some(processed), Some(requested)) => processed != requested,
            _ => self.amount.amount != self.requested_amount.amount,
        }
    }
}
