use crate::domain::callback::{CallbackNotification, CallbackVerifier};
use crate::domain::payment::Payment;
use crate::domain::ports::{PaymentLookup, StatusLedger};
use crate::error::{GatewayError, Result};
use tracing::{debug, warn};

/// Tracks the statuses observed for payments and rejects snapshots that would
/// move a payment out of a terminal status.
///
/// The gateway is the only writer of payments; this only keeps the last
/// snapshot status per ID so that inconsistent data is caught instead of acted on.
pub struct StatusMonitor<L: PaymentLookup, S: StatusLedger> {
    lookup: L,
    ledger: S,
}

impl<L: PaymentLookup, S: StatusLedger> StatusMonitor<L, S> {
    pub fn new(lookup: L, ledger: S) -> Self {
        Self { lookup, ledger }
    }

    pub fn lookup(&self) -> &L {
        &self.lookup
    }

    pub fn ledger(&self) -> &S {
        &self.ledger
    }

    /// Fetches a fresh snapshot and records its status.
    ///
    /// A snapshot leaving a terminal status is a
    /// [`GatewayError::StatusRegression`]; the recorded terminal status is kept.
    pub async fn refresh(&self, payment_id: &str) -> Result<Payment> {
        let payment = self.lookup.get_payment(payment_id).await?;
        self.observe(&payment).await?;
        Ok(payment)
    }

    /// Verifies a notification and refreshes the payment it names.
    pub async fn handle_callback(
        &self,
        verifier: &CallbackVerifier,
        notification: &CallbackNotification,
    ) -> Result<Payment> {
        let payment_id = verifier.verify(notification)?;
        self.refresh(payment_id).await
    }

    async fn observe(&self, payment: &Payment) -> Result<()> {
        let next = payment.status();
        if let Some(previous) = self.ledger.last_status(payment.id()).await?
            && !previous.can_transition_to(next)
        {
            warn!(payment_id = payment.id(), %previous, %next, "terminal payment status changed");
            return Err(GatewayError::StatusRegression {
                payment_id: payment.id().to_string(),
                from: previous,
                to: next,
            });
        }

        debug!(payment_id = payment.id(), status = %next, "payment status observed");
        self.ledger.record(payment.id(), next).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::payment::PaymentStatus;
    use crate::infrastructure::in_memory::InMemoryStatusLedger;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Serves the queued statuses one by one for a single payment.
    struct ScriptedLookup {
        statuses: Mutex<Vec<PaymentStatus>>,
    }

    impl ScriptedLookup {
        fn new(mut statuses: Vec<PaymentStatus>) -> Self {
            statuses.reverse();
            Self {
                statuses: Mutex::new(statuses),
            }
        }
    }

    #[async_trait]
    impl PaymentLookup for ScriptedLookup {
        async fn get_payment(&self, payment_id: &str) -> Result<Payment> {
            let status = self.statuses.lock().unwrap().pop().unwrap();
            let json = serde_json::json!({
                "id": payment_id,
                "title": "Order #1",
                "status": status,
                "paymentChannel": "",
                "description": "",
                "additionalData": "",
                "amount": {"amount": "10.00", "currency": "PLN"},
                "requestedAmount": {"amount": "10.00", "currency": "PLN"},
                "personalData": {
                    "firstName": "", "surname": "", "email": "", "city": "",
                    "house": "", "flat": "", "street": "", "postcode": "", "country": ""
                }
            });
            Ok(serde_json::from_value(json).unwrap())
        }
    }

    #[tokio::test]
    async fn test_progression_to_terminal_status() {
        let monitor = StatusMonitor::new(
            ScriptedLookup::new(vec![
                PaymentStatus::PreStart,
                PaymentStatus::Start,
                PaymentStatus::PositiveAuthorization,
                PaymentStatus::PositiveFinish,
                PaymentStatus::PositiveFinish,
            ]),
            InMemoryStatusLedger::new(),
        );

        for _ in 0..4 {
            monitor.refresh("PAY123").await.unwrap();
        }
        let payment = monitor.refresh("PAY123").await.unwrap();
        assert!(payment.is_paid());
        assert_eq!(
            monitor.ledger().last_status("PAY123").await.unwrap(),
            Some(PaymentStatus::PositiveFinish)
        );
    }

    #[tokio::test]
    async fn test_regression_from_terminal_status_is_rejected() {
        let monitor = StatusMonitor::new(
            ScriptedLookup::new(vec![PaymentStatus::Fraud, PaymentStatus::Start]),
            InMemoryStatusLedger::new(),
        );

        monitor.refresh("PAY123").await.unwrap();
        let err = monitor.refresh("PAY123").await.unwrap_err();
        assert!(matches!(
            err,
            GatewayError::StatusRegression {
                from: PaymentStatus::Fraud,
                to: PaymentStatus::Start,
                ..
            }
        ));
        assert_eq!(
            monitor.ledger().last_status("PAY123").await.unwrap(),
            Some(PaymentStatus::Fraud)
        );
    }

    #[tokio::test]
    async fn test_retry_after_negative_authorization() {
        let monitor = StatusMonitor::new(
            ScriptedLookup::new(vec![
                PaymentStatus::NegativeAuthorization,
                PaymentStatus::Start,
            ]),
            InMemoryStatusLedger::new(),
        );

        monitor.refresh("PAY123").await.unwrap();
        let payment = monitor.refresh("PAY123").await.unwrap();
        assert_eq!(payment.status(), PaymentStatus::Start);
    }
}
