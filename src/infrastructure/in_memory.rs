use crate::domain::payment::PaymentStatus;
use crate::domain::ports::StatusLedger;
use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory ledger of the last status seen per payment.
///
/// Uses `Arc<RwLock<HashMap<String, PaymentStatus>>>` so clones share state.
/// Nothing survives a restart; callers needing that implement [`StatusLedger`]
/// over their own storage.
#[derive(Default, Clone)]
pub struct InMemoryStatusLedger {
    statuses: Arc<RwLock<HashMap<String, PaymentStatus>>>,
}

impl InMemoryStatusLedger {
    /// Creates a new, empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.statuses.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.statuses.read().await.is_empty()
    }
}

#[async_trait]
impl StatusLedger for InMemoryStatusLedger {
    async fn last_status(&self, payment_id: &str) -> Result<Option<PaymentStatus>> {
        let statuses = self.statuses.read().await;
        Ok(statuses.get(payment_id).copied())
    }

    async fn record(&self, payment_id: &str, status: PaymentStatus) -> Result<()> {
        let mut statuses = self.statuses.write().await;
        statuses.insert(payment_id.to_string(), status);
        Ok(())
    }
}
