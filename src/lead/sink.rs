//! Lead sink — where finalized leads go.
//!
//! No outbound delivery is wired up: the summary message is the only
//! user-visible result, and [`LogSink`] just records the lead. The trait is
//! the contract a real deployment fills in (CRM, email, queue).

use async_trait::async_trait;

use super::form::LeadRecord;
use crate::error::ChannelError;

/// Destination for finalized lead records.
#[async_trait]
pub trait LeadSink: Send + Sync {
    async fn submit(&self, lead: &LeadRecord) -> Result<(), ChannelError>;
}

/// Stub sink that records the lead in the log and drops it.
pub struct LogSink;

#[async_trait]
impl LeadSink for LogSink {
    async fn submit(&self, lead: &LeadRecord) -> Result<(), ChannelError> {
        tracing::info!(
            name = %lead.name,
            email = %lead.email,
            company = %lead.company,
            service = %lead.service,
            "lead collected"
        );
        Ok(())
    }
}
