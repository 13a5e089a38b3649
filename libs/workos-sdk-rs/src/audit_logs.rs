//! Audit Logs API.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;
use workos_types::audit_logs::{AuditLogEvent, AuditLogExport};

use crate::client::{ApiRequest, WorkosClient};
use crate::error::WorkosError;

#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateEventOpts {
    pub organization_id: String,

    pub event: AuditLogEvent,

    /// Sent as the `Idempotency-Key` header
    #[serde(skip)]
    pub idempotency_key: Option<String>,
}

/// Filters for an audit log export.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CreateExportOpts {
    pub organization_id: String,

    pub range_start: DateTime<Utc>,

    pub range_end: DateTime<Utc>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub actions: Vec<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub actor_names: Vec<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub actor_ids: Vec<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub targets: Vec<String>,
}

/// Audit Logs endpoints, obtained from [`WorkosClient::audit_logs`].
#[derive(Debug, Clone, Copy)]
pub struct AuditLogs<'a> {
    client: &'a WorkosClient,
}

impl<'a> AuditLogs<'a> {
    pub(crate) fn new(client: &'a WorkosClient) -> Self {
        Self { client }
    }

    /// Record an event. `occurred_at` defaults to now.
    pub async fn create_event(&self, opts: &CreateEventOpts) -> Result<(), WorkosError> {
        let mut body = opts.clone();
        if body.event.occurred_at.is_none() {
            body.event.occurred_at = Some(Utc::now());
        }
        debug!(
            organization_id = %body.organization_id,
            action = %body.event.action,
            "Creating audit log event"
        );

        let request = ApiRequest::post(&["audit_logs", "events"])
            .json(&body)?
            .idempotency_key(opts.idempotency_key.as_deref());
        self.client.send_empty(request).await
    }

    pub async fn create_export(
        &self,
        opts: &CreateExportOpts,
    ) -> Result<AuditLogExport, WorkosError> {
        let request = ApiRequest::post(&["audit_logs", "exports"]).json(opts)?;
        self.client.send(request).await
    }

    pub async fn get_export(&self, export_id: &str) -> Result<AuditLogExport, WorkosError> {
        self.client
            .send(ApiRequest::get(&["audit_logs", "exports", export_id]))
            .await
    }
}
