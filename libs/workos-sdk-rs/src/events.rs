//! Events API.

use chrono::{DateTime, SecondsFormat, Utc};
use workos_types::events::Event;
use workos_types::{ListResponse, RESPONSE_LIMIT};

use crate::client::{ApiRequest, Query, WorkosClient};
use crate::error::WorkosError;

/// Filters for [`Events::list_events`].
#[derive(Debug, Clone, Default)]
pub struct ListEventsOpts {
    /// Event names to include, e.g. `dsync.user.created`
    pub events: Vec<String>,

    /// Defaults to 10
    pub limit: Option<u32>,

    pub after: Option<String>,

    pub organization_id: Option<String>,

    pub range_start: Option<DateTime<Utc>>,

    pub range_end: Option<DateTime<Utc>>,
}

/// Events endpoints, obtained from [`WorkosClient::events`].
#[derive(Debug, Clone, Copy)]
pub struct Events<'a> {
    client: &'a WorkosClient,
}

impl<'a> Events<'a> {
    pub(crate) fn new(client: &'a WorkosClient) -> Self {
        Self { client }
    }

    pub async fn list_events(
        &self,
        opts: &ListEventsOpts,
    ) -> Result<ListResponse<Event>, WorkosError> {
        let timestamp = |t: &DateTime<Utc>| t.to_rfc3339_opts(SecondsFormat::Millis, true);

        let query = Query::new()
            .push_all("events", &opts.events)
            .push("limit", opts.limit.unwrap_or(RESPONSE_LIMIT))
            .push_opt("after", opts.after.as_deref())
            .push_opt("organization_id", opts.organization_id.as_deref())
            .push_opt("range_start", opts.range_start.as_ref().map(timestamp))
            .push_opt("range_end", opts.range_end.as_ref().map(timestamp));

        self.client
            .send(ApiRequest::get(&["events"]).query(query))
            .await
    }
}
