//! Per-request audit bookkeeping shared by the middleware, handlers and errors.

use std::future::{Ready, ready};

use axum::response::Response;
use orgreg_application::AuditRecorder;
use orgreg_domain::AuditRecord;
use tracing::warn;

/// Status recorded when the client disconnects before a response is produced.
pub const CLIENT_CLOSED_STATUS: u16 = 499;

/// Message recorded alongside [`CLIENT_CLOSED_STATUS`].
pub const CLIENT_CLOSED_MESSAGE: &str = "Client closed request";

/// Response extension naming the audited activity of a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuditActivity(pub &'static str);

/// Response extension carrying the outcome message for the audit record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditNote(pub String);

/// Builds a response mapper that tags responses with an activity label.
pub fn label_activity(
    activity_type: &'static str,
) -> impl FnMut(Response) -> Ready<Response> + Clone + Send + Sync + 'static {
    move |mut response: Response| {
        response
            .extensions_mut()
            .insert(AuditActivity(activity_type));
        ready(response)
    }
}

/// An audit record awaiting its outcome.
///
/// Completing it submits the record once, on a task that survives the request
/// being dropped mid-submission. Dropping it without completing submits it as
/// a client disconnect.
pub struct PendingAudit {
    recorder: AuditRecorder,
    record: Option<AuditRecord>,
    authorization_header: Option<String>,
}

impl PendingAudit {
    pub fn new(
        recorder: AuditRecorder,
        record: AuditRecord,
        authorization_header: Option<String>,
    ) -> Self {
        Self {
            recorder,
            record: Some(record),
            authorization_header,
        }
    }

    pub async fn complete(
        mut self,
        activity: Option<AuditActivity>,
        status_code: u16,
        message: &str,
    ) {
        let Some(mut record) = self.record.take() else {
            return;
        };
        if let Some(AuditActivity(activity_type)) = activity {
            self.recorder.relabel(&mut record, activity_type);
        }

        // Submission runs on its own task so it outlives a dropped request.
        let recorder = self.recorder.clone();
        let authorization_header = self.authorization_header.take();
        let message = message.to_owned();
        let submission = tokio::spawn(async move {
            recorder
                .complete(
                    record,
                    status_code,
                    &message,
                    authorization_header.as_deref(),
                )
                .await;
        });

        if let Err(error) = submission.await {
            warn!(error = %error, "audit submission task failed");
        }
    }
}

impl Drop for PendingAudit {
    fn drop(&mut self) {
        let Some(record) = self.record.take() else {
            return;
        };

        let Ok(runtime) = tokio::runtime::Handle::try_current() else {
            warn!(endpoint = %record.endpoint, "no runtime to record client disconnect");
            return;
        };

        let recorder = self.recorder.clone();
        let authorization_header = self.authorization_header.take();
        runtime.spawn(async move {
            recorder
                .complete(
                    record,
                    CLIENT_CLOSED_STATUS,
                    CLIENT_CLOSED_MESSAGE,
                    authorization_header.as_deref(),
                )
                .await;
        });
    }
}
