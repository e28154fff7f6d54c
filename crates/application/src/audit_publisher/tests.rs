use std::sync::Arc;

use chrono::Utc;
use orgreg_domain::AuditRecord;
use proptest::prelude::*;

use super::{AuditPublisher, DEFAULT_MAX_MESSAGE_BYTES, TRUNCATION_MARKER};
use crate::test_support::RecordingAuditQueue;

fn record_with_remarks(remarks: String) -> AuditRecord {
    let mut record = AuditRecord::begin("Create Organization", "/api/orgs", "POST", Utc::now());
    record.set_outcome(200, "Success! The organization has been added.");
    record.remarks = remarks;
    record
}

#[tokio::test]
async fn small_message_is_delivered_unchanged() {
    let queue = Arc::new(RecordingAuditQueue::default());
    let publisher = AuditPublisher::new(queue.clone());

    publisher
        .publish(record_with_remarks("This is a test message".to_owned()))
        .await;

    let messages = queue.snapshot();
    assert_eq!(messages.len(), 1);
    assert!(messages[0].contains("This is a test message"));
    assert!(!messages[0].contains(TRUNCATION_MARKER));
}

#[tokio::test]
async fn oversized_remarks_are_truncated_within_ceiling() {
    let queue = Arc::new(RecordingAuditQueue::default());
    let publisher = AuditPublisher::new(queue.clone());

    publisher
        .publish(record_with_remarks("a".repeat(300_000)))
        .await;

    let messages = queue.snapshot();
    assert_eq!(messages.len(), 1);
    assert!(messages[0].len() <= DEFAULT_MAX_MESSAGE_BYTES);

    let delivered: serde_json::Value =
        serde_json::from_str(&messages[0]).unwrap_or(serde_json::Value::Null);
    let remarks = delivered["remarks"].as_str().unwrap_or_default();
    assert!(remarks.ends_with(TRUNCATION_MARKER));
    assert_eq!(
        delivered["activityDescription"],
        "Success! The organization has been added."
    );
    assert_eq!(delivered["endpoint"], "/api/orgs");
}

#[tokio::test]
async fn description_is_truncated_when_remarks_are_not_enough() {
    let queue = Arc::new(RecordingAuditQueue::default());
    let publisher = AuditPublisher::new(queue.clone()).with_max_message_bytes(1_024);
    let mut record = record_with_remarks("short remark".to_owned());
    record.activity_description = "d".repeat(4_000);

    publisher.publish(record).await;

    let messages = queue.snapshot();
    assert_eq!(messages.len(), 1);
    assert!(messages[0].len() <= 1_024);
    let delivered: serde_json::Value =
        serde_json::from_str(&messages[0]).unwrap_or(serde_json::Value::Null);
    assert!(
        delivered["activityDescription"]
            .as_str()
            .unwrap_or_default()
            .ends_with(TRUNCATION_MARKER)
    );
}

#[tokio::test]
async fn record_whose_structured_fields_exceed_ceiling_is_dropped() {
    let queue = Arc::new(RecordingAuditQueue::default());
    let publisher = AuditPublisher::new(queue.clone()).with_max_message_bytes(64);

    publisher
        .publish(record_with_remarks("x".repeat(1_000)))
        .await;

    assert!(queue.snapshot().is_empty());
}

#[tokio::test]
async fn queue_failure_is_swallowed() {
    let queue = Arc::new(RecordingAuditQueue::failing());
    let publisher = AuditPublisher::new(queue.clone());

    publisher
        .publish(record_with_remarks("will fail".to_owned()))
        .await;

    assert!(queue.snapshot().is_empty());
}

proptest! {
    #[test]
    fn prepared_message_never_exceeds_ceiling(
        remarks in "[a-z\"\\\\é😀\n]{0,2000}",
        description in "[A-Za-z é\"]{0,600}",
        max_message_bytes in 400_usize..2_000,
    ) {
        let publisher = AuditPublisher::new(Arc::new(RecordingAuditQueue::default()))
            .with_max_message_bytes(max_message_bytes);
        let mut record = record_with_remarks(remarks);
        record.activity_description = description;
        let untouched = serde_json::to_string(&record).unwrap_or_default();

        let prepared = publisher.prepare_message(record);

        if let Some(message) = prepared {
            prop_assert!(message.len() <= max_message_bytes);
            if untouched.len() > max_message_bytes {
                prop_assert!(message.contains(TRUNCATION_MARKER));
            } else {
                prop_assert_eq!(message, untouched);
            }
        }
    }
}
