mod common;

use common::GeneratedPdf;
use common::fixtures::acme_request;
use kpdf::storage::memory::{InMemoryObjectStore, InMemoryRecordStore};
use kpdf::storage::{ArtifactStore, FixedClock, PDF_CONTENT_TYPE, RecordId};
use kpdf::{DocumentComposer, DocumentPipeline, ErrorKind};
use serde_json::json;
use std::sync::Arc;

const NANOS: i64 = 1_700_000_000_123_456_789;

struct Harness {
    objects: Arc<InMemoryObjectStore>,
    records: Arc<InMemoryRecordStore>,
    pipeline: DocumentPipeline,
}

fn harness(objects: InMemoryObjectStore, records: InMemoryRecordStore) -> Harness {
    let objects = Arc::new(objects);
    let records = Arc::new(records);
    let artifacts = ArtifactStore::new(objects.clone(), "documents", "kp/uploads/")
        .with_clock(Arc::new(FixedClock(NANOS)));
    let pipeline = DocumentPipeline::new(DocumentComposer::new(), artifacts, records.clone());
    Harness {
        objects,
        records,
        pipeline,
    }
}

#[tokio::test]
async fn test_generate_uploads_pdf_under_cart_key() {
    let h = harness(InMemoryObjectStore::default(), InMemoryRecordStore::default());

    let stored = h.pipeline.generate(acme_request()).await.unwrap();

    assert_eq!(stored.bucket, "documents");
    assert_eq!(stored.key, format!("kp/uploads/2_{NANOS}.pdf"));

    let puts = h.objects.puts();
    assert_eq!(puts.len(), 1);
    assert_eq!(puts[0].bucket, "documents");
    assert_eq!(puts[0].key, stored.key);
    assert_eq!(puts[0].content_type, PDF_CONTENT_TYPE);
    assert_eq!(puts[0].bytes.len(), stored.size);

    let pdf = GeneratedPdf::from_bytes(puts[0].bytes.clone()).unwrap();
    assert!(pdf.text().contains("Acme"));
    assert!(h.records.rows().is_empty());
}

#[tokio::test]
async fn test_save_inserts_one_pending_row() {
    let h = harness(InMemoryObjectStore::default(), InMemoryRecordStore::default());
    let request = acme_request();

    let id = h.pipeline.save(&request).await.unwrap();

    assert_eq!(id, RecordId(1));
    let rows = h.records.rows();
    assert_eq!(rows.len(), 1);
    let row = &rows[0];
    assert!(row.save_required);
    assert_eq!(row.record.user_id, 1);
    assert_eq!(row.record.cart_id, 2);
    assert_eq!(row.record.publication_id, 3);
    assert_eq!(row.record.count, 5);
    assert_eq!(
        row.record.style_template,
        json!({ "id_template": "classic", "color": "#112233" })
    );
    assert_eq!(row.record.logo["logo_text"]["value"], "Acme");
    assert_eq!(h.objects.attempts(), 0);
}

#[tokio::test]
async fn test_operations_are_independent() {
    let h = harness(InMemoryObjectStore::failing("access denied"), InMemoryRecordStore::default());
    let request = acme_request();

    let err = h.pipeline.generate(request.clone()).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ArtifactPersistence);
    assert_eq!(h.objects.attempts(), 1);

    assert_eq!(h.pipeline.save(&request).await.unwrap(), RecordId(1));
}

#[tokio::test]
async fn test_record_failure_is_persistence_error() {
    let h = harness(InMemoryObjectStore::default(), InMemoryRecordStore::failing());

    let err = h.pipeline.save(&acme_request()).await.unwrap_err();

    assert_eq!(err.kind(), ErrorKind::RecordPersistence);
    assert!(err.is_persistence());
    assert!(h.records.rows().is_empty());
}

#[tokio::test]
async fn test_concurrent_generates_are_isolated() {
    let h = Arc::new(harness(InMemoryObjectStore::default(), InMemoryRecordStore::default()));

    let mut tasks = Vec::new();
    for cart in 10..14 {
        let h = Arc::clone(&h);
        tasks.push(tokio::spawn(async move {
            let mut request = acme_request();
            request.cart_id = cart;
            h.pipeline.generate(request).await
        }));
    }
    let mut keys = Vec::new();
    for task in tasks {
        keys.push(task.await.unwrap().unwrap().key);
    }
    keys.sort();

    assert_eq!(
        keys,
        (10..14)
            .map(|cart| format!("kp/uploads/{cart}_{NANOS}.pdf"))
            .collect::<Vec<_>>()
    );
    assert_eq!(h.objects.puts().len(), 4);
}
