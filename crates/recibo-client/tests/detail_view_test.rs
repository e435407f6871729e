use recibo_backend::{ExtractionOutcome, InMemoryBackend, NewReceiptDocument, ReceiptBackend};
use recibo_client::{DisplayState, ReceiptDetailView};
use recibo_core::models::{ExtractedFields, ReceiptStatus};
use recibo_storage::{BlobStorage, InMemoryBlobStorage};
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

async fn setup() -> (Arc<InMemoryBackend>, Arc<InMemoryBlobStorage>) {
    let storage = Arc::new(InMemoryBlobStorage::new());
    let backend = Arc::new(InMemoryBackend::new(
        storage.clone(),
        Duration::from_secs(3600),
    ));
    (backend, storage)
}

async fn create_receipt(
    backend: &InMemoryBackend,
    storage: &InMemoryBlobStorage,
    name: &str,
) -> recibo_core::models::ReceiptDocument {
    let blob_ref = storage
        .store(name, "application/pdf", bytes::Bytes::from_static(b"%PDF"))
        .await
        .unwrap();
    backend
        .create_document(NewReceiptDocument {
            file_name: name.to_string(),
            file_display_name: None,
            mimetype: "application/pdf".to_string(),
            size: 1536,
            file_id: blob_ref,
        })
        .await
        .unwrap()
}

#[tokio::test]
async fn view_is_loading_until_first_snapshot_is_pumped() {
    let (backend, storage) = setup().await;
    let doc = create_receipt(&backend, &storage, "a.pdf").await;

    let mut view = ReceiptDetailView::open(backend, doc.id).await;
    assert!(matches!(view.state(), DisplayState::Loading));

    assert!(view.next_snapshot().await);
    match view.state() {
        DisplayState::Present(detail) => {
            assert_eq!(detail.document.status, ReceiptStatus::Pending);
            assert_eq!(detail.size_label, "1.5 KB");
            assert!(detail.download_url.is_some());
            assert!(!detail.has_extracted_data);
        }
        other => panic!("expected Present, got {:?}", other),
    }
}

#[tokio::test]
async fn unknown_id_is_not_found_not_loading() {
    let (backend, _storage) = setup().await;

    let mut view = ReceiptDetailView::open(backend, Uuid::new_v4()).await;
    assert!(matches!(view.state(), DisplayState::Loading));

    assert!(view.next_snapshot().await);
    assert!(matches!(view.state(), DisplayState::NotFound));
}

#[tokio::test]
async fn extracted_data_flag_is_recomputed_per_snapshot() {
    let (backend, storage) = setup().await;
    let doc = create_receipt(&backend, &storage, "a.pdf").await;

    let mut view = ReceiptDetailView::open(backend.clone(), doc.id).await;
    view.next_snapshot().await;
    match view.state() {
        DisplayState::Present(detail) => assert!(!detail.has_extracted_data),
        other => panic!("expected Present, got {:?}", other),
    }

    backend
        .apply_extraction(
            doc.id,
            ExtractionOutcome::Extracted(ExtractedFields {
                merchant_name: Some("Cafe Aurora".to_string()),
                ..Default::default()
            }),
        )
        .await
        .unwrap();

    view.next_snapshot().await;
    match view.state() {
        DisplayState::Present(detail) => {
            assert_eq!(detail.document.status, ReceiptStatus::Processed);
            assert!(detail.has_extracted_data);
        }
        other => panic!("expected Present, got {:?}", other),
    }
}

#[tokio::test]
async fn terminal_status_never_reverts_to_pending() {
    let (backend, storage) = setup().await;
    let doc = create_receipt(&backend, &storage, "a.pdf").await;

    let mut view = ReceiptDetailView::open(backend.clone(), doc.id).await;
    view.next_snapshot().await;

    backend
        .apply_extraction(doc.id, ExtractionOutcome::Failed("bad scan".to_string()))
        .await
        .unwrap();

    let state = view.wait_for_terminal().await;
    match state {
        DisplayState::Present(detail) => {
            assert_eq!(detail.document.status, ReceiptStatus::Error)
        }
        other => panic!("expected Present, got {:?}", other),
    }

    // a second transition is rejected at the source, so no later snapshot
    // can ever show pending again
    assert!(backend
        .apply_extraction(
            doc.id,
            ExtractionOutcome::Extracted(ExtractedFields::default())
        )
        .await
        .is_err());
}

#[tokio::test]
async fn missing_blob_degrades_to_absent_download_url() {
    let (backend, storage) = setup().await;
    let doc = create_receipt(&backend, &storage, "a.pdf").await;

    storage.delete(&doc.file_id).await.unwrap();

    let mut view = ReceiptDetailView::open(backend, doc.id).await;
    view.next_snapshot().await;

    match view.state() {
        DisplayState::Present(detail) => assert!(detail.download_url.is_none()),
        other => panic!("expected Present, got {:?}", other),
    }
}

#[tokio::test]
async fn dropping_the_view_before_first_snapshot_leaks_nothing() {
    let (backend, storage) = setup().await;
    let doc = create_receipt(&backend, &storage, "a.pdf").await;

    let view = ReceiptDetailView::open(backend.clone(), doc.id).await;
    drop(view);

    // a snapshot published after the drop must not reach a disposed view
    backend
        .apply_extraction(
            doc.id,
            ExtractionOutcome::Extracted(ExtractedFields::default()),
        )
        .await
        .unwrap();
}

#[tokio::test]
async fn bad_id_never_leaves_the_view_stuck_loading() {
    let (backend, _storage) = setup().await;

    let mut view = ReceiptDetailView::open(backend, Uuid::new_v4()).await;
    let state = view.wait_for_terminal().await;
    assert!(matches!(state, DisplayState::NotFound));
}

#[tokio::test]
async fn delete_blob_then_next_snapshot_recomputes_url() {
    let (backend, storage) = setup().await;
    let doc = create_receipt(&backend, &storage, "a.pdf").await;

    let mut view = ReceiptDetailView::open(backend.clone(), doc.id).await;
    view.next_snapshot().await;
    match view.state() {
        DisplayState::Present(detail) => assert!(detail.download_url.is_some()),
        other => panic!("expected Present, got {:?}", other),
    }

    storage.delete(&doc.file_id).await.unwrap();
    backend
        .apply_extraction(
            doc.id,
            ExtractionOutcome::Extracted(ExtractedFields::default()),
        )
        .await
        .unwrap();

    view.next_snapshot().await;
    match view.state() {
        DisplayState::Present(detail) => {
            assert_eq!(detail.document.status, ReceiptStatus::Processed);
            assert!(detail.download_url.is_none());
        }
        other => panic!("expected Present, got {:?}", other),
    }
}
