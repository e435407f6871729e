use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Opaque handle to a stored binary. Immutable once set on a document;
/// the only way the original bytes are ever reached.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlobRef(pub String);

impl BlobRef {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BlobRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle state of a receipt document.
///
/// `Pending` is the only initial state. `Processed` and `Error` are terminal:
/// a document transitions exactly once and never reverts to `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReceiptStatus {
    Pending,
    Processed,
    Error,
}

impl ReceiptStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, ReceiptStatus::Processed | ReceiptStatus::Error)
    }

    /// Whether the monotonic lifecycle permits moving to `next`.
    pub fn can_transition_to(&self, next: ReceiptStatus) -> bool {
        matches!(self, ReceiptStatus::Pending) && next.is_terminal()
    }
}

impl std::fmt::Display for ReceiptStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReceiptStatus::Pending => write!(f, "pending"),
            ReceiptStatus::Processed => write!(f, "processed"),
            ReceiptStatus::Error => write!(f, "error"),
        }
    }
}

/// Fields populated by the external extraction job. All nullable: a
/// processed receipt may legitimately have none of them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedFields {
    pub merchant_name: Option<String>,
    pub merchant_address: Option<String>,
    pub transaction_date: Option<String>,
    pub transaction_amount: Option<Decimal>,
    pub currency: Option<String>,
    pub category: Option<String>,
}

impl ExtractedFields {
    pub fn is_empty(&self) -> bool {
        self.merchant_name.is_none()
            && self.merchant_address.is_none()
            && self.transaction_date.is_none()
            && self.transaction_amount.is_none()
            && self.currency.is_none()
            && self.category.is_none()
    }
}

/// The unit of work: one uploaded receipt and everything extracted from it.
/// This full record is also the snapshot shape delivered to subscribers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReceiptDocument {
    pub id: Uuid,
    pub file_name: String,
    pub file_display_name: Option<String>,
    pub mimetype: String,
    pub size: i64,
    pub uploaded_at: DateTime<Utc>,
    pub file_id: BlobRef,
    pub status: ReceiptStatus,
    #[serde(default)]
    pub extracted: ExtractedFields,
}

impl ReceiptDocument {
    /// User-facing title: the display override when present, otherwise the
    /// original file name.
    pub fn display_name(&self) -> &str {
        self.file_display_name.as_deref().unwrap_or(&self.file_name)
    }

    /// Derived per snapshot, never stored: true iff any extracted field
    /// is populated.
    pub fn has_extracted_data(&self) -> bool {
        !self.extracted.is_empty()
    }
}

/// One file offered for upload, with its declared metadata.
#[derive(Debug, Clone, Validate)]
pub struct FileUpload {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(length(min = 1, max = 128))]
    pub mimetype: String,
    pub bytes: Vec<u8>,
}

impl FileUpload {
    pub fn new(name: impl Into<String>, mimetype: impl Into<String>, bytes: Vec<u8>) -> Self {
        FileUpload {
            name: name.into(),
            mimetype: mimetype.into(),
            bytes,
        }
    }

    pub fn size(&self) -> i64 {
        self.bytes.len() as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_document(status: ReceiptStatus, extracted: ExtractedFields) -> ReceiptDocument {
        ReceiptDocument {
            id: Uuid::new_v4(),
            file_name: "groceries.pdf".to_string(),
            file_display_name: None,
            mimetype: "application/pdf".to_string(),
            size: 2048,
            uploaded_at: Utc::now(),
            file_id: BlobRef("blobs/groceries.pdf".to_string()),
            status,
            extracted,
        }
    }

    #[test]
    fn test_status_transitions_are_monotonic() {
        assert!(ReceiptStatus::Pending.can_transition_to(ReceiptStatus::Processed));
        assert!(ReceiptStatus::Pending.can_transition_to(ReceiptStatus::Error));
        assert!(!ReceiptStatus::Pending.can_transition_to(ReceiptStatus::Pending));

        assert!(!ReceiptStatus::Processed.can_transition_to(ReceiptStatus::Pending));
        assert!(!ReceiptStatus::Processed.can_transition_to(ReceiptStatus::Error));
        assert!(!ReceiptStatus::Error.can_transition_to(ReceiptStatus::Processed));
    }

    #[test]
    fn test_status_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&ReceiptStatus::Pending).unwrap(),
            "\"pending\""
        );
        assert_eq!(
            serde_json::to_string(&ReceiptStatus::Processed).unwrap(),
            "\"processed\""
        );
    }

    #[test]
    fn test_has_extracted_data_all_fields_absent() {
        let doc = test_document(ReceiptStatus::Processed, ExtractedFields::default());
        assert!(!doc.has_extracted_data());
    }

    #[test]
    fn test_has_extracted_data_single_field_present() {
        let extracted = ExtractedFields {
            merchant_name: Some("Corner Bakery".to_string()),
            ..Default::default()
        };
        let doc = test_document(ReceiptStatus::Processed, extracted);
        assert!(doc.has_extracted_data());
    }

    #[test]
    fn test_display_name_prefers_override() {
        let mut doc = test_document(ReceiptStatus::Pending, ExtractedFields::default());
        assert_eq!(doc.display_name(), "groceries.pdf");
        doc.file_display_name = Some("Weekly groceries".to_string());
        assert_eq!(doc.display_name(), "Weekly groceries");
    }

    #[test]
    fn test_file_upload_validates_name() {
        use validator::Validate;

        let upload = FileUpload::new("", "application/pdf", vec![1, 2, 3]);
        assert!(upload.validate().is_err());

        let upload = FileUpload::new("receipt.pdf", "application/pdf", vec![1, 2, 3]);
        assert!(upload.validate().is_ok());
        assert_eq!(upload.size(), 3);
    }
}
