//! Validation utilities for upload entry points

use validator::Validate;

use crate::error::AppError;
use crate::models::FileUpload;

/// Whether a file is acceptable as a receipt: the declared MIME type must be
/// `application/pdf`, with a case-insensitive `.pdf` filename suffix accepted
/// as fallback for browsers and shells that report no type.
pub fn is_pdf(name: &str, mimetype: &str) -> bool {
    mimetype.eq_ignore_ascii_case("application/pdf") || name.to_lowercase().ends_with(".pdf")
}

/// Validate declared file metadata before any storage call is made.
pub fn validate_file_metadata(file: &FileUpload) -> Result<(), AppError> {
    file.validate()?;

    if !is_pdf(&file.name, &file.mimetype) {
        return Err(AppError::Validation(
            "Please upload only PDF files".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_pdf_by_mimetype() {
        assert!(is_pdf("scan.bin", "application/pdf"));
        assert!(is_pdf("scan.bin", "APPLICATION/PDF"));
    }

    #[test]
    fn test_is_pdf_by_suffix_fallback() {
        assert!(is_pdf("receipt.pdf", "application/octet-stream"));
        assert!(is_pdf("RECEIPT.PDF", ""));
    }

    #[test]
    fn test_is_pdf_rejects_other_types() {
        assert!(!is_pdf("photo.png", "image/png"));
        assert!(!is_pdf("notes.txt", "text/plain"));
        assert!(!is_pdf("archive.pdf.zip", "application/zip"));
    }

    #[test]
    fn test_validate_file_metadata_rejects_non_pdf() {
        let file = FileUpload::new("photo.png", "image/png", vec![0u8; 4]);
        let err = validate_file_metadata(&file).unwrap_err();
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
    }

    #[test]
    fn test_validate_file_metadata_rejects_empty_name() {
        let file = FileUpload::new("", "application/pdf", vec![0u8; 4]);
        assert!(validate_file_metadata(&file).is_err());
    }

    #[test]
    fn test_validate_file_metadata_accepts_pdf() {
        let file = FileUpload::new("receipt.pdf", "application/pdf", vec![0u8; 4]);
        assert!(validate_file_metadata(&file).is_ok());
    }
}
