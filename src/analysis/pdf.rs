//! PDF analysis.
//!
//! Text is extracted only to prove the document parses; per-run font data is
//! not available from `pdf-extract`, so typography is a fixed record and no
//! colors are reported.

use tracing::{debug, error};

use crate::image_loader::decode_payload;
use crate::types::{AnalysisResult, TypographyStyle};
use crate::{Result, ScanError};

pub const PDF_PARSE_FAILURE: &str = "Failed to parse PDF";

pub fn placeholder_typography() -> TypographyStyle {
    TypographyStyle {
        element: "PDF Content Detect".to_string(),
        font_family: "Embedded Fonts".to_string(),
        font_weight: "Normal".to_string(),
        font_size: "N/A".to_string(),
        line_height: "Normal".to_string(),
        letter_spacing: "0".to_string(),
        text_transform: "None".to_string(),
        color: "Black".to_string(),
        background_color: "Transparent".to_string(),
    }
}

/// Analyze a data-URI or base64 PDF payload.
pub async fn analyze_pdf(payload: String) -> Result<AnalysisResult> {
    let bytes = decode_payload(&payload).map_err(|e| {
        error!("PDF payload decode error: {}", e);
        parse_failure()
    })?;
    analyze_pdf_bytes(bytes).await
}

/// Analyze raw PDF bytes; parsing runs on the blocking pool.
pub async fn analyze_pdf_bytes(bytes: Vec<u8>) -> Result<AnalysisResult> {
    let extracted =
        tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes)).await;

    match extracted {
        Ok(Ok(text)) => {
            debug!(chars = text.trim().chars().count(), "PDF text extracted");
            Ok(AnalysisResult {
                typography: vec![placeholder_typography()],
                colors: Vec::new(),
            })
        }
        Ok(Err(err)) => {
            error!("PDF parse error: {}", err);
            Err(parse_failure())
        }
        // pdf-extract panics on some malformed documents.
        Err(join_err) => {
            error!("PDF parser aborted: {}", join_err);
            Err(parse_failure())
        }
    }
}

fn parse_failure() -> ScanError {
    ScanError::Pdf(PDF_PARSE_FAILURE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholder_record_is_fixed() {
        let style = placeholder_typography();
        assert_eq!(style.element, "PDF Content Detect");
        assert_eq!(style.font_family, "Embedded Fonts");
        assert_eq!(style.letter_spacing, "0");
        assert_eq!(style.color, "Black");
        assert_eq!(style.background_color, "Transparent");
    }

    const REPORT_PDF: &[u8] = include_bytes!("../../tests/fixtures/quarterly-report.pdf");

    #[tokio::test]
    async fn valid_pdf_yields_placeholder_and_no_colors() {
        let result = analyze_pdf_bytes(REPORT_PDF.to_vec()).await.expect("parse pdf");
        assert_eq!(result.typography, vec![placeholder_typography()]);
        assert!(result.colors.is_empty());
    }

    #[tokio::test]
    async fn valid_pdf_data_uri_is_decoded_first() {
        use base64::Engine;
        let payload = format!(
            "data:application/pdf;base64,{}",
            base64::engine::general_purpose::STANDARD.encode(REPORT_PDF)
        );
        let result = analyze_pdf(payload).await.expect("parse pdf payload");
        assert_eq!(result.typography.len(), 1);
        assert_eq!(result.typography[0].element, "PDF Content Detect");
        assert!(result.colors.is_empty());
    }

    #[tokio::test]
    async fn non_pdf_bytes_fail_with_fixed_message() {
        let err = analyze_pdf_bytes(b"definitely not a pdf".to_vec())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), PDF_PARSE_FAILURE);
    }

    #[tokio::test]
    async fn undecodable_payload_fails_with_fixed_message() {
        let err = analyze_pdf("data:application/pdf;base64,***".to_string())
            .await
            .unwrap_err();
        assert!(matches!(err, ScanError::Pdf(_)));
        assert_eq!(err.to_string(), PDF_PARSE_FAILURE);
    }
}
