//! Buffers a multipart request into a file part plus plain text fields.

use std::collections::HashMap;

use axum::extract::Multipart;
use bytes::Bytes;

use crate::errors::AppError;

/// Multipart part name carrying the résumé.
pub const FILE_FIELD: &str = "file";

#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

impl UploadedFile {
    /// Media type without parameters, lowercased (`Application/PDF; x=y` → `application/pdf`).
    pub fn media_type(&self) -> Option<String> {
        self.content_type
            .as_deref()
            .and_then(|ct| ct.split(';').next())
            .map(|ct| ct.trim().to_ascii_lowercase())
            .filter(|ct| !ct.is_empty())
    }
}

#[derive(Debug, Clone, Default)]
pub struct UploadForm {
    pub file: Option<UploadedFile>,
    pub fields: HashMap<String, String>,
}

impl UploadForm {
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

/// Reads every part of the request. Parts other than `file` are read as UTF-8 text.
pub async fn read_upload(mut multipart: Multipart) -> Result<UploadForm, AppError> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart.next_field().await.map_err(malformed)? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        if name == FILE_FIELD {
            let file_name = field.file_name().map(str::to_string);
            let content_type = field.content_type().map(str::to_string);
            let bytes = field.bytes().await.map_err(malformed)?;
            form.file = Some(UploadedFile {
                file_name,
                content_type,
                bytes,
            });
        } else {
            let value = field.text().await.map_err(malformed)?;
            form.fields.insert(name, value);
        }
    }

    Ok(form)
}

fn malformed(e: axum::extract::multipart::MultipartError) -> AppError {
    AppError::InvalidInput(format!("Malformed multipart body: {}", e.body_text()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file_with(content_type: Option<&str>) -> UploadedFile {
        UploadedFile {
            file_name: Some("resume.pdf".to_string()),
            content_type: content_type.map(str::to_string),
            bytes: Bytes::new(),
        }
    }

    #[test]
    fn test_media_type_strips_parameters_and_case() {
        assert_eq!(
            file_with(Some("Application/PDF; charset=binary")).media_type(),
            Some("application/pdf".to_string())
        );
    }

    #[test]
    fn test_media_type_missing_or_blank() {
        assert_eq!(file_with(None).media_type(), None);
        assert_eq!(file_with(Some("  ")).media_type(), None);
    }

    #[test]
    fn test_field_lookup() {
        let mut form = UploadForm::default();
        form.fields
            .insert("tech_stack".to_string(), "Rust".to_string());
        assert_eq!(form.field("tech_stack"), Some("Rust"));
        assert_eq!(form.field("difficulty"), None);
    }
}
