use utoipa::ToSchema;

/// Multipart body of `POST /api/v1/files/docx-to-pdf`.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct DocxUpload {
    /// A `.docx` document.
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
}
