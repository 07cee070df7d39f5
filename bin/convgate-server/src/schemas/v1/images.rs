use utoipa::ToSchema;

/// Multipart body of `POST /api/v1/images/convert`.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct ConvertImagesUpload {
    /// One or more images; repeat the part for each file.
    #[schema(value_type = Vec<String>, format = Binary)]
    pub files: Vec<Vec<u8>>,
    /// One of `jpeg` (or `jpg`), `png`, `webp`, `tiff`, `bmp`.
    #[schema(example = "webp")]
    pub target_format: String,
    /// Encoder quality for lossy formats, clamped to `1..=100`.
    #[schema(default = 80, minimum = 1, maximum = 100)]
    pub quality: Option<i64>,
}

/// Multipart body of `POST /api/v1/images/resize`.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct ResizeImageUpload {
    /// A `.jpg`, `.jpeg`, `.png` or `.webp` image.
    #[schema(value_type = String, format = Binary)]
    pub file: Vec<u8>,
    #[schema(minimum = 1)]
    pub width: u32,
    #[schema(minimum = 1)]
    pub height: u32,
}
