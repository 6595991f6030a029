/// Errors that can occur in the string-level rendering API.
///
/// The streaming parser itself is total — `feed`/`finish` cannot fail —
/// but [`render`](crate::render) promises `String` output and therefore
/// surfaces the UTF-8 conversion.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum RenderError {
    #[error("rendered HTML is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}
