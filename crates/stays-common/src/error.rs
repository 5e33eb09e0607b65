/// Error types shared across the stays crates.
///
/// Upstream call failures are reported through [`crate::liteapi::LiteApiError`]; this enum
/// covers setup problems that should stop the process before it serves traffic.
/// Binary crates wrap `CommonError` via `#[from]`.

#[derive(Debug, thiserror::Error)]
pub enum CommonError {
    #[error("config error: {0}")]
    Config(String),
}
