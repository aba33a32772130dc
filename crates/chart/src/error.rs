use thiserror::Error;

/// Chart rendering failure.
#[derive(Debug, Error)]
pub enum ChartError {
    /// The plotting backend rejected a drawing operation.
    #[error("chart drawing failed: {0}")]
    Draw(String),
}

pub(crate) fn draw_err<E: std::fmt::Display>(err: E) -> ChartError {
    ChartError::Draw(err.to_string())
}
