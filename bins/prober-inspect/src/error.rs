#[derive(Debug, thiserror::Error)]
pub enum InspectError {
    #[error("config ({context}): {detail}")]
    Config { context: &'static str, detail: String },

    #[error("no [[metrics]] configured in {0}")]
    NoMetrics(String),
}
