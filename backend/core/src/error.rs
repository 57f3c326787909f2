use thiserror::Error;

/// Top-level error type for the mdlift tool.
#[derive(Debug, Error)]
pub enum LiftError {
    /// The referenced image resolves to no file on disk. The message text is
    /// what the host pipeline surfaces to users, so it stays in its locale.
    #[error("图片文件不存在: {0}")]
    MissingImage(String),

    #[error("ZHIPUAI_API_KEY is not set")]
    MissingCredential,

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
