use thiserror::Error;

#[derive(Debug, Error)]
pub enum ListError {
    #[error("content error: {0}")]
    Content(#[from] listable_types::ContentError),

    #[error("diff error: {0}")]
    Diff(#[from] listable_diff::DiffError),

    #[error("state error: {0}")]
    State(#[from] listable_state::StateError),

    #[error("layout error: {0}")]
    Layout(#[from] listable_layout::LayoutError),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ListResult<T> = Result<T, ListError>;
