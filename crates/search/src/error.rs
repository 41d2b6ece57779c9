use stackbot_engine::SearchError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SelectorError {
    #[error(transparent)]
    Search(#[from] SearchError),
    #[cfg(feature = "rayon")]
    #[error("failed to build worker pool: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),
}
