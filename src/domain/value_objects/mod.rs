pub mod repository_url;

pub use repository_url::{RepositoryUrl, RepositoryUrlError, UrlKind};
