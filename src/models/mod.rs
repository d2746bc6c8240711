mod url;

pub use url::{CreateUrlRequest, ShortenedUrl};
