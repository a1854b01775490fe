mod url;

pub use url::validate_url;
