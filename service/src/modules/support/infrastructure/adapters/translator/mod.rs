// Translator Adapters

mod http;

pub use http::*;
