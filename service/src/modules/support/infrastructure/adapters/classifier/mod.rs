// Sentiment Classifier Adapters

mod http;
mod keyword;

pub use http::*;
pub use keyword::*;
