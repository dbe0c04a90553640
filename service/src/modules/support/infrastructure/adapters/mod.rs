// Support Infrastructure - Adapters
// 能力提供方端口的具体实现

pub mod classifier;
pub mod generator;
pub mod random;
pub mod translator;

pub use classifier::{HttpSentimentClassifier, KeywordSentimentClassifier};
pub use generator::{CatalogOnlyGenerator, OpenAiResponseGenerator};
pub use random::{SeededRandom, ThreadRandom};
pub use translator::HttpTranslator;
