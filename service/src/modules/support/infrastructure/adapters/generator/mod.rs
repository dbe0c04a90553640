// Response Generator Adapters

mod catalog_only;
mod openai;

pub use catalog_only::*;
pub use openai::*;
