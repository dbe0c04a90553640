// Support Domain - Entities

mod message;
mod mood_log_entry;
mod reply;
mod resource;
mod transcript_entry;

pub use message::*;
pub use mood_log_entry::*;
pub use reply::*;
pub use resource::*;
pub use transcript_entry::*;
