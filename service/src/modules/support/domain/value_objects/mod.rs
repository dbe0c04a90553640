// Support Domain - Value Objects
// 值对象是不可变的，通过值而非标识来比较

mod locale;
mod mood_entry_id;
mod sentiment;
mod user_id;

pub use locale::*;
pub use mood_entry_id::*;
pub use sentiment::*;
pub use user_id::*;
