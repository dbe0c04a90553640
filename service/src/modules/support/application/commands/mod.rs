// Commands - 命令处理器

mod process_message;

pub use process_message::*;
