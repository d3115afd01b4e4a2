mod console_error;
mod kafka_error_code;
mod protocol_error;
mod translate;

pub use console_error::*;
pub use kafka_error_code::*;
pub use protocol_error::*;
pub use translate::*;
