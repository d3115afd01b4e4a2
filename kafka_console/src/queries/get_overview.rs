mod handler;
mod request;
mod response;

pub use handler::*;
pub use request::*;
pub use response::*;
