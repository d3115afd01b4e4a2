mod aggregator;
mod dispatcher;

pub use aggregator::*;
pub use dispatcher::*;
