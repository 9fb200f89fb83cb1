mod dashboard;
mod serve;

pub use dashboard::dashboard;
pub use serve::serve;
