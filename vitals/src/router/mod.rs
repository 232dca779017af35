pub mod fetch;
pub mod summary;
pub mod trend;

pub mod util;
