pub mod alert;
pub mod sample;
pub mod summary;

pub use alert::AlertRecord;
pub use sample::Sample;
pub use summary::RunSummary;
