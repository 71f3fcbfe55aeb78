pub mod console;
pub mod log_file;
pub mod multi;

pub use console::ConsoleOutput;
pub use log_file::LogFileOutput;
pub use multi::MultiOutput;
