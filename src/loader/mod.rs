pub mod dates;
pub mod reader;
pub mod records;

pub use reader::load;
