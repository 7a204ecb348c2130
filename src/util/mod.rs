pub mod paths;
pub mod sequence;

pub use paths::{expand_tilde, WorkingPaths};
pub use sequence::next_file_name;
