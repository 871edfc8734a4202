/// Recursive working tree enumeration with dotfile and ignore filtering.
pub mod tree;

pub use tree::{enumerate_files, is_dotfile_path, relative_slash_path};
