pub mod compression;
pub mod glob;
pub mod output;
pub mod source;

pub use source::{STDIN, Source};
