pub mod comment;
pub mod thread_lines;
