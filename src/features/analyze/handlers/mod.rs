pub mod analyze_handler;

pub use analyze_handler::{__path_analyze_image, analyze_image};
