mod explanation;
mod image;

pub use explanation::*;
pub use image::*;
