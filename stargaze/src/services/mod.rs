mod explanations;
mod images;

pub use explanations::ExplanationService;
pub use images::ImageService;
