mod api;
mod parse;
pub mod prompts;

pub use api::{LlmApiClient, MISSING_API_KEY};
pub use parse::{parse_explanation, strip_code_fences};
