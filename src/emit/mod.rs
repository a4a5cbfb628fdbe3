mod json;

pub use json::{HitOutput, SearchOutput};
