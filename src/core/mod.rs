pub mod explainer;
pub mod links;
pub mod parser;
pub mod prompt;

pub use crate::domain::model::{Explanation, FewShotExample};
pub use crate::domain::ports::{ChatCompletion, ConfigProvider, LinkVerifier};
pub use crate::utils::error::Result;
