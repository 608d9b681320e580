// Adapters layer: concrete implementations of the domain ports over HTTP.

pub mod link_checker;
pub mod openrouter;

pub use link_checker::HttpLinkVerifier;
pub use openrouter::OpenRouterClient;
