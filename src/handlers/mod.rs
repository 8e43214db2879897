pub mod webhook;

pub use webhook::github_webhook;
