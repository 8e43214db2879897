pub mod signature;

pub use signature::{verify_github_signature, SignatureError};
