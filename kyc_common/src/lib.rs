mod env;
mod secret;

pub use env::{optional_env, parse_env_or, required_env, EnvError};
pub use secret::Secret;
