//! Input source implementations.

mod dotenv;
mod env;
mod file;
mod init;
mod input_source;
mod secrets;
mod stdin;

pub use dotenv::DotenvSource;
pub use env::EnvSource;
pub use file::FileSource;
pub use init::InitSource;
pub use input_source::{InputSource, SourceKind};
pub use secrets::SecretsDirSource;
pub use stdin::StdinSource;
