pub mod client;
pub mod command;
pub mod connection;
pub mod error;
pub mod hashing;
pub mod input;
pub mod protocol;
pub mod render;
pub mod signing;

pub use client::{ViewClient, ViewResult};
pub use command::{ViewCommand, ViewOptions};
pub use connection::ConnectionConfig;
pub use error::ClientError;
pub use hashing::{HashProvider, HashSink, Sha256Hasher};
pub use input::resolve_input;
pub use render::render;
pub use signing::{SigningIdentity, X509Identity};
