mod identity;
mod x509;

pub use identity::SigningIdentity;
pub use x509::X509Identity;
