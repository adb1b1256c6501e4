pub mod collector;
pub mod inspector;

pub use collector::{collect, ExpirationRecord, ExpirationSnapshot};
pub use inspector::{leaf_expiration, CertificateInspector, InspectError, TlsInspector};
