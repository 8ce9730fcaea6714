//! Decodes a compact binary name-record blob and synthesises DNSSEC-signed DNS
//! responses from it.
//!
//! The crate is split along the pipeline a query travels: [`resource`] decodes
//! the blob into typed records, [`resolve`] and [`projector`] turn those records
//! into RRs for a specific query name, and [`composer`]/[`root`] assemble the
//! three sections of a [`message::Message`] and hand them to an injected
//! [`dnssec::DnssecSigner`]. Encoding a `Message` onto the wire is the job of an
//! external DNS stack and is out of scope here.
pub mod composer;
pub mod constants;
pub mod dnssec;
pub mod error;
pub mod ip;
pub mod message;
pub mod projector;
pub mod record;
pub mod resolve;
pub mod resource;
pub mod rfc1035;
pub mod root;
pub mod target;
pub mod wire;

pub use composer::to_dns;
pub use dnssec::DnssecSigner;
pub use error::{DNSError, DNSResult};
pub use ip::is_pointer;
pub use message::{Message, RData, Rr};
pub use record::Record;
pub use resource::Resource;
pub use root::{notimp, nx, root, servfail};
pub use target::Target;
