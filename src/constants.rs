//! Size caps and fixed TTLs pulled out of the component design so they aren't
//! scattered as magic numbers through the decoder and composer.

/// TTL stamped on every record synthesised from a resource (the wire format carries
/// no TTL field of its own).
pub const DEFAULT_TTL: u32 = 21600;

/// TTL used for anything rooted at the zone apex: root NS, glue for the root NS,
/// and the DS/NSEC/SOA records synthesised for the empty root zone.
pub const ROOT_TTL: u32 = 518400;

/// TTL for the synthetic root SOA and NSEC records.
pub const ROOT_SOA_TTL: u32 = 86400;

pub const SOA_REFRESH: u32 = 1800;
pub const SOA_RETRY: u32 = 900;
pub const SOA_EXPIRE: u32 = 604800;
pub const SOA_MINTTL: u32 = 86400;

/// Upper bound on the number of records a resource may carry.
pub const MAX_RECORDS: usize = 255;

/// Upper bound on any length-prefixed string field.
pub const MAX_STRING_LEN: usize = 255;

/// Upper bound on digest/fingerprint/certificate fields (DS, SSHFP, TLS, PGP, ADDR).
pub const MAX_DIGEST_LEN: usize = 64;

/// Upper bound on an emitted URI RR's data field.
pub const MAX_URI_LEN: usize = 255;

/// Upper bound on a MAGNET NIN field.
pub const MAX_MAGNET_NIN_LEN: usize = 64;

/// The 9-byte NSEC type bitmap window declaring NS, SOA, RRSIG, NSEC, DNSKEY, used
/// for the empty proof synthesised at the root and at referral cuts.
pub const ROOT_NSEC_TYPE_BITMAP: [u8; 9] = [0x00, 0x07, 0x22, 0x00, 0x00, 0x00, 0x00, 0x03, 0x80];
