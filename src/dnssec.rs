//! DNSSEC signing is injected rather than reached for as a global: the composer
//! takes `&dyn DnssecSigner` and calls back into it at the points the response
//! composition rules name (KSK over DNSKEY, ZSK over everything else). This keeps
//! the "no mutable global state" rule from the concurrency model while still
//! letting callers swap in real key material without touching this crate.
use crate::message::{RData, Rr};
use crate::rfc1035::QType;

/// Read-only DNSSEC key material and RRSIG generation, supplied by the caller.
/// Implementations are expected to be cheap to clone/share (e.g. an `Arc` around
/// a loaded keyset) since every composed message borrows one.
pub trait DnssecSigner {
    /// The Key-Signing Key as a DNSKEY RR owned by `owner`.
    fn ksk_rr(&self, owner: &str, ttl: u32) -> Rr;

    /// The Zone-Signing Key as a DNSKEY RR owned by `owner`.
    fn zsk_rr(&self, owner: &str, ttl: u32) -> Rr;

    /// The Delegation Signer record for this zone, owned by `owner`.
    fn ds_rr(&self, owner: &str, ttl: u32) -> Rr;

    /// Signs `rrset` (a non-empty slice of RRs sharing owner/type/class) with the
    /// ZSK, returning the RRSIG covering it.
    fn sign_with_zsk(&self, rrset: &[Rr]) -> Rr;

    /// Signs `rrset` with the KSK. Used only over the DNSKEY RRset.
    fn sign_with_ksk(&self, rrset: &[Rr]) -> Rr;
}

fn rrsig_for(rrset: &[Rr], algorithm: u8, signer_name: &str, key_tag: u16) -> Rr {
    let first = rrset.first().expect("signing an empty rrset");
    Rr::new(
        first.name.clone(),
        QType::RRSIG,
        first.ttl,
        RData::Rrsig {
            type_covered: first.rtype,
            algorithm,
            labels: first.name.trim_end_matches('.').matches('.').count() as u8 + 1,
            original_ttl: first.ttl,
            expiration: 0,
            inception: 0,
            key_tag,
            signer_name: signer_name.to_string(),
            signature: Vec::new(),
        },
    )
}

/// A deterministic, non-cryptographic signer for tests and local development: it
/// fabricates fixed key material and an empty-signature RRSIG shaped correctly for
/// assertions on the surrounding message, not on signature validity.
pub mod testing {
    use super::*;

    pub struct FixedSigner {
        pub zone: String,
    }

    impl FixedSigner {
        pub fn new(zone: impl Into<String>) -> Self {
            FixedSigner { zone: zone.into() }
        }
    }

    impl DnssecSigner for FixedSigner {
        fn ksk_rr(&self, owner: &str, ttl: u32) -> Rr {
            Rr::new(
                owner,
                QType::DNSKEY,
                ttl,
                RData::Dnskey {
                    flags: 257,
                    protocol: 3,
                    algorithm: 13,
                    public_key: vec![0u8; 32],
                },
            )
        }

        fn zsk_rr(&self, owner: &str, ttl: u32) -> Rr {
            Rr::new(
                owner,
                QType::DNSKEY,
                ttl,
                RData::Dnskey {
                    flags: 256,
                    protocol: 3,
                    algorithm: 13,
                    public_key: vec![1u8; 32],
                },
            )
        }

        fn ds_rr(&self, owner: &str, ttl: u32) -> Rr {
            Rr::new(
                owner,
                QType::DS,
                ttl,
                RData::Ds {
                    key_tag: 0,
                    algorithm: 13,
                    digest_type: 2,
                    digest: vec![0u8; 32],
                },
            )
        }

        fn sign_with_zsk(&self, rrset: &[Rr]) -> Rr {
            rrsig_for(rrset, 13, &self.zone, 1)
        }

        fn sign_with_ksk(&self, rrset: &[Rr]) -> Rr {
            rrsig_for(rrset, 13, &self.zone, 2)
        }
    }
}
