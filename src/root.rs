//! Root zone, NXDOMAIN, and error builders (component G). The root zone itself
//! carries no resource blob — these responses are synthesised directly rather
//! than projected from a decoded `Resource`.
use std::net::IpAddr;

use chrono::{Datelike, Timelike, Utc};

use crate::constants::{ROOT_NSEC_TYPE_BITMAP, ROOT_SOA_TTL, ROOT_TTL, SOA_EXPIRE, SOA_MINTTL, SOA_REFRESH, SOA_RETRY};
use crate::dnssec::DnssecSigner;
use crate::message::{Message, RData, Rr};
use crate::rfc1035::{QType, ResponseCode};

const ROOT: &str = ".";

/// Builds the synthetic root SOA, serial `YYYYMMDDHH` in UTC.
pub fn root_soa_rr() -> Rr {
    let now = Utc::now();
    let serial = now.year() as u32 * 1_000_000 + now.month() * 10_000 + now.day() * 100 + now.hour();
    Rr::new(
        ROOT,
        QType::SOA,
        ROOT_SOA_TTL,
        RData::Soa {
            mname: ROOT.to_string(),
            rname: ROOT.to_string(),
            serial,
            refresh: SOA_REFRESH,
            retry: SOA_RETRY,
            expire: SOA_EXPIRE,
            minimum: SOA_MINTTL,
        },
    )
}

fn root_ns_rr() -> Rr {
    Rr::new(ROOT, QType::NS, ROOT_TTL, RData::Ns(ROOT.to_string()))
}

fn root_address_rr(self_addr: Option<IpAddr>) -> Option<Rr> {
    match self_addr? {
        IpAddr::V4(v4) => Some(Rr::new(ROOT, QType::A, ROOT_TTL, RData::A(v4))),
        IpAddr::V6(v6) => Some(Rr::new(ROOT, QType::AAAA, ROOT_TTL, RData::Aaaa(v6))),
    }
}

fn sign_zsk_section(section: &mut Vec<Rr>, rtype: QType, signer: &dyn DnssecSigner) {
    let rrset: Vec<Rr> = section.iter().filter(|rr| rr.rtype == rtype).cloned().collect();
    if !rrset.is_empty() {
        section.push(signer.sign_with_zsk(&rrset));
    }
}

/// Composes a response for the empty root zone.
pub fn root(qtype: QType, self_addr: Option<IpAddr>, signer: &dyn DnssecSigner) -> Message {
    let mut msg = Message::new(ROOT, qtype);
    msg.authoritative = true;

    match qtype {
        QType::ANY | QType::NS => {
            msg.answer.push(root_ns_rr());
            if let Some(addr) = root_address_rr(self_addr) {
                msg.additional.push(addr);
            }
        }
        QType::SOA => {
            msg.answer.push(root_soa_rr());
            sign_zsk_section(&mut msg.answer, QType::SOA, signer);
            msg.authority.push(root_ns_rr());
            sign_zsk_section(&mut msg.authority, QType::NS, signer);
            if let Some(addr) = root_address_rr(self_addr) {
                let rtype = addr.rtype;
                msg.additional.push(addr);
                sign_zsk_section(&mut msg.additional, rtype, signer);
            }
        }
        QType::DNSKEY => {
            msg.answer.push(signer.ksk_rr(ROOT, ROOT_SOA_TTL));
            msg.answer.push(signer.zsk_rr(ROOT, ROOT_SOA_TTL));
            let rrset = msg.answer.clone();
            msg.answer.push(signer.sign_with_ksk(&rrset));
        }
        QType::DS => {
            msg.answer.push(signer.ds_rr(ROOT, ROOT_SOA_TTL));
            sign_zsk_section(&mut msg.answer, QType::DS, signer);
        }
        _ => {
            msg.authority.push(Rr::new(
                ROOT,
                QType::NSEC,
                ROOT_SOA_TTL,
                RData::Nsec {
                    next: ROOT.to_string(),
                    type_bitmap: ROOT_NSEC_TYPE_BITMAP.to_vec(),
                },
            ));
            sign_zsk_section(&mut msg.authority, QType::NSEC, signer);
            msg.authority.push(root_soa_rr());
            sign_zsk_section(&mut msg.authority, QType::SOA, signer);
        }
    }

    msg
}

/// NXDOMAIN for the root zone: two identical NSEC proofs (denial shaped to satisfy
/// strict validators expecting a closest-encloser and next-closer proof) plus the
/// signed root SOA.
pub fn nx(signer: &dyn DnssecSigner) -> Message {
    let mut msg = Message::new(ROOT, QType::A);
    msg.response_code = ResponseCode::NXDomain;
    msg.authoritative = true;

    let nsec = Rr::new(
        ROOT,
        QType::NSEC,
        ROOT_SOA_TTL,
        RData::Nsec {
            next: ROOT.to_string(),
            type_bitmap: ROOT_NSEC_TYPE_BITMAP.to_vec(),
        },
    );
    msg.authority.push(nsec.clone());
    msg.authority.push(nsec);
    sign_zsk_section(&mut msg.authority, QType::NSEC, signer);

    msg.authority.push(root_soa_rr());
    sign_zsk_section(&mut msg.authority, QType::SOA, signer);

    msg
}

pub fn servfail() -> Message {
    let mut msg = Message::new(ROOT, QType::A);
    msg.response_code = ResponseCode::ServFail;
    msg
}

pub fn notimp() -> Message {
    let mut msg = Message::new(ROOT, QType::A);
    msg.response_code = ResponseCode::NotImp;
    msg
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dnssec::testing::FixedSigner;

    #[test]
    fn root_soa_has_fixed_timers() {
        let rr = root_soa_rr();
        if let RData::Soa { refresh, retry, expire, minimum, .. } = rr.rdata {
            assert_eq!(refresh, SOA_REFRESH);
            assert_eq!(retry, SOA_RETRY);
            assert_eq!(expire, SOA_EXPIRE);
            assert_eq!(minimum, SOA_MINTTL);
        } else {
            panic!("expected SOA rdata");
        }
    }

    #[test]
    fn root_soa_query_includes_ns_and_address() {
        let signer = FixedSigner::new(".");
        let msg = root(QType::SOA, Some("198.51.100.9".parse().unwrap()), &signer);
        assert!(msg.authoritative);
        assert_eq!(msg.answer.len(), 2); // SOA + RRSIG
        assert_eq!(msg.authority.len(), 2); // NS + RRSIG
        assert_eq!(msg.additional.len(), 2); // A + RRSIG
        assert!(msg.answer.iter().any(|rr| rr.rtype == QType::RRSIG));
        assert!(msg.authority.iter().any(|rr| rr.rtype == QType::RRSIG));
        assert!(msg.additional.iter().any(|rr| rr.rtype == QType::RRSIG));
    }

    #[test]
    fn nx_has_double_nsec_and_signed_soa() {
        let signer = FixedSigner::new(".");
        let msg = nx(&signer);
        assert_eq!(msg.response_code, ResponseCode::NXDomain);
        let nsec_count = msg.authority.iter().filter(|rr| rr.rtype == QType::NSEC).count();
        assert_eq!(nsec_count, 2);
        assert!(msg.authority.iter().any(|rr| rr.rtype == QType::RRSIG));
        assert!(msg.authority.iter().any(|rr| rr.rtype == QType::SOA));
    }

    #[test]
    fn servfail_and_notimp_carry_no_sections() {
        assert!(servfail().answer.is_empty());
        assert_eq!(servfail().response_code, ResponseCode::ServFail);
        assert_eq!(notimp().response_code, ResponseCode::NotImp);
    }
}
