//! The response composer (component F): decides between the answer, referral, and
//! empty-proof paths by inspecting the resource, then hands the assembled RRsets to
//! the injected DNSSEC signer.
use log::{debug, trace};

use crate::dnssec::DnssecSigner;
use crate::error::DNSResult;
use crate::message::{Message, RData, Rr};
use crate::projector;
use crate::resource::Resource;
use crate::rfc1035::QType;
use crate::root::root_soa_rr;
use crate::target::Name;

fn rrset_of(rrs: &[Rr], rtype: QType) -> Vec<Rr> {
    rrs.iter().filter(|rr| rr.rtype == rtype).cloned().collect()
}

/// Signs every RR of `rtype` found in `section` with the ZSK and appends the
/// resulting RRSIG to the same section. A no-op if the type isn't present.
fn sign_zsk(section: &mut Vec<Rr>, rtype: QType, signer: &dyn DnssecSigner) {
    let rrset = rrset_of(section, rtype);
    if !rrset.is_empty() {
        section.push(signer.sign_with_zsk(&rrset));
    }
}

/// Pushes an empty-proof NSEC for `owner` plus the root SOA into `authority`,
/// signing both with the ZSK. Used both for referral cuts with nothing to say and
/// for the apex fallback when a name has no NS, CNAME, or direct answer.
fn empty_proof(owner: &str, signer: &dyn DnssecSigner, authority: &mut Vec<Rr>) {
    authority.push(Rr::new(
        owner,
        QType::NSEC,
        crate::constants::ROOT_SOA_TTL,
        RData::Nsec {
            next: ".".to_string(),
            type_bitmap: Vec::new(),
        },
    ));
    sign_zsk(authority, QType::NSEC, signer);

    authority.push(root_soa_rr());
    sign_zsk(authority, QType::SOA, signer);
}

/// The referral path (§4.F step 3): a delegation cut, an explicit DNAME, or an
/// empty proof, depending on what the resource carries.
fn referral(
    resource: &Resource,
    query_name: &Name,
    signer: &dyn DnssecSigner,
    msg: &mut Message,
) -> DNSResult<()> {
    let tld = query_name.last_label()?;
    let owner = format!("{}.", tld);

    if resource.has(9) {
        projector::project_ns(resource, &owner, &mut msg.authority)?;
        projector::project_ds(resource, &owner, &mut msg.authority);
        projector::project_nsip(resource, query_name, &mut msg.additional)?;

        if resource.has(16) {
            sign_zsk(&mut msg.authority, QType::DS, signer);
        } else {
            sign_zsk(&mut msg.authority, QType::NS, signer);
        }
    } else if resource.has(8) {
        projector::project_dname(resource, &owner, query_name, &mut msg.answer, &mut msg.additional)?;
        sign_zsk(&mut msg.answer, QType::DNAME, signer);
        sign_zsk(&mut msg.additional, QType::A, signer);
        sign_zsk(&mut msg.additional, QType::AAAA, signer);
    } else {
        empty_proof(&owner, signer, &mut msg.authority);
    }

    Ok(())
}

/// Builds the answer-section CNAME projection plus its glue, signing both. Shared
/// by the CNAME apex path and the fallback path.
fn cname_answer(resource: &Resource, query_name: &Name, signer: &dyn DnssecSigner, msg: &mut Message) -> DNSResult<()> {
    projector::project_cname(resource, &query_name.to_string(), query_name, &mut msg.answer, &mut msg.additional)?;
    sign_zsk(&mut msg.answer, QType::CNAME, signer);
    sign_zsk(&mut msg.additional, QType::A, signer);
    sign_zsk(&mut msg.additional, QType::AAAA, signer);
    Ok(())
}

/// Composes a response for `query_name`/`qtype` against a decoded resource. Returns
/// `None` only when `query_name` has zero labels (the root itself) — every other
/// input produces a message, possibly an empty proof.
pub fn to_dns(
    resource: &Resource,
    query_name: &str,
    qtype: QType,
    signer: &dyn DnssecSigner,
) -> DNSResult<Option<Message>> {
    let name = Name::new(query_name)?;
    let label_count = name.label_count();
    if label_count == 0 {
        return Ok(None);
    }

    let mut msg = Message::new(query_name, qtype);

    if label_count > 1 {
        debug!("composing referral for {}", query_name);
        referral(resource, &name, signer, &mut msg)?;
    } else {
        trace!("composing apex answer for {} type {:?}", query_name, qtype);
        let owner = query_name.to_string();

        match qtype {
            QType::A => {
                projector::project_a(resource, &owner, &mut msg.answer);
                sign_zsk(&mut msg.answer, QType::A, signer);
            }
            QType::AAAA => {
                projector::project_aaaa(resource, &owner, &mut msg.answer);
                sign_zsk(&mut msg.answer, QType::AAAA, signer);
            }
            QType::TXT => {
                projector::project_txt(resource, &owner, &mut msg.answer);
                sign_zsk(&mut msg.answer, QType::TXT, signer);
            }
            QType::LOC => {
                projector::project_loc(resource, &owner, &mut msg.answer);
                sign_zsk(&mut msg.answer, QType::LOC, signer);
            }
            QType::DS => {
                projector::project_ds(resource, &owner, &mut msg.answer);
                sign_zsk(&mut msg.answer, QType::DS, signer);
            }
            QType::SSHFP => {
                projector::project_sshfp(resource, &owner, &mut msg.answer);
                sign_zsk(&mut msg.answer, QType::SSHFP, signer);
            }
            QType::URI => {
                projector::project_uri(resource, &owner, &mut msg.answer);
                sign_zsk(&mut msg.answer, QType::URI, signer);
            }
            QType::RP => {
                projector::project_rp(resource, &owner, &mut msg.answer);
                sign_zsk(&mut msg.answer, QType::RP, signer);
            }
            QType::CNAME => {
                cname_answer(resource, &name, signer, &mut msg)?;
            }
            QType::DNAME => {
                projector::project_dname(resource, &owner, &name, &mut msg.answer, &mut msg.additional)?;
                sign_zsk(&mut msg.answer, QType::DNAME, signer);
                sign_zsk(&mut msg.additional, QType::A, signer);
                sign_zsk(&mut msg.additional, QType::AAAA, signer);
            }
            QType::NS => {
                projector::project_ns(resource, &owner, &mut msg.authority)?;
                projector::project_nsip(resource, &name, &mut msg.additional)?;
                sign_zsk(&mut msg.authority, QType::NS, signer);
            }
            QType::MX => {
                projector::project_mx(resource, &owner, &name, &mut msg.answer)?;
                projector::project_mxip(resource, &name, &mut msg.additional)?;
                sign_zsk(&mut msg.answer, QType::MX, signer);
            }
            _ => {}
        }
    }

    msg.refresh_aa_flag();

    if msg.answer.is_empty() && msg.authority.is_empty() {
        if resource.has(7) {
            cname_answer(resource, &name, signer, &mut msg)?;
            msg.refresh_aa_flag();
        } else if resource.has(9) {
            referral(resource, &name, signer, &mut msg)?;
        } else {
            let owner = name.last_label().map(|t| format!("{}.", t)).unwrap_or_else(|_| query_name.to_string());
            empty_proof(&owner, signer, &mut msg.authority);
        }
    }

    Ok(Some(msg))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dnssec::testing::FixedSigner;
    use crate::resource::Resource;

    /// Encodes a plain (uncompressed) wire name: length-prefixed labels
    /// terminated by a zero byte, for building test resource blobs by hand.
    fn encode_name(name: &str) -> Vec<u8> {
        let mut out = Vec::new();
        for label in name.trim_end_matches('.').split('.') {
            out.push(label.len() as u8);
            out.extend_from_slice(label.as_bytes());
        }
        out.push(0);
        out
    }

    #[test]
    fn apex_a_answer_is_signed_and_authoritative() {
        // version, record type=INET4(1), target type=INET4(0), 192.0.2.1
        let blob = [0x00u8, 0x01, 0x00, 192, 0, 2, 1];
        let resource = Resource::decode(&blob).unwrap();
        let signer = FixedSigner::new("example.");

        let msg = to_dns(&resource, "example.", QType::A, &signer).unwrap().unwrap();

        assert!(msg.authoritative);
        assert_eq!(msg.answer.len(), 2); // A + RRSIG
        assert!(matches!(msg.answer[0].rdata, RData::A(addr) if addr == std::net::Ipv4Addr::new(192, 0, 2, 1)));
        assert_eq!(msg.answer[0].name, "example.");
        assert_eq!(msg.answer[0].ttl, resource.ttl);
        assert!(msg.answer.iter().any(|rr| rr.rtype == QType::RRSIG));
    }

    #[test]
    fn referral_with_bare_ns_carries_no_glue() {
        let mut blob = vec![0x00u8, 0x09, 0x04]; // version, record type=NS(9), target type=NAME(4)
        blob.extend(encode_name("ns1.example."));
        let resource = Resource::decode(&blob).unwrap();
        let signer = FixedSigner::new("example.");

        let msg = to_dns(&resource, "sub.example.", QType::A, &signer).unwrap().unwrap();

        assert!(msg.answer.is_empty());
        assert!(!msg.authoritative);
        assert_eq!(msg.authority.iter().filter(|rr| rr.rtype == QType::NS).count(), 1);
        assert!(matches!(&msg.authority[0].rdata, RData::Ns(n) if n == "ns1.example."));
        assert!(msg.authority.iter().any(|rr| rr.rtype == QType::RRSIG));
        assert!(msg.additional.is_empty());
    }

    #[test]
    fn cname_only_resource_falls_back_to_cname_answer() {
        let mut blob = vec![0x00u8, 0x07, 0x04]; // version, record type=CANONICAL(7), target type=NAME(4)
        blob.extend(encode_name("alias.example."));
        let resource = Resource::decode(&blob).unwrap();
        let signer = FixedSigner::new("example.");

        let msg = to_dns(&resource, "example.", QType::A, &signer).unwrap().unwrap();

        assert!(msg.authoritative);
        assert_eq!(msg.answer.len(), 2); // CNAME + RRSIG
        assert!(matches!(&msg.answer[0].rdata, RData::Cname(n) if n == "alias.example."));
    }

    #[test]
    fn root_itself_composes_to_none() {
        let resource = Resource::decode(&[0x00]).unwrap();
        let signer = FixedSigner::new(".");
        assert!(to_dns(&resource, ".", QType::A, &signer).unwrap().is_none());
    }
}
