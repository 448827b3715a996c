//! Lifecycle Contract Tests
//!
//! Pins the approval state machine the harness verifies against the server:
//! a strict linear chain with exactly four legal transitions, a terminal
//! `locked` status, and the status-to-category mapping used by list filters
//! and stats buckets. Pure invariants, no server involved.

use ah_smoke::lifecycle::{approval_chain, skip_targets};
use ah_smoke::{ContractStatus, StatusCategory};

#[test]
fn contract_chain_is_exactly_the_four_consecutive_pairs() {
    let chain = approval_chain();
    assert_eq!(chain.len(), 4);

    let pairs: Vec<(ContractStatus, ContractStatus)> =
        chain.iter().map(|(from, to, _)| (*from, *to)).collect();
    assert_eq!(
        pairs,
        vec![
            (ContractStatus::Created, ContractStatus::Approved),
            (ContractStatus::Approved, ContractStatus::Sent),
            (ContractStatus::Sent, ContractStatus::Signed),
            (ContractStatus::Signed, ContractStatus::Locked),
        ]
    );

    // The chain is connected: each transition starts where the previous ended
    for window in pairs.windows(2) {
        assert_eq!(window[0].1, window[1].0);
    }
}

#[test]
fn contract_every_non_consecutive_transition_is_refused() {
    for from in ContractStatus::ALL {
        for to in ContractStatus::ALL {
            let allowed = from.allows(to);
            assert_eq!(
                allowed,
                from.next() == Some(to),
                "{} -> {} must be allowed iff consecutive",
                from,
                to
            );
        }
    }
}

#[test]
fn contract_backward_transitions_are_refused() {
    let order = ContractStatus::ALL;
    for (i, from) in order.iter().enumerate() {
        for to in &order[..i] {
            assert!(!from.allows(*to), "{} -> {} must be refused", from, to);
        }
    }
}

#[test]
fn contract_locked_is_the_only_terminal_status() {
    for status in ContractStatus::ALL {
        assert_eq!(status.is_terminal(), status == ContractStatus::Locked);
    }
}

#[test]
fn contract_skip_targets_are_the_later_stages() {
    assert_eq!(
        skip_targets().to_vec(),
        vec![
            ContractStatus::Sent,
            ContractStatus::Signed,
            ContractStatus::Locked
        ]
    );
    // None of them is the legal successor of `created`
    for target in skip_targets() {
        assert_ne!(ContractStatus::Created.next(), Some(target));
    }
}

#[test]
fn contract_category_partition_is_total() {
    assert_eq!(ContractStatus::Created.category(), StatusCategory::Pending);
    assert_eq!(ContractStatus::Approved.category(), StatusCategory::Pending);
    assert_eq!(ContractStatus::Sent.category(), StatusCategory::Active);
    assert_eq!(ContractStatus::Signed.category(), StatusCategory::Signed);
    assert_eq!(ContractStatus::Locked.category(), StatusCategory::Signed);
}

#[test]
fn contract_wire_names_are_lowercase() {
    for status in ContractStatus::ALL {
        let wire = status.as_str();
        assert_eq!(wire, wire.to_lowercase());
        assert_eq!(ContractStatus::parse(wire), Some(status));
    }
    assert_eq!(ContractStatus::parse("LOCKED"), None);
    assert_eq!(ContractStatus::parse("revoked"), None);
}
