use trellis_client::SessionEvent;

use crate::create_dispatcher;
use crate::utils::TestEndpoint;

/// Full offer/answer exchange through the relay with scripted media on
/// both ends: the tenured member initiates, the newcomer answers, both
/// reach a settled link.
#[tokio::test]
async fn test_two_party_call_reaches_stable() {
    let dispatcher = create_dispatcher();

    let mut alice = TestEndpoint::join(&dispatcher, "call", "alice").await;
    let mut bob = TestEndpoint::join(&dispatcher, "call", "bob").await;

    // alice hears about bob and opens with an offer.
    alice.pump().await;
    // bob learns of alice, then answers the relayed offer.
    bob.pump().await;
    // alice applies the relayed answer.
    alice.pump().await;

    let alice_link = alice
        .factory
        .link_to(bob.session.connection())
        .expect("alice link toward bob");
    assert_eq!(alice_link.calls(), vec!["create_offer", "accept_answer"]);

    let bob_link = bob
        .factory
        .link_to(alice.session.connection())
        .expect("bob link toward alice");
    assert_eq!(bob_link.calls(), vec!["accept_offer"]);

    assert!(matches!(
        alice.session_events()[..],
        [SessionEvent::PeerUp { ref display_name, .. }] if display_name == "bob"
    ));
    assert!(matches!(
        bob.session_events()[..],
        [SessionEvent::PeerUp { ref display_name, .. }] if display_name == "alice"
    ));
}

#[tokio::test]
async fn test_third_party_triggers_two_more_negotiations() {
    let dispatcher = create_dispatcher();

    let mut alice = TestEndpoint::join(&dispatcher, "call", "alice").await;
    let mut bob = TestEndpoint::join(&dispatcher, "call", "bob").await;

    alice.pump().await;
    bob.pump().await;
    alice.pump().await;

    let mut carol = TestEndpoint::join(&dispatcher, "call", "carol").await;
    // Both tenured members initiate toward carol.
    alice.pump().await;
    bob.pump().await;
    // carol answers each of them.
    carol.pump().await;
    alice.pump().await;
    bob.pump().await;

    assert_eq!(
        alice
            .factory
            .link_to(carol.session.connection())
            .expect("alice link toward carol")
            .calls(),
        vec!["create_offer", "accept_answer"]
    );
    assert_eq!(
        bob.factory
            .link_to(carol.session.connection())
            .expect("bob link toward carol")
            .calls(),
        vec!["create_offer", "accept_answer"]
    );
    assert_eq!(carol.session.link_count(), 2);
}
