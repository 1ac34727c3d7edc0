use trellis_core::ServerEvent;

use crate::create_dispatcher;
use crate::utils::TestPeer;

#[tokio::test]
async fn test_remaining_pair_keeps_talking_after_a_departure() {
    let dispatcher = create_dispatcher();

    let mut alice = TestPeer::attach(&dispatcher);
    let mut bob = TestPeer::attach(&dispatcher);
    let mut carol = TestPeer::attach(&dispatcher);

    alice.join(&dispatcher, "lobby", "alice");
    bob.join(&dispatcher, "lobby", "bob");
    carol.join(&dispatcher, "lobby", "carol");
    alice.drain();
    bob.drain();
    carol.drain();

    alice.disconnect(&dispatcher);
    bob.drain();
    carol.drain();

    bob.send_chat(&dispatcher, "lobby", "bob", "still here");

    assert_eq!(bob.drain().len(), 1);
    assert_eq!(carol.drain().len(), 1);
    assert!(alice.drain().is_empty());
}

/// A room that emptied is gone without a trace; the next arrival starts
/// it fresh and is introduced to nobody.
#[tokio::test]
async fn test_join_after_room_emptied_sees_nobody() {
    let dispatcher = create_dispatcher();

    let mut alice = TestPeer::attach(&dispatcher);
    alice.join(&dispatcher, "r1", "alice");
    alice.disconnect(&dispatcher);

    let mut bob = TestPeer::attach(&dispatcher);
    bob.join(&dispatcher, "r1", "bob");

    assert!(bob.drain().is_empty());
    assert_eq!(dispatcher.registry().members(&"r1".into()).len(), 1);
}

#[tokio::test]
async fn test_departure_from_one_room_leaves_the_other_membership_intact() {
    let dispatcher = create_dispatcher();

    let mut alice = TestPeer::attach(&dispatcher);
    let mut bob = TestPeer::attach(&dispatcher);

    alice.join(&dispatcher, "r1", "alice");
    alice.join(&dispatcher, "r2", "alice");
    bob.join(&dispatcher, "r1", "bob");
    bob.join(&dispatcher, "r2", "bob");
    alice.drain();
    bob.drain();

    bob.disconnect(&dispatcher);

    // One peer-left per shared room.
    let lefts: Vec<ServerEvent> = alice
        .drain()
        .into_iter()
        .filter(|event| matches!(event, ServerEvent::PeerLeft { .. }))
        .collect();
    assert_eq!(lefts.len(), 2);

    assert_eq!(dispatcher.registry().members(&"r1".into()).len(), 1);
    assert_eq!(dispatcher.registry().members(&"r2".into()).len(), 1);
}
