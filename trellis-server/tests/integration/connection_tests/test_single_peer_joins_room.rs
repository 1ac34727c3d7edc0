use trellis_core::ServerEvent;

use crate::create_dispatcher;
use crate::utils::TestPeer;

#[tokio::test]
async fn test_single_peer_joins_empty_room() {
    let dispatcher = create_dispatcher();

    let mut alice = TestPeer::attach(&dispatcher);
    alice.join(&dispatcher, "lobby", "alice");

    // Nobody was there before her, so nothing is delivered.
    assert!(alice.drain().is_empty());
    assert_eq!(dispatcher.registry().room_count(), 1);
}

#[tokio::test]
async fn test_second_peer_triggers_one_introduction_each_way() {
    let dispatcher = create_dispatcher();

    let mut alice = TestPeer::attach(&dispatcher);
    let mut bob = TestPeer::attach(&dispatcher);

    alice.join(&dispatcher, "lobby", "alice");
    bob.join(&dispatcher, "lobby", "bob");

    // The member already present initiates toward the newcomer.
    let to_alice = alice.peer_joined_events();
    assert_eq!(
        to_alice,
        vec![(bob.connection, "bob".to_string(), true)]
    );

    // The newcomer answers.
    let to_bob = bob.peer_joined_events();
    assert_eq!(
        to_bob,
        vec![(alice.connection, "alice".to_string(), false)]
    );
}

#[tokio::test]
async fn test_join_with_empty_room_id_is_rejected() {
    let dispatcher = create_dispatcher();

    let mut alice = TestPeer::attach(&dispatcher);
    alice.join(&dispatcher, "", "alice");

    assert!(alice.drain().is_empty());
    assert_eq!(dispatcher.registry().room_count(), 0);
}

#[tokio::test]
async fn test_join_with_empty_display_name_is_rejected() {
    let dispatcher = create_dispatcher();

    let mut alice = TestPeer::attach(&dispatcher);
    alice.join(&dispatcher, "lobby", "");

    assert!(alice.drain().is_empty());
    assert_eq!(dispatcher.registry().room_count(), 0);
}

#[tokio::test]
async fn test_duplicate_join_does_not_reintroduce() {
    let dispatcher = create_dispatcher();

    let mut alice = TestPeer::attach(&dispatcher);
    let mut bob = TestPeer::attach(&dispatcher);

    alice.join(&dispatcher, "lobby", "alice");
    bob.join(&dispatcher, "lobby", "bob");
    alice.drain();
    bob.drain();

    // Re-joining refreshes the entry without a second round of
    // peer-joined events for the same pair.
    bob.join(&dispatcher, "lobby", "bob");

    let repeat: Vec<ServerEvent> = alice
        .drain()
        .into_iter()
        .filter(|event| matches!(event, ServerEvent::PeerJoined { .. }))
        .collect();
    assert!(repeat.is_empty());
}
