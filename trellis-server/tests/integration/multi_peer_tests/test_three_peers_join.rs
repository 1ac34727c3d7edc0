use crate::create_dispatcher;
use crate::utils::TestPeer;

/// Three joins introduce exactly the three unordered pairs, each once,
/// with the longer-tenured side initiating.
#[tokio::test]
async fn test_three_peers_full_mesh_introductions() {
    let dispatcher = create_dispatcher();

    let mut alice = TestPeer::attach(&dispatcher);
    let mut bob = TestPeer::attach(&dispatcher);
    let mut carol = TestPeer::attach(&dispatcher);

    alice.join(&dispatcher, "lobby", "alice");
    bob.join(&dispatcher, "lobby", "bob");
    carol.join(&dispatcher, "lobby", "carol");

    // alice was present for both later arrivals: initiator twice.
    let to_alice = alice.peer_joined_events();
    assert_eq!(
        to_alice,
        vec![
            (bob.connection, "bob".to_string(), true),
            (carol.connection, "carol".to_string(), true),
        ]
    );

    // bob answered alice, then initiated toward carol.
    let to_bob = bob.peer_joined_events();
    assert_eq!(
        to_bob,
        vec![
            (alice.connection, "alice".to_string(), false),
            (carol.connection, "carol".to_string(), true),
        ]
    );

    // carol arrived last: responder toward both.
    let mut to_carol = carol.peer_joined_events();
    to_carol.sort_by(|x, y| x.1.cmp(&y.1));
    assert_eq!(
        to_carol,
        vec![
            (alice.connection, "alice".to_string(), false),
            (bob.connection, "bob".to_string(), false),
        ]
    );
}

#[tokio::test]
async fn test_one_connection_in_two_rooms_is_introduced_in_both() {
    let dispatcher = create_dispatcher();

    let mut alice = TestPeer::attach(&dispatcher);
    let mut bob = TestPeer::attach(&dispatcher);
    let mut carol = TestPeer::attach(&dispatcher);

    bob.join(&dispatcher, "r1", "bob");
    carol.join(&dispatcher, "r2", "carol");

    alice.join(&dispatcher, "r1", "alice");
    alice.join(&dispatcher, "r2", "alice");

    assert_eq!(
        alice.peer_joined_events(),
        vec![
            (bob.connection, "bob".to_string(), false),
            (carol.connection, "carol".to_string(), false),
        ]
    );
    assert_eq!(
        bob.peer_joined_events(),
        vec![(alice.connection, "alice".to_string(), true)]
    );
    assert_eq!(
        carol.peer_joined_events(),
        vec![(alice.connection, "alice".to_string(), true)]
    );
}
