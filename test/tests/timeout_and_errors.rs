// Failure paths: timeouts when frames never arrive, hard send failures, and
// the precedence rules between late packets and already-terminal requests.

use heliograph_test::{capture_response, count_fires, deliver_all, spawn_session, LocalHub};

use heliograph_shared::{
    encode_single_packet, SyncError, SyncOptions, SyncStatus, SINGLE_PREFIX,
};

fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn dropped_frames_lead_to_timeout_on_every_client() {
    init_logs();
    let hub = LocalHub::new();
    let mut clients = spawn_session(&hub, &[0, 1]);
    hub.drop_frames(true);

    let mut slots = Vec::new();
    for client in clients.iter_mut() {
        let id = client
            .manager
            .create(0, b"lost", SyncOptions { timeout: 2.0 }, 5.0)
            .unwrap();
        let (slot, callback) = capture_response();
        client.manager.on_error(id, callback);
        slots.push(slot);
    }

    deliver_all(&hub, &mut clients, 5.1);

    // not yet due
    for client in clients.iter_mut() {
        client.manager.tick(6.9);
    }
    for slot in &slots {
        assert!(slot.borrow().is_none());
    }

    // the deadline passes on the logical clock
    for client in clients.iter_mut() {
        client.manager.tick(7.0);
    }
    for slot in &slots {
        let response = slot.borrow_mut().take().expect("timeout surfaced");
        assert_eq!(response.status, SyncStatus::Timeout);
        assert!(response.data.is_empty());
        assert!((response.time - 2.0).abs() < 1e-3);
    }
    for client in &clients {
        assert_eq!(client.manager.live_requests(), 0);
    }
}

#[test]
fn late_packet_cannot_flip_a_timed_out_request() {
    let hub = LocalHub::new();
    let mut clients = spawn_session(&hub, &[0, 1]);

    let id = clients[1]
        .manager
        .create(0, b"x", SyncOptions { timeout: 1.0 }, 0.0)
        .unwrap();
    let (successes, success_callback) = count_fires();
    clients[1].manager.on_response(id, success_callback);
    let (errors, error_callback) = count_fires();
    clients[1].manager.on_error(id, error_callback);

    clients[1].manager.tick(1.5);
    assert_eq!(*errors.borrow(), 1);

    // the payload finally shows up, too late: the id is gone, the frame is
    // discarded, and no success callback fires
    let frame = encode_single_packet(id, b"x").unwrap();
    clients[1]
        .manager
        .receive_broadcast(0, SINGLE_PREFIX, &frame, 1.6);

    assert_eq!(*successes.borrow(), 0);
    assert_eq!(*errors.borrow(), 1);
}

#[test]
fn send_failure_resolves_to_network_error() {
    let hub = LocalHub::new();
    let mut clients = spawn_session(&hub, &[0, 1]);
    hub.fail_sends(true);

    let id = clients[0]
        .manager
        .create(0, b"unsendable", SyncOptions::default(), 0.0)
        .unwrap();
    assert_eq!(clients[0].manager.status(id), Some(SyncStatus::NetworkError));

    let (slot, callback) = capture_response();
    clients[0].manager.on_error(id, callback);
    let response = slot.borrow_mut().take().expect("network error surfaced");
    assert_eq!(response.status, SyncStatus::NetworkError);

    // the receiving side saw nothing and just keeps waiting
    let receiver_id = clients[1]
        .manager
        .create(0, b"unsendable", SyncOptions::default(), 0.0)
        .unwrap();
    assert_eq!(
        clients[1].manager.status(receiver_id),
        Some(SyncStatus::Syncing)
    );
}

#[test]
fn unclaimed_network_error_is_swept_by_ticks() {
    let hub = LocalHub::new();
    let mut clients = spawn_session(&hub, &[0]);
    hub.fail_sends(true);

    clients[0]
        .manager
        .create(0, b"nobody listens", SyncOptions::default(), 0.0)
        .unwrap();
    assert_eq!(clients[0].manager.live_requests(), 1);

    clients[0].manager.tick(0.1);
    clients[0].manager.tick(0.2);
    assert_eq!(clients[0].manager.live_requests(), 0);
}

#[test]
fn create_argument_validation() {
    let hub = LocalHub::new();
    let mut clients = spawn_session(&hub, &[0, 1]);
    let manager = &mut clients[0].manager;

    assert_eq!(
        manager.create(0, b"", SyncOptions::default(), 0.0),
        Err(SyncError::EmptyPayload)
    );
    assert_eq!(
        manager.create(0, b"x", SyncOptions { timeout: -0.5 }, 0.0),
        Err(SyncError::NegativeTimeout { seconds: -0.5 })
    );
    assert_eq!(
        manager.create(7, b"x", SyncOptions::default(), 0.0),
        Err(SyncError::UnknownOriginator { originator: 7 })
    );

    // nothing was registered or transmitted by the failed calls
    assert_eq!(manager.live_requests(), 0);
    assert!(hub.drain().is_empty());
}

#[test]
fn success_before_deadline_beats_the_timeout() {
    let hub = LocalHub::new();
    let mut clients = spawn_session(&hub, &[0, 1]);

    let mut ids = Vec::new();
    for client in clients.iter_mut() {
        ids.push(
            client
                .manager
                .create(0, b"in time", SyncOptions { timeout: 5.0 }, 0.0)
                .unwrap(),
        );
    }
    let (errors, error_callback) = count_fires();
    clients[1].manager.on_error(ids[1], error_callback);
    let (successes, success_callback) = count_fires();
    clients[1].manager.on_response(ids[1], success_callback);

    deliver_all(&hub, &mut clients, 1.0);

    // ticks far past the original deadline change nothing
    for client in clients.iter_mut() {
        client.manager.tick(100.0);
        client.manager.tick(200.0);
    }

    assert_eq!(*successes.borrow(), 1);
    assert_eq!(*errors.borrow(), 0);
}
