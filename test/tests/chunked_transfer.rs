// Chunked transfers: payloads too large for one frame split into fragments
// that reassemble byte-for-byte on every client, whatever order they arrive
// in.

use heliograph_test::{capture_response, deliver_all, spawn_session, LocalHub};

use heliograph_shared::{
    encode_chunk_packet, fragment_count, fragments, SyncOptions, SyncStatus, CHUNK_PAYLOAD_LIMIT,
    CHUNK_PREFIX,
};

fn patterned_payload(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i * 31 % 257) as u8).collect()
}

#[test]
fn five_hundred_bytes_travel_as_three_fragments() {
    let hub = LocalHub::new();
    let mut clients = spawn_session(&hub, &[0, 1]);
    let payload = patterned_payload(500);

    clients[0]
        .manager
        .create(0, &payload, SyncOptions::default(), 0.0)
        .unwrap();

    let broadcasts = hub.drain();
    assert_eq!(broadcasts.len(), 3);
    assert_eq!(broadcasts.len(), fragment_count(payload.len()));
    assert!(broadcasts.iter().all(|b| b.prefix == CHUNK_PREFIX));
}

#[test]
fn large_payload_reassembles_on_every_client() {
    let hub = LocalHub::new();
    let mut clients = spawn_session(&hub, &[0, 1, 2]);
    let payload = patterned_payload(2_000);

    let mut slots = Vec::new();
    for client in clients.iter_mut() {
        let id = client
            .manager
            .create(2, &payload, SyncOptions::default(), 3.0)
            .unwrap();
        let (slot, callback) = capture_response();
        client.manager.on_response(id, callback);
        slots.push(slot);
    }

    deliver_all(&hub, &mut clients, 3.5);

    for slot in &slots {
        let response = slot.borrow_mut().take().expect("client resolved");
        assert_eq!(response.status, SyncStatus::Success);
        assert_eq!(response.data, payload);
    }
}

#[test]
fn reverse_order_arrival_still_reconstructs() {
    let hub = LocalHub::new();
    let mut clients = spawn_session(&hub, &[0, 1]);
    let payload = patterned_payload(500);

    // client 1 is a pure receiver for client 0's payload
    let id = clients[1]
        .manager
        .create(0, &payload, SyncOptions::default(), 0.0)
        .unwrap();
    let (slot, callback) = capture_response();
    clients[1].manager.on_response(id, callback);

    // hand-build the sender's fragments and deliver them in reverse
    let chunk_count = (fragment_count(payload.len()) - 1) as u16;
    let mut frames: Vec<String> = fragments(&payload)
        .enumerate()
        .map(|(index, fragment)| {
            encode_chunk_packet(id, chunk_count, index as u16, fragment).unwrap()
        })
        .collect();
    frames.reverse();

    for frame in &frames {
        clients[1]
            .manager
            .receive_broadcast(0, CHUNK_PREFIX, frame, 0.5);
    }

    let response = slot.borrow_mut().take().expect("reassembled");
    assert_eq!(response.data, payload);
}

#[test]
fn fragments_fill_the_budget_except_the_last() {
    let payload = patterned_payload(500);

    let pieces: Vec<&[u8]> = fragments(&payload).collect();
    assert_eq!(pieces[0].len(), CHUNK_PAYLOAD_LIMIT);
    assert_eq!(pieces[1].len(), CHUNK_PAYLOAD_LIMIT);
    assert_eq!(pieces[2].len(), 500 - 2 * CHUNK_PAYLOAD_LIMIT);
}

#[test]
fn duplicate_fragments_do_not_complete_a_transfer_early() {
    let hub = LocalHub::new();
    let mut clients = spawn_session(&hub, &[0, 1]);
    // 300 bytes -> exactly two fragments
    let payload = patterned_payload(300);

    let id = clients[1]
        .manager
        .create(0, &payload, SyncOptions::default(), 0.0)
        .unwrap();

    let chunk_count = (fragment_count(payload.len()) - 1) as u16;
    let pieces: Vec<&[u8]> = fragments(&payload).collect();

    // fragment 0 three times: the count must not move past one arrival
    let frame0 = encode_chunk_packet(id, chunk_count, 0, pieces[0]).unwrap();
    for _ in 0..3 {
        clients[1]
            .manager
            .receive_broadcast(0, CHUNK_PREFIX, &frame0, 0.1);
    }
    assert_eq!(clients[1].manager.status(id), Some(SyncStatus::Syncing));

    let frame1 = encode_chunk_packet(id, chunk_count, 1, pieces[1]).unwrap();
    clients[1]
        .manager
        .receive_broadcast(0, CHUNK_PREFIX, &frame1, 0.2);

    assert_eq!(clients[1].manager.status(id), Some(SyncStatus::Success));
}
