use super::*;

#[test]
fn notify_delivers_event_to_listener() {
    let (bridge, mut rx) = SelectionBridge::channel();
    assert!(bridge.notify(42));
    assert_eq!(rx.try_recv().unwrap(), SelectionEvent { tile_id: 42 });
    assert!(rx.try_recv().is_err());
}

#[test]
fn notify_preserves_order() {
    let (bridge, mut rx) = SelectionBridge::channel();
    bridge.notify(1);
    bridge.notify(2);
    bridge.notify(3);
    let got: Vec<TileId> = std::iter::from_fn(|| rx.try_recv().ok()).map(|e| e.tile_id).collect();
    assert_eq!(got, vec![1, 2, 3]);
}

#[test]
fn notify_after_receiver_dropped_is_not_fatal() {
    let (bridge, rx) = SelectionBridge::channel();
    drop(rx);
    assert!(!bridge.notify(7));
}

#[test]
fn disconnected_bridge_drops_events() {
    assert!(!SelectionBridge::disconnected().notify(7));
}

#[test]
fn event_serializes_with_block_id_key() {
    let json = serde_json::to_string(&SelectionEvent { tile_id: 9 }).unwrap();
    assert_eq!(json, r#"{"blockId":9}"#);
}

#[tokio::test]
async fn listener_receives_events_asynchronously() {
    let (bridge, mut rx) = SelectionBridge::channel();
    let handle = tokio::spawn(async move { rx.recv().await });
    bridge.notify(5);
    let event = handle.await.unwrap();
    assert_eq!(event, Some(SelectionEvent { tile_id: 5 }));
}
