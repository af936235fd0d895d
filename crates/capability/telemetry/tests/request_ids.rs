use batiment_telemetry::{metrics, new_request_ids, record_cache_invalidated, record_request_sent};

#[test]
fn request_ids_non_empty() {
    let ids = new_request_ids();
    assert!(!ids.request_id.is_empty());
    assert!(!ids.trace_id.is_empty());
    assert_ne!(ids.request_id, ids.trace_id);
}

#[test]
fn counters_only_grow() {
    let before = metrics().snapshot();
    record_request_sent();
    record_cache_invalidated(3);
    let after = metrics().snapshot();
    assert!(after.requests_sent > before.requests_sent);
    assert!(after.cache_invalidated >= before.cache_invalidated + 3);
}
