use ferrous_watch_application::ports::{Clock, ResourceProbe};
use ferrous_watch_infrastructure::clock::SystemClock;
use ferrous_watch_infrastructure::external_store::RedisStoreProbe;
use ferrous_watch_infrastructure::system::SysinfoResourceProbe;

#[test]
fn test_snapshot_reports_host_memory() {
    let probe = SysinfoResourceProbe::new();

    let snapshot = probe.snapshot();

    assert!(snapshot.total_memory_bytes > 0);
    assert!(snapshot.memory_ratio() >= 0.0);
}

#[test]
fn test_system_clock_is_past_2020() {
    assert!(SystemClock.now_ms() > 1_577_836_800_000);
}

#[test]
fn test_redis_probe_rejects_malformed_url() {
    assert!(RedisStoreProbe::new("not a url").is_err());
    assert!(RedisStoreProbe::new("redis://127.0.0.1:6379").is_ok());
}
