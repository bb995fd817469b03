//! File-backed mapping sources plugged into live mapping caches.

use idmap_static_file::{AltIdColumns, AltIdTableFile, CanonicalStopFile};
use std::fs;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use transit_hub::MappingCache;

static TEST_FILE_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn write_file(contents: &str) -> std::path::PathBuf {
    let mut path = std::env::temp_dir();
    let counter = TEST_FILE_COUNTER.fetch_add(1, Ordering::Relaxed);
    path.push(format!(
        "file-backed-caches-test-{}-{}.txt",
        std::process::id(),
        counter
    ));

    fs::write(&path, contents).expect("test file written");
    path
}

#[tokio::test]
async fn cold_read_bootstraps_from_the_alt_id_table() {
    let path = write_file("stop_id;stop_alt_id\nRUT:Quay:1;01121\n");
    let cache = MappingCache::with_reverse_index(
        "alt-ids",
        Arc::new(AltIdTableFile::new(&path, AltIdColumns::Stop)),
    );

    assert_eq!(
        cache.get(&"RUT:Quay:1".to_string()).await,
        Some("01121".to_string())
    );
    assert_eq!(
        cache.get_reverse(&"01121".to_string(), Some("RUT")).await,
        Some("RUT:Quay:1".to_string())
    );

    fs::remove_file(&path).expect("remove test file");
}

#[tokio::test]
async fn source_loss_keeps_previously_cached_entries() {
    let path = write_file(r#"{"RUT:Quay:1": "NAT:Quay:100", "RUT:Quay:2": "NAT:Quay:200"}"#);
    let cache = MappingCache::new("canonical-stops", Arc::new(CanonicalStopFile::new(&path)));

    cache.refresh().await;
    assert_eq!(cache.len(), 2);

    fs::remove_file(&path).expect("remove test file");
    cache.refresh().await;

    assert_eq!(cache.len(), 2);
    assert_eq!(
        cache.get(&"RUT:Quay:2".to_string()).await,
        Some("NAT:Quay:200".to_string())
    );
}
