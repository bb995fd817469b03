//! Background refresh scheduling for mapping caches.

use crate::mapping::MappingCache;
use rand::Rng;
use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::debug;

const REFRESH_TASK_TAG: &str = "RefreshTask:";

/// Upper bound on the randomized startup delay, spreading the first refresh
/// of many hub instances so they do not hit a shared mapping source in
/// lockstep.
const MAX_STARTUP_JITTER: Duration = Duration::from_secs(5);

/// Spawns the periodic refresh loop for one cache.
///
/// The first cycle is delayed by a random jitter of at most
/// [`MAX_STARTUP_JITTER`]; afterwards the cache is refreshed every `period`.
/// Failures are absorbed inside [`MappingCache::refresh`], so the loop never
/// terminates on its own.
pub fn spawn_refresh_task<K, V>(
    cache: Arc<MappingCache<K, V>>,
    period: Duration,
    name: &str,
) -> JoinHandle<()>
where
    K: Clone + Eq + Hash + Send + Sync + 'static,
    V: Clone + Eq + Hash + Send + Sync + 'static,
{
    let name = name.to_string();
    tokio::spawn(async move {
        let jitter = rand::thread_rng().gen_range(Duration::ZERO..=MAX_STARTUP_JITTER);
        debug!(
            "{REFRESH_TASK_TAG} {name} starting with period {period:?}, initial jitter {jitter:?}"
        );
        tokio::time::sleep(jitter).await;
        loop {
            cache.refresh().await;
            tokio::time::sleep(period).await;
        }
    })
}
