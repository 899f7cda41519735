use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, Weak};
use std::time::Duration;

use engine_logging::{engine_debug, engine_info, engine_warn};
use tokio::net::TcpStream;

/// Host probed for connectivity unless configured otherwise.
pub const DEFAULT_PROBE_ADDRESS: &str = "www.swiggy.com:443";

type Listener = Arc<dyn Fn(bool) + Send + Sync>;

struct Inner {
    online: AtomicBool,
    next_id: AtomicU64,
    listeners: Mutex<BTreeMap<u64, Listener>>,
}

/// Shared online/offline signal.
///
/// Clones observe the same signal. Listeners hear about transitions only,
/// never about repeated reports of the current value.
#[derive(Clone)]
pub struct ConnectivityMonitor {
    inner: Arc<Inner>,
}

impl ConnectivityMonitor {
    pub fn new(initially_online: bool) -> Self {
        Self {
            inner: Arc::new(Inner {
                online: AtomicBool::new(initially_online),
                next_id: AtomicU64::new(1),
                listeners: Mutex::new(BTreeMap::new()),
            }),
        }
    }

    pub fn is_online(&self) -> bool {
        self.inner.online.load(Ordering::SeqCst)
    }

    /// Registers `listener` until the returned guard is dropped.
    pub fn subscribe<F>(&self, listener: F) -> Subscription
    where
        F: Fn(bool) + Send + Sync + 'static,
    {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        if let Ok(mut listeners) = self.inner.listeners.lock() {
            listeners.insert(id, Arc::new(listener));
        }
        Subscription {
            id,
            inner: Arc::downgrade(&self.inner),
        }
    }

    /// Records the current connectivity; returns whether it changed.
    pub fn report(&self, online: bool) -> bool {
        let previous = self.inner.online.swap(online, Ordering::SeqCst);
        if previous == online {
            return false;
        }
        engine_info!("Connectivity is now {}", if online { "online" } else { "offline" });

        // Snapshot; listeners may re-enter the monitor.
        let listeners: Vec<Listener> = match self.inner.listeners.lock() {
            Ok(listeners) => listeners.values().cloned().collect(),
            Err(_) => Vec::new(),
        };
        for listener in listeners {
            listener(online);
        }
        true
    }

    pub fn subscriber_count(&self) -> usize {
        self.inner
            .listeners
            .lock()
            .map(|listeners| listeners.len())
            .unwrap_or(0)
    }
}

/// Keeps a listener registered; dropping it unsubscribes.
pub struct Subscription {
    id: u64,
    inner: Weak<Inner>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.inner.upgrade() {
            if let Ok(mut listeners) = inner.listeners.lock() {
                listeners.remove(&self.id);
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeSettings {
    pub enabled: bool,
    /// `host:port` reached with a plain TCP connect.
    pub address: String,
    pub interval: Duration,
    pub timeout: Duration,
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            address: DEFAULT_PROBE_ADDRESS.to_string(),
            interval: Duration::from_secs(15),
            timeout: Duration::from_secs(3),
        }
    }
}

/// True when a TCP connection to `address` opens within `timeout`.
pub async fn probe_once(address: &str, timeout: Duration) -> bool {
    matches!(
        tokio::time::timeout(timeout, TcpStream::connect(address)).await,
        Ok(Ok(_))
    )
}

/// Connectivity to seed a monitor with, checked once before any runtime exists.
///
/// With probing disabled the network is assumed reachable.
pub fn initial_connectivity(settings: &ProbeSettings) -> bool {
    if !settings.enabled {
        return true;
    }
    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(err) => {
            engine_warn!("Cannot run start-up connectivity check: {}", err);
            return true;
        }
    };
    let online = runtime.block_on(probe_once(&settings.address, settings.timeout));
    engine_debug!("Start-up connectivity {} -> {}", settings.address, online);
    online
}

/// Feeds probe results into `monitor` until the runtime shuts down.
pub(crate) async fn run_probe(monitor: ConnectivityMonitor, settings: ProbeSettings) {
    loop {
        let online = probe_once(&settings.address, settings.timeout).await;
        engine_debug!("Connectivity probe {} -> {}", settings.address, online);
        monitor.report(online);
        tokio::time::sleep(settings.interval).await;
    }
}
