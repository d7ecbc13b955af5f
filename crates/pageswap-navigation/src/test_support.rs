//! Shared fixtures for engine tests

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use futures_util::future::BoxFuture;
use pageswap_dom::{HeadlessPage, Markers};
use pageswap_fetch::{FetchedPage, PageFetcher, StaticFetcher};
use parking_lot::Mutex;
use tokio::sync::Semaphore;
use tokio::time::Instant;
use url::Url;

use crate::animator::TransitionTiming;
use crate::navigator::Navigator;

pub const HOME: &str = r#"<!doctype html>
<html>
<head><title>Home</title></head>
<body>
  <nav>
    <ul class="nav-list">
      <li><a data-internal="true" href="/" class="active">Home</a></li>
      <li><a data-internal="true" href="/events">Events</a></li>
      <li><a data-internal="true" href="https://site.test/about">About</a></li>
      <li><a data-internal="true" data-no-pjax href="/contact">Contact</a></li>
    </ul>
  </nav>
  <main><h1>Home</h1></main>
  <footer id="liveClock"></footer>
</body>
</html>"#;

pub const ABOUT: &str = r#"<!doctype html>
<html><head><title>About Us</title></head>
<body><nav></nav><main><h1>About</h1></main></body></html>"#;

pub const EVENTS: &str = r#"<!doctype html>
<html><head><title>Events</title><script src="/head-only.js"></script></head>
<body><main><h1>Events</h1><script src="/calendar.js"></script><script>renderCalendar();</script></main></body></html>"#;

pub fn url(path: &str) -> Url {
    Url::parse("https://site.test/")
        .and_then(|base| base.join(path))
        .unwrap()
}

pub fn page() -> HeadlessPage {
    HeadlessPage::parse(url("/"), HOME, Markers::default()).unwrap()
}

pub fn shared_page() -> Arc<Mutex<HeadlessPage>> {
    Arc::new(Mutex::new(page()))
}

pub fn site() -> StaticFetcher {
    StaticFetcher::new(&url("/"), "main")
        .with_page("/", HOME)
        .with_page("/about", ABOUT)
        .with_page("/events", EVENTS)
        .with_status("/missing", 404)
}

/// Wraps a fetcher so individual paths can be held until released.
pub struct GatedFetcher {
    inner: StaticFetcher,
    gates: Mutex<HashMap<String, Arc<Semaphore>>>,
    calls: Mutex<Vec<(String, Instant)>>,
}

impl GatedFetcher {
    pub fn new(inner: StaticFetcher) -> Arc<Self> {
        Arc::new(Self {
            inner,
            gates: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn hold(&self, path: &str) {
        self.gates
            .lock()
            .insert(path.to_string(), Arc::new(Semaphore::new(0)));
    }

    pub fn release(&self, path: &str) {
        if let Some(gate) = self.gates.lock().get(path) {
            gate.add_permits(1);
        }
    }

    /// Paths fetched so far, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().iter().map(|(p, _)| p.clone()).collect()
    }

    pub fn call_times(&self) -> Vec<Instant> {
        self.calls.lock().iter().map(|(_, t)| *t).collect()
    }
}

impl PageFetcher for GatedFetcher {
    fn fetch<'a>(&'a self, url: &'a Url) -> BoxFuture<'a, pageswap_fetch::Result<FetchedPage>> {
        Box::pin(async move {
            self.calls
                .lock()
                .push((url.path().to_string(), Instant::now()));

            let gate = self.gates.lock().get(url.path()).cloned();
            if let Some(gate) = gate {
                if let Ok(permit) = gate.acquire().await {
                    permit.forget();
                }
            }

            self.inner.fetch(url).await
        })
    }
}

/// A navigator over the home page, with default markers and timing.
pub fn navigator(
    fetcher: Arc<GatedFetcher>,
) -> (Arc<Mutex<HeadlessPage>>, Navigator<HeadlessPage>) {
    let doc = shared_page();
    let fetcher: Arc<dyn PageFetcher> = fetcher;
    let navigator = Navigator::new(
        Arc::clone(&doc),
        fetcher,
        &Markers::default(),
        TransitionTiming::default(),
    );
    (doc, navigator)
}

/// Register a hook under `name` that counts its invocations.
pub fn counting_hook(navigator: &Navigator<HeadlessPage>, name: &str) -> Arc<AtomicUsize> {
    let count = Arc::new(AtomicUsize::new(0));
    let for_hook = Arc::clone(&count);
    navigator.register_post_swap_hook(name, move || {
        for_hook.fetch_add(1, Ordering::SeqCst);
        Ok(())
    });
    count
}
