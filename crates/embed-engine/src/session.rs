//! One embed instance, end to end.
//!
//! The session owns the pagination state for exactly one mount point and
//! coordinates the cache, the remote source and the render sink:
//! cached pages render optimistically, the network result reconciles
//! against them, and advance signals extend the collection one page at a
//! time. All fetch and store failures are contained here; nothing escapes
//! to the host page.

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use futures::{Stream, StreamExt};

use embed_cache::{CacheEntry, CacheStore, CollectionKey, MemoryStore, PageCache};
use embed_core::{Clock, EmbedConfig, SystemClock};
use embed_data::{CollectionSource, FetchError, ItemRecord, PageBody, SubscriberSource};

use crate::{
    decide, LoadMoreState, PageStatus, PaginationState, ReconcileAction, RenderSink, ViewBuilder,
};

/// Result of handling one advance signal.
#[derive(Debug, Clone, PartialEq)]
pub enum AdvanceOutcome {
    /// The signal was dropped: a fetch is already in flight or pagination
    /// is exhausted.
    Ignored,
    /// A fetch ran; this is how it reconciled.
    Completed(ReconcileAction),
}

struct SessionState {
    pagination: PaginationState,
    attribution_attached: bool,
    avatar_shown: bool,
    error_shown: bool,
}

/// Drives one embedded collection.
pub struct EmbedSession {
    config: EmbedConfig,
    builder: ViewBuilder,
    source: Arc<dyn CollectionSource>,
    subscriber: Arc<dyn SubscriberSource>,
    sink: Arc<dyn RenderSink>,
    cache: PageCache<Vec<ItemRecord>>,
    clock: Arc<dyn Clock>,
    state: Mutex<SessionState>,
}

impl EmbedSession {
    /// Create a session with an in-memory cache and the system clock.
    pub fn new(
        config: EmbedConfig,
        source: Arc<dyn CollectionSource>,
        subscriber: Arc<dyn SubscriberSource>,
        sink: Arc<dyn RenderSink>,
    ) -> Self {
        let builder = ViewBuilder::from_config(&config);
        Self {
            config,
            builder,
            source,
            subscriber,
            sink,
            cache: PageCache::new(MemoryStore::new()),
            clock: Arc::new(SystemClock),
            state: Mutex::new(SessionState {
                pagination: PaginationState::new(),
                attribution_attached: false,
                avatar_shown: false,
                error_shown: false,
            }),
        }
    }

    /// Use a shared cache store (instances sharing an owner share pages).
    pub fn with_store(mut self, store: Arc<dyn CacheStore>) -> Self {
        let ttl = self.cache.ttl();
        self.cache = PageCache::with_store(store).with_ttl(ttl);
        self
    }

    /// Override the cache TTL.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.cache = self.cache.with_ttl(ttl);
        self
    }

    /// Inject a clock.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// The page the next advance signal will fetch.
    pub fn current_page(&self) -> u32 {
        self.state().pagination.current_page()
    }

    /// Current pagination status.
    pub fn status(&self) -> PageStatus {
        self.state().pagination.status()
    }

    /// Initialize the instance: resolve the subscriber flag, attach the
    /// attribution decoration if needed, then load page 0.
    pub async fn start(&self) -> AdvanceOutcome {
        let subscribed = self.subscriber.is_subscriber(&self.config.owner).await;
        if !subscribed {
            let attach = {
                let mut state = self.state();
                !std::mem::replace(&mut state.attribution_attached, true)
            };
            if attach && self.sink.is_attached() {
                self.sink.attach_attribution();
            }
        }
        if self.sink.is_attached() {
            self.sink.set_load_more(LoadMoreState::Fetching);
        }
        self.advance().await
    }

    /// Handle one advance signal.
    ///
    /// At most one fetch is in flight per session: signals arriving while
    /// `Loading` (or after exhaustion) return [`AdvanceOutcome::Ignored`]
    /// without issuing a request.
    pub async fn advance(&self) -> AdvanceOutcome {
        let page = match self.state().pagination.begin() {
            Some(page) => page,
            None => return AdvanceOutcome::Ignored,
        };

        let key = CollectionKey::new(self.config.collection, self.config.owner.clone(), page);
        let cached = self.cache.get(&key).await;
        self.render_optimistic(page, cached.as_ref());

        let fresh = self
            .source
            .fetch_page(self.config.collection, &self.config.owner, page)
            .await;
        let now = self.clock.now_ms();
        let action = decide(cached.as_ref(), &fresh, now, self.cache.ttl());
        self.apply(page, &key, &fresh, &action, now).await;
        AdvanceOutcome::Completed(action)
    }

    /// Subscribe to an advance-signal source and handle each signal until
    /// the stream ends or pagination is exhausted.
    pub async fn run<S>(&self, mut signals: S)
    where
        S: Stream<Item = ()> + Unpin,
    {
        while let Some(()) = signals.next().await {
            if self.status() == PageStatus::Exhausted {
                break;
            }
            self.advance().await;
        }
    }

    /// Serve a fresh cached snapshot ahead of the network, on the first
    /// render attempt for this page only.
    fn render_optimistic(&self, page: u32, cached: Option<&CacheEntry<Vec<ItemRecord>>>) {
        let entry = match cached {
            Some(entry) if self.cache.is_fresh(entry, self.clock.now_ms()) => entry,
            _ => return,
        };
        let mut state = self.state();
        if state.pagination.has_rendered(page) || !self.sink.is_attached() {
            return;
        }
        let records = self.builder.build_page(&entry.payload);
        self.sink.render_page(page, &records, true);
        state.pagination.mark_rendered(page);
    }

    /// Apply a reconciliation decision to the sink, the cache and the
    /// pagination state. Sink and cache operations are skipped when the
    /// render area is gone; state transitions still run so a late result
    /// settles the machine.
    async fn apply(
        &self,
        page: u32,
        key: &CollectionKey,
        fresh: &Result<PageBody, FetchError>,
        action: &ReconcileAction,
        now: u64,
    ) {
        let attached = self.sink.is_attached();
        match action {
            ReconcileAction::Failed { message } => {
                tracing::warn!(key = %key, error = message, "page fetch failed");
                let show = {
                    let mut state = self.state();
                    state.pagination.finish_failed();
                    attached && !std::mem::replace(&mut state.error_shown, true)
                };
                if show {
                    self.sink.show_error(message);
                }
            }
            ReconcileAction::Exhausted => {
                self.state().pagination.finish_exhausted();
                if attached {
                    self.sink.set_load_more(LoadMoreState::Removed);
                }
            }
            ReconcileAction::Unchanged => {
                if let Ok(body) = fresh {
                    self.show_avatar_once(body, attached);
                }
                self.finish_page(page, attached);
            }
            ReconcileAction::Replace => {
                if let Ok(body) = fresh {
                    self.show_avatar_once(body, attached);
                    if attached {
                        let records = self.builder.build_page(&body.items);
                        self.sink.clear_page(page);
                        self.sink.render_page(page, &records, false);
                        self.state().pagination.mark_rendered(page);

                        let entry = CacheEntry::new(now, body.items.clone());
                        if let Err(e) = self.cache.put(key, &entry).await {
                            tracing::warn!(key = %key, error = %e, "cache write failed");
                        }
                    }
                }
                self.finish_page(page, attached);
            }
        }
    }

    fn finish_page(&self, page: u32, attached: bool) {
        {
            let mut state = self.state();
            state.error_shown = false;
            state.pagination.finish_success();
        }
        if page == 0 && attached {
            self.sink.set_load_more(LoadMoreState::LoadingMore);
        }
    }

    /// Forward the curator avatar to the sink, once per instance.
    fn show_avatar_once(&self, body: &PageBody, attached: bool) {
        let url = match &body.curator_avatar {
            Some(url) => url.clone(),
            None => return,
        };
        let show = {
            let mut state = self.state();
            !std::mem::replace(&mut state.avatar_shown, true)
        };
        if show && attached {
            self.sink.show_avatar(&url);
        }
    }

    fn state(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}
