//! One page view: settings snapshot, presenter state and the event handler
//! that ties them together.
//!
//! Events are handled one at a time by the session's owner. Store access is
//! the only suspension point; a failure there is logged and never escapes
//! [`ContentScript::handle`].

mod context;
mod events;
mod navigation;
mod scheduler;
mod stats;

use std::sync::Arc;

use tracing::{info, warn};

use crate::{
    classifier::Classifier,
    config::PresentationConfig,
    domain::{OutboundEvent, Settings},
    infrastructure::notifier::Notifier,
    presenter::{DomSurface, OverlayState, PresentationStrategy, Presenter},
    store::{SettingsStore, StoreError},
};

pub use context::FilterContext;
pub use events::{PageEvent, PassReason};
pub use navigation::NavigationWatcher;
pub use scheduler::PassScheduler;
pub use stats::StatsRecorder;

/// Shared collaborators handed to each new session.
#[derive(Clone)]
pub struct SessionDeps {
    pub classifier: Arc<Classifier>,
    pub store: Arc<dyn SettingsStore>,
    pub notifier: Notifier,
    pub presentation: PresentationConfig,
}

pub struct ContentScript<D: DomSurface> {
    dom: D,
    ctx: FilterContext,
    presenter: Presenter,
    navigation: NavigationWatcher,
    classifier: Arc<Classifier>,
    store: Arc<dyn SettingsStore>,
    stats: StatsRecorder,
    notifier: Notifier,
    scheduler: PassScheduler,
    delays: PresentationConfig,
    passes: u64,
}

impl<D: DomSurface> ContentScript<D> {
    pub fn new(
        dom: D,
        strategy: Box<dyn PresentationStrategy>,
        deps: SessionDeps,
        scheduler: PassScheduler,
    ) -> Self {
        let navigation = NavigationWatcher::new(dom.location());
        Self {
            dom,
            ctx: FilterContext::default(),
            presenter: Presenter::new(strategy),
            navigation,
            classifier: deps.classifier,
            stats: StatsRecorder::new(deps.store.clone(), deps.notifier.clone()),
            store: deps.store,
            notifier: deps.notifier,
            scheduler,
            delays: deps.presentation,
            passes: 0,
        }
    }

    pub fn dom(&self) -> &D {
        &self.dom
    }

    pub fn dom_mut(&mut self) -> &mut D {
        &mut self.dom
    }

    pub fn context(&self) -> &FilterContext {
        &self.ctx
    }

    pub fn overlay_state(&self) -> OverlayState {
        self.presenter.state()
    }

    pub fn passes(&self) -> u64 {
        self.passes
    }

    pub async fn handle(&mut self, event: PageEvent) {
        match event {
            PageEvent::Ready => self.on_ready().await,
            PageEvent::DomMutated => {
                let current = self.dom.location().to_string();
                if self.navigation.observe(&current) {
                    info!(target: "session", url = %current, "route change detected");
                    self.teardown();
                    self.schedule_pass(PassReason::Navigation);
                }
            }
            PageEvent::Message(message) => {
                self.ctx.apply(&message);
                self.teardown();
                if self.ctx.filtering_enabled() {
                    self.schedule_pass(PassReason::SettingsChanged);
                }
            }
            PageEvent::ScheduledPass(_) => self.run_pass().await,
            PageEvent::DismissNotice { generation } => {
                if self.presenter.dismiss_notice(&mut self.dom, generation) {
                    self.announce_overlay();
                }
            }
            PageEvent::DisableForSession => {
                info!(
                    target: "session",
                    url = %self.dom.location(),
                    "filter disabled for this session"
                );
                self.ctx.session_disabled = true;
                self.teardown();
            }
        }
    }

    async fn on_ready(&mut self) {
        match self.store.load_settings().await {
            Ok(settings) => self.ctx.settings = settings,
            Err(StoreError::Malformed(reason)) => {
                warn!(target: "session", %reason, "settings unreadable; using defaults");
                self.ctx.settings = Settings::default();
            }
            Err(err) => {
                warn!(
                    target: "session",
                    error = %err,
                    "settings unavailable; page left unfiltered"
                );
                return;
            }
        }
        self.run_pass().await;
    }

    /// Classifies and presents once. Safe to repeat.
    async fn run_pass(&mut self) {
        if !self.ctx.filtering_enabled() {
            self.teardown();
            return;
        }

        let before = self.presenter.state();
        let outcome = self
            .presenter
            .present(&self.classifier, &self.ctx.settings, &mut self.dom);
        self.passes += 1;

        if outcome.notice_shown {
            self.scheduler.schedule(
                self.delays.notice_timeout,
                PageEvent::DismissNotice {
                    generation: self.presenter.notice_generation(),
                },
            );
        }

        let url = self.dom.location().to_string();
        info!(
            target: "session",
            url = %url,
            educational = outcome.verdict.is_educational,
            category = ?outcome.verdict.category,
            mode = ?self.presenter.mode(),
            "classification pass"
        );

        self.notifier
            .send(OutboundEvent::report(outcome.verdict.is_educational, &url));
        self.stats.record(outcome.verdict.is_educational).await;
        if before != outcome.overlay {
            self.announce_overlay();
        }
    }

    fn teardown(&mut self) {
        if self.presenter.teardown(&mut self.dom) {
            self.announce_overlay();
        }
    }

    fn schedule_pass(&self, reason: PassReason) {
        let delay = match reason {
            PassReason::SettingsChanged => self.delays.rerun_delay,
            PassReason::Navigation => self.delays.navigation_delay,
        };
        self.scheduler.schedule(delay, PageEvent::ScheduledPass(reason));
    }

    fn announce_overlay(&self) {
        self.notifier.send(OutboundEvent::OverlayChanged {
            state: self.presenter.state(),
        });
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::sync::mpsc::{self, UnboundedReceiver};

    use super::*;
    use crate::{
        domain::{CategoryId, InboundMessage, Stats, WebContent},
        presenter::{
            markup::{NOTICE_ID, OVERLAY_ID},
            BlockStrategy, FocusStrategy, PageDocument,
        },
        store::MemoryStore,
    };

    struct Harness {
        script: ContentScript<PageDocument>,
        store: Arc<MemoryStore>,
        page_rx: UnboundedReceiver<PageEvent>,
        host_rx: UnboundedReceiver<OutboundEvent>,
    }

    fn delays() -> PresentationConfig {
        PresentationConfig {
            rerun_delay: Duration::from_millis(5),
            navigation_delay: Duration::from_millis(5),
            notice_timeout: Duration::from_millis(5),
            ..PresentationConfig::default()
        }
    }

    fn harness(
        doc: PageDocument,
        strategy: Box<dyn PresentationStrategy>,
        store: MemoryStore,
    ) -> Harness {
        let store = Arc::new(store);
        let (page_tx, page_rx) = mpsc::unbounded_channel();
        let (host_tx, host_rx) = mpsc::unbounded_channel();
        let deps = SessionDeps {
            classifier: Arc::new(Classifier::default()),
            store: store.clone(),
            notifier: Notifier::new(host_tx),
            presentation: delays(),
        };
        Harness {
            script: ContentScript::new(doc, strategy, deps, PassScheduler::new(page_tx)),
            store,
            page_rx,
            host_rx,
        }
    }

    fn coursera_page() -> PageDocument {
        let mut doc = PageDocument::new("https://www.coursera.org/browse", "Browse");
        doc.push_paragraph("Pick something new this week.");
        doc
    }

    fn drain(rx: &mut UnboundedReceiver<OutboundEvent>) -> Vec<OutboundEvent> {
        let mut out = Vec::new();
        while let Ok(event) = rx.try_recv() {
            out.push(event);
        }
        out
    }

    #[tokio::test]
    async fn ready_classifies_reports_and_counts() {
        let mut h = harness(coursera_page(), Box::new(BlockStrategy), MemoryStore::new());
        h.script.handle(PageEvent::Ready).await;

        assert_eq!(h.script.overlay_state(), OverlayState::Hidden);
        assert_eq!(h.store.stats(), Stats { blocked: 0, allowed: 1 });
        let events = drain(&mut h.host_rx);
        assert!(events.contains(&OutboundEvent::ReportAllowed {
            url: "https://www.coursera.org/browse".into()
        }));
        assert!(events.contains(&OutboundEvent::UpdateStats {
            stats: Stats { blocked: 0, allowed: 1 }
        }));
    }

    #[tokio::test]
    async fn category_change_tears_down_then_reruns() {
        let mut settings = Settings::default();
        settings.categories.insert(CategoryId::OnlineCourses, false);
        let mut h = harness(
            coursera_page(),
            Box::new(BlockStrategy),
            MemoryStore::with_settings(settings),
        );

        h.script.handle(PageEvent::Ready).await;
        assert_eq!(h.script.overlay_state(), OverlayState::Blocking);
        assert_eq!(h.script.dom().count_id(OVERLAY_ID), 1);

        h.script
            .handle(PageEvent::Message(InboundMessage::UpdateCategories {
                categories: crate::domain::types::default_categories(),
            }))
            .await;
        assert_eq!(h.script.overlay_state(), OverlayState::Hidden);
        assert!(!h.script.dom().contains_id(OVERLAY_ID));

        let next = h.page_rx.recv().await.unwrap();
        assert_eq!(next, PageEvent::ScheduledPass(PassReason::SettingsChanged));
        h.script.handle(next).await;

        assert_eq!(h.script.overlay_state(), OverlayState::Hidden);
        assert_eq!(h.script.passes(), 2);
        assert_eq!(h.store.stats(), Stats { blocked: 1, allowed: 1 });
    }

    #[tokio::test]
    async fn repeated_passes_keep_a_single_overlay() {
        let mut doc = PageDocument::new("https://celebs.example.com", "Red carpet");
        doc.push_paragraph("Celebrity gossip and more.");
        let mut h = harness(doc, Box::new(BlockStrategy), MemoryStore::new());

        h.script.handle(PageEvent::Ready).await;
        h.script
            .handle(PageEvent::ScheduledPass(PassReason::Navigation))
            .await;
        h.script
            .handle(PageEvent::ScheduledPass(PassReason::Navigation))
            .await;

        assert_eq!(h.script.dom().count_id(OVERLAY_ID), 1);
        assert_eq!(h.store.stats().blocked, 3);
    }

    #[tokio::test]
    async fn disable_for_session_sticks_until_reload() {
        let mut doc = PageDocument::new("https://celebs.example.com", "Red carpet");
        doc.push_paragraph("Celebrity gossip and more.");
        let mut h = harness(doc, Box::new(BlockStrategy), MemoryStore::new());

        h.script.handle(PageEvent::Ready).await;
        h.script.handle(PageEvent::DisableForSession).await;
        assert!(!h.script.dom().contains_id(OVERLAY_ID));

        h.script
            .handle(PageEvent::Message(InboundMessage::ToggleFilter { enabled: true }))
            .await;
        h.script
            .handle(PageEvent::ScheduledPass(PassReason::SettingsChanged))
            .await;
        assert!(!h.script.dom().contains_id(OVERLAY_ID));
        assert_eq!(h.script.passes(), 1);
        assert!(h.page_rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn toggle_off_removes_overlay_without_rerun() {
        let mut doc = PageDocument::new("https://celebs.example.com", "Red carpet");
        doc.push_paragraph("Celebrity gossip and more.");
        let mut h = harness(doc, Box::new(BlockStrategy), MemoryStore::new());

        h.script.handle(PageEvent::Ready).await;
        drain(&mut h.host_rx);
        h.script
            .handle(PageEvent::Message(InboundMessage::ToggleFilter { enabled: false }))
            .await;

        assert!(!h.script.context().filtering_enabled());
        assert!(!h.script.dom().contains_id(OVERLAY_ID));
        assert_eq!(
            drain(&mut h.host_rx),
            vec![OutboundEvent::OverlayChanged {
                state: OverlayState::Hidden
            }]
        );
    }

    #[tokio::test]
    async fn unavailable_store_leaves_page_unfiltered() {
        let store = MemoryStore::new();
        store.set_fail_reads(true);
        let mut doc = PageDocument::new("https://celebs.example.com", "Red carpet");
        doc.push_paragraph("Celebrity gossip and more.");
        let mut h = harness(doc, Box::new(BlockStrategy), store);

        h.script.handle(PageEvent::Ready).await;
        assert_eq!(h.script.passes(), 0);
        assert!(!h.script.dom().contains_id(OVERLAY_ID));
    }

    #[tokio::test]
    async fn malformed_settings_fall_back_to_defaults() {
        let mut stored = Settings::default();
        stored.filter_active = false;
        let store = MemoryStore::with_settings(stored);
        store.set_malformed(true);
        let mut doc = PageDocument::new("https://celebs.example.com", "Red carpet");
        doc.push_paragraph("Celebrity gossip and more.");
        let mut h = harness(doc, Box::new(BlockStrategy), store);

        h.script.handle(PageEvent::Ready).await;
        assert_eq!(h.script.passes(), 1);
        assert!(h.script.context().filtering_enabled());
        assert_eq!(h.script.dom().count_id(OVERLAY_ID), 1);
        assert_eq!(h.store.stats().blocked, 1);
    }

    #[tokio::test]
    async fn route_change_tears_down_and_reruns_on_new_content() {
        let mut doc = PageDocument::new("https://spa.example.net/feed", "Feed");
        doc.push_paragraph("Celebrity gossip and more.");
        let mut h = harness(doc, Box::new(BlockStrategy), MemoryStore::new());
        h.script.handle(PageEvent::Ready).await;
        assert_eq!(h.script.overlay_state(), OverlayState::Blocking);

        h.script.handle(PageEvent::DomMutated).await;
        assert!(h.page_rx.try_recv().is_err());

        h.script.dom_mut().replace_content(
            "https://spa.example.net/lesson",
            &WebContent {
                title: Some("Lesson: research study guide".into()),
                site_name: None,
                content: Some("Today we learn about statistics.".into()),
            },
        );
        h.script.handle(PageEvent::DomMutated).await;
        assert_eq!(h.script.overlay_state(), OverlayState::Hidden);

        let next = h.page_rx.recv().await.unwrap();
        assert_eq!(next, PageEvent::ScheduledPass(PassReason::Navigation));
        h.script.handle(next).await;
        assert_eq!(h.script.overlay_state(), OverlayState::Hidden);
        assert_eq!(h.store.stats(), Stats { blocked: 1, allowed: 1 });
    }

    #[tokio::test]
    async fn focus_notice_auto_dismisses() {
        let mut doc = PageDocument::new("https://fun.example.net", "Top clips");
        doc.push_paragraph("Viral prank compilation with celebrity cameos.");
        let mut h = harness(doc, Box::new(FocusStrategy), MemoryStore::new());

        h.script.handle(PageEvent::Ready).await;
        assert!(h.script.dom().contains_id(NOTICE_ID));

        let next = h.page_rx.recv().await.unwrap();
        assert_eq!(next, PageEvent::DismissNotice { generation: 1 });
        h.script.handle(next).await;
        assert!(!h.script.dom().contains_id(NOTICE_ID));
        assert_eq!(h.store.stats().blocked, 1);
    }
}
