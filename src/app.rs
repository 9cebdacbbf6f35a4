use std::sync::Arc;

use anyhow::Result;
use reqwest::Client;
use tokio::sync::mpsc::{self, UnboundedReceiver};

use crate::{
    classifier::Classifier,
    config::AppConfig,
    domain::{InboundMessage, OutboundEvent},
    host::{io, HostCommand, SettingsControl},
    infrastructure::{
        directories::ResolvedPaths,
        notifier::Notifier,
        shutdown::{Shutdown, StopReason},
    },
    presenter::{self, DomSurface, PageDocument},
    session::{ContentScript, PageEvent, PassScheduler, SessionDeps, StatsRecorder},
    store::{JsonFileStore, SettingsStore},
    web_content::WebContentFetcher,
};

type Session = ContentScript<PageDocument>;

enum Step {
    Shutdown(StopReason),
    Command(Option<HostCommand>),
    Page(PageEvent),
}

pub struct FilterHostApp {
    config: Arc<AppConfig>,
    deps: SessionDeps,
    control: SettingsControl,
    fetcher: WebContentFetcher,
    outbound_rx: UnboundedReceiver<OutboundEvent>,
    shutdown: Shutdown,
}

impl FilterHostApp {
    pub async fn initialize(
        config: AppConfig,
        paths: ResolvedPaths,
        shutdown: Shutdown,
    ) -> Result<Self> {
        let config = Arc::new(config);
        let file_store = JsonFileStore::open(&paths.settings_path).await?;
        tracing::info!(
            target: "store",
            path = %file_store.path().display(),
            "settings store ready"
        );
        let store: Arc<dyn SettingsStore> = Arc::new(file_store);

        let http_client = Client::builder()
            .user_agent(format!("edu-focus-filter/{}", env!("CARGO_PKG_VERSION")))
            .build()?;
        let fetcher = WebContentFetcher::new(http_client, config.web.clone());

        let (outbound_tx, outbound_rx) = mpsc::unbounded_channel();
        let notifier = Notifier::new(outbound_tx);
        let control = SettingsControl::new(
            store.clone(),
            StatsRecorder::new(store.clone(), notifier.clone()),
        );
        let deps = SessionDeps {
            classifier: Arc::new(Classifier::new(config.heuristics.clone())),
            store,
            notifier,
            presentation: config.presentation.clone(),
        };

        tracing::info!(
            data = %paths.data_dir.display(),
            logs = %paths.logs_dir.display(),
            "filter host initialized"
        );

        Ok(Self {
            config,
            deps,
            control,
            fetcher,
            outbound_rx,
            shutdown,
        })
    }

    pub async fn run(self) -> Result<()> {
        let FilterHostApp {
            config,
            deps,
            control,
            fetcher,
            outbound_rx,
            shutdown,
        } = self;

        let writer = io::spawn_stdout_writer(outbound_rx);
        let (command_tx, mut command_rx) = mpsc::unbounded_channel();
        let reader = io::spawn_stdin_reader(command_tx);
        let mut shutdown_listener = shutdown.subscribe();

        let mut session: Option<Session> = None;
        let mut page_rx: Option<UnboundedReceiver<PageEvent>> = None;

        tracing::info!(mode = ?config.presentation.mode, "waiting for host commands");

        loop {
            let step = tokio::select! {
                reason = shutdown_listener.notified() => Step::Shutdown(reason),
                command = command_rx.recv() => Step::Command(command),
                Some(event) = next_page_event(&mut page_rx) => Step::Page(event),
            };

            match step {
                Step::Shutdown(reason) => {
                    tracing::info!(reason = %reason, "shutdown requested");
                    break;
                }
                Step::Command(None) => break,
                Step::Command(Some(HostCommand::Load { url })) => {
                    let content = fetcher.load(&url).await;
                    let document = PageDocument::from_content(&url, &content);
                    let (page_tx, rx) = mpsc::unbounded_channel();
                    let mut fresh = ContentScript::new(
                        document,
                        presenter::strategy_for(config.presentation.mode),
                        deps.clone(),
                        PassScheduler::new(page_tx),
                    );
                    tracing::info!(
                        target: "session",
                        url = %url,
                        host = %fresh.dom().host(),
                        site = content.site_name.as_deref().unwrap_or("-"),
                        "page loaded"
                    );
                    fresh.handle(PageEvent::Ready).await;
                    session = Some(fresh);
                    page_rx = Some(rx);
                }
                Step::Command(Some(HostCommand::Navigate { url })) => {
                    let Some(active) = session.as_mut() else {
                        tracing::warn!(
                            target: "host",
                            url = %url,
                            "navigate without a loaded page"
                        );
                        continue;
                    };
                    let content = fetcher.load(&url).await;
                    active.dom_mut().replace_content(&url, &content);
                    active.handle(PageEvent::DomMutated).await;
                }
                Step::Command(Some(HostCommand::DisableSession)) => {
                    if let Some(active) = session.as_mut() {
                        active.handle(PageEvent::DisableForSession).await;
                    }
                }
                Step::Command(Some(HostCommand::ResetStats)) => control.reset_stats().await,
                Step::Command(Some(HostCommand::Snapshot)) => match session.as_ref() {
                    Some(active) => deps.notifier.send(OutboundEvent::PageSnapshot {
                        url: active.dom().location().to_string(),
                        filtering: active.context().filtering_enabled(),
                        passes: active.passes(),
                        overlay: active.overlay_state(),
                        html: active.dom().to_html(),
                    }),
                    None => tracing::debug!(target: "host", "snapshot without a loaded page"),
                },
                Step::Command(Some(HostCommand::AddCustomSite { domain })) => {
                    match control.add_custom_site(&domain).await {
                        Ok(message) => forward(&mut session, message).await,
                        Err(err) => {
                            tracing::warn!(target: "host", error = %err, "custom site rejected");
                        }
                    }
                }
                Step::Command(Some(HostCommand::RemoveCustomSite { domain })) => {
                    match control.remove_custom_site(&domain).await {
                        Some(message) => forward(&mut session, message).await,
                        None => {
                            tracing::debug!(
                                target: "host",
                                domain = %domain,
                                "custom site not listed"
                            );
                        }
                    }
                }
                Step::Command(Some(command)) => {
                    if let Some(message) = command.as_message() {
                        control.apply(&message).await;
                        forward(&mut session, message).await;
                    }
                }
                Step::Page(event) => {
                    if let Some(active) = session.as_mut() {
                        active.handle(event).await;
                    }
                }
            }
        }

        shutdown.trigger(StopReason::HostClosed);
        reader.abort();
        drop(session);
        drop(deps);
        drop(control);
        if let Err(err) = writer.await {
            if err.is_panic() {
                tracing::error!(target: "host", "stdout writer panicked");
            }
        }
        tracing::info!("filter host stopped");
        Ok(())
    }
}

async fn forward(session: &mut Option<Session>, message: InboundMessage) {
    match session.as_mut() {
        Some(active) => active.handle(PageEvent::Message(message)).await,
        None => tracing::debug!(target: "host", "no page loaded; settings stored only"),
    }
}

async fn next_page_event(rx: &mut Option<UnboundedReceiver<PageEvent>>) -> Option<PageEvent> {
    match rx {
        Some(rx) => rx.recv().await,
        None => std::future::pending().await,
    }
}
