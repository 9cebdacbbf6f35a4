//! Turns verdicts into page changes.
//!
//! Two strategies share one interface: [`BlockStrategy`] covers the whole
//! viewport when a page is not educational, [`FocusStrategy`] marks
//! individual elements and shows a short-lived notice. Both are idempotent:
//! presenting twice leaves one overlay, tearing down an empty page is a no-op.

mod block;
pub mod document;
pub mod dom;
mod focus;
pub mod markup;

use serde::Serialize;
use tracing::debug;

use crate::{
    classifier::Classifier,
    config::PresentationMode,
    domain::{Settings, Verdict},
};

pub use block::BlockStrategy;
pub use document::PageDocument;
pub use dom::DomSurface;
pub use focus::FocusStrategy;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum OverlayState {
    Hidden,
    Blocking,
    Focusing {
        highlighted: usize,
        dimmed: usize,
        notice: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PassOutcome {
    pub verdict: Verdict,
    pub overlay: OverlayState,
    /// True when this pass added a notice that was not there before.
    pub notice_shown: bool,
}

pub trait PresentationStrategy: Send + Sync {
    fn mode(&self) -> PresentationMode;

    /// Classifies the current page and applies the result to the DOM.
    fn present(
        &self,
        classifier: &Classifier,
        settings: &Settings,
        dom: &mut dyn DomSurface,
    ) -> PassOutcome;

    /// Removes everything this strategy may have added.
    fn teardown(&self, dom: &mut dyn DomSurface);
}

pub fn strategy_for(mode: PresentationMode) -> Box<dyn PresentationStrategy> {
    match mode {
        PresentationMode::Block => Box::new(BlockStrategy),
        PresentationMode::Focus => Box::new(FocusStrategy),
    }
}

/// Strategy plus the overlay state it last produced.
pub struct Presenter {
    strategy: Box<dyn PresentationStrategy>,
    state: OverlayState,
    notice_generation: u64,
}

impl Presenter {
    pub fn new(strategy: Box<dyn PresentationStrategy>) -> Self {
        Self {
            strategy,
            state: OverlayState::Hidden,
            notice_generation: 0,
        }
    }

    pub fn mode(&self) -> PresentationMode {
        self.strategy.mode()
    }

    pub fn state(&self) -> OverlayState {
        self.state
    }

    pub fn notice_generation(&self) -> u64 {
        self.notice_generation
    }

    pub fn present(
        &mut self,
        classifier: &Classifier,
        settings: &Settings,
        dom: &mut dyn DomSurface,
    ) -> PassOutcome {
        let outcome = self.strategy.present(classifier, settings, dom);
        if outcome.notice_shown {
            self.notice_generation += 1;
        }
        self.state = outcome.overlay;
        debug!(target: "presenter", state = ?self.state, "pass presented");
        outcome
    }

    /// Returns true when the overlay state changed.
    pub fn teardown(&mut self, dom: &mut dyn DomSurface) -> bool {
        self.strategy.teardown(dom);
        let changed = self.state != OverlayState::Hidden;
        self.state = OverlayState::Hidden;
        changed
    }

    /// Removes the focus notice if it is still the one shown at `generation`.
    pub fn dismiss_notice(&mut self, dom: &mut dyn DomSurface, generation: u64) -> bool {
        if generation != self.notice_generation || !dom.remove_id(markup::NOTICE_ID) {
            return false;
        }
        if let OverlayState::Focusing { notice, .. } = &mut self.state {
            *notice = false;
        }
        true
    }
}
