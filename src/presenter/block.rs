use tracing::info;

use super::{
    dom::DomSurface,
    markup::{self, OVERLAY_ID, OVERLAY_STYLES_ID},
    OverlayState, PassOutcome, PresentationStrategy,
};
use crate::{
    classifier::{Classifier, PageSignals},
    config::PresentationMode,
    domain::Settings,
};

/// Whole-page overlay for non-educational pages.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlockStrategy;

impl PresentationStrategy for BlockStrategy {
    fn mode(&self) -> PresentationMode {
        PresentationMode::Block
    }

    fn present(
        &self,
        classifier: &Classifier,
        settings: &Settings,
        dom: &mut dyn DomSurface,
    ) -> PassOutcome {
        let page = PageSignals::new(dom.location(), dom.title(), &dom.body_text());
        let verdict = classifier.classify(&page, settings);

        if verdict.is_educational {
            self.teardown(dom);
            return PassOutcome {
                verdict,
                overlay: OverlayState::Hidden,
                notice_shown: false,
            };
        }

        dom.inject_once(markup::overlay_styles());
        if dom.inject_once(markup::block_overlay(&page.domain)) {
            info!(target: "presenter", domain = %page.domain, "page blocked");
        }
        PassOutcome {
            verdict,
            overlay: OverlayState::Blocking,
            notice_shown: false,
        }
    }

    fn teardown(&self, dom: &mut dyn DomSurface) {
        dom.remove_id(OVERLAY_ID);
        dom.remove_id(OVERLAY_STYLES_ID);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{CategoryId, Verdict},
        presenter::PageDocument,
    };

    fn gossip_page() -> PageDocument {
        let mut doc = PageDocument::new("https://celebs.example.com/today", "Who wore it best");
        doc.push_paragraph("The hottest red carpet looks of the week.");
        doc
    }

    #[test]
    fn presenting_twice_leaves_one_overlay() {
        let classifier = Classifier::default();
        let settings = Settings::default();
        let mut doc = gossip_page();

        let first = BlockStrategy.present(&classifier, &settings, &mut doc);
        let second = BlockStrategy.present(&classifier, &settings, &mut doc);

        assert_eq!(first.overlay, OverlayState::Blocking);
        assert_eq!(second.verdict, Verdict::non_educational());
        assert_eq!(doc.count_id(OVERLAY_ID), 1);
        assert_eq!(doc.count_id(OVERLAY_STYLES_ID), 1);
        assert!(doc.to_html().contains("celebs.example.com has been filtered"));
    }

    #[test]
    fn teardown_without_overlay_is_a_no_op() {
        let mut doc = gossip_page();
        let before = doc.to_html();
        BlockStrategy.teardown(&mut doc);
        assert_eq!(doc.to_html(), before);
    }

    #[test]
    fn educational_page_removes_existing_overlay() {
        let classifier = Classifier::default();
        let mut doc = gossip_page();
        BlockStrategy.present(&classifier, &Settings::default(), &mut doc);

        let mut settings = Settings::default();
        settings.custom_sites.push("celebs.example.com".into());
        let outcome = BlockStrategy.present(&classifier, &settings, &mut doc);

        assert_eq!(outcome.verdict, Verdict::educational(CategoryId::Custom));
        assert_eq!(outcome.overlay, OverlayState::Hidden);
        assert!(!doc.contains_id(OVERLAY_ID));
        assert!(!doc.contains_id(OVERLAY_STYLES_ID));
    }
}
