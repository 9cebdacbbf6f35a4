use tracing::debug;

use super::{
    dom::DomSurface,
    markup::{self, DIM_CLASS, FOCUS_STYLES_ID, HIGHLIGHT_CLASS, NOTICE_ID},
    OverlayState, PassOutcome, PresentationStrategy,
};
use crate::{
    classifier::{Classifier, ElementVerdict, PageSignals},
    config::PresentationMode,
    domain::{CategoryId, Settings, Verdict},
};

/// In-place filtering: highlight educational blocks, dim the rest.
///
/// A page already trusted by custom site or domain table is left untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct FocusStrategy;

impl PresentationStrategy for FocusStrategy {
    fn mode(&self) -> PresentationMode {
        PresentationMode::Focus
    }

    fn present(
        &self,
        classifier: &Classifier,
        settings: &Settings,
        dom: &mut dyn DomSurface,
    ) -> PassOutcome {
        let page = PageSignals::new(dom.location(), dom.title(), "");
        if let Some(verdict) = classifier.classify_origin(&page, settings) {
            self.teardown(dom);
            return PassOutcome {
                verdict,
                overlay: OverlayState::Hidden,
                notice_shown: false,
            };
        }

        dom.remove_class_everywhere(HIGHLIGHT_CLASS);
        dom.remove_class_everywhere(DIM_CLASS);
        dom.inject_once(markup::focus_styles());

        let mut highlighted = 0;
        let mut dimmed = 0;
        for element in dom.text_elements() {
            match classifier.classify_element(&element.text, element.rendered) {
                ElementVerdict::Educational => {
                    dom.add_class(element.handle, HIGHLIGHT_CLASS);
                    highlighted += 1;
                }
                ElementVerdict::NonEducational => {
                    dom.add_class(element.handle, DIM_CLASS);
                    dimmed += 1;
                }
                ElementVerdict::Neutral | ElementVerdict::Skipped => {}
            }
        }
        debug!(target: "presenter", highlighted, dimmed, "focus pass marked elements");

        let (verdict, notice, notice_shown) = if highlighted > 0 {
            dom.remove_id(NOTICE_ID);
            (Verdict::educational(CategoryId::ContentBased), false, false)
        } else {
            let shown = dom.inject_once(markup::focus_notice());
            (Verdict::non_educational(), true, shown)
        };

        PassOutcome {
            verdict,
            overlay: OverlayState::Focusing {
                highlighted,
                dimmed,
                notice,
            },
            notice_shown,
        }
    }

    fn teardown(&self, dom: &mut dyn DomSurface) {
        dom.remove_class_everywhere(HIGHLIGHT_CLASS);
        dom.remove_class_everywhere(DIM_CLASS);
        dom.remove_id(NOTICE_ID);
        dom.remove_id(FOCUS_STYLES_ID);
    }
}
