use crate::domain::InboundMessage;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassReason {
    SettingsChanged,
    Navigation,
}

/// Everything a page session reacts to.
#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent {
    /// Document ready on a fresh load.
    Ready,
    /// The document changed; the watcher decides whether the route did.
    DomMutated,
    Message(InboundMessage),
    ScheduledPass(PassReason),
    DismissNotice { generation: u64 },
    /// User pressed the disable button on the overlay or notice.
    DisableForSession,
}
