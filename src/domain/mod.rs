pub mod category;
pub mod events;
pub mod sites;
pub mod types;

pub use category::CategoryId;
pub use events::{InboundMessage, OutboundEvent};
pub use sites::CustomSiteError;
pub use types::{Settings, Stats, Verdict, WebContent};
