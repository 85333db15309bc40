//! Domain entities - Core business objects

pub mod event;
pub mod menu;
pub mod reply;

pub use event::{EventKind, IncomingEvent};
pub use menu::{MenuButton, MenuNode, MenuTree};
pub use reply::OutboundReply;
