//! Application services - Business logic orchestration

pub mod dispatch_service;
pub mod reply_service;

pub use dispatch_service::DispatchService;
pub use reply_service::ReplyService;
