//! Bitrix24 adapter - REST client for outbound messages and the webhook
//! receiver for inbound bot-platform events

pub mod client;
pub mod webhook;

pub use client::{BitrixAdapter, KeyboardButton, MessageAddRequest};
pub use webhook::build_router;
