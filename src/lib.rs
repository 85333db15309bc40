//! otvet-bot - Bitrix24 webhook relay bot

pub mod application;
pub mod domain;
pub mod infrastructure;
