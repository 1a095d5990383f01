pub mod chat;
pub mod files;
pub mod logs;
pub mod tab_bar;
