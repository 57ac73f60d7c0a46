//! HTTP 请求处理器

pub mod ai;
pub mod binny;
pub mod collection;
pub mod file;
pub mod health;
pub mod home;
pub mod reward;
