//! 请求和响应的数据传输对象
//!
//! 宠物、图鉴、奖励记录等视图直接复用 `binny_core::service` 中的定义

pub mod request;
pub mod response;

pub use request::{PaginationParams, RenameBinnyRequest};
pub use response::{ApiResponse, FileDto, PageResponse};
