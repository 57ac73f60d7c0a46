//! Binny Buddy HTTP 服务
//!
//! 上传垃圾照片换取宠物经验，查询图鉴、宠物与奖励记录。
//!
//! ## 模块结构
//!
//! - `routes`: 路由与中间件
//! - `handlers`: HTTP 请求处理器
//! - `extract`: 会话用户与上传文件提取器
//! - `dto`: 请求和响应的数据传输对象
//! - `error`: 错误到 HTTP 响应的映射
//! - `state`: 应用状态
//! - `bootstrap`: 启动引导

pub mod bootstrap;
pub mod dto;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod routes;
pub mod state;

pub use error::{ApiError, Result};
pub use state::AppState;
