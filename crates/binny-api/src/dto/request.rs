//! 请求 DTO 定义

use serde::Deserialize;
use validator::Validate;

/// 分页参数，页码从 1 开始
#[derive(Debug, Clone, Deserialize)]
pub struct PaginationParams {
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_page_size")]
    pub page_size: i64,
}

fn default_page() -> i64 {
    1
}

fn default_page_size() -> i64 {
    20
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            page: default_page(),
            page_size: default_page_size(),
        }
    }
}

impl PaginationParams {
    pub fn page(&self) -> i64 {
        self.page.max(1)
    }

    /// 获取限制条数（最大100）
    pub fn limit(&self) -> i64 {
        self.page_size.clamp(1, 100)
    }
}

/// 宠物重命名请求
///
/// 这里只拒绝空字符串，去除首尾空白后的长度（1 到 100）由服务层校验
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RenameBinnyRequest {
    #[validate(length(min = 1, message = "名称不能为空"))]
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_defaults_and_clamp() {
        let params: PaginationParams = serde_json::from_str("{}").unwrap();
        assert_eq!(params.page(), 1);
        assert_eq!(params.limit(), 20);

        let params = PaginationParams {
            page: 0,
            page_size: 500,
        };
        assert_eq!(params.page(), 1);
        assert_eq!(params.limit(), 100);
    }

    #[test]
    fn test_rename_request_validation() {
        let ok = RenameBinnyRequest {
            name: "Cuppy".to_string(),
        };
        assert!(ok.validate().is_ok());

        let empty = RenameBinnyRequest {
            name: String::new(),
        };
        assert!(empty.validate().is_err());

    }

    #[test]
    fn test_rename_request_allows_padding_around_max_length_name() {
        let padded = RenameBinnyRequest {
            name: format!("  {}  ", "x".repeat(100)),
        };
        assert!(padded.validate().is_ok());
    }
}
