//! 统一错误处理模块
//!
//! 使用宏自动生成错误类型，支持错误代码和类型名称。

use std::fmt;

/// 定义错误类型的宏
///
/// 自动生成：
/// - enum 定义
/// - code() 方法 - 返回错误代码
/// - error_type() 方法 - 返回错误类型名称
/// - message() 方法 - 返回错误详情
/// - 便捷构造函数
macro_rules! define_edusprint_errors {
    ($(
        $variant:ident($code:literal, $type_name:literal)
    ),* $(,)?) => {
        #[derive(Debug, Clone, PartialEq)]
        pub enum EduSprintError {
            $($variant(String),)*
        }

        impl EduSprintError {
            /// 获取错误代码
            pub fn code(&self) -> &'static str {
                match self {
                    $(EduSprintError::$variant(_) => $code,)*
                }
            }

            /// 获取错误类型名称
            pub fn error_type(&self) -> &'static str {
                match self {
                    $(EduSprintError::$variant(_) => $type_name,)*
                }
            }

            /// 获取错误详情
            pub fn message(&self) -> &str {
                match self {
                    $(EduSprintError::$variant(msg) => msg,)*
                }
            }
        }

        // 生成便捷构造函数
        paste::paste! {
            impl EduSprintError {
                $(
                    pub fn [<$variant:snake>]<T: Into<String>>(msg: T) -> Self {
                        EduSprintError::$variant(msg.into())
                    }
                )*
            }
        }
    };
}

define_edusprint_errors! {
    CacheConnection("E001", "Cache Connection Error"),
    StorageOperation("E002", "Storage Operation Error"),
    Validation("E004", "Validation Error"),
    NotFound("E005", "Resource Not Found"),
    Conflict("E006", "Resource Conflict"),
    InvalidTransition("E007", "Invalid Status Transition"),
    Serialization("E008", "Serialization Error"),
    Authentication("E010", "Authentication Error"),
    Authorization("E011", "Authorization Error"),
}

impl EduSprintError {
    /// 格式化为彩色输出（用于开发环境）
    #[cfg(debug_assertions)]
    pub fn format_colored(&self) -> String {
        format!(
            "\x1b[1;31m[ERROR]\x1b[0m \x1b[33m{}\x1b[0m \x1b[31m{}\x1b[0m\n  {}",
            self.code(),
            self.error_type(),
            self.message()
        )
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for EduSprintError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for EduSprintError {}

// 为常见的错误类型实现 From trait
impl From<serde_json::Error> for EduSprintError {
    fn from(err: serde_json::Error) -> Self {
        EduSprintError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, EduSprintError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(EduSprintError::cache_connection("test").code(), "E001");
        assert_eq!(EduSprintError::validation("test").code(), "E004");
        assert_eq!(EduSprintError::invalid_transition("test").code(), "E007");
        assert_eq!(EduSprintError::authorization("test").code(), "E011");
    }

    #[test]
    fn test_error_types() {
        assert_eq!(
            EduSprintError::conflict("test").error_type(),
            "Resource Conflict"
        );
        assert_eq!(
            EduSprintError::validation("test").error_type(),
            "Validation Error"
        );
    }

    #[test]
    fn test_error_message() {
        let err = EduSprintError::not_found("Task task_1 not found");
        assert_eq!(err.message(), "Task task_1 not found");
    }

    #[test]
    fn test_format_simple() {
        let err = EduSprintError::validation("max_score must be positive");
        let formatted = err.format_simple();
        assert!(formatted.contains("Validation Error"));
        assert!(formatted.contains("max_score must be positive"));
    }

    #[test]
    fn test_from_serde_json_error() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let converted: EduSprintError = err.into();
        assert_eq!(converted.code(), "E008");
    }
}
