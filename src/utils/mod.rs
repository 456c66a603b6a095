pub mod jwt;
pub mod parameter_error_handler;
pub mod password;
pub mod validate;

pub use parameter_error_handler::json_error_handler;
pub use parameter_error_handler::query_error_handler;

/// 生成带前缀的唯一 ID，例如 `task_3f2c...`
pub fn generate_id(prefix: &str) -> String {
    format!("{prefix}_{}", uuid::Uuid::new_v4().simple())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_id_is_prefixed_and_unique() {
        let a = generate_id("task");
        let b = generate_id("task");
        assert!(a.starts_with("task_"));
        assert_eq!(a.len(), "task_".len() + 32);
        assert_ne!(a, b);
    }
}
