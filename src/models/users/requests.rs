use super::entities::UserRole;
use serde::Deserialize;

// 用户创建请求（注册时 password 为明文，进入存储层前替换为哈希）
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: UserRole,
    pub institution: Option<String>,
}
