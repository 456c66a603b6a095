use crate::cache::{ObjectCache, create_object_cache};
use crate::config::AppConfig;
use crate::errors::EduSprintError;
use crate::models::users::entities::{User, UserRole};
use crate::storage::Storage;
use crate::utils::generate_id;
use crate::utils::password::hash_password;
use std::sync::Arc;
use tracing::{debug, info, warn};

pub struct StartupContext {
    pub storage: Arc<dyn Storage>,
    pub cache: Arc<dyn ObjectCache>,
}

/// 生成随机密码
fn generate_random_password(length: usize) -> String {
    use rand::Rng;
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%";
    let mut rng = rand::rng();
    (0..length)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect()
}

/// 初始化默认管理员账号
/// 存储中没有任何用户时，创建一个 admin 账号
pub async fn seed_admin(storage: &Arc<dyn Storage>) {
    match storage.count_users().await {
        Ok(count) if count > 0 => {
            debug!("Storage already has {} user(s), skipping admin seed", count);
            return;
        }
        Ok(_) => {
            info!("No users found, creating default admin account...");
        }
        Err(e) => {
            warn!("Failed to count users: {}, skipping admin seed", e);
            return;
        }
    }

    // 获取密码：优先从环境变量，否则生成随机密码
    let password = std::env::var("ADMIN_PASSWORD").unwrap_or_else(|_| {
        let pwd = generate_random_password(16);
        warn!("==========================================================");
        warn!("  ADMIN PASSWORD NOT SET - USING GENERATED PASSWORD");
        warn!("  Generated admin password: {}", pwd);
        warn!("  Please save this password or set ADMIN_PASSWORD env var");
        warn!("==========================================================");
        pwd
    });

    let password_hash = match hash_password(&password) {
        Ok(hash) => hash,
        Err(e) => {
            warn!("Failed to hash admin password: {}, skipping admin seed", e);
            return;
        }
    };

    let admin = User {
        id: generate_id("user"),
        name: "Administrator".to_string(),
        email: "admin@localhost".to_string(),
        password_hash,
        role: UserRole::Admin,
        institution: None,
        last_login: None,
        created_at: chrono::Utc::now(),
    };

    match storage.create_user(admin).await {
        Ok(user) => {
            info!(
                "Default admin account created successfully (ID: {}, email: {})",
                user.id, user.email
            );
        }
        Err(e) => {
            warn!("Failed to create admin account: {}", e);
        }
    }
}

/// 准备服务器启动的上下文
/// 包括存储、缓存与默认账号
pub async fn prepare_server_startup() -> Result<StartupContext, EduSprintError> {
    let config = AppConfig::get();

    if config.uses_development_secret() {
        if config.is_production() {
            warn!("JWT secret is the built-in development value, set JWT_SECRET in production");
        } else {
            debug!("Using the built-in development JWT secret");
        }
    }

    let storage = crate::storage::create_storage().await?;
    warn!("Storage backend initialized");

    // 初始化默认管理员账号（如果需要）
    seed_admin(&storage).await;

    let cache = create_object_cache().map_err(EduSprintError::cache_connection)?;
    warn!("Cache backend initialized");

    Ok(StartupContext { storage, cache })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::memory_storage::MemoryStorage;

    #[test]
    fn test_random_password_uses_charset() {
        let pwd = generate_random_password(24);
        assert_eq!(pwd.chars().count(), 24);
        assert!(pwd.chars().all(|c| c.is_ascii_graphic()));
    }

    #[tokio::test]
    async fn test_seed_admin_only_on_empty_storage() {
        let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::default());
        seed_admin(&storage).await;
        seed_admin(&storage).await;

        assert_eq!(storage.count_users().await.expect("count"), 1);
        let admin = storage
            .get_user_by_email("admin@localhost")
            .await
            .expect("lookup")
            .expect("admin exists");
        assert_eq!(admin.role, UserRole::Admin);
        assert!(admin.id.starts_with("user_"));
    }
}
