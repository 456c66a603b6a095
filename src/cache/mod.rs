//! 对象缓存
//!
//! JWT 中间件按 token 缓存已解析的用户，避免每个请求都访问存储层。

pub mod object_cache;

use async_trait::async_trait;
use std::sync::Arc;

pub use object_cache::moka::MokaCacheWrapper;

/// 缓存查询结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheResult<T> {
    Found(T),
    NotFound,
}

#[async_trait]
pub trait ObjectCache: Send + Sync {
    async fn get_raw(&self, key: &str) -> CacheResult<String>;
    /// ttl 为秒，0 表示使用后端默认值
    async fn insert_raw(&self, key: String, value: String, ttl: u64);
    async fn remove(&self, key: &str);
    async fn invalidate_all(&self);
}

/// 创建缓存实例
pub fn create_object_cache() -> Result<Arc<dyn ObjectCache>, String> {
    let cache = MokaCacheWrapper::new()?;
    Ok(Arc::new(cache))
}
