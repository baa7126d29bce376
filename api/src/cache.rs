use {async_trait::async_trait, common::redis_pool, redis::AsyncCommands};

/// 缓存查询结果
#[derive(Debug, Clone, PartialEq)]
pub enum CacheLookup {
	Hit(String),
	Miss,
}

/// KV 缓存适配器
/// key 不存在或已过期返回 Miss 而不是错误，只有连接故障才返回 Err
#[async_trait]
pub trait PriceCache: Send + Sync {
	async fn get(&self, key: &str) -> anyhow::Result<CacheLookup>;
	async fn set(&self, key: &str, value: &str, ttl_secs: u64) -> anyhow::Result<()>;
}

/// 基于 Redis 的缓存实现，每次调用从全局连接池借一个连接
pub struct RedisPriceCache;

#[async_trait]
impl PriceCache for RedisPriceCache {
	async fn get(&self, key: &str) -> anyhow::Result<CacheLookup> {
		let mut conn = redis_pool::get_cache_redis_connection().await?;
		let value: Option<String> = conn.get(key).await?;

		// 空字符串与缺失同样视为未命中
		match value {
			Some(v) if !v.is_empty() => Ok(CacheLookup::Hit(v)),
			_ => Ok(CacheLookup::Miss),
		}
	}

	async fn set(&self, key: &str, value: &str, ttl_secs: u64) -> anyhow::Result<()> {
		let mut conn = redis_pool::get_cache_redis_connection().await?;
		// SETEX 语义，同 key 覆盖写
		let _: () = conn.set_ex(key, value, ttl_secs).await?;
		Ok(())
	}
}
