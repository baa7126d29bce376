pub const COMMON_ENV_PATH: &str = "./deploy/common.env";
pub const API_CONFIG_PATH: &str = "./deploy/api";

/// 价格历史缓存所在的 Redis DB
pub const REDIS_DB_CACHE: u32 = 0;

/// Redis 连接池最大连接数
pub const REDIS_POOL_MAX_SIZE: usize = 32;

/// PostgreSQL 连接池配置
pub const POSTGRES_MAX_CONNECTIONS: u32 = 100;
pub const POSTGRES_MIN_CONNECTIONS: u32 = 1;
pub const POSTGRES_IDLE_TIMEOUT_SECS: u64 = 600;
pub const POSTGRES_MAX_LIFETIME_SECS: u64 = 1800;
pub const POSTGRES_ACQUIRE_TIMEOUT_SECS: u64 = 30;
pub const POSTGRES_TEST_BEFORE_ACQUIRE: bool = true;

/// 价格历史缓存过期时间（秒），到期由 Redis 自动清除，不做显式失效
pub const PRICE_HISTORY_TTL_SECS: u64 = 60;

/// 校验 RUN_MODE
pub fn validate_run_mode(run_mode: &str) -> anyhow::Result<()> {
	match run_mode {
		"dev" | "test" | "prod" => Ok(()),
		_ => Err(anyhow::anyhow!("Invalid RUN_MODE: {} (expected dev/test/prod)", run_mode)),
	}
}
