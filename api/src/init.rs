use {
	crate::config::{get_config, load_config},
	common::common_env,
};

pub async fn init_all() -> anyhow::Result<()> {
	init_load()?;
	init_logging()?;
	crate::db::init_db_pool().await?; // 初始化数据库连接池
	init_redis_pool().await?; // 初始化 Redis 连接池
	Ok(())
}

fn init_load() -> anyhow::Result<()> {
	common_env::load_common_env()?;
	load_config(common::consts::API_CONFIG_PATH)?;
	Ok(())
}

fn init_logging() -> anyhow::Result<()> {
	let config = get_config();
	if config.logging.console {
		common::logging::init_console_logging(&config.logging.level)?;
	} else if let Some(file) = config.logging.file.as_ref() {
		common::logging::init_file_logging(&config.logging.level, file, config.logging.rotation_max_files)?;
	}
	Ok(())
}

async fn init_redis_pool() -> anyhow::Result<()> {
	let env = common::common_env::get_common_env();

	// 初始化 cache Redis 连接池（用于价格历史的读缓存）
	common::redis_pool::init_cache_redis_pool(&env.cache_redis_host, env.cache_redis_password.clone(), common::consts::REDIS_DB_CACHE).await?;
	common::redis_pool::ping_cache_redis().await?;
	tracing::info!("Cache Redis pool initialized (host: {}, db: {})", env.cache_redis_host, common::consts::REDIS_DB_CACHE);

	Ok(())
}
