use {
	crate::consts::COMMON_ENV_PATH,
	config::{Config, Environment},
	serde::{Deserialize, Serialize},
	tokio::sync::OnceCell,
};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CommonEnv {
	pub run_mode: String,

	// Cache Redis 配置
	pub cache_redis_host: String,
	pub cache_redis_password: Option<String>,

	// PostgreSQL 配置
	pub postgres_host: String,
	pub postgres_port: u16,
	pub postgres_user: String,
	pub postgres_password: String,
	pub postgres_database: String,
}

pub static COMMON_ENV: OnceCell<CommonEnv> = OnceCell::const_new();

pub fn load_common_env() -> anyhow::Result<()> {
	// 使用 dotenvy 从文件加载环境变量到进程环境变量中
	dotenvy::from_path(COMMON_ENV_PATH)?;

	// 使用 config crate 从环境变量反序列化到 CommonEnv
	let config = Config::builder().add_source(Environment::default()).build()?;

	let common_env: CommonEnv = config.try_deserialize()?;
	println!("Common env configuration loaded for mode: {}", common_env.run_mode);
	COMMON_ENV.set(common_env)?;
	check_common_env()?;
	Ok(())
}

pub fn check_common_env() -> anyhow::Result<()> {
	let common_env = get_common_env();

	// 验证 RUN_MODE
	crate::consts::validate_run_mode(&common_env.run_mode)?;

	if common_env.cache_redis_host.is_empty() {
		return Err(anyhow::anyhow!("Cache Redis host is empty"));
	}
	if common_env.postgres_host.is_empty() {
		return Err(anyhow::anyhow!("PostgreSQL host is empty"));
	}
	if common_env.postgres_user.is_empty() {
		return Err(anyhow::anyhow!("PostgreSQL user is empty"));
	}
	if common_env.postgres_database.is_empty() {
		return Err(anyhow::anyhow!("PostgreSQL database is empty"));
	}

	Ok(())
}

pub fn get_common_env() -> &'static CommonEnv {
	COMMON_ENV.get().expect("Common env not loaded")
}
