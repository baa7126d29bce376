use {
	crate::{
		api_error::QueryError,
		api_types::{PriceObservation, QueryResult},
		cache::{CacheLookup, PriceCache},
		store::PriceStore,
	},
	chrono::{Duration, NaiveDate, Utc},
	common::{consts::PRICE_HISTORY_TTL_SECS, key::price_history_key},
	std::{sync::Arc, time::Instant},
	tracing::{debug, error},
};

/// 查询服务：价格历史 cache-aside 读路径的编排者
/// 缓存和存储通过构造函数注入，测试时可替换成内存假实现
pub struct QueryService {
	cache: Arc<dyn PriceCache>,
	store: Arc<dyn PriceStore>,
}

impl QueryService {
	pub fn new(cache: Arc<dyn PriceCache>, store: Arc<dyn PriceStore>) -> Self {
		Self { cache, store }
	}

	/// 查询最近 day 天的价格数据
	/// 计时起点在第一个可失败操作之前，失败路径同样能算出耗时
	/// 任何一步失败都直接折叠成 code=500 的响应，不重试、不降级
	pub async fn fetch_recent_prices(&self, token_id: &str, day: i64) -> QueryResult {
		let start = Instant::now();

		match self.fetch_inner(token_id, day).await {
			Ok(data) => QueryResult::ok(elapsed_ms(start), data),
			Err(e) => {
				error!("token_id={}, day={} - Query failed: {}", token_id, day, e);
				QueryResult::internal_error(elapsed_ms(start))
			}
		}
	}

	async fn fetch_inner(&self, token_id: &str, day: i64) -> Result<Vec<PriceObservation>, QueryError> {
		let cache_key = price_history_key(token_id, day);

		// 1. 先查缓存
		match self.cache.get(&cache_key).await.map_err(QueryError::Cache)? {
			CacheLookup::Hit(cached) => {
				// 缓存中存的就是最终形状，直接反序列化返回
				debug!("Cache hit: {}", cache_key);
				return serde_json::from_str(&cached).map_err(QueryError::CachedPayload);
			}
			CacheLookup::Miss => {
				debug!("Cache miss: {}", cache_key);
			}
		}

		// 2. 未命中，回源查询
		let since = compute_since_date(Utc::now().date_naive(), day)?;
		let rows = self.store.query_observations(token_id, since).await.map_err(QueryError::Store)?;
		let data: Vec<PriceObservation> = rows.into_iter().map(|row| row.into_observation()).collect();

		// 3. 回写缓存，写失败同样视为请求失败
		let value = serde_json::to_string(&data).map_err(QueryError::Serialize)?;
		self.cache.set(&cache_key, &value, PRICE_HISTORY_TTL_SECS).await.map_err(QueryError::Cache)?;

		Ok(data)
	}
}

/// 计算时间下界：查询当天的日期减去 day 天
/// day 为 0 得到今天，负数得到未来日期，照样执行查询
pub fn compute_since_date(today: NaiveDate, day: i64) -> Result<NaiveDate, QueryError> {
	Duration::try_days(day).and_then(|delta| today.checked_sub_signed(delta)).ok_or(QueryError::DateOverflow(day))
}

fn elapsed_ms(start: Instant) -> f64 {
	start.elapsed().as_secs_f64() * 1000.0
}
