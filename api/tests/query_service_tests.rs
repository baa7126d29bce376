//! QueryService cache-aside 读路径测试
//!
//! 用内存假实现替换 Redis 和 PostgreSQL，覆盖命中/未命中/过期/故障路径

use {
	api::{
		api_types::PriceRow,
		cache::{CacheLookup, PriceCache},
		query::{QueryService, compute_since_date},
		store::PriceStore,
	},
	async_trait::async_trait,
	chrono::{NaiveDate, NaiveDateTime, Utc},
	common::{consts::PRICE_HISTORY_TTL_SECS, key::price_history_key},
	std::{
		collections::HashMap,
		sync::{
			Arc, Mutex,
			atomic::{AtomicUsize, Ordering},
		},
	},
};

// ============================================================================
// 测试辅助
// ============================================================================

/// 内存假缓存，记录 set 的 TTL，支持手动制造过期
#[derive(Default)]
struct FakeCache {
	entries: Mutex<HashMap<String, (String, u64)>>,
	fail_get: bool,
	fail_set: bool,
}

impl FakeCache {
	/// 直接塞一个原始值（绕过 set 的正常路径）
	fn put_raw(&self, key: &str, value: &str) {
		self.entries.lock().unwrap().insert(key.to_string(), (value.to_string(), 0));
	}

	/// 模拟 TTL 到期，全部清掉
	fn expire_all(&self) {
		self.entries.lock().unwrap().clear();
	}

	fn last_ttl(&self, key: &str) -> Option<u64> {
		self.entries.lock().unwrap().get(key).map(|(_, ttl)| *ttl)
	}
}

#[async_trait]
impl PriceCache for FakeCache {
	async fn get(&self, key: &str) -> anyhow::Result<CacheLookup> {
		if self.fail_get {
			return Err(anyhow::anyhow!("cache connection refused"));
		}
		// 与 Redis 适配器一致：空字符串视为未命中
		match self.entries.lock().unwrap().get(key) {
			Some((v, _)) if !v.is_empty() => Ok(CacheLookup::Hit(v.clone())),
			_ => Ok(CacheLookup::Miss),
		}
	}

	async fn set(&self, key: &str, value: &str, ttl_secs: u64) -> anyhow::Result<()> {
		if self.fail_set {
			return Err(anyhow::anyhow!("cache connection refused"));
		}
		self.entries.lock().unwrap().insert(key.to_string(), (value.to_string(), ttl_secs));
		Ok(())
	}
}

/// 内存假存储，带查询计数器，可替换返回的行、记录收到的时间下界
#[derive(Default)]
struct FakeStore {
	rows: Mutex<Vec<PriceRow>>,
	query_count: AtomicUsize,
	last_since: Mutex<Option<NaiveDate>>,
	fail: bool,
}

impl FakeStore {
	fn with_rows(rows: Vec<PriceRow>) -> Self {
		Self { rows: Mutex::new(rows), ..Default::default() }
	}

	fn set_rows(&self, rows: Vec<PriceRow>) {
		*self.rows.lock().unwrap() = rows;
	}

	fn query_count(&self) -> usize {
		self.query_count.load(Ordering::SeqCst)
	}
}

#[async_trait]
impl PriceStore for FakeStore {
	async fn query_observations(&self, _token_id: &str, since: NaiveDate) -> anyhow::Result<Vec<PriceRow>> {
		self.query_count.fetch_add(1, Ordering::SeqCst);
		*self.last_since.lock().unwrap() = Some(since);
		if self.fail {
			return Err(anyhow::anyhow!("store connection refused"));
		}
		Ok(self.rows.lock().unwrap().clone())
	}
}

fn row(time: &str, mid_point: f64, last_trade_price: f64) -> PriceRow {
	PriceRow { time_point: NaiveDateTime::parse_from_str(time, "%Y-%m-%dT%H:%M:%S").unwrap(), mid_point, last_trade_price }
}

fn service(cache: Arc<FakeCache>, store: Arc<FakeStore>) -> QueryService {
	QueryService::new(cache, store)
}

// ============================================================================
// 缓存 key
// ============================================================================

#[test]
fn test_cache_key_deterministic() {
	assert_eq!(price_history_key("A", 7), price_history_key("A", 7));
	assert_eq!(price_history_key("A", 7), "get_data_A_7");
	assert_ne!(price_history_key("A", 7), price_history_key("A", 8));
	assert_ne!(price_history_key("A", 7), price_history_key("B", 7));
	assert_eq!(price_history_key("TOK1", -3), "get_data_TOK1_-3");
}

// ============================================================================
// 命中 / 未命中
// ============================================================================

#[tokio::test]
async fn test_second_call_served_from_cache() {
	let cache = Arc::new(FakeCache::default());
	let store = Arc::new(FakeStore::with_rows(vec![row("2024-01-10T10:00:00", 101.5, 101.6)]));
	let svc = service(cache.clone(), store.clone());

	let first = svc.fetch_recent_prices("TOK1", 5).await;
	assert_eq!(first.code, 200);
	assert_eq!(store.query_count(), 1);

	// TTL 内的第二次调用走缓存，不再查库
	let second = svc.fetch_recent_prices("TOK1", 5).await;
	assert_eq!(second.code, 200);
	assert_eq!(store.query_count(), 1);
	assert_eq!(first.data, second.data);

	// 回写使用固定 60 秒 TTL
	assert_eq!(cache.last_ttl(&price_history_key("TOK1", 5)), Some(PRICE_HISTORY_TTL_SECS));
	assert_eq!(PRICE_HISTORY_TTL_SECS, 60);
}

#[tokio::test]
async fn test_concrete_scenario_tok1() {
	let cache = Arc::new(FakeCache::default());
	let store = Arc::new(FakeStore::with_rows(vec![row("2024-01-10T10:00:00", 101.5, 101.6)]));
	let svc = service(cache.clone(), store.clone());

	let result = svc.fetch_recent_prices("TOK1", 5).await;
	assert_eq!(result.message, "Request ok");
	assert_eq!(result.code, 200);
	assert!(result.time >= 0.0);

	let data = result.data.expect("data should be present");
	assert_eq!(data.len(), 1);
	assert_eq!(data[0].time, "2024-01-10T10:00:00");
	assert_eq!(data[0].mid_point, 101.5);
	assert_eq!(data[0].last_trade_price, 101.6);

	// 存储清空后再次调用，仍然从缓存返回同一份数据
	store.set_rows(vec![]);
	let cached = svc.fetch_recent_prices("TOK1", 5).await;
	assert_eq!(cached.code, 200);
	assert_eq!(cached.data.unwrap(), data);
	assert_eq!(store.query_count(), 1);
}

#[tokio::test]
async fn test_cache_round_trip_lossless() {
	let cache = Arc::new(FakeCache::default());
	let store = Arc::new(FakeStore::with_rows(vec![row("2024-01-10T10:00:00", 0.1234567890123, 99999999.5), row("2024-01-11T23:59:59", -3.25, 0.0)]));
	let svc = service(cache.clone(), store.clone());

	let first = svc.fetch_recent_prices("TOK1", 5).await.data.unwrap();
	let second = svc.fetch_recent_prices("TOK1", 5).await.data.unwrap();

	// 第二次经过缓存的序列化/反序列化，顺序和三个字段都无损
	assert_eq!(store.query_count(), 1);
	assert_eq!(first, second);
	assert_eq!(first[0].time, "2024-01-10T10:00:00");
	assert_eq!(first[1].time, "2024-01-11T23:59:59");
}

#[tokio::test]
async fn test_ttl_expiry_forces_requery() {
	let cache = Arc::new(FakeCache::default());
	let store = Arc::new(FakeStore::with_rows(vec![row("2024-01-10T10:00:00", 101.5, 101.6)]));
	let svc = service(cache.clone(), store.clone());

	svc.fetch_recent_prices("TOK1", 5).await;
	assert_eq!(store.query_count(), 1);

	// 模拟 TTL 到期后缓存条目消失，再次调用必须回源
	cache.expire_all();
	let result = svc.fetch_recent_prices("TOK1", 5).await;
	assert_eq!(result.code, 200);
	assert_eq!(store.query_count(), 2);
}

#[tokio::test]
async fn test_empty_string_cache_value_is_miss() {
	let cache = Arc::new(FakeCache::default());
	let store = Arc::new(FakeStore::with_rows(vec![row("2024-01-10T10:00:00", 101.5, 101.6)]));
	let svc = service(cache.clone(), store.clone());

	// 空字符串不算命中，照样回源
	cache.put_raw(&price_history_key("TOK1", 5), "");
	let result = svc.fetch_recent_prices("TOK1", 5).await;
	assert_eq!(result.code, 200);
	assert_eq!(result.data.unwrap().len(), 1);
	assert_eq!(store.query_count(), 1);
}

#[tokio::test]
async fn test_cached_empty_array_is_a_hit() {
	let cache = Arc::new(FakeCache::default());
	let store = Arc::new(FakeStore::default());
	let svc = service(cache.clone(), store.clone());

	// 存储返回空列表，缓存里写入的是 "[]"，属于合法命中
	let first = svc.fetch_recent_prices("TOK1", 5).await;
	assert_eq!(first.code, 200);
	assert_eq!(first.data.unwrap(), vec![]);
	assert_eq!(store.query_count(), 1);

	let second = svc.fetch_recent_prices("TOK1", 5).await;
	assert_eq!(second.code, 200);
	assert_eq!(second.data.unwrap(), vec![]);
	assert_eq!(store.query_count(), 1);
}

// ============================================================================
// 故障路径
// ============================================================================

#[tokio::test]
async fn test_store_failure_returns_internal_error() {
	let cache = Arc::new(FakeCache::default());
	let store = Arc::new(FakeStore { fail: true, ..Default::default() });
	let svc = service(cache, store);

	let result = svc.fetch_recent_prices("TOK1", 5).await;
	assert_eq!(result.message, "Internal Server Error");
	assert_eq!(result.code, 500);
	assert!(result.data.is_none());
	assert!(result.time >= 0.0);
}

#[tokio::test]
async fn test_cache_get_failure_returns_internal_error() {
	let cache = Arc::new(FakeCache { fail_get: true, ..Default::default() });
	let store = Arc::new(FakeStore::with_rows(vec![row("2024-01-10T10:00:00", 101.5, 101.6)]));
	let svc = service(cache, store.clone());

	// 缓存故障直接整个请求失败，不降级为跳过缓存
	let result = svc.fetch_recent_prices("TOK1", 5).await;
	assert_eq!(result.code, 500);
	assert!(result.data.is_none());
	assert_eq!(store.query_count(), 0);
}

#[tokio::test]
async fn test_cache_set_failure_returns_internal_error() {
	let cache = Arc::new(FakeCache { fail_set: true, ..Default::default() });
	let store = Arc::new(FakeStore::with_rows(vec![row("2024-01-10T10:00:00", 101.5, 101.6)]));
	let svc = service(cache, store.clone());

	// 回写失败同样要被捕获并折叠成 500
	let result = svc.fetch_recent_prices("TOK1", 5).await;
	assert_eq!(result.message, "Internal Server Error");
	assert_eq!(result.code, 500);
	assert_eq!(store.query_count(), 1);
}

#[tokio::test]
async fn test_malformed_cached_payload_returns_internal_error() {
	let cache = Arc::new(FakeCache::default());
	let store = Arc::new(FakeStore::default());
	let svc = service(cache.clone(), store.clone());

	cache.put_raw(&price_history_key("TOK1", 5), "{not json");
	let result = svc.fetch_recent_prices("TOK1", 5).await;
	assert_eq!(result.code, 500);
	assert!(result.data.is_none());
	assert_eq!(store.query_count(), 0);
}

// ============================================================================
// 时间下界
// ============================================================================

#[test]
fn test_compute_since_date() {
	let today = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();

	assert_eq!(compute_since_date(today, 5).unwrap(), NaiveDate::from_ymd_opt(2024, 1, 10).unwrap());
	// day = 0 得到今天
	assert_eq!(compute_since_date(today, 0).unwrap(), today);
	// 负数得到未来日期，不报错
	assert_eq!(compute_since_date(today, -3).unwrap(), NaiveDate::from_ymd_opt(2024, 1, 18).unwrap());
	// 溢出走错误路径
	assert!(compute_since_date(today, i64::MAX).is_err());
}

#[tokio::test]
async fn test_lookback_passed_to_store() {
	let cache = Arc::new(FakeCache::default());
	let store = Arc::new(FakeStore::default());
	let svc = service(cache, store.clone());

	let result = svc.fetch_recent_prices("TOK1", 5).await;
	assert_eq!(result.code, 200);

	let expected = compute_since_date(Utc::now().date_naive(), 5).unwrap();
	assert_eq!(*store.last_since.lock().unwrap(), Some(expected));
}
