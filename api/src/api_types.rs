use {
	chrono::NaiveDateTime,
	serde::{Deserialize, Serialize},
	sqlx::FromRow,
};

/// get_data 请求参数，两个都是必填
/// day 不做范围校验，0 或负数原样传给日期运算和查询
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryRequest {
	pub token_id: String,
	pub day: i64,
}

/// 单条价格观测记录，响应和缓存使用同一种形状
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceObservation {
	pub time: String,
	pub mid_point: f64,
	pub last_trade_price: f64,
}

/// details_event 表的原始行
#[derive(Debug, Clone, FromRow)]
pub struct PriceRow {
	pub time_point: NaiveDateTime,
	pub mid_point: f64,
	pub last_trade_price: f64,
}

impl PriceRow {
	/// 转换为响应格式，时间渲染为 ISO-8601 字符串
	/// %.f 在小数秒为 0 时不输出任何内容
	pub fn into_observation(self) -> PriceObservation {
		PriceObservation { time: self.time_point.format("%Y-%m-%dT%H:%M:%S%.f").to_string(), mid_point: self.mid_point, last_trade_price: self.last_trade_price }
	}
}

/// 查询结果，每个请求构造一次，序列化为响应体后丢弃
/// transport 状态码恒为 200，调用方通过 body 的 code 字段判断成败
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryResult {
	pub message: String,
	pub code: i32,
	pub time: f64,
	pub data: Option<Vec<PriceObservation>>,
}

impl QueryResult {
	/// 创建成功响应
	pub fn ok(elapsed_ms: f64, data: Vec<PriceObservation>) -> Self {
		Self { message: "Request ok".to_string(), code: 200, time: elapsed_ms, data: Some(data) }
	}

	/// 创建失败响应，data 为 null
	pub fn internal_error(elapsed_ms: f64) -> Self {
		Self { message: "Internal Server Error".to_string(), code: 500, time: elapsed_ms, data: None }
	}
}
