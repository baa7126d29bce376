use thiserror::Error;

/// 查询链路的错误分类
/// 对调用方统一折叠成 code=500 的响应体，具体原因只进日志
#[derive(Debug, Error)]
pub enum QueryError {
	#[error("Cache error: {0}")]
	Cache(#[source] anyhow::Error),

	#[error("Store error: {0}")]
	Store(#[source] anyhow::Error),

	#[error("Malformed cached payload: {0}")]
	CachedPayload(#[source] serde_json::Error),

	#[error("Serialize error: {0}")]
	Serialize(#[source] serde_json::Error),

	#[error("Date arithmetic overflow: day={0}")]
	DateOverflow(i64),
}
