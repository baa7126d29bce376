use {
	crate::{api_types::PriceRow, db},
	async_trait::async_trait,
	chrono::NaiveDate,
};

/// 关系型存储适配器
/// 按 token 精确匹配 + 时间下界（严格大于）做范围查询，无上界、无分页
#[async_trait]
pub trait PriceStore: Send + Sync {
	async fn query_observations(&self, token_id: &str, since: NaiveDate) -> anyhow::Result<Vec<PriceRow>>;
}

/// 基于 PostgreSQL 的存储实现
pub struct PgPriceStore;

#[async_trait]
impl PriceStore for PgPriceStore {
	async fn query_observations(&self, token_id: &str, since: NaiveDate) -> anyhow::Result<Vec<PriceRow>> {
		let pool = db::get_db_pool()?;

		// 两个输入都走参数绑定，不拼接 SQL
		// 不加 ORDER BY，保持存储的自然返回顺序
		let rows: Vec<PriceRow> = sqlx::query_as("SELECT time_point, mid_point, last_trade_price FROM details_event WHERE id_token = $1 AND time_point > $2").bind(token_id).bind(since).fetch_all(&pool).await?;

		Ok(rows)
	}
}
