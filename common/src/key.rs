// Redis key generation utilities

/// 价格历史缓存 key: get_data_{token_id}_{day}
/// 相同输入永远生成相同的 key；不同 (token_id, day) 之间不做碰撞处理
pub fn price_history_key(token_id: &str, day: i64) -> String {
	format!("get_data_{}_{}", token_id, day)
}
