use {
	crate::{
		api_types::{HistoryRequest, QueryResult},
		server::{AppState, ClientInfo},
	},
	axum::{
		extract::{Extension, Query, State},
		response::Json,
	},
	tracing::info,
};

/// 查询价格历史
/// 无论成败 transport 状态码都是 200，错误通过 body 的 code 字段表达
pub async fn handle_get_data(State(state): State<AppState>, Extension(client_info): Extension<ClientInfo>, Query(params): Query<HistoryRequest>) -> Json<QueryResult> {
	info!("[GetData] request_id={}, ip={}, token_id={}, day={}", client_info.request_id, client_info.ip, params.token_id, params.day);

	let result = state.query_service.fetch_recent_prices(&params.token_id, params.day).await;
	Json(result)
}
