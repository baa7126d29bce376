use {
	crate::{cache::RedisPriceCache, handlers::handle_get_data, query::QueryService, store::PgPriceStore},
	axum::{
		Router,
		extract::{ConnectInfo, Request},
		http::{HeaderName, StatusCode},
		middleware::{self, Next},
		response::Response,
		routing::get,
	},
	std::{net::SocketAddr, sync::Arc, time::Duration},
	tower_http::{
		compression::CompressionLayer,
		cors::{Any, CorsLayer},
		request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
	},
	uuid::Uuid,
};

#[derive(Clone)]
pub struct AppState {
	pub query_service: Arc<QueryService>,
}

#[derive(Clone)]
pub struct ClientInfo {
	pub request_id: String,
	pub ip: String,
}

// 中间件：提取客户端真实 IP 和请求 id，供 handler 打日志用
// IP 优先级：X-Real-IP > X-Forwarded-For > ConnectInfo
async fn extract_client_info(connect_info: ConnectInfo<SocketAddr>, mut request: Request, next: Next) -> Result<Response, StatusCode> {
	let ip = request
		.headers()
		.get("x-real-ip")
		.and_then(|header| header.to_str().ok())
		.and_then(|value| value.split(',').next())
		.map(|s| s.trim().to_string())
		.or_else(|| request.headers().get("x-forwarded-for").and_then(|header| header.to_str().ok()).and_then(|value| value.split(',').next()).map(|s| s.trim().to_string()))
		.unwrap_or_else(|| connect_info.ip().to_string());

	let x_request_id = HeaderName::from_static("x-request-id");
	let request_id = request.headers().get(x_request_id).and_then(|header| header.to_str().ok()).map(|header| header.to_string()).unwrap_or_else(|| Uuid::new_v4().to_string());
	request.extensions_mut().insert(ClientInfo { request_id, ip });

	Ok(next.run(request).await)
}

pub fn app() -> anyhow::Result<Router> {
	// 缓存和存储的生产实现在这里注入，进程内共享同一个 QueryService
	let query_service = Arc::new(QueryService::new(Arc::new(RedisPriceCache), Arc::new(PgPriceStore)));
	let state = AppState { query_service };

	let x_request_id = HeaderName::from_static("x-request-id");
	let router = Router::new()
		.route("/get_data", get(handle_get_data))
		.layer(PropagateRequestIdLayer::new(x_request_id.clone())) //将请求id从请求头中传递到响应头中
		.layer(CompressionLayer::new())
		.layer(middleware::from_fn(extract_client_info))
		.layer(SetRequestIdLayer::new(x_request_id, MakeRequestUuid)) //生成请求id 并放到请求头中
		.layer(CorsLayer::new().allow_methods(Any).allow_origin(Any).allow_credentials(false).allow_headers(Any).expose_headers(Any).max_age(Duration::from_secs(60) * 10))
		.with_state(state);

	Ok(router)
}
