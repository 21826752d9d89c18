use axum::{
    Router,
    body::Body,
    extract::{Request, State},
    http::{StatusCode, header},
    response::Response,
    routing::post,
};
use serde_json::Value;

use crate::{
    AppState,
    api::{dispatcher::dispatch_method, types::{JsonRpcRequest, JsonRpcResponse}},
    error::{AppError, JsonRpcErrorResponse},
};

pub fn router() -> Router<AppState> {
    Router::new().route("/", post(rpc_handler))
}

async fn rpc_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    const MAX_BODY_SIZE: usize = 1024 * 1024;

    let body = request.into_body();

    let body_bytes = match axum::body::to_bytes(body, MAX_BODY_SIZE).await {
        Ok(bytes) => bytes,
        Err(e) => {
            let msg = if e.to_string().contains("length limit") {
                "Request body too large (max 1MB)"
            } else {
                "Parse error"
            };
            let err = AppError::InvalidParams(msg.into());
            return build_json_response(
                err.status(),
                JsonRpcErrorResponse::from_error(&err, None),
            );
        }
    };

    let request: JsonRpcRequest = match serde_json::from_slice(&body_bytes) {
        Ok(req) => req,
        Err(_) => {
            let err = AppError::InvalidParams("Parse error".into());
            return build_json_response(
                err.status(),
                JsonRpcErrorResponse::from_error(&err, None),
            );
        }
    };

    if request.jsonrpc != "2.0" {
        let err = AppError::InvalidParams("Invalid JSON-RPC version".into());
        return build_json_response(
            err.status(),
            JsonRpcErrorResponse::from_error(&err, request.id),
        );
    }

    match dispatch_method(&request.method, request.params, state).await {
        Ok(value) => {
            let response = serde_json::to_value(JsonRpcResponse::new(value, request.id))
                .expect("JsonRpcResponse serialization failed");
            build_json_response(StatusCode::OK, response)
        }
        Err(err) => build_json_response(
            err.status(),
            JsonRpcErrorResponse::from_error(&err, request.id),
        ),
    }
}

fn build_json_response(status: StatusCode, value: Value) -> Response {
    let body = serde_json::to_string(&value).expect("JSON serialization failed");

    Response::builder()
        .status(status)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .expect("Response build failed")
}
