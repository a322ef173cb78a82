use board_shared::{ApiError, ApiRequest, Method};
use gloo::net::http::{Request, RequestBuilder};
use serde::de::DeserializeOwned;

fn builder(request: &ApiRequest) -> RequestBuilder {
    let path = request.path();
    match request.method() {
        Method::Get => Request::get(&path),
        Method::Post => Request::post(&path),
        Method::Put => Request::put(&path),
        Method::Patch => Request::patch(&path),
        Method::Delete => Request::delete(&path),
    }
}

/// One attempt, same origin, no timeout. Non-2xx answers are errors.
async fn send(request: &ApiRequest) -> Result<String, ApiError> {
    request.validate()?;
    let path = request.path();
    let transport = |err: gloo::net::Error| ApiError::Transport {
        path: path.clone(),
        message: err.to_string(),
    };

    let response = match request.encode_body()? {
        Some(body) => builder(request)
            .header("Content-Type", "application/json")
            .body(body)
            .map_err(transport)?
            .send()
            .await
            .map_err(transport)?,
        None => builder(request).send().await.map_err(transport)?,
    };

    let status = response.status();
    let body = response.text().await.map_err(transport)?;
    if !response.ok() {
        tracing::warn!(method = request.method().as_str(), path = %path, status, "board API rejected request");
        return Err(ApiError::Status { path, status, body });
    }
    Ok(body)
}

pub async fn execute(request: &ApiRequest) -> Result<(), ApiError> {
    send(request).await.map(|_| ())
}

pub async fn fetch_json<T>(request: &ApiRequest) -> Result<T, ApiError>
where
    T: DeserializeOwned,
{
    let body = send(request).await?;
    serde_json::from_str(&body).map_err(|err| ApiError::Decode {
        path: request.path(),
        message: err.to_string(),
    })
}
