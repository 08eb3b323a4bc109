//! Demo HTTP listener.
//!
//! ```bash
//! APIGEN_AUTH_SECRET=100500 cargo run -p apigen-demo
//! curl 'http://127.0.0.1:8080/user/profile?login=rvasily'
//! curl -X POST -H 'X-Auth: 100500' -d 'login=new_moderator&age=32&status=moderator' \
//!     http://127.0.0.1:8080/user/create
//! ```

use anyhow::{anyhow, Context as _, Result};
use apigen::AuthGuard;
use apigen_demo::{decode_body, App, UserStore};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const ADDR_ENV: &str = "APIGEN_DEMO_ADDR";
const DEFAULT_ADDR: &str = "127.0.0.1:8080";

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = std::env::var(ADDR_ENV).unwrap_or_else(|_| DEFAULT_ADDR.to_string());
    let app = App::new(UserStore::seeded(), AuthGuard::from_env());

    let server =
        tiny_http::Server::http(&addr).map_err(|e| anyhow!("failed to bind {addr}: {e}"))?;
    tracing::info!(%addr, "listening");

    for request in server.incoming_requests() {
        if let Err(e) = respond(&app, request) {
            tracing::warn!(error = %e, "failed to answer request");
        }
    }

    Ok(())
}

fn respond(app: &App, mut request: tiny_http::Request) -> Result<()> {
    let mut bytes = Vec::new();
    request
        .as_reader()
        .read_to_end(&mut bytes)
        .context("failed to read request body")?;
    let body = decode_body(&bytes);

    let headers: Vec<(String, String)> = request
        .headers()
        .iter()
        .map(|h| (h.field.as_str().to_string(), h.value.as_str().to_string()))
        .collect();
    let content_type = headers
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case("content-type"))
        .map(|(_, value)| value.as_str());

    let response = app.handle(
        request.method().as_str(),
        request.url(),
        headers.iter().map(|(n, v)| (n.as_str(), v.as_str())),
        content_type,
        &body,
    );

    let (status, body) = response.into_parts();
    let content_type = tiny_http::Header::from_bytes("Content-Type", apigen::CONTENT_TYPE)
        .map_err(|_| anyhow!("invalid content type header"))?;

    request
        .respond(
            tiny_http::Response::from_string(body)
                .with_status_code(status.as_u16())
                .with_header(content_type),
        )
        .context("failed to write response")
}
