#![allow(dead_code)]

use limesurvey_rpc::jsonrpc::HttpTransport;
use limesurvey_rpc::SurveyClient;
use serde_json::{json, Value};
use tokio::io::AsyncReadExt;
use tokio::net::TcpListener;

/// Path LimeSurvey serves RemoteControl on
pub const ENDPOINT_PATH: &str = "/index.php/admin/remotecontrol";

/// HTTP client that ignores proxy settings from the environment
pub fn direct_http() -> reqwest::Client {
    reqwest::Client::builder()
        .no_proxy()
        .build()
        .expect("build HTTP client")
}

pub fn endpoint(base_url: &str) -> String {
    format!("{}{}", base_url, ENDPOINT_PATH)
}

/// A client talking to `base_url` (e.g. a mockito server) without proxies
pub fn client_for(base_url: &str) -> SurveyClient {
    let transport = HttpTransport::with_client(direct_http(), endpoint(base_url));
    SurveyClient::with_transport(Box::new(transport))
}

pub fn success(result: Value) -> String {
    json!({"id": 1, "result": result, "error": null}).to_string()
}

pub fn failure(error: Value) -> String {
    json!({"id": 1, "result": null, "error": error}).to_string()
}

/// Accepts connections and reads requests but never answers.
///
/// Returns the base URL to point a client at.
pub async fn silent_server() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");

    tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            tokio::spawn(async move {
                let mut buf = [0u8; 4096];
                while let Ok(n) = socket.read(&mut buf).await {
                    if n == 0 {
                        break;
                    }
                }
            });
        }
    });

    format!("http://{}", addr)
}
