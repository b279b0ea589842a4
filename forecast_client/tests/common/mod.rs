#![allow(dead_code)]

use forecast_client::{HttpForecastService, config::ServiceConfig};
use secrecy::SecretString;
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::{TcpListener, TcpStream},
    task::JoinHandle,
};

pub const CATALOG_JSON: &str = r#"{"symbols":[
    {"symbol":"AAPL","name":"Apple Inc."},
    {"symbol":"GOOGL","name":"Alphabet Inc."},
    {"symbol":"SPY","name":"SPDR S&P 500 ETF Trust"}
]}"#;

pub const PREDICTION_JSON: &str = r#"{
    "id": "0f8fad5b-d9cb-469f-a165-70867728950e",
    "symbol": "AAPL",
    "predictions": [103.0, 105.0],
    "actual_prices": [100.0, 102.0, 101.0],
    "dates": ["2024-05-01", "2024-05-02", "2024-05-03"],
    "prediction_dates": ["2024-05-06", "2024-05-07"],
    "metrics": {"mse": 4.0, "mae": 1.5, "rmse": 2.0, "accuracy": 98.5},
    "indicators": {"current_price": 101.0, "rsi": 48.2},
    "timestamp": "2024-05-03T21:15:02"
}"#;

pub const ANALYSIS_JSON: &str = r#"{
    "symbol": "AAPL",
    "current_price": 101.0,
    "change": -1.0,
    "change_percent": -0.98,
    "volume": 48500000,
    "moving_averages": {"ma_10": 100.2, "ma_50": 102.4, "ma_200": 97.0},
    "rsi": 48.2,
    "recommendation": "HOLD"
}"#;

/// Accepts exactly one connection, answers it with `status` + `body`, and
/// hands back the raw request text through the join handle.
pub async fn serve_once(status: u16, body: &'static str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");

    let handle = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.expect("accept");
        let request = read_request(&mut stream).await;
        let reason = if status < 400 { "OK" } else { "ERROR" };
        let response = format!(
            "HTTP/1.1 {status} {reason}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        );
        stream.write_all(response.as_bytes()).await.expect("write");
        let _ = stream.shutdown().await;
        request
    });

    (format!("http://{addr}"), handle)
}

/// A base URL nothing is listening on.
pub async fn dead_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    format!("http://{addr}")
}

pub fn client(base_url: &str, token: Option<&str>) -> HttpForecastService {
    let config = ServiceConfig {
        base_url: base_url.to_string(),
        timeout_secs: 5,
        ..ServiceConfig::default()
    };
    let token = token.map(|t| SecretString::new(t.into()));
    HttpForecastService::with_token(&config, token).expect("client")
}

async fn read_request(stream: &mut TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    loop {
        let n = stream.read(&mut chunk).await.expect("read");
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);

        if let Some(end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            let head = String::from_utf8_lossy(&buf[..end]).to_lowercase();
            let body_len = head
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .and_then(|v| v.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= end + 4 + body_len {
                break;
            }
        }
    }
    String::from_utf8_lossy(&buf).into_owned()
}
