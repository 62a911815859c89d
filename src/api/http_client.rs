use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::api::{NewsApi, NewsletterResponse, SyncResponse};
use crate::app::{BotbiError, Result};
use crate::domain::{Article, MarketData};

pub const DEFAULT_BASE_URL: &str = "https://botbi-hackathon.onrender.com";
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_millis(8000);

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Serialize)]
struct NewsletterRequest<'a> {
    email: &'a str,
}

pub struct HttpNewsApi {
    client: Client,
    base_url: Url,
    read_timeout: Duration,
}

impl HttpNewsApi {
    pub fn new(base_url: &str, read_timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .gzip(true)
            .brotli(true)
            .user_agent(concat!("botbi/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Self::with_client(client, base_url, read_timeout)
    }

    pub fn with_client(client: Client, base_url: &str, read_timeout: Duration) -> Result<Self> {
        Ok(Self {
            client,
            base_url: Url::parse(base_url)?,
            read_timeout,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path)?)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.endpoint(path)?;
        tracing::debug!("GET {}", url);
        let request = self.client.get(url).timeout(self.read_timeout);
        send_json(request, Some(self.read_timeout)).await
    }
}

/// `read_timeout` is the per-request limit, if one was set. Timeouts of
/// requests without one (connect timeouts on POSTs) count as network errors.
async fn send_json<T: DeserializeOwned>(
    request: RequestBuilder,
    read_timeout: Option<Duration>,
) -> Result<T> {
    let classify = |err: reqwest::Error| match read_timeout {
        Some(limit) if err.is_timeout() => BotbiError::Timeout(limit),
        _ => BotbiError::Network(err),
    };

    let response = request.send().await.map_err(classify)?;
    response.error_for_status_ref().map_err(classify)?;
    response.json::<T>().await.map_err(classify)
}

#[async_trait]
impl NewsApi for HttpNewsApi {
    async fn fetch_articles(&self) -> Result<Vec<Article>> {
        self.get_json("noticias").await
    }

    async fn fetch_markets(&self) -> Result<MarketData> {
        self.get_json("mercados").await
    }

    async fn sync_news(&self) -> Result<SyncResponse> {
        let url = self.endpoint("sincronizar-noticias")?;
        tracing::debug!("POST {}", url);
        send_json(self.client.post(url), None).await
    }

    async fn send_newsletter(&self, email: &str) -> Result<NewsletterResponse> {
        let url = self.endpoint("enviar-newsletter")?;
        tracing::debug!("POST {}", url);
        let request = self.client.post(url).json(&NewsletterRequest { email });
        send_json(request, None).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints_join_base_url() {
        let api = HttpNewsApi::new(DEFAULT_BASE_URL, DEFAULT_READ_TIMEOUT).unwrap();
        assert_eq!(
            api.endpoint("noticias").unwrap().as_str(),
            "https://botbi-hackathon.onrender.com/noticias"
        );
        assert_eq!(
            api.endpoint("sincronizar-noticias").unwrap().as_str(),
            "https://botbi-hackathon.onrender.com/sincronizar-noticias"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        let result = HttpNewsApi::new("not a url", DEFAULT_READ_TIMEOUT);
        assert!(matches!(result, Err(BotbiError::InvalidUrl(_))));
    }

    #[test]
    fn test_newsletter_request_body() {
        let body = serde_json::to_string(&NewsletterRequest { email: "a@b.c" }).unwrap();
        assert_eq!(body, r#"{"email":"a@b.c"}"#);
    }

    /// Serves one canned HTTP response per connection.
    async fn serve(response: &'static str) -> String {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                let mut buf = [0u8; 4096];
                let _ = socket.read(&mut buf).await;
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });
        format!("http://{}/", addr)
    }

    fn local_api(base: &str, read_timeout: Duration) -> HttpNewsApi {
        let client = Client::builder().no_proxy().build().unwrap();
        HttpNewsApi::with_client(client, base, read_timeout).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_articles_decodes_body() {
        let base = serve(
            "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: 39\r\nconnection: close\r\n\r\n[{\"titulo\":\"A\",\"categoria\":\"Negocios\"}]",
        )
        .await;
        let api = local_api(&base, DEFAULT_READ_TIMEOUT);

        let articles = api.fetch_articles().await.unwrap();
        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].title, "A");
    }

    #[tokio::test]
    async fn test_server_error_status_is_network_error() {
        let base = serve(
            "HTTP/1.1 500 Internal Server Error\r\ncontent-length: 0\r\nconnection: close\r\n\r\n",
        )
        .await;
        let api = local_api(&base, DEFAULT_READ_TIMEOUT);

        let err = api.fetch_markets().await.unwrap_err();
        assert!(matches!(err, BotbiError::Network(_)));
    }

    /// Accepts connections and never answers.
    async fn silent_server() -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });
        format!("http://{}/", addr)
    }

    #[tokio::test]
    async fn test_silent_server_times_out() {
        let base = silent_server().await;
        let timeout = Duration::from_millis(100);
        let api = local_api(&base, timeout);

        let err = api.fetch_articles().await.unwrap_err();
        assert!(matches!(err, BotbiError::Timeout(t) if t == timeout));
    }

    #[tokio::test]
    async fn test_post_timeout_is_not_reported_as_read_timeout() {
        let base = silent_server().await;
        let client = Client::builder()
            .no_proxy()
            .timeout(Duration::from_millis(100))
            .build()
            .unwrap();
        let api = HttpNewsApi::with_client(client, &base, DEFAULT_READ_TIMEOUT).unwrap();

        let err = api.sync_news().await.unwrap_err();
        assert!(matches!(err, BotbiError::Network(ref e) if e.is_timeout()));
        assert!(err.is_network());
    }
}
