//! HTTP client for the statement backend.
//!
//! Requests are plain request/response: no retries, no backoff. Callers
//! decide how a failure degrades (empty view, alert, skipped update).

use anyhow::{bail, Context, Result};
use reqwest::multipart::{Form, Part};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

use crate::types::{AllTransactions, CategoryUpdate, UploadResponse};

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5002";

#[derive(Debug, Clone)]
pub struct StatementClient {
    base_url: String,
    http: reqwest::Client,
}

impl StatementClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("build http client")?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `GET /api/all-transactions`
    pub async fn all_transactions(&self) -> Result<AllTransactions> {
        let url = self.url("/api/all-transactions");
        debug!(%url, "loading transactions");

        let resp = self.http.get(&url).send().await.context("all-transactions request")?;
        let status = resp.status();
        if !status.is_success() {
            let txt = resp.text().await.unwrap_or_default();
            bail!("all-transactions error: {status} {txt}");
        }

        let out: AllTransactions = resp.json().await.context("parse all-transactions response")?;
        if !out.success {
            bail!("backend reported failure loading transactions");
        }
        info!(
            transactions = out.transactions.len(),
            months = out.monthly_summary.len(),
            "loaded transactions"
        );
        Ok(out)
    }

    /// `POST /api/upload` with the statement as multipart field `file`.
    ///
    /// Only PDFs are sent. On success the caller should re-fetch everything.
    pub async fn upload(&self, path: &Path) -> Result<UploadResponse> {
        if !is_pdf(path) {
            bail!("Invalid file type: {} (expected a .pdf statement)", path.display());
        }
        let bytes = tokio::fs::read(path)
            .await
            .with_context(|| format!("read {}", path.display()))?;
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "statement.pdf".to_string());

        let part = Part::bytes(bytes)
            .file_name(file_name)
            .mime_str("application/pdf")?;
        let form = Form::new().part("file", part);

        let url = self.url("/api/upload");
        debug!(%url, path = %path.display(), "uploading statement");
        let resp = self
            .http
            .post(&url)
            .multipart(form)
            .send()
            .await
            .context("upload request")?;

        let status = resp.status();
        let body = resp.text().await.context("read upload response")?;
        // Error responses carry {"error": ...} too, so parse before checking status.
        let out: UploadResponse = serde_json::from_str(&body).unwrap_or_default();
        if !out.success {
            let msg = out
                .error
                .unwrap_or_else(|| format!("upload failed with status {status}"));
            bail!(msg);
        }
        info!(path = %path.display(), "uploaded statement");
        Ok(out)
    }

    /// `POST /api/category`. Success is the HTTP status alone.
    pub async fn save_category(&self, update: &CategoryUpdate) -> Result<()> {
        let url = self.url("/api/category");
        let resp = self
            .http
            .post(&url)
            .json(update)
            .send()
            .await
            .context("category request")?;

        let status = resp.status();
        if !status.is_success() {
            let txt = resp.text().await.unwrap_or_default();
            bail!("category error: {status} {txt}");
        }
        debug!(id = %update.id, category = %update.category, "saved category");
        Ok(())
    }
}

/// `.pdf` extension, any case.
pub fn is_pdf(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("pdf"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Accept one connection, answer with `status` + JSON `body`, return the raw request.
    async fn serve_once(
        status: &'static str,
        body: &'static str,
    ) -> (String, tokio::task::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base = format!("http://{}", listener.local_addr().unwrap());
        let handle = tokio::spawn(async move {
            let (mut sock, _) = listener.accept().await.unwrap();
            let mut buf = Vec::new();
            let mut chunk = [0u8; 4096];
            loop {
                let n = sock.read(&mut chunk).await.unwrap();
                if n == 0 {
                    break;
                }
                buf.extend_from_slice(&chunk[..n]);
                let text = String::from_utf8_lossy(&buf);
                if let Some(end) = text.find("\r\n\r\n") {
                    let content_length = text[..end]
                        .lines()
                        .find_map(|l| {
                            let (k, v) = l.split_once(':')?;
                            k.eq_ignore_ascii_case("content-length")
                                .then(|| v.trim().parse::<usize>().ok())
                                .flatten()
                        })
                        .unwrap_or(0);
                    if buf.len() >= end + 4 + content_length {
                        break;
                    }
                }
            }
            let resp = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            sock.write_all(resp.as_bytes()).await.unwrap();
            sock.shutdown().await.ok();
            String::from_utf8_lossy(&buf).into_owned()
        });
        (base, handle)
    }

    fn client(base: &str) -> StatementClient {
        StatementClient::new(base, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_base_url_trailing_slash() {
        let c = client("http://localhost:5002/");
        assert_eq!(c.url("/api/upload"), "http://localhost:5002/api/upload");
    }

    #[test]
    fn test_is_pdf() {
        assert!(is_pdf(Path::new("izpisek_03.PDF")));
        assert!(is_pdf(Path::new("/tmp/a.pdf")));
        assert!(!is_pdf(Path::new("a.csv")));
        assert!(!is_pdf(Path::new("pdf")));
    }

    #[tokio::test]
    async fn test_upload_rejects_non_pdf_without_request() {
        let c = client("http://127.0.0.1:9");
        let err = c.upload(Path::new("statement.csv")).await.unwrap_err();
        assert!(err.to_string().contains("Invalid file type"));
    }

    #[tokio::test]
    async fn test_all_transactions_roundtrip() {
        let (base, handle) = serve_once(
            "200 OK",
            r#"{"success":true,"transactions":[{"id":"a","date":"01.02.2024","amount":3.0,"type":"expense"}],"monthly_summary":[],"total_income":0,"total_expenses":3.0}"#,
        )
        .await;
        let all = client(&base).all_transactions().await.unwrap();
        assert_eq!(all.transactions.len(), 1);
        assert_eq!(all.total_expenses, 3.0);

        let req = handle.await.unwrap();
        assert!(req.starts_with("GET /api/all-transactions "));
    }

    #[tokio::test]
    async fn test_all_transactions_success_false_is_error() {
        let (base, _handle) = serve_once("200 OK", r#"{"success":false}"#).await;
        assert!(client(&base).all_transactions().await.is_err());
    }

    #[tokio::test]
    async fn test_save_category_posts_json() {
        let (base, handle) = serve_once("200 OK", r#"{"success":true}"#).await;
        let update = CategoryUpdate {
            id: "t1".into(),
            category: "Bills".into(),
            description: "ELEKTRO 12".into(),
        };
        client(&base).save_category(&update).await.unwrap();

        let req = handle.await.unwrap();
        assert!(req.starts_with("POST /api/category "));
        assert!(req.contains(r#""category":"Bills""#));
    }

    #[tokio::test]
    async fn test_save_category_error_status() {
        let (base, _handle) =
            serve_once("400 Bad Request", r#"{"error":"Transaction ID required"}"#).await;
        let update = CategoryUpdate {
            id: String::new(),
            category: "Bills".into(),
            description: String::new(),
        };
        let err = client(&base).save_category(&update).await.unwrap_err();
        assert!(err.to_string().contains("400"));
    }

    #[tokio::test]
    async fn test_upload_surfaces_server_error() {
        let (base, _handle) = serve_once(
            "500 Internal Server Error",
            r#"{"error":"Error parsing PDF: bad xref"}"#,
        )
        .await;
        let dir = tempfile::tempdir().unwrap();
        let pdf = dir.path().join("izpisek.pdf");
        std::fs::write(&pdf, b"%PDF-1.4\n%%EOF\n").unwrap();

        let err = client(&base).upload(&pdf).await.unwrap_err();
        assert_eq!(err.to_string(), "Error parsing PDF: bad xref");
    }
}
