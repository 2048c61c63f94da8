use anyhow::{Context, Result};
use futures_util::StreamExt;
use reqwest::Client;
use std::path::Path;
use tokio::{fs, io::AsyncWriteExt};
use tracing::{debug, info};
use url::Url;

/// Last non-empty path segment of `url_str`, or `download.csv` if there is none.
pub fn file_name_from_url(url_str: &str) -> String {
    Url::parse(url_str)
        .ok()
        .and_then(|url| {
            url.path_segments()
                .and_then(|segments| segments.last())
                .filter(|name| !name.is_empty())
                .map(str::to_string)
        })
        .unwrap_or_else(|| "download.csv".to_string())
}

/// Stream the body of `url` into `dest`, creating parent directories and
/// overwriting whatever is already there. Returns the number of bytes written.
///
/// A non-success status is an error and leaves `dest` untouched.
pub async fn download_csv(client: &Client, url: &str, dest: impl AsRef<Path>) -> Result<u64> {
    let dest = dest.as_ref();

    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)
            .await
            .with_context(|| format!("creating directory {}", parent.display()))?;
    }

    info!(url, dest = %dest.display(), "downloading");

    let resp = client
        .get(url)
        .send()
        .await
        .with_context(|| format!("GET {}", url))?
        .error_for_status()?;

    let mut file = fs::File::create(dest)
        .await
        .with_context(|| format!("creating {}", dest.display()))?;

    let mut stream = resp.bytes_stream();
    let mut written: u64 = 0;
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.with_context(|| format!("reading body from {}", url))?;
        file.write_all(&chunk)
            .await
            .with_context(|| format!("writing {}", dest.display()))?;
        written += chunk.len() as u64;
        debug!(written, "chunk written");
    }
    file.flush().await?;

    info!(bytes = written, dest = %dest.display(), "download complete");
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;
    use tokio::io::AsyncReadExt;
    use tokio::net::TcpListener;

    /// Answer exactly one request with a canned response; returns the URL to hit.
    async fn serve_once(status: &'static str, body: &'static [u8]) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
                if request.windows(4).any(|w| w == b"\r\n\r\n") {
                    break;
                }
            }
            let head = format!(
                "HTTP/1.1 {}\r\nContent-Type: text/csv\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                status,
                body.len()
            );
            socket.write_all(head.as_bytes()).await.unwrap();
            socket.write_all(body).await.unwrap();
            let _ = socket.shutdown().await;
        });

        format!("http://{}/static/pdf/sample.csv", addr)
    }

    fn client() -> Client {
        Client::builder().no_proxy().build().unwrap()
    }

    #[test]
    fn test_file_name_from_url() {
        assert_eq!(
            file_name_from_url(
                "https://museweb.dcs.bbk.ac.uk/static/pdf/MappingMuseumsData2021_09_30.csv"
            ),
            "MappingMuseumsData2021_09_30.csv"
        );
        assert_eq!(file_name_from_url("https://example.com/dir/"), "download.csv");
        assert_eq!(file_name_from_url("not a url"), "download.csv");
    }

    #[tokio::test]
    async fn test_download_creates_dirs_and_writes_body() {
        let body: &'static [u8] = b"museum_id,Latitude,Longitude\n42,51.5,-0.1\n";
        let url = serve_once("200 OK", body).await;
        let tmp = tempdir().unwrap();
        let dest = tmp.path().join("nested").join("data").join("sample.csv");

        let written = download_csv(&client(), &url, &dest).await.unwrap();

        assert_eq!(written, body.len() as u64);
        assert_eq!(std::fs::read(&dest).unwrap(), body);
    }

    #[tokio::test]
    async fn test_download_overwrites_existing_file() {
        let url = serve_once("200 OK", b"new").await;
        let tmp = tempdir().unwrap();
        let dest = tmp.path().join("sample.csv");
        std::fs::write(&dest, b"old contents that are longer").unwrap();

        download_csv(&client(), &url, &dest).await.unwrap();

        assert_eq!(std::fs::read(&dest).unwrap(), b"new");
    }

    #[tokio::test]
    async fn test_bad_status_is_an_error_and_writes_nothing() {
        let url = serve_once("404 Not Found", b"missing").await;
        let tmp = tempdir().unwrap();
        let dest = tmp.path().join("data").join("sample.csv");

        let err = download_csv(&client(), &url, &dest).await.unwrap_err();

        assert!(err.to_string().contains("404"), "unexpected error: {err}");
        assert!(!dest.exists());
        assert!(dest.parent().unwrap().is_dir());
    }
}
