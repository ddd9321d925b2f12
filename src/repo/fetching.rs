use std::io::{Read, Write};
use std::sync::OnceLock;

use bytes::Bytes;
use const_format::concatcp;
use log::debug;
use reqwest::blocking::Client;
use reqwest::IntoUrl;

use crate::Result;

use super::RepoIndex;

const USER_AGENT: &str = concatcp!("hb-appstore-rs/", env!("CARGO_PKG_VERSION"));

static CLIENT_CELL: OnceLock<Client> = OnceLock::new();

fn get_client() -> &'static Client {
    CLIENT_CELL.get_or_init(|| {
        reqwest::blocking::Client::builder()
            .danger_accept_invalid_certs(true)
            .danger_accept_invalid_hostnames(true)
            .timeout(None)
            .build()
            .expect("Failed to create HTTP client")
    })
}

pub fn fetch_index(
    base_url: &str,
    progress: impl FnMut(f64, f64, f64, f64) -> i32,
) -> Result<RepoIndex> {
    let url = format!("{}/repo.json", base_url.trim_end_matches('/'));
    debug!("Fetching {url}");

    let bytes = download(&url, progress)?;

    Ok(serde_json::from_slice(&bytes)?)
}

// Streams the response body, reporting progress curl-style as
// (total_expected, downloaded_so_far, total_upload, uploaded_so_far).
// A non-zero callback return aborts the transfer.
pub fn download<U: IntoUrl>(
    url: U,
    mut progress: impl FnMut(f64, f64, f64, f64) -> i32,
) -> Result<Bytes> {
    let mut response = get_client()
        .get(url)
        .header("Accept", "application/json")
        .header("User-Agent", USER_AGENT)
        .send()?;

    debug!("Status: {}", response.status());

    if !response.status().is_success() {
        return Err(format!("Request failed: {}", response.status()).into());
    }

    let total_size = response.content_length().unwrap_or(0);

    let mut bytes = Vec::new();
    let mut downloaded: u64 = 0;
    let mut buffer = [0; 16384];

    loop {
        let bytes_read = response.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        bytes.write_all(&buffer[..bytes_read])?;
        downloaded += bytes_read as u64;

        if progress(total_size as f64, downloaded as f64, 0.0, 0.0) != 0 {
            return Err("Transfer aborted by progress callback".into());
        }
    }

    debug!("Download complete ({downloaded} bytes)");

    Ok(bytes.into())
}
