//! Model downloads from the Hugging Face hub.

use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use reqwest::{Client, Response, StatusCode};
use tracing::{info, warn};
use urlencoding::encode;

use crate::config::Settings;

pub const CONFIG_FILE: &str = "config.json";
pub const TOKENIZER_FILE: &str = "tokenizer.json";
pub const MODEL_FILE: &str = "model.onnx";

/// Files a model directory needs before the ONNX backend can load it.
pub const REQUIRED_FILES: [&str; 3] = [CONFIG_FILE, TOKENIZER_FILE, MODEL_FILE];

/// Required files absent from `dir`.
pub fn missing_files(dir: &Path) -> Vec<&'static str> {
    REQUIRED_FILES
        .into_iter()
        .filter(|name| !dir.join(name).is_file())
        .collect()
}

/// Outcome of fetching one model.
#[derive(Debug, Clone)]
pub struct FetchReport {
    pub model_id: String,
    pub dir: PathBuf,
    pub downloaded: Vec<String>,
    pub skipped: Vec<String>,
}

/// `(remote path, local file name)` pairs for one repository.
pub fn artefacts(settings: &Settings) -> [(String, &'static str); 3] {
    [
        (CONFIG_FILE.to_string(), CONFIG_FILE),
        (TOKENIZER_FILE.to_string(), TOKENIZER_FILE),
        (settings.onnx_file.clone(), MODEL_FILE),
    ]
}

/// Download URL of `remote` inside `model_id` at `revision`.
pub fn resolve_url(settings: &Settings, model_id: &str, revision: &str, remote: &str) -> String {
    format!(
        "{base}/{model_id}/resolve/{revision}/{remote}",
        base = settings.hf_endpoint,
        revision = encode(revision),
    )
}

/// Fetch config, tokenizer and ONNX graph of `model_id` into its model dir.
pub async fn fetch_model(
    settings: &Settings,
    model_id: &str,
    revision: &str,
    force: bool,
) -> Result<FetchReport> {
    let dir = settings.model_dir(model_id);
    fs::create_dir_all(&dir).with_context(|| format!("creating {}", dir.display()))?;
    let client = http_client(settings)?;

    let mut report = FetchReport {
        model_id: model_id.to_string(),
        dir: dir.clone(),
        downloaded: Vec::new(),
        skipped: Vec::new(),
    };
    for (remote, local) in artefacts(settings) {
        let target = dir.join(local);
        if target.is_file() && !force {
            report.skipped.push(local.to_string());
            continue;
        }
        let url = resolve_url(settings, model_id, revision, &remote);
        let bytes = download(&client, settings, &url, &target)
            .await
            .with_context(|| format!("downloading {model_id}/{remote}"))?;
        info!(model = model_id, file = local, bytes, "downloaded");
        report.downloaded.push(local.to_string());
    }
    Ok(report)
}

async fn download(client: &Client, settings: &Settings, url: &str, target: &Path) -> Result<u64> {
    let mut request = client.get(url);
    if let Some(token) = &settings.hf_token {
        request = request.bearer_auth(token);
    }
    let mut response = request.send().await?;
    match response.status() {
        status if status.is_success() => {}
        StatusCode::NOT_FOUND => {
            warn!(%url, "artefact not found on hub");
            bail!("{url} not found; export the model to ONNX or set ONNX_FILE");
        }
        status => bail!("{url} returned {status}"),
    }

    let partial = target.with_extension("part");
    let written = match stream_to(&mut response, &partial).await {
        Ok(written) => written,
        Err(err) => {
            if let Err(cleanup) = fs::remove_file(&partial) {
                warn!(path = %partial.display(), %cleanup, "could not remove partial download");
            }
            return Err(err);
        }
    };
    fs::rename(&partial, target).with_context(|| format!("rename into {target:?}"))?;
    Ok(written)
}

async fn stream_to(response: &mut Response, path: &Path) -> Result<u64> {
    let mut file = File::create(path).with_context(|| format!("create {path:?}"))?;
    let mut written = 0u64;
    while let Some(chunk) = response.chunk().await? {
        file.write_all(&chunk)?;
        written += chunk.len() as u64;
    }
    file.flush()?;
    Ok(written)
}

fn http_client(settings: &Settings) -> Result<Client> {
    Ok(Client::builder()
        .user_agent(format!(
            "nlp-gateway/{} (+{})",
            env!("CARGO_PKG_VERSION"),
            settings.hf_endpoint
        ))
        .gzip(true)
        .brotli(true)
        .build()?)
}
