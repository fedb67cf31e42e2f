//! Loading region models from external files.
//!
//! A region is one glTF file. Loading happens off the render loop and yields a
//! CPU-side [`RegionGeometry`]; the event loop uploads it to the GPU.

use anyhow::Context as _;
use base64::Engine as _;

use crate::data_structures::model::RegionGeometry;

pub mod mesh;

#[cfg(not(target_arch = "wasm32"))]
const CHUNK_SIZE: usize = 64 * 1024;

/// Reports download progress as `"<name> <pct>% loaded"`, once per percent.
#[derive(Debug)]
pub struct LoadProgress<'a> {
    name: &'a str,
    total: Option<u64>,
    loaded: u64,
    last_reported: Option<u32>,
}

impl<'a> LoadProgress<'a> {
    pub fn new(name: &'a str, total: Option<u64>) -> Self {
        Self {
            name,
            total,
            loaded: 0,
            last_reported: None,
        }
    }

    /// Records `bytes` more and returns the percentage if it changed.
    pub fn advance(&mut self, bytes: u64) -> Option<u32> {
        self.loaded += bytes;
        let total = self.total.filter(|t| *t > 0)?;
        let pct = (self.loaded.saturating_mul(100) / total).min(100) as u32;
        if self.last_reported == Some(pct) {
            return None;
        }
        self.last_reported = Some(pct);
        log::info!("{} {}% loaded", self.name, pct);
        Some(pct)
    }

    /// Marks the download as complete if no 100% was reported yet.
    pub fn finish(&mut self) {
        if self.last_reported != Some(100) {
            self.last_reported = Some(100);
            log::info!("{} 100% loaded", self.name);
        }
    }

    pub fn loaded(&self) -> u64 {
        self.loaded
    }
}

#[cfg(target_arch = "wasm32")]
fn format_url(file_name: &str) -> anyhow::Result<reqwest::Url> {
    let window = web_sys::window().context("no global window")?;
    let origin = window
        .location()
        .origin()
        .map_err(|e| anyhow::anyhow!("cannot read the page origin: {:?}", e))?;
    let base = reqwest::Url::parse(&format!("{}/", origin))?;
    Ok(base.join(file_name)?)
}

/// Reads a whole asset, reporting progress under `name`.
///
/// Natively `path` is a filesystem path; on the web it is resolved against
/// the page origin and fetched.
pub async fn load_binary(path: &str, name: &str) -> anyhow::Result<Vec<u8>> {
    #[cfg(target_arch = "wasm32")]
    let data = {
        use futures::StreamExt;

        let url = format_url(path)?;
        let response = reqwest::get(url.clone())
            .await
            .with_context(|| format!("request for {} failed", url))?
            .error_for_status()?;
        let total = response.content_length();
        let mut progress = LoadProgress::new(name, total);
        let mut data = Vec::with_capacity(total.unwrap_or(0) as usize);
        let mut body = std::pin::pin!(response.bytes_stream());
        while let Some(chunk) = body.next().await {
            let chunk = chunk.with_context(|| format!("cannot read {}", url))?;
            data.extend_from_slice(&chunk);
            progress.advance(chunk.len() as u64);
        }
        progress.finish();
        data
    };
    #[cfg(not(target_arch = "wasm32"))]
    let data = {
        use tokio::io::AsyncReadExt;

        let mut file = tokio::fs::File::open(path)
            .await
            .with_context(|| format!("cannot open {}", path))?;
        let total = file.metadata().await.ok().map(|m| m.len());
        let mut progress = LoadProgress::new(name, total);
        let mut data = Vec::with_capacity(total.unwrap_or(0) as usize);
        let mut chunk = vec![0u8; CHUNK_SIZE];
        loop {
            let read = file
                .read(&mut chunk)
                .await
                .with_context(|| format!("cannot read {}", path))?;
            if read == 0 {
                break;
            }
            data.extend_from_slice(&chunk[..read]);
            progress.advance(read as u64);
        }
        progress.finish();
        data
    };

    Ok(data)
}

/// Resolves a relative buffer URI against the location of the model file.
///
/// Natively the URI is percent-decoded into a file name (`Dakshin%20Dinajpur.bin`
/// names `Dakshin Dinajpur.bin`). On the web it stays encoded for the request.
pub fn resolve_uri(model_path: &str, uri: &str) -> anyhow::Result<String> {
    #[cfg(not(target_arch = "wasm32"))]
    let uri = percent_encoding::percent_decode_str(uri)
        .decode_utf8()
        .with_context(|| format!("buffer URI {:?} is not valid UTF-8", uri))?;
    Ok(match model_path.rfind('/') {
        Some(idx) => format!("{}{}", &model_path[..=idx], uri),
        None => uri.to_string(),
    })
}

/// Decodes a base64 `data:` URI. Returns `None` for any other URI.
pub fn decode_data_uri(uri: &str) -> Option<anyhow::Result<Vec<u8>>> {
    let rest = uri.strip_prefix("data:")?;
    Some(match rest.split_once(',') {
        Some((header, payload)) if header.ends_with(";base64") => {
            base64::engine::general_purpose::STANDARD
                .decode(payload)
                .context("invalid base64 payload in data URI")
        }
        Some(_) => Err(anyhow::anyhow!("only base64 data URIs are supported")),
        None => Err(anyhow::anyhow!("malformed data URI")),
    })
}

/// Loads every buffer a glTF document references: the GLB binary chunk,
/// embedded data URIs and sibling files.
async fn load_buffers(
    gltf: &gltf::Gltf,
    model_path: &str,
    name: &str,
) -> anyhow::Result<Vec<Vec<u8>>> {
    let mut buffer_data = Vec::new();
    for buffer in gltf.buffers() {
        let data = match buffer.source() {
            gltf::buffer::Source::Bin => gltf
                .blob
                .as_deref()
                .map(<[u8]>::to_vec)
                .context("buffer refers to a missing GLB binary chunk")?,
            gltf::buffer::Source::Uri(uri) => match decode_data_uri(uri) {
                Some(decoded) => decoded?,
                None => load_binary(&resolve_uri(model_path, uri)?, name).await?,
            },
        };
        if data.len() < buffer.length() {
            anyhow::bail!(
                "buffer {} holds {} bytes, {} declared",
                buffer.index(),
                data.len(),
                buffer.length()
            );
        }
        buffer_data.push(data);
    }
    Ok(buffer_data)
}

/// Parses an already fetched glTF/GLB file into region geometry.
///
/// `model_path` is only used to resolve sibling buffer files.
pub async fn load_region_from_bytes(
    bytes: &[u8],
    model_path: &str,
    name: &str,
) -> anyhow::Result<RegionGeometry> {
    let gltf =
        gltf::Gltf::from_slice(bytes).with_context(|| format!("cannot parse {}", model_path))?;
    let buffers = load_buffers(&gltf, model_path, name).await?;
    mesh::extract_geometry(&gltf, &buffers)
        .with_context(|| format!("no usable mesh in {}", model_path))
}

pub async fn load_region(model_path: &str, name: &str) -> anyhow::Result<RegionGeometry> {
    let bytes = load_binary(model_path, name).await?;
    let geometry = load_region_from_bytes(&bytes, model_path, name).await?;
    log::debug!(
        "{}: {} vertices, {} triangles",
        name,
        geometry.vertices.len(),
        geometry.indices.len() / 3
    );
    Ok(geometry)
}
