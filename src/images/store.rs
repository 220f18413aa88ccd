// src/images/store.rs
//! Writes generated images to disk as PNG files.
//!
//! Every entry is decoded into pixels before writing, so whatever format the
//! provider served (PNG, JPEG, WebP) ends up as a real PNG. A bad entry is
//! logged and skipped; it never aborts the remaining saves.

use super::{GeneratedImage, ImagePayload, ImageProvider};
use crate::error::AppError;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use image::ImageFormat;
use std::fs;
use std::path::{Path, PathBuf};

/// File name for the entry at `index` (0-based) of a generation batch.
pub fn image_filename(index: usize, provider: ImageProvider) -> String {
    format!("image_{}_{}.png", index + 1, provider)
}

/// Saves every image with a payload into `dir`, returning the written paths.
///
/// Base64 payloads are decoded, URL payloads are downloaded. Entries without
/// a payload (failed generations) are skipped silently; entries that fail to
/// decode or download are logged and left out of the returned list. Only a
/// failure to create `dir` is an error.
pub async fn save_images(
    client: &reqwest::Client,
    images: &[GeneratedImage],
    dir: &Path,
) -> Result<Vec<PathBuf>, AppError> {
    fs::create_dir_all(dir)?;
    let mut saved = Vec::new();

    for (index, image) in images.iter().enumerate() {
        let Some(payload) = &image.payload else {
            continue;
        };

        let path = dir.join(image_filename(index, image.provider));
        match save_one(client, payload, &path).await {
            Ok(()) => {
                log::info!("Saved image {} to {}", index + 1, path.display());
                saved.push(path);
            }
            Err(e) => log::error!("Error saving image {}: {}", index + 1, e),
        }
    }

    Ok(saved)
}

async fn save_one(
    client: &reqwest::Client,
    payload: &ImagePayload,
    path: &Path,
) -> Result<(), AppError> {
    let bytes = match payload {
        ImagePayload::Base64(data) => decode_base64(data)?,
        ImagePayload::Url(url) => download(client, url).await?,
    };
    write_png(&bytes, path)
}

/// Decodes a base64 payload, tolerating a `data:` URI prefix.
fn decode_base64(data: &str) -> Result<Vec<u8>, AppError> {
    let encoded = match data.split_once(";base64,") {
        Some((prefix, rest)) if prefix.starts_with("data:") => rest,
        _ => data,
    };
    Ok(STANDARD.decode(encoded.trim())?)
}

async fn download(client: &reqwest::Client, url: &str) -> Result<Vec<u8>, AppError> {
    log::debug!("GET {}", url);
    let response = client.get(url).send().await?.error_for_status()?;
    Ok(response.bytes().await?.to_vec())
}

fn write_png(bytes: &[u8], path: &Path) -> Result<(), AppError> {
    let decoded = image::load_from_memory(bytes)?;
    decoded.save_with_format(path, ImageFormat::Png)?;
    Ok(())
}
