//! Loading of external assets: raw files, images and typeface fonts.
//!
//! Natively assets are read from `./assets/<name>`. In the browser they are fetched
//! from `<origin>/assets/<name>`.

use anyhow::Context as _;

use crate::data_structures::text::Typeface;

#[cfg(target_arch = "wasm32")]
fn format_url(file_name: &str) -> anyhow::Result<reqwest::Url> {
    use anyhow::anyhow;

    let window = web_sys::window().ok_or_else(|| anyhow!("no window"))?;
    let origin = window
        .location()
        .origin()
        .map_err(|e| anyhow!("cannot read the page origin: {:?}", e))?;
    let base = reqwest::Url::parse(&format!("{}/assets/", origin))?;
    Ok(base.join(file_name)?)
}

pub async fn load_string(file_name: &str) -> anyhow::Result<String> {
    #[cfg(target_arch = "wasm32")]
    let txt = {
        let url = format_url(file_name)?;
        reqwest::get(url).await?.error_for_status()?.text().await?
    };
    #[cfg(not(target_arch = "wasm32"))]
    let txt = {
        let path = std::path::Path::new("./").join("assets").join(file_name);
        tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("cannot read {}", path.display()))?
    };

    Ok(txt)
}

pub async fn load_binary(file_name: &str) -> anyhow::Result<Vec<u8>> {
    #[cfg(target_arch = "wasm32")]
    let data = {
        let url = format_url(file_name)?;
        reqwest::get(url).await?.error_for_status()?.bytes().await?.to_vec()
    };
    #[cfg(not(target_arch = "wasm32"))]
    let data = {
        let path = std::path::Path::new("./").join("assets").join(file_name);
        tokio::fs::read(&path)
            .await
            .with_context(|| format!("cannot read {}", path.display()))?
    };

    Ok(data)
}

/// Fetch and decode an image. Uploading happens later, on the thread owning the device.
pub async fn load_image(file_name: &str) -> anyhow::Result<image::DynamicImage> {
    let data = load_binary(file_name).await?;
    image::load_from_memory(&data).with_context(|| format!("cannot decode {file_name}"))
}

pub async fn load_typeface(file_name: &str) -> anyhow::Result<Typeface> {
    let json = load_string(file_name).await?;
    Typeface::from_json(&json).with_context(|| format!("cannot parse font {file_name}"))
}
