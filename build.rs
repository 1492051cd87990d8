use std::env;
use std::path::PathBuf;

use anyhow::Result;
use fs_extra::dir::{CopyOptions, copy};

/// Files the demos fetch at runtime.
const DEMO_ASSETS: [&str; 2] = ["matcap.png", "pretendard_regular.json"];

fn main() -> Result<()> {
    println!("cargo:rerun-if-changed=assets");

    let assets = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?).join("assets");
    for name in DEMO_ASSETS {
        if !assets.join(name).is_file() {
            println!("cargo:warning=assets/{name} is missing, the text demo will log a load error");
        }
    }
    if !assets.is_dir() {
        return Ok(());
    }

    let mut options = CopyOptions::new();
    options.overwrite = true;
    copy(&assets, env::var("OUT_DIR")?, &options)?;
    Ok(())
}
