//! Build script for the storefront crate.
//!
//! Fingerprints the static assets so templates can append `?v=<hash>` and
//! let browsers cache them indefinitely.

use std::env;
use std::fs;
use std::path::Path;

use sha2::{Digest, Sha256};

/// (file under `static/`, env var set for `env!`)
const ASSETS: &[(&str, &str)] = &[("css/main.css", "CSS_HASH"), ("js/app.js", "JS_HASH")];

fn main() {
    let Ok(manifest_dir) = env::var("CARGO_MANIFEST_DIR") else {
        println!("cargo:warning=CARGO_MANIFEST_DIR not set, skipping asset hashes");
        for (_, var) in ASSETS {
            println!("cargo:rustc-env={var}=");
        }
        return;
    };
    let static_dir = Path::new(&manifest_dir).join("static");

    for (file, var) in ASSETS {
        hash_asset(&static_dir.join(file), var);
    }

    println!("cargo:rerun-if-changed=templates");
}

/// Set `var` to the first 8 hex chars of the file's SHA-256.
fn hash_asset(path: &Path, var: &str) {
    println!("cargo:rerun-if-changed={}", path.display());

    let content = match fs::read(path) {
        Ok(content) => content,
        Err(e) => {
            println!("cargo:warning=Could not read {}: {e}", path.display());
            println!("cargo:rustc-env={var}=");
            return;
        }
    };

    let hash = format!("{:x}", Sha256::digest(&content));
    let short_hash = hash.get(..8).unwrap_or(&hash);

    println!("cargo:rustc-env={var}={short_hash}");
}
