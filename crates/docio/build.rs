use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

/// pdfium-binaries release used when `PDFIUM_VERSION` is not set.
const DEFAULT_PDFIUM_VERSION: &str = "7529";

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=PDFIUM_VERSION");
    println!("cargo:rerun-if-env-changed=DOCIO_PDFIUM_DIR");
    println!("cargo:rerun-if-env-changed=DOCIO_SKIP_PDFIUM_DOWNLOAD");

    // A library supplied by the environment is bound at runtime, nothing to fetch.
    if env::var_os("DOCIO_PDFIUM_DIR").is_some() || env::var_os("DOCIO_SKIP_PDFIUM_DOWNLOAD").is_some() {
        return;
    }

    let target = env::var("TARGET").unwrap_or_default();
    let Some((platform, arch)) = pdfium_platform(&target) else {
        println!("cargo:warning=No prebuilt Pdfium for target {target}; the system library will be used");
        return;
    };

    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR is set by cargo"));
    let pdfium_dir = out_dir.join("pdfium");
    let lib_dir = pdfium_dir.join(if platform == "win" { "bin" } else { "lib" });

    if !lib_dir.join(runtime_library_name(platform)).exists() {
        let version = env::var("PDFIUM_VERSION")
            .ok()
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_PDFIUM_VERSION.to_string());
        let url = format!(
            "https://github.com/bblanchon/pdfium-binaries/releases/download/chromium/{}/pdfium-{}-{}.tgz",
            version, platform, arch
        );

        if let Err(err) = download_and_extract(&url, &pdfium_dir) {
            println!("cargo:warning=Pdfium download failed ({err}); the system library will be used");
            return;
        }
    }

    println!("cargo:rustc-env=DOCIO_PDFIUM_BUILD_DIR={}", lib_dir.display());
}

fn pdfium_platform(target: &str) -> Option<(&'static str, &'static str)> {
    if target.contains("darwin") {
        Some(("mac", if target.contains("aarch64") { "arm64" } else { "x64" }))
    } else if target.contains("linux") {
        let arch = if target.contains("aarch64") {
            "arm64"
        } else if target.contains("arm") {
            "arm"
        } else {
            "x64"
        };
        Some(("linux", arch))
    } else if target.contains("windows") {
        let arch = if target.contains("aarch64") {
            "arm64"
        } else if target.contains("i686") {
            "x86"
        } else {
            "x64"
        };
        Some(("win", arch))
    } else {
        None
    }
}

fn runtime_library_name(platform: &str) -> &'static str {
    match platform {
        "win" => "pdfium.dll",
        "mac" => "libpdfium.dylib",
        _ => "libpdfium.so",
    }
}

fn download_and_extract(url: &str, dest_dir: &Path) -> Result<(), String> {
    fs::create_dir_all(dest_dir).map_err(|e| format!("cannot create {}: {}", dest_dir.display(), e))?;
    let archive = dest_dir.join("pdfium.tgz");

    let status = Command::new("curl")
        .arg("-f")
        .arg("-sS")
        .arg("-L")
        .arg("--retry")
        .arg("3")
        .arg("-o")
        .arg(&archive)
        .arg(url)
        .status()
        .map_err(|e| format!("failed to spawn curl: {e}"))?;
    if !status.success() {
        let _ = fs::remove_file(&archive);
        return Err(format!("curl exited with {:?} for {}", status.code(), url));
    }

    let status = Command::new("tar")
        .arg("-xzf")
        .arg(&archive)
        .arg("-C")
        .arg(dest_dir)
        .status()
        .map_err(|e| format!("failed to spawn tar: {e}"))?;
    let _ = fs::remove_file(&archive);
    if !status.success() {
        return Err(format!("tar could not extract the archive from {url}"));
    }

    Ok(())
}
