//! Zip packaging and checksums for finished artifacts.
//!
//! Binary package distribution expects an `.xcframework` compressed into a
//! `.zip` together with the SHA-256 checksum of that zip.

use super::error::{ErrorExt, Result};
use sha2::{Digest, Sha256};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use tokio::io::AsyncReadExt;
use zip::write::SimpleFileOptions;

/// A compressed artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackagedArtifact {
    /// The `.xcframework` directory that was compressed
    pub artifact: PathBuf,
    /// The `.zip` next to it
    pub zip_path: PathBuf,
    /// Hex-encoded SHA-256 of the zip
    pub checksum: String,
}

/// Compresses `artifact` into `<artifact>.zip` and checksums the result.
///
/// The archive's top-level entry is the artifact directory itself. Symlinks
/// are stored as links, not followed.
pub async fn package_artifact(artifact: &Path) -> Result<PackagedArtifact> {
    let mut zip_name = artifact.as_os_str().to_owned();
    zip_name.push(".zip");
    let zip_path = PathBuf::from(zip_name);

    super::utils::fs::remove_all(&zip_path).await?;

    let source = artifact.to_path_buf();
    let destination = zip_path.clone();
    tokio::task::spawn_blocking(move || write_zip(&source, &destination)).await??;

    let checksum = calculate_sha256(&zip_path).await?;
    log::info!("✓ Packaged {} (sha256 {})", zip_path.display(), checksum);

    Ok(PackagedArtifact {
        artifact: artifact.to_path_buf(),
        zip_path,
        checksum,
    })
}

fn write_zip(source: &Path, destination: &Path) -> Result<()> {
    let root = source.parent().unwrap_or_else(|| Path::new(""));
    let file = std::fs::File::create(destination).fs_context("creating zip", destination)?;
    let mut writer = zip::ZipWriter::new(file);
    let options = SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Deflated)
        .unix_permissions(0o755);

    let mut entries: Vec<_> = walkdir::WalkDir::new(source)
        .follow_links(false)
        .into_iter()
        .collect::<std::result::Result<_, _>>()?;
    entries.sort_by(|a, b| a.path().cmp(b.path()));

    let mut buffer = Vec::new();
    for entry in entries {
        let name = zip_entry_name(entry.path().strip_prefix(root)?);
        if entry.file_type().is_symlink() {
            let target = std::fs::read_link(entry.path()).fs_context("reading link", entry.path())?;
            writer.add_symlink(name, zip_entry_name(&target), options)?;
        } else if entry.file_type().is_dir() {
            writer.add_directory(name, options)?;
        } else {
            writer.start_file(name, options)?;
            buffer.clear();
            std::fs::File::open(entry.path())
                .and_then(|mut f| f.read_to_end(&mut buffer))
                .fs_context("reading", entry.path())?;
            writer.write_all(&buffer).fs_context("writing zip", destination)?;
        }
    }
    writer.finish()?;
    Ok(())
}

fn zip_entry_name(path: &Path) -> String {
    path.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Calculates the hex-encoded SHA-256 of a file, reading it in 8KB chunks.
pub async fn calculate_sha256(path: &Path) -> Result<String> {
    let mut file = tokio::fs::File::open(path)
        .await
        .fs_context("opening file for hashing", path)?;
    let mut hasher = Sha256::new();
    let mut buffer = vec![0u8; 8192];

    loop {
        let n = file
            .read(&mut buffer)
            .await
            .fs_context("reading file for hash calculation", path)?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
    }

    Ok(hex::encode(hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_sha256_known_value() {
        let temp = TempDir::new().expect("Failed to create temp dir");
        let file = temp.path().join("abc.txt");
        std::fs::write(&file, b"abc").unwrap();
        assert_eq!(
            calculate_sha256(&file).await.unwrap(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[tokio::test]
    async fn test_package_artifact_contains_tree() {
        let temp = TempDir::new().expect("Failed to create temp dir");
        let artifact = temp.path().join("Combo.xcframework");
        std::fs::create_dir_all(artifact.join("ios-arm64/Combo.framework")).unwrap();
        std::fs::write(artifact.join("Info.plist"), b"<plist/>").unwrap();
        std::fs::write(artifact.join("ios-arm64/Combo.framework/Combo"), b"bin").unwrap();

        let packaged = package_artifact(&artifact).await.expect("zip should succeed");
        assert_eq!(packaged.zip_path, temp.path().join("Combo.xcframework.zip"));
        assert_eq!(packaged.checksum.len(), 64);

        let file = std::fs::File::open(&packaged.zip_path).unwrap();
        let mut archive = zip::ZipArchive::new(file).unwrap();
        let names: Vec<String> = archive.file_names().map(str::to_string).collect();
        assert!(names.iter().any(|n| n == "Combo.xcframework/Info.plist"));
        assert!(
            names
                .iter()
                .any(|n| n == "Combo.xcframework/ios-arm64/Combo.framework/Combo")
        );

        let mut contents = String::new();
        archive
            .by_name("Combo.xcframework/Info.plist")
            .unwrap()
            .read_to_string(&mut contents)
            .unwrap();
        assert_eq!(contents, "<plist/>");
    }
}
