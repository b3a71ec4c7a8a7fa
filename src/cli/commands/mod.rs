//! Subcommand implementations

pub mod catalog;
pub mod config;
pub mod demos;
pub mod generate;

use std::path::{Path, PathBuf};

use crate::config::DownloadConfig;

/// Where a download should land.
///
/// An explicit output that is an existing directory receives `file_name`;
/// without one, the configured download folder (or the working directory) is used.
pub fn download_destination(
    downloads: &DownloadConfig,
    output: Option<PathBuf>,
    file_name: &str,
) -> PathBuf {
    match output {
        Some(path) if path.is_dir() => path.join(file_name),
        Some(path) => path,
        None => downloads
            .resolve_directory()
            .unwrap_or_else(|| Path::new(".").to_path_buf())
            .join(file_name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_file_is_used_as_is() {
        let dest = download_destination(
            &DownloadConfig::default(),
            Some(PathBuf::from("/tmp/does-not-exist/out.xml")),
            "e1.xml",
        );
        assert_eq!(dest, PathBuf::from("/tmp/does-not-exist/out.xml"));
    }

    #[test]
    fn test_directory_output_gets_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let dest = download_destination(
            &DownloadConfig::default(),
            Some(dir.path().to_path_buf()),
            "e1.xml",
        );
        assert_eq!(dest, dir.path().join("e1.xml"));
    }

    #[test]
    fn test_configured_directory() {
        let downloads = DownloadConfig {
            directory: Some(PathBuf::from("/srv/fx")),
        };
        assert_eq!(
            download_destination(&downloads, None, "a.mp4"),
            PathBuf::from("/srv/fx/a.mp4")
        );
    }
}
