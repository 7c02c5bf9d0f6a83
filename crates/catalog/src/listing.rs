//! Building a manifest from the published scenery archives.

use foundation::BucketCoord;

use crate::date::CompactDate;
use crate::manifest::{DownloadEntry, DownloadManifest};

pub const ARCHIVE_PREFIX: &str = "fgfs-americas-scenery-";
pub const ARCHIVE_SUFFIX: &str = ".tar";

/// A file as reported by whatever hosts the archives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListedFile {
    pub name: String,
    pub size: u64,
}

impl ListedFile {
    pub fn new(name: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            size,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveName {
    pub bucket: String,
    pub date: CompactDate,
}

/// Parses `fgfs-americas-scenery-<bucket>-<YYYYMMDD>.tar`. Bucket names must
/// already be in canonical lowercase form.
pub fn parse_archive_name(file_name: &str) -> Option<ArchiveName> {
    let stem = file_name
        .strip_prefix(ARCHIVE_PREFIX)?
        .strip_suffix(ARCHIVE_SUFFIX)?;
    let (bucket, date) = stem.split_once('-')?;

    let coord: BucketCoord = bucket.parse().ok()?;
    if coord.name() != bucket {
        return None;
    }
    let date: CompactDate = date.parse().ok()?;
    Some(ArchiveName {
        bucket: bucket.to_string(),
        date,
    })
}

/// Rewrites a share link so it downloads the file rather than previewing it.
pub fn direct_download_url(url: &str) -> String {
    let Some((base, query)) = url.split_once('?') else {
        return format!("{url}?dl=1");
    };

    let mut found = false;
    let params: Vec<&str> = query
        .split('&')
        .map(|param| {
            if param.starts_with("dl=") {
                found = true;
                "dl=1"
            } else {
                param
            }
        })
        .collect();

    if found {
        format!("{base}?{}", params.join("&"))
    } else if query.is_empty() {
        format!("{base}?dl=1")
    } else {
        format!("{url}&dl=1")
    }
}

/// Builds a manifest from a file listing. Files are taken in name order and
/// names that are not scenery archives are ignored; when a bucket has several
/// archives the newest one wins.
pub fn manifest_from_listing<I, F>(files: I, mut url_for: F) -> DownloadManifest
where
    I: IntoIterator<Item = ListedFile>,
    F: FnMut(&ListedFile) -> String,
{
    let mut files: Vec<ListedFile> = files.into_iter().collect();
    files.sort_by(|a, b| a.name.cmp(&b.name));

    let mut manifest = DownloadManifest::new();
    for file in files {
        let Some(archive) = parse_archive_name(&file.name) else {
            continue;
        };
        let entry = DownloadEntry {
            url: url_for(&file),
            name: file.name.clone(),
            date: archive.date,
            size: file.size,
        };
        manifest.insert(archive.bucket, entry);
    }
    manifest
}

/// One URL per line, in manifest order.
pub fn links_text(manifest: &DownloadManifest) -> String {
    let mut out = String::new();
    for (_, entry) in manifest.iter() {
        out.push_str(&entry.url);
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_archive_names() {
        let parsed = parse_archive_name("fgfs-americas-scenery-w080n40-20240115.tar").unwrap();
        assert_eq!(parsed.bucket, "w080n40");
        assert_eq!(parsed.date.iso(), "2024-01-15");
    }

    #[test]
    fn ignores_other_files() {
        for name in [
            "README.txt",
            "fgfs-americas-scenery-w080n40-20240115.tar.gz",
            "fgfs-americas-scenery-W080N40-20240115.tar",
            "fgfs-americas-scenery-w80n40-20240115.tar",
            "fgfs-americas-scenery-w080n40-2024011.tar",
            "fgfs-americas-scenery-w080n40.tar",
        ] {
            assert_eq!(parse_archive_name(name), None, "{name}");
        }
    }

    #[test]
    fn rewrites_share_links() {
        assert_eq!(
            direct_download_url("https://host/s/abc/file.tar?dl=0"),
            "https://host/s/abc/file.tar?dl=1"
        );
        assert_eq!(
            direct_download_url("https://host/s/abc/file.tar"),
            "https://host/s/abc/file.tar?dl=1"
        );
        assert_eq!(
            direct_download_url("https://host/file.tar?rlkey=x&dl=0"),
            "https://host/file.tar?rlkey=x&dl=1"
        );
        assert_eq!(
            direct_download_url("https://host/file.tar?rlkey=x"),
            "https://host/file.tar?rlkey=x&dl=1"
        );
        assert_eq!(direct_download_url("https://host/file.tar?"), "https://host/file.tar?dl=1");
    }

    #[test]
    fn newest_archive_wins_and_order_is_by_name() {
        let files = vec![
            ListedFile::new("fgfs-americas-scenery-w080n40-20240115.tar", 30),
            ListedFile::new("notes.md", 1),
            ListedFile::new("fgfs-americas-scenery-w080n40-20231101.tar", 20),
            ListedFile::new("fgfs-americas-scenery-w130n50-20231201.tar", 10),
        ];
        let manifest = manifest_from_listing(files, |f| format!("https://host/{}", f.name));

        let keys: Vec<&str> = manifest.buckets().collect();
        assert_eq!(keys, vec!["w080n40", "w130n50"]);

        let entry = manifest.get("w080n40").unwrap();
        assert_eq!(entry.date.compact(), "20240115");
        assert_eq!(entry.size, 30);
        assert_eq!(entry.url, "https://host/fgfs-americas-scenery-w080n40-20240115.tar");
    }

    #[test]
    fn links_text_lists_urls_in_order() {
        let files = vec![
            ListedFile::new("fgfs-americas-scenery-w130n50-20231201.tar", 10),
            ListedFile::new("fgfs-americas-scenery-w080n40-20240115.tar", 30),
        ];
        let manifest = manifest_from_listing(files, |f| f.name.clone());
        assert_eq!(
            links_text(&manifest),
            "fgfs-americas-scenery-w080n40-20240115.tar\nfgfs-americas-scenery-w130n50-20231201.tar\n"
        );
    }
}
