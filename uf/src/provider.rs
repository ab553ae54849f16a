//! Document provider: local cache in front of the Unicode download server

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::error::ProviderError;

/// Source of document bodies; the network in production, a stub in tests
pub trait Fetcher {
    /// Write the whole body behind `url` into `sink`, returning the byte count
    fn fetch(&self, url: &str, sink: &mut dyn Write) -> Result<u64, ProviderError>;
}

/// Blocking HTTP fetcher
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Self {
        debug!(?timeout, "HttpFetcher::new: called");
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("unifind/", env!("CARGO_PKG_VERSION")))
            .build()
            .unwrap_or_default();
        Self { client }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new(Duration::from_millis(crate::DEFAULT_TIMEOUT_MS))
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, url: &str, sink: &mut dyn Write) -> Result<u64, ProviderError> {
        debug!(%url, "HttpFetcher::fetch: sending HTTP request");
        let mut response = self
            .client
            .get(url)
            .send()
            .map_err(|e| ProviderError::fetch_failed(url, e))?;

        if !response.status().is_success() {
            debug!(status = %response.status(), "HttpFetcher::fetch: HTTP error status");
            return Err(ProviderError::FetchFailed {
                url: url.to_string(),
                reason: format!("HTTP error: {}", response.status()),
                source: None,
            });
        }

        let written = io::copy(&mut response, sink).map_err(|e| ProviderError::fetch_failed(url, e))?;
        debug!(written, "HttpFetcher::fetch: body received");
        Ok(written)
    }
}

/// Hands out readable copies of reference documents, downloading each at most once
pub struct DocumentProvider<F = HttpFetcher> {
    cache_dir: PathBuf,
    fetcher: F,
}

impl DocumentProvider<HttpFetcher> {
    /// Provider rooted at `<user cache dir>/unifind/ucd`
    pub fn from_user_cache_dir(fetcher: HttpFetcher) -> Result<Self, ProviderError> {
        let cache_dir = default_cache_dir().ok_or(ProviderError::CacheUnavailable)?;
        Ok(Self::new(cache_dir, fetcher))
    }
}

impl<F: Fetcher> DocumentProvider<F> {
    pub fn new(cache_dir: impl Into<PathBuf>, fetcher: F) -> Self {
        let cache_dir = cache_dir.into();
        debug!(?cache_dir, "DocumentProvider::new: called");
        Self { cache_dir, fetcher }
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Cache location for a document: its final URL path segment inside the cache dir
    pub fn cache_path(&self, url: &str) -> PathBuf {
        self.cache_dir.join(file_name(url))
    }

    /// Open the document behind `url`, downloading it first if it is not cached
    pub fn fetch(&self, url: &str) -> Result<File, ProviderError> {
        let path = self.cache_path(url);

        match File::open(&path) {
            Ok(file) => {
                debug!(?path, "DocumentProvider::fetch: cache hit");
                return Ok(file);
            }
            Err(e) if matches!(e.kind(), io::ErrorKind::NotFound | io::ErrorKind::NotADirectory) => {
                debug!(?path, "DocumentProvider::fetch: cache miss");
            }
            Err(source) => return Err(ProviderError::CacheReadFailed { path, source }),
        }

        fs::create_dir_all(&self.cache_dir).map_err(|source| ProviderError::DirectoryCreateFailed {
            path: self.cache_dir.clone(),
            source,
        })?;

        info!(%url, ?path, "Downloading reference document");
        let write_failed = |source| ProviderError::CacheWriteFailed {
            path: path.clone(),
            source,
        };

        // Download next to the final path, then rename, so the cache never holds a partial file
        let mut tmp = NamedTempFile::new_in(&self.cache_dir).map_err(write_failed)?;
        let written = fetch_into(&self.fetcher, url, tmp.as_file_mut(), &path)?;
        tmp.as_file_mut().sync_all().map_err(write_failed)?;
        tmp.persist(&path).map_err(|e| write_failed(e.error))?;
        info!(written, ?path, "Cached reference document");

        File::open(&path).map_err(write_failed)
    }
}

/// Run `fetcher` into `sink`; a failure of the sink itself is a cache write error
fn fetch_into<F: Fetcher>(fetcher: &F, url: &str, sink: &mut dyn Write, path: &Path) -> Result<u64, ProviderError> {
    let mut sink = RecordingSink { inner: sink, error: None };
    match fetcher.fetch(url, &mut sink) {
        Ok(written) => Ok(written),
        Err(err) => match sink.error.take() {
            Some(source) => {
                debug!(%err, "fetch_into: sink failed");
                Err(ProviderError::CacheWriteFailed {
                    path: path.to_path_buf(),
                    source,
                })
            }
            None => Err(err),
        },
    }
}

/// Keeps the first write error so it is not mistaken for a network error
struct RecordingSink<'a> {
    inner: &'a mut dyn Write,
    error: Option<io::Error>,
}

impl RecordingSink<'_> {
    fn record(&mut self, err: io::Error) -> io::Error {
        let copy = io::Error::new(err.kind(), err.to_string());
        self.error.get_or_insert(err);
        copy
    }
}

impl Write for RecordingSink<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.write(buf).map_err(|e| self.record(e))
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush().map_err(|e| self.record(e))
    }
}

/// `<user cache dir>/unifind/ucd`, if the platform has a cache dir
pub fn default_cache_dir() -> Option<PathBuf> {
    dirs::cache_dir().map(|dir| dir.join(crate::APP_NAME).join("ucd"))
}

fn file_name(url: &str) -> &str {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    let path = path.trim_end_matches('/');
    match path.rsplit('/').next() {
        Some(name) if !name.is_empty() => name,
        _ => path,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::io::Read;
    use tempfile::TempDir;

    const URL: &str = "https://www.unicode.org/Public/UCD/latest/ucd/NamesList.txt";
    const BODY: &[u8] = b"@@\t0000\tBasic Latin\t007F\n0041\tLATIN CAPITAL LETTER A\n";

    /// Serves a fixed body and counts how often it was asked to
    struct StubFetcher {
        body: &'static [u8],
        calls: Cell<usize>,
    }

    impl StubFetcher {
        fn new(body: &'static [u8]) -> Self {
            Self {
                body,
                calls: Cell::new(0),
            }
        }
    }

    impl Fetcher for StubFetcher {
        fn fetch(&self, _url: &str, sink: &mut dyn Write) -> Result<u64, ProviderError> {
            self.calls.set(self.calls.get() + 1);
            sink.write_all(self.body)
                .map_err(|e| ProviderError::fetch_failed(URL, e))?;
            Ok(self.body.len() as u64)
        }
    }

    /// Writes half a body, then fails
    struct BrokenFetcher;

    impl Fetcher for BrokenFetcher {
        fn fetch(&self, url: &str, sink: &mut dyn Write) -> Result<u64, ProviderError> {
            sink.write_all(&BODY[..10]).unwrap();
            Err(ProviderError::fetch_failed(
                url,
                io::Error::new(io::ErrorKind::ConnectionReset, "connection reset"),
            ))
        }
    }

    /// A sink on a full disk
    struct FullDisk;

    impl Write for FullDisk {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::StorageFull, "no space left"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn read_all(mut file: File) -> Vec<u8> {
        let mut buf = Vec::new();
        file.read_to_end(&mut buf).unwrap();
        buf
    }

    #[test]
    fn test_file_name() {
        assert_eq!(file_name(URL), "NamesList.txt");
        assert_eq!(file_name("https://example.com/ucd/Index.txt?x=1"), "Index.txt");
        assert_eq!(file_name("https://example.com/ucd/Index.txt/"), "Index.txt");
        assert_eq!(file_name("NamesList.txt"), "NamesList.txt");
    }

    #[test]
    fn test_cache_path() {
        let temp = TempDir::new().unwrap();
        let provider = DocumentProvider::new(temp.path(), StubFetcher::new(BODY));
        assert_eq!(provider.cache_path(URL), temp.path().join("NamesList.txt"));
        assert_eq!(provider.cache_dir(), temp.path());
    }

    #[test]
    fn test_first_fetch_downloads_and_caches() {
        let temp = TempDir::new().unwrap();
        let cache_dir = temp.path().join("nested").join("ucd");
        let provider = DocumentProvider::new(&cache_dir, StubFetcher::new(BODY));

        let file = provider.fetch(URL).unwrap();
        assert_eq!(read_all(file), BODY);
        assert_eq!(provider.fetcher.calls.get(), 1);
        assert_eq!(fs::read(cache_dir.join("NamesList.txt")).unwrap(), BODY);
    }

    #[test]
    fn test_second_fetch_uses_cache() {
        let temp = TempDir::new().unwrap();
        let provider = DocumentProvider::new(temp.path(), StubFetcher::new(BODY));

        provider.fetch(URL).unwrap();
        let file = provider.fetch(URL).unwrap();
        assert_eq!(read_all(file), BODY);
        assert_eq!(provider.fetcher.calls.get(), 1);
    }

    #[test]
    fn test_existing_cache_file_skips_network() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("NamesList.txt"), b"cached copy").unwrap();
        let provider = DocumentProvider::new(temp.path(), StubFetcher::new(BODY));

        let file = provider.fetch(URL).unwrap();
        assert_eq!(read_all(file), b"cached copy");
        assert_eq!(provider.fetcher.calls.get(), 0);
    }

    #[test]
    fn test_failed_fetch_leaves_no_cache_file() {
        let temp = TempDir::new().unwrap();
        let provider = DocumentProvider::new(temp.path(), BrokenFetcher);

        let err = provider.fetch(URL).unwrap_err();
        assert!(matches!(err, ProviderError::FetchFailed { .. }));
        assert!(!temp.path().join("NamesList.txt").exists());
        assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_sink_failure_is_cache_write_error() {
        let path = PathBuf::from("/cache/NamesList.txt");
        let fetcher = StubFetcher::new(BODY);

        let err = fetch_into(&fetcher, URL, &mut FullDisk, &path).unwrap_err();
        match err {
            ProviderError::CacheWriteFailed { path: failed, source } => {
                assert_eq!(failed, path);
                assert_eq!(source.kind(), io::ErrorKind::StorageFull);
            }
            other => panic!("expected CacheWriteFailed, got {:?}", other),
        }
    }

    #[test]
    fn test_network_failure_stays_fetch_error() {
        let path = PathBuf::from("/cache/NamesList.txt");
        let mut sink = Vec::new();

        let err = fetch_into(&BrokenFetcher, URL, &mut sink, &path).unwrap_err();
        assert!(matches!(err, ProviderError::FetchFailed { .. }));
        assert_eq!(sink, &BODY[..10]);
    }

    #[test]
    fn test_directory_create_failure() {
        let temp = TempDir::new().unwrap();
        let blocker = temp.path().join("file");
        fs::write(&blocker, b"not a dir").unwrap();
        let provider = DocumentProvider::new(blocker.join("ucd"), StubFetcher::new(BODY));

        let err = provider.fetch(URL).unwrap_err();
        assert!(matches!(err, ProviderError::DirectoryCreateFailed { .. }));
        assert_eq!(provider.fetcher.calls.get(), 0);
    }

    #[test]
    fn test_default_cache_dir_is_app_scoped() {
        if let Some(dir) = default_cache_dir() {
            assert!(dir.ends_with("unifind/ucd"));
        }
    }
}
