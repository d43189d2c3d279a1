// Flat-file store: one record per line in a single delimited text file

use crate::error::{FormatError, Result, StoreError};
use crate::record::Record;
use crate::validator::Validator;
use fs2::FileExt;
use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, Read, Seek, SeekFrom, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Write behavior for a [`Store`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreOptions {
    /// Call `fsync` after every write
    pub sync_writes: bool,
    /// Make `add_all` all-or-nothing via a temp file and rename
    pub atomic_batches: bool,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            sync_writes: false,
            atomic_batches: true,
        }
    }
}

/// File-backed collection of records of kind `T`
///
/// Every operation opens the file, does its work and closes it again. Nothing
/// is cached between calls, so the file is always the source of truth. Reads
/// are fail-fast: the first line that does not decode or validate aborts the
/// whole read.
pub struct Store<T, V> {
    path: PathBuf,
    validator: V,
    options: StoreOptions,
    _record: PhantomData<fn() -> T>,
}

impl<T, V> Store<T, V>
where
    T: Record,
    V: Validator<T>,
{
    /// Create a store over `path` with default options
    ///
    /// No I/O happens here. The file is created by the first write.
    pub fn open<P: AsRef<Path>>(path: P, validator: V) -> Self {
        Self::with_options(path, validator, StoreOptions::default())
    }

    pub fn with_options<P: AsRef<Path>>(path: P, validator: V, options: StoreOptions) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            validator,
            options,
            _record: PhantomData,
        }
    }

    /// Get the path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn options(&self) -> StoreOptions {
        self.options
    }

    // ========================================================================
    // Write operations
    // ========================================================================

    /// Truncate the file, creating it if needed
    pub fn clear(&self) -> Result<()> {
        let file = self.lock_for_write()?;
        file.set_len(0).map_err(|e| StoreError::io(&self.path, e))?;
        if self.options.sync_writes {
            file.sync_all().map_err(|e| StoreError::io(&self.path, e))?;
        }

        info!(file = ?self.path, "Cleared store");
        Ok(())
    }

    /// Append one record
    pub fn add(&self, record: &T) -> Result<()> {
        let line = self.encode(record)?;
        self.append_lines(std::slice::from_ref(&line))?;
        debug!(file = ?self.path, kind = T::kind(), "Appended record");
        Ok(())
    }

    /// Append several records in order
    ///
    /// With `atomic_batches` (the default) either all records land or none
    /// do. Otherwise each record is encoded and appended on its own, so a
    /// failure part way through leaves the earlier records persisted.
    pub fn add_all<'a, I>(&self, records: I) -> Result<()>
    where
        I: IntoIterator<Item = &'a T>,
    {
        let count = if self.options.atomic_batches {
            let lines = records
                .into_iter()
                .map(|r| self.encode(r))
                .collect::<Result<Vec<String>>>()?;
            if lines.is_empty() {
                return Ok(());
            }
            self.append_batch_atomic(&lines)?;
            lines.len()
        } else {
            let mut count = 0;
            for record in records {
                let line = self.encode(record)?;
                self.append_lines(std::slice::from_ref(&line))?;
                count += 1;
            }
            count
        };

        info!(file = ?self.path, count, "Appended batch");
        Ok(())
    }

    // ========================================================================
    // Read operations
    // ========================================================================

    /// Read, decode and validate every record in file order
    pub fn get_all(&self) -> Result<Vec<T>> {
        let lines = self.read_lines()?;
        let records = lines
            .iter()
            .enumerate()
            .map(|(i, line)| self.decode(i, line))
            .collect::<Result<Vec<T>>>()?;

        debug!(file = ?self.path, count = records.len(), "Loaded records");
        Ok(records)
    }

    /// Get the record at 0-based position `index`
    ///
    /// Returns `Ok(None)` when the file has fewer lines. Only the target line
    /// is decoded.
    pub fn find_by_index(&self, index: usize) -> Result<Option<T>> {
        let lines = self.read_lines()?;
        match lines.get(index) {
            Some(line) => self.decode(index, line).map(Some),
            None => {
                debug!(file = ?self.path, index, len = lines.len(), "Index past end of store");
                Ok(None)
            }
        }
    }

    /// Get every record matching `predicate`, in file order
    pub fn filter<P>(&self, mut predicate: P) -> Result<Vec<T>>
    where
        P: FnMut(&T) -> bool,
    {
        let mut results = Vec::new();
        for (i, line) in self.read_lines()?.iter().enumerate() {
            let record = self.decode(i, line)?;
            if predicate(&record) {
                results.push(record);
            }
        }

        debug!(file = ?self.path, count = results.len(), "Filtered records");
        Ok(results)
    }

    /// Count lines without decoding them
    pub fn count(&self) -> Result<usize> {
        Ok(self.read_lines()?.len())
    }

    // ========================================================================
    // Helper methods
    // ========================================================================

    fn encode(&self, record: &T) -> Result<String> {
        let line = record.serialize_line();
        if line.contains(['\n', '\r']) {
            return Err(StoreError::Encode {
                path: self.path.clone(),
                source: FormatError::LineBreak { line },
            });
        }
        Ok(line)
    }

    fn decode(&self, index: usize, line: &str) -> Result<T> {
        let record = T::deserialize_line(line).map_err(|e| {
            warn!(file = ?self.path, line = index + 1, error = %e, "Failed to decode line");
            StoreError::Format {
                path: self.path.clone(),
                line: index + 1,
                source: e,
            }
        })?;

        self.validator.validate(&record).map_err(|e| {
            warn!(file = ?self.path, line = index + 1, error = %e, "Record failed validation");
            StoreError::Validation {
                path: self.path.clone(),
                line: index + 1,
                source: e,
            }
        })?;

        Ok(record)
    }

    fn read_lines(&self) -> Result<Vec<String>> {
        let file = File::open(&self.path).map_err(|e| StoreError::io(&self.path, e))?;
        file.lock_shared().map_err(|e| StoreError::io(&self.path, e))?;

        // Lock is released when file is dropped
        BufReader::new(file)
            .lines()
            .collect::<std::io::Result<Vec<String>>>()
            .map_err(|e| StoreError::io(&self.path, e))
    }

    /// Open the data file for reading and writing and take an exclusive lock on it
    ///
    /// A batch may rename a new file over the path while we wait for the
    /// lock. In that case the locked handle points at the replaced file, so
    /// we drop it and lock the current one instead.
    fn lock_for_write(&self) -> Result<File> {
        loop {
            let file = OpenOptions::new()
                .create(true)
                .read(true)
                .write(true)
                .open(&self.path)
                .map_err(|e| StoreError::io(&self.path, e))?;

            file.lock_exclusive().map_err(|e| StoreError::io(&self.path, e))?;

            if self.is_current(&file)? {
                return Ok(file);
            }
            debug!(file = ?self.path, "Data file replaced while waiting for lock, retrying");
        }
    }

    #[cfg(unix)]
    fn is_current(&self, file: &File) -> Result<bool> {
        use std::os::unix::fs::MetadataExt;

        let held = file.metadata().map_err(|e| StoreError::io(&self.path, e))?;
        match fs::metadata(&self.path) {
            Ok(current) => Ok(held.dev() == current.dev() && held.ino() == current.ino()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(StoreError::io(&self.path, e)),
        }
    }

    #[cfg(not(unix))]
    fn is_current(&self, _file: &File) -> Result<bool> {
        // Renaming over an open file fails on these platforms
        Ok(true)
    }

    fn append_lines(&self, lines: &[String]) -> Result<()> {
        let mut file = self.lock_for_write()?;

        let mut buf = String::new();
        if !ends_with_newline(&mut file).map_err(|e| StoreError::io(&self.path, e))? {
            buf.push('\n');
        }
        for line in lines {
            buf.push_str(line);
            buf.push('\n');
        }

        file.seek(SeekFrom::End(0))
            .and_then(|_| file.write_all(buf.as_bytes()))
            .map_err(|e| StoreError::io(&self.path, e))?;

        if self.options.sync_writes {
            file.sync_all().map_err(|e| StoreError::io(&self.path, e))?;
        }
        Ok(())
    }

    /// Write existing content plus `lines` to a sibling temp file, then rename it over the store
    ///
    /// The data file stays exclusively locked from the read until the rename.
    fn append_batch_atomic(&self, lines: &[String]) -> Result<()> {
        let tmp_path = self.tmp_path();
        let mut file = self.lock_for_write()?;

        let mut content = String::new();
        file.read_to_string(&mut content).map_err(|e| StoreError::io(&self.path, e))?;
        if !content.is_empty() && !content.ends_with('\n') {
            content.push('\n');
        }
        for line in lines {
            content.push_str(line);
            content.push('\n');
        }

        if let Err(e) = self.write_and_rename(&tmp_path, content.as_bytes()) {
            // Best effort, the data file is untouched either way
            let _ = fs::remove_file(&tmp_path);
            return Err(StoreError::io(&self.path, e));
        }

        // Lock on the replaced file is released here
        drop(file);
        Ok(())
    }

    fn write_and_rename(&self, tmp_path: &Path, content: &[u8]) -> std::io::Result<()> {
        let mut tmp = File::create(tmp_path)?;
        tmp.write_all(content)?;
        if self.options.sync_writes {
            tmp.sync_all()?;
        }
        fs::rename(tmp_path, &self.path)
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

/// True for an empty file or one whose last byte is `\n`
fn ends_with_newline(file: &mut File) -> std::io::Result<bool> {
    if file.metadata()?.len() == 0 {
        return Ok(true);
    }
    let mut last = [0u8; 1];
    file.seek(SeekFrom::End(-1))?;
    file.read_exact(&mut last)?;
    Ok(last[0] == b'\n')
}
