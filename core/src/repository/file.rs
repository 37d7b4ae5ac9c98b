use std::fs::{self, File};
use std::io::{self, BufWriter, ErrorKind, Write};
use std::path::PathBuf;

use anyhow::Result;

use crate::repository::traits::BlobStore;

/// Stores each key as `<dir>/<key>.json`.
#[derive(Clone)]
pub struct FileBlobStore {
    dir: PathBuf,
}

impl FileBlobStore {
    pub fn new(dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&dir)?; // Ensure the directory exists
        Ok(FileBlobStore { dir })
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl BlobStore for FileBlobStore {
    fn read(&self, key: &str) -> io::Result<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn write(&self, key: &str, contents: &str) -> io::Result<()> {
        // Write beside the target and rename so a failed write leaves the old blob intact.
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        let result = File::create(&tmp)
            .and_then(|file| {
                let mut writer = BufWriter::new(file);
                writer.write_all(contents.as_bytes())?;
                writer.flush()
            })
            .and_then(|()| fs::rename(&tmp, &path));
        if result.is_err() {
            let _ = fs::remove_file(&tmp);
        }
        result
    }
}
