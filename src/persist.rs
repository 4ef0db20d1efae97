use std::{
    fs,
    io::Write,
    path::Path,
};

use tempfile::NamedTempFile;

use crate::error::{Error, Result};

/// Replaces `path` with `contents` in one step: the bytes go to a temporary
/// file in the same directory which is then renamed over the destination.
/// Missing parent directories are created.
pub(crate) fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).map_err(|e| Error::io(e, parent))?;

    let mut tmp = NamedTempFile::new_in(parent).map_err(|e| Error::io(e, parent))?;
    tmp.write_all(contents).map_err(|e| Error::io(e, tmp.path()))?;
    tmp.as_file().sync_all().map_err(|e| Error::io(e, tmp.path()))?;
    tmp.persist(path).map_err(|e| Error::io(e.error, path))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_parents_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a").join("b").join("out.txt");
        write_atomic(&path, b"first").unwrap();
        write_atomic(&path, b"second").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "second");
        let entries: Vec<_> = fs::read_dir(path.parent().unwrap()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }
}
