//! ZIP archive of counterexample graphs, one adjacency-matrix text file per graph.

use crate::graph::{parse_adjacency_matrix, Graph, GraphError};
use std::fs::File;
use std::io::{self, BufWriter, Read};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

/// Errors raised while writing or reading an archive.
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// Creating, writing or reading the archive file failed.
    #[error("archive I/O error: {0}")]
    Io(#[from] io::Error),
    /// The ZIP layer rejected the operation.
    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),
    /// A member does not hold a valid adjacency matrix.
    #[error("member {member}: {source}")]
    Member {
        /// Member name inside the archive.
        member: String,
        /// Parse failure.
        #[source]
        source: GraphError,
    },
}

/// Name of the `index`-th member (1-based).
pub fn member_name(index: usize) -> String {
    format!("nonWR_{index}.txt")
}

/// Streams graphs into a deflate-compressed ZIP file.
///
/// Members go to a temporary file in the destination directory. The archive
/// only appears at its final path once [`ArchiveWriter::finish`] succeeds; a
/// writer dropped before that leaves the destination untouched.
pub struct ArchiveWriter {
    zip: ZipWriter<BufWriter<NamedTempFile>>,
    path: PathBuf,
    count: usize,
}

impl ArchiveWriter {
    /// Starts an archive that [`finish`](Self::finish) will place at `path`.
    ///
    /// # Errors
    /// Returns an error if the temporary file cannot be created next to `path`.
    pub fn create(path: impl AsRef<Path>) -> Result<Self, ArchiveError> {
        let path = path.as_ref().to_path_buf();
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let staging = NamedTempFile::new_in(dir)?;
        Ok(Self {
            zip: ZipWriter::new(BufWriter::new(staging)),
            path,
            count: 0,
        })
    }

    /// Appends `graph` as the next member and returns its 1-based index.
    ///
    /// # Errors
    /// Returns an error if the member cannot be written.
    pub fn append(&mut self, graph: &Graph) -> Result<usize, ArchiveError> {
        let index = self.count + 1;
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        self.zip.start_file(member_name(index), options)?;
        graph.write_to(&mut self.zip)?;
        self.count = index;
        Ok(index)
    }

    /// Number of members written so far.
    pub fn len(&self) -> usize {
        self.count
    }

    /// Returns `true` if no member has been written.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Destination path of the finished archive.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes the central directory, moves the archive to its destination
    /// (replacing any previous file) and returns that path.
    ///
    /// # Errors
    /// Returns an error if finalizing, flushing or renaming fails.
    pub fn finish(self) -> Result<PathBuf, ArchiveError> {
        let staging = self.zip.finish()?.into_inner().map_err(io::IntoInnerError::into_error)?;
        staging.as_file().sync_all()?;
        staging.persist(&self.path).map_err(io::Error::from)?;
        Ok(self.path)
    }
}

/// Reads every member of an archive back as `(name, graph)`, in archive order.
///
/// # Errors
/// Returns an error if the archive cannot be opened or a member is malformed.
pub fn read_archive(path: impl AsRef<Path>) -> Result<Vec<(String, Graph)>, ArchiveError> {
    let mut archive = ZipArchive::new(File::open(path)?)?;
    let mut out = Vec::with_capacity(archive.len());
    for i in 0..archive.len() {
        let mut member = archive.by_index(i)?;
        let name = member.name().to_string();
        let mut text = String::new();
        member.read_to_string(&mut text)?;
        let graph = parse_adjacency_matrix(&text).map_err(|source| ArchiveError::Member {
            member: name.clone(),
            source,
        })?;
        out.push((name, graph));
    }
    Ok(out)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn members_are_numbered_from_one() {
        assert_eq!(member_name(1), "nonWR_1.txt");
        assert_eq!(member_name(12), "nonWR_12.txt");
    }

    #[test]
    fn written_graphs_read_back_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.zip");
        let graphs = [
            Graph::complete(4).unwrap(),
            Graph::from_edges(4, &[(0, 1), (2, 3)]).unwrap(),
        ];

        let mut writer = ArchiveWriter::create(&path).unwrap();
        assert!(writer.is_empty());
        for (i, g) in graphs.iter().enumerate() {
            assert_eq!(writer.append(g).unwrap(), i + 1);
        }
        assert_eq!(writer.len(), 2);
        assert_eq!(writer.finish().unwrap(), path);

        let members = read_archive(&path).unwrap();
        assert_eq!(members.len(), 2);
        assert_eq!(members[0], ("nonWR_1.txt".to_string(), graphs[0].clone()));
        assert_eq!(members[1], ("nonWR_2.txt".to_string(), graphs[1].clone()));
    }

    #[test]
    fn member_text_is_the_adjacency_matrix() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("one.zip");
        let g = Graph::from_edges(3, &[(0, 2)]).unwrap();
        let mut writer = ArchiveWriter::create(&path).unwrap();
        writer.append(&g).unwrap();
        writer.finish().unwrap();

        let mut archive = ZipArchive::new(File::open(&path).unwrap()).unwrap();
        let mut text = String::new();
        archive
            .by_name("nonWR_1.txt")
            .unwrap()
            .read_to_string(&mut text)
            .unwrap();
        assert_eq!(text, "001\n000\n100\n");
    }

    #[test]
    fn unfinished_archive_leaves_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("abandoned.zip");
        let mut writer = ArchiveWriter::create(&path).unwrap();
        writer.append(&Graph::complete(3).unwrap()).unwrap();
        drop(writer);
        assert!(!path.exists());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn unfinished_archive_keeps_previous_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kept.zip");
        let mut writer = ArchiveWriter::create(&path).unwrap();
        writer.append(&Graph::complete(2).unwrap()).unwrap();
        writer.finish().unwrap();

        let mut writer = ArchiveWriter::create(&path).unwrap();
        writer.append(&Graph::empty(4).unwrap()).unwrap();
        writer.append(&Graph::empty(4).unwrap()).unwrap();
        drop(writer);

        let members = read_archive(&path).unwrap();
        assert_eq!(members, vec![("nonWR_1.txt".to_string(), Graph::complete(2).unwrap())]);
    }

    #[test]
    fn bare_file_name_is_staged_in_current_dir() {
        let writer = ArchiveWriter::create("wordrep-staging-check.zip").unwrap();
        assert_eq!(writer.path(), Path::new("wordrep-staging-check.zip"));
        drop(writer);
        assert!(!Path::new("wordrep-staging-check.zip").exists());
    }

    #[test]
    fn empty_archive_is_still_valid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.zip");
        ArchiveWriter::create(&path).unwrap().finish().unwrap();
        assert!(read_archive(&path).unwrap().is_empty());
    }
}
