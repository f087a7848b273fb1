/// File organization system for moving files into category directories.
///
/// This module provides the safe move used for every file: the destination
/// directory is created on demand, and a file that would land on an occupied
/// name is renamed with a ` (N)` marker instead of overwriting anything.
use crate::config::ConfigError;
use crate::file_category::Category;
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Records a single file that was moved during an organization run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovedFile {
    /// The path of the file before it was moved.
    pub original_path: PathBuf,
    /// The final path of the file after collision resolution.
    pub new_path: PathBuf,
    /// The category the file was moved into.
    pub category: Category,
}

impl MovedFile {
    /// Returns true if the file was saved under a different name than it had.
    pub fn was_renamed(&self) -> bool {
        self.original_path.file_name() != self.new_path.file_name()
    }
}

/// Errors that can occur during file organization operations.
#[derive(Debug, Error)]
pub enum OrganizeError {
    /// The directory to organize does not exist or is not a directory.
    #[error("Directory not found: {}", path.display())]
    MissingDirectory { path: PathBuf },

    /// Failed to list the directory to organize.
    #[error("Error reading directory {}: {source}", path.display())]
    DirectoryReadFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Failed to create a category directory.
    #[error("Failed to create directory {}: {source}", path.display())]
    DirectoryCreationFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Failed to move a file to its destination.
    #[error("Failed to move {} to {}: {source}", from.display(), to.display())]
    FileMoveFailure {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The filter configuration could not be loaded or compiled.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result type for file organization operations.
pub type OrganizeResult<T> = Result<T, OrganizeError>;

/// Moves files into category subdirectories without overwriting anything.
pub struct FileOrganizer;

impl FileOrganizer {
    /// Moves a file into its category directory within the base path.
    ///
    /// The destination is `base_path/<category dir>/<file name>`; the actual
    /// path may carry a ` (N)` suffix if that name is taken.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use dlsort::file_category::Category;
    /// use dlsort::file_organizer::FileOrganizer;
    /// use std::path::Path;
    ///
    /// let result = FileOrganizer::move_to_category(
    ///     Path::new("/path/to/Downloads"),
    ///     Path::new("/path/to/Downloads/image.png"),
    ///     Category::Images,
    /// );
    ///
    /// match result {
    ///     Ok(moved) => println!("Saved as {}", moved.new_path.display()),
    ///     Err(e) => eprintln!("Organization failed: {}", e),
    /// }
    /// ```
    pub fn move_to_category(
        base_path: &Path,
        file_path: &Path,
        category: Category,
    ) -> OrganizeResult<MovedFile> {
        let file_name = file_path
            .file_name()
            .ok_or_else(|| OrganizeError::FileMoveFailure {
                from: file_path.to_path_buf(),
                to: base_path.join(category.dir_name()),
                source: io::Error::new(io::ErrorKind::InvalidInput, "file has no name component"),
            })?;

        let target_path = base_path.join(category.dir_name()).join(file_name);
        let new_path = Self::safe_move(file_path, &target_path)?;

        Ok(MovedFile {
            original_path: file_path.to_path_buf(),
            new_path,
            category,
        })
    }

    /// Moves `source` to `destination`, renaming on collision.
    ///
    /// 1. The parent of `destination` is created if missing (with ancestors).
    /// 2. If `destination` is free, the file is moved there.
    /// 3. Otherwise `"{stem} ({n}){ext}"` is tried for n = 1, 2, ... in the
    ///    same directory and the first free name is used.
    ///
    /// A name is taken if anything exists there, including a directory or a
    /// dangling symlink. Returns the path the file ended up at.
    ///
    /// The existence check and the move are separate steps, so another
    /// process creating the chosen name in between is not guarded against.
    pub fn safe_move(source: &Path, destination: &Path) -> OrganizeResult<PathBuf> {
        if !source.is_file() {
            return Err(OrganizeError::FileMoveFailure {
                from: source.to_path_buf(),
                to: destination.to_path_buf(),
                source: io::Error::new(io::ErrorKind::NotFound, "source is not an existing file"),
            });
        }

        if let Some(parent) = destination.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(|e| OrganizeError::DirectoryCreationFailed {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let final_path = Self::free_destination(destination);

        move_file(source, &final_path).map_err(|e| OrganizeError::FileMoveFailure {
            from: source.to_path_buf(),
            to: final_path.clone(),
            source: e,
        })?;

        Ok(final_path)
    }

    /// Returns `destination` if it is free, otherwise the first free
    /// numbered candidate next to it.
    fn free_destination(destination: &Path) -> PathBuf {
        if !is_occupied(destination) {
            return destination.to_path_buf();
        }

        let mut counter: u64 = 1;
        loop {
            let candidate = numbered_candidate(destination, counter);
            if !is_occupied(&candidate) {
                return candidate;
            }
            counter += 1;
        }
    }
}

/// Builds `"{stem} ({counter}){ext}"` in the directory of `destination`.
///
/// `report.tar.gz` with counter 2 becomes `report.tar (2).gz`; `notes.`
/// with counter 1 becomes `notes. (1)`.
pub fn numbered_candidate(destination: &Path, counter: u64) -> PathBuf {
    let mut name = OsString::new();
    match destination.extension() {
        Some(ext) if !ext.is_empty() => {
            if let Some(stem) = destination.file_stem() {
                name.push(stem);
            }
            name.push(format!(" ({})", counter));
            name.push(".");
            name.push(ext);
        }
        // No extension, or a name ending in a bare dot: the marker goes last
        _ => {
            if let Some(file_name) = destination.file_name() {
                name.push(file_name);
            }
            name.push(format!(" ({})", counter));
        }
    }
    destination.with_file_name(name)
}

/// True if anything at all exists at `path`, without following symlinks.
fn is_occupied(path: &Path) -> bool {
    fs::symlink_metadata(path).is_ok()
}

/// Renames `source` to `destination`, copying across filesystems.
fn move_file(source: &Path, destination: &Path) -> io::Result<()> {
    match fs::rename(source, destination) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::CrossesDevices => {
            copy_then_remove(source, destination)
        }
        Err(e) => Err(e),
    }
}

/// Copies `source` to `destination` and deletes `source`.
///
/// If the copy fails, any partial destination file is removed and the source
/// is left in place.
fn copy_then_remove(source: &Path, destination: &Path) -> io::Result<()> {
    if let Err(e) = fs::copy(source, destination) {
        let _ = fs::remove_file(destination);
        return Err(e);
    }
    fs::remove_file(source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(path: &Path, content: &str) {
        fs::write(path, content).expect("Failed to write test file");
    }

    #[test]
    fn test_safe_move_to_free_destination() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base_path = temp_dir.path();

        let source = base_path.join("notes.txt");
        write(&source, "hello");

        let destination = base_path.join("Documents").join("notes.txt");
        let final_path = FileOrganizer::safe_move(&source, &destination).expect("Move failed");

        assert_eq!(final_path, destination);
        assert!(!source.exists());
        assert_eq!(fs::read_to_string(&final_path).unwrap(), "hello");
    }

    #[test]
    fn test_safe_move_creates_missing_ancestors() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let source = temp_dir.path().join("clip.mp4");
        write(&source, "video");

        let destination = temp_dir.path().join("a").join("b").join("c").join("clip.mp4");
        let final_path = FileOrganizer::safe_move(&source, &destination).expect("Move failed");

        assert_eq!(final_path, destination);
        assert!(temp_dir.path().join("a/b/c").is_dir());
    }

    #[test]
    fn test_safe_move_parent_creation_is_idempotent() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base_path = temp_dir.path();

        let first = base_path.join("one.png");
        let second = base_path.join("two.png");
        write(&first, "1");
        write(&second, "2");

        let images = base_path.join("Images");
        FileOrganizer::safe_move(&first, &images.join("one.png")).expect("First move failed");
        FileOrganizer::safe_move(&second, &images.join("two.png")).expect("Second move failed");

        assert!(images.join("one.png").is_file());
        assert!(images.join("two.png").is_file());
    }

    #[test]
    fn test_safe_move_collisions_count_upwards() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base_path = temp_dir.path();
        let folder = base_path.join("Documents");
        fs::create_dir(&folder).unwrap();
        write(&folder.join("a.txt"), "existing");

        let destination = folder.join("a.txt");
        for (i, expected) in ["a (1).txt", "a (2).txt", "a (3).txt"].iter().enumerate() {
            let source = base_path.join(format!("src{}.txt", i));
            write(&source, &format!("incoming {}", i));

            let final_path = FileOrganizer::safe_move(&source, &destination).expect("Move failed");
            assert_eq!(final_path, folder.join(expected));
            assert_eq!(
                fs::read_to_string(&final_path).unwrap(),
                format!("incoming {}", i)
            );
        }

        // The original occupant is untouched
        assert_eq!(fs::read_to_string(&destination).unwrap(), "existing");
        assert_eq!(fs::read_dir(&folder).unwrap().count(), 4);
    }

    #[test]
    fn test_safe_move_skips_taken_numbered_names() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let folder = temp_dir.path().join("Images");
        fs::create_dir(&folder).unwrap();
        write(&folder.join("pic.png"), "0");
        write(&folder.join("pic (1).png"), "1");
        write(&folder.join("pic (2).png"), "2");

        let source = temp_dir.path().join("pic.png");
        write(&source, "new");

        let final_path =
            FileOrganizer::safe_move(&source, &folder.join("pic.png")).expect("Move failed");
        assert_eq!(final_path, folder.join("pic (3).png"));
    }

    #[test]
    fn test_safe_move_collision_without_extension() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let folder = temp_dir.path().join("Others");
        fs::create_dir(&folder).unwrap();
        write(&folder.join("Makefile"), "old");

        let source = temp_dir.path().join("Makefile");
        write(&source, "new");

        let final_path =
            FileOrganizer::safe_move(&source, &folder.join("Makefile")).expect("Move failed");
        assert_eq!(final_path, folder.join("Makefile (1)"));
    }

    #[test]
    fn test_directory_at_destination_counts_as_collision() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let folder = temp_dir.path().join("Others");
        fs::create_dir_all(folder.join("data.bin")).unwrap();

        let source = temp_dir.path().join("data.bin");
        write(&source, "bytes");

        let final_path =
            FileOrganizer::safe_move(&source, &folder.join("data.bin")).expect("Move failed");
        assert_eq!(final_path, folder.join("data (1).bin"));
        assert!(folder.join("data.bin").is_dir());
    }

    #[cfg(unix)]
    #[test]
    fn test_dangling_symlink_counts_as_collision() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let folder = temp_dir.path().join("Documents");
        fs::create_dir(&folder).unwrap();
        std::os::unix::fs::symlink(temp_dir.path().join("gone"), folder.join("x.txt")).unwrap();

        let source = temp_dir.path().join("x.txt");
        write(&source, "data");

        let final_path =
            FileOrganizer::safe_move(&source, &folder.join("x.txt")).expect("Move failed");
        assert_eq!(final_path, folder.join("x (1).txt"));
        assert!(fs::symlink_metadata(folder.join("x.txt")).unwrap().file_type().is_symlink());
    }

    #[test]
    fn test_safe_move_missing_source_touches_nothing() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let source = temp_dir.path().join("ghost.txt");
        let destination = temp_dir.path().join("Documents").join("ghost.txt");

        let result = FileOrganizer::safe_move(&source, &destination);
        assert!(matches!(result, Err(OrganizeError::FileMoveFailure { .. })));
        assert!(!temp_dir.path().join("Documents").exists());
    }

    #[test]
    fn test_numbered_candidate() {
        let dir = Path::new("/tmp/Archives");
        assert_eq!(
            numbered_candidate(&dir.join("backup.tar.gz"), 2),
            dir.join("backup.tar (2).gz")
        );
        assert_eq!(
            numbered_candidate(&dir.join("a.txt"), 1),
            dir.join("a (1).txt")
        );
        assert_eq!(numbered_candidate(&dir.join("LICENSE"), 10), dir.join("LICENSE (10)"));
        assert_eq!(numbered_candidate(&dir.join("trailing."), 1), dir.join("trailing. (1)"));
        assert_eq!(numbered_candidate(&dir.join(".env"), 3), dir.join(".env (3)"));
    }

    #[test]
    fn test_safe_move_collision_with_trailing_dot() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let folder = temp_dir.path().join("Others");
        fs::create_dir(&folder).unwrap();
        write(&folder.join("trailing."), "old");

        let source = temp_dir.path().join("trailing.");
        write(&source, "new");

        let final_path =
            FileOrganizer::safe_move(&source, &folder.join("trailing.")).expect("Move failed");
        assert_eq!(final_path, folder.join("trailing. (1)"));
        assert_eq!(fs::read_to_string(&final_path).unwrap(), "new");
        assert_eq!(fs::read_to_string(folder.join("trailing.")).unwrap(), "old");
    }

    #[test]
    fn test_copy_then_remove_moves_content() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let source = temp_dir.path().join("song.mp3");
        let destination = temp_dir.path().join("copy.mp3");
        write(&source, "audio bytes");

        copy_then_remove(&source, &destination).expect("Copy failed");

        assert!(!source.exists());
        assert_eq!(fs::read_to_string(&destination).unwrap(), "audio bytes");
    }

    #[test]
    fn test_copy_then_remove_keeps_source_on_failure() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let source = temp_dir.path().join("song.mp3");
        let destination = temp_dir.path().join("missing_dir").join("song.mp3");
        write(&source, "audio bytes");

        assert!(copy_then_remove(&source, &destination).is_err());
        assert!(source.exists());
    }

    #[test]
    fn test_move_to_category() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base_path = temp_dir.path();
        let file_path = base_path.join("report.pdf");
        write(&file_path, "%PDF");

        let moved = FileOrganizer::move_to_category(base_path, &file_path, Category::Pdfs)
            .expect("Failed to move file");

        assert_eq!(moved.original_path, file_path);
        assert_eq!(moved.new_path, base_path.join("PDFs").join("report.pdf"));
        assert_eq!(moved.category, Category::Pdfs);
        assert!(!moved.was_renamed());
        assert!(!file_path.exists());
    }

    #[test]
    fn test_move_to_category_reports_rename() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let base_path = temp_dir.path();
        fs::create_dir(base_path.join("Code")).unwrap();
        write(&base_path.join("Code").join("main.py"), "old");

        let file_path = base_path.join("main.py");
        write(&file_path, "new");

        let moved = FileOrganizer::move_to_category(base_path, &file_path, Category::Code)
            .expect("Failed to move file");

        assert!(moved.was_renamed());
        assert_eq!(moved.new_path, base_path.join("Code").join("main (1).py"));
    }
}
