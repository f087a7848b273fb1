/// File categorization by extension.
///
/// This module maps file extensions to broad categories (e.g. "Images",
/// "PDFs"). The table is fixed for the lifetime of the process and lookups
/// are case-insensitive. Anything not in the table lands in `Others`.
///
/// # Examples
///
/// ```
/// use dlsort::file_category::{Category, category_for_extension};
///
/// assert_eq!(category_for_extension(".jpg"), Category::Images);
/// assert_eq!(category_for_extension(".PDF"), Category::Pdfs);
/// assert_eq!(category_for_extension(".zzz"), Category::Others);
/// ```
use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;

/// Represents a broad file category.
///
/// Each category corresponds to one subdirectory of the organized folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Image files (JPG, PNG, GIF, etc.)
    Images,
    /// Text and word-processor documents (TXT, MD, DOCX, etc.)
    Documents,
    /// PDF files
    Pdfs,
    /// Spreadsheet files (XLSX, CSV, etc.)
    Spreadsheets,
    /// Presentation files (PPT, PPTX)
    Presentations,
    /// Archive files (ZIP, RAR, 7Z, etc.)
    Archives,
    /// Audio files (MP3, WAV, FLAC, etc.)
    Audio,
    /// Video files (MP4, MKV, MOV, etc.)
    Videos,
    /// Source code and web files
    Code,
    /// Unknown or uncategorized files
    Others,
}

impl Category {
    /// Fallback for extensions missing from the table.
    pub const FALLBACK: Self = Self::Others;

    /// Returns the directory name for this category.
    ///
    /// # Examples
    ///
    /// ```
    /// use dlsort::file_category::Category;
    ///
    /// assert_eq!(Category::Images.dir_name(), "Images");
    /// assert_eq!(Category::Pdfs.dir_name(), "PDFs");
    /// assert_eq!(Category::Others.dir_name(), "Others");
    /// ```
    pub fn dir_name(&self) -> &'static str {
        match self {
            Category::Images => "Images",
            Category::Documents => "Documents",
            Category::Pdfs => "PDFs",
            Category::Spreadsheets => "Spreadsheets",
            Category::Presentations => "Presentations",
            Category::Archives => "Archives",
            Category::Audio => "Audio",
            Category::Videos => "Videos",
            Category::Code => "Code",
            Category::Others => "Others",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.dir_name())
    }
}

/// Extension table. Keys carry the leading dot and are lowercase.
const EXTENSION_TABLE: &[(&str, Category)] = &[
    // Images
    (".jpg", Category::Images),
    (".jpeg", Category::Images),
    (".png", Category::Images),
    (".gif", Category::Images),
    (".webp", Category::Images),
    (".svg", Category::Images),
    (".heic", Category::Images),
    // Documents
    (".txt", Category::Documents),
    (".md", Category::Documents),
    (".doc", Category::Documents),
    (".docx", Category::Documents),
    (".rtf", Category::Documents),
    // PDFs
    (".pdf", Category::Pdfs),
    // Spreadsheets
    (".xls", Category::Spreadsheets),
    (".xlsx", Category::Spreadsheets),
    (".csv", Category::Spreadsheets),
    // Presentations
    (".ppt", Category::Presentations),
    (".pptx", Category::Presentations),
    // Archives
    (".zip", Category::Archives),
    (".rar", Category::Archives),
    (".7z", Category::Archives),
    (".tar", Category::Archives),
    (".gz", Category::Archives),
    // Audio
    (".mp3", Category::Audio),
    (".wav", Category::Audio),
    (".m4a", Category::Audio),
    (".flac", Category::Audio),
    // Videos
    (".mp4", Category::Videos),
    (".mkv", Category::Videos),
    (".mov", Category::Videos),
    (".avi", Category::Videos),
    (".webm", Category::Videos),
    // Code
    (".py", Category::Code),
    (".c", Category::Code),
    (".cpp", Category::Code),
    (".java", Category::Code),
    (".js", Category::Code),
    (".ts", Category::Code),
    (".html", Category::Code),
    (".css", Category::Code),
    (".json", Category::Code),
];

static EXTENSION_MAP: LazyLock<HashMap<&'static str, Category>> =
    LazyLock::new(|| EXTENSION_TABLE.iter().copied().collect());

/// Maps a file extension (with its leading dot) to a category.
///
/// The lookup is an exact match on the lowercased input. Multi-part
/// extensions are not recognized; pass only the final one (".gz", not
/// ".tar.gz"). Empty or unknown extensions yield [`Category::Others`].
///
/// # Examples
///
/// ```
/// use dlsort::file_category::{Category, category_for_extension};
///
/// assert_eq!(category_for_extension(".Mp3"), Category::Audio);
/// assert_eq!(category_for_extension(""), Category::Others);
/// ```
pub fn category_for_extension(ext: &str) -> Category {
    EXTENSION_MAP
        .get(ext.to_lowercase().as_str())
        .copied()
        .unwrap_or(Category::FALLBACK)
}

/// Returns the final extension of `path` including the leading dot.
///
/// Returns an empty string when the file name has no extension. The case
/// of the extension is preserved.
///
/// # Examples
///
/// ```
/// use dlsort::file_category::extension_of;
/// use std::path::Path;
///
/// assert_eq!(extension_of(Path::new("photo.JPG")), ".JPG");
/// assert_eq!(extension_of(Path::new("backup.tar.gz")), ".gz");
/// assert_eq!(extension_of(Path::new("README")), "");
/// ```
pub fn extension_of(path: &Path) -> String {
    match path.extension().map(|ext| ext.to_string_lossy()) {
        Some(ext) if !ext.is_empty() => format!(".{}", ext),
        _ => String::new(),
    }
}

/// Classifies a file path by its final extension.
pub fn categorize_path(path: &Path) -> Category {
    category_for_extension(&extension_of(path))
}
