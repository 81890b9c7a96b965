//! File classification by extension.

/// Broad file-type classes driving listing glyphs and preview behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
    Image,
    Pdf,
    Audio,
    Video,
    Sheet,
    Document,
    Text,
    Other,
}

/// How a file of a given kind can be previewed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewStyle {
    /// Contents render directly in the preview pane.
    InlineText,
    /// Only a metadata card renders (kind and size).
    InfoCard,
    /// No preview.
    Unavailable,
}

impl FileKind {
    /// Classify by extension, with or without the leading dot,
    /// case-insensitive.
    #[must_use]
    pub fn from_extension(ext: &str) -> Self {
        let ext = ext.trim_start_matches('.').to_ascii_lowercase();
        match ext.as_str() {
            "png" | "jpeg" | "jpg" | "gif" | "webp" | "bmp" => Self::Image,
            "pdf" => Self::Pdf,
            "mp3" | "m4a" | "wav" | "ogg" | "oga" | "flac" => Self::Audio,
            "mp4" | "mov" | "webm" | "mkv" => Self::Video,
            "csv" | "tsv" | "xls" | "xlsx" => Self::Sheet,
            "doc" | "docx" => Self::Document,
            "txt" | "md" | "log" | "json" | "toml" | "yaml" | "yml" => Self::Text,
            _ => Self::Other,
        }
    }

    /// Classify from a file name (the part after the last dot).
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() => Self::from_extension(ext),
            _ => Self::Other,
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Pdf => "PDF",
            Self::Audio => "audio",
            Self::Video => "video",
            Self::Sheet => "spreadsheet",
            Self::Document => "document",
            Self::Text => "text",
            Self::Other => "file",
        }
    }

    /// Text renders inline; media gets an info card; the rest has no
    /// preview.
    #[must_use]
    pub fn preview_style(self) -> PreviewStyle {
        match self {
            Self::Text => PreviewStyle::InlineText,
            Self::Image | Self::Audio | Self::Video => PreviewStyle::InfoCard,
            Self::Pdf | Self::Sheet | Self::Document | Self::Other => PreviewStyle::Unavailable,
        }
    }

    #[must_use]
    pub fn previewable(self) -> bool {
        self.preview_style() != PreviewStyle::Unavailable
    }
}

#[cfg(test)]
mod tests {
    use super::{FileKind, PreviewStyle};

    #[test]
    fn classifies_known_extensions() {
        assert_eq!(FileKind::from_extension("png"), FileKind::Image);
        assert_eq!(FileKind::from_extension(".JPG"), FileKind::Image);
        assert_eq!(FileKind::from_extension("pdf"), FileKind::Pdf);
        assert_eq!(FileKind::from_extension("flac"), FileKind::Audio);
        assert_eq!(FileKind::from_extension("mov"), FileKind::Video);
        assert_eq!(FileKind::from_extension("xlsx"), FileKind::Sheet);
        assert_eq!(FileKind::from_extension("docx"), FileKind::Document);
        assert_eq!(FileKind::from_extension("toml"), FileKind::Text);
        assert_eq!(FileKind::from_extension("iso"), FileKind::Other);
    }

    #[test]
    fn classifies_from_names() {
        assert_eq!(FileKind::from_name("cat.png"), FileKind::Image);
        assert_eq!(FileKind::from_name("notes.TXT"), FileKind::Text);
        assert_eq!(FileKind::from_name("Makefile"), FileKind::Other);
        // A bare leading dot is a hidden file, not an extension.
        assert_eq!(FileKind::from_name(".bashrc"), FileKind::Other);
        assert_eq!(FileKind::from_name("archive.tar.gz"), FileKind::Other);
    }

    #[test]
    fn preview_styles_follow_kind() {
        assert_eq!(FileKind::Text.preview_style(), PreviewStyle::InlineText);
        assert_eq!(FileKind::Image.preview_style(), PreviewStyle::InfoCard);
        assert_eq!(FileKind::Audio.preview_style(), PreviewStyle::InfoCard);
        assert_eq!(FileKind::Video.preview_style(), PreviewStyle::InfoCard);
        assert_eq!(FileKind::Pdf.preview_style(), PreviewStyle::Unavailable);
        assert!(!FileKind::Sheet.previewable());
        assert!(FileKind::Text.previewable());
    }
}
