/// Photo staging for the submission form
///
/// An ordered sequence of photo slots, each either a reference the server
/// already stores or a freshly picked local file pending upload. The form
/// keeps a preview sequence aligned index-for-index with this one, so
/// every mutation here must preserve that correspondence.

use std::path::{Path, PathBuf};

/// Hard cap on photos per post, enforced before anything reaches the wire
pub const MAX_PHOTOS: usize = 5;

#[derive(Debug, Clone, PartialEq)]
pub enum StagedPhoto {
    /// Already persisted on the server, identified by its path/URL
    Persisted(String),
    /// Picked locally in this session, not yet uploaded
    Local { path: PathBuf, bytes: Vec<u8> },
}

impl StagedPhoto {
    pub fn is_local(&self) -> bool {
        matches!(self, StagedPhoto::Local { .. })
    }

    /// File name used for the multipart part of a local photo
    pub fn file_name(&self) -> String {
        match self {
            StagedPhoto::Persisted(path) => path.clone(),
            StagedPhoto::Local { path, .. } => path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| "photo".to_owned()),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct PhotoStaging {
    photos: Vec<StagedPhoto>,
    error: Option<String>,
}

impl PhotoStaging {
    /// Staging for edit mode, seeded with the record's stored photo paths.
    pub fn from_persisted(paths: Vec<String>) -> Self {
        PhotoStaging {
            photos: paths.into_iter().map(StagedPhoto::Persisted).collect(),
            error: None,
        }
    }

    pub fn photos(&self) -> &[StagedPhoto] {
        &self.photos
    }

    pub fn len(&self) -> usize {
        self.photos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.photos.is_empty()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Stage a new selection of local files.
    ///
    /// The staged sequence becomes "current local files + new files":
    /// persisted references drop out (the server keeps photos that are not
    /// re-sent). If that total would exceed [`MAX_PHOTOS`] the entire
    /// selection is rejected, an error is recorded, and nothing changes.
    /// Returns true when the selection was accepted.
    pub fn add_local(&mut self, files: Vec<(PathBuf, Vec<u8>)>) -> bool {
        let locals = self.photos.iter().filter(|photo| photo.is_local()).count();
        if locals + files.len() > MAX_PHOTOS {
            self.error = Some(format!("Max {MAX_PHOTOS} photos allowed in total."));
            return false;
        }

        let mut photos: Vec<StagedPhoto> = self
            .photos
            .drain(..)
            .filter(StagedPhoto::is_local)
            .collect();
        photos.extend(
            files
                .into_iter()
                .map(|(path, bytes)| StagedPhoto::Local { path, bytes }),
        );

        self.photos = photos;
        self.error = None;
        true
    }

    /// Remove the photo at `index`, keeping the order of the rest.
    /// Out-of-range indices are ignored.
    pub fn remove(&mut self, index: usize) {
        if index < self.photos.len() {
            self.photos.remove(index);
        }
    }

    /// The upload subset of the payload: local files only, as
    /// (file name, bytes) pairs. Persisted references never re-upload.
    pub fn uploads(&self) -> Vec<(String, Vec<u8>)> {
        self.photos
            .iter()
            .filter_map(|photo| match photo {
                StagedPhoto::Local { bytes, .. } => Some((photo.file_name(), bytes.clone())),
                StagedPhoto::Persisted(_) => None,
            })
            .collect()
    }
}

/// Extensions offered by the photo picker
pub fn is_supported_photo(path: &Path) -> bool {
    matches!(
        path.extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase())
            .as_deref(),
        Some("jpg") | Some("jpeg") | Some("png")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str) -> (PathBuf, Vec<u8>) {
        (PathBuf::from(name), vec![0u8; 4])
    }

    fn names(staging: &PhotoStaging) -> Vec<String> {
        staging.photos().iter().map(StagedPhoto::file_name).collect()
    }

    #[test]
    fn test_adding_within_the_cap_appends_and_clears_errors() {
        let mut staging = PhotoStaging::default();
        assert!(!staging.add_local((0..6).map(|i| file(&format!("{i}.jpg"))).collect()));
        assert!(staging.error().is_some());

        assert!(staging.add_local(vec![file("a.jpg"), file("b.jpg")]));
        assert_eq!(staging.len(), 2);
        assert!(staging.error().is_none());
    }

    #[test]
    fn test_exceeding_the_cap_rejects_the_whole_selection() {
        let mut staging = PhotoStaging::default();
        assert!(staging.add_local((0..4).map(|i| file(&format!("{i}.jpg"))).collect()));

        let before = staging.photos().to_vec();
        assert!(!staging.add_local(vec![file("x.jpg"), file("y.jpg")]));

        // Nothing staged changed, not even partially
        assert_eq!(staging.photos(), before.as_slice());
        assert_eq!(staging.error(), Some("Max 5 photos allowed in total."));
    }

    #[test]
    fn test_adding_drops_persisted_references() {
        let mut staging =
            PhotoStaging::from_persisted(vec!["/uploads/old-1.jpg".into(), "/uploads/old-2.jpg".into()]);
        assert!(staging.add_local(vec![file("new.jpg")]));

        assert_eq!(names(&staging), vec!["new.jpg"]);
    }

    #[test]
    fn test_cap_counts_locals_only() {
        // 2 persisted + 5 new locals is fine: the persisted ones drop out
        let mut staging =
            PhotoStaging::from_persisted(vec!["/uploads/a.jpg".into(), "/uploads/b.jpg".into()]);
        assert!(staging.add_local((0..5).map(|i| file(&format!("{i}.jpg"))).collect()));
        assert_eq!(staging.len(), 5);
    }

    #[test]
    fn test_remove_takes_exactly_one_element_in_order() {
        let mut staging = PhotoStaging::default();
        assert!(staging.add_local(vec![file("a.jpg"), file("b.jpg"), file("c.jpg")]));

        staging.remove(1);
        assert_eq!(names(&staging), vec!["a.jpg", "c.jpg"]);

        staging.remove(7);
        assert_eq!(staging.len(), 2);
    }

    #[test]
    fn test_uploads_exclude_persisted_references() {
        let mut staging = PhotoStaging::from_persisted(vec!["/uploads/kept.jpg".into()]);
        // Removing nothing: a mixed sequence can only exist before a new add,
        // so build one directly
        staging.photos.push(StagedPhoto::Local {
            path: PathBuf::from("fresh.jpg"),
            bytes: vec![1, 2, 3],
        });

        let uploads = staging.uploads();
        assert_eq!(uploads.len(), 1);
        assert_eq!(uploads[0].0, "fresh.jpg");
        assert_eq!(uploads[0].1, vec![1, 2, 3]);
    }

    #[test]
    fn test_supported_photo_extensions() {
        assert!(is_supported_photo(Path::new("cat.JPG")));
        assert!(is_supported_photo(Path::new("cat.png")));
        assert!(!is_supported_photo(Path::new("cat.gif")));
        assert!(!is_supported_photo(Path::new("cat")));
    }
}
