use std::path::Path;

use walkdir::{DirEntry, WalkDir};

use crate::config::Config;
use crate::types::{DiscoveredFile, ErrorKind, ErrorRecord, ImageFile, ImageFormat};

/// Returns true if the path has one of the candidate image extensions
pub fn is_candidate(path: &Path) -> bool {
    ImageFormat::from_path(path).is_some()
}

/// Walk `root` recursively, yielding every regular file below it.
///
/// Symlinks are not followed and, like directories and devices, are skipped.
/// A directory that cannot be read produces one `Traversal` record and the
/// walk carries on with its siblings. Entries are visited in file-name order.
pub fn walk(
    root: &Path,
    config: &Config,
) -> impl Iterator<Item = Result<DiscoveredFile, ErrorRecord>> {
    let mut walker = WalkDir::new(root).follow_links(false).sort_by_file_name();
    if let Some(depth) = config.max_depth {
        walker = walker.max_depth(depth);
    }

    let root = root.to_path_buf();
    walker.into_iter().filter_map(move |entry| match entry {
        Ok(entry) if entry.file_type().is_file() => Some(discovered_file(entry)),
        Ok(_) => None,
        Err(e) => {
            let path = e.path().map(Path::to_path_buf).unwrap_or_else(|| root.clone());
            let message = match e.io_error() {
                Some(io) => io.to_string(),
                None => e.to_string(),
            };
            Some(Err(ErrorRecord::new(path, ErrorKind::Traversal, message)))
        }
    })
}

fn discovered_file(entry: DirEntry) -> Result<DiscoveredFile, ErrorRecord> {
    match entry.metadata() {
        Ok(metadata) => Ok(DiscoveredFile {
            size: metadata.len(),
            path: entry.into_path(),
        }),
        Err(e) => Err(ErrorRecord::new(
            entry.path(),
            ErrorKind::Traversal,
            e.to_string(),
        )),
    }
}

/// Keep a walked file only if the classifier accepts it
pub fn classify(file: DiscoveredFile) -> Option<ImageFile> {
    ImageFormat::from_path(&file.path).map(|format| ImageFile {
        path: file.path,
        size: file.size,
        format,
    })
}

/// Walk a single root and keep candidate images and traversal failures, in
/// discovery order
pub fn discover_in_directory(
    directory: &Path,
    config: &Config,
) -> Vec<Result<ImageFile, ErrorRecord>> {
    walk(directory, config)
        .filter_map(|item| match item {
            Ok(file) => classify(file).map(Ok),
            Err(record) => Some(Err(record)),
        })
        .collect()
}

/// Discover candidate images in the provided directories
pub fn discover_images<P: AsRef<Path>>(
    directories: &[P],
    config: &Config,
) -> (Vec<ImageFile>, Vec<ErrorRecord>) {
    let mut images = Vec::new();
    let mut errors = Vec::new();

    for directory in directories {
        for item in discover_in_directory(directory.as_ref(), config) {
            match item {
                Ok(image) => images.push(image),
                Err(record) => errors.push(record),
            }
        }
    }

    (images, errors)
}

// -- Tests --

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use std::io::Write;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn create_test_image(dir: &Path, name: &str, ext: &str) -> PathBuf {
        let file_path = dir.join(format!("{}.{}", name, ext));
        let mut file = File::create(&file_path).unwrap();
        // Write some dummy data to simulate an image
        file.write_all(b"DUMMY IMAGE DATA").unwrap();
        file_path
    }

    fn setup_test_directory() -> (tempfile::TempDir, Vec<PathBuf>) {
        let dir = tempdir().unwrap();

        let subdir_path = dir.path().join("subdir");
        fs::create_dir(&subdir_path).unwrap();

        let files = vec![
            create_test_image(dir.path(), "image1", "jpg"),
            create_test_image(dir.path(), "image2", "png"),
            create_test_image(dir.path(), "image3", "gif"),
            create_test_image(dir.path(), "image4", "jpeg"),
            create_test_image(&subdir_path, "subdir_image1", "jpg"),
            create_test_image(&subdir_path, "subdir_image2", "png"),
        ];

        // Files the classifier must ignore
        create_test_image(dir.path(), "document", "txt");
        create_test_image(dir.path(), "shouting", "JPG");
        create_test_image(dir.path(), "scan", "tiff");

        (dir, files)
    }

    #[test]
    fn test_is_candidate() {
        assert!(is_candidate(Path::new("test.jpg")));
        assert!(is_candidate(Path::new("test.jpeg")));
        assert!(is_candidate(Path::new("test.png")));
        assert!(is_candidate(Path::new("test.gif")));
        assert!(is_candidate(Path::new("/some/dir/archive.tar.png")));
        assert!(!is_candidate(Path::new("test.txt")));
        assert!(!is_candidate(Path::new("test")));
        assert!(!is_candidate(Path::new("test.JPG")));
        assert!(!is_candidate(Path::new("test.Png")));
        assert!(!is_candidate(Path::new(".png")));
    }

    #[test]
    fn test_walk_yields_all_regular_files() {
        let (dir, _) = setup_test_directory();

        let walked: Vec<DiscoveredFile> = walk(dir.path(), &Config::default())
            .map(|item| item.unwrap())
            .collect();

        // 6 images + 3 ignored files, directories excluded
        assert_eq!(walked.len(), 9);
        assert!(walked.iter().all(|file| file.path.is_file()));
        assert!(walked.iter().all(|file| file.size == 16));
    }

    #[test]
    fn test_walk_is_sorted_by_file_name() {
        let (dir, _) = setup_test_directory();

        let names: Vec<String> = walk(dir.path(), &Config {
            max_depth: Some(1),
            ..Default::default()
        })
        .map(|item| item.unwrap().path.file_name().unwrap().to_string_lossy().into_owned())
        .collect();

        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }

    #[test]
    fn test_discover_images_in_directory() {
        let (dir, files) = setup_test_directory();

        let (discovered, errors) = discover_images(&[dir.path()], &Config::default());

        assert!(errors.is_empty());
        assert_eq!(discovered.len(), 6);

        let discovered_paths: Vec<PathBuf> = discovered.iter().map(|f| f.path.clone()).collect();
        for file_path in &files {
            assert!(discovered_paths.contains(file_path));
        }

        assert!(!discovered_paths.contains(&dir.path().join("document.txt")));
        assert!(!discovered_paths.contains(&dir.path().join("shouting.JPG")));
    }

    #[test]
    fn test_discover_images_with_depth_limit() {
        let (dir, _) = setup_test_directory();

        // Depth 1 means only the files directly under the root
        let config = Config {
            max_depth: Some(1),
            ..Default::default()
        };

        let (discovered, _) = discover_images(&[dir.path()], &config);

        assert_eq!(discovered.len(), 4);
        for file in &discovered {
            assert_eq!(file.path.parent().unwrap(), dir.path());
        }
    }

    #[test]
    fn test_discover_images_nonexistent_directory() {
        let missing = Path::new("/path/that/does/not/exist");

        let items = discover_in_directory(missing, &Config::default());

        assert_eq!(items.len(), 1);
        let record = items[0].as_ref().unwrap_err();
        assert_eq!(record.kind, ErrorKind::Traversal);
        assert_eq!(record.path, missing);
    }

    #[test]
    fn test_discover_images_multiple_directories() {
        let (dir1, files1) = setup_test_directory();
        let (dir2, files2) = setup_test_directory();

        let directories = vec![dir1.path(), Path::new("/path/that/does/not/exist"), dir2.path()];
        let (discovered, errors) = discover_images(&directories, &Config::default());

        assert_eq!(errors.len(), 1);
        assert_eq!(discovered.len(), 12);

        // Roots are processed in argument order
        let discovered_paths: Vec<PathBuf> = discovered.iter().map(|f| f.path.clone()).collect();
        assert!(discovered_paths[..6].iter().all(|p| p.starts_with(dir1.path())));
        for file_path in files1.iter().chain(files2.iter()) {
            assert!(discovered_paths.contains(file_path));
        }
    }

    #[test]
    fn test_empty_directory_contributes_nothing() {
        let dir = tempdir().unwrap();
        let (discovered, errors) = discover_images(&[dir.path()], &Config::default());
        assert!(discovered.is_empty());
        assert!(errors.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinks_are_skipped() {
        let (dir, files) = setup_test_directory();
        std::os::unix::fs::symlink(&files[0], dir.path().join("link.jpg")).unwrap();

        let (discovered, errors) = discover_images(&[dir.path()], &Config::default());

        assert!(errors.is_empty());
        assert_eq!(discovered.len(), 6);
        assert!(!discovered
            .iter()
            .any(|file| file.path == dir.path().join("link.jpg")));
    }

    #[cfg(unix)]
    #[test]
    fn test_unreadable_subdirectory_is_recorded_and_siblings_walked() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempdir().unwrap();
        let locked = dir.path().join("locked");
        let open = dir.path().join("open");
        fs::create_dir(&locked).unwrap();
        fs::create_dir(&open).unwrap();
        create_test_image(&locked, "hidden", "png");
        let visible = create_test_image(&open, "visible", "png");

        fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();
        // Permission bits do not apply to root
        if fs::read_dir(&locked).is_ok() {
            fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let items = discover_in_directory(dir.path(), &Config::default());
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        let errors: Vec<&ErrorRecord> = items.iter().filter_map(|item| item.as_ref().err()).collect();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, ErrorKind::Traversal);
        assert_eq!(errors[0].path, locked);

        let images: Vec<&PathBuf> = items
            .iter()
            .filter_map(|item| item.as_ref().ok())
            .map(|image| &image.path)
            .collect();
        assert_eq!(images, vec![&visible]);
    }
}
