use std::fs;

use drainpool::{inputs, Result};
use tempfile::TempDir;

#[test]
fn split_skips_empty_pieces() {
    assert_eq!(inputs::split("a.jpg,,b.jpg, c.jpg,", ','), ["a.jpg", "b.jpg", "c.jpg"]);
    assert!(inputs::split("", ',').is_empty());
}

#[test]
fn repeat_concatenates_copies() {
    let items = inputs::split("a,b", ',');
    assert_eq!(inputs::repeat(&items, 3), ["a", "b", "a", "b", "a", "b"]);
    assert!(inputs::repeat(&items, 0).is_empty());
}

#[test]
fn list_dir_filters_and_sorts() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let nested = temp_dir.path().join("nested");
    fs::create_dir(&nested)?;
    fs::write(temp_dir.path().join("b.JPG"), b"")?;
    fs::write(temp_dir.path().join("a.jpg"), b"")?;
    fs::write(temp_dir.path().join("notes.txt"), b"")?;
    fs::write(nested.join("c.png"), b"")?;

    let images = inputs::list_dir(temp_dir.path(), &[".jpg".to_owned(), "png".to_owned()])?;
    let names: Vec<_> = images
        .iter()
        .map(|p| p.rsplit(['/', '\\']).next().unwrap_or_default())
        .collect();
    assert_eq!(names, ["a.jpg", "b.JPG", "c.png"]);

    let all = inputs::list_dir(temp_dir.path(), &[])?;
    assert_eq!(all.len(), 4);
    Ok(())
}

#[test]
fn list_dir_missing_directory_fails() {
    let temp_dir = TempDir::new().unwrap();
    assert!(inputs::list_dir(temp_dir.path().join("missing"), &[]).is_err());
}
