use script::Category;
use state_index::{
    CollisionPolicy, IndexError, build_index_from_dirs, list_category_files, load_index, save_index,
};
use std::fs;

#[test]
fn test_list_category_files() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = tempfile::tempdir()?;
    let root = temp_dir.path();

    fs::write(root.join("b_second.txt"), "")?;
    fs::write(root.join("a_first.txt"), "")?;
    fs::write(root.join("notes.md"), "")?;
    fs::create_dir(root.join("nested"))?;
    fs::write(root.join("nested").join("deep.txt"), "")?;

    let files = list_category_files(root)?;
    let names: Vec<_> = files
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, ["a_first.txt", "b_second.txt"]);

    Ok(())
}

#[test]
fn test_missing_directory() {
    let err = list_category_files(std::path::Path::new("/nonexistent/state_swap/pops")).unwrap_err();
    assert!(matches!(err, IndexError::MissingDirectory(_)));
}

#[test]
fn test_build_save_load() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = tempfile::tempdir()?;
    let root = temp_dir.path();
    let pops = root.join("pops");
    let buildings = root.join("buildings");
    fs::create_dir_all(&pops)?;
    fs::create_dir_all(&buildings)?;

    fs::write(
        pops.join("00_west_europe.txt"),
        "POPS = {\n    s:STATE_ILE_DE_FRANCE = {\n        region_state:FRA = { }\n    }\n}\n",
    )?;
    fs::write(
        buildings.join("00_west_europe.txt"),
        "BUILDINGS = {\n    s:STATE_ILE_DE_FRANCE = {\n        region_state:FRA = { }\n    }\n    s:STATE_BRITTANY = { }\n}\n",
    )?;
    // Not valid UTF-8: skipped, not fatal.
    fs::write(pops.join("01_broken.txt"), b"\xff\xfe\x00\x80")?;

    let build = build_index_from_dirs(
        &[(Category::Pops, pops.as_path()), (Category::Buildings, buildings.as_path())],
        CollisionPolicy::Overwrite,
    )?;
    assert_eq!(build.index.len(), 2);
    assert_eq!(build.unreadable.len(), 1);

    let index_path = root.join("data").join("state_index.json");
    save_index(&build.index, &index_path)?;
    let loaded = load_index(&index_path)?.expect("index was just written");
    assert_eq!(loaded, build.index);

    let entry = loaded.get(&"STATE_BRITTANY".parse::<script::StateId>()?).unwrap();
    assert_eq!(entry.get(Category::Pops), None);
    assert_eq!(entry.get(Category::Buildings), Some("00_west_europe.txt"));

    Ok(())
}

#[test]
fn test_load_missing_and_corrupt_index() -> Result<(), Box<dyn std::error::Error>> {
    let temp_dir = tempfile::tempdir()?;
    let index_path = temp_dir.path().join("state_index.json");

    assert!(load_index(&index_path)?.is_none());

    fs::write(&index_path, "{ not json")?;
    assert!(matches!(load_index(&index_path), Err(IndexError::Json(_))));

    Ok(())
}
