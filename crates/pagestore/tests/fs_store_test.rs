use chrono::{Duration, Utc};
use pagestore::{FileSystemStore, Page, PageProvider, StoreConfig, StoreError, Version};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn setup() -> (TempDir, PathBuf, FileSystemStore, FileSystemStore) {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("pages");
    let latin1 = FileSystemStore::open(&StoreConfig::new(&dir)).unwrap();
    let utf8 = FileSystemStore::open(&StoreConfig::new(&dir).with_encoding("UTF-8")).unwrap();
    (temp, dir, latin1, utf8)
}

fn read_latin1(path: &std::path::Path) -> String {
    fs::read(path).unwrap().into_iter().map(char::from).collect()
}

#[test]
fn test_scandinavian_letters() {
    let (_temp, dir, store, _) = setup();

    store
        .put(&Page::new("\u{c5}\u{e4}Test").with_content("test"))
        .unwrap();

    let file = dir.join("%C5%E4Test.txt");
    assert!(file.exists(), "No such file");
    assert_eq!(read_latin1(&file), "test");
}

#[test]
fn test_scandinavian_letters_utf8() {
    let (_temp, dir, _, store) = setup();

    store
        .put(&Page::new("\u{c5}\u{e4}Test").with_content("test\u{d6}"))
        .unwrap();

    let file = dir.join("%C3%85%C3%A4Test.txt");
    assert!(file.exists(), "No such file");
    assert_eq!(fs::read_to_string(&file).unwrap(), "test\u{d6}");
}

#[test]
fn test_latin1_content_bytes() {
    let (_temp, dir, store, _) = setup();

    store
        .put(&Page::new("Bytes").with_content("\u{d6}l"))
        .unwrap();

    assert_eq!(fs::read(dir.join("Bytes.txt")).unwrap(), vec![0xD6, b'l']);
}

#[test]
fn test_slashes_in_page_names() {
    let (_temp, dir, latin1, utf8) = setup();

    for store in [&latin1, &utf8] {
        store
            .put(&Page::new("Test/Foobar").with_content("test"))
            .unwrap();

        let file = dir.join("Test%2FFoobar.txt");
        assert!(file.exists(), "No such file");
        assert_eq!(fs::read_to_string(&file).unwrap(), "test");
        assert!(!dir.join("Test").exists());
        store.delete("Test/Foobar").unwrap();
    }
}

#[test]
fn test_dots_in_beginning() {
    let (_temp, dir, store, _) = setup();

    store.put(&Page::new(".Test").with_content("test")).unwrap();

    let file = dir.join("%2ETest.txt");
    assert!(file.exists(), "No such file");
    assert!(!dir.join(".Test.txt").exists());
    assert_eq!(read_latin1(&file), "test");
}

#[test]
fn test_ascii_names_are_identity() {
    let (_temp, dir, store, _) = setup();

    for name in ["Main", "RecentChanges", "page-2_old", "v1.0"] {
        store.put(&Page::new(name).with_content("x")).unwrap();
        assert!(dir.join(format!("{}.txt", name)).exists(), "{}", name);
    }
}

#[test]
fn test_author() {
    let (_temp, dir, store, _) = setup();

    store
        .put(
            &Page::new("\u{c5}\u{e4}Test")
                .with_content("test")
                .with_author("Min\u{e4}"),
        )
        .unwrap();

    let page = store.get("\u{c5}\u{e4}Test", Version::Exact(1)).unwrap();
    assert_eq!(page.author.as_deref(), Some("Min\u{e4}"));
    assert!(dir.join("%C5%E4Test.properties").exists());
}

#[test]
fn test_round_trip_content() {
    let (_temp, _dir, latin1, utf8) = setup();

    let text = "First line\r\n\nSecond \u{e9}t\u{e9}\n\ttabbed\n";
    latin1.put(&Page::new("RoundTrip").with_content(text)).unwrap();
    assert_eq!(latin1.get("RoundTrip", Version::Latest).unwrap().content, text);

    let text = "\u{65e5}\u{672c}\u{8a9e} \u{1f600}";
    utf8.put(&Page::new("RoundTrip2").with_content(text)).unwrap();
    assert_eq!(utf8.get("RoundTrip2", Version::Latest).unwrap().content, text);
}

#[test]
fn test_custom_properties() {
    let (_temp, dir, store, _) = setup();
    let file = dir.join("CustomPropertiesTest.txt");
    assert!(!file.exists());

    let page = Page::new("CustomPropertiesTest")
        .with_content("This page has custom properties")
        .with_author("TestAuthor")
        .with_attribute("@test", "Save Me")
        .with_attribute("@test2", "Save You")
        .with_attribute("test3", "Do not save");
    store.put(&page).unwrap();
    assert!(file.exists(), "No such file");

    let retrieved = store.get("CustomPropertiesTest", Version::Latest).unwrap();
    assert_eq!(retrieved.attribute("@test"), Some("Save Me"));
    assert_eq!(retrieved.attribute("@test2"), Some("Save You"));
    assert_eq!(retrieved.attribute("test3"), None);
    assert_eq!(retrieved.attributes.len(), 2);
    assert_eq!(retrieved.author.as_deref(), Some("TestAuthor"));

    let sidecar = fs::read_to_string(dir.join("CustomPropertiesTest.properties")).unwrap();
    assert!(!sidecar.contains("test3"));
}

#[test]
fn test_no_sidecar_without_metadata() {
    let (_temp, dir, store, _) = setup();

    store
        .put(
            &Page::new("Plain")
                .with_content("x")
                .with_attribute("transient", "y"),
        )
        .unwrap();

    assert!(dir.join("Plain.txt").exists());
    assert!(!dir.join("Plain.properties").exists());

    let page = store.get("Plain", Version::Latest).unwrap();
    assert_eq!(page.author, None);
    assert!(page.attributes.is_empty());
}

#[test]
fn test_put_without_metadata_keeps_existing_sidecar() {
    let (_temp, dir, store, _) = setup();

    store
        .put(&Page::new("Keep").with_content("v1").with_author("Alice"))
        .unwrap();
    store.put(&Page::new("Keep").with_content("v2")).unwrap();

    let page = store.get("Keep", Version::Latest).unwrap();
    assert_eq!(page.content, "v2");
    assert_eq!(page.author.as_deref(), Some("Alice"));
    assert!(dir.join("Keep.properties").exists());
}

#[test]
fn test_put_with_metadata_overwrites_sidecar() {
    let (_temp, _dir, store, _) = setup();

    store
        .put(
            &Page::new("Over")
                .with_author("Alice")
                .with_attribute("@old", "1"),
        )
        .unwrap();
    store
        .put(&Page::new("Over").with_attribute("@new", "2"))
        .unwrap();

    let page = store.get("Over", Version::Latest).unwrap();
    assert_eq!(page.author, None);
    assert_eq!(page.attribute("@old"), None);
    assert_eq!(page.attribute("@new"), Some("2"));
}

#[test]
fn test_get_missing_page() {
    let (_temp, _dir, store, _) = setup();

    let err = store.get("Nope", Version::Latest).unwrap_err();
    assert!(matches!(err, StoreError::PageNotFound(name) if name == "Nope"));
}

#[test]
fn test_any_version_returns_current() {
    let (_temp, _dir, store, _) = setup();
    store.put(&Page::new("V").with_content("v1")).unwrap();
    store.put(&Page::new("V").with_content("v2")).unwrap();

    for version in [Version::Latest, Version::Exact(1), Version::Exact(42)] {
        let page = store.get("V", version).unwrap();
        assert_eq!(page.content, "v2");
        assert_eq!(page.version, Version::Latest);
    }
}

#[test]
fn test_sidecar_alone_does_not_make_a_page() {
    let (_temp, dir, store, _) = setup();
    fs::write(dir.join("Orphan.properties"), "author=Nobody\n").unwrap();

    assert!(!store.exists("Orphan").unwrap());
    assert!(matches!(
        store.get("Orphan", Version::Latest),
        Err(StoreError::PageNotFound(_))
    ));
}

#[test]
fn test_corrupt_sidecar_does_not_block_content() {
    let (_temp, dir, store, _) = setup();
    store
        .put(&Page::new("Corrupt").with_content("still here"))
        .unwrap();
    fs::write(
        dir.join("Corrupt.properties"),
        "garbage without separator\n@bad=\\uZZZZ\nauthor=Bob\n",
    )
    .unwrap();

    let page = store.get("Corrupt", Version::Latest).unwrap();
    assert_eq!(page.content, "still here");
    assert_eq!(page.author.as_deref(), Some("Bob"));
    assert!(page.attributes.is_empty());
}

#[test]
fn test_delete() {
    let (_temp, dir, store, _) = setup();

    store
        .put(&Page::new("Test").with_content("v1").with_author("AnonymousCoward"))
        .unwrap();
    assert!(dir.join("Test.txt").exists(), "file does not exist");
    assert!(
        dir.join("Test.properties").exists(),
        "property file does not exist"
    );

    store.delete("Test").unwrap();

    assert!(!dir.join("Test.txt").exists(), "file exists");
    assert!(!dir.join("Test.properties").exists(), "properties exist");
    assert!(!store.exists("Test").unwrap());
}

#[test]
fn test_delete_missing_page_is_noop() {
    let (_temp, dir, store, _) = setup();

    store.delete("NeverExisted").unwrap();
    store.delete("NeverExisted").unwrap();

    assert_eq!(fs::read_dir(&dir).unwrap().count(), 0);
}

#[test]
fn test_exists() {
    let (_temp, _dir, store, _) = setup();
    assert!(!store.exists("Main").unwrap());
    store.put(&Page::new("Main")).unwrap();
    assert!(store.exists("Main").unwrap());
}

#[test]
fn test_encodings_do_not_interoperate() {
    let (_temp, _dir, latin1, utf8) = setup();

    latin1
        .put(&Page::new("\u{c5}\u{e4}Test").with_content("latin"))
        .unwrap();

    // Same logical name maps to a different file under UTF-8
    assert!(!utf8.exists("\u{c5}\u{e4}Test").unwrap());
    assert_ne!(
        latin1.content_path("\u{c5}\u{e4}Test").unwrap(),
        utf8.content_path("\u{c5}\u{e4}Test").unwrap()
    );

    // The Latin-1 filename is not valid UTF-8 once unescaped, so it is skipped
    assert!(utf8.list().unwrap().is_empty());
}

#[test]
fn test_non_existent_directory() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("non-existant-directory");

    FileSystemStore::open(&StoreConfig::new(&dir)).unwrap();

    assert!(dir.exists(), "didn't create it");
    assert!(dir.is_dir(), "isn't a dir");
    assert_eq!(fs::read_dir(&dir).unwrap().count(), 0);
}

#[test]
fn test_directory_is_file() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("foobar");
    fs::write(&file, "content does not matter").unwrap();

    let result = FileSystemStore::open(&StoreConfig::new(&file));

    assert!(
        matches!(result, Err(StoreError::Configuration(_))),
        "Store did not warn about wrong page directory"
    );
    assert!(file.is_file());
    assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 1);
}

#[test]
fn test_list_and_count() {
    let (_temp, dir, store, _) = setup();

    store.put(&Page::new("Zeta").with_content("z")).unwrap();
    store
        .put(&Page::new("Test/Foobar").with_content("12").with_author("A"))
        .unwrap();
    store.put(&Page::new("\u{c5}\u{e4}Test")).unwrap();

    // Foreign files are ignored
    fs::write(dir.join("notes.md"), "ignored").unwrap();
    fs::write(dir.join("Bad%Z1.txt"), "ignored").unwrap();
    fs::create_dir(dir.join("subdir.txt")).unwrap();

    let pages = store.list().unwrap();
    let names: Vec<&str> = pages.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Test/Foobar", "Zeta", "\u{c5}\u{e4}Test"]);
    assert_eq!(store.count().unwrap(), 3);

    let foobar = &pages[0];
    assert_eq!(foobar.author.as_deref(), Some("A"));
    assert_eq!(foobar.size, Some(2));
    assert!(foobar.content.is_empty());
}

#[test]
fn test_changed_since() {
    let (_temp, _dir, store, _) = setup();
    store.put(&Page::new("Recent")).unwrap();

    let hour_ago = Utc::now() - Duration::hours(1);
    let in_an_hour = Utc::now() + Duration::hours(1);

    assert_eq!(store.changed_since(hour_ago).unwrap().len(), 1);
    assert!(store.changed_since(in_an_hour).unwrap().is_empty());
}

#[test]
fn test_rename_moves_both_files() {
    let (_temp, dir, store, _) = setup();
    store
        .put(
            &Page::new("Old")
                .with_content("body")
                .with_author("Alice")
                .with_attribute("@k", "v"),
        )
        .unwrap();

    store.rename("Old", "New/Name").unwrap();

    assert!(!dir.join("Old.txt").exists());
    assert!(!dir.join("Old.properties").exists());
    assert!(dir.join("New%2FName.txt").exists());
    assert!(dir.join("New%2FName.properties").exists());

    let page = store.get("New/Name", Version::Latest).unwrap();
    assert_eq!(page.content, "body");
    assert_eq!(page.author.as_deref(), Some("Alice"));
    assert_eq!(page.attribute("@k"), Some("v"));
}

#[test]
fn test_rename_errors() {
    let (_temp, _dir, store, _) = setup();
    store.put(&Page::new("A")).unwrap();
    store.put(&Page::new("B")).unwrap();

    assert!(matches!(
        store.rename("Missing", "C"),
        Err(StoreError::PageNotFound(_))
    ));
    assert!(matches!(
        store.rename("A", "B"),
        Err(StoreError::PageExists(_))
    ));
    assert!(store.exists("A").unwrap());
}

#[test]
fn test_attribute_limits_reject_put() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("pages");
    let mut config = StoreConfig::new(&dir);
    config.max_attribute_value_len = 4;
    let store = FileSystemStore::open(&config).unwrap();

    let err = store
        .put(&Page::new("Big").with_attribute("@long", "12345"))
        .unwrap_err();

    assert!(matches!(err, StoreError::AttributeLimit(_)));
    assert!(!dir.join("Big.txt").exists());
    assert!(!dir.join("Big.properties").exists());
}

#[test]
fn test_custom_extension() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("pages");
    let store = FileSystemStore::open(&StoreConfig::new(&dir).with_file_ext("wiki")).unwrap();

    store
        .put(&Page::new("Main").with_content("x").with_author("A"))
        .unwrap();

    assert!(dir.join("Main.wiki").exists());
    assert!(dir.join("Main.properties").exists());
    assert_eq!(store.list().unwrap().len(), 1);
}

#[test]
fn test_removed_root_surfaces_io_error() {
    let (_temp, dir, store, _) = setup();
    fs::remove_dir(&dir).unwrap();

    let err = store.put(&Page::new("Main").with_content("x")).unwrap_err();
    assert!(matches!(err, StoreError::Io(_)));
}

#[test]
fn test_list_skips_non_canonical_filenames() {
    let (_temp, dir, store, _) = setup();
    store.put(&Page::new("A").with_content("real")).unwrap();

    // Hand-made files that decode to a name but are not its canonical spelling
    fs::write(dir.join("%41.txt"), "escaped A").unwrap();
    fs::write(dir.join("my page.txt"), "raw space").unwrap();
    fs::write(dir.join("a%2fb.txt"), "lowercase hex").unwrap();

    let pages = store.list().unwrap();
    let names: Vec<&str> = pages.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["A"]);
    assert_eq!(store.count().unwrap(), 1);

    // Every listed page is readable
    for page in &pages {
        assert!(store.get(&page.name, Version::Latest).is_ok());
    }
}

#[test]
fn test_extension_ending_in_properties_is_rejected() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("pages");

    let result = FileSystemStore::open(&StoreConfig::new(&dir).with_file_ext(".x.properties"));

    assert!(matches!(result, Err(StoreError::Configuration(_))));
    assert!(!dir.exists());
}

#[test]
fn test_empty_name_writes_no_hidden_files() {
    let (_temp, dir, store, _) = setup();

    let err = store
        .put(&Page::new("").with_content("x").with_author("A"))
        .unwrap_err();

    assert!(matches!(err, StoreError::Format(_)));
    assert!(!dir.join(".txt").exists());
    assert!(!dir.join(".properties").exists());
    assert!(store.list().unwrap().is_empty());
}
