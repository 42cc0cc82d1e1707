use dirprops_core::{
    ATTRIBUTE_FLAGS, AttributeFlag, AttributeSet, AttributeTally, Entry, EntryError,
    EntryErrorKind, EnumerationOptions, FILE_KEY, PropertiesAccumulator, SIZE_KEY, TOTAL_KEY,
};

#[test]
fn test_entry_flags() {
    let entry = Entry::new(
        "/data/mnt",
        AttributeSet::from(AttributeFlag::Directory).with(AttributeFlag::ReparsePoint),
        0,
        1,
    );
    assert!(entry.is_directory());
    assert!(entry.is_reparse_point());

    let entry = Entry::new("/data/file", AttributeFlag::Archive.into(), 12, 2);
    assert!(!entry.is_directory());
    assert!(!entry.is_reparse_point());
}

#[test]
fn test_windows_attribute_word() {
    // FILE_ATTRIBUTE_HIDDEN | FILE_ATTRIBUTE_SYSTEM | FILE_ATTRIBUTE_ARCHIVE
    let set = AttributeSet::from_bits(0x2 | 0x4 | 0x20);
    let flags: Vec<_> = set.iter().collect();
    assert_eq!(
        flags,
        vec![AttributeFlag::Archive, AttributeFlag::Hidden, AttributeFlag::System]
    );
}

#[test]
fn test_properties_serialize_as_ordered_map() {
    let mut acc = PropertiesAccumulator::new(AttributeTally::default());
    acc.record(&Entry::new("/r/a", AttributeFlag::Archive.into(), 10, 1));
    acc.record(&Entry::new("/r/d", AttributeFlag::Directory.into(), 0, 1));
    acc.record_error();
    let props = acc.finish();

    let json = serde_json::to_value(&props).unwrap();
    let object = json.as_object().unwrap();

    assert_eq!(object.len(), ATTRIBUTE_FLAGS.len() + 3);
    assert_eq!(object["Archive"], 1);
    assert_eq!(object["Directory"], 1);
    assert_eq!(object[FILE_KEY], 1);
    assert_eq!(object[TOTAL_KEY], 2);
    assert_eq!(object[SIZE_KEY], 10);
    assert!(object.get("Error").is_none());

    let text = serde_json::to_string(&props).unwrap();
    assert!(text.starts_with(r#"{"Archive":1,"#));
    assert!(text.ends_with(r#""File":1,"Total":2,"Size":10}"#));
}

#[test]
fn test_invariant_over_mixed_entries() {
    let entries = [
        Entry::new("/r/1", AttributeFlag::Normal.into(), 1, 1),
        Entry::new("/r/2", AttributeFlag::ReparsePoint.into(), 0, 1),
        Entry::new(
            "/r/3",
            AttributeSet::from(AttributeFlag::Directory).with(AttributeFlag::ReadOnly),
            0,
            1,
        ),
        Entry::new(
            "/r/4",
            AttributeSet::from(AttributeFlag::Hidden).with(AttributeFlag::System),
            8,
            2,
        ),
    ];

    for tally in [AttributeTally::AbsorbIntoDirectory, AttributeTally::PerAttribute] {
        let mut acc = PropertiesAccumulator::new(tally);
        for entry in &entries {
            acc.record(entry);
        }
        let props = acc.finish();

        assert_eq!(props.total(), 4);
        assert_eq!(props.total_size(), 9);
        assert_eq!(
            props.file_count()
                + props.count(AttributeFlag::Directory) as i64
                + props.count(AttributeFlag::ReparsePoint) as i64,
            4
        );
    }
}

#[test]
fn test_options_from_json() {
    let options: EnumerationOptions = serde_json::from_str(
        r#"{"filter":"files_only","recursive":false,"skip_reparse_points":true}"#,
    )
    .unwrap();

    assert!(!options.recursive);
    assert!(options.skip_reparse_points);
    assert_eq!(options.effective_max_depth(), 1);
    assert_eq!(options.tally, AttributeTally::AbsorbIntoDirectory);
}

#[test]
fn test_entry_error_display() {
    let err = EntryError::read_error(None, "read_dir failed");
    assert_eq!(err.kind, EntryErrorKind::ReadError);
    assert_eq!(err.to_string(), "read_dir failed");
}
