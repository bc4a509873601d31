use std::collections::BTreeMap;

use langoverlay::sources::{MemoryBundleSource, MemoryOverrideStorage};
use langoverlay::{
    export, merge, serialize_edits, Bundle, EntityKind, MergedView, OverrideSet, OverrideStorage,
    Workbench,
};
use proptest::prelude::*;

fn key_strategy() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-z][a-z0-9_]{0,15}").expect("valid key regex")
}

fn value_strategy() -> impl Strategy<Value = String> {
    // Words joined by single spaces: no commas (the element delimiter), no
    // edge whitespace (the last serialized line is trimmed).
    proptest::string::string_regex("[A-Za-z0-9_!\\?\\.]{1,8}( [A-Za-z0-9_!\\?\\.]{1,8}){0,3}")
        .expect("valid value regex")
}

fn field_map_strategy() -> impl Strategy<Value = BTreeMap<String, String>> {
    prop::collection::btree_map(key_strategy(), value_strategy(), 1..8)
}

fn dataset_strategy() -> impl Strategy<Value = BTreeMap<String, Vec<String>>> {
    prop::collection::btree_map(
        key_strategy(),
        prop::collection::vec(value_strategy(), 1..4),
        1..8,
    )
}

fn build_view(kind: EntityKind, values: &BTreeMap<String, Vec<String>>) -> MergedView {
    let master = Bundle::from_pairs(values.iter().map(|(k, v)| (k.clone(), v.clone())));
    let records = merge(&master, None, &master, &OverrideSet::new(), kind.list_mode());
    MergedView {
        kind,
        locale: "fi".to_string(),
        fallback_locale: None,
        records,
    }
}

proptest! {
    #[test]
    fn serialized_edits_reparse_verbatim(fields in field_map_strategy()) {
        let keys: Vec<String> = fields.keys().cloned().collect();
        let text = serialize_edits(keys.iter().map(String::as_str), &fields);
        let parsed = OverrideSet::parse(&text);

        for (key, value) in &fields {
            let elements = parsed.get(key).expect("non-empty value survives");
            prop_assert_eq!(elements.join(", "), value.clone());
        }
    }

    #[test]
    fn export_pads_every_key_line(values in dataset_strategy()) {
        let view = build_view(EntityKind::MagicWords, &values);
        let text = export(&view).unwrap();

        for line in text.lines().filter(|l| l.starts_with('\t')) {
            let before_arrow = line.split("=>").next().unwrap();
            prop_assert!(before_arrow.len() > EntityKind::MagicWords.export_pad());
            let padding = &before_arrow[before_arrow.trim_end().len()..];
            prop_assert!(padding.chars().all(|c| c == ' '));
        }
    }

    #[test]
    fn export_is_idempotent(values in dataset_strategy()) {
        let view = build_view(EntityKind::SpecialPageAliases, &values);
        prop_assert_eq!(export(&view).unwrap(), export(&view).unwrap());
    }

    #[test]
    fn scalar_merge_never_blanks_on_empty_override(values in dataset_strategy()) {
        let target = Bundle::from_pairs(
            values.iter().map(|(k, v)| (k.clone(), vec![v[0].clone()])),
        );
        let mut overrides = OverrideSet::new();
        for key in values.keys() {
            overrides.insert(key.clone(), vec![String::new()]);
        }
        let records = merge(&target, None, &target, &overrides, false);
        for record in &records {
            prop_assert_eq!(&record.current, &record.target);
        }
    }

    #[test]
    fn list_merge_takes_override_exactly(values in dataset_strategy()) {
        let target = Bundle::from_pairs(values.iter().map(|(k, v)| (k.clone(), v.clone())));
        let mut overrides = OverrideSet::new();
        for key in values.keys() {
            overrides.insert(key.clone(), vec!["override".to_string()]);
        }
        let records = merge(&target, None, &target, &overrides, true);
        for record in &records {
            prop_assert_eq!(&record.current, &vec!["override".to_string()]);
        }
    }
}

#[test]
fn edit_save_reload_export_cycle() {
    let mut source = MemoryBundleSource::new();
    source.insert_bundle(
        "en",
        "specialPageAliases",
        Bundle::from_pairs([
            ("Allmessages", vec!["AllMessages".to_string()]),
            ("Listusers", vec!["ListUsers".to_string()]),
        ]),
    );
    let mut bench = Workbench::new(source, MemoryOverrideStorage::new());

    let mut fields = BTreeMap::new();
    fields.insert(
        "Allmessages".to_string(),
        "Kaikki viestit, Järjestelmäviestit".to_string(),
    );
    bench
        .apply_edits(EntityKind::SpecialPageAliases, "fi", &fields)
        .unwrap();

    let view = bench
        .merged_view(EntityKind::SpecialPageAliases, "fi")
        .unwrap();
    assert_eq!(
        view.find_record("Allmessages").unwrap().current,
        vec!["Kaikki viestit".to_string(), "Järjestelmäviestit".to_string()]
    );

    let text = bench
        .export_text(EntityKind::SpecialPageAliases, "fi")
        .unwrap();
    assert!(text.contains("array( 'Kaikki_viestit', 'Järjestelmäviestit' )"));
    assert!(!text.contains("Listusers"));
}

#[test]
fn namespace_export_uses_fixed_template() {
    let mut source = MemoryBundleSource::new();
    source.insert_bundle(
        "en",
        "namespaceNames",
        Bundle::from_pairs([
            ("0", vec!["Main".to_string()]),
            ("1", vec!["Talk".to_string()]),
        ]),
    );
    let mut storage = MemoryOverrideStorage::new();
    storage
        .write("sp-translate-data-Namespaces", "fi", "0=Main\n1=Keskustelu")
        .unwrap();
    let mut bench = Workbench::new(source, storage);

    let text = bench
        .export_text(EntityKind::NamespaceNames, "fi")
        .unwrap();
    assert!(text.contains("NS_MAIN           => 'Main',"));
    assert!(text.contains("NS_TALK           => 'Keskustelu',"));
    assert!(text.contains("# NS_PROJECT set by site configuration"));
    assert!(!text.starts_with("$namespaceNames = array(\n\t'"));
}
