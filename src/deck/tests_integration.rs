// End-to-end runs of the deck pipeline against temporary directories

#[cfg(test)]
mod integration_tests {
    use crate::deck::image::NamedFieldLocator;
    use crate::deck::import::{EntrySource, ImportError};
    use crate::deck::meta::{DeckTables, Suit};
    use crate::deck::pipeline::{run, run_with_locator, PipelineError, PipelineOptions, SkipReason};
    use crate::deck::png::fixtures::build_png_with_padding;
    use crate::deck::record::{Arcana, CardRecord};
    use crate::deck::verify::verify_catalog;
    use base64::prelude::BASE64_STANDARD;
    use base64::Engine;
    use serde_json::{json, Value};
    use std::fs;
    use std::io;
    use std::path::Path;
    use std::sync::{Arc, Mutex};

    use tempfile::TempDir;

    /// In-memory log sink shared with a test subscriber
    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl CapturedLogs {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    /// Run `f` with every tracing event written to the returned buffer
    fn with_captured_logs<T>(f: impl FnOnce() -> T) -> (T, String) {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_target(false)
            .without_time()
            .finish();
        let result = tracing::subscriber::with_default(subscriber, f);
        (result, logs.contents())
    }

    /// Options rooted in `root`, matching the built-in defaults otherwise
    fn options_in(root: &Path) -> PipelineOptions {
        PipelineOptions {
            input_file: root.join("deck_project.json"),
            image_dir: root.join("public").join("tarot"),
            catalog_file: root.join("src").join("data").join("minorArcana.json"),
            asset_root: "/tarot".to_string(),
            first_id: 22,
            payload_min_len: 1000,
            label_field: "meta".to_string(),
            description_field: "description".to_string(),
        }
    }

    fn write_input(options: &PipelineOptions, document: &Value) {
        fs::write(&options.input_file, serde_json::to_string(document).unwrap()).unwrap();
    }

    /// A valid PNG whose base64 form is exactly 5000 characters
    fn sample_png() -> (Vec<u8>, String) {
        let png = build_png_with_padding(3669, true);
        let encoded = BASE64_STANDARD.encode(&png);
        assert_eq!(encoded.len(), 5000);
        (png, encoded)
    }

    fn entry(label: &str) -> Value {
        let (_, encoded) = sample_png();
        json!({"meta": label, "description": format!("about {label}"), "img": encoded})
    }

    #[test]
    fn test_single_entry_end_to_end() {
        let temp_dir = TempDir::new().unwrap();
        let options = options_in(temp_dir.path());
        let (png, encoded) = sample_png();
        write_input(
            &options,
            &json!([{"meta": "权杖 | 四", "description": "desc", "img": encoded}]),
        );

        let report = run(&options).unwrap();

        assert_eq!(report.source, EntrySource::Document);
        assert_eq!(report.images_written, 1);
        assert!(report.images_missing.is_empty());

        let catalog: Value =
            serde_json::from_str(&fs::read_to_string(&options.catalog_file).unwrap()).unwrap();
        assert_eq!(
            catalog,
            json!([{
                "id": 22,
                "name": "Four of Wands",
                "name_cn": "权杖 | 四",
                "suit": "wands",
                "number": 3,
                "imgUrl": "/tarot/minor_wands_3.png",
                "description": "desc",
                "arcana": "Minor"
            }])
        );

        let image = fs::read(options.image_dir.join("minor_wands_3.png")).unwrap();
        assert_eq!(image, png);
    }

    #[test]
    fn test_entry_without_label_produces_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let options = options_in(temp_dir.path());
        let (_, encoded) = sample_png();
        write_input(&options, &json!([{"description": "desc", "img": encoded}]));

        let (report, logs) = with_captured_logs(|| run(&options));
        let report = report.unwrap();

        assert!(logs.contains("WARN"), "logs: {logs}");
        assert!(logs.contains("Skipping item 0: no 'meta' label"), "logs: {logs}");
        assert!(report.records.is_empty());
        assert_eq!(report.skipped, vec![(0, SkipReason::MissingLabel)]);
        assert_eq!(fs::read_dir(&options.image_dir).unwrap().count(), 0);
        assert_eq!(fs::read_to_string(&options.catalog_file).unwrap(), "[]\n");
    }

    #[test]
    fn test_items_wrapper_is_discovered() {
        let temp_dir = TempDir::new().unwrap();
        let options = options_in(temp_dir.path());
        write_input(
            &options,
            &json!({"version": 2, "items": [entry("圣杯 | 国王")]}),
        );

        let report = run(&options).unwrap();

        assert_eq!(report.source, EntrySource::Field("items".to_string()));
        assert_eq!(report.records.len(), 1);
        assert_eq!(report.records[0].name, "King of Cups");
    }

    #[test]
    fn test_ids_skip_nothing_for_rejected_entries() {
        let temp_dir = TempDir::new().unwrap();
        let options = options_in(temp_dir.path());
        write_input(
            &options,
            &json!([
                entry("大阿卡纳 | 愚者"),
                entry("权杖 | 一"),
                "not an object",
                entry("宝剑 | Eleven"),
                entry("星币 | 十"),
                {"meta": "圣杯 | 二 | extra"},
                entry("Swords | Page"),
            ]),
        );

        let report = run(&options).unwrap();

        let ids: Vec<u32> = report.records.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![22, 23, 24]);
        let names: Vec<&str> = report.records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Ace of Wands", "Ten of Pentacles", "Page of Swords"]);

        let skipped: Vec<usize> = report.skipped.iter().map(|(i, _)| *i).collect();
        assert_eq!(skipped, vec![0, 2, 3, 5]);
        assert!(matches!(report.skipped[1].1, SkipReason::NotAnObject("string")));
    }

    #[test]
    fn test_record_kept_when_image_missing() {
        let temp_dir = TempDir::new().unwrap();
        let options = options_in(temp_dir.path());
        write_input(
            &options,
            &json!([{"meta": "宝剑 | 七", "description": "short", "img": "tiny"}]),
        );

        let report = run(&options).unwrap();

        assert_eq!(report.records.len(), 1);
        assert_eq!(report.images_written, 0);
        assert_eq!(report.images_missing, vec!["宝剑 | 七".to_string()]);
        assert_eq!(report.records[0].image_url, "/tarot/minor_swords_6.png");
        assert!(!options.image_dir.join("minor_swords_6.png").exists());
    }

    #[test]
    fn test_rerun_is_byte_identical() {
        let temp_dir = TempDir::new().unwrap();
        let options = options_in(temp_dir.path());
        write_input(
            &options,
            &json!({"cards": [entry("权杖 | 四"), entry("圣杯 | 王后")]}),
        );

        run(&options).unwrap();
        let catalog_first = fs::read(&options.catalog_file).unwrap();
        let image_first = fs::read(options.image_dir.join("minor_cups_12.png")).unwrap();

        run(&options).unwrap();
        assert_eq!(fs::read(&options.catalog_file).unwrap(), catalog_first);
        assert_eq!(
            fs::read(options.image_dir.join("minor_cups_12.png")).unwrap(),
            image_first
        );
    }

    #[test]
    fn test_missing_input_is_fatal_and_writes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let options = options_in(temp_dir.path());

        let result = run(&options);

        assert!(matches!(
            result,
            Err(PipelineError::Import(ImportError::NotFound(_)))
        ));
        assert!(!options.catalog_file.exists());
        assert!(!options.image_dir.exists());
    }

    #[test]
    fn test_undiscoverable_entries_are_fatal() {
        let temp_dir = TempDir::new().unwrap();
        let options = options_in(temp_dir.path());
        write_input(&options, &json!({"name": "deck", "count": 78}));

        let result = run(&options);

        assert!(matches!(
            result,
            Err(PipelineError::Import(ImportError::NoEntries(_)))
        ));
        assert!(!options.catalog_file.exists());
    }

    #[test]
    fn test_full_minor_arcana_verifies() {
        let temp_dir = TempDir::new().unwrap();
        let options = options_in(temp_dir.path());
        let suits = ["权杖", "圣杯", "宝剑", "星币"];
        let ranks = [
            "一", "二", "三", "四", "五", "六", "七", "八", "九", "十", "侍从", "骑士", "王后", "国王",
        ];
        let mut entries = vec![entry("大阿卡纳 | 愚者")];
        for suit in suits {
            for rank in ranks {
                entries.push(entry(&format!("{suit} | {rank}")));
            }
        }
        write_input(&options, &Value::Array(entries));

        let report = run(&options).unwrap();

        assert_eq!(report.records.len(), 56);
        assert_eq!(report.images_written, 56);
        let catalog = crate::deck::catalog::load_catalog(&options.catalog_file).unwrap();
        assert!(verify_catalog(&catalog, 22, "/tarot", Some(&options.image_dir)).is_empty());
        assert_eq!(catalog[55].id, 77);
        assert_eq!(catalog[55].suit, Suit::Pentacles);
        assert_eq!(catalog[55].number, 13);
    }

    #[test]
    fn test_custom_locator_and_fields() {
        let temp_dir = TempDir::new().unwrap();
        let mut options = options_in(temp_dir.path());
        options.label_field = "label".to_string();
        options.description_field = "text".to_string();
        options.first_id = 100;
        let (png, encoded) = sample_png();
        write_input(
            &options,
            &json!([{
                "label": "Cups | Ace",
                "text": "x".repeat(2000),
                "picture": format!("data:image/png;base64,{encoded}"),
            }]),
        );

        let locator = NamedFieldLocator {
            field: "picture".to_string(),
        };
        let report = run_with_locator(&options, &DeckTables::bilingual(), &locator).unwrap();

        assert_eq!(
            report.records,
            vec![CardRecord {
                id: 100,
                name: "Ace of Cups".to_string(),
                localized_name: "Cups | Ace".to_string(),
                suit: Suit::Cups,
                number: 0,
                image_url: "/tarot/minor_cups_0.png".to_string(),
                description: "x".repeat(2000),
                arcana: Arcana::Minor,
            }]
        );
        assert_eq!(
            fs::read(options.image_dir.join("minor_cups_0.png")).unwrap(),
            png
        );
    }

    #[test]
    fn test_warnings_name_the_entry_without_prefix() {
        let temp_dir = TempDir::new().unwrap();
        let options = options_in(temp_dir.path());
        write_input(
            &options,
            &json!([
                entry("圣杯 | 十一"),
                {"meta": "宝剑 | 二", "description": "short"},
            ]),
        );

        let (report, logs) = with_captured_logs(|| run(&options));
        let report = report.unwrap();

        assert_eq!(report.records.len(), 1);
        assert!(logs.contains("Unknown rank 十一"), "logs: {logs}");
        assert!(logs.contains("No image found for 宝剑 | 二"), "logs: {logs}");
        assert!(!logs.contains("Warning:"), "logs: {logs}");
    }

    #[test]
    fn test_ids_stop_at_u32_max() {
        let temp_dir = TempDir::new().unwrap();
        let mut options = options_in(temp_dir.path());
        options.first_id = u32::MAX;

        write_input(&options, &json!([entry("权杖 | 一"), {"meta": "Ace"}]));
        let report = run(&options).unwrap();
        assert_eq!(report.records[0].id, u32::MAX);

        write_input(&options, &json!([entry("权杖 | 一"), entry("权杖 | 二")]));
        fs::remove_file(&options.catalog_file).unwrap();
        match run(&options) {
            Err(PipelineError::IdOverflow { first_id, assigned }) => {
                assert_eq!(first_id, u32::MAX);
                assert_eq!(assigned, 1);
            }
            other => panic!("expected IdOverflow, got {other:?}"),
        }
        assert!(!options.catalog_file.exists());
    }

    #[test]
    fn test_uncreatable_image_dir_is_fatal() {
        let temp_dir = TempDir::new().unwrap();
        let mut options = options_in(temp_dir.path());
        let blocker = temp_dir.path().join("public");
        fs::write(&blocker, b"not a directory").unwrap();
        options.image_dir = blocker.join("tarot");
        write_input(&options, &json!([entry("权杖 | 四")]));

        match run(&options) {
            Err(PipelineError::ImageDir { path, .. }) => assert_eq!(path, options.image_dir),
            other => panic!("expected ImageDir error, got {other:?}"),
        }
        assert!(!options.catalog_file.exists());
    }
}
