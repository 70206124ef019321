//! Integration tests for the layout-tagger pipeline.

use std::fs;
use std::path::Path;

use layout_tagger::{build_template, run_template, TemplateArgs};
use layout_tagger_core::{DetectionDocument, Error, TaggerConfig};
use serde_json::{json, Value};
use tempfile::TempDir;

const DETECTIONS: &str = r#"{
  "pages": [
    {
      "page_number": 1,
      "width": 300.0,
      "height": 400.0,
      "regions": [
        { "box": [0.0, 0.0, 100.0, 50.0], "label": "Text", "score": 0.9 },
        { "box": [50.0, 10.0, 150.0, 60.0], "label": "Text", "score": 0.6 },
        { "box": [200.0, 200.0, 250.0, 250.0], "label": "Picture", "score": 0.8 },
        { "box": [300.0, 300.0, 320.0, 320.0], "label": "Title", "score": 0.1 }
      ]
    },
    {
      "page_number": 2,
      "width": 300.0,
      "height": 400.0,
      "regions": [
        { "box": [10.0, 10.0, 90.0, 30.0], "label": "List-item", "score": 0.95 }
      ]
    }
  ]
}"#;

fn write_input(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("detections.json");
    fs::write(&path, DETECTIONS).unwrap();
    path
}

fn args(input: &Path, output: &Path) -> TemplateArgs {
    TemplateArgs {
        input: input.to_path_buf(),
        output: output.to_path_buf(),
        zoom: None,
        threshold: None,
        config: None,
    }
}

#[test]
fn test_full_template_pipeline() {
    let dir = TempDir::new().unwrap();
    let input = write_input(dir.path());
    let output = dir.path().join("template.json");

    let summary = run_template(&args(&input, &output)).unwrap();
    assert_eq!(summary.pages, 2);
    assert_eq!(summary.regions, 5);
    assert_eq!(summary.accepted, 4);
    assert_eq!(summary.elements, 2);

    let written: Value = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    let pages = written["template"]["element_create"].as_array().unwrap();
    assert_eq!(pages.len(), 2);

    assert_eq!(
        pages[0],
        json!({
            "comment": "Page 1",
            "elements": [
                {
                    "bbox": ["-1.0", "374.0", "51.0", "401.0"],
                    "comment": "text 90%",
                    "flag": "no_join|no_split",
                    "text_flag": "no_new_line",
                    "type": "pde_text"
                },
                {
                    "bbox": ["99.0", "274.0", "126.0", "301.0"],
                    "comment": "picture 80%",
                    "flag": "no_join|no_split",
                    "type": "pde_image"
                }
            ],
            "query": {"$and": [{"$page_num": 1}]},
            "statement": "$if"
        })
    );

    // list items are classified but never written
    assert_eq!(pages[1]["comment"], "Page 2");
    assert_eq!(pages[1]["elements"], json!([]));

    let metadata = &written["metadata"];
    assert_eq!(metadata["author"], "Generated using Docling layout");
    assert_eq!(metadata["version"], "1");
    assert_eq!(metadata["created"], metadata["modified"]);
    assert!(metadata["notes"].as_str().unwrap().ends_with("with zoom: 2.0"));
}

#[test]
fn test_threshold_flag_drops_regions() {
    let dir = TempDir::new().unwrap();
    let input = write_input(dir.path());
    let output = dir.path().join("template.json");

    let mut template_args = args(&input, &output);
    template_args.threshold = Some(0.85);

    let summary = run_template(&template_args).unwrap();
    assert_eq!(summary.accepted, 2);
    assert_eq!(summary.elements, 1);
}

#[test]
fn test_score_equal_to_threshold_is_dropped() {
    let dir = TempDir::new().unwrap();
    let input = write_input(dir.path());
    let output = dir.path().join("template.json");

    let mut template_args = args(&input, &output);
    template_args.threshold = Some(0.8);

    // the 0.8 picture sits exactly on the threshold
    let summary = run_template(&template_args).unwrap();
    assert_eq!(summary.accepted, 2);
    assert_eq!(summary.elements, 1);
}

#[test]
fn test_config_file_is_applied() {
    let dir = TempDir::new().unwrap();
    let input = write_input(dir.path());
    let output = dir.path().join("template.json");
    let config_path = dir.path().join("config.yaml");
    fs::write(
        &config_path,
        "rendering:\n  zoom: 1.0\nresolution:\n  grouping: union_find\ntemplate:\n  bbox_offset: 0\n  author: Test Suite\n",
    )
    .unwrap();

    let mut template_args = args(&input, &output);
    template_args.config = Some(config_path);
    run_template(&template_args).unwrap();

    let written: Value = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(written["metadata"]["author"], "Test Suite");

    let first = &written["template"]["element_create"][0]["elements"][0];
    assert_eq!(first["bbox"], json!(["0.0", "350.0", "100.0", "400.0"]));
}

#[test]
fn test_rejects_non_json_paths() {
    let dir = TempDir::new().unwrap();
    let input = write_input(dir.path());

    let err = run_template(&args(&input, &dir.path().join("template.pdf"))).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<Error>(),
        Some(Error::UnsupportedInput { .. })
    ));
    assert!(!dir.path().join("template.pdf").exists());
}

#[test]
fn test_missing_input_reports_path() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing.json");

    let err = run_template(&args(&missing, &dir.path().join("out.json"))).unwrap_err();
    assert!(format!("{err:#}").contains("missing.json"));
}

#[test]
fn test_parallel_build_keeps_page_order() {
    let pages: Vec<Value> = (1..=40)
        .map(|n| {
            json!({
                "page_number": n,
                "width": 600.0,
                "height": 800.0,
                "regions": [{ "box": [10.0, 10.0, 50.0, 50.0], "label": "Text", "score": 0.9 }]
            })
        })
        .collect();
    let document: DetectionDocument =
        serde_json::from_value(json!({ "pages": pages })).unwrap();

    let (template, summary) = build_template(&document, &TaggerConfig::default()).unwrap();
    assert_eq!(summary.pages, 40);

    let numbers: Vec<Option<u32>> = template
        .template
        .element_create
        .iter()
        .map(|page| page.page_number())
        .collect();
    let expected: Vec<Option<u32>> = (1..=40).map(Some).collect();
    assert_eq!(numbers, expected);
}

#[test]
fn test_page_zero_is_an_error() {
    let document: DetectionDocument = serde_json::from_value(json!({
        "pages": [{ "page_number": 0, "width": 1.0, "height": 1.0 }]
    }))
    .unwrap();

    let err = build_template(&document, &TaggerConfig::default()).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<Error>(),
        Some(Error::InvalidPageNumber(0))
    ));
}
