// tests/clean_pipeline_tests.rs - end-to-end runs of the cleaning stage
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use reelprep::input_format::read_frame_from;
use reelprep::pipeline::schema::column_names;
use reelprep::{clean_movie_data, CleanError, CleaningPipeline, Metric, OutputFormat, PipelineConfig, Stage};

const RAW_HEADER: &[&str] = &[
    "id",
    "title",
    "original_title",
    "original_language",
    "status",
    "release_date",
    "budget",
    "revenue",
    "runtime",
    "vote_average",
    "vote_count",
    "popularity",
    "genres",
    "keywords",
    "production_companies",
    "production_countries",
    "spoken_languages",
    "crew",
    "cast",
    "tagline",
];

fn raw_rows() -> Vec<Vec<&'static str>> {
    vec![
        vec![
            "19995",
            "Avatar",
            "Avatar",
            "en",
            "Released",
            "2009-12-10",
            "237000000",
            "2787965087",
            "162",
            "7.2",
            "11800",
            "150.437577",
            r#"[{"id": 28, "name": "Action"}, {"id": 12, "name": "Adventure"}]"#,
            r#"[{"id": 1463, "name": "culture clash"}]"#,
            r#"[{"name": "Ingenious Film Partners", "id": 289}]"#,
            r#"[{"iso_3166_1": "US", "name": "United States of America"}]"#,
            r#"[{"iso_639_1": "en", "name": "English"}, {"iso_639_1": "es", "name": "Español"}]"#,
            r#"[{"job": "Editor", "name": "Stephen E. Rivkin"}, {"job": "Director", "name": "James Cameron"}]"#,
            r#"[{"name": "Sam Worthington"}, {"name": "Zoe Saldana"}, {"name": "Sigourney Weaver"}, {"name": "Stephen Lang"}]"#,
            "Enter the World of Pandora.",
        ],
        vec![
            "2", "Undated", "Undated", "en", "Rumored", "", "1000", "2000", "100", "5", "10", "1",
            "[]", "[]", "[]", "[]", "[]", "[]", "[]", "",
        ],
        vec![
            "3",
            "Le Petit Film",
            "Le Petit Film",
            "fr",
            "Released",
            "1995-06-01",
            "0",
            "50000",
            "85",
            "6.1",
            "12",
            "0.5",
            "[]",
            "",
            "{\"name\": \"not a list\"}",
            "[]",
            "[]",
            "not json",
            r#"[{"name": "Solo"}]"#,
            "",
        ],
    ]
}

fn write_raw(dir: &Path) -> PathBuf {
    let path = dir.join("movies_raw.csv");
    let mut writer = csv::Writer::from_path(&path).unwrap();
    writer.write_record(RAW_HEADER).unwrap();
    for row in raw_rows() {
        writer.write_record(&row).unwrap();
    }
    writer.flush().unwrap();
    path
}

fn read_output(path: &Path) -> (Vec<String>, Vec<HashMap<String, String>>) {
    let mut reader = csv::Reader::from_path(path).unwrap();
    let headers: Vec<String> = reader.headers().unwrap().iter().map(str::to_string).collect();
    let rows = reader
        .records()
        .map(|record| {
            let record = record.unwrap();
            headers
                .iter()
                .cloned()
                .zip(record.iter().map(str::to_string))
                .collect::<HashMap<String, String>>()
        })
        .collect();
    (headers, rows)
}

fn config_for(dir: &TempDir) -> PipelineConfig {
    PipelineConfig {
        input: write_raw(dir.path()),
        output: dir.path().join("results").join("movies_clean.csv"),
        ..PipelineConfig::default()
    }
}

#[test]
fn test_rows_with_unparseable_dates_are_dropped() {
    let dir = TempDir::new().unwrap();
    let config = config_for(&dir);
    let summary = clean_movie_data(&config).unwrap();

    assert_eq!(summary.rows_read, 3);
    assert_eq!(summary.columns, 45 + 9);
    assert_eq!(summary.rows_dropped, 1);
    assert_eq!(summary.rows_written, 2);

    let (_, rows) = read_output(&config.output);
    let ids: Vec<_> = rows.iter().map(|r| r["id"].as_str()).collect();
    assert_eq!(ids, vec!["19995", "3"]);
}

#[test]
fn test_column_order_is_schema_then_passthrough() {
    let dir = TempDir::new().unwrap();
    let config = config_for(&dir);
    CleaningPipeline::standard().run(&config).unwrap();

    let (headers, _) = read_output(&config.output);
    let schema = column_names();
    assert_eq!(&headers[..schema.len()], &schema[..]);
    assert_eq!(
        &headers[schema.len()..],
        &[
            "original_language",
            "genres",
            "keywords",
            "production_companies",
            "production_countries",
            "spoken_languages",
            "crew",
            "cast",
            "tagline",
        ][..]
    );
}

#[test]
fn test_fully_populated_row_features() {
    let dir = TempDir::new().unwrap();
    let config = config_for(&dir);
    CleaningPipeline::standard().run(&config).unwrap();

    let (_, rows) = read_output(&config.output);
    let avatar = &rows[0];
    println!("Avatar row: {:?}", avatar);

    assert_eq!(avatar["release_date"], "2009-12-10");
    assert_eq!(avatar["release_year"], "2009");
    assert_eq!(avatar["decade"], "2000s");
    assert_eq!(avatar["primary_genre"], "Action");
    assert_eq!(avatar["genre_count"], "2");
    assert_eq!(avatar["genres_list"], r#"["Action","Adventure"]"#);
    assert_eq!(avatar["top_keyword"], "culture clash");
    assert_eq!(avatar["director"], "James Cameron");
    assert_eq!(avatar["primary_company"], "Ingenious Film Partners");
    assert_eq!(avatar["top_cast"], r#"["Sam Worthington","Zoe Saldana","Sigourney Weaver"]"#);
    assert_eq!(avatar["lead_actor"], "Sam Worthington");
    assert_eq!(avatar["supporting_actor"], "Zoe Saldana");
    assert_eq!(avatar["ensemble_size"], "4");
    assert_eq!(avatar["primary_country"], "US");
    assert_eq!(avatar["spoken_languages_list"], r#"["en","es"]"#);
    assert_eq!(avatar["primary_language"], "en");
    assert_eq!(avatar["profit"], "2550965087");
    assert_eq!(avatar["budget_category"], "high");
    assert_eq!(avatar["budget_millions"], "237");
    assert_eq!(avatar["runtime_bucket"], "epic");
    assert_eq!(avatar["vote_count_bucket"], "blockbuster");
    assert_eq!(avatar["is_profitable"], "True");

    let roi: f64 = avatar["roi"].parse().unwrap();
    assert!((roi - 2550965087.0 / 237000000.0).abs() < 1e-9);
    let budget_log: f64 = avatar["budget_log"].parse().unwrap();
    assert!((budget_log - 237000001f64.ln()).abs() < 1e-9);
}

#[test]
fn test_zero_budget_row_keeps_profit_but_not_ratios() {
    let dir = TempDir::new().unwrap();
    let config = config_for(&dir);
    CleaningPipeline::standard().run(&config).unwrap();

    let (_, rows) = read_output(&config.output);
    let small = &rows[1];

    assert_eq!(small["roi"], "");
    assert_eq!(small["revenue_to_budget_ratio"], "");
    assert_eq!(small["profit"], "50000");
    assert_eq!(small["is_profitable"], "True");
    assert_eq!(small["budget"], "0");
    assert_eq!(small["budget_log"], "0");
    assert_eq!(small["budget_category"], "low");

    // Malformed and empty list fields degrade to defaults
    assert_eq!(small["genres_list"], "[]");
    assert_eq!(small["keywords_list"], "[]");
    assert_eq!(small["production_companies_list"], "[]");
    assert_eq!(small["primary_genre"], "Unknown");
    assert_eq!(small["top_keyword"], "None");
    assert_eq!(small["director"], "Unknown");
    assert_eq!(small["supporting_actor"], "Unknown");
    assert_eq!(small["primary_language"], "fr");
    assert_eq!(small["decade"], "1990s");
    assert_eq!(small["runtime_bucket"], "short");
    assert_eq!(small["vote_count_bucket"], "emerging");
}

#[test]
fn test_guarded_and_absent_stay_distinct_in_memory() {
    let data = "release_date,budget,revenue\n2001-01-01,0,10\n2001-01-01,,10\n";
    let frame = read_frame_from(data.as_bytes(), b',').unwrap();
    let (cleaned, _) = CleaningPipeline::standard().clean(frame);

    assert_eq!(cleaned.numeric("roi"), Some(&[Metric::Undefined, Metric::Absent][..]));
    // budget itself is imputed, the ratio is not
    assert_eq!(cleaned.numeric("budget"), Some(&[Metric::Known(0.0), Metric::Known(0.0)][..]));
    assert_eq!(
        cleaned.numeric("revenue_to_budget_ratio"),
        Some(&[Metric::Undefined, Metric::Absent][..])
    );
}

#[test]
fn test_rerun_on_cleaned_output_is_stable() {
    let dir = TempDir::new().unwrap();
    let config = config_for(&dir);
    CleaningPipeline::standard().run(&config).unwrap();
    let first = fs::read_to_string(&config.output).unwrap();

    let rerun = PipelineConfig {
        input: config.output.clone(),
        output: dir.path().join("rerun.csv"),
        ..PipelineConfig::default()
    };
    let summary = CleaningPipeline::standard().run(&rerun).unwrap();
    let second = fs::read_to_string(&rerun.output).unwrap();

    assert_eq!(summary.rows_dropped, 0);
    assert_eq!(first, second);
}

#[test]
fn test_missing_input_aborts_before_writing() {
    let dir = TempDir::new().unwrap();
    let config = PipelineConfig {
        input: dir.path().join("nope.csv"),
        output: dir.path().join("out.csv"),
        ..PipelineConfig::default()
    };
    let err = clean_movie_data(&config).unwrap_err();

    assert!(err.is_missing_input());
    assert!(matches!(err, CleanError::MissingInput { .. }));
    assert!(err.to_string().contains("nope.csv"));
    assert!(!config.output.exists());
}

#[test]
fn test_jsonl_output() {
    let dir = TempDir::new().unwrap();
    let config = PipelineConfig {
        output: dir.path().join("movies_clean.jsonl"),
        output_format: OutputFormat::Jsonl,
        ..config_for(&dir)
    };
    CleaningPipeline::standard().run(&config).unwrap();

    let text = fs::read_to_string(&config.output).unwrap();
    let records: Vec<serde_json::Value> = text
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(records.len(), 2);
    assert_eq!(records[1]["roi"], serde_json::Value::Null);
    assert_eq!(records[1]["is_profitable"], true);
    assert_eq!(records[0]["genres_list"], serde_json::json!(["Action", "Adventure"]));
}

#[test]
fn test_cleaned_output_satisfies_downstream_contracts() {
    let dir = TempDir::new().unwrap();
    let config = config_for(&dir);
    CleaningPipeline::standard().run(&config).unwrap();

    for stage in [Stage::Genres, Stage::Financials, Stage::Model] {
        stage.check_artifact(&config.output, b',').unwrap();
    }

    let err = Stage::Model.check_artifact(&config.input, b',').unwrap_err();
    match err {
        CleanError::MissingColumns { columns, .. } => {
            assert!(columns.contains(&"budget_log".to_string()));
            assert!(!columns.contains(&"runtime".to_string()));
        }
        other => panic!("Expected MissingColumns, got: {:?}", other),
    }
}
