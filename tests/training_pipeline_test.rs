use std::fs;
use std::path::Path;

use clap::Parser;
use tempfile::TempDir;
use ujaran::cli::{UjaranArgs, execute_command};
use ujaran::config::TrainingConfig;
use ujaran::dataset::Dataset;
use ujaran::error::UjaranError;
use ujaran::model::{ModelArtifact, Predictor, Trainer};

const NETRAL: [&str; 6] = [
    "saya suka makan nasi goreng",
    "hari ini cuaca cerah sekali",
    "kami pergi ke pasar pagi",
    "buku ini bagus untuk dibaca",
    "saya suka minum teh manis",
    "hari minggu kami bermain bola",
];
const RAS: [&str; 6] = [
    "dasar ras rendah tidak berguna",
    "ras mereka memang jahat",
    "usir ras itu dari sini",
    "ras kotor tidak pantas tinggal",
    "ras itu jahat dan kotor",
    "benci ras mereka selamanya",
];
const AGAMA: [&str; 6] = [
    "agama mereka sesat dan bodoh",
    "penganut agama itu kafir",
    "agama sesat harus dibubarkan",
    "bakar tempat ibadah agama itu",
    "agama mereka bodoh sekali",
    "kafir agama sesat semua",
];

fn write_dataset(dir: &Path) -> std::path::PathBuf {
    let mut lines = Vec::new();
    for (texts, class) in [(NETRAL, "Netral"), (RAS, "Ras"), (AGAMA, "Agama")] {
        for (i, text) in texts.iter().enumerate() {
            lines.push(format!("@user{i};{text};{class}"));
        }
    }
    // A duplicate and a row without a class are dropped on load
    lines.push("@dup;ras itu jahat dan kotor;Ras".to_string());
    lines.push("@none;tanpa kelas".to_string());

    let path = dir.join("data.csv");
    fs::write(&path, lines.join("\n") + "\n").unwrap();
    path
}

fn config() -> TrainingConfig {
    TrainingConfig {
        cv_folds: 3,
        ..Default::default()
    }
}

#[test]
fn test_csv_to_artifact_to_prediction() {
    let dir = TempDir::new().unwrap();
    let dataset = Dataset::from_csv_path(write_dataset(dir.path())).unwrap();
    assert_eq!(dataset.total_rows(), 20);
    assert_eq!(dataset.len(), 18);

    let trained = Trainer::new(config()).unwrap().train(&dataset).unwrap();
    let model_path = dir.path().join("model.json");
    trained.artifact().write_json(&model_path).unwrap();

    let artifact = ModelArtifact::read_json(&model_path).unwrap();
    assert_eq!(artifact.vocab, trained.artifact().vocab);
    assert_eq!(
        artifact.vectorizer.feature_names(),
        trained.artifact().vectorizer.feature_names()
    );
    assert_eq!(artifact.total_data, 20);
    assert_eq!(artifact.train_size + artifact.test_size, 18);
    assert_eq!(artifact.map_target["Agama"], 2);
    assert_eq!(artifact.reverse[&1], "Ras");

    let predictor = Predictor::load(&model_path).unwrap();
    let texts = ["agama itu sesat", "saya suka nasi goreng", "ras jahat dan kotor"];
    let loaded = predictor.predict_batch(&texts).unwrap();
    for (text, prediction) in texts.iter().zip(&loaded) {
        let live = trained.predict(text).unwrap();
        assert_eq!(prediction.label, live.label);
        for (label, p) in &live.proba {
            assert!((prediction.proba[label] - p).abs() < 1e-9);
        }
    }
    assert_eq!(loaded[0].label, "Agama");
    assert_eq!(loaded[2].label, "Ras");
}

#[test]
fn test_artifact_has_expected_keys() {
    let dir = TempDir::new().unwrap();
    let dataset = Dataset::from_csv_path(write_dataset(dir.path())).unwrap();
    let trained = Trainer::new(config()).unwrap().train(&dataset).unwrap();

    let json: serde_json::Value =
        serde_json::from_str(&trained.artifact().to_json_string(true).unwrap()).unwrap();
    for key in [
        "model",
        "vectorizer",
        "vocab",
        "word_freq",
        "map_target",
        "reverse",
        "training_accuracy",
        "testing_accuracy",
        "train_size",
        "test_size",
        "total_data",
        "train_ratio",
        "test_ratio",
        "alpha",
        "max_features",
        "training_metrics",
        "testing_metrics",
        "cv_metrics",
    ] {
        assert!(json.get(key).is_some(), "missing key {key}");
    }
    assert_eq!(json["train_ratio"], 0.8);
    assert_eq!(json["test_ratio"], 0.2);
}

#[test]
fn test_cli_train_then_predict() {
    let dir = TempDir::new().unwrap();
    let dataset = write_dataset(dir.path());
    let model = dir.path().join("out").join("model.json");
    fs::create_dir_all(model.parent().unwrap()).unwrap();

    let train = UjaranArgs::try_parse_from([
        "ujaran",
        "--format",
        "json",
        "train",
        dataset.to_str().unwrap(),
        "--output",
        model.to_str().unwrap(),
        "--folds",
        "3",
        "--timeout-secs",
        "600",
    ])
    .unwrap();
    execute_command(train).unwrap();
    assert!(model.exists());

    let predict = UjaranArgs::try_parse_from([
        "ujaran",
        "predict",
        model.to_str().unwrap(),
        "agama sesat",
    ])
    .unwrap();
    execute_command(predict).unwrap();

    let info = UjaranArgs::try_parse_from(["ujaran", "info", model.to_str().unwrap()]).unwrap();
    execute_command(info).unwrap();
}

#[test]
fn test_unknown_class_fails_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.csv");
    fs::write(&path, "u1;halo;Netral\nu2;apa;Politik\n").unwrap();
    assert!(matches!(
        Dataset::from_csv_path(&path),
        Err(UjaranError::Input(_))
    ));
}

#[test]
fn test_read_missing_artifact() {
    let dir = TempDir::new().unwrap();
    assert!(ModelArtifact::read_json(dir.path().join("missing.json")).is_err());
}
