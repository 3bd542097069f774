use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;
use tree_eval::prediction::write_point_set;

/// Prediction/ground-truth file pair inside a temporary directory.
pub struct FilePair {
    pub dir: TempDir,
    pub prediction: PathBuf,
    pub ground_truth: PathBuf,
}

/// Writes `clusters` as a VRML scene and `rows` as a labeled point file.
///
/// Each row is `(x, y, z, class_id)`; coordinates are written with two
/// decimals and wrapped by a dummy confidence column on both sides of the
/// class id.
pub fn file_pair(clusters: &[Vec<[f64; 3]>], rows: &[(f64, f64, f64, i64)]) -> FilePair {
    let dir = TempDir::new().expect("temp dir");
    let prediction = dir.path().join("tree_test_final.wrl");
    let ground_truth = dir.path().join("oakland_parttest_conf.txt");

    let mut scene = Vec::new();
    write_point_set(&mut scene, clusters).expect("write scene");
    fs::write(&prediction, scene).expect("write prediction");

    fs::write(&ground_truth, ground_truth_text(rows)).expect("write ground truth");

    FilePair {
        dir,
        prediction,
        ground_truth,
    }
}

pub fn ground_truth_text(rows: &[(f64, f64, f64, i64)]) -> String {
    let mut text = String::from("# x y z confidence label confidence\n");
    for (x, y, z, class_id) in rows {
        text.push_str(&format!("{x:.2} {y:.2} {z:.2} 0.9 {class_id} 0.5\n"));
    }
    text
}
