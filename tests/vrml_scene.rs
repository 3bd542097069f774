use tree_eval::prediction::PredictionSet;
use tree_eval::types::{PointKey, Precision};

// Layout as emitted by the segmentation, trailing spaces included.
const SEGMENTER_OUTPUT: &str = "#VRML V1.0 ascii\n\
\n\
Separator { \n\
  MaterialBinding { \n\
        value PER_VERTEX_INDEXED \n\
  }\n\
\n\
  Material { \n\
    diffuseColor [ \n\
      0 0 1,\n\
      0 0 1,\n\
      0 1 0,\n\
      0 1 0,\n\
       0 0 0 ]\n\
  } \n\
\n\
  Coordinate3 { \n\
    point [ \n\
      12.346000 -4.004000 0.994999,\n\
      0.000000 0.000000 0.000000,\n\
      12.346000 -4.004000 0.994999,\n\
      -0.004000 0.006000 100.125000,\n\
       0 0 0 ]\n\
}\n\
\n\
  PointSet { \n\
    startIndex 0 \n\
    numPoints 5\n\
  } \n\
} \n";

#[test]
fn segmenter_output_is_parsed() {
    let p = Precision::default();
    let set = PredictionSet::parse(SEGMENTER_OUTPUT, p).unwrap();
    let stats = set.stats();
    assert_eq!(stats.rows, 3);
    assert_eq!(stats.padding_rows, 1);
    assert_eq!(stats.duplicates, 1);
    assert_eq!(set.len(), 2);

    let mut keys: Vec<String> = set.keys().map(|k| k.display(p).to_string()).collect();
    keys.sort();
    assert_eq!(keys.len(), 2);
    assert_eq!(keys, vec!["0.00, 0.01, 100.12", "12.35, -4.00, 0.99"]);
    assert!(set.contains(&PointKey::quantize(-0.0, 0.01, 100.12, p).unwrap()));
}

#[test]
fn finer_precision_separates_nearby_points() {
    let scene = "Coordinate3 {\n  point [\n    3.001000 2.000000 1.000000,\n    3.004000 2.000000 1.000000,\n     0 0 0 ]\n}\n";
    let p2 = Precision::default();
    let p4 = Precision::new(4).unwrap();

    let coarse = PredictionSet::parse(scene, p2).unwrap();
    assert_eq!(coarse.len(), 1);
    assert_eq!(coarse.stats().duplicates, 1);

    let fine = PredictionSet::parse(scene, p4).unwrap();
    assert_eq!(fine.len(), 2);
    assert_eq!(fine.stats().duplicates, 0);
    assert!(fine.contains(&PointKey::quantize(3.001, 2.0, 1.0, p4).unwrap()));
    assert!(fine.contains(&PointKey::quantize(3.004, 2.0, 1.0, p4).unwrap()));
}
