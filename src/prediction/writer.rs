//! VRML V1.0 point-set export in the layout the segmentation emits.
//!
//! Each cluster gets one color from [`CLUSTER_PALETTE`] (cycled) so clusters
//! are distinguishable in a viewer. Both the color list and the point list
//! end with an extra black origin entry, `0 0 0 ]`, which is also the
//! terminator [`PointBlockScanner`](super::PointBlockScanner) looks for.

use std::io::{self, Write};

/// Per-cluster RGB colors, in assignment order.
pub const CLUSTER_PALETTE: [[u8; 3]; 6] = [
    [0, 0, 1],
    [0, 1, 0],
    [1, 0, 0],
    [1, 1, 0],
    [0, 1, 1],
    [1, 0, 1],
];

/// Write `clusters` as one VRML point set. Coordinates use six decimals.
pub fn write_point_set<W: Write>(out: &mut W, clusters: &[Vec<[f64; 3]>]) -> io::Result<()> {
    let total: usize = clusters.iter().map(Vec::len).sum();

    writeln!(out, "#VRML V1.0 ascii")?;
    writeln!(out)?;
    writeln!(out, "Separator {{")?;
    writeln!(out, "  MaterialBinding {{")?;
    writeln!(out, "        value PER_VERTEX_INDEXED")?;
    writeln!(out, "  }}")?;
    writeln!(out)?;
    writeln!(out, "  Material {{")?;
    writeln!(out, "    diffuseColor [")?;
    for (idx, cluster) in clusters.iter().enumerate() {
        let [r, g, b] = CLUSTER_PALETTE[idx % CLUSTER_PALETTE.len()];
        for _ in cluster {
            writeln!(out, "      {r} {g} {b},")?;
        }
    }
    writeln!(out, "       0 0 0 ]")?;
    writeln!(out, "  }}")?;
    writeln!(out)?;
    writeln!(out, "  Coordinate3 {{")?;
    writeln!(out, "    point [")?;
    for [x, y, z] in clusters.iter().flatten() {
        writeln!(out, "      {x:.6} {y:.6} {z:.6},")?;
    }
    writeln!(out, "       0 0 0 ]")?;
    writeln!(out, "  }}")?;
    writeln!(out)?;
    writeln!(out, "  PointSet {{")?;
    writeln!(out, "    startIndex 0")?;
    writeln!(out, "    numPoints {}", total + 1)?;
    writeln!(out, "  }}")?;
    writeln!(out, "}}")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prediction::PredictionSet;
    use crate::types::{PointKey, Precision};

    #[test]
    fn written_scene_parses_back() {
        let clusters = vec![
            vec![[1.234, 5.678, 9.012], [0.5, 0.5, 0.5]],
            vec![[-10.0, 4.25, 1.0]],
        ];
        let mut buf = Vec::new();
        write_point_set(&mut buf, &clusters).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert!(text.contains("      1.234000 5.678000 9.012000,\n"));
        assert!(text.contains("      0 1 0,\n"));
        assert!(text.contains("numPoints 4"));

        let set = PredictionSet::parse(&text, Precision::default()).unwrap();
        assert_eq!(set.len(), 3);
        assert!(set.contains(&PointKey { x: -1000, y: 425, z: 100 }));
    }

    #[test]
    fn empty_scene_still_has_a_closed_block() {
        let mut buf = Vec::new();
        write_point_set(&mut buf, &[]).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let set = PredictionSet::parse(&text, Precision::default()).unwrap();
        assert!(set.is_empty());
        assert!(text.contains("numPoints 1"));
    }
}
