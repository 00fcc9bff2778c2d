//! Integration tests for seamline-seam.

use approx::assert_relative_eq;
use geo::{Area, BooleanOps, BoundingRect, Coord};
use seamline_seam::{
    Footprint, GeoKernel, PolygonSegmenter, SeamlineConfig, SeamlineOrchestrator, SeamlineResult,
};

fn run(footprints: &[Footprint]) -> SeamlineResult {
    let config = SeamlineConfig::new().with_dist_min(0.1);
    SeamlineOrchestrator::new(config)
        .compute(footprints)
        .expect("seamline computation")
}

fn overlap_area(result: &SeamlineResult, i: usize, j: usize) -> f64 {
    result.segmented[i]
        .polygon
        .intersection(&result.segmented[j].polygon)
        .unsigned_area()
}

mod end_to_end {
    use super::*;

    fn squares() -> Vec<Footprint> {
        vec![
            Footprint::rectangle("A", 0.0, 0.0, 1.0, 1.0),
            Footprint::rectangle("B", 0.5, 0.0, 1.5, 1.0),
        ]
    }

    #[test]
    fn test_shared_edge_squares() {
        let result = run(&squares());

        assert_eq!(result.segmented.len(), 2);
        assert_eq!(result.cuts.len(), 1);
        assert_eq!(result.segmented[0].label, "A");
        assert_eq!(result.segmented[1].label, "B");

        let bounds = result.cuts[0].line.bounding_rect().unwrap();
        assert!(bounds.min().x >= 0.5 - 1e-6);
        assert!(bounds.max().x <= 1.0 + 1e-6);
        assert!(bounds.min().y >= -1e-6);
        assert!(bounds.max().y <= 1.0 + 1e-6);

        for seg in &result.segmented {
            assert!(seg.area() > 0.0);
            assert!(seg.area() <= 1.0 + 1e-9);
        }

        assert!(overlap_area(&result, 0, 1) < 1e-6);
        assert_relative_eq!(result.total_area(), 1.5, epsilon = 1e-6);
    }

    #[test]
    fn test_crossing_squares() {
        let footprints = vec![
            Footprint::rectangle("A", 0.0, 0.0, 2.0, 2.0),
            Footprint::rectangle("B", 1.0, 1.0, 3.0, 3.0),
        ];
        let result = run(&footprints);

        assert_eq!(result.cuts.len(), 1);
        let line = &result.cuts[0].line;
        assert_eq!(line.0.first(), Some(&Coord { x: 1.0, y: 2.0 }));
        assert_eq!(line.0.last(), Some(&Coord { x: 2.0, y: 1.0 }));

        for seg in &result.segmented {
            assert!(seg.area() > 3.0 && seg.area() < 4.0);
        }
        assert!(overlap_area(&result, 0, 1) < 1e-6);
        assert_relative_eq!(result.total_area(), 7.0, epsilon = 1e-6);
    }

    #[test]
    fn test_segmenting_twice_is_idempotent() {
        let result = run(&squares());
        let kernel = GeoKernel::new();
        let segmenter = PolygonSegmenter::new(&kernel);

        for seg in &result.segmented {
            let again = segmenter.segment(&seg.label, &seg.polygon, &result.cuts);
            assert_relative_eq!(again.area(), seg.area(), epsilon = 1e-6);
        }
    }
}

mod properties {
    use super::*;

    #[test]
    fn test_no_overlap_leaves_footprints_unchanged() {
        let footprints = vec![
            Footprint::rectangle("A", 0.0, 0.0, 1.0, 1.0),
            Footprint::rectangle("B", 3.0, 0.0, 4.0, 1.0),
        ];
        let result = run(&footprints);

        assert!(result.cuts.is_empty());
        assert_eq!(result.overlapping_pairs, 0);
        for (seg, fp) in result.segmented.iter().zip(&footprints) {
            assert_eq!(seg.polygon, fp.polygon);
            assert_eq!(seg.cuts_applied, 0);
        }
    }

    #[test]
    fn test_cut_symmetry() {
        let a = Footprint::rectangle("A", 0.0, 0.0, 2.0, 2.0);
        let b = Footprint::rectangle("B", 1.0, 1.0, 3.0, 3.0);

        let forward = run(&[a.clone(), b.clone()]);
        let backward = run(&[b, a]);

        let f = &forward.cuts[0].line.0;
        let mut r = backward.cuts[0].line.0.clone();
        if f.first() != r.first() {
            r.reverse();
        }
        assert_eq!(f.len(), r.len());
        for (p, q) in f.iter().zip(&r) {
            assert_relative_eq!(p.x, q.x, epsilon = 1e-9);
            assert_relative_eq!(p.y, q.y, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_monotone_area_with_three_footprints() {
        let footprints = vec![
            Footprint::rectangle("A", 0.0, 0.0, 1.0, 1.0),
            Footprint::rectangle("B", 0.5, 0.0, 1.5, 1.0),
            Footprint::rectangle("C", 1.0, 0.2, 2.0, 1.2),
        ];
        let result = run(&footprints);

        // (A, C) only touch along x = 1.
        assert_eq!(result.pairs_examined, 3);
        assert_eq!(result.cuts.len(), 2);
        for (seg, fp) in result.segmented.iter().zip(&footprints) {
            assert!(seg.area() > 0.0);
            assert!(seg.area() <= fp.area() + 1e-9);
        }
    }

    #[test]
    fn test_every_cut_has_a_line() {
        let footprints: Vec<Footprint> = (0..4)
            .map(|i| {
                let x = i as f64 * 0.7;
                Footprint::rectangle(format!("tile_{}", i), x, 0.0, x + 1.0, 1.0)
            })
            .collect();
        let result = run(&footprints);

        assert_eq!(result.cuts.len(), 3);
        for cut in &result.cuts {
            assert!(cut.line.0.len() >= 2);
            assert!(cut.first < cut.second);
        }
    }
}
