use pcbgeom_core::math::{ki_round, norm, to_f64};
use pcbgeom_core::prelude::*;
use proptest::prelude::*;

fn start_on_circle(center: Point2I, radius: i32, angle: f64) -> Point2I {
    let a = angle.to_radians();
    Point2I::new(
        center.x + ki_round(radius as f64 * a.cos()),
        center.y + ki_round(radius as f64 * a.sin()),
    )
}

fn radial_deviation(p: &Point2I, center: &Point2I, radius: f64) -> f64 {
    (norm(&(*p - *center)) - radius).abs()
}

prop_compose! {
    fn arbitrary_arc()(
        cx in -1_000_000i32..1_000_000,
        cy in -1_000_000i32..1_000_000,
        radius in 10_000i32..1_000_000,
        start_angle in 0.0f64..360.0,
        sweep in 20.0f64..340.0,
        ccw in any::<bool>(),
    ) -> (Arc, f64) {
        let center = Point2I::new(cx, cy);
        let start = start_on_circle(center, radius, start_angle);
        let angle = if ccw { sweep } else { -sweep };
        (Arc::from_center(center, start, angle, 0), angle)
    }
}

proptest! {
    #[test]
    fn center_is_equidistant((arc, _) in arbitrary_arc()) {
        let center = arc.center();
        let r_start = norm(&(arc.start() - center));
        let r_mid = norm(&(arc.mid() - center));
        let r_end = norm(&(arc.end() - center));

        prop_assert!((r_start - r_mid).abs() <= 3.0);
        prop_assert!((r_start - r_end).abs() <= 3.0);
    }

    #[test]
    fn reversing_twice_is_identity((arc, _) in arbitrary_arc()) {
        prop_assert_eq!(arc.reversed().reversed(), arc);
    }

    #[test]
    fn reversing_negates_central_angle((arc, _) in arbitrary_arc()) {
        let rev = arc.reversed();
        prop_assert!((rev.central_angle() + arc.central_angle()).abs() <= 0.5);
        prop_assert_eq!(rev.start(), arc.end());
        prop_assert_eq!(rev.end(), arc.start());
    }

    #[test]
    fn from_center_keeps_requested_angle((arc, angle) in arbitrary_arc()) {
        prop_assert!((arc.central_angle() - angle).abs() <= 0.5);
        prop_assert_eq!(arc.is_clockwise(), angle < 0.0);
    }

    #[test]
    fn polyline_stays_within_accuracy(
        (arc, _) in arbitrary_arc(),
        accuracy in 10i32..1_000,
    ) {
        let approx = arc.to_polyline(accuracy);
        let chain = &approx.chain;

        prop_assert_eq!(chain.first(), Some(&arc.start()));
        prop_assert_eq!(chain.last(), Some(&arc.end()));
        prop_assert!(chain.point_count() >= 2);

        let center = arc.center();
        let radius = arc.radius();
        let tolerance = accuracy as f64 + 2.0;

        for p in chain.points() {
            prop_assert!(radial_deviation(p, &center, radius) <= tolerance);
        }

        for seg in chain.segments() {
            let m = to_f64(&seg.a) + (to_f64(&seg.b) - to_f64(&seg.a)) / 2.0;
            let d = (m - to_f64(&center)).norm();
            prop_assert!((d - radius).abs() <= tolerance);
        }
    }

    #[test]
    fn full_circle_bbox_covers_extremes(
        cx in -1_000_000i32..1_000_000,
        cy in -1_000_000i32..1_000_000,
        radius in 1_000i32..1_000_000,
        start_angle in 0.0f64..360.0,
    ) {
        let center = Point2I::new(cx, cy);
        let start = start_on_circle(center, radius, start_angle);
        let arc = Arc::from_center(center, start, 360.0, 0);

        prop_assert!(arc.is_full_circle());
        prop_assert_eq!(arc.central_angle().abs(), 360.0);

        let r = ki_round(arc.radius());
        let c = arc.center();
        let bbox = arc.bbox(0);
        prop_assert!((arc.length() - 2.0 * std::f64::consts::PI * arc.radius()).abs() < 1e-6);

        for p in [
            Point2I::new(c.x + r, c.y),
            Point2I::new(c.x - r, c.y),
            Point2I::new(c.x, c.y + r),
            Point2I::new(c.x, c.y - r),
        ] {
            prop_assert!(bbox.contains(&p));
            prop_assert!(arc.slice_contains_point(&p));
            prop_assert!(arc.collides_with_point(&p, 1));
        }

        let through_center = Segment::new(c, Point2I::new(c.x + 1, c.y));
        prop_assert_eq!(arc.intersect_line(&through_center).len(), 2);
    }
}
