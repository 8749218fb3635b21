use glam::DVec3;
use polar_axes_rs::axes::{LabelFormat, auto_tick_values, explicit_tick_values};
use polar_axes_rs::core::{Viewport, torus_mesh};
use polar_axes_rs::scene::Camera;
use proptest::prelude::*;

proptest! {
    #[test]
    fn explicit_ticks_are_sorted_and_span_the_axis(
        maximum_radius in 1e-3f64..1e6,
        count in 2usize..64
    ) {
        let values = explicit_tick_values(maximum_radius, count).expect("valid input");

        prop_assert_eq!(values.len(), count);
        prop_assert_eq!(values[0], 0.0);
        prop_assert_eq!(values[count - 1], maximum_radius);
        prop_assert!(values.windows(2).all(|pair| pair[0] < pair[1]));
        prop_assert!(values.iter().all(|value| value.is_finite()));
    }

    #[test]
    fn auto_ticks_stay_inside_the_axis(
        maximum_radius in 1e-3f64..1e6,
        target in 2usize..32
    ) {
        let values = auto_tick_values(maximum_radius, target).expect("valid input");

        prop_assert!(!values.is_empty());
        prop_assert_eq!(values[0], 0.0);
        prop_assert!(values.windows(2).all(|pair| pair[0] < pair[1]));
        prop_assert!(
            values.last().copied().expect("non-empty") <= maximum_radius * (1.0 + 1e-9)
        );
    }

    #[test]
    fn auto_tick_spacing_is_uniform(
        maximum_radius in 1e-3f64..1e6,
        target in 2usize..32
    ) {
        let values = auto_tick_values(maximum_radius, target).expect("valid input");
        prop_assume!(values.len() >= 3);

        let step = values[1] - values[0];
        for pair in values.windows(2) {
            prop_assert!(((pair[1] - pair[0]) - step).abs() <= step * 1e-9);
        }
    }

    #[test]
    fn fixed_labels_honor_width_and_parse_round_trips(
        width in 0usize..12,
        precision in 0usize..6,
        value in -1e4f64..1e4
    ) {
        let spec = format!("%{width}.{precision}f");
        let format = LabelFormat::parse(&spec).expect("valid spec");

        prop_assert_eq!(format.width, width);
        prop_assert_eq!(format.precision, precision);

        let formatted = format.format(value);
        prop_assert!(formatted.len() >= width);
        let reparsed = formatted.trim().parse::<f64>().expect("numeric label");
        let tolerance = 0.5 * 10f64.powi(-(precision as i32));
        prop_assert!((reparsed - value).abs() <= tolerance);
    }

    #[test]
    fn depth_grows_with_distance_along_the_view_axis(
        near_distance in 1.5f64..40.0,
        extra in 0.5f64..40.0
    ) {
        let camera = Camera {
            position: DVec3::new(0.0, 0.0, 50.0),
            focal_point: DVec3::ZERO,
            clipping_range: (1.0, 100.0),
            ..Camera::default()
        };
        let viewport = Viewport::new(400, 400);

        let nearer = camera
            .project(DVec3::new(0.0, 0.0, 50.0 - near_distance), viewport)
            .expect("in frustum");
        let farther = camera
            .project(DVec3::new(0.0, 0.0, 50.0 - near_distance - extra), viewport)
            .expect("in frustum");

        prop_assert!(nearer.depth < farther.depth);
        prop_assert!((0.0..=1.0).contains(&nearer.depth));
        prop_assert!((0.0..=1.0).contains(&farther.depth));
    }

    #[test]
    fn torus_meshes_validate_for_any_reasonable_parameters(
        major in 0.5f64..10.0,
        minor_ratio in 0.05f64..0.9,
        major_segments in 3usize..48,
        minor_segments in 3usize..24
    ) {
        let mesh = torus_mesh(major, major * minor_ratio, major_segments, minor_segments)
            .expect("valid parameters");

        prop_assert_eq!(mesh.point_count(), major_segments * minor_segments);
        prop_assert_eq!(mesh.triangle_count(), major_segments * minor_segments * 2);
        mesh.validate().expect("indices in range");

        let bounds = mesh.bounds().expect("non-empty");
        prop_assert!(bounds.is_valid());
        prop_assert!(bounds.diagonal() > 0.0);
    }
}
