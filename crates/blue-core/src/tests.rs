#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use crate::angle::Angle;
    use crate::color::Rgb1555;
    use crate::draw::{DrawCommand, DrawList, DrawListError, DrawMode, ZoomAnchor};
    use crate::events::SceneEvent;
    use crate::fixed::Fix16;
    use crate::input::{DigitalButtons, DigitalPad};
    use crate::matrix::{Fix16Mat43, MatrixStack, MatrixStackError, PushMode};
    use crate::vector::{Fix16Vec2, Fix16Vec3, Int16Vec2};

    // ---- Fix16 ----

    #[test]
    fn test_fix16_from_f64_rounds_half_away_from_zero() {
        assert_eq!(Fix16::from_f64(1.5).raw(), 98_304);
        assert_eq!(Fix16::from_f64(0.1).raw(), 6554);
        assert_eq!(Fix16::from_f64(-0.1).raw(), -6554);
        assert_eq!(Fix16::from_f64(1.0e9), Fix16::MAX);
    }

    #[test]
    fn test_fix16_to_int_rounding() {
        assert_eq!(Fix16::from_f64(1.5).to_int(), 2);
        assert_eq!(Fix16::from_f64(-1.5).to_int(), -2);
        assert_eq!(Fix16::from_f64(1.4).to_int(), 1);
        assert_eq!(Fix16::from_f64(-1.4).to_int(), -1);
        assert_eq!(Fix16::from_f64(-1.5).floor(), -2);
    }

    #[test]
    fn test_fix16_mul_exact_and_rounded() {
        let a = Fix16::from_f64(1.5);
        assert_eq!(a * a, Fix16::from_f64(2.25));
        // Half an ulp rounds away from zero in both directions.
        assert_eq!((Fix16::HALF * Fix16::EPSILON).raw(), 1);
        assert_eq!((-Fix16::HALF * Fix16::EPSILON).raw(), -1);
    }

    #[test]
    fn test_fix16_mul_saturates() {
        let two = Fix16::from_int(2);
        assert_eq!(Fix16::MAX * two, Fix16::MAX);
        assert_eq!(Fix16::MIN * two, Fix16::MIN);
        assert_eq!(Fix16::MAX.checked_mul(two), None);
    }

    #[test]
    fn test_fix16_div() {
        let one = Fix16::ONE;
        let two = Fix16::from_int(2);
        let three = Fix16::from_int(3);
        assert_eq!((one / three).raw(), 21_845);
        assert_eq!((two / three).raw(), 43_691);
        assert_eq!((-two / three).raw(), -43_691);
        assert_eq!(one / Fix16::ZERO, Fix16::MIN);
        assert_eq!(one.checked_div(Fix16::ZERO), None);
    }

    #[test]
    fn test_fix16_add_saturates() {
        assert_eq!(Fix16::MAX + Fix16::ONE, Fix16::MAX);
        assert_eq!(Fix16::MIN - Fix16::ONE, Fix16::MIN);
    }

    #[test]
    fn test_fix16_sqrt() {
        assert_eq!(Fix16::from_int(4).sqrt(), Fix16::from_int(2));
        assert_relative_eq!(Fix16::from_int(2).sqrt().to_f64(), 2f64.sqrt(), epsilon = 1e-4);
        assert_eq!(Fix16::from_int(-4).sqrt(), Fix16::ZERO);
    }

    #[test]
    fn test_fix16_display() {
        assert_eq!(Fix16::from_int(3).to_string(), "3.00000");
        assert_eq!(format!("{:.2}", Fix16::from_f64(-1.25)), "-1.25");
        assert_eq!(format!("{:.4}", Fix16::from_f64(0.1)), "0.1000");
        assert_eq!(format!("{:.0}", Fix16::from_f64(2.5)), "3");
    }

    #[test]
    fn test_fix16_display_rounds_last_digit_half_up() {
        // 1024/65536 = 0.015625, exactly halfway at five digits.
        assert_eq!(Fix16::from_raw(1024).to_string(), "0.01563");
        assert_eq!(Fix16::from_raw(-1024).to_string(), "-0.01563");
        assert_eq!(format!("{:.2}", Fix16::from_f64(-0.001)), "0.00");
    }

    #[test]
    fn test_fix16_serializes_as_raw_integer() {
        assert_eq!(serde_json::to_string(&Fix16::ONE).unwrap(), "65536");
        let back: Fix16 = serde_json::from_str("-98304").unwrap();
        assert_eq!(back, Fix16::from_f64(-1.5));
    }

    #[test]
    fn test_fix16_exact_sum_saturates_once() {
        let values = [30_000, 30_000, -30_000].map(Fix16::from_int);
        assert_eq!(Fix16::exact_sum(values), Fix16::from_int(30_000));
        assert_eq!(values.into_iter().sum::<Fix16>(), Fix16::from_int(30_000));
        assert_eq!(Fix16::exact_sum([Fix16::MAX, Fix16::ONE]), Fix16::MAX);
        assert_eq!(Fix16::exact_sum(Vec::<Fix16>::new()), Fix16::ZERO);
    }

    // ---- Vectors ----

    #[test]
    fn test_vec2_sum_is_exact() {
        let forces = [
            Fix16Vec2::from_f64(1.25, -0.5),
            Fix16Vec2::from_f64(-3.0, 2.75),
            Fix16Vec2::from_f64(0.0625, 0.0),
        ];
        let total: Fix16Vec2 = forces.iter().copied().sum();
        assert_eq!(total, Fix16Vec2::from_f64(-1.6875, 2.25));
    }

    #[test]
    fn test_vec2_length_and_screen() {
        let v = Fix16Vec2::from_int(3, 4);
        assert_eq!(v.length(), Fix16::from_int(5));
        assert_eq!(Fix16Vec2::from_f64(1.5, -2.5).to_screen(), Int16Vec2::new(2, -3));
    }

    #[test]
    fn test_vec3_cross() {
        let x = Fix16Vec3::from_int(1, 0, 0);
        let y = Fix16Vec3::from_int(0, 1, 0);
        assert_eq!(x.cross(&y), Fix16Vec3::from_int(0, 0, 1));
    }

    // ---- Angles and matrices ----

    #[test]
    fn test_angle_from_degrees() {
        assert_eq!(Angle::from_degrees(1.0).raw(), 182);
        assert_eq!(Angle::from_degrees(-1.0).raw(), u16::MAX - 181);
        assert_eq!(Angle::from_degrees(90.0), Angle::QUARTER);
        assert_eq!(Angle::QUARTER.sin(), Fix16::ONE);
        assert_eq!(Angle::QUARTER.cos(), Fix16::ZERO);
        assert_eq!(Angle::HALF + Angle::HALF, Angle::ZERO);
    }

    #[test]
    fn test_matrix_rotate_z_quarter_turn() {
        let m = Fix16Mat43::from_rotation_z(Angle::QUARTER);
        let p = m.transform_point(&Fix16Vec3::from_int(1, 0, 0));
        assert_eq!(p, Fix16Vec3::from_int(0, 1, 0));
    }

    #[test]
    fn test_matrix_matches_glam_reference() {
        let mut stack = MatrixStack::new();
        stack.translate(Fix16::from_int(5), Fix16::from_int(-2), Fix16::from_int(100));
        stack.rotate_y(Angle::from_degrees(30.0));
        stack.rotate_x(Angle::from_degrees(-45.0));

        let reference = glam::Mat4::from_translation(glam::Vec3::new(5.0, -2.0, 100.0))
            * glam::Mat4::from_rotation_y(30f32.to_radians())
            * glam::Mat4::from_rotation_x((-45f32).to_radians());

        let point = Fix16Vec3::from_f64(3.0, -7.5, 12.25);
        let fixed = stack.top().transform_point(&point).to_glam();
        let float = reference.transform_point3(point.to_glam());

        assert_relative_eq!(fixed.x, float.x, epsilon = 0.01);
        assert_relative_eq!(fixed.y, float.y, epsilon = 0.01);
        assert_relative_eq!(fixed.z, float.z, epsilon = 0.01);

        let via_glam = stack.top().to_glam().transform_point3(point.to_glam());
        assert_relative_eq!(via_glam.z, float.z, epsilon = 0.01);
    }

    #[test]
    fn test_matrix_stack_push_pop() {
        let mut stack = MatrixStack::new();
        stack.translate(Fix16::ONE, Fix16::ZERO, Fix16::ZERO);
        stack.push(PushMode::Push).unwrap();
        assert_eq!(stack.top().translation(), Fix16Vec3::from_int(1, 0, 0));
        stack.translate(Fix16::ZERO, Fix16::ZERO, Fix16::from_int(10));
        assert_eq!(stack.top().translation(), Fix16Vec3::from_int(1, 0, 10));
        stack.pop().unwrap();
        assert_eq!(stack.top().translation(), Fix16Vec3::from_int(1, 0, 0));

        stack.push(PushMode::MovePointer).unwrap();
        assert_eq!(*stack.top(), Fix16Mat43::IDENTITY);
    }

    #[test]
    fn test_matrix_stack_limits() {
        let mut stack = MatrixStack::new();
        assert_eq!(stack.pop(), Err(MatrixStackError::Underflow));
        while stack.depth() < crate::constants::MATRIX_STACK_DEPTH {
            stack.push(PushMode::Push).unwrap();
        }
        assert!(matches!(
            stack.push(PushMode::Push),
            Err(MatrixStackError::Overflow { .. })
        ));
    }

    // ---- Colour ----

    #[test]
    fn test_rgb1555_packing() {
        let c = Rgb1555::new(1, 0, 3, 15);
        assert_eq!(c.raw(), 0x8000 | (15 << 10) | (3 << 5));
        assert_eq!((c.r(), c.g(), c.b()), (0, 3, 15));
        assert!(c.msb());
        assert_eq!(Rgb1555::new(0, 40, 0, 0).r(), 31);
    }

    // ---- Input ----

    #[test]
    fn test_pad_edges() {
        let mut pad = DigitalPad::new();
        pad.update(DigitalButtons::UP);
        assert!(pad.is_just_pressed(DigitalButtons::UP));
        assert!(pad.directions_pressed());

        pad.update(DigitalButtons::UP | DigitalButtons::A);
        assert_eq!(pad.just_pressed, DigitalButtons::A);

        pad.update(DigitalButtons::A);
        assert_eq!(pad.just_released, DigitalButtons::UP);
        assert!(!pad.directions_pressed());
        assert!(pad.just_pressed.is_empty());
    }

    #[test]
    fn test_button_names() {
        assert_eq!(DigitalButtons::parse_name("up"), Some(DigitalButtons::UP));
        assert_eq!(DigitalButtons::parse_name(" Start "), Some(DigitalButtons::START));
        assert_eq!(DigitalButtons::parse_name("turbo"), None);
    }

    // ---- Draw list ----

    #[test]
    fn test_draw_list_bounded() {
        let mut list = DrawList::with_capacity(2);
        assert_eq!(list.push(DrawCommand::End).unwrap(), 0);
        assert_eq!(
            list.push(DrawCommand::LocalCoords {
                origin: Int16Vec2::new(160, 120)
            })
            .unwrap(),
            1
        );
        assert_eq!(
            list.push(DrawCommand::End),
            Err(DrawListError::Full { capacity: 2 })
        );
        assert!(matches!(
            list.set(5, DrawCommand::End),
            Err(DrawListError::SlotOutOfRange { slot: 5, len: 2 })
        ));
    }

    #[test]
    fn test_draw_list_terminate_idempotent() {
        let mut list = DrawList::with_capacity(4);
        list.push(DrawCommand::SystemClip {
            extent: Int16Vec2::new(319, 239),
        })
        .unwrap();
        list.terminate().unwrap();
        list.terminate().unwrap();
        assert_eq!(list.len(), 2);
        assert!(list.is_terminated());
    }

    #[test]
    fn test_draw_command_serde() {
        let cmd = DrawCommand::ScaledSprite {
            char_offset: 6528,
            width: 64,
            height: 102,
            anchor: ZoomAnchor::LowerRight,
            point: Int16Vec2::new(32, 51),
            display: Int16Vec2::new(63, 101),
            color_bank: 0x100,
            mode: DrawMode::TRANS_PIXEL_DISABLE | DrawMode::PRE_CLIPPING_DISABLE,
        };
        let json = serde_json::to_string(&cmd).unwrap();
        let back: DrawCommand = serde_json::from_str(&json).unwrap();
        assert_eq!(cmd, back);
    }

    #[test]
    fn test_scene_event_serde() {
        let event = SceneEvent::CoinSpawned {
            position: Fix16Vec2::from_int(10, 20),
            value: 5,
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"type\":\"CoinSpawned\""));
        let back: SceneEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, back);
    }
}
