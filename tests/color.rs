mod tests {
    use myrtio_opc_composer::color::{describe, describe_all, hsv2rgb, rgb2hsv};
    use myrtio_opc_composer::{Hsv, Rgb};
    use proptest::prelude::*;

    const RED: Rgb = Rgb { r: 255, g: 0, b: 0 };
    const GREEN: Rgb = Rgb { r: 0, g: 255, b: 0 };
    const BLUE: Rgb = Rgb { r: 0, g: 0, b: 255 };

    fn parts(hsv: Hsv) -> (u8, u8, u8) {
        (hsv.hue, hsv.sat, hsv.val)
    }

    /// Largest per-component difference.
    fn distance(a: Rgb, b: Rgb) -> u8 {
        a.r.abs_diff(b.r).max(a.g.abs_diff(b.g)).max(a.b.abs_diff(b.b))
    }

    #[test]
    fn test_describe() {
        assert_eq!(describe(Rgb::new(10, 20, 30)).to_string(), "{R:010 G:020 B:030}");
        assert_eq!(describe(Rgb::new(255, 0, 7)).to_string(), "{R:255 G:000 B:007}");
    }

    #[test]
    fn test_describe_all() {
        let colors = vec![RED; 11];
        let text = describe_all(&colors);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 11);
        assert_eq!(lines[0], "00 | {R:255 G:000 B:000}");
        assert_eq!(lines[10], "10 | {R:255 G:000 B:000}");
        assert_eq!(describe_all(&[]), "");
    }

    #[test]
    fn test_rgb2hsv_primaries() {
        assert_eq!(parts(rgb2hsv(RED)), (0, 255, 255));
        assert_eq!(parts(rgb2hsv(GREEN)), (85, 255, 255));
        assert_eq!(parts(rgb2hsv(BLUE)), (170, 255, 255));
    }

    #[test]
    fn test_rgb2hsv_grays() {
        assert_eq!(parts(rgb2hsv(Rgb::new(0, 0, 0))), (0, 0, 0));
        assert_eq!(parts(rgb2hsv(Rgb::new(128, 128, 128))), (0, 0, 128));
    }

    #[test]
    fn test_hsv2rgb_value_zero_is_black() {
        let black = hsv2rgb(Hsv {
            hue: 42,
            sat: 255,
            val: 0,
        });
        assert_eq!(black, Rgb::new(0, 0, 0));
    }

    #[test]
    fn test_primaries_round_trip() {
        for color in [RED, GREEN, BLUE] {
            assert_eq!(hsv2rgb(rgb2hsv(color)), color);
        }
        let dim_blue = Rgb::new(0, 0, 40);
        assert_eq!(hsv2rgb(rgb2hsv(dim_blue)), dim_blue);
    }

    #[test]
    fn test_grays_round_trip() {
        for level in [0, 1, 64, 128, 255] {
            let gray = Rgb::new(level, level, level);
            assert_eq!(hsv2rgb(rgb2hsv(gray)), gray);
        }
    }

    #[test]
    fn test_secondaries_round_trip() {
        // hsv2rgb tops out at 252 inside a sector
        let yellow = Rgb::new(255, 255, 0);
        let cyan = Rgb::new(0, 255, 255);
        let magenta = Rgb::new(255, 0, 255);

        assert_eq!(parts(rgb2hsv(yellow)), (43, 255, 255));
        assert_eq!(parts(rgb2hsv(cyan)), (128, 255, 255));
        assert_eq!(parts(rgb2hsv(magenta)), (213, 255, 255));
        for color in [yellow, cyan, magenta] {
            assert!(distance(hsv2rgb(rgb2hsv(color)), color) <= 3);
        }
    }

    proptest! {
        #[test]
        fn prop_rgb2hsv_round_trip(r in any::<u8>(), g in any::<u8>(), b in any::<u8>()) {
            let color = Rgb::new(r, g, b);
            let back = hsv2rgb(rgb2hsv(color));

            prop_assert!(distance(back, color) <= 4, "{:?} came back as {:?}", color, back);
        }
    }
}
