use dirsift_render::{
    CellRect, PaintCommand, Palette, PercentBar, Rgb, contrasting_color, fill_width, percent_of_parent,
};

#[test]
fn test_fill_width_monotonic_in_percent() {
    for (width, pen) in [(0, 0), (5, 2), (37, 2), (200, 2), (640, 3)] {
        let mut previous = 0;
        for step in 0..=1000 {
            let percent = step as f64 / 10.0;
            let filled = fill_width(percent, width, pen);
            assert!(filled >= previous, "width {width} pen {pen} at {percent}%");
            previous = filled;
        }
    }
}

#[test]
fn test_fill_width_endpoints() {
    for (width, pen) in [(10, 2), (37, 2), (200, 2), (640, 3)] {
        assert_eq!(fill_width(0.0, width, pen), 0);
        assert_eq!(fill_width(100.0, width, pen), width - 2 * pen);
    }
}

#[test]
fn test_contrasting_color_returns_desired_when_different() {
    let samples = [Rgb::BLACK, Rgb::WHITE, Rgb::gray(128), Rgb::new(231, 147, 43)];
    for desired in samples {
        for background in samples {
            if desired != background {
                assert_eq!(contrasting_color(desired, background), desired);
            }
        }
    }
}

#[test]
fn test_contrasting_color_always_differs_from_equal_background() {
    for r in (0..=255u16).step_by(17) {
        for g in (0..=255u16).step_by(51) {
            for b in [0u8, 1, 2, 127, 128, 254, 255] {
                let color = Rgb::new(r as u8, g as u8, b);
                assert_ne!(contrasting_color(color, color), color, "{color:?}");
            }
        }
    }
    for level in 0..=255u8 {
        let gray = Rgb::gray(level);
        assert_ne!(contrasting_color(gray, gray), gray, "{gray:?}");
    }
}

#[test]
fn test_bar_for_child_share() {
    // A 300 byte child of a 1200 byte directory fills a quarter of the bar.
    let percent = percent_of_parent(300, 1200);
    let palette = Palette::light();
    let commands = PercentBar::new(percent)
        .fill_color(palette.fill_color(2))
        .bar_background(palette.bar_background)
        .paint(CellRect::new(10, 40, 204, 22), palette.surface);

    let fills: Vec<_> = commands
        .iter()
        .filter_map(|c| match c {
            PaintCommand::Fill { rect, color } => Some((*rect, *color)),
            _ => None,
        })
        .collect();

    assert_eq!(
        fills,
        vec![
            (CellRect::new(12, 45, 200, 12), palette.bar_background),
            (CellRect::new(12, 45, 50, 12), palette.fill_color(2)),
        ]
    );

    let lines = commands
        .iter()
        .filter(|c| matches!(c, PaintCommand::Line { .. }))
        .count();
    assert_eq!(lines, 8);
}
