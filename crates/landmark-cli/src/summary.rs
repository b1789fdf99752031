use console::Style;
use landmark_core::landmark::Side;
use landmark_core::registration::RegistrationOutcome;

use crate::points::PointsFile;

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    good: Style,
    poor: Style,
    disabled: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            good: Style::new().green(),
            poor: Style::new().yellow(),
            disabled: Style::new().dim().yellow(),
        }
    }
}

/// Residual above which a pair is highlighted as a poor fit, in pixels.
const POOR_RESIDUAL: f64 = 3.0;

pub fn print_registration_summary(outcome: &RegistrationOutcome, points: &PointsFile) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to("Registration"));
    println!("  {}", s.title.apply_to("\u{2550}".repeat(12)));
    println!();

    println!(
        "  {:<14}{}",
        s.label.apply_to("Pairs"),
        s.value.apply_to(outcome.pairs)
    );
    match outcome.inliers {
        Some(n) => println!(
            "  {:<14}{}",
            s.label.apply_to("Inliers"),
            s.value.apply_to(format!("{n}/{}", outcome.pairs))
        ),
        None => println!(
            "  {:<14}{}",
            s.label.apply_to("Inliers"),
            s.disabled.apply_to("not reported")
        ),
    }
    match outcome.blended {
        Some(ref blended) => println!(
            "  {:<14}{}",
            s.label.apply_to("Preview"),
            s.value
                .apply_to(blended.media_type().unwrap_or("external reference"))
        ),
        None => println!(
            "  {:<14}{}",
            s.label.apply_to("Preview"),
            s.disabled.apply_to("not returned")
        ),
    }

    let Some(h) = outcome.homography else {
        println!(
            "  {:<14}{}",
            s.label.apply_to("Homography"),
            s.disabled.apply_to("not reported")
        );
        println!();
        return;
    };

    println!();
    println!("  {}", s.header.apply_to("Homography"));
    for row in h.0 {
        println!(
            "    {}",
            s.value
                .apply_to(format!("{:>12.6} {:>12.6} {:>12.6}", row[0], row[1], row[2]))
        );
    }

    println!();
    println!("  {}", s.header.apply_to("Residuals (px)"));
    for (i, (l, r)) in points
        .side(Side::Left)
        .zip(points.side(Side::Right))
        .enumerate()
    {
        let label = s.label.apply_to(format!("#{:<3}", i + 1));
        match h.map_point(l) {
            Some(mapped) => {
                let err = mapped.distance(r);
                let style = if err <= POOR_RESIDUAL { &s.good } else { &s.poor };
                println!("    {} {}", label, style.apply_to(format!("{err:.2}")));
            }
            None => println!("    {} {}", label, s.disabled.apply_to("at infinity")),
        }
    }
    println!();
}
