use clap::ValueEnum;

/// A color ramp anchor: position in [0, 1] and the RGB value there.
type Stop = (f64, (u8, u8, u8));

const BLUES: &[Stop] = &[
    (0.0, (247, 251, 255)),
    (0.5, (107, 174, 214)),
    (1.0, (8, 48, 107)),
];

const YLGNBU: &[Stop] = &[
    (0.0, (255, 255, 217)),
    (0.5, (65, 182, 196)),
    (1.0, (8, 29, 88)),
];

const VIRIDIS: &[Stop] = &[
    (0.0, (68, 1, 84)),
    (0.25, (59, 82, 139)),
    (0.5, (33, 145, 140)),
    (0.75, (94, 201, 98)),
    (1.0, (253, 231, 37)),
];

const COOLWARM: &[Stop] = &[
    (0.0, (59, 76, 192)),
    (0.5, (221, 221, 221)),
    (1.0, (180, 4, 38)),
];

const RDYLGN: &[Stop] = &[
    (0.0, (165, 0, 38)),
    (0.5, (255, 255, 191)),
    (1.0, (0, 104, 55)),
];

const BWR: &[Stop] = &[
    (0.0, (0, 0, 255)),
    (0.5, (255, 255, 255)),
    (1.0, (255, 0, 0)),
];

const SEISMIC: &[Stop] = &[
    (0.0, (0, 0, 76)),
    (0.25, (0, 0, 255)),
    (0.5, (255, 255, 255)),
    (0.75, (255, 0, 0)),
    (1.0, (128, 0, 0)),
];

/// How a ramp's lightness behaves across its range, which decides the
/// annotation contrast rule applied to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaletteFamily {
    /// Monotonically darkening single-hue ramps.
    Sequential,
    /// Lightest at the midpoint, dark at both extremes.
    Diverging,
    /// No fixed midpoint rule; decide by computed background luminance.
    PerceptualLuminance,
}

/// The closed set of supported color ramps, named as in the plotting
/// tradition they come from.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Palette {
    #[default]
    #[value(name = "Blues")]
    Blues,
    #[value(name = "YlGnBu")]
    YlGnBu,
    #[value(name = "viridis")]
    Viridis,
    #[value(name = "coolwarm")]
    Coolwarm,
    #[value(name = "RdYlGn")]
    RdYlGn,
    #[value(name = "bwr")]
    Bwr,
    #[value(name = "seismic")]
    Seismic,
}

impl Palette {
    pub fn family(&self) -> PaletteFamily {
        match self {
            Palette::Blues | Palette::YlGnBu => PaletteFamily::Sequential,
            Palette::Coolwarm | Palette::RdYlGn | Palette::Bwr | Palette::Seismic => {
                PaletteFamily::Diverging
            }
            Palette::Viridis => PaletteFamily::PerceptualLuminance,
        }
    }

    /// Maps t in [0, 1] to a background color; t is clamped.
    pub fn color(&self, t: f64) -> (u8, u8, u8) {
        let stops = match self {
            Palette::Blues => BLUES,
            Palette::YlGnBu => YLGNBU,
            Palette::Viridis => VIRIDIS,
            Palette::Coolwarm => COOLWARM,
            Palette::RdYlGn => RDYLGN,
            Palette::Bwr => BWR,
            Palette::Seismic => SEISMIC,
        };
        ramp(stops, t)
    }
}

fn ramp(stops: &[Stop], t: f64) -> (u8, u8, u8) {
    let t = t.clamp(0.0, 1.0);
    let mut lower = stops[0];
    for &upper in &stops[1..] {
        if t <= upper.0 {
            let span = upper.0 - lower.0;
            let f = if span == 0.0 { 0.0 } else { (t - lower.0) / span };
            return (
                lerp(lower.1 .0, upper.1 .0, f),
                lerp(lower.1 .1, upper.1 .1, f),
                lerp(lower.1 .2, upper.1 .2, f),
            );
        }
        lower = upper;
    }
    stops[stops.len() - 1].1
}

fn lerp(a: u8, b: u8, f: f64) -> u8 {
    (a as f64 + (b as f64 - a as f64) * f).round() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ramp_endpoints() {
        assert_eq!(Palette::Blues.color(0.0), (247, 251, 255));
        assert_eq!(Palette::Blues.color(1.0), (8, 48, 107));
        assert_eq!(Palette::Viridis.color(0.0), (68, 1, 84));
        assert_eq!(Palette::Viridis.color(1.0), (253, 231, 37));
    }

    #[test]
    fn test_ramp_clamps_out_of_range() {
        assert_eq!(Palette::Blues.color(-2.0), Palette::Blues.color(0.0));
        assert_eq!(Palette::Blues.color(5.0), Palette::Blues.color(1.0));
    }

    #[test]
    fn test_ramp_interpolates_between_stops() {
        let (r, g, b) = Palette::Bwr.color(0.25);
        assert_eq!((r, g, b), (128, 128, 255));
    }

    #[test]
    fn test_family_classification() {
        assert_eq!(Palette::Blues.family(), PaletteFamily::Sequential);
        assert_eq!(Palette::YlGnBu.family(), PaletteFamily::Sequential);
        assert_eq!(Palette::Coolwarm.family(), PaletteFamily::Diverging);
        assert_eq!(Palette::RdYlGn.family(), PaletteFamily::Diverging);
        assert_eq!(Palette::Bwr.family(), PaletteFamily::Diverging);
        assert_eq!(Palette::Seismic.family(), PaletteFamily::Diverging);
        assert_eq!(Palette::Viridis.family(), PaletteFamily::PerceptualLuminance);
    }

    #[test]
    fn test_diverging_midpoints_are_light() {
        for palette in [Palette::Coolwarm, Palette::RdYlGn, Palette::Bwr, Palette::Seismic] {
            let (r, g, b) = palette.color(0.5);
            let lightness = (r as u32 + g as u32 + b as u32) / 3;
            assert!(lightness > 150, "{:?} midpoint too dark", palette);
        }
    }
}
