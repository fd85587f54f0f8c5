// heatmap-tables/src/contrast.rs

use crate::palette::{Palette, PaletteFamily};
use ndarray::ArrayView2;
use ndarray_stats::errors::MinMaxError;
use ndarray_stats::QuantileExt;
use thiserror::Error;

pub const DEFAULT_CORRECTION: f64 = 2.0;

/// Calibrated cutoffs. Diverging ramps are dark outside the 0.3..0.7
/// band; a background below 0.5 luma needs white text.
const DIVERGING_LOW: f64 = 0.3;
const DIVERGING_HIGH: f64 = 0.7;
const LUMINANCE_CUTOFF: f64 = 0.5;

/// Annotation text colors. DarkBlue is only reachable through the
/// sequential strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextColor {
    White,
    Black,
    DarkBlue,
}

impl TextColor {
    pub fn rgb(&self) -> (u8, u8, u8) {
        match self {
            TextColor::White => (255, 255, 255),
            TextColor::Black => (0, 0, 0),
            TextColor::DarkBlue => (0, 0, 139),
        }
    }
}

/// One legibility rule per palette family. The thresholds live here and
/// nowhere else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ContrastStrategy {
    /// White above correction * mean, black above mean, dark blue below.
    Sequential,
    /// White at the dark extremes, black over the light center band.
    Diverging,
    /// Compute the background luma and flip at the cutoff.
    PerceptualLuminance,
}

impl From<PaletteFamily> for ContrastStrategy {
    fn from(family: PaletteFamily) -> Self {
        match family {
            PaletteFamily::Sequential => ContrastStrategy::Sequential,
            PaletteFamily::Diverging => ContrastStrategy::Diverging,
            PaletteFamily::PerceptualLuminance => ContrastStrategy::PerceptualLuminance,
        }
    }
}

/// Chooses a legible annotation color for every cell of one render.
/// Built once from the full render-value array; all later decisions are
/// pure and deterministic.
#[derive(Debug, Clone, Copy)]
pub struct ContrastSelector {
    palette: Palette,
    strategy: ContrastStrategy,
    data_min: f64,
    data_range: f64,
    threshold: f64,
    correction: f64,
}

impl ContrastSelector {
    pub fn new(
        values: ArrayView2<f64>,
        palette: Palette,
        correction: f64,
    ) -> Result<Self, ContrastError> {
        let data_min = *values.min()?;
        let data_max = *values.max()?;
        let data_range = if data_max == data_min {
            1.0
        } else {
            data_max - data_min
        };
        // min() above already rejected the empty array.
        let threshold = values.sum() / values.len() as f64;
        let strategy = ContrastStrategy::from(palette.family());
        log::debug!(
            "contrast: min={} max={} mean={} strategy={:?}",
            data_min,
            data_max,
            threshold,
            strategy
        );
        Ok(Self {
            palette,
            strategy,
            data_min,
            data_range,
            threshold,
            correction,
        })
    }

    /// Position of a value within the full data range, in [0, 1].
    pub fn normalized(&self, value: f64) -> f64 {
        (value - self.data_min) / self.data_range
    }

    /// The cell background the renderer will paint for this value.
    pub fn background(&self, value: f64) -> (u8, u8, u8) {
        self.palette.color(self.normalized(value))
    }

    pub fn pick(&self, value: f64) -> TextColor {
        match self.strategy {
            ContrastStrategy::PerceptualLuminance => {
                let (r, g, b) = self.background(value);
                // ITU-R BT.601 luma weights on the 0..1 scale.
                let luma =
                    (0.299 * r as f64 + 0.587 * g as f64 + 0.114 * b as f64) / 255.0;
                if luma < LUMINANCE_CUTOFF {
                    TextColor::White
                } else {
                    TextColor::Black
                }
            }
            ContrastStrategy::Diverging => {
                let t = self.normalized(value);
                if t < DIVERGING_LOW || t > DIVERGING_HIGH {
                    TextColor::White
                } else {
                    TextColor::Black
                }
            }
            ContrastStrategy::Sequential => {
                if value > self.correction * self.threshold {
                    TextColor::White
                } else if value > self.threshold {
                    TextColor::Black
                } else {
                    TextColor::DarkBlue
                }
            }
        }
    }
}

#[derive(Error, Debug)]
pub enum ContrastError {
    #[error("Cannot compute value statistics: {0}")]
    MinMaxError(#[from] MinMaxError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_sequential_thresholds_with_default_correction() {
        // mean = 5.0; white above 10, black in (5, 10], dark blue otherwise
        let values = array![[0.0, 2.0], [6.0, 12.0]];
        let selector =
            ContrastSelector::new(values.view(), Palette::Blues, DEFAULT_CORRECTION).unwrap();
        assert_eq!(selector.pick(12.0), TextColor::White);
        assert_eq!(selector.pick(10.0), TextColor::Black);
        assert_eq!(selector.pick(6.0), TextColor::Black);
        assert_eq!(selector.pick(5.0), TextColor::DarkBlue);
        assert_eq!(selector.pick(0.0), TextColor::DarkBlue);
    }

    #[test]
    fn test_sequential_respects_custom_correction() {
        // mean = 5.0, correction 1.0: anything above the mean goes white
        let values = array![[0.0, 10.0]];
        let selector = ContrastSelector::new(values.view(), Palette::YlGnBu, 1.0).unwrap();
        assert_eq!(selector.pick(6.0), TextColor::White);
        assert_eq!(selector.pick(5.0), TextColor::DarkBlue);
    }

    #[test]
    fn test_diverging_band() {
        // values 0..=10, so normalized(v) = v / 10
        let values = array![[0.0, 10.0]];
        let selector =
            ContrastSelector::new(values.view(), Palette::Coolwarm, DEFAULT_CORRECTION).unwrap();
        assert_eq!(selector.pick(0.0), TextColor::White);
        assert_eq!(selector.pick(2.9), TextColor::White);
        assert_eq!(selector.pick(3.0), TextColor::Black);
        assert_eq!(selector.pick(5.0), TextColor::Black);
        assert_eq!(selector.pick(7.0), TextColor::Black);
        assert_eq!(selector.pick(7.1), TextColor::White);
        assert_eq!(selector.pick(10.0), TextColor::White);
    }

    #[test]
    fn test_viridis_luminance_flip() {
        let values = array![[0.0, 10.0]];
        let selector =
            ContrastSelector::new(values.view(), Palette::Viridis, DEFAULT_CORRECTION).unwrap();
        // Dark purple end needs white text, bright yellow end black text.
        assert_eq!(selector.pick(0.0), TextColor::White);
        assert_eq!(selector.pick(10.0), TextColor::Black);
    }

    #[test]
    fn test_deterministic() {
        let values = array![[1.0, 2.0], [3.0, 4.0]];
        let a = ContrastSelector::new(values.view(), Palette::Viridis, 2.0).unwrap();
        let b = ContrastSelector::new(values.view(), Palette::Viridis, 2.0).unwrap();
        for v in [1.0, 2.5, 4.0] {
            assert_eq!(a.pick(v), b.pick(v));
        }
    }

    #[test]
    fn test_all_equal_values_do_not_divide_by_zero() {
        let values = array![[3.0, 3.0], [3.0, 3.0]];
        for palette in [Palette::Blues, Palette::Coolwarm, Palette::Viridis] {
            let selector =
                ContrastSelector::new(values.view(), palette, DEFAULT_CORRECTION).unwrap();
            assert_eq!(selector.normalized(3.0), 0.0);
            // Just needs a defined answer, per palette rule.
            let _ = selector.pick(3.0);
        }
    }

    #[test]
    fn test_empty_array_is_error() {
        let values = ndarray::Array2::<f64>::zeros((0, 0));
        assert!(ContrastSelector::new(values.view(), Palette::Blues, 2.0).is_err());
    }

    #[test]
    fn test_three_by_two_scenario() {
        // mean(1..=6) = 3.5; 6 is above the mean but not above 2 * 3.5
        let values = array![[1.0, 2.0], [3.0, 4.0], [5.0, 6.0]];
        let selector =
            ContrastSelector::new(values.view(), Palette::Blues, DEFAULT_CORRECTION).unwrap();
        assert_eq!(selector.pick(6.0), TextColor::Black);
        assert_eq!(selector.pick(5.0), TextColor::Black);
        assert_eq!(selector.pick(4.0), TextColor::Black);
        assert_eq!(selector.pick(3.0), TextColor::DarkBlue);
        assert_eq!(selector.pick(1.0), TextColor::DarkBlue);
    }
}
