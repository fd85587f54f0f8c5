use ndarray::{Array2, Axis};

/// The two value arrays a render works from: `render` feeds the color
/// mapping (possibly min-max rescaled), `annot` keeps the original values
/// for the on-cell text and is never rescaled.
#[derive(Debug, Clone)]
pub struct RenderData {
    pub render: Array2<f64>,
    pub annot: Array2<f64>,
}

impl RenderData {
    /// Row normalization runs before column normalization; when both are
    /// requested the column pass rescales the row-normalized values.
    pub fn new(values: Array2<f64>, normalize_rows: bool, normalize_cols: bool) -> Self {
        let annot = values.clone();
        let mut render = values;
        if normalize_rows {
            rescale_lanes(&mut render, Axis(0));
        }
        if normalize_cols {
            rescale_lanes(&mut render, Axis(1));
        }
        Self { render, annot }
    }

    pub fn nrows(&self) -> usize {
        self.render.nrows()
    }

    pub fn ncols(&self) -> usize {
        self.render.ncols()
    }
}

/// Min-max rescales every lane along `axis` to [0, 1]. A constant lane
/// gets a denominator of 1 instead of 0, so its values collapse to 0.
fn rescale_lanes(values: &mut Array2<f64>, axis: Axis) {
    for mut lane in values.axis_iter_mut(axis) {
        let min = lane.iter().fold(f64::MAX, |acc, &v| acc.min(v));
        let max = lane.iter().fold(f64::MIN, |acc, &v| acc.max(v));
        let den = if max == min { 1.0 } else { max - min };
        lane.mapv_inplace(|v| (v - min) / den);
    }
}
