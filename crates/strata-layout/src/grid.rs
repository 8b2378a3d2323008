//! Per-layer sensor grid with an optional high-granularity quadrant.
//!
//! A layer of lateral size `S` with coarse granularity `N` is tiled by
//! `N×N` square cells of side `S/N`. When a split is requested the layer is
//! divided at its centre into four quadrants and the quadrant at positive x
//! and positive y is re-tiled at a finer resolution:
//!
//! ```text
//!   +------+------+
//!   |  LG  |  HG  |     LG: coarse cells (three quadrants)
//!   +------+------+     HG: fine cells
//!   |  LG  |  LG  |
//!   +------+------+
//! ```
//!
//! The layout is produced as up to two scan passes, each row-major over x
//! then y. Cells are enumerated coarse pass first, then fine pass; that
//! order is the sensor id order within a layer.

use smallvec::{smallvec, SmallVec};
use strata_core::{ConfigError, LayerIndex};

/// How the fine quadrant of a layer is derived from its split granularity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SplitConvention {
    /// Split granularity 0, or coarse granularity below 2: one plain grid.
    None,
    /// Positive split granularity `m`: the fine quadrant holds `m×m` cells
    /// of side `S / (2m)`.
    Quadrant {
        /// Fine cells per quadrant side.
        fine_count: u32,
    },
    /// Negative split granularity: the fine quadrant holds `N/2 × N/2`
    /// cells of the coarse side, so the layer is uniformly tiled.
    Uniform {
        /// Fine cells per quadrant side (`N/2`).
        fine_count: u32,
    },
}

/// One row-major scan over a square block of equal cells.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridPass {
    /// Most-negative (x, y) corner of the block, layer-relative.
    pub corner: (f64, f64),
    /// Cell side length.
    pub side: f64,
    /// Cells per block side.
    pub count: u32,
    /// Whether the pass produces fine-quadrant cells.
    pub small: bool,
    /// Split boundary: a cell is skipped when its x centre AND its y centre
    /// both exceed this point.
    pub skip_beyond: Option<(f64, f64)>,
}

impl GridPass {
    fn centre(&self, index: u32, origin: f64) -> f64 {
        origin + self.side / 2.0 + self.side * index as f64
    }

    fn skips(&self, x: f64, y: f64) -> bool {
        match self.skip_beyond {
            Some((bx, by)) => y > by && x > bx,
            None => false,
        }
    }
}

/// A cell produced by the grid, relative to its layer's centre.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellFootprint {
    /// Centre x.
    pub x: f64,
    /// Centre y.
    pub y: f64,
    /// Side length.
    pub side: f64,
    /// Whether the cell lies in the fine quadrant.
    pub small: bool,
    /// Column within its pass.
    pub column: u32,
    /// Row within its pass.
    pub row: u32,
}

/// Sensor grid of a single layer.
#[derive(Clone, Debug, PartialEq)]
pub struct SensorGridLayout {
    layer: LayerIndex,
    lateral_size: f64,
    granularity: u32,
    convention: SplitConvention,
    passes: SmallVec<[GridPass; 2]>,
}

impl SensorGridLayout {
    /// Validate the layer's grid parameters and plan its scan passes.
    ///
    /// Rejects granularity below 1, a non-positive lateral size, and a
    /// split on an odd coarse grid (whose middle cells would straddle the
    /// quadrant boundary).
    pub fn new(
        layer: LayerIndex,
        lateral_size: f64,
        granularity: i32,
        split_granularity: i32,
    ) -> Result<Self, ConfigError> {
        if !lateral_size.is_finite() || lateral_size <= 0.0 {
            return Err(ConfigError::InvalidLayerSize {
                value: lateral_size,
            });
        }
        let n = u32::try_from(granularity)
            .ok()
            .filter(|&n| n >= 1)
            .ok_or(ConfigError::InvalidGranularity { layer, granularity })?;

        let convention = if split_granularity == 0 || n < 2 {
            SplitConvention::None
        } else if n % 2 != 0 {
            return Err(ConfigError::OddSplitGranularity {
                layer,
                granularity,
                split: split_granularity,
            });
        } else if split_granularity > 0 {
            SplitConvention::Quadrant {
                fine_count: split_granularity.unsigned_abs(),
            }
        } else {
            SplitConvention::Uniform { fine_count: n / 2 }
        };

        let coarse_side = lateral_size / n as f64;
        let half = lateral_size / 2.0;
        let passes: SmallVec<[GridPass; 2]> = match convention {
            SplitConvention::None => smallvec![GridPass {
                corner: (-half, -half),
                side: coarse_side,
                count: n,
                small: false,
                skip_beyond: None,
            }],
            SplitConvention::Quadrant { fine_count } | SplitConvention::Uniform { fine_count } => {
                let fine_side = match convention {
                    SplitConvention::Uniform { .. } => coarse_side,
                    _ => lateral_size / (2.0 * fine_count as f64),
                };
                smallvec![
                    GridPass {
                        corner: (-half, -half),
                        side: coarse_side,
                        count: n,
                        small: false,
                        skip_beyond: Some((0.0, 0.0)),
                    },
                    GridPass {
                        corner: (0.0, 0.0),
                        side: fine_side,
                        count: fine_count,
                        small: true,
                        skip_beyond: None,
                    },
                ]
            }
        };

        Ok(Self {
            layer,
            lateral_size,
            granularity: n,
            convention,
            passes,
        })
    }

    /// The layer this grid belongs to.
    pub fn layer(&self) -> LayerIndex {
        self.layer
    }

    /// Lateral size of the layer.
    pub fn lateral_size(&self) -> f64 {
        self.lateral_size
    }

    /// Coarse divisions per side.
    pub fn granularity(&self) -> u32 {
        self.granularity
    }

    /// Split convention in effect.
    pub fn convention(&self) -> SplitConvention {
        self.convention
    }

    /// Scan passes in enumeration order.
    pub fn passes(&self) -> &[GridPass] {
        &self.passes
    }

    /// Coarse cell side, `S/N`.
    pub fn coarse_side(&self) -> f64 {
        self.lateral_size / self.granularity as f64
    }

    /// Fine cell side, if the layer is split.
    pub fn fine_side(&self) -> Option<f64> {
        self.passes.iter().find(|p| p.small).map(|p| p.side)
    }

    /// Number of cells [`cells`](Self::cells) produces.
    pub fn cell_count(&self) -> usize {
        let n = self.granularity as usize;
        match self.convention {
            SplitConvention::None => n * n,
            SplitConvention::Quadrant { fine_count } | SplitConvention::Uniform { fine_count } => {
                let f = fine_count as usize;
                n * n - (n / 2) * (n / 2) + f * f
            }
        }
    }

    /// Enumerate every cell in id order.
    pub fn cells(&self) -> Vec<CellFootprint> {
        let mut out = Vec::with_capacity(self.cell_count());
        for pass in &self.passes {
            for column in 0..pass.count {
                let x = pass.centre(column, pass.corner.0);
                for row in 0..pass.count {
                    let y = pass.centre(row, pass.corner.1);
                    if pass.skips(x, y) {
                        continue;
                    }
                    out.push(CellFootprint {
                        x,
                        y,
                        side: pass.side,
                        small: pass.small,
                        column,
                        row,
                    });
                }
            }
        }
        out
    }
}
