//! In-memory elevation grid.

use crate::{DemError, Result};

/// A rectangular grid of elevation samples.
///
/// Samples are stored row-major, north to south, west to east, so the
/// sample at `(row, col)` lives at index `row * width + col`.
#[derive(Debug, Clone, PartialEq)]
pub struct ElevationGrid {
    data: Vec<f32>,
    width: usize,
    height: usize,
}

impl ElevationGrid {
    /// Create a grid from a row-major sample buffer.
    pub fn new(width: usize, height: usize, data: Vec<f32>) -> Result<Self> {
        if width.checked_mul(height) != Some(data.len()) {
            return Err(DemError::GridSizeMismatch {
                width,
                height,
                len: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// Create a grid from a list of rows (north row first).
    pub fn from_rows<R: AsRef<[f32]>>(rows: &[R]) -> Result<Self> {
        let width = rows.first().map_or(0, |r| r.as_ref().len());
        let mut data = Vec::with_capacity(width * rows.len());
        for (row, samples) in rows.iter().enumerate() {
            let samples = samples.as_ref();
            if samples.len() != width {
                return Err(DemError::RaggedRows {
                    row,
                    expected: width,
                    found: samples.len(),
                });
            }
            data.extend_from_slice(samples);
        }
        Self::new(width, rows.len(), data)
    }

    /// Width of the grid in samples.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height of the grid in samples.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Dimensions as `(width, height)`.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Total number of samples.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the grid holds no samples.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Sample at `(row, col)`, or `None` when outside the grid.
    pub fn get(&self, row: usize, col: usize) -> Option<f32> {
        if row < self.height && col < self.width {
            Some(self.data[row * self.width + col])
        } else {
            None
        }
    }

    /// Row-major samples.
    pub fn samples(&self) -> &[f32] {
        &self.data
    }

    /// Mutable row-major samples.
    pub fn samples_mut(&mut self) -> &mut [f32] {
        &mut self.data
    }
}
