//! Grilles partagées entre les étapes du pipeline.

use crate::color::Rgb;

/// Single-channel source image, one 0–255 luminance per pixel, row-major.
///
/// # Example
/// ```
/// use sg_core::grid::BrightnessGrid;
/// let grid = BrightnessGrid::new(4, 2, vec![0; 8]).unwrap();
/// assert_eq!(grid.aspect(), 2.0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrightnessGrid {
    pub width: u32,
    pub height: u32,
    data: Vec<u8>,
}

impl BrightnessGrid {
    /// Wrap a row-major luminance buffer.
    ///
    /// Returns `None` if `data.len() != width * height`.
    #[must_use]
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Option<Self> {
        if data.len() != width as usize * height as usize {
            return None;
        }
        Some(Self {
            width,
            height,
            data,
        })
    }

    /// Build a grid by evaluating `f(x, y)` for every pixel.
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> u8) -> Self {
        let mut data = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                data.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            data,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Width / height. Falls back to 1.0 for a zero-height grid.
    #[must_use]
    pub fn aspect(&self) -> f64 {
        if self.height == 0 {
            1.0
        } else {
            f64::from(self.width) / f64::from(self.height)
        }
    }

    #[inline]
    #[must_use]
    pub fn get(&self, x: u32, y: u32) -> u8 {
        self.data[y as usize * self.width as usize + x as usize]
    }

    #[must_use]
    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }
}

/// Quantized stitch grid: one tone index per stitch, row 0 at the top.
///
/// Padding cells hold tone 0, the same value as the darkest real stitch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToneGrid {
    pub rows: usize,
    pub cols: usize,
    pub tone_count: u8,
    cells: Vec<u8>,
}

impl ToneGrid {
    /// A `rows` × `cols` grid filled with tone 0.
    #[must_use]
    pub fn new(rows: usize, cols: usize, tone_count: u8) -> Self {
        Self {
            rows,
            cols,
            tone_count,
            cells: vec![0; rows * cols],
        }
    }

    #[inline]
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> u8 {
        self.cells[row * self.cols + col]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, tone: u8) {
        self.cells[row * self.cols + col] = tone;
    }

    /// Mutable view of one row.
    pub fn row_mut(&mut self, row: usize) -> &mut [u8] {
        let start = row * self.cols;
        &mut self.cells[start..start + self.cols]
    }

    /// Iterate rows from top to bottom.
    pub fn rows_iter(&self) -> impl Iterator<Item = &[u8]> {
        self.cells.chunks(self.cols.max(1)).take(self.rows)
    }

    #[must_use]
    pub fn as_raw(&self) -> &[u8] {
        &self.cells
    }

    /// Count of stitches per tone, index-aligned with tones.
    ///
    /// # Example
    /// ```
    /// use sg_core::grid::ToneGrid;
    /// let mut grid = ToneGrid::new(2, 2, 3);
    /// grid.set(0, 0, 2);
    /// assert_eq!(grid.histogram(), vec![3, 0, 1]);
    /// ```
    #[must_use]
    pub fn histogram(&self) -> Vec<usize> {
        let mut counts = vec![0; usize::from(self.tone_count)];
        for &tone in &self.cells {
            if let Some(slot) = counts.get_mut(usize::from(tone)) {
                *slot += 1;
            }
        }
        counts
    }

    /// Plain-text dump, one digit per stitch, each line prefixed with its
    /// crochet row number (bottom row is row 1).
    ///
    /// # Example
    /// ```
    /// use sg_core::grid::ToneGrid;
    /// let mut grid = ToneGrid::new(2, 3, 2);
    /// grid.set(0, 1, 1);
    /// assert_eq!(grid.to_text(), "2 | 010\n1 | 000\n");
    /// ```
    #[must_use]
    pub fn to_text(&self) -> String {
        let label_width = self.rows.to_string().len();
        let mut out = String::with_capacity(self.rows * (self.cols + label_width + 4));
        for (r, row) in self.rows_iter().enumerate() {
            out.push_str(&format!("{:>label_width$} | ", self.rows - r));
            for &tone in row {
                out.push(char::from(b'0' + tone));
            }
            out.push('\n');
        }
        out
    }
}

/// Ordered tone colors, index-aligned with tone indices `0..T`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Colormap {
    colors: Vec<Rgb>,
}

impl Colormap {
    #[must_use]
    pub fn new(colors: Vec<Rgb>) -> Self {
        Self { colors }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Color of `tone`, or `None` when the map has no entry for it.
    #[inline]
    #[must_use]
    pub fn color(&self, tone: u8) -> Option<Rgb> {
        self.colors.get(usize::from(tone)).copied()
    }

    /// Whether every tone of `grid`, legend included, has a color.
    #[must_use]
    pub fn covers(&self, grid: &ToneGrid) -> bool {
        let highest = grid.cells.iter().copied().max().unwrap_or(0);
        let needed = usize::from(grid.tone_count).max(usize::from(highest) + 1);
        self.colors.len() >= needed
    }

    #[must_use]
    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }
}
