//! # 矩形网格模块
//!
//! `Grid<T>` 是像素网格、灰度网格和黑白网格的共同容器。
//! 单元格按行优先顺序存放在一个连续的 `Vec` 中，因此构造成功后网格必然是矩形的。

use crate::error::{Result, StegoError};

/// 按行优先顺序存储的矩形二维网格。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid<T> {
    rows: usize,
    cols: usize,
    cells: Vec<T>,
}

impl<T: Clone> Grid<T> {
    /// 创建一个 `rows` x `cols` 的网格，所有单元格都填充为 `fill`。
    pub fn new(rows: usize, cols: usize, fill: T) -> Self {
        Self {
            rows,
            cols,
            cells: vec![fill; rows * cols],
        }
    }

    /// 复制出逐行的 `Vec<Vec<T>>` 表示。
    pub fn to_rows(&self) -> Vec<Vec<T>> {
        (0..self.rows).map(|row| self.row(row).to_vec()).collect()
    }
}

impl<T> Grid<T> {
    /// 通过对每个坐标调用 `f(row, col)` 构造网格。
    pub fn from_fn(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let mut cells = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                cells.push(f(row, col));
            }
        }
        Self { rows, cols, cells }
    }

    /// 从逐行数据构造网格。
    ///
    /// # Errors
    ///
    /// 如果各行长度不一致，返回 [`StegoError::InvalidShape`]。
    /// 零行输入得到一个 0x0 的网格。
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        if let Some((index, bad)) = rows.iter().enumerate().find(|(_, r)| r.len() != cols) {
            return Err(StegoError::invalid_shape(format!(
                "row {index} has {} cells, expected {cols}",
                bad.len()
            )));
        }

        let height = rows.len();
        let cells = rows.into_iter().flatten().collect();
        Ok(Self {
            rows: height,
            cols,
            cells,
        })
    }

    /// 从行优先的扁平数据构造网格。
    ///
    /// # Errors
    ///
    /// 如果 `cells.len()` 不等于 `rows * cols`，返回 [`StegoError::InvalidShape`]。
    pub fn from_vec(rows: usize, cols: usize, cells: Vec<T>) -> Result<Self> {
        match rows.checked_mul(cols) {
            Some(len) if len == cells.len() => Ok(Self { rows, cols, cells }),
            _ => Err(StegoError::invalid_shape(format!(
                "{} cells cannot form a {rows}x{cols} grid",
                cells.len()
            ))),
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// 单元格总数，即 `rows * cols`。
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        self.index_of(row, col).map(|i| &self.cells[i])
    }

    /// 写入 `(row, col)` 处的单元格，坐标越界时返回 `false` 且不做修改。
    pub fn set(&mut self, row: usize, col: usize, value: T) -> bool {
        match self.index_of(row, col) {
            Some(i) => {
                self.cells[i] = value;
                true
            }
            None => false,
        }
    }

    /// 第 `row` 行的切片。
    ///
    /// # Panics
    ///
    /// `row` 越界时 panic。
    pub fn row(&self, row: usize) -> &[T] {
        &self.cells[row * self.cols..(row + 1) * self.cols]
    }

    /// 行优先的单元格切片。
    pub fn as_slice(&self) -> &[T] {
        &self.cells
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.cells
    }

    /// 行优先遍历所有单元格。
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.cells.iter()
    }

    /// 对每个单元格应用 `f`，保持形状不变。
    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> Grid<U> {
        Grid {
            rows: self.rows,
            cols: self.cols,
            cells: self.cells.iter().map(f).collect(),
        }
    }

    fn index_of(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.rows && col < self.cols).then(|| row * self.cols + col)
    }
}
