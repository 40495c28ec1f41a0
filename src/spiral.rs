//! # 螺旋游标模块
//!
//! 以顺时针、逐圈向内收缩的螺旋顺序遍历矩形网格。嵌入和提取都使用同一个确定性的游标，
//! 因此两端的访问顺序完全一致。
//!
//! 以 3x5 网格为例，访问顺序为：
//!
//! ```text
//!  0  1  2  3  4
//! 11 12 13 14  5
//! 10  9  8  7  6
//! ```

/// 游标的移动方向，按 Right -> Down -> Left -> Up 循环。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Right,
    Down,
    Left,
    Up,
}

impl Direction {
    /// 循环顺序中的下一个方向。
    pub fn turn(self) -> Self {
        match self {
            Direction::Right => Direction::Down,
            Direction::Down => Direction::Left,
            Direction::Left => Direction::Up,
            Direction::Up => Direction::Right,
        }
    }

    /// 该方向的单位向量 `(d_row, d_col)`。
    fn delta(self) -> (isize, isize) {
        match self {
            Direction::Right => (0, 1),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Up => (-1, 0),
        }
    }
}

/// 螺旋游标的完整状态：当前位置、四条收缩边界和当前方向。
///
/// [`step`](SpiralCursor::step) 不检查终止条件，调用方必须在访问 `rows * cols`
/// 个位置 (包括初始位置) 后停止。需要自动停止时使用 [`SpiralOrder`]。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpiralCursor {
    row: isize,
    col: isize,
    min_row: isize,
    max_row: isize,
    min_col: isize,
    max_col: isize,
    direction: Direction,
}

impl SpiralCursor {
    /// 在 `rows` x `cols` 网格的左上角创建游标，初始方向向右。
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            row: 0,
            col: 0,
            min_row: 0,
            max_row: to_isize(rows) - 1,
            min_col: 0,
            max_col: to_isize(cols) - 1,
            direction: Direction::Right,
        }
    }

    /// 当前位置 `(row, col)`。
    ///
    /// 只要调用方没有越过 `rows * cols` 个位置，坐标总是落在网格内。
    pub fn position(&self) -> (usize, usize) {
        (self.row.max(0) as usize, self.col.max(0) as usize)
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// 前进一步，返回新的状态。
    ///
    /// 如果当前位置位于当前方向对应的边界上，先把刚走完的那一侧边界向内收缩一格并转向，
    /// 然后沿 (可能已更新的) 方向移动一格。
    #[must_use]
    pub fn step(self) -> Self {
        let mut next = self;
        let at_edge = match self.direction {
            Direction::Right if self.col == self.max_col => {
                next.min_row += 1;
                true
            }
            Direction::Down if self.row == self.max_row => {
                next.max_col -= 1;
                true
            }
            Direction::Left if self.col == self.min_col => {
                next.max_row -= 1;
                true
            }
            Direction::Up if self.row == self.min_row => {
                next.min_col += 1;
                true
            }
            _ => false,
        };
        if at_edge {
            next.direction = self.direction.turn();
        }

        let (d_row, d_col) = next.direction.delta();
        next.row += d_row;
        next.col += d_col;
        next
    }
}

/// 按螺旋顺序产生网格中每个坐标恰好一次的迭代器。
#[derive(Debug, Clone)]
pub struct SpiralOrder {
    cursor: SpiralCursor,
    remaining: usize,
}

impl SpiralOrder {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            cursor: SpiralCursor::new(rows, cols),
            remaining: rows.saturating_mul(cols),
        }
    }
}

impl Iterator for SpiralOrder {
    type Item = (usize, usize);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let position = self.cursor.position();
        self.remaining -= 1;
        if self.remaining > 0 {
            self.cursor = self.cursor.step();
        }
        Some(position)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for SpiralOrder {}

fn to_isize(value: usize) -> isize {
    isize::try_from(value).unwrap_or(isize::MAX)
}
