//! A runtime-sized square bit grid.
//!
//! The grid is `no_std` friendly (needs only `alloc`). Cells of an `N×N` grid
//! are packed row-major into a vector of unsigned words `T`, so the grid size
//! is a value rather than a type parameter.

use alloc::vec;
use alloc::vec::Vec;
use core::{fmt, mem};
use num_traits::{PrimInt, Unsigned, Zero};
use thiserror::Error;

/// Errors returned by bit grid operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BitGridError {
    /// Row or column index is out of bounds [0..N).
    #[error("IndexOutOfBounds: row={row}, col={col}")]
    IndexOutOfBounds { row: usize, col: usize },
    /// Two grids of different sizes were combined.
    #[error("SizeMismatch: {left} vs {right}")]
    SizeMismatch { left: usize, right: usize },
}

/// An N×N bit grid stored in words of the unsigned integer `T`.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct BitGrid<T = u64>
where
    T: PrimInt + Unsigned + Zero,
{
    size: usize,
    words: Vec<T>,
}

impl<T> BitGrid<T>
where
    T: PrimInt + Unsigned + Zero,
{
    const WORD_BITS: usize = mem::size_of::<T>() * 8;

    /// Create an empty `size×size` grid (all bits cleared).
    pub fn new(size: usize) -> Self {
        let cells = size * size;
        let words = cells.div_ceil(Self::WORD_BITS);
        BitGrid {
            size,
            words: vec![T::zero(); words],
        }
    }

    /// Side length of the grid.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of set bits (occupied cells).
    pub fn count_ones(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// Returns true if no bits are set.
    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|w| w.is_zero())
    }

    /// Gets the bit at (row, col).
    pub fn get(&self, row: usize, col: usize) -> Result<bool, BitGridError> {
        let (word, bit) = self.locate(row, col)?;
        Ok(((self.words[word] >> bit) & T::one()) != T::zero())
    }

    /// Sets the bit at (row, col) to 1.
    pub fn set(&mut self, row: usize, col: usize) -> Result<(), BitGridError> {
        let (word, bit) = self.locate(row, col)?;
        self.words[word] = self.words[word] | (T::one() << bit);
        Ok(())
    }

    /// Clears the bit at (row, col) to 0.
    pub fn clear(&mut self, row: usize, col: usize) -> Result<(), BitGridError> {
        let (word, bit) = self.locate(row, col)?;
        self.words[word] = self.words[word] & !(T::one() << bit);
        Ok(())
    }

    /// Clears all bits to `0`.
    #[inline]
    pub fn clear_all(&mut self) {
        self.words.iter_mut().for_each(|w| *w = T::zero());
    }

    /// Returns true if any cell is set in both grids.
    pub fn intersects(&self, other: &Self) -> Result<bool, BitGridError> {
        self.check_same_size(other)?;
        Ok(self
            .words
            .iter()
            .zip(other.words.iter())
            .any(|(a, b)| !(*a & *b).is_zero()))
    }

    /// Sets every cell that is set in `other`.
    pub fn union_with(&mut self, other: &Self) -> Result<(), BitGridError> {
        self.check_same_size(other)?;
        for (a, b) in self.words.iter_mut().zip(other.words.iter()) {
            *a = *a | *b;
        }
        Ok(())
    }

    /// Creates a grid from an iterator over `(row, col)` positions.
    pub fn from_iter<I>(size: usize, iter: I) -> Result<Self, BitGridError>
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        let mut grid = Self::new(size);
        for (r, c) in iter {
            grid.set(r, c)?;
        }
        Ok(grid)
    }

    /// Iterator over the set cells of the grid, in row-major order.
    #[inline]
    pub fn iter_set_bits(&self) -> SetBits<'_, T> {
        SetBits { grid: self, idx: 0 }
    }

    #[inline]
    fn locate(&self, row: usize, col: usize) -> Result<(usize, usize), BitGridError> {
        if row >= self.size || col >= self.size {
            return Err(BitGridError::IndexOutOfBounds { row, col });
        }
        let idx = row * self.size + col;
        Ok((idx / Self::WORD_BITS, idx % Self::WORD_BITS))
    }

    #[inline]
    fn check_same_size(&self, other: &Self) -> Result<(), BitGridError> {
        if self.size != other.size {
            Err(BitGridError::SizeMismatch {
                left: self.size,
                right: other.size,
            })
        } else {
            Ok(())
        }
    }

    #[inline]
    fn bit(&self, idx: usize) -> bool {
        let word = self.words[idx / Self::WORD_BITS];
        ((word >> (idx % Self::WORD_BITS)) & T::one()) != T::zero()
    }
}

impl<T> fmt::Debug for BitGrid<T>
where
    T: PrimInt + Unsigned + Zero,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "BitGrid<{}, {}>:", core::any::type_name::<T>(), self.size)?;
        writeln!(f, "{}", self)
    }
}

impl<T> fmt::Display for BitGrid<T>
where
    T: PrimInt + Unsigned + Zero,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..self.size {
            for c in 0..self.size {
                let bit = if self.bit(r * self.size + c) { '■' } else { '□' };
                write!(f, "{} ", bit)?;
            }
            if r + 1 < self.size {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

/// Iterator over the set bits of a grid.
#[derive(Clone, Copy)]
pub struct SetBits<'a, T>
where
    T: PrimInt + Unsigned + Zero,
{
    grid: &'a BitGrid<T>,
    idx: usize,
}

impl<T> Iterator for SetBits<'_, T>
where
    T: PrimInt + Unsigned + Zero,
{
    type Item = (usize, usize);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let n = self.grid.size;
        while self.idx < n * n {
            let idx = self.idx;
            self.idx += 1;
            if self.grid.bit(idx) {
                return Some((idx / n, idx % n));
            }
        }
        None
    }
}
