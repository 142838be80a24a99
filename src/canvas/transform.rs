//! Circular shifts and quarter-turn rotations.
//!
//! Every transform is a permutation of the existing pixels. Shifts are
//! validated before any pixel moves, so a rejected call leaves the canvas
//! untouched.

use tracing::trace;

use super::{PixelCanvas, Rgb};
use crate::error::{MoveError, Result};
use crate::types::{OpKind, Operation};

impl PixelCanvas {
    /// Apply an operation to the canvas.
    pub fn apply(&mut self, op: Operation) -> Result<()> {
        trace!(%op, width = self.width, height = self.height, "transform");
        let d = op.argument();
        match op.kind() {
            OpKind::ShiftLeft => self.shift_left(d),
            OpKind::ShiftRight => self.shift_right(d),
            OpKind::ShiftUp => self.shift_up(d),
            OpKind::ShiftDown => self.shift_down(d),
            OpKind::RotateCcw => {
                self.rotate_ccw();
                Ok(())
            }
            OpKind::RotateCw => {
                self.rotate_cw();
                Ok(())
            }
        }
    }

    /// Check that `op` can be applied to the canvas in its current shape.
    pub fn validate(&self, op: Operation) -> Result<()> {
        let (axis, limit) = match op.kind() {
            OpKind::ShiftLeft | OpKind::ShiftRight => ("width", self.width),
            OpKind::ShiftUp | OpKind::ShiftDown => ("height", self.height),
            OpKind::RotateCcw | OpKind::RotateCw => return Ok(()),
        };

        if op.argument() > limit {
            return Err(MoveError::InvalidArgument { op, axis, limit });
        }
        Ok(())
    }

    /// Shift every row `d` pixels left; columns leaving the left edge
    /// re-enter on the right.
    pub fn shift_left(&mut self, d: usize) -> Result<()> {
        self.validate(Operation::shift_left(d))?;
        if d == 0 || d == self.width {
            return Ok(());
        }
        for row in self.pixels.chunks_exact_mut(self.width) {
            row.rotate_left(d);
        }
        Ok(())
    }

    /// Shift every row `d` pixels right, wrapping around the left edge.
    pub fn shift_right(&mut self, d: usize) -> Result<()> {
        self.validate(Operation::shift_right(d))?;
        if d == 0 || d == self.width {
            return Ok(());
        }
        for row in self.pixels.chunks_exact_mut(self.width) {
            row.rotate_right(d);
        }
        Ok(())
    }

    /// Shift the image `d` rows up, wrapping the top rows to the bottom.
    pub fn shift_up(&mut self, d: usize) -> Result<()> {
        self.validate(Operation::shift_up(d))?;
        if d == 0 || d == self.height {
            return Ok(());
        }
        // Rows are contiguous, so a vertical shift is a rotation of the
        // whole buffer by whole rows.
        self.pixels.rotate_left(d * self.width);
        Ok(())
    }

    /// Shift the image `d` rows down, wrapping the bottom rows to the top.
    pub fn shift_down(&mut self, d: usize) -> Result<()> {
        self.validate(Operation::shift_down(d))?;
        if d == 0 || d == self.height {
            return Ok(());
        }
        self.pixels.rotate_right(d * self.width);
        Ok(())
    }

    /// Rotate a quarter turn counter-clockwise.
    ///
    /// The pixel at column `x`, row `y` moves to column `y`, row `W-1-x`.
    /// The result is `H` wide and `W` tall.
    pub fn rotate_ccw(&mut self) {
        let (w, h) = (self.width, self.height);
        self.permute_into(h, w, |x, y| (y, w - 1 - x));
    }

    /// Rotate a quarter turn clockwise, the exact inverse of `rotate_ccw`.
    ///
    /// The pixel at column `x`, row `y` moves to column `H-1-y`, row `x`.
    pub fn rotate_cw(&mut self) {
        let (w, h) = (self.width, self.height);
        self.permute_into(h, w, |x, y| (h - 1 - y, x));
    }

    /// Move every pixel to `dest(x, y)` on a `new_w` x `new_h` grid via a
    /// scratch buffer, then swap the scratch buffer in.
    fn permute_into(&mut self, new_w: usize, new_h: usize, dest: impl Fn(usize, usize) -> (usize, usize)) {
        let mut scratch: Vec<Rgb> = vec![[0; 3]; self.pixels.len()];

        for (i, &px) in self.pixels.iter().enumerate() {
            let (x, y) = (i % self.width, i / self.width);
            let (nx, ny) = dest(x, y);
            scratch[ny * new_w + nx] = px;
        }

        std::mem::swap(&mut self.pixels, &mut scratch);
        self.width = new_w;
        self.height = new_h;
    }
}
