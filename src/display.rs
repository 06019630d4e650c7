//! Human-readable tensor rendering.
//!
//! Output is presentation-only:
//!
//! ```text
//! [[ 1  2]
//!  [-3  4]]
//! ```
//!
//! Every element is right-aligned to the widest formatted element. Float
//! tensors whose widest natural rendering exceeds five characters switch to
//! six fixed decimals.

use core::fmt;

use crate::config::{display_mode, DisplayMode};
use crate::numeric::Scalar;
use crate::tensors::Tensor;

impl<T: Scalar> fmt::Display for Tensor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if display_mode() == DisplayMode::NumPy {
            writeln!(f, "{}", numpy_header(self))?;
        }

        let mut cells: Vec<String> = self.data().iter().map(ToString::to_string).collect();
        let widest = cells.iter().map(String::len).max().unwrap_or(0);
        if T::IS_FLOAT && widest > 5 {
            let ops = T::ops();
            cells = self
                .data()
                .iter()
                .map(|&x| format!("{:.6}", ops.to_f64(x)))
                .collect();
        }
        let width = cells.iter().map(String::len).max().unwrap_or(0);

        if self.rank() == 0 {
            return write!(f, "{}", cells[0]);
        }
        write_block(f, self.shape(), &cells, width, 0)
    }
}

fn numpy_header<T: Scalar>(t: &Tensor<T>) -> String {
    let dims: Vec<String> = t.shape().iter().map(ToString::to_string).collect();
    let items: Vec<String> = t.data().iter().map(ToString::to_string).collect();
    format!(
        "Tensor<{}> {} : np.array([{}]).reshape({})",
        T::NAME,
        dims.join("x"),
        items.join(","),
        dims.join(","),
    )
}

// Writes one bracketed block of `shape` covering `cells`, indented by `depth`.
fn write_block(
    f: &mut fmt::Formatter<'_>,
    shape: &[usize],
    cells: &[String],
    width: usize,
    depth: usize,
) -> fmt::Result {
    f.write_str("[")?;
    if shape.len() == 1 {
        for (i, cell) in cells.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{cell:>width$}")?;
        }
        return f.write_str("]");
    }

    let run = cells.len() / shape[0];
    for (i, chunk) in cells.chunks(run).enumerate() {
        if i > 0 {
            // blank line between blocks of rank 3 and above, numpy style
            let gap = shape.len() - 1;
            for _ in 0..gap {
                f.write_str("\n")?;
            }
            write!(f, "{:indent$}", "", indent = depth + 1)?;
        }
        write_block(f, &shape[1..], chunk, width, depth + 1)?;
    }
    f.write_str("]")
}
