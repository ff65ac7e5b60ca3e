mod color;
mod config;
mod matrix;
mod meta;

pub use color::Color;
pub use config::{RenderConfig, RenderOptions, ShapeStyle, UnknownShapeStyle};
pub use config::{DEFAULT_CANVAS_SIZE, DEFAULT_QUIET_ZONE};
pub use matrix::{Module, ModuleMatrix};
pub use meta::{Ecl, Meta, UnknownEcl, Version};

/// An encoded QR symbol: its module matrix together with the metadata it was encoded with.
#[derive(Debug)]
pub struct Symbol {
    matrix: ModuleMatrix,
    meta: Meta,
}

impl Symbol {
    /// Construct a new [Symbol]. Returns `None` if the matrix dimension does not match the [Version] in `meta`.
    pub fn new(matrix: ModuleMatrix, meta: Meta) -> Option<Self> {
        if matrix.dimension() == meta.dimension() {
            Some(Self { matrix, meta })
        } else {
            None
        }
    }

    /// Get the module matrix.
    pub fn matrix(&self) -> &ModuleMatrix {
        &self.matrix
    }

    /// Get the metadata.
    pub fn meta(&self) -> &Meta {
        &self.meta
    }

    /// Side length of the symbol in modules.
    pub fn dimension(&self) -> usize {
        self.matrix.dimension()
    }
}

impl AsRef<ModuleMatrix> for Symbol {
    fn as_ref(&self) -> &ModuleMatrix {
        self.matrix()
    }
}

impl From<Symbol> for ModuleMatrix {
    fn from(value: Symbol) -> Self {
        value.matrix
    }
}
