use bitvec::vec::BitVec;

/// Module (one logical cell) of a QR symbol.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Module {
    Light,
    Dark,
}

impl Module {
    /// Whether the module is painted with the foreground color.
    /// # Example
    /// ```
    /// use qrdot_core::Module;
    /// assert!(Module::Dark.is_dark());
    /// assert!(!Module::Light.is_dark());
    /// ```
    pub fn is_dark(self) -> bool {
        self == Module::Dark
    }
}

impl From<bool> for Module {
    fn from(value: bool) -> Self {
        match value {
            true => Module::Dark,
            false => Module::Light,
        }
    }
}

impl From<Module> for bool {
    fn from(value: Module) -> Self {
        match value {
            Module::Dark => true,
            Module::Light => false,
        }
    }
}

/// A square grid of modules, stored row by row. Position `(x, y)` is column `x` of row `y`.
#[derive(Clone, PartialEq, Eq)]
pub struct ModuleMatrix {
    data: BitVec,
    dimension: usize,
}

impl ModuleMatrix {
    /// Return a matrix of side `dimension` filled with `module`.
    pub fn filled(dimension: usize, module: Module) -> Self {
        Self {
            data: BitVec::repeat(module.into(), dimension * dimension),
            dimension,
        }
    }

    /// Build a matrix of side `dimension` from `modules` given in row-major order. Returns `None` if the number of
    /// modules is not exactly `dimension * dimension`.
    /// # Example
    /// ```
    /// use qrdot_core::{Module, ModuleMatrix};
    /// let matrix = ModuleMatrix::from_modules(2, [Module::Dark, Module::Light, Module::Light, Module::Dark]);
    /// assert_eq!(matrix.unwrap().get(1, 1), Some(Module::Dark));
    /// assert!(ModuleMatrix::from_modules(3, [Module::Dark]).is_none());
    /// ```
    pub fn from_modules<I>(dimension: usize, modules: I) -> Option<Self>
    where
        I: IntoIterator<Item = Module>,
    {
        let data: BitVec = modules.into_iter().map(bool::from).collect();
        if data.len() == dimension * dimension {
            Some(Self { data, dimension })
        } else {
            None
        }
    }

    /// Get the side length of the matrix, in modules.
    #[inline]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Get the 1D index of position `(x, y)`, checking for validity.
    #[inline]
    fn linearized_index(&self, x: usize, y: usize) -> Option<usize> {
        if x < self.dimension && y < self.dimension {
            Some(self.dimension * y + x)
        } else {
            None
        }
    }

    /// Get the module at position `(x, y)`.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<Module> {
        self.data
            .get(self.linearized_index(x, y)?)
            .map(|bit| Module::from(*bit))
    }

    /// Whether the module at `(x, y)` is dark. Out of bounds positions are light.
    #[inline]
    pub fn is_dark(&self, x: usize, y: usize) -> bool {
        self.get(x, y).is_some_and(Module::is_dark)
    }

    /// Set the module at position `(x, y)`.
    /// # Panics
    /// Panics if position `(x, y)` is out of bounds.
    #[inline]
    pub fn set(&mut self, x: usize, y: usize, module: Module) {
        let index = self.linearized_index(x, y).unwrap_or_else(|| {
            panic!(
                "index out of bounds: the dimension is {} but the position is ({}, {})",
                self.dimension, x, y
            )
        });
        self.data.set(index, module.into())
    }

    /// Iterate over the `(x, y)` positions of all dark modules, row by row.
    pub fn dark_modules(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let dimension = self.dimension;
        self.data
            .iter_ones()
            .map(move |index| (index % dimension, index / dimension))
    }

    /// Count the dark modules.
    pub fn count_dark(&self) -> usize {
        self.data.count_ones()
    }
}

impl std::fmt::Debug for ModuleMatrix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "ModuleMatrix({0}x{0}) {{", self.dimension)?;
        for y in 0..self.dimension {
            write!(f, "    ")?;
            for x in 0..self.dimension {
                let c = if self.is_dark(x, y) { '#' } else { '.' };
                write!(f, "{}", c)?;
            }
            writeln!(f)?;
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_filled_matrix() {
        let matrix = ModuleMatrix::filled(21, Module::Light);
        assert_eq!(matrix.dimension(), 21);
        assert_eq!(matrix.count_dark(), 0);
        assert_eq!(matrix.get(20, 20), Some(Module::Light));
        assert_eq!(matrix.get(21, 0), None);
    }

    #[test]
    fn test_set_uses_column_then_row() {
        let mut matrix = ModuleMatrix::filled(5, Module::Light);
        matrix.set(3, 1, Module::Dark);
        assert!(matrix.is_dark(3, 1));
        assert!(!matrix.is_dark(1, 3));
        assert_eq!(matrix.dark_modules().collect::<Vec<_>>(), vec![(3, 1)]);
    }

    #[test]
    fn test_dark_modules_are_row_major() {
        let mut matrix = ModuleMatrix::filled(4, Module::Light);
        matrix.set(2, 0, Module::Dark);
        matrix.set(0, 3, Module::Dark);
        matrix.set(1, 1, Module::Dark);
        let positions: Vec<_> = matrix.dark_modules().collect();
        assert_eq!(positions, vec![(2, 0), (1, 1), (0, 3)]);
    }

    #[test]
    #[should_panic(expected = "index out of bounds: the dimension is 3 but the position is (3, 0)")]
    fn test_set_out_of_bounds() {
        let mut matrix = ModuleMatrix::filled(3, Module::Light);
        matrix.set(3, 0, Module::Dark);
    }
}
