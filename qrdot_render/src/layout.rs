use qrdot_core::RenderConfig;

/// Side of a finder pattern, in modules.
pub const FINDER_PATTERN_SIZE: u32 = 7;

/// Pixel geometry of a render: how big the canvas is and where each module lands on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutGeometry {
    /// Side of the module matrix, in modules.
    pub dimension: u32,
    /// Pixels per module.
    pub scale: u32,
    pub left_padding: u32,
    pub top_padding: u32,
    pub output_width: u32,
    pub output_height: u32,
}

impl LayoutGeometry {
    /// Plan the layout of a `dimension`-sided matrix according to `config`.
    ///
    /// The canvas is never smaller than the symbol plus its quiet zone at one pixel per module. The scale is the
    /// largest integer that fits the symbol and quiet zone on both axes, and the symbol is centered with any odd pixel
    /// going to the right and bottom margins.
    pub fn plan(dimension: usize, config: &RenderConfig) -> Result<Self, LayoutError> {
        if dimension == 0 {
            return Err(LayoutError::EmptyMatrix);
        }
        let dimension = u32::try_from(dimension).map_err(|_| LayoutError::Overflow)?;
        let qr_size = config
            .quiet_zone
            .checked_mul(2)
            .and_then(|quiet| quiet.checked_add(dimension))
            .ok_or(LayoutError::Overflow)?;
        let output_width = config.canvas_width.max(qr_size);
        let output_height = config.canvas_height.max(qr_size);
        let scale = std::cmp::min(output_width / qr_size, output_height / qr_size);
        if scale < 1 {
            return Err(LayoutError::CanvasTooSmall {
                width: config.canvas_width,
                height: config.canvas_height,
                modules: qr_size,
            });
        }
        let symbol_size = dimension * scale;
        let geometry = Self {
            dimension,
            scale,
            left_padding: (output_width - symbol_size) / 2,
            top_padding: (output_height - symbol_size) / 2,
            output_width,
            output_height,
        };
        log::debug!("planned layout {:?}", geometry);
        Ok(geometry)
    }

    /// Reject layouts whose canvas exceeds `max_side` pixels on either axis.
    pub fn check_limit(&self, max_side: u32) -> Result<(), LayoutError> {
        if self.output_width > max_side || self.output_height > max_side {
            return Err(LayoutError::ExceedsLimit {
                width: self.output_width,
                height: self.output_height,
                limit: max_side,
            });
        }
        Ok(())
    }

    /// Side of the symbol (without quiet zone) in pixels.
    pub fn symbol_size(&self) -> u32 {
        self.dimension * self.scale
    }

    /// Size of the shape painted for a single module, slightly smaller than the module so that neighbouring dots do
    /// not touch.
    /// # Example
    /// ```
    /// use qrdot_render::LayoutGeometry;
    /// let geometry = LayoutGeometry {
    ///     dimension: 21, scale: 13, left_padding: 63, top_padding: 63, output_width: 400, output_height: 400,
    /// };
    /// assert_eq!(geometry.inner_size(), 11);
    /// ```
    pub fn inner_size(&self) -> u32 {
        self.scale * 9 / 10
    }

    /// Side of a finder pattern in pixels.
    pub fn finder_size(&self) -> u32 {
        FINDER_PATTERN_SIZE * self.scale
    }

    /// Top-left pixel of the module at `(x, y)`.
    pub fn module_origin(&self, x: u32, y: u32) -> (u32, u32) {
        (
            self.left_padding + x * self.scale,
            self.top_padding + y * self.scale,
        )
    }

    /// Top-left pixels of the top-left, top-right and bottom-left finder patterns.
    pub fn finder_origins(&self) -> [(u32, u32); 3] {
        let far = self.dimension.saturating_sub(FINDER_PATTERN_SIZE);
        [
            self.module_origin(0, 0),
            self.module_origin(far, 0),
            self.module_origin(0, far),
        ]
    }

    /// Whether pixel `(x, y)` lies within the symbol's bounding box.
    pub fn in_symbol(&self, x: u32, y: u32) -> bool {
        let size = self.symbol_size();
        (self.left_padding..self.left_padding + size).contains(&x)
            && (self.top_padding..self.top_padding + size).contains(&y)
    }
}

/// Plan the layout of a `dimension`-sided matrix according to `config`. See [LayoutGeometry::plan].
pub fn plan(dimension: usize, config: &RenderConfig) -> Result<LayoutGeometry, LayoutError> {
    LayoutGeometry::plan(dimension, config)
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    #[error("cannot lay out an empty module matrix")]
    EmptyMatrix,
    #[error("a {width}x{height} canvas cannot fit {modules} modules per side")]
    CanvasTooSmall { width: u32, height: u32, modules: u32 },
    #[error("a {width}x{height} canvas exceeds the limit of {limit} pixels per side")]
    ExceedsLimit { width: u32, height: u32, limit: u32 },
    #[error("layout size overflows")]
    Overflow,
}
