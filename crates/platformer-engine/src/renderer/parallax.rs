/// A repeating background strip that scrolls slower than the camera.
#[derive(Debug, Clone, PartialEq)]
pub struct ParallaxLayer {
    /// Fraction of the camera movement applied to this layer.
    pub factor: f32,
    /// Width of the layer image. 0 until the host reports it.
    pub width: f32,
    /// Current offset in [0, width).
    pub offset: f32,
    /// Unwrapped distance scrolled since the last reset: camera x × factor.
    travel: f32,
}

impl ParallaxLayer {
    pub fn new(factor: f32) -> Self {
        Self {
            factor,
            width: 0.0,
            offset: 0.0,
            travel: 0.0,
        }
    }

    pub fn with_width(mut self, width: f32) -> Self {
        self.set_width(width);
        self
    }

    /// Advance by a camera delta. The offset wraps modulo the image width;
    /// movement before the width is known still counts.
    pub fn scroll(&mut self, camera_delta: f32) {
        self.travel += camera_delta * self.factor;
        self.rewrap();
    }

    pub fn set_width(&mut self, width: f32) {
        self.width = width;
        self.rewrap();
    }

    pub fn reset(&mut self) {
        self.travel = 0.0;
        self.offset = 0.0;
    }

    fn rewrap(&mut self) {
        self.offset = if self.width > 0.0 {
            self.travel.rem_euclid(self.width)
        } else {
            0.0
        };
    }
}

/// Background layers, far to near.
#[derive(Debug, Clone, PartialEq)]
pub struct Parallax {
    pub layers: Vec<ParallaxLayer>,
}

impl Parallax {
    pub fn new(layers: Vec<ParallaxLayer>) -> Self {
        Self { layers }
    }

    pub fn scroll(&mut self, camera_delta: f32) {
        for layer in &mut self.layers {
            layer.scroll(camera_delta);
        }
    }

    pub fn reset(&mut self) {
        for layer in &mut self.layers {
            layer.reset();
        }
    }

    /// Record the image width of a layer once it is known.
    pub fn set_width(&mut self, index: usize, width: f32) {
        match self.layers.get_mut(index) {
            Some(layer) => layer.set_width(width),
            None => log::warn!("parallax layer {} does not exist", index),
        }
    }

    pub fn offsets(&self) -> impl Iterator<Item = f32> + '_ {
        self.layers.iter().map(|l| l.offset)
    }
}

impl Default for Parallax {
    /// A far backdrop at 0.3 and a nearer tree line at 0.6.
    fn default() -> Self {
        Self::new(vec![ParallaxLayer::new(0.3), ParallaxLayer::new(0.6)])
    }
}
