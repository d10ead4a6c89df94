use crate::instruction::madctl;

/// Panel rotation, applied by the controller through MADCTL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    /// Map any integer onto a rotation, modulo 4.
    pub fn from_index(index: i32) -> Self {
        match index.rem_euclid(4) {
            0 => Rotation::Deg0,
            1 => Rotation::Deg90,
            2 => Rotation::Deg180,
            _ => Rotation::Deg270,
        }
    }

    pub fn index(self) -> u8 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 1,
            Rotation::Deg180 => 2,
            Rotation::Deg270 => 3,
        }
    }

    /// Get the next rotation in the cycle
    pub fn next(self) -> Self {
        match self {
            Rotation::Deg0 => Rotation::Deg90,
            Rotation::Deg90 => Rotation::Deg180,
            Rotation::Deg180 => Rotation::Deg270,
            Rotation::Deg270 => Rotation::Deg0,
        }
    }

    /// Get rotation angle in degrees for logging
    pub fn degrees(self) -> u16 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 90,
            Rotation::Deg180 => 180,
            Rotation::Deg270 => 270,
        }
    }

    /// True for 90° and 270°, where rows and columns are exchanged.
    pub fn is_transposed(self) -> bool {
        matches!(self, Rotation::Deg90 | Rotation::Deg270)
    }

    /// MADCTL byte for this rotation.
    pub fn madctl(self, rgb: bool) -> u8 {
        let order = if rgb { madctl::RGB } else { madctl::BGR };
        let scan = match self {
            Rotation::Deg0 => madctl::MX | madctl::MY,
            Rotation::Deg90 => madctl::MY | madctl::MV,
            Rotation::Deg180 => 0,
            Rotation::Deg270 => madctl::MX | madctl::MV,
        };
        scan | order
    }

    /// Logical (width, height) of a panel with the given physical size.
    pub fn logical_size(self, width: u16, height: u16) -> (u16, u16) {
        if self.is_transposed() {
            (height, width)
        } else {
            (width, height)
        }
    }
}
