use std::fmt::Debug;

use num_traits::real::Real;
use num_traits::ToPrimitive;

/// A two-dimensional input point.
///
/// The coordinate type must implement [num_traits::real::Real], reexported
/// as [crate::Real]. All repair computation happens in `f64`; coordinates
/// are converted once when the input geometry is assembled.
pub trait Vertex {
    /// The type of the individual `x` and `y` coordinates
    type Coordinate: Real;

    /// The x [Vertex::Coordinate] value
    fn x(&self) -> Self::Coordinate;
    /// The y [Vertex::Coordinate] value
    fn y(&self) -> Self::Coordinate;

    /// The vertex as an `f64` coordinate pair.
    ///
    /// Panics if a coordinate is not representable as `f64`; every `Real`
    /// type in practical use converts losslessly enough for repair.
    #[inline]
    fn to_position(&self) -> [f64; 2] {
        let x = self.x().to_f64().unwrap_or_else(|| panic!("x coordinate not representable as f64"));
        let y = self.y().to_f64().unwrap_or_else(|| panic!("y coordinate not representable as f64"));
        [x, y]
    }
}

impl<C: Debug + Real> Vertex for [C; 2] {
    type Coordinate = C;

    #[inline(always)]
    fn x(&self) -> Self::Coordinate {
        self[0]
    }

    #[inline(always)]
    fn y(&self) -> Self::Coordinate {
        self[1]
    }
}

impl<C: Debug + Real> Vertex for (C, C) {
    type Coordinate = C;

    #[inline(always)]
    fn x(&self) -> Self::Coordinate {
        self.0
    }

    #[inline(always)]
    fn y(&self) -> Self::Coordinate {
        self.1
    }
}
