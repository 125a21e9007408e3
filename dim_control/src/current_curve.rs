use crate::curve::Curve;

// LED driver currents in the linear 16 bit domain, 65535 = 700 mA
pub const CURRENT_20: u16 = 1872;
pub const CURRENT_50: u16 = 4681;
pub const CURRENT_100: u16 = 9362;
pub const CURRENT_350: u16 = 32768;
pub const CURRENT_500: u16 = 46811;
pub const CURRENT_700: u16 = 65535;

pub const CURRENT_CURVE_X: [u16; 7] = [
    0,
    CURRENT_20,
    CURRENT_50,
    CURRENT_100,
    CURRENT_350,
    CURRENT_500,
    CURRENT_700,
];
pub const CURRENT_CURVE_Y: [u16; 7] = [0, 8650, 14550, 22857, 42400, 51350, 61250];

/// Measured response of the analog current control stage.
/// Maps the requested current to the control level which actually produces it.
pub static CURRENT_CURVE: Curve<'static> = Curve {
    x: &CURRENT_CURVE_X,
    y: &CURRENT_CURVE_Y,
};

/// Linearity-corrected control level, not yet inverted for the hardware
pub fn linearize(level: u16) -> u16 {
    CURRENT_CURVE.at(level)
}
