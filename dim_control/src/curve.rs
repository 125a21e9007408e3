/// Breakpoint table for piecewise-linear lookups.
///
/// `x` must be non-decreasing and both sides must hold at least two points.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Curve<'a> {
    pub x: &'a [u16],
    pub y: &'a [u16],
}

impl<'a> Curve<'a> {
    pub fn len(&self) -> usize {
        self.x.len().min(self.y.len())
    }

    /// Interpolated y for the given x, clamped to the first and last breakpoint
    pub fn at(&self, x: u16) -> u16 {
        interpolate(self.x, self.y, self.len(), x)
    }
}

/// Linear interpolation over the first `n` breakpoints of `xs` and `ys`.
///
/// Below the first breakpoint the first y is returned, at or above the last one the last y.
/// The slope is kept as an 8 bit fixed-point fraction (`dy * 255 / dx`), results are
/// truncated towards the y of the lower breakpoint.
pub fn interpolate(xs: &[u16], ys: &[u16], n: usize, x: u16) -> u16 {
    debug_assert!(n >= 2 && n <= xs.len() && n <= ys.len());

    let mut i = 0;
    while x >= xs[i] {
        i += 1;
        if i == n {
            return ys[n - 1];
        }
    }
    if i == 0 {
        return ys[0];
    }

    // xs[lower] <= x < xs[lower + 1], so delta_x is never 0
    let lower = i - 1;
    let r = (x - xs[lower]) as u64;
    let delta_x = (xs[lower + 1] - xs[lower]) as u64;
    let y_lower = ys[lower] as u64;
    let y_upper = ys[lower + 1] as u64;

    if y_lower > y_upper {
        let slope = (y_lower - y_upper) * 255 / delta_x;
        (y_lower - slope * r / 255) as u16
    } else {
        let slope = (y_upper - y_lower) * 255 / delta_x;
        (y_lower + slope * r / 255) as u16
    }
}

/// Integer re-mapping of `x` from `[in_min, in_max]` to `[out_min, out_max]`, truncating towards zero.
pub fn map(x: i64, in_min: i64, in_max: i64, out_min: i64, out_max: i64) -> i64 {
    (x - in_min) * (out_max - out_min) / (in_max - in_min) + out_min
}

#[cfg(test)]
mod test {
    use crate::curve::{interpolate, map, Curve};

    const XS: [u16; 4] = [100, 200, 400, 1000];
    const RISING: [u16; 4] = [10, 1010, 1510, 4510];
    const FALLING: [u16; 4] = [4000, 3000, 1000, 0];

    #[test]
    fn clamps_outside_of_the_table() {
        for x in [0, 1, 50, 99].iter() {
            assert_eq!(interpolate(&XS, &RISING, 4, *x), 10);
        }
        for x in [1000, 1001, 30000, u16::MAX].iter() {
            assert_eq!(interpolate(&XS, &RISING, 4, *x), 4510);
        }
    }

    #[test]
    fn breakpoints_are_exact() {
        for i in 0..XS.len() {
            assert_eq!(interpolate(&XS, &RISING, 4, XS[i]), RISING[i]);
            assert_eq!(interpolate(&XS, &FALLING, 4, XS[i]), FALLING[i]);
        }
    }

    #[test]
    fn interpolates_between_breakpoints() {
        // slope 1000 * 255 / 100 = 2550
        assert_eq!(interpolate(&XS, &RISING, 4, 150), 510);
        // slope 500 * 255 / 200 = 637, 637 * 100 / 255 = 249
        assert_eq!(interpolate(&XS, &RISING, 4, 300), 1259);
        // slope 2000 * 255 / 200 = 2550
        assert_eq!(interpolate(&XS, &FALLING, 4, 300), 2000);
        // slope 1000 * 255 / 600 = 425, 425 * 1 / 255 = 1
        assert_eq!(interpolate(&XS, &FALLING, 4, 401), 999);
    }

    #[test]
    fn only_the_first_n_points_are_used() {
        assert_eq!(interpolate(&XS, &RISING, 2, 5000), 1010);
        assert_eq!(interpolate(&XS, &RISING, 3, 400), 1510);
    }

    #[test]
    fn rising_curve_stays_monotonic() {
        let mut prev = 0;
        for x in 0..=1100u16 {
            let y = interpolate(&XS, &RISING, 4, x);
            assert!(y >= prev, "Dropped at {}: {} < {}", x, y, prev);
            prev = y;
        }
    }

    #[test]
    fn falling_curve_stays_monotonic() {
        let mut prev = u16::MAX;
        for x in 0..=1100u16 {
            let y = interpolate(&XS, &FALLING, 4, x);
            assert!(y <= prev, "Rose at {}: {} > {}", x, y, prev);
            prev = y;
        }
    }

    #[test]
    fn repeated_breakpoints_do_not_divide_by_zero() {
        let xs = [0, 10, 10, 20];
        let ys = [0, 100, 200, 300];
        assert_eq!(interpolate(&xs, &ys, 4, 5), 50);
        assert_eq!(interpolate(&xs, &ys, 4, 10), 200);
        assert_eq!(interpolate(&xs, &ys, 4, 15), 250);
    }

    #[test]
    fn curve_uses_the_shorter_side() {
        let curve = Curve {
            x: &XS,
            y: &RISING[..3],
        };
        assert_eq!(curve.len(), 3);
        assert_eq!(curve.at(u16::MAX), 1510);
    }

    #[test]
    fn map_truncates() {
        assert_eq!(map(512, 0, 1023, 0, 57288), 28672);
        assert_eq!(map(1, 0, 1966, 0, 255), 0);
        assert_eq!(map(10, 0, 1966, 0, 255), 1);
        assert_eq!(map(65535, 0, 65535, 0, 32768), 32768);
        assert_eq!(map(32768, 0, 65535, 0, 32768), 16384);
        assert_eq!(map(5, 0, 10, 100, 200), 150);
    }
}
