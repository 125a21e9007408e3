use crate::bsp::adc::ADC_MAX;
use crate::curve::map;

/// Input voltage at the full ADC scale.
///
/// Input divider 244k7:4k7 = 52.06:1, ADC reference 1.1V:
/// 1100mV / 1024 = 1.07mV per step on the ADC input, 56mV per step on the supply input,
/// 1023 * 56mV = 57288mV.
pub const VOLTAGE_FULL_SCALE_MV: u16 = 57288;

/// Converts a raw ADC sample of the supply voltage to millivolts
pub fn raw_to_millivolts(raw: u16) -> u16 {
    let raw = raw.min(ADC_MAX);
    map(raw as i64, 0, ADC_MAX as i64, 0, VOLTAGE_FULL_SCALE_MV as i64) as u16
}

#[cfg(test)]
mod test {
    use crate::voltage::raw_to_millivolts;

    #[test]
    fn voltage_is_converted_correctly() {
        let input = [0, 1, 214, 512, 1000, 1023];
        let expected = [0, 56, 11984, 28672, 56000, 57288];
        for i in 0..input.len() {
            assert_eq!(raw_to_millivolts(input[i]), expected[i], "Failed for {}", input[i]);
        }
    }

    #[test]
    fn samples_above_10_bit_are_clamped() {
        assert_eq!(raw_to_millivolts(1024), 57288);
        assert_eq!(raw_to_millivolts(u16::MAX), 57288);
    }
}
