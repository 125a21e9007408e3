pub mod pin {
    /// Logical pins of the two-channel driver board
    #[derive(Clone, Debug, Eq, PartialEq, Copy)]
    pub enum Pin {
        /// On-board status LED, active high
        StatusLed,
        /// 3.3V supply of the analog current control
        AnalogSupplyEnable,
        Ch1Pwm,
        Ch1Analog,
        Ch2Pwm,
        Ch2Analog,
        /// Supply voltage through the input voltage divider
        SupplyVoltage,
        /// On-board button, active low
        Button,
    }
}

pub mod output {
    use super::pin::Pin;

    pub const PWM_MAX: u8 = 0xff;

    /// Raw writes to the board, assumed to always succeed.
    pub trait Output {
        /// Duty cycle for a timer pin. PWM pins run with 8 bit resolution, analog pins with 16 bit.
        fn write_duty(&self, pin: Pin, duty: u16);
        fn write_digital(&self, pin: Pin, high: bool);
    }
}

pub mod adc {
    use super::pin::Pin;

    /// Largest raw sample of the 10 bit ADC
    pub const ADC_MAX: u16 = 1023;

    pub trait Adc {
        fn read(&self, pin: Pin) -> u16;
    }
}

pub mod board {
    use super::adc::Adc;
    use super::output::Output;

    /// Driver board peripherals.
    pub trait Board: Output + Adc {
        /// One-time setup: pin directions, 16 bit timer for the analog pins and the ADC reference.
        /// Must run before any channel is set.
        fn init(&self);
    }
}
