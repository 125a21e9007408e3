use crate::bsp::pin::Pin;
use crate::current_curve::CURRENT_350;

/// Number of hardware channels
pub const CHANNELS: usize = 2;

/// Default transition between analog and PWM dimming, 3% of the linear range
pub const ANALOG_MIN: u16 = 1966;

/// Default minimum PWM duty, 5/255 = 2% of 3%
pub const PWM_MIN: u8 = 5;

/// Output channel of the driver board. Channels are numbered from 1.
#[derive(Clone, Debug, Eq, PartialEq, Copy)]
pub enum Channel {
    Ch1,
    Ch2,
}

impl Channel {
    pub const ALL: [Channel; CHANNELS] = [Channel::Ch1, Channel::Ch2];

    pub fn from_number(channel: u8) -> Option<Channel> {
        match channel {
            1 => Some(Channel::Ch1),
            2 => Some(Channel::Ch2),
            _ => None,
        }
    }

    pub fn number(self) -> u8 {
        self.index() as u8 + 1
    }

    pub fn index(self) -> usize {
        match self {
            Channel::Ch1 => 0,
            Channel::Ch2 => 1,
        }
    }

    pub fn pwm_pin(self) -> Pin {
        match self {
            Channel::Ch1 => Pin::Ch1Pwm,
            Channel::Ch2 => Pin::Ch2Pwm,
        }
    }

    /// Analog current control, inverted by the hardware
    pub fn analog_pin(self) -> Pin {
        match self {
            Channel::Ch1 => Pin::Ch1Analog,
            Channel::Ch2 => Pin::Ch2Analog,
        }
    }
}

/// Dimming parameters of one driver.
/// Changes take effect on the next channel update, ordering of the values is not validated.
#[derive(Clone, Debug, Eq, PartialEq, Copy)]
pub struct Config {
    /// Linear value below which PWM carries the dimming
    pub analog_min: u16,
    /// Smallest non-zero PWM duty
    pub pwm_min: u8,
    /// Output current at 100% for each channel
    pub current: [u16; CHANNELS],
}

impl Default for Config {
    fn default() -> Self {
        Config {
            analog_min: ANALOG_MIN,
            pwm_min: PWM_MIN,
            current: [CURRENT_350; CHANNELS],
        }
    }
}

impl Config {
    pub fn current(&self, channel: Channel) -> u16 {
        self.current[channel.index()]
    }
}
