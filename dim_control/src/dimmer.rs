use log::{debug, trace, warn};
use no_std_compat::cell::Cell;

use crate::brightness_curve::brightness_to_linear;
use crate::bsp::board::Board;
use crate::bsp::output::PWM_MAX;
use crate::bsp::pin::Pin;
use crate::config::{Channel, Config, CHANNELS};
use crate::current_curve::linearize;
use crate::curve::map;
use crate::voltage::raw_to_millivolts;

/// How a brightness (and colour) request is spread over the channels
#[derive(Clone, Debug, Eq, PartialEq, Copy)]
pub enum Mode {
    /// Both channels linked
    OneChannel,
    /// Individual channel control
    TwoChannel,
    /// Tunable white, channel 1 warm and channel 2 cool
    Tunable,
}

/// Values written to the two pins of a channel
#[derive(Clone, Debug, Eq, PartialEq, Copy)]
pub struct ChannelOutput {
    pub pwm: u8,
    /// Linearity-corrected and inverted analog control level
    pub analog: u16,
}

/// Splits a linear 16 bit dimming value into PWM duty and analog level.
///
/// The value is first scaled to the channel current. Above `analog_min` the current is
/// controlled by the analog level with PWM fully on, below it the analog level is parked
/// at `analog_min` and PWM takes over. Non-zero duties are never below `pwm_min`.
pub fn channel_output(config: &Config, channel: Channel, value: u16) -> ChannelOutput {
    let analog_min = config.analog_min;
    let value = map(value as i64, 0, 0xffff, 0, config.current(channel) as i64) as u16;

    let (pwm, analog) = if value == 0 {
        (0, analog_min)
    } else if value < analog_min {
        let pwm = map(value as i64, 0, analog_min as i64, 0, PWM_MAX as i64) as u8;
        if pwm > 0 && pwm < config.pwm_min {
            (config.pwm_min, analog_min)
        } else {
            (pwm, analog_min)
        }
    } else {
        (PWM_MAX, value)
    };

    ChannelOutput {
        pwm,
        analog: 0xffff - linearize(analog),
    }
}

/// Splits a perceived brightness into (warm, cool) linear values.
/// The sum always equals the linear value of the brightness.
pub fn tunable_split(brightness: u8, colortemp: u8) -> (u16, u16) {
    let linear = brightness_to_linear(brightness);
    let cool = map(colortemp as i64, 0, 255, 0, linear as i64) as u16;
    (linear - cool, cool)
}

/// Driver for the two LED channels.
///
/// Requests for channels other than 1 and 2 are ignored.
pub struct Dimmer<'a> {
    board: &'a dyn Board,
    config: Cell<Config>,
}

impl<'a> Dimmer<'a> {
    pub fn new(board: &'a dyn Board) -> Self {
        Self::with_config(board, Config::default())
    }

    pub fn with_config(board: &'a dyn Board, config: Config) -> Self {
        Dimmer {
            board,
            config: Cell::new(config),
        }
    }

    pub fn config(&self) -> Config {
        self.config.get()
    }

    /// Sets up the board, parks the analog control level and powers the analog stage.
    pub fn begin(&self) {
        self.board.init();
        self.set_brightness(0);
        self.set_power(true);
    }

    /// Enables or disables the analog supply. Channels are switched off before the supply goes down,
    /// switching on only enables the supply and the channels keep their last setting.
    pub fn set_power(&self, on: bool) {
        debug!("Analog supply {}", if on { "on" } else { "off" });
        if !on {
            self.set_brightness(0);
        }
        self.board.write_digital(Pin::AnalogSupplyEnable, on);
    }

    pub fn set_status_led(&self, on: bool) {
        self.board.write_digital(Pin::StatusLed, on);
    }

    /// Sets one channel (1 or 2) to a linear 16 bit dimming value
    pub fn set_channel(&self, channel: u8, value: u16) {
        match Channel::from_number(channel) {
            Some(channel) => self.write_channel(channel, value),
            None => warn!("Ignoring value {} for channel {}", value, channel),
        }
    }

    /// Sets both channels to the same perceived brightness
    pub fn set_brightness(&self, value: u8) {
        let linear = brightness_to_linear(value);
        for channel in Channel::ALL.iter() {
            self.write_channel(*channel, linear);
        }
    }

    /// Sets the perceived brightness of one channel
    pub fn set_channel_brightness(&self, channel: u8, value: u8) {
        self.set_channel(channel, brightness_to_linear(value));
    }

    /// Sets brightness and colour balance. Colour temperature 0 is all warm (channel 1),
    /// 255 all cool (channel 2).
    pub fn set_tunable(&self, brightness: u8, colortemp: u8) {
        let (warm, cool) = tunable_split(brightness, colortemp);
        self.write_channel(Channel::Ch1, warm);
        self.write_channel(Channel::Ch2, cool);
    }

    /// Routes a request according to the dimming mode.
    /// `a` is the brightness (channel 1 brightness for [Mode::TwoChannel]),
    /// `b` is the channel 2 brightness or the colour temperature, unused for [Mode::OneChannel].
    pub fn apply(&self, mode: Mode, a: u8, b: u8) {
        match mode {
            Mode::OneChannel => self.set_brightness(a),
            Mode::TwoChannel => {
                self.set_channel_brightness(Channel::Ch1.number(), a);
                self.set_channel_brightness(Channel::Ch2.number(), b);
            }
            Mode::Tunable => self.set_tunable(a, b),
        }
    }

    /// Sets the maximum LED current of all channels
    pub fn set_current(&self, current: u16) {
        debug!("Current of all channels: {}", current);
        self.modify_config(|config| Config {
            current: [current; CHANNELS],
            ..config
        });
    }

    /// Sets the maximum LED current of one channel (1 or 2)
    pub fn set_channel_current(&self, channel: u8, current: u16) {
        match Channel::from_number(channel) {
            Some(channel) => {
                debug!("Current of channel {}: {}", channel.number(), current);
                self.modify_config(|mut config| {
                    config.current[channel.index()] = current;
                    config
                });
            }
            None => warn!("Ignoring current {} for channel {}", current, channel),
        }
    }

    /// Transition point between analog and PWM dimming, used from the next channel update on
    pub fn set_analog_min(&self, value: u16) {
        debug!("Analog min: {}", value);
        self.modify_config(|config| Config {
            analog_min: value,
            ..config
        });
    }

    /// Lowest non-zero PWM duty, used from the next channel update on
    pub fn set_pwm_min(&self, value: u8) {
        debug!("PWM min: {}", value);
        self.modify_config(|config| Config {
            pwm_min: value,
            ..config
        });
    }

    /// Supply voltage in mV
    pub fn get_voltage(&self) -> u16 {
        raw_to_millivolts(self.board.read(Pin::SupplyVoltage))
    }

    fn modify_config(&self, f: impl FnOnce(Config) -> Config) {
        self.config.set(f(self.config.get()));
    }

    fn write_channel(&self, channel: Channel, value: u16) {
        let output = channel_output(&self.config.get(), channel, value);
        trace!(
            "Channel {}: value {} -> pwm {}, analog {}",
            channel.number(),
            value,
            output.pwm,
            output.analog
        );
        self.board.write_duty(channel.analog_pin(), output.analog);
        self.board.write_duty(channel.pwm_pin(), output.pwm as u16);
    }
}
