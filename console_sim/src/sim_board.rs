use std::cell::Cell;

use log::trace;

use dim_control::bsp::adc::Adc;
use dim_control::bsp::board::Board;
use dim_control::bsp::output::Output;
use dim_control::bsp::pin::Pin;

const PINS: usize = 8;

/// Board which resides in memory, for simulation
pub struct SimBoard {
    duties: [Cell<u16>; PINS],
    levels: [Cell<bool>; PINS],
    supply_raw: Cell<u16>,
    initialized: Cell<bool>,
}

impl SimBoard {
    /// Factory function to create a board with the given raw supply voltage sample
    pub fn create(supply_raw: u16) -> Self {
        SimBoard {
            duties: Default::default(),
            levels: Default::default(),
            supply_raw: Cell::new(supply_raw),
            initialized: Cell::new(false),
        }
    }

    pub fn duty(&self, pin: Pin) -> u16 {
        self.duties[index(pin)].get()
    }

    pub fn is_high(&self, pin: Pin) -> bool {
        self.levels[index(pin)].get()
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized.get()
    }

    pub fn set_supply_raw(&self, raw: u16) {
        self.supply_raw.set(raw);
    }
}

fn index(pin: Pin) -> usize {
    match pin {
        Pin::StatusLed => 0,
        Pin::AnalogSupplyEnable => 1,
        Pin::Ch1Pwm => 2,
        Pin::Ch1Analog => 3,
        Pin::Ch2Pwm => 4,
        Pin::Ch2Analog => 5,
        Pin::SupplyVoltage => 6,
        Pin::Button => 7,
    }
}

impl Output for SimBoard {
    fn write_duty(&self, pin: Pin, duty: u16) {
        trace!("{:?} <- {}", pin, duty);
        self.duties[index(pin)].set(duty);
    }

    fn write_digital(&self, pin: Pin, high: bool) {
        trace!("{:?} <- {}", pin, high);
        self.levels[index(pin)].set(high);
    }
}

impl Adc for SimBoard {
    fn read(&self, pin: Pin) -> u16 {
        match pin {
            Pin::SupplyVoltage => self.supply_raw.get(),
            _ => 0,
        }
    }
}

impl Board for SimBoard {
    fn init(&self) {
        // button is active low with the pull-up enabled
        self.levels[index(Pin::Button)].set(true);
        self.initialized.set(true);
    }
}

#[cfg(test)]
mod test {
    use dim_control::bsp::pin::Pin;
    use dim_control::dimmer::Dimmer;

    use crate::sim_board::SimBoard;

    #[test]
    fn begin_powers_up_with_channels_off() {
        let board = SimBoard::create(214);
        let dimmer = Dimmer::new(&board);
        dimmer.begin();
        assert!(board.is_initialized());
        assert!(board.is_high(Pin::AnalogSupplyEnable));
        assert!(board.is_high(Pin::Button));
        assert_eq!(board.duty(Pin::Ch1Pwm), 0);
        assert_eq!(board.duty(Pin::Ch2Pwm), 0);
        assert_eq!(board.duty(Pin::Ch1Analog), 56688);
    }

    #[test]
    fn supply_voltage_is_read_from_the_adc() {
        let board = SimBoard::create(214);
        let dimmer = Dimmer::new(&board);
        assert_eq!(dimmer.get_voltage(), 11984);
        board.set_supply_raw(512);
        assert_eq!(dimmer.get_voltage(), 28672);
    }
}
