use std::io;
use std::io::Stdout;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use log::*;
use structopt::StructOpt;
use tui::backend::CrosstermBackend;
use tui::layout::{Alignment, Constraint, Direction, Layout};
use tui::style::{Color, Style};
use tui::text::{Span, Spans};
use tui::widgets::{Block, BorderType, Borders, Gauge, Paragraph};
use tui::Terminal;

use dim_control::bsp::pin::Pin;
use dim_control::config::{Channel, Config, CHANNELS};
use dim_control::dimmer::{Dimmer, Mode};

use crate::options::Opts;
use crate::sim_board::SimBoard;

mod options;
mod sim_board;

const STEP: u8 = 8;

/// What the user dialed in
#[derive(Clone, Debug, Eq, PartialEq, Copy)]
struct Inputs {
    mode: Mode,
    /// Brightness, or channel 1 brightness in two channel mode
    a: u8,
    /// Colour temperature, or channel 2 brightness in two channel mode
    b: u8,
    power: bool,
}

#[derive(Debug, Eq, PartialEq)]
enum Command {
    Quit,
    Apply(Inputs),
    Power(bool),
    Nothing,
}

fn main() -> anyhow::Result<()> {
    let opts = Opts::from_args();
    opts.start_logger();

    let board = SimBoard::create(opts.supply_raw);
    let dimmer = Dimmer::with_config(
        &board,
        Config {
            analog_min: opts.analog_min,
            pwm_min: opts.pwm_min,
            current: [opts.current; CHANNELS],
        },
    );
    dimmer.begin();
    dimmer.set_status_led(true);

    let inputs = Inputs {
        mode: opts.mode,
        a: 128,
        b: 128,
        power: true,
    };
    dimmer.apply(inputs.mode, inputs.a, inputs.b);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    terminal.clear()?;

    let result = run(&mut terminal, &dimmer, &board, inputs);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    info!("Finished!");
    result
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    dimmer: &Dimmer,
    board: &SimBoard,
    mut inputs: Inputs,
) -> anyhow::Result<()> {
    loop {
        draw_tui(terminal, board, dimmer.get_voltage(), inputs)?;

        if !event::poll(Duration::from_millis(250))? {
            continue;
        }
        let code = match event::read()? {
            Event::Key(KeyEvent { code, .. }) => code,
            _ => continue,
        };

        match on_key(inputs, code) {
            Command::Quit => return Ok(()),
            Command::Apply(next) => {
                inputs = next;
                dimmer.apply(inputs.mode, inputs.a, inputs.b);
            }
            Command::Power(on) => {
                inputs.power = on;
                dimmer.set_power(on);
                dimmer.set_status_led(on);
            }
            Command::Nothing => {}
        }
    }
}

/// Arrows up/down change the brightness, left/right the colour temperature (or channel 2),
/// `m` switches the mode, `p` the analog supply, `q` or Esc quits.
/// Nothing is applied while the supply is off.
fn on_key(inputs: Inputs, code: KeyCode) -> Command {
    let next = match code {
        KeyCode::Esc | KeyCode::Char('q') => return Command::Quit,
        KeyCode::Char('p') => return Command::Power(!inputs.power),
        KeyCode::Up => Inputs {
            a: inputs.a.saturating_add(STEP),
            ..inputs
        },
        KeyCode::Down => Inputs {
            a: inputs.a.saturating_sub(STEP),
            ..inputs
        },
        KeyCode::Right => Inputs {
            b: inputs.b.saturating_add(STEP),
            ..inputs
        },
        KeyCode::Left => Inputs {
            b: inputs.b.saturating_sub(STEP),
            ..inputs
        },
        KeyCode::Char('m') => Inputs {
            mode: next_mode(inputs.mode),
            ..inputs
        },
        _ => return Command::Nothing,
    };
    if inputs.power {
        Command::Apply(next)
    } else {
        Command::Nothing
    }
}

fn next_mode(mode: Mode) -> Mode {
    match mode {
        Mode::OneChannel => Mode::TwoChannel,
        Mode::TwoChannel => Mode::Tunable,
        Mode::Tunable => Mode::OneChannel,
    }
}

fn draw_tui(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    board: &SimBoard,
    voltage_mv: u16,
    inputs: Inputs,
) -> io::Result<()> {
    terminal.draw(|rect| {
        let size = rect.size();
        let vertical_layout = Layout::default()
            .direction(Direction::Vertical)
            .margin(2)
            .constraints(
                [
                    Constraint::Length(4),
                    Constraint::Length(3),
                    Constraint::Length(3),
                    Constraint::Length(3),
                    Constraint::Length(3),
                    Constraint::Min(1),
                ]
                .as_ref(),
            )
            .split(size);

        let (a_label, b_label) = match inputs.mode {
            Mode::OneChannel => ("brightness", "-"),
            Mode::TwoChannel => ("channel 1", "channel 2"),
            Mode::Tunable => ("brightness", "colour temperature"),
        };
        let status_paragraph = Paragraph::new(vec![
            Spans::from(Span::raw(format!(
                "mode: {:?}   {}: {}   {}: {}",
                inputs.mode, a_label, inputs.a, b_label, inputs.b
            ))),
            Spans::from(Span::raw(format!(
                "supply: {}   input: {}.{:03} V",
                if board.is_high(Pin::AnalogSupplyEnable) {
                    "on"
                } else {
                    "off"
                },
                voltage_mv / 1000,
                voltage_mv % 1000
            ))),
        ])
        .alignment(Alignment::Left)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded),
        );
        rect.render_widget(status_paragraph, vertical_layout[0]);

        for channel in Channel::ALL.iter() {
            let pwm = board.duty(channel.pwm_pin());
            // analog control is inverted
            let drive = 0xffff - board.duty(channel.analog_pin());
            let colour = match channel {
                Channel::Ch1 => Color::Rgb(253, 214, 160),
                Channel::Ch2 => Color::Rgb(210, 230, 255),
            };
            let slot = 1 + channel.index() * 2;

            let pwm_gauge = Gauge::default()
                .block(
                    Block::default()
                        .title(format!("channel {} pwm", channel.number()))
                        .borders(Borders::ALL),
                )
                .gauge_style(Style::default().fg(colour))
                .label(format!("{}", pwm))
                .ratio(pwm as f64 / 255.0);
            let analog_gauge = Gauge::default()
                .block(
                    Block::default()
                        .title(format!("channel {} analog", channel.number()))
                        .borders(Borders::ALL),
                )
                .gauge_style(Style::default().fg(colour))
                .label(format!("{}", drive))
                .ratio(drive as f64 / 65535.0);

            rect.render_widget(pwm_gauge, vertical_layout[slot]);
            rect.render_widget(analog_gauge, vertical_layout[slot + 1]);
        }

        let help_paragraph = Paragraph::new(Spans::from(Span::raw(
            "up/down: brightness  left/right: colour/channel 2  m: mode  p: power  q: quit",
        )))
        .alignment(Alignment::Center);
        rect.render_widget(help_paragraph, vertical_layout[5]);
    })?;
    Ok(())
}
