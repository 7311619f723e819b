//! Host simulator for the board controls.
//!
//! Reads commands from stdin and feeds them to the controller through the
//! same channels the hardware would use: rotary detents become deltas on a
//! tick thread that mutates the shared cursor, and confirm presses become
//! raw button samples. Commands, one per line:
//!
//!   +N / -N   rotate N detents (bare + / - rotate one)
//!   .         press the confirm button
//!   b         print the raw board
//!   q         quit

use std::io::{self, BufRead, Write};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use quince_chess::game::controller::{ControllerStatus, GameController};
use quince_chess::game::session::GameSession;
use quince_chess::hal::cursor::SharedCursor;
use quince_chess::hal::display::TerminalDisplay;
use quince_chess::hal::input::{QueueButton, QueueEncoder, RotaryEncoder};
use quince_chess::utils::render::render_position;

fn main() {
    let cursor = Arc::new(SharedCursor::new(0));
    let button = QueueButton::new();
    let encoder = QueueEncoder::new();
    let mut controller = GameController::new(
        GameSession::new(),
        Arc::clone(&cursor),
        TerminalDisplay::new(),
        button.clone(),
    );

    // Tick thread: drains the encoder into the cursor asynchronously, the
    // way the encoder interrupt does on hardware.
    let mut tick_encoder = encoder.clone();
    let tick_cursor = Arc::clone(&cursor);
    thread::spawn(move || loop {
        let delta = tick_encoder.take_delta();
        if delta != 0 {
            tick_cursor.apply_delta(delta);
        }
        thread::sleep(Duration::from_millis(2));
    });

    let stdout = io::stdout();
    present(&controller, &mut stdout.lock());

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        line.clear();
        let Ok(n) = stdin.lock().read_line(&mut line) else {
            break;
        };
        if n == 0 {
            break;
        }

        match line.trim() {
            "q" => break,
            "b" => {
                println!("{}", render_position(controller.session().position()));
                continue;
            }
            "." => button.push_press(),
            command => {
                let delta: i8 = match command {
                    "+" => 1,
                    "-" => -1,
                    other => other.parse().unwrap_or(0),
                };
                if delta != 0 {
                    encoder.push(delta);
                }
            }
        }

        // Let the tick thread land before polling.
        thread::sleep(Duration::from_millis(10));
        for _ in 0..4 {
            controller.poll();
        }
        present(&controller, &mut stdout.lock());

        if let ControllerStatus::Finished(_) = controller.status() {
            println!("(game over; 'b' shows the final board, 'q' quits)");
        }
    }
}

fn present(controller: &GameController<TerminalDisplay, QueueButton>, out: &mut impl Write) {
    if controller.display().present(out).is_err() {
        std::process::exit(1);
    }
}
