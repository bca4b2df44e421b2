// Tessel: an i3-style tiling shell driven over stdin.
// Each input line is a command (`focus left`, `workspace 3`, ...) or a host
// pointer event (`pointer down 640 300`); after every line that changes
// something, the render plan of the active workspace is written to stdout
// as one JSON object.

mod input;
mod registry;
mod settings;
mod shell;

use std::io::{self, BufRead, Write};

use shell::Shell;

fn main() {
    env_logger::init();

    let settings = settings::load_settings();
    log::info!(
        "Starting with a {}x{} screen",
        settings.screen.width,
        settings.screen.height
    );
    let mut shell = Shell::new(&settings);

    if let Err(e) = run(&mut shell, io::stdin().lock(), io::stdout().lock()) {
        log::error!("Output failed: {}", e);
        std::process::exit(1);
    }
}

/// Feed every line of `reader` to the shell, writing a plan after each
/// change. Blank lines and `#` comments are skipped.
fn run(shell: &mut Shell, reader: impl BufRead, mut out: impl Write) -> io::Result<()> {
    write_plan(shell, &mut out)?;

    for (number, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        match input::parse_line(trimmed) {
            Ok(parsed) => {
                let changed = shell.handle(parsed);
                log::debug!("line {}: {:?} (changed: {})", number + 1, trimmed, changed);
                if changed {
                    write_plan(shell, &mut out)?;
                }
            }
            Err(e) => log::warn!("line {}: {}", number + 1, e),
        }
    }
    Ok(())
}

fn write_plan(shell: &Shell, out: &mut impl Write) -> io::Result<()> {
    serde_json::to_writer(&mut *out, &shell.render_plan())?;
    out.write_all(b"\n")?;
    out.flush()
}
