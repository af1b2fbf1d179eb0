use anyhow::{bail, Error};
use scalc::{Config, Session};
use std::io::BufRead;
use std::io::Write;

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Error> {
    let config = Config::from_env()?;
    let mut session = Session::new(config);

    let args = std::env::args_os().skip(1);
    let stdout = std::io::stdout();
    let lock = stdout.lock();
    let mut w = std::io::BufWriter::new(lock);

    if args.len() > 0 {
        let mut expr = String::new();
        for arg in args {
            let Some(utf8_arg) = arg.to_str() else {
                bail!("Arguments contain invalid UTF-8 string");
            };
            if !expr.is_empty() {
                expr.push(' ');
            }
            expr.push_str(utf8_arg);
        }

        let entry = session.submit(&expr)?;
        writeln!(&mut w, "{}", entry.result)?;
    } else {
        let stdin = std::io::stdin();
        let reader = std::io::BufReader::new(stdin);
        let is_interactive = atty::is(atty::Stream::Stdin);

        if is_interactive {
            write!(&mut w, ">>> ")?;
            w.flush()?;
        }

        for line in reader.lines() {
            let line = line?;
            let line = line.trim();

            if let Some(command) = line.strip_prefix(':') {
                run_command(&mut session, command, &mut w)?;
            } else if !line.is_empty() {
                session.type_text(line);
                match session.evaluate() {
                    Ok(entry) => writeln!(&mut w, "{}", entry.result)?,
                    Err(e) => writeln!(&mut w, "error: {}", e)?,
                }
            }

            if is_interactive {
                write!(&mut w, ">>> ")?;
                w.flush()?;
            }
        }
    }
    w.flush()?;

    Ok(())
}

fn run_command(session: &mut Session, command: &str, w: &mut impl Write) -> Result<(), Error> {
    let mut words = command.split_whitespace();
    match (words.next(), words.next()) {
        (Some("history"), None) => {
            for (i, entry) in session.history().enumerate() {
                writeln!(w, "{}: {} = {}", i, entry.expression, entry.result)?;
            }
        }
        (Some("clear"), None) => session.clear(),
        (Some("reuse"), Some(index)) => {
            let recalled = index.parse().ok().and_then(|i| session.recall(i));
            match recalled {
                Some(result) => writeln!(w, "{}", result)?,
                None => writeln!(w, "error: no history entry {}", index)?,
            }
        }
        _ => writeln!(w, "error: unknown command :{}", command)?,
    }
    Ok(())
}
