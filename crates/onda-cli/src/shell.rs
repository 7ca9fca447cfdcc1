//! The read-line/act/print loop.
//!
//! Interpreter state is one explicit value: the session plus the stream
//! conventions every load, save and play call follows. The loop reads a
//! line, classifies it through [`Command::parse`], mutates the session
//! and prints feedback. Commands that address a wave go through the
//! session's active cursor and refuse to run when nothing is selected.
//!
//! The reader and writer are generics so the whole loop runs against
//! in-memory buffers in tests.

use crate::command::Command;
use onda_core::{Session, Wave};
use onda_io::ByteOrder;
use std::io::{BufRead, Write};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Name given to a wave created without one.
const UNNAMED: &str = "[no name]";

/// Stream conventions applied to every load, save and play.
#[derive(Debug, Clone, Copy)]
pub struct StreamDefaults {
    /// Byte order of streams on disk.
    pub order: ByteOrder,
    /// Sample rate applied to loaded streams.
    pub sample_rate: u32,
    /// Channel count applied to loaded streams.
    pub channels: u16,
}

/// The interpreter.
pub struct Shell {
    session: Session,
    defaults: StreamDefaults,
    output_device: Option<String>,
    interrupt: Arc<AtomicBool>,
}

impl Shell {
    /// Build a shell around an already-populated session.
    pub fn new(
        session: Session,
        defaults: StreamDefaults,
        output_device: Option<String>,
        interrupt: Arc<AtomicBool>,
    ) -> Self {
        Self {
            session,
            defaults,
            output_device,
            interrupt,
        }
    }

    /// Run the loop until `q` or end of input.
    pub fn run<R: BufRead, W: Write>(&mut self, input: &mut R, out: &mut W) -> std::io::Result<()> {
        loop {
            self.prompt(out)?;
            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                writeln!(out)?;
                return Ok(());
            }
            if !self.dispatch(Command::parse(&line), input, out)? {
                return Ok(());
            }
        }
    }

    fn prompt<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        match self.session.active_index() {
            Some(index) => write!(out, "[wave: {index}]:")?,
            None => write!(out, ":")?,
        }
        out.flush()
    }

    /// Execute one parsed command. Returns `false` when the loop should
    /// stop.
    fn dispatch<R: BufRead, W: Write>(
        &mut self,
        cmd: Command,
        input: &mut R,
        out: &mut W,
    ) -> std::io::Result<bool> {
        match cmd {
            Command::Quit => return Ok(false),
            Command::Comment => {}
            Command::Unknown => writeln!(out, "?")?,
            Command::List => self.list(out)?,
            Command::New(name) => self.new_wave(name, input, out)?,
            Command::Select(index) => {
                if let Err(err) = self.session.select(index) {
                    writeln!(out, "{err}")?;
                }
            }
            Command::Info => self.info(out)?,
            Command::Edit(path) => self.load(&path, out)?,
            Command::Write(path) => self.write_wave(&path, out)?,
            Command::Play => self.play(out)?,
            Command::Dump => self.dump(out)?,
            Command::Reverse => match self.session.active_wave_mut() {
                Ok(wave) => wave.reverse_selection(),
                Err(err) => writeln!(out, "{err}")?,
            },
            Command::Volume(factor) => match self.session.active_wave_mut() {
                Ok(wave) => wave.scale_selection(factor),
                Err(err) => writeln!(out, "{err}")?,
            },
            Command::Bound {
                bound,
                op,
                amount,
                unit,
            } => match self.session.active_wave_mut() {
                Ok(wave) => wave.set_bound(bound, op, amount, unit),
                Err(err) => writeln!(out, "{err}")?,
            },
        }
        Ok(true)
    }

    fn list<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        for (index, wave) in self.session.iter().enumerate() {
            writeln!(out, "[{index}]: \"{}\"", wave.name)?;
        }
        Ok(())
    }

    fn new_wave<R: BufRead, W: Write>(
        &mut self,
        name: String,
        input: &mut R,
        out: &mut W,
    ) -> std::io::Result<()> {
        let name = if name.is_empty() {
            write!(out, "name [blank for default]: ")?;
            out.flush()?;
            let mut line = String::new();
            input.read_line(&mut line)?;
            match line.trim() {
                "" => UNNAMED.to_string(),
                given => given.to_string(),
            }
        } else {
            name
        };
        let index = self.session.add(Wave::new(name.clone()));
        writeln!(out, "[{index}]: \"{name}\"")?;
        Ok(())
    }

    fn info<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        let wave = match self.session.active_wave() {
            Ok(wave) => wave,
            Err(err) => return writeln!(out, "{err}"),
        };
        let range = wave.selection();
        writeln!(out, "Name:        {}", wave.name)?;
        writeln!(out, "Sample Rate: {} Hz", wave.sample_rate)?;
        writeln!(out, "Channels:    {}", wave.channels)?;
        writeln!(out, "Length:      {:.6}s", wave.duration_secs())?;
        writeln!(
            out,
            "Selection:   {:.6}s .. {:.6}s ({:.6}s)",
            wave.offset_secs(range.start),
            wave.offset_secs(range.end),
            wave.offset_secs(range.len()),
        )?;
        writeln!(
            out,
            "Modified:    {}",
            if wave.is_modified() { "yes" } else { "no" }
        )?;
        Ok(())
    }

    fn load<W: Write>(&mut self, path: &str, out: &mut W) -> std::io::Result<()> {
        if path.is_empty() {
            return writeln!(out, "?");
        }
        let d = self.defaults;
        match onda_io::load_wave(path, d.order, d.sample_rate, d.channels) {
            Ok(wave) => {
                let index = self.session.add_and_select(wave);
                writeln!(out, "[{index}]: \"{path}\"")?;
            }
            Err(err) => writeln!(out, "{err}")?,
        }
        Ok(())
    }

    fn write_wave<W: Write>(&self, path: &str, out: &mut W) -> std::io::Result<()> {
        let wave = match self.session.active_wave() {
            Ok(wave) => wave,
            Err(err) => return writeln!(out, "{err}"),
        };
        let target = if path.is_empty() { wave.name.as_str() } else { path };
        match onda_io::save_wave(wave, target, self.defaults.order) {
            Ok(()) => writeln!(out, "wrote \"{target}\"")?,
            Err(err) => writeln!(out, "{err}")?,
        }
        Ok(())
    }

    fn play<W: Write>(&mut self, out: &mut W) -> std::io::Result<()> {
        let wave = match self.session.active_wave() {
            Ok(wave) => wave,
            Err(err) => return writeln!(out, "{err}"),
        };
        writeln!(out, "playing \"{}\" ({:.6}s)", wave.name, wave.duration_secs())?;
        out.flush()?;

        self.interrupt.store(false, Ordering::SeqCst);
        let samples: Arc<[f32]> = wave.samples().into();
        if let Err(err) = onda_io::play(
            samples,
            wave.channels,
            wave.sample_rate,
            self.output_device.as_deref(),
            Arc::clone(&self.interrupt),
        ) {
            writeln!(out, "{err}")?;
        }
        Ok(())
    }

    fn dump<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        let wave = match self.session.active_wave() {
            Ok(wave) => wave,
            Err(err) => return writeln!(out, "{err}"),
        };
        for (index, sample) in wave.samples().iter().enumerate() {
            writeln!(out, "[{index:6}]: {sample:.6}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use onda_io::{read_samples, write_samples};
    use std::io::Cursor;

    fn test_shell(session: Session) -> Shell {
        Shell::new(
            session,
            StreamDefaults {
                order: ByteOrder::Little,
                sample_rate: 2,
                channels: 2,
            },
            None,
            Arc::new(AtomicBool::new(false)),
        )
    }

    fn run_script(shell: &mut Shell, script: &str) -> String {
        let mut input = Cursor::new(script.to_string());
        let mut out = Vec::new();
        shell.run(&mut input, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn unknown_input_prints_question_mark() {
        let mut shell = test_shell(Session::new());
        let out = run_script(&mut shell, "frobnicate\nq\n");
        assert!(out.contains("?\n"));
    }

    #[test]
    fn empty_line_prints_question_mark() {
        let mut shell = test_shell(Session::new());
        let out = run_script(&mut shell, "\nq\n");
        assert!(out.contains("?\n"));
    }

    #[test]
    fn comment_lines_are_ignored() {
        let mut shell = test_shell(Session::new());
        let out = run_script(&mut shell, "# nothing to see\nq\n");
        assert!(!out.contains('?'));
    }

    #[test]
    fn eof_terminates_the_loop() {
        let mut shell = test_shell(Session::new());
        let out = run_script(&mut shell, "l\n");
        assert!(out.ends_with('\n'));
    }

    #[test]
    fn new_and_list() {
        let mut shell = test_shell(Session::new());
        let out = run_script(&mut shell, "n lead\nl\nq\n");
        assert!(out.contains("[0]: \"lead\""));
    }

    #[test]
    fn new_with_blank_name_prompts() {
        let mut shell = test_shell(Session::new());
        let out = run_script(&mut shell, "n\n\nl\nq\n");
        assert!(out.contains("name [blank for default]: "));
        assert!(out.contains("[0]: \"[no name]\""));
    }

    #[test]
    fn new_prompt_accepts_a_name() {
        let mut shell = test_shell(Session::new());
        let out = run_script(&mut shell, "n\npad\nl\nq\n");
        assert!(out.contains("[0]: \"pad\""));
    }

    #[test]
    fn select_out_of_range_reports_and_keeps_cursor() {
        let mut session = Session::new();
        session.add(Wave::new("a"));
        session.add(Wave::new("b"));
        let mut shell = test_shell(session);

        let out = run_script(&mut shell, "s 0\ns 5\ni\nq\n");
        assert!(out.contains("wave [5] doesn't exist"));
        // Still on wave 0: the prompt shows it and info answers for it.
        assert!(out.contains("[wave: 0]:"));
        assert!(out.contains("Name:        a"));
    }

    #[test]
    fn edits_without_selection_are_refused() {
        let mut shell = test_shell(Session::new());
        let out = run_script(&mut shell, ":rev\n:vol/0.5\nL=1\ni\nw x\n:dump\np\nq\n");
        assert_eq!(out.matches("no wave selected").count(), 7);
    }

    #[test]
    fn prompt_reflects_selection() {
        let mut session = Session::new();
        session.add(Wave::new("a"));
        let mut shell = test_shell(session);

        let out = run_script(&mut shell, "s 0\nq\n");
        assert!(out.starts_with(':'));
        assert!(out.contains("[wave: 0]:"));
    }

    #[test]
    fn load_edit_write_cycle() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("in.f32");
        let dst = dir.path().join("out.f32");
        write_samples(
            &src,
            &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0],
            ByteOrder::Little,
        )
        .unwrap();

        let mut shell = test_shell(Session::new());
        let script = format!(":rev\ne {}\n:rev\nw {}\nq\n", src.display(), dst.display());
        let out = run_script(&mut shell, &script);

        // The first :rev ran before anything was loaded.
        assert!(out.contains("no wave selected"));
        assert!(out.contains("wrote"));

        let written = read_samples(&dst, ByteOrder::Little).unwrap();
        assert_eq!(written, vec![7.0, 8.0, 5.0, 6.0, 3.0, 4.0, 1.0, 2.0]);
    }

    #[test]
    fn bound_in_seconds_then_volume() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("in.f32");
        let dst = dir.path().join("out.f32");
        write_samples(&src, &[1.0; 8], ByteOrder::Little).unwrap();

        // Defaults: rate 2, 2 channels — L=1s lands on raw sample 4.
        let mut shell = test_shell(Session::new());
        let script = format!("e {}\nL=1s\n:vol/0.5\nw {}\nq\n", src.display(), dst.display());
        run_script(&mut shell, &script);

        let written = read_samples(&dst, ByteOrder::Little).unwrap();
        assert_eq!(written, vec![1.0, 1.0, 1.0, 1.0, 0.5, 0.5, 0.5, 0.5]);
    }

    #[test]
    fn write_with_empty_path_uses_wave_name() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("take.f32");
        write_samples(&src, &[0.25, -0.25], ByteOrder::Little).unwrap();

        let mut shell = test_shell(Session::new());
        let script = format!("e {}\n:vol/2\nw\nq\n", src.display());
        let out = run_script(&mut shell, &script);
        assert!(out.contains("wrote"));

        let written = read_samples(&src, ByteOrder::Little).unwrap();
        assert_eq!(written, vec![0.5, -0.5]);
    }

    #[test]
    fn load_failure_reports_and_keeps_running() {
        let mut shell = test_shell(Session::new());
        let out = run_script(&mut shell, "e /no/such/file.f32\nl\nq\n");
        assert!(out.contains("unable to read"));
        // Loop survived the failed load.
        assert!(out.lines().count() >= 1);
    }

    #[test]
    fn info_shows_selection_in_seconds() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("in.f32");
        write_samples(&src, &[0.0; 8], ByteOrder::Little).unwrap();

        let mut shell = test_shell(Session::new());
        let script = format!("e {}\nL=1\nR=1s\ni\nq\n", src.display());
        let out = run_script(&mut shell, &script);

        // Rate 2, 2 channels: 8 samples = 2 s; L=1 frame = 0.5 s.
        assert!(out.contains("Length:      2.000000s"));
        assert!(out.contains("Selection:   0.500000s .. 1.000000s (0.500000s)"));
        assert!(out.contains("Modified:    no"));
    }

    #[test]
    fn dump_lists_every_sample() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("in.f32");
        write_samples(&src, &[1.5, -0.5], ByteOrder::Little).unwrap();

        let mut shell = test_shell(Session::new());
        let script = format!("e {}\n:dump\nq\n", src.display());
        let out = run_script(&mut shell, &script);
        assert!(out.contains("[     0]: 1.500000"));
        assert!(out.contains("[     1]: -0.500000"));
    }
}
