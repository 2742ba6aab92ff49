use std::io::{self, BufRead, Write};

/// Terminal seam for the interpreter: `print` goes through `write_line`,
/// `input` writes its prompt with `write` and reads with `read_line`.
/// Tests substitute a scripted implementation.
pub trait Host {
    fn write(&mut self, text: &str);
    fn write_line(&mut self, text: &str);
    /// One line of input, without its trailing newline. `None` on EOF.
    fn read_line(&mut self) -> io::Result<Option<String>>;
}

/// Process stdin/stdout.
pub struct StdioHost;

impl Host for StdioHost {
    fn write(&mut self, text: &str) {
        print!("{}", text);
        io::stdout().flush().ok();
    }

    fn write_line(&mut self, text: &str) {
        println!("{}", text);
        io::stdout().flush().ok();
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        let read = io::stdin().lock().read_line(&mut line)?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
    }
}
