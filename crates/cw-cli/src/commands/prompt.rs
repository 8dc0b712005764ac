use std::io;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Lines, Stdin};

/// Line-oriented stdin reader for the shell.
pub struct Prompt {
    lines: Lines<BufReader<Stdin>>,
}

impl Prompt {
    pub fn stdin() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }

    /// Print `label` on stderr and read one line. `None` on end of input.
    pub async fn ask(&mut self, label: &str) -> io::Result<Option<String>> {
        let mut out = tokio::io::stderr();
        out.write_all(label.as_bytes()).await?;
        out.flush().await?;
        self.lines.next_line().await
    }
}

/// Read a password from the terminal with echo turned off.
pub async fn ask_password() -> io::Result<String> {
    read_off_runtime(|| rpassword::prompt_password("password: ")).await
}

/// Terminal reads block; keep them off the async workers.
async fn read_off_runtime<F>(read: F) -> io::Result<String>
where
    F: FnOnce() -> io::Result<String> + Send + 'static,
{
    tokio::task::spawn_blocking(read)
        .await
        .map_err(io::Error::other)?
}
