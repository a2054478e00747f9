// Input Collector - prompts for the commands and the target file

use std::io::{BufRead, Write};

use tracing::debug;

use crate::application::codec;
use crate::domain::MessageBundle;
use crate::error::{MashError, Result};

/// Prompt shown before the shared target file
pub const FILE_PROMPT: &str = "file> ";

/// Interactive collector for one run
#[derive(Debug, Clone, Copy)]
pub struct Collector {
    job_count: usize,
}

impl Collector {
    pub fn new(job_count: usize) -> Self {
        Self { job_count }
    }

    /// Prompt `mash-1> ... mash-N>` then `file> ` and gather the answers
    ///
    /// End of input counts as an empty answer.
    pub fn collect<R: BufRead, W: Write>(
        &self,
        mut input: R,
        mut prompt: W,
    ) -> std::io::Result<MessageBundle> {
        let mut commands = Vec::with_capacity(self.job_count);
        for index in 1..=self.job_count {
            let answer = read_answer(&mut input, &mut prompt, &format!("mash-{}> ", index))?;
            commands.push(answer);
        }
        let file = read_answer(&mut input, &mut prompt, FILE_PROMPT)?;
        Ok(MessageBundle::new(commands, file))
    }

    /// Collect, encode and send the bundle, then close the channel
    pub fn run<R, W, C>(&self, input: R, prompt: W, mut channel: C) -> Result<()>
    where
        R: BufRead,
        W: Write,
        C: Write,
    {
        let bundle = self.collect(input, prompt)?;
        let bytes = codec::encode(&bundle)?;
        debug!(fields = bundle.field_count(), bytes = bytes.len(), "Sending bundle");

        channel
            .write_all(&bytes)
            .and_then(|_| channel.flush())
            .map_err(|e| MashError::Pipe(e.to_string()))?;
        drop(channel);
        Ok(())
    }
}

fn read_answer<R: BufRead, W: Write>(
    input: &mut R,
    prompt: &mut W,
    text: &str,
) -> std::io::Result<String> {
    prompt.write_all(text.as_bytes())?;
    prompt.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    Ok(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_collect_prompts_in_order() {
        let input = Cursor::new("wc -l\nsort\ngrep foo\ndata.txt\n");
        let mut prompts = Vec::new();

        let bundle = Collector::new(3).collect(input, &mut prompts).unwrap();

        assert_eq!(bundle.commands, vec!["wc -l", "sort", "grep foo"]);
        assert_eq!(bundle.file, "data.txt");
        assert_eq!(
            String::from_utf8(prompts).unwrap(),
            "mash-1> mash-2> mash-3> file> "
        );
    }

    #[test]
    fn test_blank_lines_and_crlf() {
        let input = Cursor::new("\r\nsort\r\n\n\n");
        let bundle = Collector::new(3).collect(input, std::io::sink()).unwrap();
        assert_eq!(bundle.commands, vec!["", "sort", ""]);
        assert_eq!(bundle.file, "");
    }

    #[test]
    fn test_end_of_input_is_empty_answer() {
        let input = Cursor::new("ls");
        let bundle = Collector::new(2).collect(input, std::io::sink()).unwrap();
        assert_eq!(bundle.commands, vec!["ls", ""]);
        assert_eq!(bundle.file, "");
    }

    #[test]
    fn test_run_writes_encoded_bundle() {
        let input = Cursor::new("a\nb\nc\nf\n");
        let mut channel = Vec::new();

        Collector::new(3)
            .run(input, std::io::sink(), &mut channel)
            .unwrap();

        let decoded = codec::decode(&channel).unwrap();
        assert_eq!(decoded.commands, vec!["a", "b", "c"]);
        assert_eq!(decoded.file, "f");
    }
}
