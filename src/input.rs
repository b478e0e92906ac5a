use crate::command::Command;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::{Context, Editor, Helper, Highlighter, Hinter, Validator};
use std::io::{self, BufRead};
use tracing::debug;

/// Where command text comes from, one line at a time.
pub trait LineSource {
    /// Next line without its terminator, `None` once input is exhausted.
    fn read_line(&mut self) -> io::Result<Option<String>>;

    /// Active destinations, offered for completion by interactive sources.
    fn set_completions(&mut self, _cities: Vec<String>) {}
}

pub struct ReaderSource<R> {
    reader: R,
}

impl<R: BufRead> ReaderSource<R> {
    pub fn new(reader: R) -> ReaderSource<R> {
        ReaderSource { reader }
    }
}

impl<R: BufRead> LineSource for ReaderSource<R> {
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let len = line.trim_end_matches(['\r', '\n']).len();
        line.truncate(len);
        Ok(Some(line))
    }
}

#[derive(Helper, Hinter, Highlighter, Validator)]
pub struct CityHelper {
    pub cities: Vec<String>,
}

impl Completer for CityHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];
        match line.chars().next() {
            Some(letter) if Command::takes_city(letter) => {}
            _ => return Ok((0, Vec::new())),
        }

        // command letters are ascii, so the name starts after byte 0
        let start = line[1..]
            .find(|c: char| c.is_ascii_alphabetic())
            .map_or(pos, |i| i + 1);
        let prefix = &line[start..];

        let candidates = self
            .cities
            .iter()
            .filter(|city| city.starts_with(prefix))
            .map(|city| Pair {
                display: city.clone(),
                replacement: city.clone(),
            })
            .collect();

        Ok((start, candidates))
    }
}

/// Interactive terminal input with history and city completion.
pub struct EditorSource {
    editor: Editor<CityHelper, DefaultHistory>,
}

impl EditorSource {
    pub fn new() -> rustyline::Result<EditorSource> {
        let config = rustyline::Config::builder()
            .history_ignore_space(true)
            .completion_type(rustyline::CompletionType::List)
            .build();

        let mut editor = Editor::with_config(config)?;
        editor.set_helper(Some(CityHelper { cities: Vec::new() }));
        Ok(EditorSource { editor })
    }
}

impl LineSource for EditorSource {
    fn read_line(&mut self) -> io::Result<Option<String>> {
        match self.editor.readline(">> ") {
            Ok(line) => {
                let trimmed = line.trim();
                if !trimmed.is_empty() {
                    self.editor
                        .add_history_entry(trimmed)
                        .map_err(io::Error::other)?;
                }
                Ok(Some(line))
            }
            Err(ReadlineError::Interrupted) => {
                debug!("CTRL-C");
                Ok(None)
            }
            Err(ReadlineError::Eof) => {
                debug!("CTRL-D");
                Ok(None)
            }
            Err(ReadlineError::Io(err)) => Err(err),
            Err(err) => Err(io::Error::other(err)),
        }
    }

    fn set_completions(&mut self, cities: Vec<String>) {
        if let Some(helper) = self.editor.helper_mut() {
            helper.cities = cities;
        }
    }
}
