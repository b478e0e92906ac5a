use crate::error::ScheduleError;
use crate::input::LineSource;
use std::collections::VecDeque;
use std::io;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    AddSchedule { city: String },
    ListSchedules,
    ListFlights { city: String },
    AddFlight { city: String, time: i64, capacity: i64 },
    RemoveFlight { city: String, time: i64 },
    ScheduleSeat { city: String, time: i64 },
    UnscheduleSeat { city: String, time: i64 },
    RemoveSchedule { city: String },
    Help,
    Quit,
    Unknown(char),
}

impl Command {
    pub fn takes_city(letter: char) -> bool {
        matches!(letter, 'A' | 'l' | 'a' | 'r' | 's' | 'u' | 'R')
    }
}

#[derive(Error, Debug)]
pub enum InputError {
    #[error("input closed")]
    Closed,
    #[error(transparent)]
    Argument(#[from] ScheduleError),
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Character-level tokenizer over a line source.
///
/// A command is one non-blank character. City names start at the next letter
/// and run to the end of that line. Numbers are whitespace separated and may
/// sit on the same or on following lines.
pub struct CommandReader<S> {
    source: S,
    pending: VecDeque<char>,
    max_city_len: usize,
}

impl<S: LineSource> CommandReader<S> {
    pub fn new(source: S, max_city_len: usize) -> CommandReader<S> {
        CommandReader {
            source,
            pending: VecDeque::new(),
            max_city_len,
        }
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    pub fn next_command(&mut self) -> Result<Command, InputError> {
        let letter = self
            .skip_while(char::is_whitespace)?
            .ok_or(InputError::Closed)?;
        self.bump();

        let command = match letter {
            'A' => Command::AddSchedule { city: self.city()? },
            'L' => Command::ListSchedules,
            'l' => Command::ListFlights { city: self.city()? },
            'a' => {
                let city = self.city()?;
                let time = self.number(ScheduleError::InvalidTime)?;
                let capacity = self.number(ScheduleError::InvalidCapacity)?;
                Command::AddFlight { city, time, capacity }
            }
            'r' => Command::RemoveFlight {
                city: self.city()?,
                time: self.number(ScheduleError::InvalidTime)?,
            },
            's' => Command::ScheduleSeat {
                city: self.city()?,
                time: self.number(ScheduleError::InvalidTime)?,
            },
            'u' => Command::UnscheduleSeat {
                city: self.city()?,
                time: self.number(ScheduleError::InvalidTime)?,
            },
            'R' => Command::RemoveSchedule { city: self.city()? },
            'h' => Command::Help,
            'q' => Command::Quit,
            other => Command::Unknown(other),
        };
        Ok(command)
    }

    fn city(&mut self) -> Result<String, InputError> {
        self.skip_while(|c| !c.is_ascii_alphabetic())?
            .ok_or(InputError::Closed)?;

        let mut city = String::new();
        while let Some(c) = self.bump() {
            if c == '\n' {
                break;
            }
            city.push(c);
        }
        let city = city.chars().take(self.max_city_len).collect::<String>();
        Ok(city.trim_end().to_string())
    }

    /// Reads a signed integer. A malformed token drops the rest of its line.
    fn number(&mut self, invalid: ScheduleError) -> Result<i64, InputError> {
        if self.skip_while(char::is_whitespace)?.is_none() {
            return Err(invalid.into());
        }

        let mut token = String::new();
        if let Some(sign @ ('-' | '+')) = self.peek()? {
            token.push(sign);
            self.bump();
        }
        while let Some(digit) = self.peek()?.filter(char::is_ascii_digit) {
            token.push(digit);
            self.bump();
        }

        token.parse::<i64>().map_err(|_| {
            self.discard_line();
            invalid.into()
        })
    }

    fn peek(&mut self) -> io::Result<Option<char>> {
        while self.pending.is_empty() {
            match self.source.read_line()? {
                Some(line) => {
                    self.pending
                        .extend(line.trim_end_matches(['\r', '\n']).chars());
                    self.pending.push_back('\n');
                }
                None => return Ok(None),
            }
        }
        Ok(self.pending.front().copied())
    }

    fn bump(&mut self) -> Option<char> {
        self.pending.pop_front()
    }

    fn skip_while(&mut self, skip: impl Fn(char) -> bool) -> io::Result<Option<char>> {
        while let Some(c) = self.peek()? {
            if !skip(c) {
                return Ok(Some(c));
            }
            self.bump();
        }
        Ok(None)
    }

    fn discard_line(&mut self) {
        while let Some(c) = self.bump() {
            if c == '\n' {
                break;
            }
        }
    }
}
