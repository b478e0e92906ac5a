use crate::command::{Command, CommandReader, InputError};
use crate::error::ScheduleError;
use crate::flight::FlightInfo;
use crate::input::LineSource;
use crate::schedule::Directory;
use colored::Colorize;
use std::io::{self, Write};
use tabled::settings::{Alignment, Style};
use tabled::{Table, Tabled};
use tracing::warn;

const HELP: &str = "\
A <city name>     - Add an active empty flight schedule for
                    <city name>
L                 - List cities which have an active schedule
l <city name>     - List the flights for <city name>
a <city name>
<time> <capacity> - Add a flight for <city name> @ <time> time
                    with <capacity> seats
r <city name>
<time>            - Remove a flight from <city name> whose time is
                    <time>
s <city name>
<time>            - Attempt to schedule a seat on a flight to
                    <city name> departing no later than <time>
u <city name>
<time>            - Unschedule a seat from the flight to <city name>
                    at <time>
R <city name>     - Remove schedule for <city name>
h                 - print this help message
q                 - quit";

/// How listings and messages are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Appearance {
    pub color: bool,
    pub table: bool,
}

#[derive(Tabled)]
struct Destination<'a> {
    destination: &'a str,
    flights: usize,
}

#[derive(Tabled)]
struct FlightRow {
    departure: String,
    available: u32,
    capacity: u32,
}

/// Command loop: reads commands, applies them to the directory and writes
/// one message per outcome.
pub struct Shell<S, W> {
    directory: Directory,
    reader: CommandReader<S>,
    out: W,
    appearance: Appearance,
}

impl<S: LineSource, W: Write> Shell<S, W> {
    pub fn new(
        directory: Directory,
        reader: CommandReader<S>,
        out: W,
        appearance: Appearance,
    ) -> Shell<S, W> {
        Shell {
            directory,
            reader,
            out,
            appearance,
        }
    }

    /// Runs until `q` or end of input.
    pub fn run(&mut self) -> io::Result<()> {
        self.print_help()?;
        loop {
            match self.reader.next_command() {
                Ok(Command::Quit) | Err(InputError::Closed) => break,
                Ok(command) => self.execute(command)?,
                Err(InputError::Argument(err)) => self.report(&err)?,
                Err(InputError::Io(err)) => return Err(err),
            }
            self.refresh_completions();
        }
        self.out.flush()
    }

    pub fn execute(&mut self, command: Command) -> io::Result<()> {
        let outcome = match command {
            Command::AddSchedule { city } => self.directory.add(&city).map(drop),
            Command::ListSchedules => return self.print_schedules(),
            Command::ListFlights { city } => match self.directory.list(&city) {
                Ok(flights) => return self.print_flights(&city, &flights),
                Err(err) => Err(err),
            },
            Command::AddFlight { city, time, capacity } => {
                self.directory.add_flight(&city, time, capacity)
            }
            Command::RemoveFlight { city, time } => self.directory.remove_flight(&city, time),
            Command::ScheduleSeat { city, time } => {
                self.directory.schedule_seat(&city, time).map(drop)
            }
            Command::UnscheduleSeat { city, time } => self.directory.unschedule_seat(&city, time),
            Command::RemoveSchedule { city } => self.directory.remove(&city),
            Command::Help => return self.print_help(),
            Command::Quit => Ok(()),
            Command::Unknown(letter) => {
                warn!(%letter, "bad command");
                let message = self.paint_error("Bad command. Use h to see help.");
                return writeln!(self.out, "{message}");
            }
        };

        match outcome {
            Ok(()) => Ok(()),
            Err(err) => self.report(&err),
        }
    }

    fn report(&mut self, err: &ScheduleError) -> io::Result<()> {
        warn!(%err, "command failed");
        let message = self.paint_error(&err.to_string());
        writeln!(self.out, "{message}")
    }

    fn paint_error(&self, message: &str) -> String {
        if self.appearance.color {
            message.red().to_string()
        } else {
            message.to_string()
        }
    }

    fn print_help(&mut self) -> io::Result<()> {
        let heading = "Here are the possible commands:";
        if self.appearance.color {
            writeln!(self.out, "{}", heading.bold())?;
        } else {
            writeln!(self.out, "{heading}")?;
        }
        writeln!(self.out, "{HELP}")
    }

    fn print_schedules(&mut self) -> io::Result<()> {
        if !self.appearance.table {
            for record in self.directory.list_all() {
                writeln!(self.out, "{}", record.destination())?;
            }
            return Ok(());
        }

        let rows = self
            .directory
            .list_all()
            .map(|record| Destination {
                destination: record.destination(),
                flights: record.flights().list().count(),
            })
            .collect::<Vec<_>>();
        if rows.is_empty() {
            return writeln!(self.out, "No active schedules.");
        }
        let mut table = Table::new(rows);
        table.with(Style::rounded());
        table.with(Alignment::left());
        writeln!(self.out, "{table}")
    }

    fn print_flights(&mut self, city: &str, flights: &[FlightInfo]) -> io::Result<()> {
        write!(self.out, "The flights for {city} are:")?;
        if self.appearance.table {
            writeln!(self.out)?;
            let rows = flights.iter().map(|flight| FlightRow {
                departure: flight.time.clock(),
                available: flight.available,
                capacity: flight.capacity,
            });
            let mut table = Table::new(rows);
            table.with(Style::rounded());
            table.with(Alignment::left());
            return writeln!(self.out, "{table}");
        }

        for flight in flights {
            write!(
                self.out,
                " ({}, {}, {})",
                flight.time, flight.available, flight.capacity
            )?;
        }
        writeln!(self.out)
    }

    fn refresh_completions(&mut self) {
        let cities = self
            .directory
            .list_all()
            .map(|record| record.destination().to_string())
            .collect();
        self.reader.source_mut().set_completions(cities);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::ReaderSource;

    const PLAIN: Appearance = Appearance {
        color: false,
        table: false,
    };

    fn run(pool_size: usize, appearance: Appearance, input: &str) -> (String, Directory) {
        let reader = CommandReader::new(ReaderSource::new(input.as_bytes()), 20);
        let mut shell = Shell::new(Directory::new(pool_size, 5), reader, Vec::new(), appearance);
        shell.run().unwrap();
        let Shell { directory, out, .. } = shell;
        (String::from_utf8(out).unwrap(), directory)
    }

    /// Transcript without the help text printed at startup.
    fn transcript(pool_size: usize, input: &str) -> Vec<String> {
        let (out, _) = run(pool_size, PLAIN, input);
        let help_lines = HELP.lines().count() + 1;
        out.lines().skip(help_lines).map(str::to_string).collect()
    }

    #[test]
    fn test_pool_exhaustion_and_reuse() {
        let out = transcript(
            2,
            "A Toronto\nA Ottawa\nA Montreal\nR Toronto\nA Montreal\nL\nq\n",
        );
        assert_eq!(vec!["Sorry no more free schedules.", "Montreal", "Ottawa"], out);
    }

    #[test]
    fn test_seats_run_out() {
        let out = transcript(
            50,
            "A Paris\na Paris\n600 2\ns Paris\n600\ns Paris\n600\nl Paris\ns Paris\n600\nq\n",
        );
        assert_eq!(
            vec![
                "The flights for Paris are: (600, 0, 2)",
                "Sorry there's no more seats available!",
            ],
            out
        );
    }

    #[test]
    fn test_flights_listed_in_time_order() {
        let out = transcript(
            5,
            "A Toronto\na Toronto\n900 10\na Toronto\n360 100\na Toronto\n720 1\nl Toronto\n",
        );
        assert_eq!(
            vec!["The flights for Toronto are: (360, 100, 100) (720, 1, 1) (900, 10, 10)"],
            out
        );
    }

    #[test]
    fn test_every_error_message() {
        let out = transcript(
            1,
            "A Rome\nA Rome\nA Oslo\nl Oslo\na Rome\n1440 5\na Rome\n100 0\n\
             r Rome\n100\nu Rome\n100\na Rome\n100 1\nu Rome\n100\ns Rome\n50\n\
             s Rome\n-1\nR Oslo\nx\n",
        );
        assert_eq!(
            vec![
                "There is a schedule of Rome already.",
                "Sorry no more free schedules.",
                "No schedule for Oslo",
                "Invalid time value",
                "Invalid capacity value",
                "Sorry there's no flight scheduled on this time.",
                "Sorry there's no flight scheduled on this time.",
                "All the seats on this flights are empty!",
                "Sorry there's no more seats available!",
                "Invalid time value",
                "No schedule for Oslo",
                "Bad command. Use h to see help.",
            ],
            out
        );
    }

    #[test]
    fn test_full_city_rejects_more_flights() {
        let mut input = String::from("A Lima\n");
        for time in [100, 200, 300, 400, 500, 600] {
            input.push_str(&format!("a Lima\n{time} 3\n"));
        }
        input.push_str("l Lima\n");
        let out = transcript(1, &input);
        assert_eq!(
            vec![
                "Sorry we cannot add more flights on this city.",
                "The flights for Lima are: \
                 (100, 3, 3) (200, 3, 3) (300, 3, 3) (400, 3, 3) (500, 3, 3)",
            ],
            out
        );
    }

    #[test]
    fn test_help_and_end_of_input() {
        let (out, directory) = run(3, PLAIN, "A Berlin\nh");
        assert_eq!(2, out.matches("Here are the possible commands:").count());
        assert!(directory.find("Berlin").is_some());
    }

    #[test]
    fn test_quit_stops_reading() {
        let (_, directory) = run(3, PLAIN, "A Berlin\nq\nA Madrid\n");
        assert!(directory.find("Berlin").is_some());
        assert!(directory.find("Madrid").is_none());
    }

    #[test]
    fn test_table_listing() {
        let appearance = Appearance {
            color: false,
            table: true,
        };
        let (out, _) = run(3, appearance, "L\nA Cairo\na Cairo\n75 4\nL\nl Cairo\n");
        assert!(out.contains("No active schedules."));
        assert!(out.contains("destination"));
        assert!(out.contains("Cairo"));
        assert!(out.contains("01:15"));
        assert!(out.contains("The flights for Cairo are:"));
    }
}
